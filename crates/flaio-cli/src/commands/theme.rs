use anyhow::Result;
use tracing::info;

use flaio_core::{AppConfig, DesignTheme};

use crate::preference::ThemePreference;

pub fn run(config: &AppConfig, name: &str) -> Result<()> {
    let theme: DesignTheme = name.parse()?;
    let preference = ThemePreference::new(&config.data_dir());
    preference.save(theme)?;
    info!(theme = %theme, path = %preference.path().display(), "theme preference stored");
    println!("Theme set to {} ({})", theme.label(), theme.description());
    Ok(())
}
