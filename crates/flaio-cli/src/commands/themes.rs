use anyhow::Result;

use flaio_core::{AppConfig, DesignTheme};

use crate::commands::run::resolve_theme;

pub fn run(config: &AppConfig) -> Result<()> {
    let current = resolve_theme(config, None)?;

    println!("Themes:\n");
    for theme in DesignTheme::ALL {
        let marker = if theme == current { "*" } else { " " };
        println!("  {} {:<10} {}", marker, theme.id(), theme.description());
    }
    println!("\nSet with: flaio theme <name>");

    Ok(())
}
