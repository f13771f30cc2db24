//! Theme preference persisted between runs

use std::path::{Path, PathBuf};

use flaio_core::DesignTheme;
use tracing::warn;

pub struct ThemePreference {
    path: PathBuf,
}

impl ThemePreference {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("theme"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored theme, if any. An unreadable or unknown value counts as none.
    pub fn load(&self) -> Option<DesignTheme> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match content.parse() {
            Ok(theme) => Some(theme),
            Err(e) => {
                warn!(path = %self.path.display(), "ignoring stored theme: {}", e);
                None
            }
        }
    }

    pub fn save(&self, theme: DesignTheme) -> flaio_core::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, theme.id())?;
        Ok(())
    }
}
