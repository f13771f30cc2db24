use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::debug;

/// Load state of one screenshot or icon
pub enum AssetState {
    Loading,
    Ready(DynamicImage),
    /// Failed for good; the emoji fallback is shown instead
    Failed(String),
}

/// Screenshots and app icons, keyed by their path relative to the assets dir
pub struct AssetCache {
    root: PathBuf,
    entries: HashMap<String, AssetState>,
}

impl AssetCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path for a relative asset
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Mark an asset as loading. Returns false if it is already known.
    pub fn request(&mut self, relative: &str) -> bool {
        if self.entries.contains_key(relative) {
            return false;
        }
        self.entries.insert(relative.to_string(), AssetState::Loading);
        true
    }

    pub fn set_loaded(&mut self, relative: &str, image: DynamicImage) {
        self.entries
            .insert(relative.to_string(), AssetState::Ready(image));
    }

    pub fn set_failed(&mut self, relative: &str, error: String) {
        debug!(asset = relative, %error, "asset unavailable, using fallback");
        self.entries
            .insert(relative.to_string(), AssetState::Failed(error));
    }

    pub fn get(&self, relative: &str) -> Option<&DynamicImage> {
        match self.entries.get(relative) {
            Some(AssetState::Ready(image)) => Some(image),
            _ => None,
        }
    }

    pub fn is_loading(&self, relative: &str) -> bool {
        matches!(self.entries.get(relative), Some(AssetState::Loading))
    }

    pub fn is_failed(&self, relative: &str) -> bool {
        matches!(self.entries.get(relative), Some(AssetState::Failed(_)))
    }
}

/// Decode an image from disk. Blocking; run it off the UI task.
pub fn load_asset(path: &Path) -> Result<DynamicImage, String> {
    image::open(path).map_err(|e| e.to_string())
}
