pub mod config;
pub mod error;
pub mod hero;
pub mod particles;
pub mod project;
pub mod theme;
pub mod wheel;

pub use config::{AppConfig, EasingType};
pub use error::{Error, Result};
pub use hero::HeroLayout;
pub use particles::{ParticleField, Raster, Viewport};
pub use project::{AppPreview, Project, ProjectSet};
pub use theme::{DesignTheme, SubscriptionId, ThemeSignal};
pub use wheel::{InputEvent, NavKey, Selection, WheelController};
