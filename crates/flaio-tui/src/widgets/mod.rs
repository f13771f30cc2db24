pub mod help;
pub mod hero;
pub mod image;
pub mod particles;
pub mod project_panel;
pub mod status_bar;

pub use help::HelpWidget;
pub use hero::{HeroHits, HeroWidget};
pub use image::HalfblockImage;
pub use particles::ParticleLayer;
pub use project_panel::ProjectPanelWidget;
pub use status_bar::StatusBarWidget;
