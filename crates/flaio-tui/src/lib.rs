pub mod app;
pub mod assets;
pub mod event;
pub mod input;
pub mod keymap;
pub mod motion;
pub mod theme;
pub mod themes;
pub mod ui;
pub mod widgets;

pub use app::App;
pub use theme::Palette;
pub use themes::load_palette;
