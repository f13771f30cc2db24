//! Time-based animation helpers for the TUI layer.
//!
//! Springs live in `flaio_core`; this module covers the fixed-duration eased
//! transitions.

pub mod easing;
pub mod timing;
pub mod transition;

pub use easing::{EasingType, EasingTypeExt};
pub use transition::{PanelFrame, PanelTransition};
