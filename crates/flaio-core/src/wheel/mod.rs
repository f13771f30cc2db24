//! The infinite word wheel.
//!
//! Layers from the bottom up:
//! - [`spring`]: damped spring integrator
//! - [`selector`]: continuous position, logical index and renormalization
//! - [`input`]: wheel/touch/key/click fusion into intents
//! - [`autoplay`]: auto-advance with idle resume
//! - [`visual`]: per-frame item looks
//! - [`controller`]: all of the above behind one type

pub mod autoplay;
pub mod controller;
pub mod input;
pub mod selector;
pub mod spring;
pub mod visual;

pub use autoplay::{AutoAdvance, AutoplayState};
pub use controller::WheelController;
pub use input::{InputEvent, InputFusion, Intent, NavKey, WheelGesture};
pub use selector::{Selection, WheelSelector};
pub use spring::Spring;
pub use visual::{map_item, rendered_instances, ItemVisual, RenderedItem};
