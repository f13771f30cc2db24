//! Ambient particle field.
//!
//! Particles live in virtual pixels so the per-theme tuning keeps its scale;
//! painting goes through a [`Raster`] of terminal cells.

pub mod config;
pub mod field;
pub mod particle;
pub mod raster;

pub use config::{Drift, ParticleConfig, Shape};
pub use field::{FieldState, FrameOutcome, ParticleField};
pub use particle::{Particle, Repulsion};
pub use raster::{Raster, RasterCell, Viewport};
