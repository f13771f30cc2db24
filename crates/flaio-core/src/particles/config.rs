use serde::{Deserialize, Serialize};

use crate::theme::DesignTheme;

/// Direction class particles are spawned with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Drift {
    Up,
    Down,
    Horizontal,
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Circle,
    /// Short stroke along the velocity
    Line,
    /// Not affected by pointer repulsion
    Square,
}

/// Look and motion of one theme's particle field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleConfig {
    pub count: usize,
    /// RGB
    pub color: [u8; 3],
    pub min_size: f64,
    pub max_size: f64,
    /// Base speed, in virtual pixels per frame
    pub speed: f64,
    pub drift: Drift,
    pub shape: Shape,
    /// Glow radius; 0 disables glow
    pub glow: f64,
    pub flicker: bool,
    /// Fraction of the previous frame kept; 0 clears every frame
    pub trail: f64,
    /// Alpha multiplier applied to the fill
    pub fill_alpha: f64,
}

impl ParticleConfig {
    pub fn for_theme(theme: DesignTheme) -> Self {
        match theme {
            DesignTheme::Editorial => Self {
                count: 20,
                color: [182, 160, 130],
                min_size: 1.0,
                max_size: 2.5,
                speed: 0.25,
                drift: Drift::Up,
                shape: Shape::Circle,
                glow: 0.0,
                flicker: false,
                trail: 0.0,
                fill_alpha: 1.0,
            },
            DesignTheme::Terminal => Self {
                count: 30,
                color: [0, 255, 65],
                min_size: 1.0,
                max_size: 2.0,
                speed: 1.0,
                drift: Drift::Down,
                shape: Shape::Circle,
                glow: 8.0,
                flicker: false,
                trail: 0.92,
                fill_alpha: 1.0,
            },
            DesignTheme::Cyberpunk => Self {
                count: 15,
                color: [255, 46, 151],
                min_size: 1.0,
                max_size: 3.0,
                speed: 0.7,
                drift: Drift::Horizontal,
                shape: Shape::Line,
                glow: 12.0,
                flicker: false,
                trail: 0.85,
                fill_alpha: 1.0,
            },
            DesignTheme::Minimal => Self {
                count: 5,
                color: [0, 113, 227],
                min_size: 30.0,
                max_size: 80.0,
                speed: 0.1,
                drift: Drift::Random,
                shape: Shape::Circle,
                glow: 0.0,
                flicker: false,
                trail: 0.0,
                fill_alpha: 0.04,
            },
            DesignTheme::Brutalist => Self {
                count: 8,
                color: [255, 0, 0],
                min_size: 3.0,
                max_size: 7.0,
                speed: 0.0,
                drift: Drift::Random,
                shape: Shape::Square,
                glow: 0.0,
                flicker: false,
                trail: 0.0,
                fill_alpha: 1.0,
            },
            DesignTheme::Retro => Self {
                count: 22,
                color: [255, 176, 0],
                min_size: 1.0,
                max_size: 2.5,
                speed: 0.4,
                drift: Drift::Up,
                shape: Shape::Circle,
                glow: 6.0,
                flicker: true,
                trail: 0.0,
                fill_alpha: 1.0,
            },
        }
    }

    #[inline]
    pub fn has_trail(&self) -> bool {
        self.trail > 0.0
    }

    #[inline]
    pub fn has_glow(&self) -> bool {
        self.glow > 0.0
    }

    /// Whether the pointer pushes particles of this shape away
    #[inline]
    pub fn repels(&self) -> bool {
        self.shape != Shape::Square
    }
}
