use std::f64::consts::TAU;

use rand::Rng;

use super::config::{Drift, ParticleConfig};

/// One particle, in virtual pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub base_opacity: f64,
    pub phase: f64,
}

/// Pointer repulsion parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Repulsion {
    pub radius: f64,
    pub force: f64,
}

impl Particle {
    /// Spawn at a uniformly random spot inside `width` x `height`
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        width: f64,
        height: f64,
        cfg: &ParticleConfig,
    ) -> Self {
        let size = cfg.min_size + rng.random::<f64>() * (cfg.max_size - cfg.min_size);
        let base_opacity = 0.15 + rng.random::<f64>() * 0.35;

        let s = cfg.speed;
        let (vx, vy) = match cfg.drift {
            Drift::Up => (
                (rng.random::<f64>() - 0.5) * s * 0.4,
                -(rng.random::<f64>() * s + s * 0.3),
            ),
            Drift::Down => (
                (rng.random::<f64>() - 0.5) * s * 0.3,
                rng.random::<f64>() * s + s * 0.5,
            ),
            Drift::Horizontal => (
                rng.random::<f64>() * s + s * 0.5,
                (rng.random::<f64>() - 0.5) * s * 0.2,
            ),
            Drift::Random => (
                (rng.random::<f64>() - 0.5) * s,
                (rng.random::<f64>() - 0.5) * s,
            ),
        };

        Self {
            x: rng.random::<f64>() * width,
            y: rng.random::<f64>() * height,
            vx,
            vy,
            size,
            base_opacity,
            phase: rng.random::<f64>() * TAU,
        }
    }

    /// One frame of motion: drift, pointer repulsion, then edge wrap
    pub fn update(
        &mut self,
        width: f64,
        height: f64,
        pointer: Option<(f64, f64)>,
        repulsion: Option<Repulsion>,
    ) {
        self.x += self.vx;
        self.y += self.vy;

        if let (Some((mx, my)), Some(rep)) = (pointer, repulsion) {
            let dx = self.x - mx;
            let dy = self.y - my;
            let dist_sq = dx * dx + dy * dy;
            if dist_sq > 0.0 && dist_sq < rep.radius * rep.radius {
                let dist = dist_sq.sqrt();
                let force = (rep.radius - dist) / rep.radius * rep.force;
                self.x += dx / dist * force;
                self.y += dy / dist * force;
            }
        }

        self.wrap(width, height);
    }

    /// Re-enter from the opposite edge once fully past one
    pub fn wrap(&mut self, width: f64, height: f64) {
        let margin = self.size * 2.0;
        if self.x < -margin {
            self.x = width + self.size;
        }
        if self.x > width + margin {
            self.x = -self.size;
        }
        if self.y < -margin {
            self.y = height + self.size;
        }
        if self.y > height + margin {
            self.y = -self.size;
        }
    }

    /// Opacity at time `t_ms`, with optional flicker
    pub fn opacity(&self, t_ms: f64, flicker: bool) -> f64 {
        if flicker {
            self.base_opacity * (0.5 + 0.5 * (t_ms * 0.003 + self.phase * 10.0).sin())
        } else {
            self.base_opacity
        }
    }
}
