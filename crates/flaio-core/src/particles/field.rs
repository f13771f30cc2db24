use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use super::config::{ParticleConfig, Shape};
use super::particle::{Particle, Repulsion};
use super::raster::{Raster, Viewport};
use crate::config::ParticleTuning;
use crate::theme::DesignTheme;

/// Lifecycle of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Uninitialized,
    Running,
    /// Not moving: reduced motion at start, or stopped for good
    Stopped,
}

/// What a call to [`ParticleField::frame`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Particles were updated (when running) and painted
    Rendered,
    /// Frame dropped by the half-rate budget
    Skipped,
    /// Nothing to do
    Idle,
}

/// Ambient particle animation behind the page
#[derive(Debug, Clone)]
pub struct ParticleField {
    state: FieldState,
    theme: DesignTheme,
    config: ParticleConfig,
    tuning: ParticleTuning,
    particles: Vec<Particle>,
    viewport: Option<Viewport>,
    rng: StdRng,
    frame_count: u64,
    started_at: Option<Instant>,
    needs_paint: bool,
    torn_down: bool,
}

impl ParticleField {
    pub fn new(theme: DesignTheme, tuning: ParticleTuning) -> Self {
        Self::with_rng(theme, tuning, StdRng::from_rng(&mut rand::rng()))
    }

    /// Deterministic field for tests and reproducible runs
    pub fn with_seed(theme: DesignTheme, tuning: ParticleTuning, seed: u64) -> Self {
        Self::with_rng(theme, tuning, StdRng::seed_from_u64(seed))
    }

    fn with_rng(theme: DesignTheme, tuning: ParticleTuning, rng: StdRng) -> Self {
        Self {
            state: FieldState::Uninitialized,
            theme,
            config: ParticleConfig::for_theme(theme),
            tuning,
            particles: Vec::new(),
            viewport: None,
            rng,
            frame_count: 0,
            started_at: None,
            needs_paint: false,
            torn_down: false,
        }
    }

    #[inline]
    pub fn state(&self) -> FieldState {
        self.state
    }

    #[inline]
    pub fn theme(&self) -> DesignTheme {
        self.theme
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Spawn the field. Reduced motion is only consulted here: a reduced start
    /// paints the particles once and never moves them.
    pub fn start(&mut self, viewport: Viewport, reduced_motion: bool, now: Instant) {
        if self.state != FieldState::Uninitialized {
            return;
        }
        self.viewport = Some(viewport);
        self.spawn();
        self.started_at = Some(now);
        self.needs_paint = true;
        self.state = if reduced_motion {
            FieldState::Stopped
        } else {
            FieldState::Running
        };
        debug!(
            theme = %self.theme,
            count = self.particles.len(),
            reduced_motion,
            "particle field started"
        );
    }

    /// Replace the field with the new theme's configuration
    pub fn set_theme(&mut self, theme: DesignTheme) {
        if theme == self.theme {
            return;
        }
        self.theme = theme;
        self.config = ParticleConfig::for_theme(theme);
        self.frame_count = 0;
        if self.viewport.is_some() && !self.torn_down {
            self.spawn();
            self.needs_paint = true;
            debug!(theme = %theme, "particle field respawned");
        }
    }

    /// New wrap bounds. Particles keep their positions.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.viewport == Some(viewport) {
            return;
        }
        self.viewport = Some(viewport);
        if !self.torn_down {
            self.needs_paint = true;
        }
    }

    /// Stop for good. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.needs_paint = false;
        self.state = FieldState::Stopped;
        debug!("particle field stopped");
    }

    fn spawn(&mut self) {
        let Some(vp) = self.viewport else {
            return;
        };
        let (w, h) = (vp.width(), vp.height());
        let config = self.config;
        let rng = &mut self.rng;
        self.particles = (0..config.count)
            .map(|_| Particle::spawn(rng, w, h, &config))
            .collect();
    }

    /// Run one animation frame into `raster`. `pointer` is in virtual pixels.
    pub fn frame(
        &mut self,
        now: Instant,
        pointer: Option<(f64, f64)>,
        raster: &mut Raster,
    ) -> FrameOutcome {
        let Some(vp) = self.viewport else {
            return FrameOutcome::Idle;
        };
        raster.resize(vp.cols, vp.rows);

        match self.state {
            FieldState::Uninitialized => FrameOutcome::Idle,
            FieldState::Stopped => {
                if !self.needs_paint {
                    return FrameOutcome::Idle;
                }
                self.needs_paint = false;
                raster.clear();
                self.paint(raster, &vp, 0.0);
                FrameOutcome::Rendered
            }
            FieldState::Running => {
                self.frame_count += 1;
                if !self.config.has_trail() && self.frame_count % 2 != 0 && !self.needs_paint {
                    return FrameOutcome::Skipped;
                }
                self.needs_paint = false;

                let repulsion = self.config.repels().then_some(Repulsion {
                    radius: self.tuning.pointer_radius,
                    force: self.tuning.pointer_force,
                });
                let (w, h) = (vp.width(), vp.height());
                for p in &mut self.particles {
                    p.update(w, h, pointer, repulsion);
                }

                if self.config.has_trail() {
                    raster.fade(self.config.trail);
                } else {
                    raster.clear();
                }

                let t_ms = self
                    .started_at
                    .map(|s| now.saturating_duration_since(s).as_secs_f64() * 1000.0)
                    .unwrap_or(0.0);
                self.paint(raster, &vp, t_ms);
                FrameOutcome::Rendered
            }
        }
    }

    fn paint(&self, raster: &mut Raster, vp: &Viewport, t_ms: f64) {
        let cfg = &self.config;
        let glow = if cfg.has_glow() {
            (cfg.glow / vp.cell_width).min(1.0) * 0.6
        } else {
            0.0
        };

        for p in &self.particles {
            let alpha = p.opacity(t_ms, cfg.flicker) * cfg.fill_alpha;
            let col = (p.x / vp.cell_width).floor() as i32;
            let row = (p.y / vp.cell_height).floor() as i32;

            match cfg.shape {
                Shape::Circle => paint_circle(raster, vp, p, alpha),
                Shape::Square => paint_square(raster, vp, p, alpha),
                Shape::Line => paint_line(raster, vp, p, alpha),
            }
            if glow > 0.0 {
                raster.spill(col, row, glow * alpha);
            }
        }
    }
}

fn dot_glyph(size: f64) -> char {
    if size < 1.5 {
        '·'
    } else if size < 2.5 {
        '•'
    } else {
        '●'
    }
}

fn paint_circle(raster: &mut Raster, vp: &Viewport, p: &Particle, alpha: f64) {
    // small circles fit in one cell
    if p.size * 2.0 <= vp.cell_width {
        let col = (p.x / vp.cell_width).floor() as i32;
        let row = (p.y / vp.cell_height).floor() as i32;
        raster.plot(col, row, dot_glyph(p.size), alpha);
        return;
    }

    let r = p.size;
    let c0 = ((p.x - r) / vp.cell_width).floor() as i32;
    let c1 = ((p.x + r) / vp.cell_width).ceil() as i32;
    let r0 = ((p.y - r) / vp.cell_height).floor() as i32;
    let r1 = ((p.y + r) / vp.cell_height).ceil() as i32;
    for row in r0..=r1 {
        for col in c0..=c1 {
            let cx = (col as f64 + 0.5) * vp.cell_width;
            let cy = (row as f64 + 0.5) * vp.cell_height;
            let (dx, dy) = (cx - p.x, cy - p.y);
            if dx * dx + dy * dy <= r * r {
                raster.plot(col, row, '█', alpha);
            }
        }
    }
}

fn paint_square(raster: &mut Raster, vp: &Viewport, p: &Particle, alpha: f64) {
    let half = p.size / 2.0;
    let c0 = ((p.x - half) / vp.cell_width).floor() as i32;
    let c1 = ((p.x + half) / vp.cell_width).floor() as i32;
    let r0 = ((p.y - half) / vp.cell_height).floor() as i32;
    let r1 = ((p.y + half) / vp.cell_height).floor() as i32;
    let glyph = if c0 == c1 && r0 == r1 { '■' } else { '█' };
    for row in r0..=r1 {
        for col in c0..=c1 {
            raster.plot(col, row, glyph, alpha);
        }
    }
}

fn paint_line(raster: &mut Raster, vp: &Viewport, p: &Particle, alpha: f64) {
    let (dx, dy) = (p.vx * 8.0, p.vy * 8.0);
    let (dxc, dyc) = (dx / vp.cell_width, dy / vp.cell_height);
    let glyph = if dyc.abs() <= dxc.abs() * 0.5 {
        '─'
    } else if dxc.abs() <= dyc.abs() * 0.5 {
        '│'
    } else if (dxc > 0.0) == (dyc > 0.0) {
        '╲'
    } else {
        '╱'
    };

    let steps = (dxc.abs().max(dyc.abs()) * 2.0).ceil().max(1.0) as i32;
    let mut last = None;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let col = ((p.x + dx * t) / vp.cell_width).floor() as i32;
        let row = ((p.y + dy * t) / vp.cell_height).floor() as i32;
        if last == Some((col, row)) {
            continue;
        }
        last = Some((col, row));
        raster.plot(col, row, glyph, alpha);
    }
}
