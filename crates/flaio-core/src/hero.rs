//! Backronym hero layout: the wheel column width follows the active word.

use std::time::Duration;

use crate::config::SpringConfig;
use crate::wheel::Spring;

/// Width used when the active word measures zero
pub const DEFAULT_WORD_WIDTH: f64 = 8.0;

/// Horizontal breathing room around the word, in cells
pub const WORD_PADDING: f64 = 4.0;

#[derive(Debug, Clone)]
pub struct HeroLayout {
    width: Spring,
    reduced_motion: bool,
}

impl HeroLayout {
    /// Start already settled on `word_width`
    pub fn new(word_width: usize, reduced_motion: bool) -> Self {
        Self {
            width: Spring::new(SpringConfig::side(), target_width(word_width)),
            reduced_motion,
        }
    }

    /// Follow a new active word. Reduced motion jumps straight there.
    pub fn measure(&mut self, word_width: usize) {
        let target = target_width(word_width);
        if self.reduced_motion {
            self.width.set(target);
        } else if self.width.is_animating() || self.width.value() != target {
            self.width.animate_to(target);
        }
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
        if reduced {
            if let Some(target) = self.width.target() {
                self.width.set(target);
            }
        }
    }

    pub fn tick(&mut self, dt: Duration) -> bool {
        self.width.tick(dt)
    }

    pub fn is_animating(&self) -> bool {
        self.width.is_animating()
    }

    /// Current column width in cells, rounded up
    pub fn width(&self) -> u16 {
        self.width.value().max(0.0).ceil().min(u16::MAX as f64) as u16
    }
}

fn target_width(word_width: usize) -> f64 {
    let w = if word_width == 0 {
        DEFAULT_WORD_WIDTH
    } else {
        word_width as f64
    };
    w + WORD_PADDING
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_zero_width_falls_back() {
        let hero = HeroLayout::new(0, false);
        assert_eq!(hero.width(), (DEFAULT_WORD_WIDTH + WORD_PADDING) as u16);
    }

    #[test]
    fn test_width_springs_to_word() {
        let mut hero = HeroLayout::new(4, false);
        assert_eq!(hero.width(), 8);
        hero.measure(7);
        assert!(hero.is_animating());
        hero.tick(FRAME);
        assert!(hero.width() < 11);
        for _ in 0..500 {
            if !hero.tick(FRAME) {
                break;
            }
        }
        assert_eq!(hero.width(), 11);
    }

    #[test]
    fn test_reduced_motion_snaps() {
        let mut hero = HeroLayout::new(4, true);
        hero.measure(7);
        assert!(!hero.is_animating());
        assert_eq!(hero.width(), 11);
    }
}
