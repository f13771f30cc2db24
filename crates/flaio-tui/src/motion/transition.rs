//! Exit-then-enter transition for the project panel.
//!
//! The outgoing card fades out while drifting up; only once it is gone does the
//! incoming card fade in from below.

use std::time::{Duration, Instant};

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete_at, lerp, progress_at};

/// Vertical drift of the entering card, in virtual pixels
const ENTER_OFFSET: f64 = 16.0;
/// Vertical drift of the exiting card, in virtual pixels
const EXIT_OFFSET: f64 = -12.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Exiting { start: Instant, next: usize },
    Entering { start: Instant },
}

/// What to draw this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelFrame {
    /// Project index on screen
    pub index: usize,
    pub opacity: f64,
    /// Vertical offset in virtual pixels (negative = up)
    pub offset: f64,
}

#[derive(Debug, Clone)]
pub struct PanelTransition {
    shown: usize,
    phase: Phase,
    duration: Duration,
    easing: EasingType,
    reduced_motion: bool,
}

impl PanelTransition {
    pub fn new(
        initial: usize,
        duration: Duration,
        easing: EasingType,
        reduced_motion: bool,
    ) -> Self {
        Self {
            shown: initial,
            phase: Phase::Idle,
            duration,
            easing,
            reduced_motion,
        }
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
        if reduced {
            if let Phase::Exiting { next, .. } = self.phase {
                self.shown = next;
            }
            self.phase = Phase::Idle;
        }
    }

    /// Index that will be shown once transitions settle
    pub fn target(&self) -> usize {
        match self.phase {
            Phase::Exiting { next, .. } => next,
            _ => self.shown,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Switch to another project
    pub fn select(&mut self, index: usize, now: Instant) {
        if self.reduced_motion || self.duration.is_zero() {
            self.shown = index;
            self.phase = Phase::Idle;
            return;
        }
        self.phase = match self.phase {
            // already leaving: just retarget what comes next
            Phase::Exiting { start, .. } => Phase::Exiting { start, next: index },
            _ if index == self.shown => return,
            _ => Phase::Exiting { start: now, next: index },
        };
    }

    /// Advance phases and return what to draw
    pub fn frame(&mut self, now: Instant) -> PanelFrame {
        if let Phase::Exiting { start, next } = self.phase {
            if is_complete_at(start, now, self.duration) {
                self.shown = next;
                self.phase = Phase::Entering {
                    start: start + self.duration,
                };
            }
        }
        if let Phase::Entering { start } = self.phase {
            if is_complete_at(start, now, self.duration) {
                self.phase = Phase::Idle;
            }
        }

        match self.phase {
            Phase::Idle => PanelFrame {
                index: self.shown,
                opacity: 1.0,
                offset: 0.0,
            },
            Phase::Exiting { start, .. } => {
                let t = self.easing.apply(progress_at(start, now, self.duration));
                PanelFrame {
                    index: self.shown,
                    opacity: 1.0 - t,
                    offset: lerp(0.0, EXIT_OFFSET, t),
                }
            }
            Phase::Entering { start } => {
                let t = self.easing.apply(progress_at(start, now, self.duration));
                PanelFrame {
                    index: self.shown,
                    opacity: t,
                    offset: lerp(ENTER_OFFSET, 0.0, t),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const D: Duration = Duration::from_millis(300);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_exit_then_enter() {
        let t0 = Instant::now();
        let mut p = PanelTransition::new(0, D, EasingType::Cubic, false);
        p.select(1, t0);
        assert_eq!(p.target(), 1);

        let mid_exit = p.frame(t0 + ms(150));
        assert_eq!(mid_exit.index, 0);
        assert!(mid_exit.opacity < 1.0 && mid_exit.opacity > 0.0);
        assert!(mid_exit.offset < 0.0);

        let mid_enter = p.frame(t0 + ms(450));
        assert_eq!(mid_enter.index, 1);
        assert!(mid_enter.offset > 0.0);

        let done = p.frame(t0 + ms(700));
        assert_eq!(done, PanelFrame { index: 1, opacity: 1.0, offset: 0.0 });
        assert!(!p.is_animating());
    }

    #[test]
    fn test_retarget_during_exit() {
        let t0 = Instant::now();
        let mut p = PanelTransition::new(0, D, EasingType::Cubic, false);
        p.select(1, t0);
        p.select(2, t0 + ms(100));
        assert_eq!(p.frame(t0 + ms(350)).index, 2);
    }

    #[test]
    fn test_reduced_motion_is_instant() {
        let t0 = Instant::now();
        let mut p = PanelTransition::new(0, D, EasingType::Cubic, true);
        p.select(3, t0);
        assert_eq!(p.frame(t0), PanelFrame { index: 3, opacity: 1.0, offset: 0.0 });
    }

    #[test]
    fn test_same_index_is_noop() {
        let t0 = Instant::now();
        let mut p = PanelTransition::new(2, D, EasingType::Cubic, false);
        p.select(2, t0);
        assert!(!p.is_animating());
    }
}
