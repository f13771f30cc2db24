//! Infinite wheel selection state machine.
//!
//! The wheel keeps one continuous scroll position. At rest it sits at
//! `-logical * item_height`; the logical index is unbounded in principle but
//! is kept inside `[-count, 2 * count)` by silently shifting everything by one
//! period whenever the nearest index leaves that range.

use std::time::Duration;

use tracing::trace;

use super::spring::Spring;
use crate::config::SpringConfig;
use crate::error::{Error, Result};

/// Snapshot reported to consumers whenever a selection is made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Index into the item set, always in `[0, count)`
    pub active_index: usize,
    /// Unreduced step count the wheel is heading to
    pub logical_index: i64,
}

#[derive(Debug, Clone, Copy)]
struct DragAnchor {
    pointer: f64,
    position: f64,
}

#[derive(Debug, Clone)]
pub struct WheelSelector {
    count: usize,
    item_height: f64,
    spring: Spring,
    logical_index: i64,
    drag: Option<DragAnchor>,
}

impl WheelSelector {
    /// Create a wheel over `count` items. An empty set is rejected.
    pub fn new(count: usize, item_height: f64, spring: SpringConfig) -> Result<Self> {
        if count == 0 {
            return Err(Error::EmptyItemSet);
        }
        let item_height = if item_height.is_finite() && item_height > 0.0 {
            item_height
        } else {
            crate::config::default_item_height()
        };
        Ok(Self {
            count,
            item_height,
            spring: Spring::new(spring, 0.0),
            logical_index: 0,
            drag: None,
        })
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn item_height(&self) -> f64 {
        self.item_height
    }

    /// Repeat distance of the wheel
    #[inline]
    pub fn period(&self) -> f64 {
        self.count as f64 * self.item_height
    }

    /// Continuous scroll position driving rendering
    #[inline]
    pub fn position(&self) -> f64 {
        self.spring.value()
    }

    #[inline]
    pub fn logical_index(&self) -> i64 {
        self.logical_index
    }

    #[inline]
    pub fn active_index(&self) -> usize {
        self.reduce(self.logical_index)
    }

    pub fn selection(&self) -> Selection {
        Selection {
            active_index: self.active_index(),
            logical_index: self.logical_index,
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.spring.is_animating()
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Item set index for any logical index
    pub fn reduce(&self, logical: i64) -> usize {
        logical.rem_euclid(self.count as i64) as usize
    }

    /// Logical index the current position is closest to
    pub fn nearest_index(&self) -> i64 {
        let idx = (-self.position() / self.item_height).round();
        // round() can produce -0.0
        idx as i64
    }

    /// Select logical index `n`; the position springs there afterwards.
    pub fn jump_to(&mut self, n: i64) -> Selection {
        self.drag = None;
        self.logical_index = n;
        self.spring.animate_to(-(n as f64) * self.item_height);
        self.selection()
    }

    pub fn advance(&mut self) -> Selection {
        let current = self.nearest_index();
        self.jump_to(current + 1)
    }

    pub fn retreat(&mut self) -> Selection {
        let current = self.nearest_index();
        self.jump_to(current - 1)
    }

    /// Begin a direct-manipulation drag at pointer coordinate `pointer`
    pub fn begin_drag(&mut self, pointer: f64) {
        self.spring.stop();
        self.drag = Some(DragAnchor {
            pointer,
            position: self.position(),
        });
    }

    /// Follow the pointer 1:1. Ignored when no drag is in progress.
    pub fn drag_to(&mut self, pointer: f64) {
        let Some(anchor) = self.drag else {
            return;
        };
        self.spring.set(anchor.position + (pointer - anchor.pointer));
        self.renormalize();
    }

    /// Release the drag and snap to the nearest item
    pub fn end_drag(&mut self) -> Option<Selection> {
        self.drag.take()?;
        let nearest = self.nearest_index();
        Some(self.jump_to(nearest))
    }

    /// Advance the spring by `dt`. Returns true while still moving.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let moving = self.spring.tick(dt);
        self.renormalize();
        moving
    }

    /// Pull the position back into `[-count, 2 * count)` items by whole periods.
    ///
    /// Returns the total shift applied to the position.
    pub fn renormalize(&mut self) -> f64 {
        let count = self.count as i64;
        let period = self.period();
        let mut total = 0.0;

        loop {
            let idx = self.nearest_index();
            let (shift, steps) = if idx >= count * 2 {
                (period, -count)
            } else if idx < -count {
                (-period, count)
            } else {
                break;
            };
            self.spring.shift(shift);
            self.logical_index += steps;
            if let Some(anchor) = self.drag.as_mut() {
                anchor.position += shift;
            }
            total += shift;
        }

        if total != 0.0 {
            trace!(shift = total, logical = self.logical_index, "wheel renormalized");
        }
        total
    }

    /// Stop any motion in place
    pub fn halt(&mut self) {
        self.drag = None;
        self.spring.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: f64 = 3.0;
    const FRAME: Duration = Duration::from_millis(16);

    fn wheel(count: usize) -> WheelSelector {
        WheelSelector::new(count, H, SpringConfig::default()).unwrap()
    }

    fn settle(w: &mut WheelSelector) {
        for _ in 0..2000 {
            if !w.tick(FRAME) {
                break;
            }
        }
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            WheelSelector::new(0, H, SpringConfig::default()),
            Err(Error::EmptyItemSet)
        ));
    }

    #[test]
    fn test_advance_four_times_wraps() {
        let mut w = wheel(4);
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(w.advance().active_index);
            settle(&mut w);
        }
        assert_eq!(seen, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_jump_updates_index_before_settle() {
        let mut w = wheel(4);
        let sel = w.jump_to(2 * 4 + 1);
        assert_eq!(sel.active_index, 1);
        assert_eq!(w.active_index(), 1);
        assert!(w.is_animating());
        assert_eq!(w.position(), 0.0);
    }

    #[test]
    fn test_retreat_from_origin() {
        let mut w = wheel(4);
        assert_eq!(w.retreat().active_index, 3);
        settle(&mut w);
        assert_eq!(w.nearest_index(), -1);
    }

    #[test]
    fn test_single_item_noop() {
        let mut w = wheel(1);
        for _ in 0..5 {
            assert_eq!(w.advance().active_index, 0);
            settle(&mut w);
            assert_eq!(w.retreat().active_index, 0);
            settle(&mut w);
        }
    }

    #[test]
    fn test_forward_renormalization_is_transparent() {
        let mut w = wheel(4);
        for _ in 0..20 {
            let before = w.advance();
            settle(&mut w);
            assert_eq!(w.active_index(), before.active_index);
            assert_eq!(w.reduce(w.nearest_index()), before.active_index);
            assert!(w.nearest_index() >= -4 && w.nearest_index() < 8);
        }
    }

    #[test]
    fn test_backward_renormalization_is_transparent() {
        let mut w = wheel(4);
        for _ in 0..20 {
            let before = w.retreat();
            settle(&mut w);
            assert_eq!(w.active_index(), before.active_index);
            assert_eq!(w.reduce(w.nearest_index()), before.active_index);
            assert!(w.nearest_index() >= -4);
        }
    }

    #[test]
    fn test_renormalize_thresholds_exact() {
        let mut w = wheel(4);
        // index 7 stays, index 8 shifts
        w.jump_to(7);
        settle(&mut w);
        assert_eq!(w.nearest_index(), 7);
        w.jump_to(8);
        settle(&mut w);
        assert_eq!(w.nearest_index(), 4);
        assert_eq!(w.logical_index(), 4);
        assert_eq!(w.active_index(), 0);

        // index -4 stays, index -5 shifts
        w.jump_to(-4);
        settle(&mut w);
        assert_eq!(w.nearest_index(), -4);
        w.jump_to(-5);
        settle(&mut w);
        assert_eq!(w.nearest_index(), -1);
        assert_eq!(w.active_index(), 3);
    }

    #[test]
    fn test_shift_is_exact_period() {
        let mut w = wheel(4);
        w.jump_to(8);
        settle(&mut w);
        assert_eq!(w.position(), -4.0 * H);
    }

    #[test]
    fn test_drag_follows_pointer_and_snaps() {
        let mut w = wheel(4);
        w.begin_drag(10.0);
        w.drag_to(10.0 - 2.2 * H);
        assert!(!w.is_animating());
        assert!((w.position() + 2.2 * H).abs() < 1e-9);

        let sel = w.end_drag().unwrap();
        assert_eq!(sel.logical_index, 2);
        assert_eq!(sel.active_index, 2);
        settle(&mut w);
        assert_eq!(w.position(), -2.0 * H);
    }

    #[test]
    fn test_drag_across_renormalization_stays_continuous() {
        let mut w = wheel(4);
        w.begin_drag(0.0);
        // drag far enough to cross index 8
        w.drag_to(-8.2 * H);
        assert_eq!(w.nearest_index(), 4);
        // moving back by one item from here continues smoothly
        w.drag_to(-7.2 * H);
        assert_eq!(w.nearest_index(), 3);
        let sel = w.end_drag().unwrap();
        assert_eq!(sel.active_index, 3);
    }

    #[test]
    fn test_end_drag_without_drag() {
        let mut w = wheel(4);
        assert!(w.end_drag().is_none());
    }

    #[test]
    fn test_active_index_always_valid() {
        let mut w = wheel(3);
        let ops: [i64; 12] = [1, -1, 7, -9, 2, 2, 100, -100, 0, 5, -5, 3];
        for (i, op) in ops.iter().enumerate() {
            let sel = match i % 3 {
                0 => w.advance(),
                1 => w.retreat(),
                _ => w.jump_to(*op),
            };
            assert!(sel.active_index < 3);
            for _ in 0..3 {
                w.tick(FRAME);
                assert!(w.active_index() < 3);
            }
        }
    }
}
