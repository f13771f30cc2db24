use std::time::{Duration, Instant};

use tracing::debug;

use super::autoplay::{AutoAdvance, AutoplayState};
use super::input::{InputEvent, InputFusion, Intent};
use super::selector::{Selection, WheelSelector};
use super::visual::{rendered_instances, RenderedItem};
use crate::config::{AutoplayConfig, WheelConfig};
use crate::error::Result;

/// The wheel as a whole: selection state driven by user input and auto-advance
#[derive(Debug, Clone)]
pub struct WheelController {
    selector: WheelSelector,
    fusion: InputFusion,
    autoplay: AutoAdvance,
    copies: u16,
}

impl WheelController {
    pub fn new(
        count: usize,
        wheel: &WheelConfig,
        autoplay: &AutoplayConfig,
        reduced_motion: bool,
        now: Instant,
    ) -> Result<Self> {
        Ok(Self {
            selector: WheelSelector::new(count, wheel.item_height(), wheel.spring)?,
            fusion: InputFusion::new(wheel.wheel_threshold, wheel.wheel_cooldown()),
            autoplay: AutoAdvance::new(autoplay, reduced_motion, now),
            copies: wheel.copies(),
        })
    }

    pub fn selector(&self) -> &WheelSelector {
        &self.selector
    }

    pub fn selection(&self) -> Selection {
        self.selector.selection()
    }

    #[inline]
    pub fn active_index(&self) -> usize {
        self.selector.active_index()
    }

    #[inline]
    pub fn position(&self) -> f64 {
        self.selector.position()
    }

    pub fn is_animating(&self) -> bool {
        self.selector.is_animating() || self.selector.is_dragging()
    }

    /// A touch drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.fusion.is_dragging() || self.selector.is_dragging()
    }

    pub fn autoplay_state(&self) -> AutoplayState {
        self.autoplay.state()
    }

    /// Instances to draw this frame
    pub fn instances(&self) -> Vec<RenderedItem> {
        rendered_instances(
            self.selector.count(),
            self.copies,
            self.selector.position(),
            self.selector.item_height(),
        )
    }

    /// Feed one input event. Returns the new selection when one was made.
    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> Option<Selection> {
        let fused = self.fusion.fuse(event, now);
        if fused.user_initiated {
            self.autoplay.interact(now);
        }

        match fused.intent? {
            Intent::Advance => Some(self.selector.advance()),
            Intent::Retreat => Some(self.selector.retreat()),
            Intent::JumpTo(n) => Some(self.selector.jump_to(n)),
            Intent::DragStart(y) => {
                self.selector.begin_drag(y);
                None
            }
            Intent::DragTo(y) => {
                self.selector.drag_to(y);
                None
            }
            Intent::DragEnd => self.selector.end_drag(),
        }
    }

    /// Per-frame step: fire auto-advance if due, then move the spring.
    pub fn tick(&mut self, now: Instant, dt: Duration, visible: bool) -> Option<Selection> {
        let fired = if self.autoplay.poll(now, visible) && !self.selector.is_dragging() {
            let selection = self.selector.advance();
            debug!(active = selection.active_index, "auto-advance");
            Some(selection)
        } else {
            None
        };
        self.selector.tick(dt);
        fired
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.autoplay.set_reduced_motion(reduced);
    }

    /// Hold auto-advance, e.g. while the pointer rests on the project panel
    pub fn set_autoplay_held(&mut self, held: bool, now: Instant) {
        self.autoplay.set_held(held, now);
    }

    /// Cancel timers, cool-down and drag. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.autoplay.teardown();
        self.fusion.reset();
        self.selector.halt();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectSet;
    use crate::wheel::input::NavKey;

    const FRAME: Duration = Duration::from_millis(16);

    fn controller(now: Instant) -> WheelController {
        let set = ProjectSet::builtin();
        WheelController::new(
            set.len(),
            &WheelConfig::default(),
            &AutoplayConfig::default(),
            false,
            now,
        )
        .unwrap()
    }

    fn settle(c: &mut WheelController, now: &mut Instant) {
        for _ in 0..200 {
            *now += FRAME;
            c.tick(*now, FRAME, true);
        }
    }

    #[test]
    fn test_keyboard_advance_sequence() {
        let mut now = Instant::now();
        let mut c = controller(now);
        let mut seen = Vec::new();
        for _ in 0..4 {
            let sel = c.handle_input(InputEvent::Key(NavKey::Down), now).unwrap();
            seen.push(sel.active_index);
            settle(&mut c, &mut now);
        }
        assert_eq!(seen, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_wheel_burst_is_one_step() {
        let t0 = Instant::now();
        let mut c = controller(t0);
        let mut selections = 0;
        for i in 0..20u64 {
            let now = t0 + Duration::from_millis(i * 10);
            if c.handle_input(InputEvent::Wheel { delta: 100.0 }, now).is_some() {
                selections += 1;
            }
        }
        assert_eq!(selections, 1);
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn test_click_far_copy_is_immediate() {
        let now = Instant::now();
        let mut c = controller(now);
        let sel = c
            .handle_input(InputEvent::Click { logical_index: 2 * 4 + 1 }, now)
            .unwrap();
        assert_eq!(sel.active_index, 1);
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn test_auto_advance_fires_and_interaction_pauses() {
        let t0 = Instant::now();
        let mut c = controller(t0);
        let mut now = t0;
        let mut fired = Vec::new();
        while now < t0 + Duration::from_millis(3600) {
            now += FRAME;
            if let Some(sel) = c.tick(now, FRAME, true) {
                fired.push(sel.active_index);
            }
        }
        assert_eq!(fired, vec![1]);

        c.handle_input(InputEvent::Key(NavKey::Up), now);
        let paused_at = now;
        assert_eq!(c.autoplay_state(), AutoplayState::Resting);
        while now < paused_at + Duration::from_millis(5000) {
            now += FRAME;
            assert!(c.tick(now, FRAME, true).is_none());
        }
    }

    #[test]
    fn test_drag_then_release_snaps() {
        let now = Instant::now();
        let mut c = controller(now);
        assert!(c.handle_input(InputEvent::TouchStart { y: 30.0 }, now).is_none());
        assert_eq!(c.autoplay_state(), AutoplayState::Resting);
        c.handle_input(InputEvent::TouchMove { y: 30.0 - 3.2 }, now);
        assert!(c.is_dragging());
        let sel = c.handle_input(InputEvent::TouchEnd, now).unwrap();
        assert_eq!(sel.active_index, 1);
        assert!(!c.is_dragging());
    }

    #[test]
    fn test_reduced_motion_never_auto_advances() {
        let t0 = Instant::now();
        let mut c = WheelController::new(
            4,
            &WheelConfig::default(),
            &AutoplayConfig::default(),
            true,
            t0,
        )
        .unwrap();
        let mut now = t0;
        for _ in 0..1000 {
            now += FRAME;
            assert!(c.tick(now, FRAME, true).is_none());
        }
    }

    #[test]
    fn test_teardown_twice() {
        let now = Instant::now();
        let mut c = controller(now);
        c.handle_input(InputEvent::TouchStart { y: 0.0 }, now);
        c.teardown();
        c.teardown();
        assert!(!c.is_animating());
        assert_eq!(c.autoplay_state(), AutoplayState::Off);
    }
}
