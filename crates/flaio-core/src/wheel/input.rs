//! Input fusion: raw wheel, touch, keyboard and click events become wheel intents.

use std::time::{Duration, Instant};

/// Raw input, already translated out of the terminal's event types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Signed scroll delta (positive = down)
    Wheel { delta: f64 },
    /// Drag started at vertical pointer coordinate `y`
    TouchStart { y: f64 },
    TouchMove { y: f64 },
    TouchEnd,
    Key(NavKey),
    /// A rendered item instance was clicked
    Click { logical_index: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
}

/// What the wheel should do in response to input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Advance,
    Retreat,
    JumpTo(i64),
    DragStart(f64),
    DragTo(f64),
    DragEnd,
}

/// Result of fusing one raw event
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Fused {
    pub intent: Option<Intent>,
    /// The event counts as user interaction for idle-resume purposes
    pub user_initiated: bool,
}

impl Fused {
    fn user(intent: Intent) -> Self {
        Self {
            intent: Some(intent),
            user_initiated: true,
        }
    }

    fn passive(intent: Option<Intent>) -> Self {
        Self {
            intent,
            user_initiated: false,
        }
    }
}

/// Coalesces bursts of wheel deltas into single steps.
///
/// Once the accumulated delta passes the threshold a step fires and the
/// accumulator resets. During the following cool-down, deltas keep
/// accumulating but cannot fire.
#[derive(Debug, Clone)]
pub struct WheelGesture {
    threshold: f64,
    cooldown: Duration,
    accumulated: f64,
    busy_until: Option<Instant>,
}

impl WheelGesture {
    pub fn new(threshold: f64, cooldown: Duration) -> Self {
        Self {
            threshold: threshold.abs(),
            cooldown,
            accumulated: 0.0,
            busy_until: None,
        }
    }

    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }

    pub fn is_cooling_down(&self, now: Instant) -> bool {
        self.busy_until.is_some_and(|until| now < until)
    }

    /// Feed one delta. Returns the step to take, if any.
    pub fn push(&mut self, delta: f64, now: Instant) -> Option<Intent> {
        self.accumulated += delta;

        if self.is_cooling_down(now) {
            return None;
        }
        self.busy_until = None;

        let intent = if self.accumulated > self.threshold {
            Intent::Advance
        } else if self.accumulated < -self.threshold {
            Intent::Retreat
        } else {
            return None;
        };

        self.accumulated = 0.0;
        self.busy_until = Some(now + self.cooldown);
        Some(intent)
    }

    /// Forget pending deltas and any cool-down
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
        self.busy_until = None;
    }
}

/// Turns every input channel into intents
#[derive(Debug, Clone)]
pub struct InputFusion {
    gesture: WheelGesture,
    dragging: bool,
}

impl InputFusion {
    pub fn new(threshold: f64, cooldown: Duration) -> Self {
        Self {
            gesture: WheelGesture::new(threshold, cooldown),
            dragging: false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn fuse(&mut self, event: InputEvent, now: Instant) -> Fused {
        match event {
            InputEvent::Wheel { delta } => match self.gesture.push(delta, now) {
                Some(intent) => Fused::user(intent),
                None => Fused::passive(None),
            },
            InputEvent::TouchStart { y } => {
                self.dragging = true;
                Fused::user(Intent::DragStart(y))
            }
            InputEvent::TouchMove { y } => {
                if self.dragging {
                    Fused::passive(Some(Intent::DragTo(y)))
                } else {
                    Fused::passive(None)
                }
            }
            InputEvent::TouchEnd => {
                if std::mem::take(&mut self.dragging) {
                    Fused::passive(Some(Intent::DragEnd))
                } else {
                    Fused::passive(None)
                }
            }
            InputEvent::Key(NavKey::Down) => Fused::user(Intent::Advance),
            InputEvent::Key(NavKey::Up) => Fused::user(Intent::Retreat),
            InputEvent::Click { logical_index } => Fused::user(Intent::JumpTo(logical_index)),
        }
    }

    pub fn reset(&mut self) {
        self.gesture.reset();
        self.dragging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gesture() -> WheelGesture {
        WheelGesture::new(50.0, Duration::from_millis(200))
    }

    #[test]
    fn test_small_deltas_accumulate() {
        let t0 = Instant::now();
        let mut g = gesture();
        assert_eq!(g.push(20.0, t0), None);
        assert_eq!(g.push(20.0, t0), None);
        assert_eq!(g.push(20.0, t0), Some(Intent::Advance));
        assert_eq!(g.accumulated(), 0.0);
    }

    #[test]
    fn test_exact_threshold_does_not_fire() {
        let t0 = Instant::now();
        let mut g = gesture();
        assert_eq!(g.push(50.0, t0), None);
        assert_eq!(g.push(-150.0, t0), Some(Intent::Retreat));
    }

    #[test]
    fn test_burst_in_one_window_fires_once() {
        let t0 = Instant::now();
        let mut g = gesture();
        let mut fired = 0;
        for i in 0..40u64 {
            let now = t0 + Duration::from_millis(i * 5); // 0..195ms
            if g.push(120.0, now).is_some() {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_fires_again_after_cooldown() {
        let t0 = Instant::now();
        let mut g = gesture();
        assert!(g.push(100.0, t0).is_some());
        assert!(g.push(100.0, t0 + Duration::from_millis(199)).is_none());
        assert!(g.is_cooling_down(t0 + Duration::from_millis(199)));
        assert_eq!(
            g.push(1.0, t0 + Duration::from_millis(200)),
            Some(Intent::Advance)
        );
    }

    #[test]
    fn test_opposite_deltas_cancel() {
        let t0 = Instant::now();
        let mut g = gesture();
        assert!(g.push(40.0, t0).is_none());
        assert!(g.push(-40.0, t0).is_none());
        assert_eq!(g.accumulated(), 0.0);
    }

    #[test]
    fn test_keys_and_clicks_are_user_initiated() {
        let now = Instant::now();
        let mut fusion = InputFusion::new(50.0, Duration::from_millis(200));
        let down = fusion.fuse(InputEvent::Key(NavKey::Down), now);
        assert_eq!(down.intent, Some(Intent::Advance));
        assert!(down.user_initiated);

        let up = fusion.fuse(InputEvent::Key(NavKey::Up), now);
        assert_eq!(up.intent, Some(Intent::Retreat));

        let click = fusion.fuse(InputEvent::Click { logical_index: 9 }, now);
        assert_eq!(click.intent, Some(Intent::JumpTo(9)));
        assert!(click.user_initiated);
    }

    #[test]
    fn test_wheel_without_step_is_not_interaction() {
        let now = Instant::now();
        let mut fusion = InputFusion::new(50.0, Duration::from_millis(200));
        let fused = fusion.fuse(InputEvent::Wheel { delta: 10.0 }, now);
        assert_eq!(fused, Fused::default());
    }

    #[test]
    fn test_touch_sequence() {
        let now = Instant::now();
        let mut fusion = InputFusion::new(50.0, Duration::from_millis(200));

        // moves without a start are ignored
        assert_eq!(fusion.fuse(InputEvent::TouchMove { y: 3.0 }, now).intent, None);

        let start = fusion.fuse(InputEvent::TouchStart { y: 5.0 }, now);
        assert_eq!(start.intent, Some(Intent::DragStart(5.0)));
        assert!(start.user_initiated);
        assert_eq!(
            fusion.fuse(InputEvent::TouchMove { y: 7.0 }, now).intent,
            Some(Intent::DragTo(7.0))
        );
        assert_eq!(
            fusion.fuse(InputEvent::TouchEnd, now).intent,
            Some(Intent::DragEnd)
        );
        assert_eq!(fusion.fuse(InputEvent::TouchEnd, now).intent, None);
    }
}
