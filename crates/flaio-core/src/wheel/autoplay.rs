//! Auto-advance timer with idle resume.
//!
//! Nothing here sleeps. The owner calls [`AutoAdvance::poll`] once per frame
//! and every deadline is compared against the `now` it passes in.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::AutoplayConfig;

/// What auto-advance is currently doing, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayState {
    Playing,
    /// Waiting for the idle delay after an interaction
    Resting,
    /// Held while the pointer is over the project panel
    Held,
    /// Disabled for the rest of the session
    Off,
}

#[derive(Debug, Clone)]
pub struct AutoAdvance {
    /// Turned on in config; when false nothing ever resumes
    enabled: bool,
    interval: Duration,
    idle_delay: Duration,
    playing: bool,
    reduced_motion: bool,
    held: bool,
    next_fire: Option<Instant>,
    resume_at: Option<Instant>,
}

impl AutoAdvance {
    pub fn new(config: &AutoplayConfig, reduced_motion: bool, now: Instant) -> Self {
        let playing = config.enabled && !reduced_motion;
        let interval = config.interval();
        Self {
            enabled: config.enabled,
            interval,
            idle_delay: config.idle_delay(),
            playing,
            reduced_motion,
            held: false,
            next_fire: playing.then(|| now + interval),
            resume_at: None,
        }
    }

    pub fn state(&self) -> AutoplayState {
        if !self.enabled || self.reduced_motion || (!self.playing && self.resume_at.is_none()) {
            AutoplayState::Off
        } else if self.resume_at.is_some() {
            AutoplayState::Resting
        } else if self.held {
            AutoplayState::Held
        } else {
            AutoplayState::Playing
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// When auto-advance will be re-enabled, if an idle resume is pending
    pub fn resume_at(&self) -> Option<Instant> {
        self.resume_at
    }

    /// Next scheduled firing, if playing
    pub fn next_fire(&self) -> Option<Instant> {
        self.next_fire
    }

    /// Record a user interaction: pause now, resume after the idle delay.
    ///
    /// Repeated calls move the resume deadline instead of stacking timers.
    pub fn interact(&mut self, now: Instant) {
        self.playing = false;
        self.next_fire = None;
        if !self.enabled || self.reduced_motion {
            return;
        }
        self.resume_at = Some(now + self.idle_delay);
    }

    /// Apply a reduced-motion preference. Once on, auto-advance stays off.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        if !reduced || self.reduced_motion {
            return;
        }
        debug!("reduced motion on, auto-advance disabled for the session");
        self.reduced_motion = true;
        self.playing = false;
        self.next_fire = None;
        self.resume_at = None;
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Hold auto-advance while something (the pointer over the panel) wants it still
    pub fn set_held(&mut self, held: bool, now: Instant) {
        if held == self.held {
            return;
        }
        self.held = held;
        if !held && self.playing {
            self.next_fire = Some(now + self.interval);
        }
    }

    /// Check deadlines. Returns true when an automatic advance is due.
    ///
    /// `visible` false (terminal unfocused) lets the period elapse without firing.
    pub fn poll(&mut self, now: Instant, visible: bool) -> bool {
        if let Some(resume) = self.resume_at {
            if now >= resume {
                self.resume_at = None;
                if self.enabled && !self.reduced_motion {
                    self.playing = true;
                    self.next_fire = Some(resume + self.interval);
                }
            }
        }

        if !self.playing {
            return false;
        }
        let Some(due) = self.next_fire else {
            return false;
        };
        if now < due {
            return false;
        }

        let mut next = due + self.interval;
        while next <= now {
            next += self.interval;
        }
        self.next_fire = Some(next);

        visible && !self.held
    }

    /// Cancel every pending deadline. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.playing = false;
        self.next_fire = None;
        self.resume_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn timer(now: Instant) -> AutoAdvance {
        AutoAdvance::new(&AutoplayConfig::default(), false, now)
    }

    /// Poll every 10ms in `[from, to)` and collect firing offsets from `t0`
    fn run(a: &mut AutoAdvance, t0: Instant, from: u64, to: u64, visible: bool) -> Vec<u64> {
        let mut fired = Vec::new();
        let mut t = from;
        while t < to {
            if a.poll(t0 + ms(t), visible) {
                fired.push(t);
            }
            t += 10;
        }
        fired
    }

    #[test]
    fn test_fires_every_interval() {
        let t0 = Instant::now();
        let mut a = timer(t0);
        assert_eq!(run(&mut a, t0, 0, 11_000, true), vec![3500, 7000, 10_500]);
    }

    #[test]
    fn test_hidden_does_not_fire() {
        let t0 = Instant::now();
        let mut a = timer(t0);
        assert!(run(&mut a, t0, 0, 8000, false).is_empty());
        // period kept running while hidden
        assert_eq!(run(&mut a, t0, 8000, 11_000, true), vec![10_500]);
    }

    #[test]
    fn test_interaction_suppresses_until_idle_delay() {
        let t0 = Instant::now();
        let mut a = timer(t0);
        a.interact(t0 + ms(1000));
        assert_eq!(a.state(), AutoplayState::Resting);
        let fired = run(&mut a, t0, 1000, 20_000, true);
        assert!(fired.iter().all(|t| *t >= 6000));
        // resume at 6000, first fire one period later
        assert_eq!(fired[0], 9500);
    }

    #[test]
    fn test_second_interaction_resets_deadline() {
        let t0 = Instant::now();
        let mut a = timer(t0);
        a.interact(t0 + ms(1000));
        assert!(run(&mut a, t0, 1000, 4000, true).is_empty());
        a.interact(t0 + ms(4000));
        assert_eq!(a.resume_at(), Some(t0 + ms(9000)));
        let fired = run(&mut a, t0, 4000, 14_000, true);
        assert!(fired.iter().all(|t| *t >= 9000));
        assert_eq!(fired[0], 12_500);
    }

    #[test]
    fn test_reduced_motion_at_start_never_fires() {
        let t0 = Instant::now();
        let mut a = AutoAdvance::new(&AutoplayConfig::default(), true, t0);
        assert_eq!(a.state(), AutoplayState::Off);
        a.interact(t0 + ms(100));
        assert!(run(&mut a, t0, 0, 30_000, true).is_empty());
    }

    #[test]
    fn test_reduced_motion_live_is_permanent() {
        let t0 = Instant::now();
        let mut a = timer(t0);
        a.interact(t0 + ms(100));
        a.set_reduced_motion(true);
        a.set_reduced_motion(false);
        assert_eq!(a.state(), AutoplayState::Off);
        assert!(run(&mut a, t0, 0, 30_000, true).is_empty());
    }

    #[test]
    fn test_held_restarts_period_on_release() {
        let t0 = Instant::now();
        let mut a = timer(t0);
        a.set_held(true, t0 + ms(1000));
        assert_eq!(a.state(), AutoplayState::Held);
        assert!(run(&mut a, t0, 0, 5000, true).is_empty());
        a.set_held(false, t0 + ms(5000));
        assert_eq!(run(&mut a, t0, 5000, 9000, true), vec![8500]);
    }

    #[test]
    fn test_disabled_in_config() {
        let t0 = Instant::now();
        let config = AutoplayConfig {
            enabled: false,
            ..Default::default()
        };
        let mut a = AutoAdvance::new(&config, false, t0);
        assert!(run(&mut a, t0, 0, 10_000, true).is_empty());
    }

    #[test]
    fn test_disabled_in_config_stays_off_after_interaction() {
        let t0 = Instant::now();
        let config = AutoplayConfig {
            enabled: false,
            ..Default::default()
        };
        let mut a = AutoAdvance::new(&config, false, t0);
        a.interact(t0);
        assert!(a.resume_at().is_none());
        assert_eq!(a.state(), AutoplayState::Off);
        a.set_held(true, t0 + ms(100));
        a.set_held(false, t0 + ms(200));
        assert!(run(&mut a, t0, 0, 20_000, true).is_empty());
        assert_eq!(a.state(), AutoplayState::Off);
        assert!(!a.is_playing());
    }

    #[test]
    fn test_teardown_idempotent() {
        let t0 = Instant::now();
        let mut a = timer(t0);
        a.interact(t0);
        a.teardown();
        a.teardown();
        assert!(a.resume_at().is_none());
        assert!(run(&mut a, t0, 0, 20_000, true).is_empty());
    }
}
