//! Damped mass-spring integrator.
//!
//! Semi-implicit Euler with a fixed substep, so the motion only depends on
//! elapsed time and not on how frames happen to be sliced.

use std::time::Duration;

use crate::config::SpringConfig;

/// Integration substep in seconds
const SUBSTEP: f64 = 0.001;

/// Longest frame gap integrated at once; longer gaps (suspend, debugger) are clamped
const MAX_FRAME: f64 = 0.1;

/// A scalar value pulled toward a target by a damped spring
#[derive(Debug, Clone)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: Option<f64>,
}

impl Spring {
    pub fn new(config: SpringConfig, value: f64) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target: None,
        }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    pub fn target(&self) -> Option<f64> {
        self.target
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    /// Start (or retarget) an animation. Current velocity carries over.
    pub fn animate_to(&mut self, target: f64) {
        self.target = Some(target);
    }

    /// Set the value directly, cancelling any animation
    pub fn set(&mut self, value: f64) {
        self.value = value;
        self.velocity = 0.0;
        self.target = None;
    }

    /// Move value and target together by `delta`, keeping the motion intact
    pub fn shift(&mut self, delta: f64) {
        self.value += delta;
        if let Some(target) = self.target.as_mut() {
            *target += delta;
        }
    }

    /// Stop where it is
    pub fn stop(&mut self) {
        self.velocity = 0.0;
        self.target = None;
    }

    /// Advance by `dt`. Returns true while still animating.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(target) = self.target else {
            return false;
        };

        let mut remaining = dt.as_secs_f64().min(MAX_FRAME);
        let SpringConfig {
            stiffness,
            damping,
            mass,
            ..
        } = self.config;
        let mass = if mass > 0.0 { mass } else { 1.0 };

        while remaining > 0.0 {
            let h = remaining.min(SUBSTEP);
            let force = -stiffness * (self.value - target) - damping * self.velocity;
            self.velocity += force / mass * h;
            self.value += self.velocity * h;
            remaining -= h;
        }

        if (self.value - target).abs() < self.config.rest_delta
            && self.velocity.abs() < self.config.rest_speed
        {
            self.value = target;
            self.velocity = 0.0;
            self.target = None;
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn settle(spring: &mut Spring) -> Vec<f64> {
        let mut trace = Vec::new();
        for _ in 0..1000 {
            let running = spring.tick(FRAME);
            trace.push(spring.value());
            if !running {
                break;
            }
        }
        trace
    }

    #[test]
    fn test_settles_on_target() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.animate_to(-3.0);
        settle(&mut spring);
        assert!(!spring.is_animating());
        assert_eq!(spring.value(), -3.0);
    }

    #[test]
    fn test_not_linear() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.animate_to(10.0);
        let trace = settle(&mut spring);
        // fast start, slow finish
        let first = trace[0];
        let second = trace[1] - trace[0];
        let late = trace[10] - trace[9];
        assert!(second > late);
        assert!(first > 0.0);
    }

    #[test]
    fn test_underdamped_overshoots_then_settles() {
        let config = SpringConfig {
            stiffness: 350.0,
            damping: 10.0,
            mass: 0.7,
            ..Default::default()
        };
        assert!(config.damping_ratio() < 1.0);
        let mut spring = Spring::new(config, 0.0);
        spring.animate_to(10.0);
        let trace = settle(&mut spring);
        assert!(trace.iter().any(|v| *v > 10.0));
        assert_eq!(spring.value(), 10.0);
    }

    #[test]
    fn test_retarget_keeps_velocity() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.animate_to(10.0);
        spring.tick(FRAME);
        let v = spring.velocity();
        spring.animate_to(20.0);
        assert_eq!(spring.velocity(), v);
    }

    #[test]
    fn test_shift_moves_target_too() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.animate_to(5.0);
        spring.shift(-12.0);
        assert_eq!(spring.value(), -12.0);
        assert_eq!(spring.target(), Some(-7.0));
    }

    #[test]
    fn test_set_cancels() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.animate_to(5.0);
        spring.set(2.0);
        assert!(!spring.is_animating());
        assert!(!spring.tick(FRAME));
        assert_eq!(spring.value(), 2.0);
    }
}
