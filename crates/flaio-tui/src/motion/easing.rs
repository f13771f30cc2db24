//! Easing curves for the fixed-duration panel transition

pub use flaio_core::EasingType;

pub trait EasingTypeExt {
    /// Map transition progress to eased progress, both in `[0, 1]`
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let remaining = 1.0 - t;
        match self {
            // jump at the very end
            EasingType::None if t < 1.0 => 0.0,
            EasingType::None => 1.0,
            EasingType::Linear => t,
            EasingType::Cubic => 1.0 - remaining.powi(3),
            EasingType::Quintic => 1.0 - remaining.powi(5),
            EasingType::EaseOut if t >= 1.0 => 1.0,
            EasingType::EaseOut => 1.0 - (-10.0 * t).exp2(),
        }
    }
}
