//! Smooth scrolling
//!
//! A damped follower of the page scroll offset. Wheel input moves a target,
//! every frame the animated offset eases towards it and the result is
//! published as a `ScrollEvent`.

mod smooth;

pub use smooth::{ScrollDirection, ScrollEvent, ScrollListener, SmoothScroll};

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SmoothScrollConfig {
    /// Fraction of the remaining distance covered per 60 Hz frame; 0 switches
    /// to fixed-duration easing
    pub lerp: f32,
    /// Seconds, used when `lerp` is 0
    pub duration: f32,
    pub smooth_wheel: bool,
    pub wheel_multiplier: f32,
    pub smooth_touch: bool,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            lerp: 0.08,
            duration: 1.1,
            smooth_wheel: true,
            wheel_multiplier: 1.05,
            smooth_touch: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SmoothScrollConfig::default();
        assert_eq!(config.lerp, 0.08);
        assert_eq!(config.duration, 1.1);
        assert!(config.smooth_wheel);
        assert!(!config.smooth_touch);
    }

    #[test]
    fn test_yaml_overrides() {
        let config: SmoothScrollConfig = serde_yaml::from_str("smooth_touch: true\nlerp: 0").unwrap();
        assert!(config.smooth_touch);
        assert_eq!(config.lerp, 0.0);
        assert_eq!(config.wheel_multiplier, 1.05);
    }
}
