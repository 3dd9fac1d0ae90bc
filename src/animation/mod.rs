//! Animation engine for scroll-driven and gesture-driven motion
//!
//! Tweens interpolate node poses over time or scroll progress, with
//! GSAP-style easing names and scroll trigger markers.

mod easing;
mod marker;
mod motion;
mod props;
mod trigger;
mod tween;

pub use easing::{Ease, EaseMode, DEFAULT_BACK_OVERSHOOT};
pub use marker::{Edge, Marker};
pub use motion::Motion;
pub use props::{Pose, Property, Props};
pub use trigger::{ProgressCallback, ScrollTriggerSpec, TriggerId};
pub use tween::{TweenId, TweenSpec};
