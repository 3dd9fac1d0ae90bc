//! Single-node property tweens
//!
//! A tween interpolates the properties named in its target from their
//! values at the moment it starts. Progress comes either from elapsed time
//! or from a scroll trigger that owns it.

use super::easing::{Ease, EaseMode};
use super::props::{Pose, Props};

/// Slack on accumulated frame time, so a tween run for exactly its
/// duration in many small steps still ends on that frame
const TIME_EPSILON: f32 = 1e-4;

/// Identifies a tween for completion tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub(crate) u64);

/// Timing of a tween
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSpec {
    /// Seconds
    pub duration: f32,
    /// Seconds before the tween starts, counted from when it is released
    pub delay: f32,
    pub ease: Ease,
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self {
            duration: 0.5,
            delay: 0.0,
            ease: Ease::power(1, EaseMode::Out),
        }
    }
}

impl TweenSpec {
    pub fn new(duration: f32, ease: Ease) -> Self {
        Self {
            duration,
            delay: 0.0,
            ease,
        }
    }

    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }
}

/// What moves the tween forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Drive {
    /// Elapsed time
    Time,
    /// Parked until its scroll trigger enters
    Waiting,
    /// Progress follows a scrubbed scroll trigger
    Scrub,
}

#[derive(Debug, Clone)]
pub(crate) struct Tween<N> {
    pub id: TweenId,
    pub node: N,
    /// Start values, resolved when the tween first renders
    pub from: Option<Props>,
    pub to: Props,
    pub spec: TweenSpec,
    pub drive: Drive,
    pub elapsed: f32,
    pub started: bool,
}

impl<N> Tween<N> {
    pub fn new(id: TweenId, node: N, from: Option<Props>, to: Props, spec: TweenSpec, drive: Drive) -> Self {
        Self {
            id,
            node,
            from,
            to,
            spec,
            drive,
            elapsed: 0.0,
            started: false,
        }
    }

    /// Fill in any start value not given explicitly from the current pose
    pub fn resolve_start(&mut self, pose: &Pose) {
        let mut from = self.from.unwrap_or_default();
        for (property, _) in self.to.iter() {
            if !from.contains(property) {
                from.set(property, pose.get(property));
            }
        }
        self.from = Some(from);
    }

    /// Advance elapsed time, returning linear progress once past the delay
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        self.elapsed += dt;
        if self.elapsed < self.spec.delay - TIME_EPSILON {
            return None;
        }
        let running = self.elapsed - self.spec.delay;
        if running >= self.spec.duration - TIME_EPSILON {
            return Some(1.0);
        }
        Some((running / self.spec.duration).max(0.0))
    }

    /// Write interpolated values for linear progress `t` into `pose`
    pub fn render(&self, t: f32, pose: &mut Pose) {
        let eased = self.spec.ease.apply(t);
        let from = self.from.unwrap_or_default();
        for (property, end) in self.to.iter() {
            let start = from.get(property).unwrap_or_else(|| pose.get(property));
            let value = if eased == 1.0 {
                end
            } else {
                start + (end - start) * eased
            };
            pose.set(property, value);
        }
    }

    /// Stop animating every property `props` also writes
    pub fn drop_overlap(&mut self, props: &Props) {
        for (property, _) in props.iter() {
            self.to.clear(property);
        }
    }
}
