//! Scroll-position bindings
//!
//! A trigger watches the scroll offset against two markers on an element.
//! Scrubbed triggers hand their (damped) progress to the tweens they own;
//! toggled triggers release their tweens once scrolling reaches the start.

use std::fmt;

use super::marker::{Edge, Marker};
use super::tween::TweenId;
use crate::surface::Bounds;

/// Receives trigger progress in [0, 1]
pub type ProgressCallback = Box<dyn FnMut(f32)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerId(pub(crate) u64);

/// How a trigger binds to scroll position
pub struct ScrollTriggerSpec<N> {
    pub trigger: N,
    pub start: Marker,
    pub end: Marker,
    /// `Some(seconds)` binds progress to scroll, damped over that many seconds
    pub scrub: Option<f32>,
    /// Kill the trigger after the first entry
    pub once: bool,
    /// Class kept on the trigger element while it is inside the range
    pub toggle_class: Option<String>,
    pub on_update: Option<ProgressCallback>,
}

impl<N> ScrollTriggerSpec<N> {
    /// Defaults: `top bottom` to `bottom top`, not scrubbed
    pub fn new(trigger: N) -> Self {
        Self {
            trigger,
            start: Marker::new(Edge::TOP, Edge::BOTTOM),
            end: Marker::new(Edge::BOTTOM, Edge::TOP),
            scrub: None,
            once: false,
            toggle_class: None,
            on_update: None,
        }
    }

    pub fn start(mut self, marker: Marker) -> Self {
        self.start = marker;
        self
    }

    pub fn end(mut self, marker: Marker) -> Self {
        self.end = marker;
        self
    }

    pub fn scrub(mut self, seconds: f32) -> Self {
        self.scrub = Some(seconds.max(0.0));
        self
    }

    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    pub fn toggle_class(mut self, class: &str) -> Self {
        self.toggle_class = Some(class.to_string());
        self
    }

    pub fn on_update(mut self, callback: impl FnMut(f32) + 'static) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }
}

impl<N: fmt::Debug> fmt::Debug for ScrollTriggerSpec<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollTriggerSpec")
            .field("trigger", &self.trigger)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("scrub", &self.scrub)
            .field("once", &self.once)
            .field("toggle_class", &self.toggle_class)
            .field("on_update", &self.on_update.is_some())
            .finish()
    }
}

/// What changed when a trigger was evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TriggerChange {
    pub entered: bool,
    pub became_active: bool,
    pub became_inactive: bool,
}

pub(crate) struct ScrollTrigger<N> {
    pub id: TriggerId,
    pub spec: ScrollTriggerSpec<N>,
    pub tweens: Vec<TweenId>,
    pub start_px: f32,
    pub end_px: f32,
    /// Raw progress from the last scroll update
    pub progress: f32,
    /// Damped progress handed to scrubbed tweens
    pub smoothed: f32,
    /// Inside [start, end]
    pub active: bool,
    /// Scroll has reached the start at least once
    pub entered: bool,
    pub killed: bool,
}

impl<N> ScrollTrigger<N> {
    pub fn new(id: TriggerId, spec: ScrollTriggerSpec<N>, tweens: Vec<TweenId>) -> Self {
        Self {
            id,
            spec,
            tweens,
            start_px: 0.0,
            end_px: 0.0,
            progress: 0.0,
            smoothed: 0.0,
            active: false,
            entered: false,
            killed: false,
        }
    }

    /// Recompute marker positions from the trigger element's bounds
    pub fn refresh(&mut self, bounds: Bounds, viewport_height: f32) {
        self.start_px = self.spec.start.position(bounds, viewport_height);
        self.end_px = self.spec.end.position(bounds, viewport_height);
    }

    pub fn is_scrubbed(&self) -> bool {
        self.spec.scrub.is_some()
    }

    pub fn progress_at(&self, scroll: f32) -> f32 {
        let span = self.end_px - self.start_px;
        if span <= 0.0 {
            return if scroll >= self.start_px { 1.0 } else { 0.0 };
        }
        ((scroll - self.start_px) / span).clamp(0.0, 1.0)
    }

    /// Update state for a new scroll offset, firing the update callback
    pub fn evaluate(&mut self, scroll: f32) -> TriggerChange {
        let mut change = TriggerChange::default();

        let progress = self.progress_at(scroll);
        if progress != self.progress {
            self.progress = progress;
            if let Some(callback) = self.spec.on_update.as_mut() {
                callback(progress);
            }
        }

        if !self.entered && scroll >= self.start_px {
            self.entered = true;
            change.entered = true;
        }

        let active = scroll >= self.start_px && scroll <= self.end_px.max(self.start_px);
        if active && !self.active {
            change.became_active = true;
        } else if !active && self.active {
            change.became_inactive = true;
        }
        self.active = active;

        if self.is_scrubbed() && self.spec.scrub == Some(0.0) {
            self.smoothed = self.progress;
        }

        change
    }

    /// Move damped progress toward raw progress; true when it moved
    pub fn damp(&mut self, dt: f32) -> bool {
        let Some(lag) = self.spec.scrub else {
            return false;
        };
        let gap = self.progress - self.smoothed;
        if gap == 0.0 {
            return false;
        }
        if lag <= 0.0 || gap.abs() < 1e-4 {
            self.smoothed = self.progress;
        } else {
            // reaches ~98% of the gap after `lag` seconds
            self.smoothed += gap * (1.0 - (-4.0 * dt / lag).exp());
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn trigger(spec: ScrollTriggerSpec<()>) -> ScrollTrigger<()> {
        let mut t = ScrollTrigger::new(TriggerId(1), spec, Vec::new());
        // element at 1000..1500, viewport 800 high
        t.refresh(Bounds::new(1000.0, 500.0), 800.0);
        t
    }

    #[test]
    fn test_default_markers() {
        let t = trigger(ScrollTriggerSpec::new(()));
        // top bottom: 1000 - 800, bottom top: 1500
        assert!((t.start_px - 200.0).abs() < 1e-3);
        assert!((t.end_px - 1500.0).abs() < 1e-3);
    }

    #[test]
    fn test_progress_clamps() {
        let t = trigger(ScrollTriggerSpec::new(()));
        assert_eq!(t.progress_at(0.0), 0.0);
        assert_eq!(t.progress_at(5000.0), 1.0);
        assert!((t.progress_at(850.0) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_zero_span_is_a_step() {
        let spec = ScrollTriggerSpec::new(())
            .start("top top".parse().unwrap())
            .end("top top".parse().unwrap());
        let t = trigger(spec);
        assert_eq!(t.progress_at(999.0), 0.0);
        assert_eq!(t.progress_at(1000.0), 1.0);
    }

    #[test]
    fn test_enter_and_leave() {
        let mut t = trigger(ScrollTriggerSpec::new(()));
        let change = t.evaluate(100.0);
        assert!(!change.entered);
        let change = t.evaluate(300.0);
        assert!(change.entered && change.became_active);
        let change = t.evaluate(400.0);
        assert!(!change.entered && !change.became_active);
        let change = t.evaluate(2000.0);
        assert!(change.became_inactive);
        assert!(t.entered);
    }

    #[test]
    fn test_update_callback_fires_on_change_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut t = trigger(ScrollTriggerSpec::new(()).on_update(move |p| sink.borrow_mut().push(p)));
        t.evaluate(850.0);
        t.evaluate(850.0);
        t.evaluate(1500.0);
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(*seen.borrow().last().unwrap(), 1.0);
    }

    #[test]
    fn test_damping_converges() {
        let mut t = trigger(ScrollTriggerSpec::new(()).scrub(0.5));
        t.evaluate(1500.0);
        assert_eq!(t.smoothed, 0.0);
        t.damp(0.1);
        assert!(t.smoothed > 0.0 && t.smoothed < 1.0);
        for _ in 0..400 {
            t.damp(0.016);
        }
        assert_eq!(t.smoothed, 1.0);
    }

    #[test]
    fn test_zero_scrub_is_immediate() {
        let mut t = trigger(ScrollTriggerSpec::new(()).scrub(0.0));
        t.evaluate(850.0);
        assert!((t.smoothed - 0.5).abs() < 1e-4);
    }
}
