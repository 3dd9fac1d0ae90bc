//! Per-frame driver tying the smooth scroller to the animation engine
//!
//! Order within a frame: the scroller advances, its offset reaches the
//! engine's scroll triggers, then the engine ticks. Finished tween ids are
//! handed back so swipe decks can complete their removals.

use tracing::trace;

use crate::animation::{Motion, TweenId};
use crate::scroll::{ScrollEvent, SmoothScroll, SmoothScrollConfig};
use crate::surface::Surface;
use crate::swipe::SwipeController;

/// Gaps longer than this (tab in background, debugger pause) count as
/// a single short step so animations do not jump
const LAG_THRESHOLD: f32 = 0.5;
const LAG_STEP: f32 = 1.0 / 30.0;

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Seconds the engine advanced
    pub dt: f32,
    pub scroll: Option<ScrollEvent>,
    pub finished: Vec<TweenId>,
}

pub struct Shell<S: Surface> {
    scroll: SmoothScroll,
    motion: Motion<S>,
    last_time: Option<f64>,
}

impl<S: Surface> Shell<S> {
    pub fn new(surface: S, config: SmoothScrollConfig) -> Self {
        let mut shell = Self {
            scroll: SmoothScroll::new(config),
            motion: Motion::new(surface),
            last_time: None,
        };
        shell.sync_limit();
        shell
    }

    pub fn motion(&self) -> &Motion<S> {
        &self.motion
    }

    pub fn motion_mut(&mut self) -> &mut Motion<S> {
        &mut self.motion
    }

    pub fn scroller(&self) -> &SmoothScroll {
        &self.scroll
    }

    pub fn scroller_mut(&mut self) -> &mut SmoothScroll {
        &mut self.scroll
    }

    /// Recompute the scroll limit from the document height and refresh
    /// every trigger against the new layout
    pub fn sync_limit(&mut self) {
        let surface = self.motion.surface();
        let document = surface.bounds(&surface.root());
        let limit = document.height - surface.viewport().height;
        self.scroll.set_limit(limit);
        self.motion.refresh();
    }

    fn publish(&mut self, event: Option<ScrollEvent>) -> Option<ScrollEvent> {
        if let Some(event) = event {
            self.motion.update_scroll(event.scroll);
        }
        event
    }

    /// Wheel input; true when the native scroll must be suppressed
    pub fn wheel(&mut self, delta_y: f32) -> bool {
        self.scroll.on_wheel(delta_y)
    }

    pub fn touch(&mut self, delta_y: f32) -> bool {
        self.scroll.on_touch(delta_y)
    }

    /// The platform scrolled by itself (touch, keyboard, scrollbar)
    pub fn native_scroll(&mut self, offset: f32) -> Option<ScrollEvent> {
        let event = self.scroll.sync_native(offset);
        self.publish(event)
    }

    pub fn scroll_to(&mut self, target: f32, immediate: bool) -> Option<ScrollEvent> {
        let event = self.scroll.scroll_to(target, immediate);
        self.publish(event)
    }

    /// Run one frame at `now_ms` (requestAnimationFrame time)
    pub fn frame(&mut self, now_ms: f64) -> Frame {
        let dt = match self.last_time {
            Some(last) => ((now_ms - last).max(0.0) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(now_ms);
        let dt = if dt > LAG_THRESHOLD { LAG_STEP } else { dt };

        let event = self.scroll.raf(now_ms);
        let scroll = self.publish(event);
        let finished = self.motion.tick(dt);
        if !finished.is_empty() {
            trace!(count = finished.len(), "frame finished tweens");
        }
        Frame { dt, scroll, finished }
    }

    /// Let `decks` complete removals whose exit tween ended this frame
    pub fn route<'a, I>(&mut self, frame: &Frame, decks: I) -> usize
    where
        I: IntoIterator<Item = &'a mut SwipeController<S::Node>>,
        S::Node: 'a,
    {
        if frame.finished.is_empty() {
            return 0;
        }
        decks
            .into_iter()
            .map(|deck| deck.on_tweens_finished(&mut self.motion, &frame.finished))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Marker, Property, Props, ScrollTriggerSpec, TweenSpec};
    use crate::swipe::{Direction, SwipeConfig};
    use crate::surface::{Bounds, HeadlessSurface, NodeId, Viewport};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn shell() -> (Shell<HeadlessSurface>, NodeId) {
        let mut surface = HeadlessSurface::new(Viewport::new(1000.0, 800.0));
        surface.set_bounds(HeadlessSurface::ROOT, Bounds::new(0.0, 4800.0));
        let node = surface.add_node(HeadlessSurface::ROOT, &["panel"], Bounds::new(2000.0, 400.0));
        (Shell::new(surface, SmoothScrollConfig::default()), node)
    }

    fn run(shell: &mut Shell<HeadlessSurface>, start_ms: f64, frames: usize) -> f64 {
        let mut now = start_ms;
        for _ in 0..frames {
            now += 1000.0 / 60.0;
            shell.frame(now);
        }
        now
    }

    #[test]
    fn test_limit_comes_from_document() {
        let (shell, _) = shell();
        assert_eq!(shell.scroller().limit(), 4000.0);
    }

    #[test]
    fn test_wheel_scroll_reaches_triggers() {
        let (mut shell, node) = shell();
        let trigger = ScrollTriggerSpec::new(node)
            .start("top top".parse::<Marker>().unwrap())
            .once(true);
        shell.motion_mut().from_to_on_scroll(
            &[node],
            Props::new().opacity(0.0),
            Props::new().opacity(1.0),
            TweenSpec::default(),
            0.0,
            trigger,
        );

        shell.frame(0.0);
        assert!(shell.wheel(2500.0));
        let now = run(&mut shell, 0.0, 180);
        assert_eq!(shell.motion().scroll(), 2625.0);
        run(&mut shell, now, 60);
        assert_eq!(shell.motion().get(&node, Property::Opacity), 1.0);
    }

    #[test]
    fn test_immediate_scroll_updates_engine() {
        let (mut shell, _) = shell();
        let event = shell.scroll_to(1200.0, true).unwrap();
        assert_eq!(event.progress, 0.3);
        assert_eq!(shell.motion().scroll(), 1200.0);
        shell.native_scroll(300.0);
        assert_eq!(shell.motion().scroll(), 300.0);
    }

    #[test]
    fn test_long_gap_is_one_short_step() {
        let (mut shell, _) = shell();
        shell.frame(0.0);
        let frame = shell.frame(5000.0);
        assert_eq!(frame.dt, LAG_STEP);
        assert_eq!(shell.frame(5010.0).dt, 0.01);
    }

    #[test]
    fn test_route_completes_swipes() {
        let mut surface = HeadlessSurface::new(Viewport::new(1000.0, 800.0));
        let container = surface.add_node(HeadlessSurface::ROOT, &["swipe-container"], Bounds::default());
        let card = surface.add_node(container, &["swipe-card"], Bounds::default());
        let mut shell = Shell::new(surface, SmoothScrollConfig::default());

        let swiped = Rc::new(RefCell::new(Vec::new()));
        let sink = swiped.clone();
        let mut deck = SwipeController::new(SwipeConfig::default()).on_swipe_right(move |c: &NodeId| sink.borrow_mut().push(*c));
        deck.start(shell.motion_mut());
        deck.swipe(shell.motion_mut(), Direction::Right);

        let mut now = 0.0;
        let mut completed = 0;
        for _ in 0..40 {
            now += 1000.0 / 60.0;
            let frame = shell.frame(now);
            completed += shell.route(&frame, [&mut deck]);
        }
        assert_eq!(completed, 1);
        assert_eq!(*swiped.borrow(), vec![card]);
    }
}
