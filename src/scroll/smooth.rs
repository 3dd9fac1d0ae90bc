use tracing::trace;

use super::SmoothScrollConfig;

const SNAP_DISTANCE: f32 = 0.5;
/// Reference frame rate the lerp factor is expressed in
const FRAME_RATE: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDirection {
    #[default]
    Idle,
    Down,
    Up,
}

/// Published after every change of the animated offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    pub scroll: f32,
    pub limit: f32,
    /// Offset change since the previous event
    pub velocity: f32,
    pub direction: ScrollDirection,
    /// `scroll / limit`, 0 on a page that cannot scroll
    pub progress: f32,
}

pub type ScrollListener = Box<dyn FnMut(&ScrollEvent)>;

/// Exponential ease-out used in fixed-duration mode
fn ease_out_expo(t: f32) -> f32 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2f32.powf(-10.0 * t)
    }
}

pub struct SmoothScroll {
    config: SmoothScrollConfig,
    animated: f32,
    target: f32,
    limit: f32,
    velocity: f32,
    direction: ScrollDirection,
    animating: bool,
    stopped: bool,
    /// Offset and elapsed seconds of the current fixed-duration run
    origin: f32,
    elapsed: f32,
    last_time: Option<f64>,
    listeners: Vec<ScrollListener>,
}

impl SmoothScroll {
    pub fn new(config: SmoothScrollConfig) -> Self {
        Self {
            config,
            animated: 0.0,
            target: 0.0,
            limit: 0.0,
            velocity: 0.0,
            direction: ScrollDirection::Idle,
            animating: false,
            stopped: false,
            origin: 0.0,
            elapsed: 0.0,
            last_time: None,
            listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &SmoothScrollConfig {
        &self.config
    }

    /// Current animated offset
    pub fn scroll(&self) -> f32 {
        self.animated
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn limit(&self) -> f32 {
        self.limit
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn progress(&self) -> f32 {
        if self.limit > 0.0 {
            self.animated / self.limit
        } else {
            0.0
        }
    }

    pub fn on_scroll(&mut self, listener: impl FnMut(&ScrollEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Largest reachable offset; pulls the target and offset back inside
    pub fn set_limit(&mut self, limit: f32) {
        self.limit = limit.max(0.0);
        self.target = self.clamp(self.target);
        self.animated = self.clamp(self.animated);
    }

    fn clamp(&self, offset: f32) -> f32 {
        offset.clamp(0.0, self.limit)
    }

    fn aim(&mut self, target: f32) {
        self.target = self.clamp(target);
        self.origin = self.animated;
        self.elapsed = 0.0;
        self.animating = self.target != self.animated;
    }

    /// Wheel delta in pixels. Returns true when the native scroll must be
    /// suppressed because this scroller takes over.
    pub fn on_wheel(&mut self, delta_y: f32) -> bool {
        if self.stopped {
            return true;
        }
        if !self.config.smooth_wheel {
            return false;
        }
        self.aim(self.target + delta_y * self.config.wheel_multiplier);
        true
    }

    /// Touch drag delta in pixels. Without `smooth_touch` the platform
    /// scrolls natively and the offset is picked up by `sync_native`.
    pub fn on_touch(&mut self, delta_y: f32) -> bool {
        if self.stopped {
            return true;
        }
        if !self.config.smooth_touch {
            return false;
        }
        self.aim(self.target + delta_y);
        true
    }

    /// Adopt an offset the platform scrolled to on its own
    pub fn sync_native(&mut self, offset: f32) -> Option<ScrollEvent> {
        if self.animating || self.stopped {
            return None;
        }
        let offset = self.clamp(offset);
        if offset == self.animated {
            return None;
        }
        self.target = offset;
        Some(self.moved_to(offset))
    }

    /// Scroll to `target`; `immediate` jumps without easing
    pub fn scroll_to(&mut self, target: f32, immediate: bool) -> Option<ScrollEvent> {
        if self.stopped {
            return None;
        }
        if immediate {
            let target = self.clamp(target);
            self.target = target;
            self.animating = false;
            return Some(self.moved_to(target));
        }
        self.aim(target);
        None
    }

    /// Freeze at the current offset, dropping any pending movement
    pub fn stop(&mut self) {
        self.stopped = true;
        self.animating = false;
        self.target = self.animated;
        self.velocity = 0.0;
    }

    pub fn start(&mut self) {
        self.stopped = false;
    }

    /// Advance to frame time `time_ms` (as given by requestAnimationFrame).
    /// Returns the event published this frame, if the offset moved.
    pub fn raf(&mut self, time_ms: f64) -> Option<ScrollEvent> {
        let dt = match self.last_time {
            Some(last) => ((time_ms - last).max(0.0) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(time_ms);

        if self.stopped || !self.animating {
            return None;
        }

        let next = if self.config.lerp > 0.0 {
            let factor = 1.0 - (-FRAME_RATE * self.config.lerp * dt).exp();
            let next = self.animated + (self.target - self.animated) * factor;
            if (self.target - next).abs() < SNAP_DISTANCE {
                self.target
            } else {
                next
            }
        } else {
            self.elapsed += dt;
            let t = if self.config.duration > 0.0 {
                (self.elapsed / self.config.duration).min(1.0)
            } else {
                1.0
            };
            self.origin + (self.target - self.origin) * ease_out_expo(t)
        };

        if next == self.target {
            self.animating = false;
        }
        if next == self.animated {
            return None;
        }
        Some(self.moved_to(next))
    }

    fn moved_to(&mut self, offset: f32) -> ScrollEvent {
        self.velocity = offset - self.animated;
        self.direction = if self.velocity > 0.0 {
            ScrollDirection::Down
        } else if self.velocity < 0.0 {
            ScrollDirection::Up
        } else {
            self.direction
        };
        self.animated = offset;

        let event = ScrollEvent {
            scroll: self.animated,
            limit: self.limit,
            velocity: self.velocity,
            direction: self.direction,
            progress: self.progress(),
        };
        trace!(scroll = event.scroll, velocity = event.velocity, "scroll");
        for listener in &mut self.listeners {
            listener(&event);
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn scroller(config: SmoothScrollConfig) -> SmoothScroll {
        let mut scroll = SmoothScroll::new(config);
        scroll.set_limit(2000.0);
        scroll
    }

    /// Run 60 Hz frames for `seconds`, starting at `start_ms`
    fn frames(scroll: &mut SmoothScroll, start_ms: f64, seconds: f64) -> Vec<ScrollEvent> {
        let count = (seconds * 60.0).round() as usize;
        (0..=count)
            .filter_map(|i| scroll.raf(start_ms + i as f64 * 1000.0 / 60.0))
            .collect()
    }

    #[test]
    fn test_wheel_eases_towards_target() {
        let mut scroll = scroller(SmoothScrollConfig::default());
        assert!(scroll.on_wheel(400.0));
        let target = 400.0 * 1.05;
        assert!((scroll.target() - 420.0).abs() < 1e-3);

        scroll.raf(0.0);
        let first = scroll.raf(1000.0 / 60.0).unwrap();
        assert!(first.scroll > 0.0 && first.scroll < target);
        assert_eq!(first.direction, ScrollDirection::Down);

        let events = frames(&mut scroll, 1000.0 / 60.0, 3.0);
        let last = events.last().unwrap();
        assert_eq!(last.scroll, scroll.target());
        assert!(!scroll.is_animating());
        assert!(events.windows(2).all(|w| w[1].scroll >= w[0].scroll));
    }

    #[test]
    fn test_target_is_clamped() {
        let mut scroll = scroller(SmoothScrollConfig::default());
        scroll.on_wheel(-300.0);
        assert_eq!(scroll.target(), 0.0);
        assert!(!scroll.is_animating());
        scroll.on_wheel(10_000.0);
        assert_eq!(scroll.target(), 2000.0);
    }

    #[test]
    fn test_native_wheel_when_not_smooth() {
        let config = SmoothScrollConfig {
            smooth_wheel: false,
            ..SmoothScrollConfig::default()
        };
        let mut scroll = scroller(config);
        assert!(!scroll.on_wheel(100.0));
        assert_eq!(scroll.target(), 0.0);
    }

    #[test]
    fn test_touch_is_native_unless_smooth() {
        let mut scroll = scroller(SmoothScrollConfig::default());
        assert!(!scroll.on_touch(100.0));
        let event = scroll.sync_native(250.0).unwrap();
        assert_eq!(event.scroll, 250.0);
        assert_eq!(scroll.sync_native(250.0), None);

        let config = SmoothScrollConfig {
            smooth_touch: true,
            ..SmoothScrollConfig::default()
        };
        let mut scroll = scroller(config);
        assert!(scroll.on_touch(100.0));
        assert!(scroll.is_animating());
    }

    #[test]
    fn test_fixed_duration_mode() {
        let config = SmoothScrollConfig {
            lerp: 0.0,
            duration: 1.0,
            ..SmoothScrollConfig::default()
        };
        let mut scroll = scroller(config);
        scroll.scroll_to(1000.0, false);
        scroll.raf(0.0);
        let half = scroll.raf(500.0).unwrap();
        assert!((half.scroll - 1000.0 * ease_out_expo(0.5)).abs() < 1e-2);
        let done = scroll.raf(1000.0).unwrap();
        assert_eq!(done.scroll, 1000.0);
        assert!(!scroll.is_animating());
    }

    #[test]
    fn test_immediate_scroll_to_publishes() {
        let mut scroll = scroller(SmoothScrollConfig::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        scroll.on_scroll(move |e| sink.borrow_mut().push(e.scroll));

        let event = scroll.scroll_to(500.0, true).unwrap();
        assert_eq!(event.progress, 0.25);
        assert_eq!(event.velocity, 500.0);
        assert_eq!(*seen.borrow(), vec![500.0]);

        let back = scroll.scroll_to(100.0, true).unwrap();
        assert_eq!(back.direction, ScrollDirection::Up);
    }

    #[test]
    fn test_stop_freezes_offset() {
        let mut scroll = scroller(SmoothScrollConfig::default());
        scroll.on_wheel(500.0);
        scroll.raf(0.0);
        scroll.raf(16.0);
        let frozen = scroll.scroll();
        scroll.stop();
        assert!(scroll.on_wheel(500.0));
        assert_eq!(scroll.raf(32.0), None);
        assert_eq!(scroll.scroll(), frozen);
        assert_eq!(scroll.scroll_to(0.0, true), None);

        scroll.start();
        scroll.on_wheel(100.0);
        assert!(scroll.is_animating());
    }

    #[test]
    fn test_shrinking_limit_pulls_offset_back() {
        let mut scroll = scroller(SmoothScrollConfig::default());
        scroll.scroll_to(1500.0, true);
        scroll.set_limit(1000.0);
        assert_eq!(scroll.scroll(), 1000.0);
        assert_eq!(scroll.target(), 1000.0);
        assert_eq!(scroll.progress(), 1.0);
    }

    #[test]
    fn test_unscrollable_page_has_zero_progress() {
        let mut scroll = SmoothScroll::new(SmoothScrollConfig::default());
        assert_eq!(scroll.progress(), 0.0);
        assert!(scroll.on_wheel(100.0));
        assert!(!scroll.is_animating());
    }
}
