//! Drag gestures and removal transitions for the card stack
//!
//! The controller is a small state machine: Idle while `session` is empty,
//! Dragging while a card follows the pointer. Releasing either sends the
//! card off screen (Removing) or springs it back. Removals finish when
//! the engine reports their exit tween done, via `on_tweens_finished`.

use std::fmt;

use tracing::{debug, warn};

use super::layout::{apply_layout, rest_rotation};
use super::{Direction, Point, SwipeConfig};
use crate::animation::{Ease, EaseMode, Motion, Props, TweenId, TweenSpec};
use crate::surface::Surface;

const DRAG_Z_INDEX: i32 = 1000;
const INDICATOR_DEADBAND: f32 = 30.0;
const EXIT_DISTANCE: f32 = 1.5;
const DRAG_EXIT_KICK: f32 = 25.0;
const DRAG_EXIT_DURATION: f32 = 0.35;
const SWIPE_EXIT_ROTATION: f32 = 30.0;
const SWIPE_EXIT_Y: f32 = -100.0;
const SWIPE_EXIT_DURATION: f32 = 0.4;
const SNAP_BACK_DURATION: f32 = 0.4;
const SNAP_BACK_OVERSHOOT: f32 = 1.5;

const CLASS_MOVING: &str = "moving";
const CLASS_REMOVED: &str = "removed";
const CLASS_SWIPE_LEFT: &str = "swipe-left";
const CLASS_SWIPE_RIGHT: &str = "swipe-right";

/// Called with the card that was swiped away
pub type SwipeCallback<N> = Box<dyn FnMut(&N)>;

#[derive(Debug, Clone, PartialEq)]
pub struct Card<N> {
    pub node: N,
    pub removed: bool,
}

/// The card currently following the pointer
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession<N> {
    pub card: N,
    pub start: Point,
    /// Latest pointer position seen while dragging
    pub last: Point,
}

/// A card on its way off screen
#[derive(Debug, Clone)]
struct Departure<N> {
    tween: TweenId,
    card: N,
    direction: Direction,
}

/// Tilt while dragging: grows with both horizontal and vertical travel
fn drag_rotation(dx: f32, dy: f32) -> f32 {
    (dx * 0.04) * (dy / 100.0)
}

pub struct SwipeController<N> {
    config: SwipeConfig,
    container: Option<N>,
    cards: Vec<Card<N>>,
    session: Option<DragSession<N>>,
    departures: Vec<Departure<N>>,
    on_swipe_left: Option<SwipeCallback<N>>,
    on_swipe_right: Option<SwipeCallback<N>>,
}

impl<N: Clone + PartialEq + fmt::Debug> SwipeController<N> {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            container: None,
            cards: Vec::new(),
            session: None,
            departures: Vec::new(),
            on_swipe_left: None,
            on_swipe_right: None,
        }
    }

    pub fn on_swipe_left(mut self, callback: impl FnMut(&N) + 'static) -> Self {
        self.on_swipe_left = Some(Box::new(callback));
        self
    }

    pub fn on_swipe_right(mut self, callback: impl FnMut(&N) + 'static) -> Self {
        self.on_swipe_right = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub fn container(&self) -> Option<&N> {
        self.container.as_ref()
    }

    /// Every card found at start, removed or not
    pub fn cards(&self) -> &[Card<N>] {
        &self.cards
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession<N>> {
        self.session.as_ref()
    }

    /// Cards still in the stack, top first
    pub fn stack(&self) -> Vec<N> {
        self.cards
            .iter()
            .filter(|c| !c.removed)
            .map(|c| c.node.clone())
            .collect()
    }

    fn is_departing(&self, node: &N) -> bool {
        self.departures.iter().any(|d| &d.card == node)
    }

    /// Cards that take part in layout: in the stack and not flying away
    fn settled(&self) -> Vec<N> {
        self.cards
            .iter()
            .filter(|c| !c.removed && !self.is_departing(&c.node))
            .map(|c| c.node.clone())
            .collect()
    }

    fn mark_removed(&mut self, node: &N) {
        if let Some(card) = self.cards.iter_mut().find(|c| &c.node == node) {
            card.removed = true;
        }
    }

    // === Lifecycle ===

    /// Find the container and its cards, then lay them out.
    /// Returns false when the container is missing.
    pub fn start<S: Surface<Node = N>>(&mut self, motion: &mut Motion<S>) -> bool {
        let Some(container) = motion.surface().query(&self.config.container_selector) else {
            warn!("Container not found: {}", self.config.container_selector);
            return false;
        };

        let surface = motion.surface();
        self.cards = surface
            .query_all(&container, &self.config.card_selector)
            .into_iter()
            .map(|node| {
                let removed = surface.has_class(&node, CLASS_REMOVED);
                Card { node, removed }
            })
            .collect();
        self.container = Some(container);
        self.session = None;
        self.departures.clear();

        debug!(cards = self.cards.len(), "swipe stack started");
        self.layout(motion);
        true
    }

    /// Forget the stack and any drag in progress
    pub fn stop<S: Surface<Node = N>>(&mut self, motion: &mut Motion<S>) {
        if let Some(session) = self.session.take() {
            motion.surface_mut().remove_class(&session.card, CLASS_MOVING);
        }
        if let Some(container) = self.container.take() {
            let surface = motion.surface_mut();
            surface.remove_class(&container, CLASS_SWIPE_LEFT);
            surface.remove_class(&container, CLASS_SWIPE_RIGHT);
        }
        self.cards.clear();
        self.departures.clear();
        debug!("swipe stack stopped");
    }

    /// Animate the settled cards to their resting poses. A card under the
    /// pointer keeps its slot but is left where the finger holds it.
    pub fn layout<S: Surface<Node = N>>(&mut self, motion: &mut Motion<S>) {
        let stack = self.settled();
        let held = self.session.as_ref().map(|s| &s.card);
        apply_layout(motion, &stack, held);
    }

    // === Gesture ===

    /// Begin dragging `card`. Ignored while another drag is active or when
    /// the card has left the stack.
    pub fn pointer_down<S: Surface<Node = N>>(&mut self, motion: &mut Motion<S>, card: &N, at: Point) -> bool {
        if self.session.is_some() {
            return false;
        }
        if !self.settled().contains(card) {
            return false;
        }

        self.session = Some(DragSession {
            card: card.clone(),
            start: at,
            last: at,
        });
        motion.surface_mut().add_class(card, CLASS_MOVING);
        motion.set(card, Props::new().z_index(DRAG_Z_INDEX));
        debug!(x = at.x, y = at.y, "drag started");
        true
    }

    /// Follow the pointer. Returns true when the platform default (page
    /// scrolling on touch) should be suppressed.
    pub fn pointer_move<S: Surface<Node = N>>(&mut self, motion: &mut Motion<S>, at: Point) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.last = at;

        let dx = at.x - session.start.x;
        let dy = at.y - session.start.y;
        let card = session.card.clone();

        motion.set(&card, Props::new().x(dx).y(dy).rotation(drag_rotation(dx, dy)));

        if let Some(container) = self.container.as_ref() {
            let surface = motion.surface_mut();
            if dx > INDICATOR_DEADBAND {
                surface.add_class(container, CLASS_SWIPE_RIGHT);
                surface.remove_class(container, CLASS_SWIPE_LEFT);
            } else if dx < -INDICATOR_DEADBAND {
                surface.add_class(container, CLASS_SWIPE_LEFT);
                surface.remove_class(container, CLASS_SWIPE_RIGHT);
            } else {
                surface.remove_class(container, CLASS_SWIPE_RIGHT);
                surface.remove_class(container, CLASS_SWIPE_LEFT);
            }
        }
        true
    }

    /// Release the drag: remove the card past the threshold, otherwise
    /// spring it back to its resting tilt
    pub fn pointer_up<S: Surface<Node = N>>(&mut self, motion: &mut Motion<S>, at: Point) {
        let Some(session) = self.session.take() else {
            return;
        };

        let card = session.card;
        let dx = at.x - session.start.x;
        let dy = at.y - session.start.y;

        {
            let surface = motion.surface_mut();
            surface.remove_class(&card, CLASS_MOVING);
            if let Some(container) = self.container.as_ref() {
                surface.remove_class(container, CLASS_SWIPE_RIGHT);
                surface.remove_class(container, CLASS_SWIPE_LEFT);
            }
        }

        if dx.abs() > self.config.threshold {
            let direction = Direction::from_delta(dx);
            let exit_x = direction.sign() * motion.surface().viewport().width * EXIT_DISTANCE;
            let props = Props::new()
                .x(exit_x)
                .y(dy + dx.abs() * 0.3)
                .rotation(drag_rotation(dx, dy) + direction.sign() * DRAG_EXIT_KICK)
                .opacity(0.0);
            let tween = motion.to(
                &card,
                props,
                TweenSpec::new(DRAG_EXIT_DURATION, Ease::power(2, EaseMode::Out)),
            );
            debug!(%direction, dx, "card swiped away");
            self.departures.push(Departure {
                tween,
                card,
                direction,
            });
        } else {
            let index = self.stack().iter().position(|c| c == &card).unwrap_or(0);
            motion.to(
                &card,
                Props::new().x(0.0).y(0.0).rotation(rest_rotation(index)),
                TweenSpec::new(SNAP_BACK_DURATION, Ease::back_out(SNAP_BACK_OVERSHOOT)),
            );
            debug!(dx, "card snapped back");
        }
    }

    /// Release without a usable position: the last position seen while
    /// dragging decides between removal and snap-back
    pub fn pointer_cancel<S: Surface<Node = N>>(&mut self, motion: &mut Motion<S>) {
        if let Some(last) = self.session.as_ref().map(|s| s.last) {
            self.pointer_up(motion, last);
        }
    }

    // === Programmatic swipe ===

    /// Send the top card away without a gesture. No-op on an empty stack.
    pub fn swipe<S: Surface<Node = N>>(&mut self, motion: &mut Motion<S>, direction: Direction) -> bool {
        let Some(card) = self.settled().into_iter().next() else {
            return false;
        };

        self.mark_removed(&card);
        motion.surface_mut().add_class(&card, CLASS_REMOVED);

        let exit_x = direction.sign() * motion.surface().viewport().width * EXIT_DISTANCE;
        let props = Props::new()
            .x(exit_x)
            .y(SWIPE_EXIT_Y)
            .rotation(direction.sign() * SWIPE_EXIT_ROTATION)
            .opacity(0.0);
        let tween = motion.to(
            &card,
            props,
            TweenSpec::new(SWIPE_EXIT_DURATION, Ease::power(2, EaseMode::In)),
        );
        debug!(%direction, "card swiped programmatically");
        self.departures.push(Departure {
            tween,
            card,
            direction,
        });
        true
    }

    // === Completion ===

    /// Finish removals whose exit tween is in `finished`; returns how many
    pub fn on_tweens_finished<S: Surface<Node = N>>(&mut self, motion: &mut Motion<S>, finished: &[TweenId]) -> usize {
        let (done, pending): (Vec<_>, Vec<_>) = self
            .departures
            .drain(..)
            .partition(|d| finished.contains(&d.tween));
        self.departures = pending;

        for departure in &done {
            let card = &departure.card;
            self.mark_removed(card);
            let surface = motion.surface_mut();
            surface.add_class(card, CLASS_REMOVED);
            surface.hide(card);
        }

        if !done.is_empty() {
            self.layout(motion);
        }

        for departure in &done {
            let callback = match departure.direction {
                Direction::Left => self.on_swipe_left.as_mut(),
                Direction::Right => self.on_swipe_right.as_mut(),
            };
            if let Some(callback) = callback {
                callback(&departure.card);
            }
        }
        done.len()
    }
}
