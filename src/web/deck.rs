//! `SwipeDeck`: the card stack bound to real pointer events

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use js_sys::Function;
use tracing::debug;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement, TouchEvent};

use super::frame::FrameLoop;
use super::{parse_options, pointer_point, to_js, Outbox, Runtime};
use crate::scroll::SmoothScrollConfig;
use crate::shell::Frame;
use crate::swipe::{Direction, SwipeConfig, SwipeController};

struct DeckState {
    controller: SwipeController<HtmlElement>,
    runtime: Rc<Runtime>,
    listeners: Vec<EventListener>,
    /// Own frame loop, only while not attached to a host
    frame: Option<FrameLoop>,
    attached: bool,
    running: bool,
}

pub(crate) struct DeckInner {
    state: RefCell<DeckState>,
    outbox: Outbox,
}

impl DeckInner {
    fn runtime(&self) -> Rc<Runtime> {
        Rc::clone(&self.state.borrow().runtime)
    }

    /// Complete removals that ended this frame, then run page callbacks
    pub fn finish(&self, frame: &Frame) {
        if !frame.finished.is_empty() {
            let mut state = self.state.borrow_mut();
            let state = &mut *state;
            let runtime = Rc::clone(&state.runtime);
            let mut shell = runtime.shell.borrow_mut();
            shell.route(frame, [&mut state.controller]);
        }
        self.outbox.flush();
    }

    fn start(self: &Rc<Self>) -> bool {
        let runtime = self.runtime();
        let found = {
            let mut state = self.state.borrow_mut();
            if state.running {
                return true;
            }
            let mut shell = runtime.shell.borrow_mut();
            state.controller.start(shell.motion_mut())
        };
        if !found {
            return false;
        }

        let listeners = self.install_listeners(&runtime);
        let frame = {
            let attached = self.state.borrow().attached;
            if attached {
                None
            } else {
                let inner = Rc::clone(self);
                Some(FrameLoop::start(move |time| {
                    let frame = inner.runtime().shell.borrow_mut().frame(time);
                    inner.finish(&frame);
                }))
            }
        };

        let mut state = self.state.borrow_mut();
        state.listeners = listeners;
        state.frame = frame;
        state.running = true;
        true
    }

    fn install_listeners(self: &Rc<Self>, runtime: &Runtime) -> Vec<EventListener> {
        let mut listeners = Vec::new();
        let surface = runtime.shell.borrow().motion().surface().clone();
        let document = surface.document().clone();

        let cards: Vec<HtmlElement> = self
            .state
            .borrow()
            .controller
            .cards()
            .iter()
            .map(|c| c.node.clone())
            .collect();

        for card in cards {
            for kind in ["mousedown", "touchstart"] {
                let inner = Rc::clone(self);
                let target = card.clone();
                listeners.push(EventListener::new(&card, kind, move |event: &Event| {
                    let Some(at) = pointer_point(event) else {
                        return;
                    };
                    let runtime = inner.runtime();
                    let mut shell = runtime.shell.borrow_mut();
                    inner
                        .state
                        .borrow_mut()
                        .controller
                        .pointer_down(shell.motion_mut(), &target, at);
                }));
            }
        }

        let active = EventListenerOptions::enable_prevent_default();
        for kind in ["mousemove", "touchmove"] {
            let inner = Rc::clone(self);
            listeners.push(EventListener::new_with_options(&document, kind, active, move |event: &Event| {
                let Some(at) = pointer_point(event) else {
                    return;
                };
                let runtime = inner.runtime();
                let mut shell = runtime.shell.borrow_mut();
                let dragging = inner
                    .state
                    .borrow_mut()
                    .controller
                    .pointer_move(shell.motion_mut(), at);
                if dragging && event.dyn_ref::<TouchEvent>().is_some() {
                    event.prevent_default();
                }
            }));
        }

        for kind in ["mouseup", "touchend", "touchcancel"] {
            let inner = Rc::clone(self);
            listeners.push(EventListener::new(&document, kind, move |event: &Event| {
                let runtime = inner.runtime();
                let mut shell = runtime.shell.borrow_mut();
                let mut state = inner.state.borrow_mut();
                match pointer_point(event) {
                    Some(at) => state.controller.pointer_up(shell.motion_mut(), at),
                    None => state.controller.pointer_cancel(shell.motion_mut()),
                }
            }));
        }

        listeners
    }

    fn stop(&self) {
        let runtime = self.runtime();
        let mut state = self.state.borrow_mut();
        state.listeners.clear();
        state.frame = None;
        state.running = false;
        if let Ok(mut shell) = runtime.shell.try_borrow_mut() {
            state.controller.stop(shell.motion_mut());
        }
        self.outbox.clear();
    }

    /// Move onto another runtime, restarting if the deck was running
    pub fn rebind(self: &Rc<Self>, runtime: Rc<Runtime>) {
        let was_running = self.state.borrow().running;
        if was_running {
            self.stop();
        }
        {
            let mut state = self.state.borrow_mut();
            state.runtime = runtime;
            state.attached = true;
        }
        if was_running {
            self.start();
        }
    }
}

/// Swipeable card stack. Cards are found with the configured selectors when
/// `start` is called; swipe callbacks receive the removed card element.
#[wasm_bindgen]
pub struct SwipeDeck {
    inner: Rc<DeckInner>,
}

#[wasm_bindgen]
impl SwipeDeck {
    /// `options` is YAML with `container_selector`, `card_selector` and
    /// `threshold`
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<String>, on_left: Option<Function>, on_right: Option<Function>) -> Result<SwipeDeck, JsValue> {
        let config: SwipeConfig = parse_options(options)?;
        let runtime = Runtime::new(SmoothScrollConfig::default()).map_err(to_js)?;
        let outbox = Outbox::default();

        let mut controller = SwipeController::new(config);
        if let Some(callback) = on_left {
            let outbox = outbox.clone();
            controller = controller.on_swipe_left(move |card: &HtmlElement| outbox.call(&callback, JsValue::from(card.clone())));
        }
        if let Some(callback) = on_right {
            let outbox = outbox.clone();
            controller = controller.on_swipe_right(move |card: &HtmlElement| outbox.call(&callback, JsValue::from(card.clone())));
        }

        let state = DeckState {
            controller,
            runtime,
            listeners: Vec::new(),
            frame: None,
            attached: false,
            running: false,
        };
        Ok(SwipeDeck {
            inner: Rc::new(DeckInner {
                state: RefCell::new(state),
                outbox,
            }),
        })
    }

    /// Find the cards, lay them out and listen for drags. Returns false
    /// when the container is missing.
    pub fn start(&self) -> bool {
        self.inner.start()
    }

    /// Remove the top card: `"left"` or `"right"`
    pub fn swipe(&self, direction: &str) -> Result<bool, JsValue> {
        let direction: Direction = direction.parse().map_err(to_js)?;
        let runtime = self.inner.runtime();
        let mut shell = runtime.shell.borrow_mut();
        let swiped = self
            .inner
            .state
            .borrow_mut()
            .controller
            .swipe(shell.motion_mut(), direction);
        Ok(swiped)
    }

    /// Drop every listener and forget the stack
    pub fn stop(&self) {
        self.inner.stop();
        debug!("swipe deck stopped");
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.state.borrow().controller.is_dragging()
    }

    /// Cards still in the stack
    pub fn remaining(&self) -> usize {
        self.inner.state.borrow().controller.stack().len()
    }
}

impl SwipeDeck {
    pub(crate) fn inner(&self) -> &Rc<DeckInner> {
        &self.inner
    }
}

impl Drop for SwipeDeck {
    fn drop(&mut self) {
        self.inner.stop();
    }
}
