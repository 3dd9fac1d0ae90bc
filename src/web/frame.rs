//! requestAnimationFrame loop and deferred callbacks

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use gloo::render::{request_animation_frame, AnimationFrame};
use js_sys::Function;
use tracing::warn;
use wasm_bindgen::JsValue;

struct LoopState {
    running: Cell<bool>,
    handle: RefCell<Option<AnimationFrame>>,
    on_frame: RefCell<Box<dyn FnMut(f64)>>,
}

fn schedule(state: &Rc<LoopState>) {
    let next = Rc::clone(state);
    let handle = request_animation_frame(move |time| {
        next.handle.borrow_mut().take();
        if !next.running.get() {
            return;
        }
        {
            let mut on_frame = next.on_frame.borrow_mut();
            (*on_frame)(time);
        }
        if next.running.get() {
            schedule(&next);
        }
    });
    *state.handle.borrow_mut() = Some(handle);
}

/// Calls `on_frame` with the frame timestamp every animation frame until
/// stopped or dropped
pub struct FrameLoop {
    state: Rc<LoopState>,
}

impl FrameLoop {
    pub fn start(on_frame: impl FnMut(f64) + 'static) -> Self {
        let state = Rc::new(LoopState {
            running: Cell::new(true),
            handle: RefCell::new(None),
            on_frame: RefCell::new(Box::new(on_frame)),
        });
        schedule(&state);
        Self { state }
    }

    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }

    pub fn stop(&self) {
        self.state.running.set(false);
        self.state.handle.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Work that must run after every engine borrow is released, because it
/// may call back into the page (and from there into us)
#[derive(Clone, Default)]
pub(crate) struct Outbox {
    queue: Rc<RefCell<VecDeque<Box<dyn FnOnce()>>>>,
}

impl Outbox {
    pub fn post(&self, job: impl FnOnce() + 'static) {
        self.queue.borrow_mut().push_back(Box::new(job));
    }

    /// Invoke a page callback with one argument, later
    pub fn call(&self, function: &Function, arg: JsValue) {
        let function = function.clone();
        self.post(move || {
            if let Err(err) = function.call1(&JsValue::NULL, &arg) {
                warn!("callback threw: {:?}", err);
            }
        });
    }

    pub fn flush(&self) {
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(job) = next else {
                break;
            };
            job();
        }
    }

    pub fn clear(&self) {
        self.queue.borrow_mut().clear();
    }
}
