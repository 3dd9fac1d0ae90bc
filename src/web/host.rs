//! `HostShell`: smooth scrolling, the frame loop and page wiring

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use js_sys::{Object, Reflect};
use tracing::{debug, info};
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, CustomEventInit, Event, TouchEvent, WheelEvent, Window};

use super::deck::DeckInner;
use super::frame::FrameLoop;
use super::presets::MotionPresets;
use super::{pointer_point, to_js, Runtime, SwipeDeck};
use crate::config::MotionConfig;
use crate::logging::init_logging;
use crate::scroll::{ScrollDirection, ScrollEvent};
use crate::surface::Surface;

/// Name of the event re-dispatched on `window` for every scroll update
pub const SMOOTH_SCROLL_EVENT: &str = "smooth-scroll";

const LINE_HEIGHT: f32 = 40.0;

/// Wheel delta in pixels whatever unit the browser reports in
fn wheel_pixels(event: &WheelEvent, viewport_height: f32) -> f32 {
    let delta = event.delta_y() as f32;
    match event.delta_mode() {
        WheelEvent::DOM_DELTA_LINE => delta * LINE_HEIGHT,
        WheelEvent::DOM_DELTA_PAGE => delta * viewport_height,
        _ => delta,
    }
}

fn event_detail(event: &ScrollEvent) -> JsValue {
    let detail = Object::new();
    let direction = match event.direction {
        ScrollDirection::Down => 1.0,
        ScrollDirection::Up => -1.0,
        ScrollDirection::Idle => 0.0,
    };
    let fields = [
        ("scroll", event.scroll as f64),
        ("limit", event.limit as f64),
        ("velocity", event.velocity as f64),
        ("direction", direction),
        ("progress", event.progress as f64),
    ];
    for (key, value) in fields {
        let _ = Reflect::set(&detail, &JsValue::from_str(key), &JsValue::from_f64(value));
    }
    detail.into()
}

fn dispatch_scroll(window: &Window, event: &ScrollEvent) {
    let init = CustomEventInit::new();
    init.set_detail(&event_detail(event));
    if let Ok(custom) = CustomEvent::new_with_event_init_dict(SMOOTH_SCROLL_EVENT, &init) {
        let _ = window.dispatch_event(&custom);
    }
}

struct HostState {
    runtime: Rc<Runtime>,
    config: MotionConfig,
    decks: RefCell<Vec<Rc<DeckInner>>>,
    listeners: RefCell<Vec<EventListener>>,
    frame: RefCell<Option<FrameLoop>>,
}

/// Owns the smooth scroller and the frame loop that drives every animation
/// on the page
#[wasm_bindgen]
pub struct HostShell {
    state: Rc<HostState>,
}

#[wasm_bindgen]
impl HostShell {
    /// `config` is YAML: `log_level`, `swipe`, `smooth_scroll`
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<HostShell, JsValue> {
        let config = MotionConfig::from_yaml(config.as_deref().unwrap_or("")).map_err(to_js)?;
        init_logging(&config.log_level);

        let runtime = Runtime::new(config.smooth_scroll.clone()).map_err(to_js)?;
        {
            let window = runtime.shell.borrow().motion().surface().window().clone();
            let outbox = runtime.outbox.clone();
            runtime.shell.borrow_mut().scroller_mut().on_scroll(move |event| {
                let window = window.clone();
                let event = *event;
                outbox.post(move || {
                    window.scroll_to_with_x_and_y(0.0, event.scroll as f64);
                    dispatch_scroll(&window, &event);
                });
            });
        }

        info!("host shell created");
        Ok(HostShell {
            state: Rc::new(HostState {
                runtime,
                config,
                decks: RefCell::new(Vec::new()),
                listeners: RefCell::new(Vec::new()),
                frame: RefCell::new(None),
            }),
        })
    }

    /// Begin smooth scrolling and the frame loop
    pub fn start(&self) {
        if self.state.frame.borrow().is_some() {
            return;
        }
        let runtime = Rc::clone(&self.state.runtime);
        {
            let mut shell = runtime.shell.borrow_mut();
            shell.scroller_mut().start();
            let offset = shell.motion().surface().scroll_y();
            shell.sync_limit();
            shell.scroll_to(offset, true);
        }
        runtime.outbox.flush();

        *self.state.listeners.borrow_mut() = self.install_listeners();

        let state = Rc::clone(&self.state);
        let frame = FrameLoop::start(move |time| {
            let frame = state.runtime.shell.borrow_mut().frame(time);
            let decks: Vec<Rc<DeckInner>> = state.decks.borrow().clone();
            for deck in decks {
                deck.finish(&frame);
            }
            state.runtime.outbox.flush();
        });
        *self.state.frame.borrow_mut() = Some(frame);
        debug!("host shell started");
    }

    /// Stop the frame loop and smooth scrolling; attached decks stay alive
    pub fn stop(&self) {
        self.state.frame.borrow_mut().take();
        self.state.listeners.borrow_mut().clear();
        if let Ok(mut shell) = self.state.runtime.shell.try_borrow_mut() {
            shell.scroller_mut().stop();
        }
        debug!("host shell stopped");
    }

    /// Drive `deck` from this shell's frame loop
    pub fn attach(&self, deck: &SwipeDeck) {
        let inner = Rc::clone(deck.inner());
        inner.rebind(Rc::clone(&self.state.runtime));
        self.state.decks.borrow_mut().push(inner);
    }

    /// Preset library animating through this shell
    pub fn presets(&self) -> MotionPresets {
        MotionPresets::new(Rc::clone(&self.state.runtime))
    }

    /// Re-measure the document and every scroll trigger
    pub fn refresh(&self) {
        self.state.runtime.shell.borrow_mut().sync_limit();
        self.state.runtime.outbox.flush();
    }

    /// Scroll to `target` pixels, easing unless `immediate`
    pub fn scroll_to(&self, target: f32, immediate: bool) {
        self.state.runtime.shell.borrow_mut().scroll_to(target, immediate);
        self.state.runtime.outbox.flush();
    }

    /// Current smoothed offset
    pub fn scroll(&self) -> f32 {
        self.state.runtime.shell.borrow().scroller().scroll()
    }
}

impl HostShell {
    fn install_listeners(&self) -> Vec<EventListener> {
        let runtime = Rc::clone(&self.state.runtime);
        let window = runtime.shell.borrow().motion().surface().window().clone();
        let mut listeners = Vec::new();

        let active = EventListenerOptions::enable_prevent_default();
        {
            let runtime = Rc::clone(&runtime);
            listeners.push(EventListener::new_with_options(&window, "wheel", active, move |event: &Event| {
                let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                    return;
                };
                let mut shell = runtime.shell.borrow_mut();
                let delta = wheel_pixels(wheel, shell.motion().surface().viewport().height);
                if shell.wheel(delta) {
                    event.prevent_default();
                }
            }));
        }
        {
            let runtime = Rc::clone(&runtime);
            listeners.push(EventListener::new(&window, "scroll", move |_event: &Event| {
                {
                    let mut shell = runtime.shell.borrow_mut();
                    let offset = shell.motion().surface().scroll_y();
                    shell.native_scroll(offset);
                }
                runtime.outbox.flush();
            }));
        }
        {
            let runtime = Rc::clone(&runtime);
            listeners.push(EventListener::new(&window, "resize", move |_event: &Event| {
                runtime.shell.borrow_mut().sync_limit();
                runtime.outbox.flush();
            }));
        }

        if self.state.config.smooth_scroll.smooth_touch {
            let last_y = Rc::new(Cell::new(None::<f32>));
            {
                let last_y = Rc::clone(&last_y);
                listeners.push(EventListener::new(&window, "touchstart", move |event: &Event| {
                    last_y.set(pointer_point(event).map(|p| p.y));
                }));
            }
            let runtime = Rc::clone(&runtime);
            listeners.push(EventListener::new_with_options(&window, "touchmove", active, move |event: &Event| {
                if event.dyn_ref::<TouchEvent>().is_none() {
                    return;
                }
                let Some(point) = pointer_point(event) else {
                    return;
                };
                let Some(previous) = last_y.replace(Some(point.y)) else {
                    return;
                };
                if runtime.shell.borrow_mut().touch(previous - point.y) {
                    event.prevent_default();
                }
            }));
        }

        listeners
    }
}

impl Drop for HostShell {
    fn drop(&mut self) {
        self.stop();
    }
}
