//! Browser bindings
//!
//! `HostShell`, `SwipeDeck` and `MotionPresets` are the classes the page
//! uses. They share one `Runtime`: the frame driver over a `DomSurface`
//! plus an outbox of page callbacks that run once the driver is released.

mod deck;
mod frame;
mod host;
mod presets;
mod surface;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, HtmlElement, MouseEvent, NodeList, TouchEvent};

use crate::error::{MotionError, Result};
use crate::scroll::SmoothScrollConfig;
use crate::shell::Shell;
use crate::swipe::Point;

pub use deck::SwipeDeck;
pub use frame::FrameLoop;
pub use host::HostShell;
pub use presets::MotionPresets;
pub use surface::DomSurface;

pub(crate) use frame::Outbox;

pub(crate) struct Runtime {
    pub shell: RefCell<Shell<DomSurface>>,
    pub outbox: Outbox,
}

impl Runtime {
    pub fn new(config: SmoothScrollConfig) -> Result<Rc<Self>> {
        let surface = DomSurface::new()?;
        Ok(Rc::new(Self {
            shell: RefCell::new(Shell::new(surface, config)),
            outbox: Outbox::default(),
        }))
    }
}

pub(crate) fn to_js(err: MotionError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Options from an optional YAML string; missing or blank means defaults
pub(crate) fn parse_options<T: DeserializeOwned + Default>(yaml: Option<String>) -> std::result::Result<T, JsValue> {
    match yaml {
        Some(yaml) if !yaml.trim().is_empty() => serde_yaml::from_str(&yaml).map_err(|e| to_js(e.into())),
        _ => Ok(T::default()),
    }
}

/// Touch events whose finger has already lifted, so only `changedTouches`
/// carries its position
fn released_touch(kind: &str) -> bool {
    matches!(kind, "touchend" | "touchcancel")
}

/// Client position of a mouse or touch event
pub(crate) fn pointer_point(event: &Event) -> Option<Point> {
    if let Some(touch_event) = event.dyn_ref::<TouchEvent>() {
        let touches = if released_touch(&event.type_()) {
            touch_event.changed_touches()
        } else {
            touch_event.touches()
        };
        let touch = touches.get(0)?;
        return Some(Point::new(touch.client_x() as f32, touch.client_y() as f32));
    }
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(Point::new(mouse.client_x() as f32, mouse.client_y() as f32))
}

/// Elements from a single element, an array or a NodeList
pub(crate) fn elements_of(value: &JsValue) -> Vec<HtmlElement> {
    if let Some(element) = value.dyn_ref::<HtmlElement>() {
        return vec![element.clone()];
    }
    if let Some(list) = value.dyn_ref::<NodeList>() {
        return (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|n| n.dyn_into::<HtmlElement>().ok())
            .collect();
    }
    if Array::is_array(value) {
        return Array::from(value)
            .iter()
            .filter_map(|v| v.dyn_into::<HtmlElement>().ok())
            .collect();
    }
    Vec::new()
}
