//! `MotionPresets`: the preset library for page scripts
//!
//! Element arguments accept a single element, an array or a NodeList.
//! Options are YAML strings; omitted keys keep their defaults.

use std::rc::Rc;

use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use super::{elements_of, parse_options, DomSurface, Runtime};
use crate::animation::{Motion, ProgressCallback};
use crate::presets::{self, HeroTargets};

/// Element stored under `key` on a plain object
fn element_at(targets: &JsValue, key: &str) -> Option<HtmlElement> {
    Reflect::get(targets, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.dyn_into::<HtmlElement>().ok())
}

#[wasm_bindgen]
pub struct MotionPresets {
    runtime: Rc<Runtime>,
}

impl MotionPresets {
    pub(crate) fn new(runtime: Rc<Runtime>) -> Self {
        Self { runtime }
    }

    fn progress_sink(&self, callback: Function) -> impl FnMut(f32) + 'static {
        let outbox = self.runtime.outbox.clone();
        move |progress| outbox.call(&callback, JsValue::from_f64(progress as f64))
    }

    /// Run `build` against the engine, then deliver any callbacks the new
    /// triggers fired on creation
    fn with_motion<R>(&self, build: impl FnOnce(&mut Motion<DomSurface>) -> R) -> R {
        let result = {
            let mut shell = self.runtime.shell.borrow_mut();
            build(shell.motion_mut())
        };
        self.runtime.outbox.flush();
        result
    }
}

#[wasm_bindgen]
impl MotionPresets {
    /// `targets` is an object with `container` and optional `background`,
    /// `runner`, `mascot`, `title`, `subtitle` elements
    pub fn hero_parallax(&self, targets: &JsValue, on_update: Option<Function>) -> usize {
        let targets = HeroTargets {
            container: element_at(targets, "container"),
            background: element_at(targets, "background"),
            runner: element_at(targets, "runner"),
            mascot: element_at(targets, "mascot"),
            title: element_at(targets, "title"),
            subtitle: element_at(targets, "subtitle"),
        };
        let on_update = on_update.map(|f| Box::new(self.progress_sink(f)) as ProgressCallback);
        self.with_motion(|motion| presets::hero_parallax(motion, &targets, on_update).len())
    }

    pub fn reveal(&self, elements: &JsValue, trigger: Option<HtmlElement>, options: Option<String>) -> Result<usize, JsValue> {
        let options = parse_options(options)?;
        Ok(self.with_motion(|motion| presets::reveal(motion, &elements_of(elements), trigger.as_ref(), &options).len()))
    }

    pub fn card_stagger(&self, cards: &JsValue, trigger: Option<HtmlElement>, options: Option<String>) -> Result<bool, JsValue> {
        let options = parse_options(options)?;
        Ok(self.with_motion(|motion| presets::card_stagger(motion, &elements_of(cards), trigger.as_ref(), &options).is_some()))
    }

    pub fn parallax(&self, elements: &JsValue, options: Option<String>) -> Result<usize, JsValue> {
        let options = parse_options(options)?;
        Ok(self.with_motion(|motion| presets::parallax(motion, &elements_of(elements), &options).len()))
    }

    pub fn timeline_items(&self, items: &JsValue, options: Option<String>) -> Result<usize, JsValue> {
        let options = parse_options(options)?;
        Ok(self.with_motion(|motion| presets::timeline_items(motion, &elements_of(items), &options).len()))
    }

    pub fn list_items(&self, items: &JsValue, trigger: Option<HtmlElement>, options: Option<String>) -> Result<bool, JsValue> {
        let options = parse_options(options)?;
        Ok(self.with_motion(|motion| presets::list_items(motion, &elements_of(items), trigger.as_ref(), &options).is_some()))
    }

    pub fn buttons(&self, buttons: &JsValue, options: Option<String>) -> Result<usize, JsValue> {
        let options = parse_options(options)?;
        Ok(self.with_motion(|motion| presets::buttons(motion, &elements_of(buttons), &options).len()))
    }

    pub fn chips(&self, chips: &JsValue, options: Option<String>) -> Result<usize, JsValue> {
        let options = parse_options(options)?;
        Ok(self.with_motion(|motion| presets::chips(motion, &elements_of(chips), &options).len()))
    }

    pub fn panel_header(&self, header: Option<HtmlElement>, options: Option<String>) -> Result<usize, JsValue> {
        let options = parse_options(options)?;
        Ok(self.with_motion(|motion| presets::panel_header(motion, header.as_ref(), &options).len()))
    }

    pub fn ring(&self, ring: Option<HtmlElement>, trigger: Option<HtmlElement>, options: Option<String>) -> Result<bool, JsValue> {
        let options = parse_options(options)?;
        Ok(self.with_motion(|motion| presets::ring(motion, ring.as_ref(), trigger.as_ref(), &options).is_some()))
    }

    /// `on_update` receives page progress in [0, 1]
    pub fn scroll_progress(&self, on_update: Function, trigger: Option<HtmlElement>, options: Option<String>) -> Result<(), JsValue> {
        let options = parse_options(options)?;
        let sink = self.progress_sink(on_update);
        self.with_motion(|motion| presets::scroll_progress(motion, sink, trigger.as_ref(), &options));
        Ok(())
    }

    /// Kill every scroll binding; returns how many there were
    pub fn cleanup(&self) -> usize {
        self.with_motion(presets::cleanup)
    }

    /// Re-measure every trigger after the layout changed
    pub fn refresh(&self) {
        self.with_motion(|motion| motion.refresh());
    }
}
