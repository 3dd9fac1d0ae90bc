//! `Surface` over the live DOM

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::animation::Pose;
use crate::error::{MotionError, Result};
use crate::surface::{Bounds, Surface, Viewport};

#[derive(Debug, Clone)]
pub struct DomSurface {
    window: Window,
    document: Document,
    root: HtmlElement,
}

impl DomSurface {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| MotionError::Dom("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| MotionError::Dom("no document".to_string()))?;
        let root = document
            .document_element()
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| MotionError::Dom("no document element".to_string()))?;
        Ok(Self { window, document, root })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn scroll_y(&self) -> f32 {
        self.window.scroll_y().unwrap_or(0.0) as f32
    }
}

impl Surface for DomSurface {
    type Node = HtmlElement;

    fn apply(&mut self, node: &HtmlElement, pose: &Pose) {
        let style = node.style();
        let _ = style.set_property("transform", &pose.css_transform());
        let _ = style.set_property("opacity", &pose.opacity.to_string());
        if pose.z_index == 0 {
            let _ = style.remove_property("z-index");
        } else {
            let _ = style.set_property("z-index", &pose.z_index.to_string());
        }
    }

    fn add_class(&mut self, node: &HtmlElement, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&mut self, node: &HtmlElement, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn has_class(&self, node: &HtmlElement, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn hide(&mut self, node: &HtmlElement) {
        let _ = node.style().set_property("display", "none");
    }

    fn query(&self, selector: &str) -> Option<HtmlElement> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    }

    fn query_all(&self, root: &HtmlElement, selector: &str) -> Vec<HtmlElement> {
        let Ok(list) = root.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|n| n.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn parent(&self, node: &HtmlElement) -> Option<HtmlElement> {
        node.parent_element().and_then(|e| e.dyn_into::<HtmlElement>().ok())
    }

    fn root(&self) -> HtmlElement {
        self.root.clone()
    }

    fn bounds(&self, node: &HtmlElement) -> Bounds {
        if node == &self.root {
            return Bounds::new(0.0, self.root.scroll_height() as f32);
        }
        let rect = node.get_bounding_client_rect();
        Bounds::new(rect.top() as f32 + self.scroll_y(), rect.height() as f32)
    }

    fn viewport(&self) -> Viewport {
        let width = self.window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = self.window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Viewport::new(width as f32, height as f32)
    }
}
