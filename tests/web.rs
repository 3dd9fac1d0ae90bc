//! Browser tests for the DOM bindings. Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use scroll_motion::animation::{Pose, Props};
use scroll_motion::surface::Surface;
use scroll_motion::{DomSurface, HostShell, SwipeDeck};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

/// Mount `html` in a fresh wrapper and return it
fn fixture(html: &str) -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let wrapper = document.create_element("div").unwrap();
    wrapper.set_inner_html(html);
    document.body().unwrap().append_child(&wrapper).unwrap();
    wrapper.dyn_into::<HtmlElement>().unwrap()
}

fn by_id(id: &str) -> HtmlElement {
    web_sys::window()
        .unwrap()
        .document()
        .unwrap()
        .get_element_by_id(id)
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
}

const DECK: &str = r#"
<div class="swipe-container">
  <div class="swipe-card" id="c0"></div>
  <div class="swipe-card" id="c1"></div>
  <div class="swipe-card" id="c2"></div>
</div>"#;

#[wasm_bindgen_test]
fn dom_surface_writes_pose() {
    let wrapper = fixture(r#"<div id="posed"></div>"#);
    let node = by_id("posed");
    let mut surface = DomSurface::new().unwrap();

    let mut pose = Pose::IDENTITY;
    pose.apply(&Props::new().x(12.0).opacity(0.5).z_index(3));
    surface.apply(&node, &pose);

    let style = node.style();
    assert!(style.get_property_value("transform").unwrap().contains("12px"));
    assert_eq!(style.get_property_value("opacity").unwrap(), "0.5");
    assert_eq!(style.get_property_value("z-index").unwrap(), "3");

    surface.apply(&node, &Pose::IDENTITY);
    assert_eq!(style.get_property_value("z-index").unwrap(), "");
    wrapper.remove();
}

#[wasm_bindgen_test]
fn dom_surface_classes_and_queries() {
    let wrapper = fixture(r#"<ul id="list"><li class="item"></li><li class="item"></li></ul>"#);
    let mut surface = DomSurface::new().unwrap();
    let list = surface.query("#list").unwrap();

    let items = surface.query_all(&list, ".item");
    assert_eq!(items.len(), 2);
    assert_eq!(surface.parent(&items[0]), Some(list.clone()));

    surface.add_class(&items[1], "is-visible");
    assert!(surface.has_class(&items[1], "is-visible"));
    surface.remove_class(&items[1], "is-visible");
    assert!(!surface.has_class(&items[1], "is-visible"));

    surface.hide(&items[0]);
    assert_eq!(items[0].style().get_property_value("display").unwrap(), "none");
    assert!(surface.query("#missing").is_none());
    wrapper.remove();
}

#[wasm_bindgen_test]
fn swipe_deck_without_container_does_not_start() {
    let deck = SwipeDeck::new(Some("container_selector: .nowhere".to_string()), None, None).unwrap();
    assert!(!deck.start());
    assert_eq!(deck.remaining(), 0);
}

#[wasm_bindgen_test]
fn swipe_deck_lays_out_and_swipes() {
    let wrapper = fixture(DECK);
    let deck = SwipeDeck::new(None, None, None).unwrap();
    assert!(deck.start());
    assert_eq!(deck.remaining(), 3);

    assert!(deck.swipe("left").unwrap());
    assert_eq!(deck.remaining(), 2);
    assert!(deck.swipe("sideways").is_err());

    deck.stop();
    wrapper.remove();
}

#[wasm_bindgen_test]
fn bad_options_are_rejected() {
    assert!(SwipeDeck::new(Some("threshold: [".to_string()), None, None).is_err());
    assert!(HostShell::new(Some("smooth_scroll: { lerp: fast }".to_string())).is_err());
}

#[wasm_bindgen_test]
fn host_presets_register_and_clean_up() {
    let wrapper = fixture(
        r#"<section id="s"><p class="r"></p><p class="r"></p><p class="r"></p></section>
           <div id="chips"><span class="chip"></span><span class="chip"></span></div>"#,
    );
    let host = HostShell::new(Some("log_level: debug".to_string())).unwrap();
    let presets = host.presets();

    let paragraphs = wrapper.query_selector_all(".r").unwrap();
    assert_eq!(presets.reveal(&paragraphs, None, None).unwrap(), 3);
    assert_eq!(presets.parallax(&by_id("s"), Some("y: -40".to_string())).unwrap(), 1);

    let chips = wrapper.query_selector_all(".chip").unwrap();
    assert_eq!(presets.chips(&chips, None).unwrap(), 2);

    assert!(presets.reveal(&paragraphs, None, Some("stagger: nope".to_string())).is_err());
    assert_eq!(presets.cleanup(), 4);
    assert_eq!(presets.cleanup(), 0);
    wrapper.remove();
}

#[wasm_bindgen_test]
fn host_attaches_deck() {
    let wrapper = fixture(DECK);
    let host = HostShell::new(None).unwrap();
    let deck = SwipeDeck::new(None, None, None).unwrap();
    assert!(deck.start());

    host.attach(&deck);
    assert_eq!(deck.remaining(), 3);
    assert!(deck.swipe("right").unwrap());
    assert_eq!(deck.remaining(), 2);

    host.stop();
    deck.stop();
    wrapper.remove();
}
