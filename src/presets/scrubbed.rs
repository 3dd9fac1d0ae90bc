//! Presets whose progress follows the scroll position

use serde::Deserialize;
use tracing::debug;

use crate::animation::{Ease, EaseMode, Edge, Marker, Motion, ProgressCallback, Props, ScrollTriggerSpec, TriggerId, TweenSpec};
use crate::surface::Surface;

const TOP_TOP: Marker = Marker::new(Edge::TOP, Edge::TOP);
const CENTER_TOP: Marker = Marker::new(Edge::CENTER, Edge::TOP);
const BOTTOM_TOP: Marker = Marker::new(Edge::BOTTOM, Edge::TOP);

/// Hero section parts. Only `container` is required.
#[derive(Debug, Clone)]
pub struct HeroTargets<N> {
    pub container: Option<N>,
    pub background: Option<N>,
    pub runner: Option<N>,
    pub mascot: Option<N>,
    pub title: Option<N>,
    pub subtitle: Option<N>,
}

impl<N> Default for HeroTargets<N> {
    fn default() -> Self {
        Self {
            container: None,
            background: None,
            runner: None,
            mascot: None,
            title: None,
            subtitle: None,
        }
    }
}

/// One scrubbed layer of the hero
struct Layer {
    props: Props,
    ease: Ease,
    end: Marker,
    scrub: f32,
}

/// Layered parallax over the hero container. `on_update` receives the
/// background layer's progress.
pub fn hero_parallax<S: Surface>(
    motion: &mut Motion<S>,
    targets: &HeroTargets<S::Node>,
    on_update: Option<ProgressCallback>,
) -> Vec<TriggerId> {
    let Some(container) = targets.container.as_ref() else {
        return Vec::new();
    };

    let layers = [
        (
            &targets.background,
            Layer {
                props: Props::new().y(-180.0).scale(1.1),
                ease: Ease::None,
                end: BOTTOM_TOP,
                scrub: 0.5,
            },
        ),
        (
            &targets.runner,
            Layer {
                props: Props::new().x(200.0).y(-220.0).rotation(8.0).scale(1.2),
                ease: Ease::power(1, EaseMode::InOut),
                end: BOTTOM_TOP,
                scrub: 0.3,
            },
        ),
        (
            &targets.mascot,
            Layer {
                props: Props::new().x(-150.0).y(-120.0).rotation(-12.0).scale(0.9),
                ease: Ease::power(1, EaseMode::InOut),
                end: BOTTOM_TOP,
                scrub: 0.8,
            },
        ),
        (
            &targets.title,
            Layer {
                props: Props::new().y(100.0).opacity(0.0).scale(0.95),
                ease: Ease::power(2, EaseMode::In),
                end: CENTER_TOP,
                scrub: 0.5,
            },
        ),
        (
            &targets.subtitle,
            Layer {
                props: Props::new().y(80.0).opacity(0.0),
                ease: Ease::power(2, EaseMode::In),
                end: CENTER_TOP,
                scrub: 0.6,
            },
        ),
    ];

    let mut on_update = on_update;
    let mut created = Vec::new();
    for (index, (node, layer)) in layers.into_iter().enumerate() {
        let Some(node) = node.as_ref() else {
            continue;
        };
        let mut trigger = ScrollTriggerSpec::new(container.clone())
            .start(TOP_TOP)
            .end(layer.end)
            .scrub(layer.scrub);
        // the background layer reports progress
        if index == 0 {
            trigger.on_update = on_update.take();
        }
        created.push(motion.to_on_scroll(
            std::slice::from_ref(node),
            layer.props,
            TweenSpec::new(1.0, layer.ease),
            0.0,
            trigger,
        ));
    }
    debug!(layers = created.len(), "hero parallax bound");
    created
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParallaxOptions {
    pub y: f32,
    pub x: f32,
    pub scrub: f32,
    pub start: Marker,
    pub end: Marker,
}

impl Default for ParallaxOptions {
    fn default() -> Self {
        Self {
            y: -20.0,
            x: 0.0,
            scrub: 1.0,
            start: Marker::new(Edge::TOP, Edge::BOTTOM),
            end: BOTTOM_TOP,
        }
    }
}

/// Drift each element while it crosses the viewport
pub fn parallax<S: Surface>(motion: &mut Motion<S>, elements: &[S::Node], options: &ParallaxOptions) -> Vec<TriggerId> {
    elements
        .iter()
        .map(|element| {
            let trigger = ScrollTriggerSpec::new(element.clone())
                .start(options.start)
                .end(options.end)
                .scrub(options.scrub);
            motion.to_on_scroll(
                std::slice::from_ref(element),
                Props::new().y(options.y).x(options.x),
                TweenSpec::new(1.0, Ease::None),
                0.0,
                trigger,
            )
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollProgressOptions {
    pub start: Marker,
    pub end: Marker,
}

impl Default for ScrollProgressOptions {
    fn default() -> Self {
        Self {
            start: TOP_TOP,
            end: Marker::new(Edge::BOTTOM, Edge::BOTTOM),
        }
    }
}

/// Report overall page progress in [0, 1]. The trigger defaults to the
/// document root.
pub fn scroll_progress<S: Surface>(
    motion: &mut Motion<S>,
    on_update: impl FnMut(f32) + 'static,
    trigger: Option<&S::Node>,
    options: &ScrollProgressOptions,
) -> TriggerId {
    let element = trigger.cloned().unwrap_or_else(|| motion.surface().root());
    let spec = ScrollTriggerSpec::new(element)
        .start(options.start)
        .end(options.end)
        .on_update(on_update);
    motion.create_trigger(spec)
}
