//! Entrance presets: elements animate in once scrolling reaches them

use serde::Deserialize;
use tracing::debug;

use super::{entrance_trigger, group_trigger};
use crate::animation::{Ease, EaseMode, Edge, Marker, Motion, Props, TriggerId, TweenId, TweenSpec};
use crate::surface::Surface;

/// Class `reveal` keeps on its elements while they are in range
pub const REVEAL_CLASS: &str = "is-visible";
pub const PANEL_EYEBROW: &str = ".panel__eyebrow";
pub const PANEL_TITLE: &str = ".panel__title";
pub const PANEL_PERIOD: &str = ".panel__period";

/// `top N%`
fn top_at(percent: f32) -> Marker {
    Marker::new(Edge::TOP, Edge::Ratio(percent / 100.0))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealOptions {
    pub from: Props,
    pub to: Props,
    pub duration: f32,
    pub stagger: f32,
    pub ease: Ease,
    pub start: Marker,
    pub once: bool,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            from: Props::new().opacity(0.0).y(100.0).scale(0.9).rotation_x(20.0),
            to: Props::new().opacity(1.0).y(0.0).scale(1.0).rotation_x(0.0),
            duration: 0.6,
            stagger: 0.05,
            ease: Ease::power(4, EaseMode::Out),
            start: top_at(90.0),
            once: true,
        }
    }
}

/// Fade each element in when it scrolls into view, tagging it `is-visible`.
/// Every element gets its own trigger; `stagger` becomes a per-index delay.
pub fn reveal<S: Surface>(
    motion: &mut Motion<S>,
    elements: &[S::Node],
    trigger: Option<&S::Node>,
    options: &RevealOptions,
) -> Vec<TriggerId> {
    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            let spec = TweenSpec::new(options.duration, options.ease).delay(index as f32 * options.stagger);
            let trigger = entrance_trigger(trigger.unwrap_or(element).clone(), options.start, options.once)
                .toggle_class(REVEAL_CLASS);
            motion.from_to_on_scroll(std::slice::from_ref(element), options.from, options.to, spec, 0.0, trigger)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CardStaggerOptions {
    pub from: Props,
    pub to: Props,
    pub duration: f32,
    pub stagger: f32,
    pub ease: Ease,
    pub start: Marker,
    pub once: bool,
}

impl Default for CardStaggerOptions {
    fn default() -> Self {
        Self {
            from: Props::new().opacity(0.0).y(120.0).scale(0.85).rotation_y(-30.0).z(-100.0),
            to: Props::new().opacity(1.0).y(0.0).scale(1.0).rotation_y(0.0).z(0.0),
            duration: 0.7,
            stagger: 0.12,
            ease: Ease::power(4, EaseMode::Out),
            start: top_at(85.0),
            once: true,
        }
    }
}

/// Bring a card grid in one after another under a single trigger
pub fn card_stagger<S: Surface>(
    motion: &mut Motion<S>,
    cards: &[S::Node],
    trigger: Option<&S::Node>,
    options: &CardStaggerOptions,
) -> Option<TriggerId> {
    let trigger = group_trigger(motion, cards, trigger)?;
    let spec = TweenSpec::new(options.duration, options.ease);
    let id = motion.from_to_on_scroll(
        cards,
        options.from,
        options.to,
        spec,
        options.stagger,
        entrance_trigger(trigger, options.start, options.once),
    );
    debug!(cards = cards.len(), "card stagger bound");
    Some(id)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimelineOptions {
    pub from: Props,
    pub to: Props,
    pub duration: f32,
    pub stagger: f32,
    pub ease: Ease,
    pub start: Marker,
    pub once: bool,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            from: Props::new().scale(0.5).opacity(0.0).y(50.0).rotation(-180.0),
            to: Props::new().scale(1.0).opacity(1.0).y(0.0).rotation(0.0),
            duration: 0.5,
            stagger: 0.06,
            ease: Ease::back_out(2.5),
            start: top_at(92.0),
            once: true,
        }
    }
}

/// Spin timeline markers in, each on its own trigger
pub fn timeline_items<S: Surface>(motion: &mut Motion<S>, items: &[S::Node], options: &TimelineOptions) -> Vec<TriggerId> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let spec = TweenSpec::new(options.duration, options.ease).delay(index as f32 * options.stagger);
            let trigger = entrance_trigger(item.clone(), options.start, options.once);
            motion.from_to_on_scroll(std::slice::from_ref(item), options.from, options.to, spec, 0.0, trigger)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListItemOptions {
    pub from: Props,
    pub to: Props,
    pub duration: f32,
    pub stagger: f32,
    pub ease: Ease,
    pub start: Marker,
    pub once: bool,
}

impl Default for ListItemOptions {
    fn default() -> Self {
        Self {
            from: Props::new().opacity(0.0).x(-40.0),
            to: Props::new().opacity(1.0).x(0.0),
            duration: 0.5,
            stagger: 0.08,
            ease: Ease::power(2, EaseMode::Out),
            start: top_at(85.0),
            once: true,
        }
    }
}

/// Slide list rows in from the left under a single trigger
pub fn list_items<S: Surface>(
    motion: &mut Motion<S>,
    items: &[S::Node],
    trigger: Option<&S::Node>,
    options: &ListItemOptions,
) -> Option<TriggerId> {
    let trigger = group_trigger(motion, items, trigger)?;
    Some(motion.from_to_on_scroll(
        items,
        options.from,
        options.to,
        TweenSpec::new(options.duration, options.ease),
        options.stagger,
        entrance_trigger(trigger, options.start, options.once),
    ))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ButtonOptions {
    pub from: Props,
    pub to: Props,
    pub duration: f32,
    pub stagger: f32,
    pub ease: Ease,
    pub start: Marker,
    pub once: bool,
}

impl Default for ButtonOptions {
    fn default() -> Self {
        Self {
            from: Props::new().scale(0.8).opacity(0.0).y(30.0),
            to: Props::new().scale(1.0).opacity(1.0).y(0.0),
            duration: 0.5,
            stagger: 0.1,
            ease: Ease::back_out(3.0),
            start: top_at(95.0),
            once: true,
        }
    }
}

/// Pop buttons in, each on its own trigger
pub fn buttons<S: Surface>(motion: &mut Motion<S>, buttons: &[S::Node], options: &ButtonOptions) -> Vec<TriggerId> {
    buttons
        .iter()
        .enumerate()
        .map(|(index, button)| {
            let spec = TweenSpec::new(options.duration, options.ease).delay(index as f32 * options.stagger);
            let trigger = entrance_trigger(button.clone(), options.start, options.once);
            motion.from_to_on_scroll(std::slice::from_ref(button), options.from, options.to, spec, 0.0, trigger)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChipOptions {
    pub from: Props,
    pub to: Props,
    pub duration: f32,
    pub stagger: f32,
    pub ease: Ease,
    pub delay: f32,
}

impl Default for ChipOptions {
    fn default() -> Self {
        Self {
            from: Props::new().scale(0.0).opacity(0.0).rotation(180.0),
            to: Props::new().scale(1.0).opacity(1.0).rotation(0.0),
            duration: 0.6,
            stagger: 0.08,
            ease: Ease::back_out(2.5),
            delay: 0.3,
        }
    }
}

/// Spin chips in right away; no scroll trigger
pub fn chips<S: Surface>(motion: &mut Motion<S>, chips: &[S::Node], options: &ChipOptions) -> Vec<TweenId> {
    chips
        .iter()
        .enumerate()
        .map(|(index, chip)| {
            let spec = TweenSpec::new(options.duration, options.ease)
                .delay(options.delay + index as f32 * options.stagger);
            motion.from_to(chip, options.from, options.to, spec)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PanelHeaderOptions {
    pub start: Marker,
    pub once: bool,
}

impl Default for PanelHeaderOptions {
    fn default() -> Self {
        Self {
            start: top_at(85.0),
            once: true,
        }
    }
}

/// Animate the eyebrow, title and period found inside `header`, all
/// triggered by the header itself
pub fn panel_header<S: Surface>(
    motion: &mut Motion<S>,
    header: Option<&S::Node>,
    options: &PanelHeaderOptions,
) -> Vec<TriggerId> {
    let Some(header) = header else {
        return Vec::new();
    };

    let parts = [
        (
            PANEL_EYEBROW,
            Props::new().opacity(0.0).x(-50.0),
            Props::new().opacity(1.0).x(0.0),
            TweenSpec::new(0.5, Ease::power(3, EaseMode::Out)),
        ),
        (
            PANEL_TITLE,
            Props::new().opacity(0.0).y(30.0).scale(0.95),
            Props::new().opacity(1.0).y(0.0).scale(1.0),
            TweenSpec::new(0.6, Ease::power(3, EaseMode::Out)).delay(0.1),
        ),
        (
            PANEL_PERIOD,
            Props::new().opacity(0.0).x(-30.0),
            Props::new().opacity(1.0).x(0.0),
            TweenSpec::new(0.5, Ease::power(2, EaseMode::Out)).delay(0.2),
        ),
    ];

    let mut created = Vec::new();
    for (selector, from, to, spec) in parts {
        let Some(part) = motion.surface().query_all(header, selector).into_iter().next() else {
            continue;
        };
        let trigger = entrance_trigger(header.clone(), options.start, options.once);
        created.push(motion.from_to_on_scroll(&[part], from, to, spec, 0.0, trigger));
    }
    created
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RingOptions {
    pub from: Props,
    pub to: Props,
    pub duration: f32,
    pub ease: Ease,
    pub start: Marker,
    pub once: bool,
}

impl Default for RingOptions {
    fn default() -> Self {
        Self {
            from: Props::new().scale(0.3).rotation(-360.0).opacity(0.0).y(50.0),
            to: Props::new().scale(1.0).rotation(0.0).opacity(1.0).y(0.0),
            duration: 1.0,
            ease: Ease::elastic_out(1.0, 0.5),
            start: top_at(75.0),
            once: true,
        }
    }
}

/// Spin a ring in with an elastic settle
pub fn ring<S: Surface>(
    motion: &mut Motion<S>,
    ring: Option<&S::Node>,
    trigger: Option<&S::Node>,
    options: &RingOptions,
) -> Option<TriggerId> {
    let ring = ring?;
    let trigger = entrance_trigger(trigger.unwrap_or(ring).clone(), options.start, options.once);
    Some(motion.from_to_on_scroll(
        std::slice::from_ref(ring),
        options.from,
        options.to,
        TweenSpec::new(options.duration, options.ease),
        0.0,
        trigger,
    ))
}
