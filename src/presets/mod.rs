//! Ready-made scroll animations
//!
//! Each preset registers tweens and scroll triggers on a `Motion` and
//! returns what it created. Missing or empty targets are silently skipped.
//! Option structs deserialize from YAML; absent keys keep their defaults.

mod entrance;
mod scrubbed;

use tracing::debug;

use crate::animation::{Marker, Motion, ScrollTriggerSpec};
use crate::surface::Surface;

pub use entrance::{
    buttons, card_stagger, chips, list_items, panel_header, reveal, ring, timeline_items, ButtonOptions,
    CardStaggerOptions, ChipOptions, ListItemOptions, PanelHeaderOptions, RevealOptions, RingOptions,
    TimelineOptions, PANEL_EYEBROW, PANEL_PERIOD, PANEL_TITLE, REVEAL_CLASS,
};
pub use scrubbed::{hero_parallax, parallax, scroll_progress, HeroTargets, ParallaxOptions, ScrollProgressOptions};

/// Trigger that plays its tweens when `start` is reached
fn entrance_trigger<N>(trigger: N, start: Marker, once: bool) -> ScrollTriggerSpec<N> {
    ScrollTriggerSpec::new(trigger).start(start).once(once)
}

/// Trigger element for a group: the explicit one, else the first member's parent
fn group_trigger<S: Surface>(motion: &Motion<S>, members: &[S::Node], explicit: Option<&S::Node>) -> Option<S::Node> {
    if let Some(trigger) = explicit {
        return Some(trigger.clone());
    }
    let first = members.first()?;
    Some(motion.surface().parent(first).unwrap_or_else(|| first.clone()))
}

/// Dispose every scroll binding; returns how many there were
pub fn cleanup<S: Surface>(motion: &mut Motion<S>) -> usize {
    let killed = motion.kill_all_triggers();
    debug!(killed, "presets cleaned up");
    killed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Bounds, HeadlessSurface, Viewport};

    #[test]
    fn test_group_trigger_prefers_explicit_then_parent() {
        let mut surface = HeadlessSurface::new(Viewport::new(800.0, 600.0));
        let list = surface.add_node(HeadlessSurface::ROOT, &["list"], Bounds::default());
        let item = surface.add_node(list, &["item"], Bounds::default());
        let other = surface.add_node(HeadlessSurface::ROOT, &["other"], Bounds::default());
        let motion = Motion::new(surface);

        assert_eq!(group_trigger(&motion, &[item], None), Some(list));
        assert_eq!(group_trigger(&motion, &[item], Some(&other)), Some(other));
        assert_eq!(group_trigger(&motion, &[], None), None);
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let mut surface = HeadlessSurface::new(Viewport::new(800.0, 600.0));
        let node = surface.add_node(HeadlessSurface::ROOT, &["box"], Bounds::new(1000.0, 100.0));
        let mut motion = Motion::new(surface);
        reveal(&mut motion, &[node], None, &RevealOptions::default());
        parallax(&mut motion, &[node], &ParallaxOptions::default());
        assert_eq!(cleanup(&mut motion), 2);
        assert_eq!(cleanup(&mut motion), 0);
    }
}
