//! Resting layout of the card stack
//!
//! Card 0 is on top. Deeper cards shrink, fade, fan upward and slightly
//! to the right, and alternate a small tilt from a fixed table.

use crate::animation::{Ease, EaseMode, Motion, Pose, Props, TweenSpec};
use crate::surface::Surface;

/// Tilt in degrees, repeating every six cards
pub const REST_ROTATIONS: [f32; 6] = [2.0, -1.5, 1.0, -0.5, 0.5, -0.3];

const LAYOUT_DURATION: f32 = 0.3;
const MIN_SCALE: f32 = 0.88;
const MIN_OPACITY: f32 = 0.5;
const Y_STEP: f32 = -35.0;
const X_STEP: f32 = 3.0;

pub fn rest_rotation(index: usize) -> f32 {
    REST_ROTATIONS[index % REST_ROTATIONS.len()]
}

pub fn rest_scale(index: usize) -> f32 {
    ((20.0 - index as f32 * 0.6) / 20.0).max(MIN_SCALE)
}

pub fn rest_opacity(index: usize) -> f32 {
    match index {
        0 => 1.0,
        1 => 0.85,
        2 => 0.7,
        i => (1.0 - i as f32 * 0.15).max(MIN_OPACITY),
    }
}

/// Where card `index` of `count` settles
pub fn resting_pose(index: usize, count: usize) -> Pose {
    Pose {
        x: X_STEP * index as f32,
        y: Y_STEP * index as f32,
        scale: rest_scale(index),
        rotation: rest_rotation(index),
        opacity: rest_opacity(index),
        z_index: count.saturating_sub(index) as i32,
        ..Pose::IDENTITY
    }
}

fn resting_props(index: usize, count: usize) -> Props {
    let pose = resting_pose(index, count);
    Props::new()
        .z_index(pose.z_index)
        .scale(pose.scale)
        .y(pose.y)
        .x(pose.x)
        .rotation(pose.rotation)
        .opacity(pose.opacity)
}

/// Animate every card in `stack` (top first) to its resting pose.
/// `held` keeps its slot in the count but is not moved.
pub fn apply_layout<S: Surface>(motion: &mut Motion<S>, stack: &[S::Node], held: Option<&S::Node>) {
    let count = stack.len();
    let spec = TweenSpec::new(LAYOUT_DURATION, Ease::power(2, EaseMode::Out));
    for (index, card) in stack.iter().enumerate() {
        if held == Some(card) {
            continue;
        }
        motion.to(card, resting_props(index, count), spec);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Bounds, HeadlessSurface, Viewport};

    #[test]
    fn test_top_card_pose() {
        let pose = resting_pose(0, 3);
        assert_eq!(pose.z_index, 3);
        assert_eq!(pose.scale, 1.0);
        assert_eq!(pose.x, 0.0);
        assert_eq!(pose.y, 0.0);
        assert_eq!(pose.rotation, 2.0);
        assert_eq!(pose.opacity, 1.0);
    }

    #[test]
    fn test_deeper_cards() {
        let second = resting_pose(1, 3);
        assert_eq!(second.z_index, 2);
        assert!((second.scale - 0.97).abs() < 1e-6);
        assert_eq!(second.y, -35.0);
        assert_eq!(second.x, 3.0);
        assert_eq!(second.rotation, -1.5);
        assert_eq!(second.opacity, 0.85);

        let third = resting_pose(2, 3);
        assert_eq!(third.opacity, 0.7);
        assert_eq!(third.rotation, 1.0);

        assert!((rest_opacity(3) - 0.55).abs() < 1e-6);
        assert_eq!(rest_opacity(4), 0.5);
    }

    #[test]
    fn test_floors_hold_for_any_depth() {
        for count in 0..40 {
            for index in 0..count {
                let pose = resting_pose(index, count);
                assert!(pose.opacity >= 0.5, "opacity at {}", index);
                assert!(pose.scale >= 0.88, "scale at {}", index);
                assert!(pose.z_index >= 1);
            }
        }
    }

    #[test]
    fn test_rotation_period_is_six() {
        for i in 0..60 {
            assert_eq!(rest_rotation(i), rest_rotation(i + 6));
        }
    }

    #[test]
    fn test_layout_is_idempotent() {
        let mut surface = HeadlessSurface::new(Viewport::new(800.0, 600.0));
        let cards: Vec<_> = (0..4)
            .map(|_| surface.add_node(HeadlessSurface::ROOT, &["swipe-card"], Bounds::default()))
            .collect();
        let mut motion = Motion::new(surface);

        apply_layout(&mut motion, &cards, None);
        for _ in 0..40 {
            motion.tick(0.01);
        }
        let first: Vec<Pose> = cards.iter().map(|c| motion.pose(c)).collect();

        apply_layout(&mut motion, &cards, None);
        for _ in 0..40 {
            motion.tick(0.01);
        }
        let second: Vec<Pose> = cards.iter().map(|c| motion.pose(c)).collect();

        assert_eq!(first, second);
        for (index, pose) in first.iter().enumerate() {
            assert_eq!(*pose, resting_pose(index, cards.len()));
        }
    }

    #[test]
    fn test_empty_stack_does_nothing() {
        let surface = HeadlessSurface::new(Viewport::new(800.0, 600.0));
        let mut motion = Motion::new(surface);
        apply_layout(&mut motion, &[], None);
        assert_eq!(motion.tween_count(), 0);
    }

    #[test]
    fn test_held_card_keeps_its_slot() {
        let mut surface = HeadlessSurface::new(Viewport::new(800.0, 600.0));
        let cards: Vec<_> = (0..3)
            .map(|_| surface.add_node(HeadlessSurface::ROOT, &["swipe-card"], Bounds::default()))
            .collect();
        let mut motion = Motion::new(surface);

        apply_layout(&mut motion, &cards, Some(&cards[0]));
        assert_eq!(motion.tween_count(), 2);
        for _ in 0..40 {
            motion.tick(0.01);
        }
        assert_eq!(motion.pose(&cards[0]), Pose::IDENTITY);
        assert_eq!(motion.pose(&cards[2]), resting_pose(2, 3));
    }
}
