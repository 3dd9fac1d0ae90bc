//! Swipeable card stack
//!
//! Cards are fanned out behind each other; the user drags one away to the
//! left or right, or the page swipes the top card programmatically.

mod controller;
mod layout;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::MotionError;

pub use controller::{Card, DragSession, SwipeCallback, SwipeController};
pub use layout::{apply_layout, rest_opacity, rest_rotation, rest_scale, resting_pose, REST_ROTATIONS};

/// Selectors and threshold for a card stack
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    pub container_selector: String,
    pub card_selector: String,
    /// Horizontal drag distance that must be exceeded to remove a card
    pub threshold: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            container_selector: ".swipe-container".to_string(),
            card_selector: ".swipe-card".to_string(),
            threshold: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1 for left, 1 for right
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    /// Direction of a horizontal drag; zero counts as left
    pub fn from_delta(dx: f32) -> Self {
        if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    }
}

impl FromStr for Direction {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(MotionError::InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Pointer position in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
