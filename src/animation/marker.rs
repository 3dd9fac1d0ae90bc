//! Scroll trigger start/end markers
//!
//! A marker such as `"top 90%"` means "when the element's top edge meets
//! the line 90% down the viewport".

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::MotionError;
use crate::surface::Bounds;

/// A line across an element or the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    /// Fraction of the size: top = 0, center = 0.5, bottom = 1
    Ratio(f32),
    /// Fixed offset from the top
    Pixels(f32),
}

impl Edge {
    pub const TOP: Edge = Edge::Ratio(0.0);
    pub const CENTER: Edge = Edge::Ratio(0.5);
    pub const BOTTOM: Edge = Edge::Ratio(1.0);

    pub fn resolve(&self, size: f32) -> f32 {
        match *self {
            Edge::Ratio(r) => r * size,
            Edge::Pixels(px) => px,
        }
    }
}

impl FromStr for Edge {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MotionError::InvalidMarker(s.to_string());
        match s {
            "top" => Ok(Edge::TOP),
            "center" => Ok(Edge::CENTER),
            "bottom" => Ok(Edge::BOTTOM),
            _ => {
                if let Some(pct) = s.strip_suffix('%') {
                    pct.parse::<f32>()
                        .map(|p| Edge::Ratio(p / 100.0))
                        .map_err(|_| invalid())
                } else {
                    s.strip_suffix("px")
                        .unwrap_or(s)
                        .parse::<f32>()
                        .map(Edge::Pixels)
                        .map_err(|_| invalid())
                }
            }
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Edge::Ratio(r) if r == 0.0 => write!(f, "top"),
            Edge::Ratio(r) if r == 0.5 => write!(f, "center"),
            Edge::Ratio(r) if r == 1.0 => write!(f, "bottom"),
            Edge::Ratio(r) => write!(f, "{}%", r * 100.0),
            Edge::Pixels(px) => write!(f, "{}px", px),
        }
    }
}

/// Element edge paired with a viewport edge
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Marker {
    pub element: Edge,
    pub viewport: Edge,
}

impl Marker {
    pub const fn new(element: Edge, viewport: Edge) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which the two edges line up
    pub fn position(&self, bounds: Bounds, viewport_height: f32) -> f32 {
        bounds.top + self.element.resolve(bounds.height) - self.viewport.resolve(viewport_height)
    }
}

impl FromStr for Marker {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(element), Some(viewport), None) => Ok(Marker {
                element: element.parse()?,
                viewport: viewport.parse()?,
            }),
            _ => Err(MotionError::InvalidMarker(s.to_string())),
        }
    }
}

impl TryFrom<String> for Marker {
    type Error = MotionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords() {
        let m: Marker = "top top".parse().unwrap();
        assert_eq!(m, Marker::new(Edge::TOP, Edge::TOP));
        let m: Marker = "center top".parse().unwrap();
        assert_eq!(m.element, Edge::CENTER);
        let m: Marker = "bottom bottom".parse().unwrap();
        assert_eq!(m.viewport, Edge::BOTTOM);
    }

    #[test]
    fn test_parse_percent_and_pixels() {
        let m: Marker = "top 90%".parse().unwrap();
        assert_eq!(m.viewport, Edge::Ratio(0.9));
        let m: Marker = "20px 100px".parse().unwrap();
        assert_eq!(m, Marker::new(Edge::Pixels(20.0), Edge::Pixels(100.0)));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("top".parse::<Marker>().is_err());
        assert!("top middle".parse::<Marker>().is_err());
        assert!("top top top".parse::<Marker>().is_err());
    }

    #[test]
    fn test_position() {
        let bounds = Bounds::new(2000.0, 400.0);
        let vh = 1000.0;
        // element top reaches 90% down the viewport
        let start: Marker = "top 90%".parse().unwrap();
        assert!((start.position(bounds, vh) - 1100.0).abs() < 1e-3);
        // element bottom passes the viewport top
        let end: Marker = "bottom top".parse().unwrap();
        assert!((end.position(bounds, vh) - 2400.0).abs() < 1e-3);
    }

    #[test]
    fn test_display() {
        let m: Marker = "center 85%".parse().unwrap();
        assert_eq!(m.to_string(), "center 85%");
    }
}
