//! Output surface for animated nodes
//!
//! `Motion` and the swipe controller never touch the DOM directly; they
//! write through a `Surface`. The browser build uses `web::DomSurface`,
//! native hosts and tests use `HeadlessSurface`.

use std::fmt;

use crate::animation::Pose;

/// Vertical extent of a node in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub top: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }
}

/// Visible area of the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

pub trait Surface {
    type Node: Clone + PartialEq + fmt::Debug;

    /// Write a resolved pose to the node
    fn apply(&mut self, node: &Self::Node, pose: &Pose);

    fn add_class(&mut self, node: &Self::Node, class: &str);

    fn remove_class(&mut self, node: &Self::Node, class: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Take the node out of layout entirely
    fn hide(&mut self, node: &Self::Node);

    /// First node in the document matching `selector`
    fn query(&self, selector: &str) -> Option<Self::Node>;

    /// Descendants of `root` matching `selector`, in document order
    fn query_all(&self, root: &Self::Node, selector: &str) -> Vec<Self::Node>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// The scrolling document itself
    fn root(&self) -> Self::Node;

    fn bounds(&self, node: &Self::Node) -> Bounds;

    fn viewport(&self) -> Viewport;
}

/// Handle into a `HeadlessSurface`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
struct HeadlessNode {
    parent: Option<NodeId>,
    classes: Vec<String>,
    bounds: Bounds,
    pose: Pose,
    hidden: bool,
    writes: usize,
}

/// In-memory node tree with class-selector queries
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    nodes: Vec<HeadlessNode>,
    viewport: Viewport,
}

impl HeadlessSurface {
    pub const ROOT: NodeId = NodeId(0);

    pub fn new(viewport: Viewport) -> Self {
        let root = HeadlessNode {
            parent: None,
            classes: Vec::new(),
            bounds: Bounds::new(0.0, viewport.height),
            pose: Pose::IDENTITY,
            hidden: false,
            writes: 0,
        };
        Self {
            nodes: vec![root],
            viewport,
        }
    }

    pub fn add_node(&mut self, parent: NodeId, classes: &[&str], bounds: Bounds) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(HeadlessNode {
            parent: Some(parent),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            bounds,
            pose: Pose::IDENTITY,
            hidden: false,
            writes: 0,
        });
        id
    }

    pub fn set_bounds(&mut self, node: NodeId, bounds: Bounds) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.bounds = bounds;
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Last pose written to the node
    pub fn pose(&self, node: NodeId) -> Pose {
        self.nodes.get(node.0).map(|n| n.pose).unwrap_or_default()
    }

    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.nodes.get(node.0).map(|n| n.hidden).unwrap_or(false)
    }

    /// Number of pose writes the node has received
    pub fn write_count(&self, node: NodeId) -> usize {
        self.nodes.get(node.0).map(|n| n.writes).unwrap_or(0)
    }

    fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.nodes.get(node.0).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id.0).and_then(|n| n.parent);
        }
        false
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        let Some(n) = self.nodes.get(node.0) else {
            return false;
        };
        let wanted: Vec<&str> = selector
            .trim()
            .split('.')
            .filter(|c| !c.is_empty())
            .collect();
        !wanted.is_empty() && wanted.iter().all(|c| n.classes.iter().any(|have| have == c))
    }
}

impl Surface for HeadlessSurface {
    type Node = NodeId;

    fn apply(&mut self, node: &NodeId, pose: &Pose) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.pose = *pose;
            n.writes += 1;
        }
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.classes.retain(|c| c != class);
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes
            .get(node.0)
            .map(|n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn hide(&mut self, node: &NodeId) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.hidden = true;
        }
    }

    fn query(&self, selector: &str) -> Option<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .find(|&id| self.matches(id, selector))
    }

    fn query_all(&self, root: &NodeId, selector: &str) -> Vec<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|&id| self.is_descendant(id, *root) && self.matches(id, selector))
            .collect()
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    fn root(&self) -> NodeId {
        Self::ROOT
    }

    fn bounds(&self, node: &NodeId) -> Bounds {
        self.nodes.get(node.0).map(|n| n.bounds).unwrap_or_default()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> HeadlessSurface {
        HeadlessSurface::new(Viewport::new(1000.0, 800.0))
    }

    #[test]
    fn test_query_by_class() {
        let mut s = surface();
        let container = s.add_node(HeadlessSurface::ROOT, &["swipe-container"], Bounds::default());
        let a = s.add_node(container, &["swipe-card"], Bounds::default());
        let b = s.add_node(container, &["swipe-card", "featured"], Bounds::default());
        let _outside = s.add_node(HeadlessSurface::ROOT, &["swipe-card"], Bounds::default());

        assert_eq!(s.query(".swipe-container"), Some(container));
        assert_eq!(s.query_all(&container, ".swipe-card"), vec![a, b]);
        assert_eq!(s.query_all(&container, ".swipe-card.featured"), vec![b]);
        assert!(s.query(".missing").is_none());
    }

    #[test]
    fn test_class_toggling() {
        let mut s = surface();
        let node = s.add_node(HeadlessSurface::ROOT, &[], Bounds::default());
        s.add_class(&node, "moving");
        s.add_class(&node, "moving");
        assert!(s.has_class(&node, "moving"));
        s.remove_class(&node, "moving");
        assert!(!s.has_class(&node, "moving"));
    }

    #[test]
    fn test_apply_records_pose() {
        let mut s = surface();
        let node = s.add_node(HeadlessSurface::ROOT, &[], Bounds::default());
        let pose = Pose {
            x: 12.0,
            ..Pose::IDENTITY
        };
        s.apply(&node, &pose);
        assert_eq!(s.pose(node).x, 12.0);
        assert_eq!(s.write_count(node), 1);
    }

    #[test]
    fn test_parent_and_hide() {
        let mut s = surface();
        let parent = s.add_node(HeadlessSurface::ROOT, &["list"], Bounds::default());
        let child = s.add_node(parent, &["item"], Bounds::default());
        assert_eq!(s.parent(&child), Some(parent));
        s.hide(&child);
        assert!(s.is_hidden(child));
    }
}
