//! Resize and connect handles carried by every node.
//!
//! Handles are never stored. Their position is derived from the owner's
//! centre and size whenever they are drawn or hit tested, so a resize moves
//! them without any bookkeeping.

use super::node::{MindMapNode, NodeId};
use crate::app::domain::geometry::Point;

/// Drawn edge length of a handle square.
pub const HANDLE_SIZE: f64 = 8.0;
pub const HANDLE_RADIUS: f64 = HANDLE_SIZE / 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleRole {
    Resize,
    Connect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlePosition {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
    Top,
    Right,
    Bottom,
    Left,
}

impl HandlePosition {
    pub const RESIZE: [HandlePosition; 4] = [
        HandlePosition::TopLeft,
        HandlePosition::TopRight,
        HandlePosition::BottomRight,
        HandlePosition::BottomLeft,
    ];

    pub const CONNECT: [HandlePosition; 4] = [
        HandlePosition::Top,
        HandlePosition::Right,
        HandlePosition::Bottom,
        HandlePosition::Left,
    ];

    pub fn role(self) -> HandleRole {
        match self {
            HandlePosition::TopLeft
            | HandlePosition::TopRight
            | HandlePosition::BottomRight
            | HandlePosition::BottomLeft => HandleRole::Resize,
            HandlePosition::Top | HandlePosition::Right | HandlePosition::Bottom | HandlePosition::Left => {
                HandleRole::Connect
            }
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            HandlePosition::TopLeft => "top_left",
            HandlePosition::TopRight => "top_right",
            HandlePosition::BottomRight => "bottom_right",
            HandlePosition::BottomLeft => "bottom_left",
            HandlePosition::Top => "top",
            HandlePosition::Right => "right",
            HandlePosition::Bottom => "bottom",
            HandlePosition::Left => "left",
        }
    }

    /// Offset from the owner's centre for an owner of size `w` x `h`.
    pub fn offset(self, w: f64, h: f64) -> (f64, f64) {
        let (hw, hh) = (w / 2.0, h / 2.0);
        match self {
            HandlePosition::TopLeft => (-hw, -hh),
            HandlePosition::TopRight => (hw, -hh),
            HandlePosition::BottomRight => (hw, hh),
            HandlePosition::BottomLeft => (-hw, hh),
            HandlePosition::Top => (0.0, -hh),
            HandlePosition::Right => (hw, 0.0),
            HandlePosition::Bottom => (0.0, hh),
            HandlePosition::Left => (-hw, 0.0),
        }
    }

    /// Sign applied to the pointer delta when resizing from this corner.
    /// `None` for connect handles.
    pub fn resize_signs(self) -> Option<(f64, f64)> {
        match self {
            HandlePosition::TopLeft => Some((-1.0, -1.0)),
            HandlePosition::TopRight => Some((1.0, -1.0)),
            HandlePosition::BottomRight => Some((1.0, 1.0)),
            HandlePosition::BottomLeft => Some((-1.0, 1.0)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionPoint {
    pub owner: NodeId,
    pub position: HandlePosition,
}

impl InteractionPoint {
    pub fn role(&self) -> HandleRole {
        self.position.role()
    }

    pub fn center(&self, owner: &MindMapNode) -> Point {
        let (dx, dy) = self.position.offset(owner.width, owner.height);
        Point::new(owner.pos.x + dx, owner.pos.y + dy)
    }

    pub fn contains(&self, owner: &MindMapNode, p: Point) -> bool {
        let c = self.center(owner);
        (p.x - c.x).abs() <= HANDLE_RADIUS && (p.y - c.y).abs() <= HANDLE_RADIUS
    }
}

/// All eight handles of a node, resize corners first.
pub fn handles_for(node: &MindMapNode) -> impl Iterator<Item = InteractionPoint> + '_ {
    HandlePosition::RESIZE
        .into_iter()
        .chain(HandlePosition::CONNECT)
        .map(move |position| InteractionPoint {
            owner: node.id,
            position,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::mindmap::node::ShapeKind;

    #[test]
    fn test_handle_positions_follow_size() {
        let mut node = MindMapNode::new(NodeId(1), "n", Point::new(0.0, 0.0), 120.0, 80.0, ShapeKind::Rect);
        let corner = InteractionPoint {
            owner: node.id,
            position: HandlePosition::BottomRight,
        };
        assert_eq!(corner.center(&node), Point::new(60.0, 40.0));

        node.width = 200.0;
        node.height = 100.0;
        assert_eq!(corner.center(&node), Point::new(100.0, 50.0));

        let left = InteractionPoint {
            owner: node.id,
            position: HandlePosition::Left,
        };
        assert_eq!(left.center(&node), Point::new(-100.0, 0.0));
        assert!(left.contains(&node, Point::new(-97.0, 3.0)));
        assert!(!left.contains(&node, Point::new(-90.0, 0.0)));
    }

    #[test]
    fn test_roles_and_tags() {
        let node = MindMapNode::new(NodeId(3), "n", Point::default(), 120.0, 80.0, ShapeKind::Ellipse);
        let handles: Vec<_> = handles_for(&node).collect();
        assert_eq!(handles.len(), 8);
        assert_eq!(handles.iter().filter(|h| h.role() == HandleRole::Resize).count(), 4);
        assert_eq!(HandlePosition::TopLeft.tag(), "top_left");
        assert_eq!(HandlePosition::Bottom.tag(), "bottom");
        assert!(HandlePosition::Top.resize_signs().is_none());
    }
}
