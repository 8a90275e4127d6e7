use serde::{Deserialize, Serialize};

use super::line::LineId;
use crate::app::domain::geometry::Point;

pub const DEFAULT_NODE_WIDTH: f64 = 120.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 80.0;
pub const MIN_NODE_WIDTH: f64 = 60.0;
pub const MIN_NODE_HEIGHT: f64 = 40.0;

/// Size choices offered by the canvas toolbar.
pub const WIDTH_PRESETS: [f64; 5] = [80.0, 100.0, 120.0, 150.0, 200.0];
pub const HEIGHT_PRESETS: [f64; 5] = [60.0, 80.0, 100.0, 120.0, 150.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Ellipse,
    Rect,
}

impl ShapeKind {
    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::Rect => "Rectangle",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MindMapNode {
    pub id: NodeId,
    pub text: String,
    /// Centre of the shape in canvas coordinates.
    pub pos: Point,
    pub width: f64,
    pub height: f64,
    pub shape: ShapeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Incident connector lines, both branch and link.
    pub lines: Vec<LineId>,
}

impl MindMapNode {
    pub fn new(id: NodeId, text: impl Into<String>, pos: Point, width: f64, height: f64, shape: ShapeKind) -> Self {
        Self {
            id,
            text: text.into(),
            pos,
            width,
            height,
            shape,
            parent: None,
            children: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Top-left corner of the bounding box.
    pub fn top_left(&self) -> Point {
        Point::new(self.pos.x - self.width / 2.0, self.pos.y - self.height / 2.0)
    }

    /// Whether `p` falls inside the drawn shape.
    pub fn contains(&self, p: Point) -> bool {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        if half_w <= 0.0 || half_h <= 0.0 {
            return false;
        }
        let dx = p.x - self.pos.x;
        let dy = p.y - self.pos.y;
        match self.shape {
            ShapeKind::Ellipse => (dx / half_w).powi(2) + (dy / half_h).powi(2) <= 1.0,
            ShapeKind::Rect => dx.abs() <= half_w && dy.abs() <= half_h,
        }
    }
}
