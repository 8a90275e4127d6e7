use super::node::NodeId;
use crate::app::domain::geometry::Point;

/// Pointer distance under which a line counts as hit.
pub const LINE_HIT_TOLERANCE: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Parent to child edge of the tree. Rebuilt from the tree on load.
    Branch,
    /// Drawn by the user between two arbitrary nodes.
    Link,
}

/// Connector between two node centres. Endpoints are read from the nodes
/// every time the line is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct MindMapLine {
    pub id: LineId,
    pub start: NodeId,
    pub end: NodeId,
    pub kind: LineKind,
}

impl MindMapLine {
    pub fn touches(&self, node: NodeId) -> bool {
        self.start == node || self.end == node
    }
}

pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let ap = p - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    p.distance_to(Point::new(a.x + ab.x * t, a.y + ab.y * t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(distance_to_segment(Point::new(5.0, 3.0), a, b), 3.0);
        // Beyond the end clamps to the endpoint
        assert_eq!(distance_to_segment(Point::new(13.0, 4.0), a, b), 5.0);
        assert_eq!(distance_to_segment(Point::new(3.0, 4.0), a, a), 5.0);
    }
}
