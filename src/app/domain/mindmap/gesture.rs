use super::handle::HandlePosition;
use super::node::{MIN_NODE_HEIGHT, MIN_NODE_WIDTH, NodeId};
use super::text::TextId;
use crate::app::domain::geometry::Point;

/// The single pointer gesture in progress on the canvas, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Resizing {
        node: NodeId,
        corner: HandlePosition,
        start_pointer: Point,
        start_width: f64,
        start_height: f64,
    },
    Connecting {
        start: NodeId,
        pointer: Point,
    },
    Moving {
        node: NodeId,
        grab_offset: Point,
    },
    MovingText {
        text: TextId,
        grab_offset: Point,
    },
    /// Rubber-band selection dragged from `origin` on empty canvas.
    Marquee {
        origin: Point,
        pointer: Point,
    },
}

/// New node size for a resize dragged `(dx, dy)` from `corner`.
///
/// The node stays centred, so the size changes by twice the delta.
/// Results never go below the minimum node size.
pub fn resize_dimensions(corner: HandlePosition, start_width: f64, start_height: f64, dx: f64, dy: f64) -> (f64, f64) {
    let Some((sx, sy)) = corner.resize_signs() else {
        return (start_width, start_height);
    };
    let width = (start_width + sx * 2.0 * dx).max(MIN_NODE_WIDTH);
    let height = (start_height + sy * 2.0 * dy).max(MIN_NODE_HEIGHT);
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_table() {
        assert_eq!(resize_dimensions(HandlePosition::BottomRight, 120.0, 80.0, 10.0, 5.0), (140.0, 90.0));
        assert_eq!(resize_dimensions(HandlePosition::TopLeft, 120.0, 80.0, 10.0, 5.0), (100.0, 70.0));
        assert_eq!(resize_dimensions(HandlePosition::TopRight, 120.0, 80.0, 10.0, 5.0), (140.0, 70.0));
        assert_eq!(resize_dimensions(HandlePosition::BottomLeft, 120.0, 80.0, 10.0, 5.0), (100.0, 90.0));
    }

    #[test]
    fn test_resize_never_below_minimum() {
        for corner in HandlePosition::RESIZE {
            for delta in [-500.0, -40.0, 0.0, 40.0, 500.0] {
                let (w, h) = resize_dimensions(corner, 120.0, 80.0, delta, delta);
                assert!(w >= MIN_NODE_WIDTH && h >= MIN_NODE_HEIGHT, "{corner:?} {delta}");
            }
        }
        assert_eq!(resize_dimensions(HandlePosition::BottomRight, 120.0, 80.0, -100.0, -100.0), (60.0, 40.0));
    }

    #[test]
    fn test_connect_handle_does_not_resize() {
        assert_eq!(resize_dimensions(HandlePosition::Top, 120.0, 80.0, 30.0, 30.0), (120.0, 80.0));
    }
}
