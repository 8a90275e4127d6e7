use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A position on the mind-map canvas, in scene coordinates.
///
/// Serializes as `{"x": .., "y": ..}`, which is the `pos` object of the
/// diagram file format.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An integer screen rectangle, as FLTK reports widget bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        !self.is_empty() && px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    /// Smallest rectangle covering both. Empty rectangles do not contribute.
    pub fn united(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = (self.x + self.w).max(other.x + other.w);
        let bottom = (self.y + self.h).max(other.y + other.h);
        Rect::new(left, top, right - left, bottom - top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_is_half_open() {
        let r = Rect::new(10, 10, 20, 20);
        assert!(r.contains(10, 10));
        assert!(r.contains(29, 29));
        assert!(!r.contains(30, 10));
        assert!(!r.contains(9, 15));
    }

    #[test]
    fn test_empty_rect_contains_nothing() {
        let r = Rect::new(5, 5, 0, 40);
        assert!(r.is_empty());
        assert!(!r.contains(5, 5));
    }

    #[test]
    fn test_united_covers_both() {
        let strip = Rect::new(0, 0, 100, 30);
        let content = Rect::new(0, 30, 100, 200);
        assert_eq!(strip.united(&content), Rect::new(0, 0, 100, 230));
        assert_eq!(Rect::default().united(&content), content);
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(3.0, 4.0);
        assert_eq!(a - Point::new(1.0, 1.0), Point::new(2.0, 3.0));
        assert_eq!(a + Point::new(1.0, -4.0), Point::new(4.0, 0.0));
        assert_eq!(a.distance_to(Point::default()), 5.0);
    }
}
