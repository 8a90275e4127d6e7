use crate::app::domain::geometry::Point;

/// Approximate glyph metrics used to hit test free text without a font.
const CHAR_WIDTH: f64 = 7.0;
const TEXT_PADDING: f64 = 8.0;
pub const TEXT_HEIGHT: f64 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct FreeText {
    pub id: TextId,
    pub text: String,
    /// Top-left corner of the label.
    pub pos: Point,
}

impl FreeText {
    pub fn width(&self) -> f64 {
        self.text.chars().count() as f64 * CHAR_WIDTH + TEXT_PADDING
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.pos.x && p.x <= self.pos.x + self.width() && p.y >= self.pos.y && p.y <= self.pos.y + TEXT_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_uses_text_length() {
        let text = FreeText {
            id: TextId(1),
            text: "hello".into(),
            pos: Point::new(10.0, 10.0),
        };
        assert_eq!(text.width(), 43.0);
        assert!(text.contains(Point::new(50.0, 20.0)));
        assert!(!text.contains(Point::new(60.0, 20.0)));
        assert!(!text.contains(Point::new(20.0, 30.0)));
    }
}
