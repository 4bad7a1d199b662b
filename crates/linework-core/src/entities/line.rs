//! Line entity.

use super::{Color, EntityId, DEFAULT_STROKE_WIDTH};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight segment between two points.
///
/// `rotation` is a stored delta in degrees applied about the segment
/// midpoint when anchors, handles or hits are derived; `start` and
/// `end` are never pre-rotated into storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub id: EntityId,
    /// Start point (world space).
    pub start: Point,
    /// End point (world space).
    pub end: Point,
    /// Stroke color.
    pub color: Color,
    /// Stroke width.
    pub width: f64,
    /// Rotation in degrees about the segment midpoint.
    #[serde(default)]
    pub rotation: f64,
    /// Frozen entities are selectable but reject drag/resize/rotate.
    #[serde(default)]
    pub frozen: bool,
}

impl Line {
    /// Create a new line with default style.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            color: Color::black(),
            width: DEFAULT_STROKE_WIDTH,
            rotation: 0.0,
            frozen: false,
        }
    }

    /// Get the length of the segment.
    pub fn length(&self) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Get the midpoint of the segment.
    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_creation() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!((line.length() - 100.0).abs() < f64::EPSILON);
        assert_eq!(line.rotation, 0.0);
        assert!(!line.frozen);
    }

    #[test]
    fn test_midpoint() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        let mid = line.midpoint();
        assert!((mid.x - 50.0).abs() < f64::EPSILON);
        assert!((mid.y - 50.0).abs() < f64::EPSILON);
    }
}
