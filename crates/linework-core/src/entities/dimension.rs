//! Linear dimension annotation entity.

use super::{Color, EntityId};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default label text size for new dimensions.
pub const DEFAULT_TEXT_SIZE: f64 = 12.0;

/// A measured segment plus a perpendicular display offset.
///
/// Dimensions annotate geometry; they are not selectable, expose no
/// anchors, and are never hit-tested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearDimension {
    pub id: EntityId,
    /// First measured point (world space).
    pub start: Point,
    /// Second measured point (world space).
    pub end: Point,
    /// Signed perpendicular distance from the measured segment to the
    /// dimension line.
    pub offset: f64,
    /// Stroke and label color.
    pub color: Color,
    /// Label text size.
    pub text_size: f64,
    /// Frozen entities reject mutation.
    #[serde(default)]
    pub frozen: bool,
}

impl LinearDimension {
    /// Create a new dimension with default style.
    pub fn new(start: Point, end: Point, offset: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            offset,
            color: Color::black(),
            text_size: DEFAULT_TEXT_SIZE,
            frozen: false,
        }
    }

    /// The measured length.
    pub fn length(&self) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint of the measured segment.
    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    /// Endpoints of the dimension line, displaced from the measured
    /// segment by `offset` along its perpendicular. A zero-length
    /// segment has no perpendicular and is returned unchanged.
    pub fn offset_segment(&self) -> (Point, Point) {
        let seg = Vec2::new(self.end.x - self.start.x, self.end.y - self.start.y);
        let len = seg.hypot();
        if len < f64::EPSILON {
            return (self.start, self.end);
        }
        let perp = Vec2::new(-seg.y / len, seg.x / len) * self.offset;
        (self.start + perp, self.end + perp)
    }
}
