//! Rectangle entity.

use super::{Color, EntityId, DEFAULT_STROKE_WIDTH};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle stored as two opposite corners.
///
/// `start` and `end` need not be ordered min/max; derived accessors
/// normalize. Rotation is stored in degrees about the box center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    pub id: EntityId,
    /// First corner (world space).
    pub start: Point,
    /// Opposite corner (world space).
    pub end: Point,
    /// Stroke color.
    pub color: Color,
    /// Stroke width.
    pub width: f64,
    /// Fill color (None = no fill).
    #[serde(default)]
    pub fill_color: Option<Color>,
    /// Rotation in degrees about the box center.
    #[serde(default)]
    pub rotation: f64,
    /// Frozen entities are selectable but reject drag/resize/rotate.
    #[serde(default)]
    pub frozen: bool,
}

impl Rectangle {
    /// Create a new rectangle with default style.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            color: Color::black(),
            width: DEFAULT_STROKE_WIDTH,
            fill_color: None,
            rotation: 0.0,
            frozen: false,
        }
    }

    /// Get the normalized bounding rect (min/max from the unordered corners).
    pub fn as_rect(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    /// Minimum corner of the normalized bounds.
    pub fn min_corner(&self) -> Point {
        let r = self.as_rect();
        Point::new(r.x0, r.y0)
    }

    /// Maximum corner of the normalized bounds.
    pub fn max_corner(&self) -> Point {
        let r = self.as_rect();
        Point::new(r.x1, r.y1)
    }

    /// Center of the box, the rotation pivot.
    pub fn center(&self) -> Point {
        self.as_rect().center()
    }

    /// The four corners of the normalized bounds, unrotated, in
    /// top-left, top-right, bottom-right, bottom-left order.
    pub fn corners(&self) -> [Point; 4] {
        let r = self.as_rect();
        [
            Point::new(r.x0, r.y0),
            Point::new(r.x1, r.y0),
            Point::new(r.x1, r.y1),
            Point::new(r.x0, r.y1),
        ]
    }
}
