//! Circle entity.

use super::{Color, EntityId, DEFAULT_STROKE_WIDTH};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle stored as center and radius.
///
/// Rotation is stored for symmetry with the other kinds but has no
/// geometric effect; the radius is invariant under rotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub id: EntityId,
    /// Center (world space).
    pub center: Point,
    /// Radius, always ≥ 0.
    pub radius: f64,
    /// Stroke color.
    pub color: Color,
    /// Stroke width.
    pub width: f64,
    /// Fill color (None = no fill).
    #[serde(default)]
    pub fill_color: Option<Color>,
    /// Rotation in degrees; no geometric effect for circles.
    #[serde(default)]
    pub rotation: f64,
    /// Frozen entities are selectable but reject drag/resize/rotate.
    #[serde(default)]
    pub frozen: bool,
}

impl Circle {
    /// Create a new circle with default style.
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius,
            color: Color::black(),
            width: DEFAULT_STROKE_WIDTH,
            fill_color: None,
            rotation: 0.0,
            frozen: false,
        }
    }

    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_creation() {
        let circle = Circle::new(Point::new(50.0, 50.0), 25.0);
        assert!((circle.radius - 25.0).abs() < f64::EPSILON);
        assert!((circle.diameter() - 50.0).abs() < f64::EPSILON);
    }
}
