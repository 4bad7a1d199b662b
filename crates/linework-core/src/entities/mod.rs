//! Entity definitions for the sketch document.

mod circle;
mod dimension;
mod line;
mod rectangle;

pub use circle::Circle;
pub use dimension::LinearDimension;
pub use line::Line;
pub use rectangle::Rectangle;

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

/// Unique identifier for entities.
pub type EntityId = Uuid;

/// Default stroke width for newly drawn entities.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Entity kind discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Line,
    Rectangle,
    Circle,
    Dimension,
}

/// Lookup key for selection and store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: EntityId,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: EntityId) -> Self {
        Self { kind, id }
    }
}

/// Rotate a point about a pivot by an angle in degrees.
///
/// Shared by anchor derivation, handle placement and (inverted)
/// hit-testing; all rotation in the engine goes through here.
pub fn rotate_point_about(point: Point, pivot: Point, degrees: f64) -> Point {
    if degrees == 0.0 {
        return point;
    }
    let theta = degrees.to_radians();
    let (sin, cos) = theta.sin_cos();
    let dx = point.x - pivot.x;
    let dy = point.y - pivot.y;
    Point::new(
        pivot.x + dx * cos - dy * sin,
        pivot.y + dx * sin + dy * cos,
    )
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_distance(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Enum wrapper for all entity types (for serialization and dispatch).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Entity {
    Line(Line),
    Rectangle(Rectangle),
    Circle(Circle),
    Dimension(LinearDimension),
}

impl Entity {
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Line(e) => e.id,
            Entity::Rectangle(e) => e.id,
            Entity::Circle(e) => e.id,
            Entity::Dimension(e) => e.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Line(_) => EntityKind::Line,
            Entity::Rectangle(_) => EntityKind::Rectangle,
            Entity::Circle(_) => EntityKind::Circle,
            Entity::Dimension(_) => EntityKind::Dimension,
        }
    }

    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.kind(), self.id())
    }

    /// The point rotation is computed about: segment midpoint for lines
    /// and dimensions, box center for rectangles, center for circles.
    pub fn pivot(&self) -> Point {
        match self {
            Entity::Line(e) => e.midpoint(),
            Entity::Rectangle(e) => e.center(),
            Entity::Circle(e) => e.center,
            Entity::Dimension(e) => e.midpoint(),
        }
    }

    /// Stored rotation in degrees (0 for kinds without rotation).
    pub fn rotation(&self) -> f64 {
        match self {
            Entity::Line(e) => e.rotation,
            Entity::Rectangle(e) => e.rotation,
            Entity::Circle(e) => e.rotation,
            Entity::Dimension(_) => 0.0,
        }
    }

    /// Set the stored rotation in degrees.
    pub fn set_rotation(&mut self, degrees: f64) {
        match self {
            Entity::Line(e) => e.rotation = degrees,
            Entity::Rectangle(e) => e.rotation = degrees,
            Entity::Circle(e) => e.rotation = degrees,
            Entity::Dimension(_) => {}
        }
    }

    pub fn frozen(&self) -> bool {
        match self {
            Entity::Line(e) => e.frozen,
            Entity::Rectangle(e) => e.frozen,
            Entity::Circle(e) => e.frozen,
            Entity::Dimension(e) => e.frozen,
        }
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        match self {
            Entity::Line(e) => e.frozen = frozen,
            Entity::Rectangle(e) => e.frozen = frozen,
            Entity::Circle(e) => e.frozen = frozen,
            Entity::Dimension(e) => e.frozen = frozen,
        }
    }

    /// Translate the entity by a delta, preserving shape and rotation.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Entity::Line(e) => {
                e.start += delta;
                e.end += delta;
            }
            Entity::Rectangle(e) => {
                e.start += delta;
                e.end += delta;
            }
            Entity::Circle(e) => {
                e.center += delta;
            }
            Entity::Dimension(e) => {
                e.start += delta;
                e.end += delta;
            }
        }
    }

    /// Assign a fresh unique id. Used when pasting so the copy never
    /// collides with the source entity.
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Entity::Line(e) => e.id = new_id,
            Entity::Rectangle(e) => e.id = new_id,
            Entity::Circle(e) => e.id = new_id,
            Entity::Dimension(e) => e.id = new_id,
        }
    }

    /// Outline key points with rotation applied, used for containment
    /// tests (marquee selection).
    pub fn extent_points(&self) -> Vec<Point> {
        match self {
            Entity::Line(e) => {
                let mid = e.midpoint();
                vec![
                    rotate_point_about(e.start, mid, e.rotation),
                    rotate_point_about(e.end, mid, e.rotation),
                ]
            }
            Entity::Rectangle(e) => {
                let center = e.center();
                e.corners()
                    .into_iter()
                    .map(|c| rotate_point_about(c, center, e.rotation))
                    .collect()
            }
            Entity::Circle(e) => vec![
                Point::new(e.center.x - e.radius, e.center.y),
                Point::new(e.center.x + e.radius, e.center.y),
                Point::new(e.center.x, e.center.y - e.radius),
                Point::new(e.center.x, e.center.y + e.radius),
            ],
            Entity::Dimension(e) => vec![e.start, e.end],
        }
    }
}
