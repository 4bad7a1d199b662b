//! Property snapshots and updates bridging the engine to an inspector.
//!
//! The inspector works in bottom-left-origin display coordinates while
//! the engine stores top-left-origin world coordinates. Conversion and
//! 2-decimal display rounding happen here; invalid numeric input is
//! dropped silently, field by field.

use crate::entities::{Entity, EntityId, EntityKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Computed display properties for a selected entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityProperties {
    pub kind: EntityKind,
    pub id: EntityId,
    /// Display-space position: the line endpoint closest to the display
    /// origin, the rectangle's bottom-left corner, or the circle center.
    pub position: Point,
    pub dimensions: EntityDimensions,
    /// Rotation in degrees.
    pub rotation: f64,
    pub frozen: bool,
}

/// Per-kind dimension payload, rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityDimensions {
    Line { length: f64 },
    Rectangle { width: f64, height: f64 },
    Circle { radius: f64, diameter: f64 },
}

/// A partial geometry update from the inspector. Absent fields leave
/// the entity untouched; present fields apply independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyUpdate {
    /// New display-space position.
    #[serde(default)]
    pub position: Option<Point>,
    #[serde(default)]
    pub dimensions: Option<DimensionUpdate>,
    /// New absolute rotation in degrees.
    #[serde(default)]
    pub rotation: Option<f64>,
    #[serde(default)]
    pub frozen: Option<bool>,
}

/// Dimension fields of a [`PropertyUpdate`]; only the fields matching
/// the target entity's kind are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionUpdate {
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub radius: Option<f64>,
}

/// Convert between internal top-left-origin and display
/// bottom-left-origin coordinates. The mapping is its own inverse.
pub fn flip_y(point: Point, viewport_height: f64) -> Point {
    Point::new(point.x, viewport_height - point.y)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn valid_position(point: &Point) -> bool {
    point.x.is_finite() && point.y.is_finite()
}

fn valid_dimension(value: &f64) -> bool {
    value.is_finite() && *value > 0.0
}

/// Compute the display snapshot for an entity, or `None` for
/// annotation entities the inspector does not show.
pub fn entity_properties(entity: &Entity, viewport_height: f64) -> Option<EntityProperties> {
    let (position, dimensions) = match entity {
        Entity::Line(line) => {
            let start = flip_y(line.start, viewport_height);
            let end = flip_y(line.end, viewport_height);
            // Report whichever endpoint sits closer to the display
            // origin; ties keep the start.
            let closest = if start.to_vec2().hypot() <= end.to_vec2().hypot() {
                start
            } else {
                end
            };
            (
                closest,
                EntityDimensions::Line {
                    length: round2(line.length()),
                },
            )
        }
        Entity::Rectangle(rect) => {
            let bounds = rect.as_rect();
            (
                Point::new(bounds.x0, viewport_height - bounds.y1),
                EntityDimensions::Rectangle {
                    width: round2(bounds.width()),
                    height: round2(bounds.height()),
                },
            )
        }
        Entity::Circle(circle) => (
            flip_y(circle.center, viewport_height),
            EntityDimensions::Circle {
                radius: round2(circle.radius),
                diameter: round2(circle.diameter()),
            },
        ),
        Entity::Dimension(_) => return None,
    };

    Some(EntityProperties {
        kind: entity.kind(),
        id: entity.id(),
        position: Point::new(round2(position.x), round2(position.y)),
        dimensions,
        rotation: entity.rotation(),
        frozen: entity.frozen(),
    })
}

/// Apply an inspector update to an entity.
///
/// Position and dimension fields arrive in display space and convert
/// back to internal coordinates before mutating. NaN or non-finite
/// values and dimensions ≤ 0 are ignored without touching the entity.
pub fn apply_property_update(entity: &mut Entity, update: &PropertyUpdate, viewport_height: f64) {
    match entity {
        Entity::Line(line) => {
            if let Some(pos) = update.position.filter(valid_position) {
                let new_start = flip_y(pos, viewport_height);
                let delta = new_start - line.start;
                line.start = new_start;
                line.end += delta;
            }
            if let Some(length) = update
                .dimensions
                .and_then(|d| d.length)
                .filter(valid_dimension)
            {
                let current = line.length();
                // A zero-length line has no direction to extend along
                if current > 0.0 {
                    let unit = (line.end - line.start) / current;
                    line.end = line.start + unit * length;
                }
            }
        }
        Entity::Rectangle(rect) => {
            let bounds = rect.as_rect();
            let mut bottom_left = Point::new(bounds.x0, viewport_height - bounds.y1);
            let mut width = bounds.width();
            let mut height = bounds.height();
            let mut touched = false;

            if let Some(pos) = update.position.filter(valid_position) {
                bottom_left = pos;
                touched = true;
            }
            if let Some(w) = update
                .dimensions
                .and_then(|d| d.width)
                .filter(valid_dimension)
            {
                width = w;
                touched = true;
            }
            if let Some(h) = update
                .dimensions
                .and_then(|d| d.height)
                .filter(valid_dimension)
            {
                height = h;
                touched = true;
            }

            if touched {
                rect.start = flip_y(bottom_left, viewport_height);
                rect.end = flip_y(
                    Point::new(bottom_left.x + width, bottom_left.y + height),
                    viewport_height,
                );
            }
        }
        Entity::Circle(circle) => {
            if let Some(pos) = update.position.filter(valid_position) {
                circle.center = flip_y(pos, viewport_height);
            }
            if let Some(radius) = update
                .dimensions
                .and_then(|d| d.radius)
                .filter(valid_dimension)
            {
                circle.radius = radius;
            }
        }
        Entity::Dimension(_) => {}
    }

    if let Some(rotation) = update.rotation.filter(|r| r.is_finite()) {
        entity.set_rotation(rotation);
    }
    if let Some(frozen) = update.frozen {
        entity.set_frozen(frozen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Circle, Line, LinearDimension, Rectangle};

    const HEIGHT: f64 = 600.0;

    #[test]
    fn test_line_properties_report_closest_endpoint() {
        let line = Line::new(Point::new(100.0, 500.0), Point::new(400.0, 580.0));
        let props = entity_properties(&Entity::Line(line), HEIGHT).unwrap();

        // Display start (100,100) is nearer the origin than (400,20)
        assert_eq!(props.kind, EntityKind::Line);
        assert_eq!(props.position, Point::new(100.0, 100.0));
        assert_eq!(
            props.dimensions,
            EntityDimensions::Line { length: 310.48 }
        );
    }

    #[test]
    fn test_line_properties_tie_prefers_start() {
        // Both endpoints sit at display distance 50 from the origin
        let line = Line::new(Point::new(30.0, 560.0), Point::new(40.0, 570.0));
        let props = entity_properties(&Entity::Line(line), HEIGHT).unwrap();
        assert_eq!(props.position, Point::new(30.0, 40.0));
    }

    #[test]
    fn test_rectangle_properties_bottom_left_corner() {
        let rect = Rectangle::new(Point::new(300.0, 200.0), Point::new(100.0, 100.0));
        let props = entity_properties(&Entity::Rectangle(rect), HEIGHT).unwrap();

        assert_eq!(props.position, Point::new(100.0, 400.0));
        assert_eq!(
            props.dimensions,
            EntityDimensions::Rectangle {
                width: 200.0,
                height: 100.0
            }
        );
    }

    #[test]
    fn test_circle_properties() {
        let circle = Circle::new(Point::new(100.0, 100.0), 25.0);
        let props = entity_properties(&Entity::Circle(circle), HEIGHT).unwrap();

        assert_eq!(props.position, Point::new(100.0, 500.0));
        assert_eq!(
            props.dimensions,
            EntityDimensions::Circle {
                radius: 25.0,
                diameter: 50.0
            }
        );
    }

    #[test]
    fn test_properties_round_to_two_decimals() {
        let circle = Circle::new(Point::new(1.2345, 100.0), 10.005);
        let props = entity_properties(&Entity::Circle(circle), HEIGHT).unwrap();

        assert!((props.position.x - 1.23).abs() < 1e-9);
        match props.dimensions {
            EntityDimensions::Circle { radius, .. } => assert!((radius - 10.01).abs() < 1e-9),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_dimension_entity_has_no_properties() {
        let dim = LinearDimension::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 20.0);
        assert!(entity_properties(&Entity::Dimension(dim), HEIGHT).is_none());
    }

    #[test]
    fn test_update_position_translates_line() {
        let mut entity = Entity::Line(Line::new(
            Point::new(100.0, 500.0),
            Point::new(200.0, 500.0),
        ));
        let update = PropertyUpdate {
            position: Some(Point::new(300.0, 300.0)),
            ..Default::default()
        };
        apply_property_update(&mut entity, &update, HEIGHT);

        match &entity {
            Entity::Line(line) => {
                assert_eq!(line.start, Point::new(300.0, 300.0));
                assert_eq!(line.end, Point::new(400.0, 300.0));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_update_length_preserves_direction() {
        let mut entity = Entity::Line(Line::new(Point::new(0.0, 0.0), Point::new(30.0, 40.0)));
        let update = PropertyUpdate {
            dimensions: Some(DimensionUpdate {
                length: Some(100.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        apply_property_update(&mut entity, &update, HEIGHT);

        match &entity {
            Entity::Line(line) => {
                assert_eq!(line.start, Point::new(0.0, 0.0));
                assert!((line.end.x - 60.0).abs() < 1e-9);
                assert!((line.end.y - 80.0).abs() < 1e-9);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_zero_length_line_unchanged_by_length_update() {
        let mut entity = Entity::Line(Line::new(Point::new(50.0, 50.0), Point::new(50.0, 50.0)));
        let update = PropertyUpdate {
            dimensions: Some(DimensionUpdate {
                length: Some(100.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        apply_property_update(&mut entity, &update, HEIGHT);

        match &entity {
            Entity::Line(line) => {
                assert_eq!(line.start, Point::new(50.0, 50.0));
                assert_eq!(line.end, Point::new(50.0, 50.0));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_invalid_fields_rejected_independently() {
        let mut entity = Entity::Rectangle(Rectangle::new(
            Point::new(100.0, 100.0),
            Point::new(300.0, 200.0),
        ));
        let update = PropertyUpdate {
            dimensions: Some(DimensionUpdate {
                width: Some(0.0),     // rejected
                height: Some(50.0),   // applied
                ..Default::default()
            }),
            ..Default::default()
        };
        apply_property_update(&mut entity, &update, HEIGHT);

        match &entity {
            Entity::Rectangle(rect) => {
                let bounds = rect.as_rect();
                assert!((bounds.width() - 200.0).abs() < 1e-9);
                assert!((bounds.height() - 50.0).abs() < 1e-9);
                // Bottom edge holds while the top moves
                assert!((bounds.y1 - 200.0).abs() < 1e-9);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_nan_and_negative_rejected() {
        let mut entity = Entity::Line(Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0)));
        let update = PropertyUpdate {
            position: Some(Point::new(f64::NAN, 10.0)),
            dimensions: Some(DimensionUpdate {
                length: Some(-5.0),
                ..Default::default()
            }),
            rotation: Some(f64::INFINITY),
            ..Default::default()
        };
        apply_property_update(&mut entity, &update, HEIGHT);

        match &entity {
            Entity::Line(line) => {
                assert_eq!(line.start, Point::new(0.0, 0.0));
                assert_eq!(line.end, Point::new(100.0, 0.0));
                assert!((line.rotation - 0.0).abs() < f64::EPSILON);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_update_rectangle_geometry() {
        let mut entity = Entity::Rectangle(Rectangle::new(
            Point::new(100.0, 100.0),
            Point::new(300.0, 200.0),
        ));
        let update = PropertyUpdate {
            position: Some(Point::new(50.0, 50.0)),
            dimensions: Some(DimensionUpdate {
                width: Some(100.0),
                height: Some(30.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        apply_property_update(&mut entity, &update, HEIGHT);

        match &entity {
            Entity::Rectangle(rect) => {
                let bounds = rect.as_rect();
                assert!((bounds.x0 - 50.0).abs() < 1e-9);
                assert!((bounds.x1 - 150.0).abs() < 1e-9);
                assert!((bounds.y0 - 520.0).abs() < 1e-9);
                assert!((bounds.y1 - 550.0).abs() < 1e-9);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_update_circle_center_and_radius() {
        let mut entity = Entity::Circle(Circle::new(Point::new(0.0, 0.0), 10.0));
        let update = PropertyUpdate {
            position: Some(Point::new(200.0, 100.0)),
            dimensions: Some(DimensionUpdate {
                radius: Some(77.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        apply_property_update(&mut entity, &update, HEIGHT);

        match &entity {
            Entity::Circle(circle) => {
                assert_eq!(circle.center, Point::new(200.0, 500.0));
                assert!((circle.radius - 77.0).abs() < f64::EPSILON);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_freeze_is_idempotent() {
        let mut entity = Entity::Circle(Circle::new(Point::new(0.0, 0.0), 10.0));
        let update = PropertyUpdate {
            frozen: Some(true),
            ..Default::default()
        };
        apply_property_update(&mut entity, &update, HEIGHT);
        assert!(entity.frozen());

        apply_property_update(&mut entity, &update, HEIGHT);
        assert!(entity.frozen());
        match &entity {
            Entity::Circle(circle) => assert!((circle.radius - 10.0).abs() < f64::EPSILON),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_properties_round_trip_keeps_geometry() {
        let mut entity = Entity::Line(Line::new(
            Point::new(100.0, 500.0),
            Point::new(400.0, 500.0),
        ));
        let props = entity_properties(&entity, HEIGHT).unwrap();

        let length = match props.dimensions {
            EntityDimensions::Line { length } => length,
            _ => unreachable!(),
        };
        let update = PropertyUpdate {
            position: Some(props.position),
            dimensions: Some(DimensionUpdate {
                length: Some(length),
                ..Default::default()
            }),
            ..Default::default()
        };
        apply_property_update(&mut entity, &update, HEIGHT);

        match &entity {
            Entity::Line(line) => {
                assert!((line.start.x - 100.0).abs() < 1e-9);
                assert!((line.start.y - 500.0).abs() < 1e-9);
                assert!((line.end.x - 400.0).abs() < 1e-9);
                assert!((line.end.y - 500.0).abs() < 1e-9);
            }
            _ => unreachable!(),
        }
    }
}
