//! Move, resize, rotate and placement math for entities.
//!
//! Every function here is pure: it takes current geometry and returns
//! new geometry (or mutates a value the caller owns). Gating on frozen
//! entities, snap/ortho flags and the active tool is the engine's job.

use crate::entities::Entity;
use crate::handles::HandleKind;
use kurbo::Point;

/// The point a drag gesture tracks: `start` for lines and rectangles,
/// the center for circles. The grab offset is `pointer - reference` at
/// pointer-down and each move re-targets `pointer - offset`.
pub fn drag_reference(entity: &Entity) -> Point {
    match entity {
        Entity::Line(line) => line.start,
        Entity::Rectangle(rect) => rect.start,
        Entity::Circle(circle) => circle.center,
        Entity::Dimension(dim) => dim.start,
    }
}

/// Move an entity so its drag reference point lands at `position`,
/// preserving shape and rotation.
pub fn move_entity_to(entity: &mut Entity, position: Point) {
    let reference = drag_reference(entity);
    entity.translate(position - reference);
}

/// Apply a resize handle drag, returning the updated entity.
///
/// Each rectangle corner handle repositions exactly that corner while
/// the opposite corner (taken from the original normalized bounds) is
/// held fixed. Circle handles set the radius from the pointer's
/// distance to the center along that handle's axis only. A handle that
/// does not belong to the entity's kind leaves it unchanged.
pub fn resize_entity(entity: &Entity, handle: HandleKind, point: Point) -> Entity {
    let mut entity = entity.clone();

    match &mut entity {
        Entity::Line(line) => match handle {
            HandleKind::LineStart => line.start = point,
            HandleKind::LineEnd => line.end = point,
            _ => {}
        },
        Entity::Rectangle(rect) => {
            let min = rect.min_corner();
            let max = rect.max_corner();
            let (start, end) = match handle {
                HandleKind::RectTopLeft => (point, max),
                HandleKind::RectTopRight => (Point::new(min.x, point.y), Point::new(point.x, max.y)),
                HandleKind::RectBottomLeft => (Point::new(point.x, min.y), Point::new(max.x, point.y)),
                HandleKind::RectBottomRight => (min, point),
                _ => (rect.start, rect.end),
            };
            rect.start = start;
            rect.end = end;
        }
        Entity::Circle(circle) => {
            circle.radius = match handle {
                HandleKind::CircleLeft | HandleKind::CircleRight => {
                    (point.x - circle.center.x).abs()
                }
                HandleKind::CircleTop | HandleKind::CircleBottom => {
                    (point.y - circle.center.y).abs()
                }
                _ => circle.radius,
            };
        }
        Entity::Dimension(_) => {}
    }

    entity
}

/// Constrain a segment endpoint to the dominant axis.
///
/// Compares `|dx|` against `|dy|` from `start`: the larger delta wins
/// and the endpoint is projected onto that axis (a tie goes vertical).
/// Only the two cardinal axes, never 45 degrees.
pub fn ortho_constrain(start: Point, end: Point) -> Point {
    let dx = (end.x - start.x).abs();
    let dy = (end.y - start.y).abs();
    if dx > dy {
        Point::new(end.x, start.y)
    } else {
        Point::new(start.x, end.y)
    }
}

/// Angle in degrees from the pivot to the pointer, measured from the
/// +x axis. Rotate gestures accumulate deltas of this value.
pub fn pointer_angle(pivot: Point, pointer: Point) -> f64 {
    (pointer.y - pivot.y).atan2(pointer.x - pivot.x).to_degrees()
}

/// Center an entity at `target`: the pivot (segment midpoint, box
/// center or circle center) lands exactly on the target point. Used
/// for paste placement.
pub fn place_at(entity: &mut Entity, target: Point) {
    let pivot = entity.pivot();
    entity.translate(target - pivot);
}
