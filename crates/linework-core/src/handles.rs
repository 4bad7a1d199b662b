//! Resize and rotate handles for selected entities.

use crate::entities::{Entity, rotate_point_about};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Handle size in screen pixels. A handle is hit within this distance
/// of its position.
pub const HANDLE_SIZE: f64 = 8.0;

/// Distance from the entity pivot to the rotate handle, in screen pixels.
pub const ROTATE_HANDLE_OFFSET: f64 = 25.0;

/// Type of manipulation handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Start endpoint of a line.
    LineStart,
    /// End endpoint of a line.
    LineEnd,
    RectTopLeft,
    RectTopRight,
    RectBottomLeft,
    RectBottomRight,
    CircleLeft,
    CircleRight,
    CircleTop,
    CircleBottom,
    /// Rotation handle, positioned above the entity pivot.
    Rotate,
}

/// A manipulation handle with its position and type.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    /// Position in world coordinates.
    pub position: Point,
    /// Handle type.
    pub kind: HandleKind,
}

impl Handle {
    /// Create a new handle.
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point (in world coordinates) hits this handle.
    /// `tolerance` should be adjusted for camera zoom.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        let dist_sq = dx * dx + dy * dy;
        dist_sq <= tolerance * tolerance
    }
}

/// Get the manipulation handles for an entity.
///
/// Handle positions follow the entity's rotation: line endpoints rotate
/// about the segment midpoint and rectangle corners about the box
/// center. `rotate_offset` is the pivot-to-rotate-handle distance in
/// world units. Frozen entities and dimensions expose no handles.
pub fn get_handles(entity: &Entity, rotate_offset: f64) -> Vec<Handle> {
    if entity.frozen() {
        return Vec::new();
    }
    match entity {
        Entity::Line(line) => {
            let mid = line.midpoint();
            vec![
                Handle::new(
                    rotate_point_about(line.start, mid, line.rotation),
                    HandleKind::LineStart,
                ),
                Handle::new(
                    rotate_point_about(line.end, mid, line.rotation),
                    HandleKind::LineEnd,
                ),
                rotate_handle(mid, line.rotation, rotate_offset),
            ]
        }
        Entity::Rectangle(rect) => {
            let center = rect.center();
            let min = rect.min_corner();
            let max = rect.max_corner();
            let corner = |x: f64, y: f64, kind: HandleKind| {
                Handle::new(
                    rotate_point_about(Point::new(x, y), center, rect.rotation),
                    kind,
                )
            };
            vec![
                corner(min.x, min.y, HandleKind::RectTopLeft),
                corner(max.x, min.y, HandleKind::RectTopRight),
                corner(min.x, max.y, HandleKind::RectBottomLeft),
                corner(max.x, max.y, HandleKind::RectBottomRight),
                rotate_handle(center, rect.rotation, rotate_offset),
            ]
        }
        Entity::Circle(circle) => {
            let c = circle.center;
            let r = circle.radius;
            // Axis-aligned left/right/top/bottom. Rotation has no
            // geometric effect on circles, so no rotate handle either.
            vec![
                Handle::new(Point::new(c.x - r, c.y), HandleKind::CircleLeft),
                Handle::new(Point::new(c.x + r, c.y), HandleKind::CircleRight),
                Handle::new(Point::new(c.x, c.y - r), HandleKind::CircleTop),
                Handle::new(Point::new(c.x, c.y + r), HandleKind::CircleBottom),
            ]
        }
        Entity::Dimension(_) => Vec::new(),
    }
}

/// The rotate handle sits `offset` above the pivot, rotated with the
/// entity so it stays perpendicular to the rotated geometry.
fn rotate_handle(pivot: Point, rotation: f64, offset: f64) -> Handle {
    let base = Point::new(pivot.x, pivot.y - offset);
    Handle::new(rotate_point_about(base, pivot, rotation), HandleKind::Rotate)
}

/// Find which handle (if any) is hit at the given point.
/// Handles are checked in placement order; the first hit wins.
pub fn hit_test_handles(
    entity: &Entity,
    point: Point,
    tolerance: f64,
    rotate_offset: f64,
) -> Option<HandleKind> {
    let handles = get_handles(entity, rotate_offset);
    for handle in handles {
        if handle.hit_test(point, tolerance) {
            return Some(handle.kind);
        }
    }
    None
}

/// Cursor feedback reported to the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorIcon {
    #[default]
    Crosshair,
    Move,
    Grab,
    Grabbing,
    NwseResize,
    NeswResize,
    EwResize,
    NsResize,
}

/// Cursor shown while hovering a handle.
pub fn cursor_for_handle(handle: HandleKind) -> CursorIcon {
    match handle {
        HandleKind::RectTopLeft | HandleKind::RectBottomRight => CursorIcon::NwseResize,
        HandleKind::RectTopRight | HandleKind::RectBottomLeft => CursorIcon::NeswResize,
        HandleKind::CircleLeft | HandleKind::CircleRight => CursorIcon::EwResize,
        HandleKind::CircleTop | HandleKind::CircleBottom => CursorIcon::NsResize,
        HandleKind::LineStart | HandleKind::LineEnd | HandleKind::Rotate => CursorIcon::Grab,
    }
}
