//! Anchor point derivation for snapping.

use crate::document::SketchDocument;
use crate::entities::{rotate_point_about, Circle, Entity, EntityId, EntityKind, Line, Rectangle};
use kurbo::Point;

/// Role of an anchor on its entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorRole {
    // Line roles
    Start,
    End,
    Midpoint,
    // Rectangle corners
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    // Rectangle edge midpoints
    TopMid,
    BottomMid,
    LeftMid,
    RightMid,
    // Circle
    Center,
}

impl AnchorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnchorRole::Start => "start",
            AnchorRole::End => "end",
            AnchorRole::Midpoint => "midpoint",
            AnchorRole::TopLeft => "top-left",
            AnchorRole::TopRight => "top-right",
            AnchorRole::BottomLeft => "bottom-left",
            AnchorRole::BottomRight => "bottom-right",
            AnchorRole::TopMid => "top-mid",
            AnchorRole::BottomMid => "bottom-mid",
            AnchorRole::LeftMid => "left-mid",
            AnchorRole::RightMid => "right-mid",
            AnchorRole::Center => "center",
        }
    }
}

/// A derived snap candidate on an entity.
///
/// Never stored; recomputed from current entity state on demand so the
/// points always reflect live geometry and rotation.
#[derive(Debug, Clone, Copy)]
pub struct AnchorPoint {
    pub point: Point,
    pub role: AnchorRole,
    pub entity_id: EntityId,
    pub entity_kind: EntityKind,
}

impl AnchorPoint {
    /// Identifier string, entity id plus role.
    pub fn id(&self) -> String {
        format!("{}-{}", self.entity_id, self.role.as_str())
    }
}

/// Anchor points of a line: start, end, midpoint, rotated about the
/// segment midpoint.
pub fn line_anchor_points(line: &Line) -> Vec<AnchorPoint> {
    let mid = line.midpoint();
    let anchor = |point: Point, role: AnchorRole| AnchorPoint {
        point: rotate_point_about(point, mid, line.rotation),
        role,
        entity_id: line.id,
        entity_kind: EntityKind::Line,
    };
    vec![
        anchor(line.start, AnchorRole::Start),
        anchor(line.end, AnchorRole::End),
        anchor(mid, AnchorRole::Midpoint),
    ]
}

/// Anchor points of a rectangle: 4 corners and 4 edge midpoints from
/// the normalized bounds, rotated about the box center.
pub fn rectangle_anchor_points(rect: &Rectangle) -> Vec<AnchorPoint> {
    let bounds = rect.as_rect();
    let center = bounds.center();
    let mid_x = center.x;
    let mid_y = center.y;
    let anchor = |point: Point, role: AnchorRole| AnchorPoint {
        point: rotate_point_about(point, center, rect.rotation),
        role,
        entity_id: rect.id,
        entity_kind: EntityKind::Rectangle,
    };
    vec![
        anchor(Point::new(bounds.x0, bounds.y0), AnchorRole::TopLeft),
        anchor(Point::new(bounds.x1, bounds.y0), AnchorRole::TopRight),
        anchor(Point::new(bounds.x0, bounds.y1), AnchorRole::BottomLeft),
        anchor(Point::new(bounds.x1, bounds.y1), AnchorRole::BottomRight),
        anchor(Point::new(mid_x, bounds.y0), AnchorRole::TopMid),
        anchor(Point::new(mid_x, bounds.y1), AnchorRole::BottomMid),
        anchor(Point::new(bounds.x0, mid_y), AnchorRole::LeftMid),
        anchor(Point::new(bounds.x1, mid_y), AnchorRole::RightMid),
    ]
}

/// Anchor points of a circle: the center only. Rotation never changes
/// a circle's point set.
pub fn circle_anchor_points(circle: &Circle) -> Vec<AnchorPoint> {
    vec![AnchorPoint {
        point: circle.center,
        role: AnchorRole::Center,
        entity_id: circle.id,
        entity_kind: EntityKind::Circle,
    }]
}

/// Anchor points of any entity. Dimensions have none.
pub fn entity_anchor_points(entity: &Entity) -> Vec<AnchorPoint> {
    match entity {
        Entity::Line(e) => line_anchor_points(e),
        Entity::Rectangle(e) => rectangle_anchor_points(e),
        Entity::Circle(e) => circle_anchor_points(e),
        Entity::Dimension(_) => Vec::new(),
    }
}

/// All anchor points in the document, lines then rectangles then
/// circles. Dimensions contribute none.
pub fn all_anchor_points(document: &SketchDocument) -> Vec<AnchorPoint> {
    let mut anchors = Vec::new();
    for line in &document.lines {
        anchors.extend(line_anchor_points(line));
    }
    for rect in &document.rectangles {
        anchors.extend(rectangle_anchor_points(rect));
    }
    for circle in &document.circles {
        anchors.extend(circle_anchor_points(circle));
    }
    anchors
}
