//! Snapping to entity anchor points.

use crate::anchor::{all_anchor_points, entity_anchor_points, AnchorPoint};
use crate::document::SketchDocument;
use crate::entities::{Entity, EntityId};
use kurbo::{Point, Vec2};

/// Distance threshold for anchor snapping, in screen pixels. Callers
/// working in world space divide by the zoom factor.
pub const SNAP_DISTANCE: f64 = 10.0;

/// Hover detection radius relative to the snap threshold. Affordance
/// only; never feeds a snap decision.
pub const HOVER_RADIUS_FACTOR: f64 = 1.5;

/// Result of a snap query.
#[derive(Debug, Clone, Copy)]
pub struct SnapResult {
    /// The snapped point (the input point when nothing snapped).
    pub point: Point,
    /// Whether snapping occurred.
    pub snapped: bool,
    /// The anchor snapped to.
    pub anchor: Option<AnchorPoint>,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped: false,
            anchor: None,
        }
    }
}

/// Find the nearest anchor to `target` strictly within `threshold`.
///
/// Ties break by enumeration order (first found wins). Anchors of
/// `exclude` are skipped so an entity never snaps to its own anchors
/// while being edited.
pub fn find_nearest_anchor(
    target: Point,
    anchors: &[AnchorPoint],
    threshold: f64,
    exclude: Option<EntityId>,
) -> SnapResult {
    let mut best: Option<AnchorPoint> = None;
    let mut best_dist_sq = threshold * threshold;

    for anchor in anchors {
        if exclude == Some(anchor.entity_id) {
            continue;
        }
        let dx = target.x - anchor.point.x;
        let dy = target.y - anchor.point.y;
        let dist_sq = dx * dx + dy * dy;
        if dist_sq < best_dist_sq {
            best_dist_sq = dist_sq;
            best = Some(*anchor);
        }
    }

    match best {
        Some(anchor) => SnapResult {
            point: anchor.point,
            snapped: true,
            anchor: Some(anchor),
        },
        None => SnapResult::none(target),
    }
}

/// Snap a point to the nearest anchor in the document.
pub fn snap_to_nearest_anchor(
    target: Point,
    document: &SketchDocument,
    threshold: f64,
    exclude: Option<EntityId>,
) -> SnapResult {
    let anchors = all_anchor_points(document);
    find_nearest_anchor(target, &anchors, threshold, exclude)
}

/// All anchors within `radius` of `target` (inclusive), for hover
/// display.
pub fn anchors_near(target: Point, document: &SketchDocument, radius: f64) -> Vec<AnchorPoint> {
    let radius_sq = radius * radius;
    all_anchor_points(document)
        .into_iter()
        .filter(|anchor| {
            let dx = target.x - anchor.point.x;
            let dy = target.y - anchor.point.y;
            dx * dx + dy * dy <= radius_sq
        })
        .collect()
}

/// Minimal offset that aligns one of `entity`'s anchors with an anchor
/// of another entity, strictly within `threshold`.
///
/// The entity is evaluated at its candidate position (callers translate
/// it there first); its own stored counterpart in the document is
/// excluded from the comparison.
pub fn entity_snap_offset(
    entity: &Entity,
    document: &SketchDocument,
    threshold: f64,
) -> Option<Vec2> {
    let own = entity_anchor_points(entity);
    if own.is_empty() {
        return None;
    }
    let others = all_anchor_points(document);
    let own_id = entity.id();

    let mut best: Option<Vec2> = None;
    let mut best_dist_sq = threshold * threshold;

    for own_anchor in &own {
        for other in &others {
            if other.entity_id == own_id {
                continue;
            }
            let dx = other.point.x - own_anchor.point.x;
            let dy = other.point.y - own_anchor.point.y;
            let dist_sq = dx * dx + dy * dy;
            if dist_sq < best_dist_sq {
                best_dist_sq = dist_sq;
                best = Some(Vec2::new(dx, dy));
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Circle, Line};

    fn doc_with_line() -> SketchDocument {
        let mut doc = SketchDocument::new();
        doc.add(Entity::Line(Line::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        )));
        doc
    }

    #[test]
    fn test_snap_inside_threshold() {
        let doc = doc_with_line();
        let result = snap_to_nearest_anchor(Point::new(9.99, 0.0), &doc, SNAP_DISTANCE, None);
        assert!(result.snapped);
        assert_eq!(result.point, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_no_snap_outside_threshold() {
        let doc = doc_with_line();
        let result = snap_to_nearest_anchor(Point::new(10.01, 20.0), &doc, SNAP_DISTANCE, None);
        assert!(!result.snapped);
        assert_eq!(result.point, Point::new(10.01, 20.0));
        assert!(result.anchor.is_none());
    }

    #[test]
    fn test_threshold_is_strict() {
        let doc = doc_with_line();
        // Exactly at the threshold distance from (0,0), away from the
        // other anchors
        let result = snap_to_nearest_anchor(Point::new(0.0, -10.0), &doc, SNAP_DISTANCE, None);
        assert!(!result.snapped);
    }

    #[test]
    fn test_nearest_anchor_wins() {
        let doc = doc_with_line();
        let result = snap_to_nearest_anchor(Point::new(53.0, 1.0), &doc, SNAP_DISTANCE, None);
        assert!(result.snapped);
        assert_eq!(result.point, Point::new(50.0, 0.0));
    }

    #[test]
    fn test_tie_breaks_by_enumeration_order() {
        let mut doc = doc_with_line();
        doc.add(Entity::Line(Line::new(
            Point::new(0.0, 8.0),
            Point::new(100.0, 8.0),
        )));
        // (5,4) is distance 4 from both midpoints; the first line was
        // added first so its midpoint wins
        let result = snap_to_nearest_anchor(Point::new(5.0, 4.0), &doc, SNAP_DISTANCE, None);
        assert!(result.snapped);
        assert_eq!(result.point, Point::new(5.0, 0.0));
    }

    #[test]
    fn test_exclude_own_entity() {
        let doc = doc_with_line();
        let own_id = doc.lines[0].id;
        let result =
            snap_to_nearest_anchor(Point::new(1.0, 1.0), &doc, SNAP_DISTANCE, Some(own_id));
        assert!(!result.snapped);
    }

    #[test]
    fn test_hover_radius_wider_and_inclusive() {
        let doc = doc_with_line();
        let radius = SNAP_DISTANCE * HOVER_RADIUS_FACTOR;
        // 15 away: outside snapping, inside hover
        let hovered = anchors_near(Point::new(0.0, 15.0), &doc, radius);
        assert_eq!(hovered.len(), 1);
        let snap = snap_to_nearest_anchor(Point::new(0.0, 15.0), &doc, SNAP_DISTANCE, None);
        assert!(!snap.snapped);
        // Just past the hover radius: nothing
        let hovered = anchors_near(Point::new(0.0, 15.01), &doc, radius);
        assert!(hovered.is_empty());
    }

    #[test]
    fn test_hover_returns_all_in_radius() {
        let doc = doc_with_line();
        let hovered = anchors_near(Point::new(50.0, 0.0), &doc, 60.0);
        assert_eq!(hovered.len(), 3);
    }

    #[test]
    fn test_entity_snap_offset_aligns_anchors() {
        let doc = doc_with_line();
        // A circle whose center sits 3 to the right of the line's end
        let candidate = Entity::Circle(Circle::new(Point::new(103.0, 0.0), 20.0));
        let offset = entity_snap_offset(&candidate, &doc, SNAP_DISTANCE);
        let offset = offset.unwrap();
        assert!((offset.x + 3.0).abs() < 1e-9);
        assert!(offset.y.abs() < 1e-9);
    }

    #[test]
    fn test_entity_snap_offset_none_when_far() {
        let doc = doc_with_line();
        let candidate = Entity::Circle(Circle::new(Point::new(500.0, 500.0), 20.0));
        assert!(entity_snap_offset(&candidate, &doc, SNAP_DISTANCE).is_none());
    }
}
