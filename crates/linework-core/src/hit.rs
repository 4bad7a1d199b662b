//! Rotation-aware hit testing.

use crate::document::SketchDocument;
use crate::entities::{
    point_to_segment_distance, rotate_point_about, Circle, EntityKind, EntityRef, Line, Rectangle,
};
use kurbo::Point;

/// Default pick tolerance in screen pixels. Callers working in world
/// space divide by the zoom factor.
pub const HIT_TOLERANCE: f64 = 5.0;

/// Hit test a line: distance to the segment via projection and clamp.
///
/// The test point is inverse-rotated about the segment midpoint so the
/// unrotated predicate applies. Zero-length lines never hit.
pub fn hit_test_line(line: &Line, point: Point, tolerance: f64) -> bool {
    let dx = line.end.x - line.start.x;
    let dy = line.end.y - line.start.y;
    if dx * dx + dy * dy < f64::EPSILON {
        return false;
    }
    let local = rotate_point_about(point, line.midpoint(), -line.rotation);
    point_to_segment_distance(local, line.start, line.end) <= tolerance
}

/// Hit test a rectangle as a wireframe: the point must lie within the
/// normalized bounds AND within tolerance of at least one edge.
/// Interior clicks away from the border miss regardless of fill.
pub fn hit_test_rectangle(rect: &Rectangle, point: Point, tolerance: f64) -> bool {
    let local = rotate_point_about(point, rect.center(), -rect.rotation);
    let bounds = rect.as_rect();

    if local.x < bounds.x0 || local.x > bounds.x1 || local.y < bounds.y0 || local.y > bounds.y1 {
        return false;
    }

    let near_left = (local.x - bounds.x0).abs() <= tolerance;
    let near_right = (local.x - bounds.x1).abs() <= tolerance;
    let near_top = (local.y - bounds.y0).abs() <= tolerance;
    let near_bottom = (local.y - bounds.y1).abs() <= tolerance;

    near_left || near_right || near_top || near_bottom
}

/// Hit test a circle as a ring: | |p − c| − r | ≤ tolerance.
///
/// Rotation about the center cannot move a point relative to the ring,
/// so no inverse transform is needed.
pub fn hit_test_circle(circle: &Circle, point: Point, tolerance: f64) -> bool {
    let dx = point.x - circle.center.x;
    let dy = point.y - circle.center.y;
    let distance = (dx * dx + dy * dy).sqrt();
    (distance - circle.radius).abs() <= tolerance
}

/// Find the first entity at a point: circles, then rectangles, then
/// lines; first match wins. Dimensions are never hit. Frozen entities
/// still hit (selection is allowed; gestures are vetoed later).
pub fn find_entity_at_point(
    document: &SketchDocument,
    point: Point,
    tolerance: f64,
) -> Option<EntityRef> {
    for circle in &document.circles {
        if hit_test_circle(circle, point, tolerance) {
            return Some(EntityRef::new(EntityKind::Circle, circle.id));
        }
    }
    for rect in &document.rectangles {
        if hit_test_rectangle(rect, point, tolerance) {
            return Some(EntityRef::new(EntityKind::Rectangle, rect.id));
        }
    }
    for line in &document.lines {
        if hit_test_line(line, point, tolerance) {
            return Some(EntityRef::new(EntityKind::Line, line.id));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Entity, LinearDimension};

    #[test]
    fn test_line_hit_on_and_off() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(hit_test_line(&line, Point::new(50.0, 0.0), HIT_TOLERANCE));
        assert!(!hit_test_line(&line, Point::new(50.0, 50.0), HIT_TOLERANCE));
    }

    #[test]
    fn test_line_hit_near_endpoint() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(hit_test_line(&line, Point::new(105.0, 0.0), 5.0));
        assert!(!hit_test_line(&line, Point::new(106.0, 0.0), 5.0));
    }

    #[test]
    fn test_zero_length_line_never_hits() {
        let line = Line::new(Point::new(10.0, 10.0), Point::new(10.0, 10.0));
        assert!(!hit_test_line(&line, Point::new(10.0, 10.0), HIT_TOLERANCE));
    }

    #[test]
    fn test_rotated_line_hit() {
        let mut line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        line.rotation = 90.0;
        // Rotated about (50,0) the segment runs vertically through x=50
        assert!(hit_test_line(&line, Point::new(50.0, 30.0), HIT_TOLERANCE));
        // The unrotated position no longer hits
        assert!(!hit_test_line(&line, Point::new(10.0, 0.0), HIT_TOLERANCE));
    }

    #[test]
    fn test_rectangle_wireframe_pick() {
        let rect = Rectangle::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        // On and near the border
        assert!(hit_test_rectangle(&rect, Point::new(0.0, 50.0), 5.0));
        assert!(hit_test_rectangle(&rect, Point::new(3.0, 50.0), 5.0));
        assert!(hit_test_rectangle(&rect, Point::new(50.0, 97.0), 5.0));
        // Interior away from all edges is a miss
        assert!(!hit_test_rectangle(&rect, Point::new(50.0, 50.0), 5.0));
        // Outside the bounds is a miss even right next to an edge
        assert!(!hit_test_rectangle(&rect, Point::new(-3.0, 50.0), 5.0));
    }

    #[test]
    fn test_rectangle_unordered_corners() {
        let rect = Rectangle::new(Point::new(100.0, 100.0), Point::new(0.0, 0.0));
        assert!(hit_test_rectangle(&rect, Point::new(0.0, 50.0), 5.0));
    }

    #[test]
    fn test_rotated_rectangle_hit() {
        let mut rect = Rectangle::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        rect.rotation = 45.0;
        // The top edge midpoint (50,0) rotates to about (85.36, 14.64)
        let rotated = rotate_point_about(Point::new(50.0, 0.0), Point::new(50.0, 50.0), 45.0);
        assert!(hit_test_rectangle(&rect, rotated, 1.0));
        // The unrotated edge midpoint is now interior/outside the frame
        assert!(!hit_test_rectangle(&rect, Point::new(50.0, 0.5), 1.0));
    }

    #[test]
    fn test_circle_ring_pick() {
        let circle = Circle::new(Point::new(0.0, 0.0), 50.0);
        assert!(hit_test_circle(&circle, Point::new(50.0, 0.0), 5.0));
        assert!(hit_test_circle(&circle, Point::new(46.0, 0.0), 5.0));
        assert!(hit_test_circle(&circle, Point::new(55.0, 0.0), 5.0));
        // Center and far outside are misses
        assert!(!hit_test_circle(&circle, Point::new(0.0, 0.0), 5.0));
        assert!(!hit_test_circle(&circle, Point::new(56.0, 0.0), 5.0));
    }

    #[test]
    fn test_resolution_order_circle_rect_line() {
        let mut doc = SketchDocument::new();
        let line = Line::new(Point::new(-50.0, -50.0), Point::new(50.0, -50.0));
        let line_id = line.id;
        let rect = Rectangle::new(Point::new(-50.0, -50.0), Point::new(50.0, 50.0));
        let rect_id = rect.id;
        let circle = Circle::new(Point::new(0.0, 0.0), 50.0);
        let circle_id = circle.id;
        doc.add(Entity::Line(line));
        doc.add(Entity::Rectangle(rect));
        doc.add(Entity::Circle(circle));

        // (0,-50) lies on the circle ring, the rect's top edge and the line
        let hit = find_entity_at_point(&doc, Point::new(0.0, -50.0), HIT_TOLERANCE);
        assert_eq!(hit.map(|r| r.id), Some(circle_id));

        doc.remove(EntityRef::new(EntityKind::Circle, circle_id));
        let hit = find_entity_at_point(&doc, Point::new(0.0, -50.0), HIT_TOLERANCE);
        assert_eq!(hit.map(|r| r.id), Some(rect_id));

        doc.remove(EntityRef::new(EntityKind::Rectangle, rect_id));
        let hit = find_entity_at_point(&doc, Point::new(0.0, -50.0), HIT_TOLERANCE);
        assert_eq!(hit.map(|r| r.id), Some(line_id));
    }

    #[test]
    fn test_dimensions_are_never_hit() {
        let mut doc = SketchDocument::new();
        doc.add(Entity::Dimension(LinearDimension::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            10.0,
        )));
        assert!(find_entity_at_point(&doc, Point::new(50.0, 0.0), HIT_TOLERANCE).is_none());
    }

    #[test]
    fn test_frozen_entities_still_hit() {
        let mut doc = SketchDocument::new();
        let mut circle = Circle::new(Point::new(0.0, 0.0), 50.0);
        circle.frozen = true;
        let id = circle.id;
        doc.add(Entity::Circle(circle));
        let hit = find_entity_at_point(&doc, Point::new(50.0, 0.0), HIT_TOLERANCE);
        assert_eq!(hit.map(|r| r.id), Some(id));
    }
}
