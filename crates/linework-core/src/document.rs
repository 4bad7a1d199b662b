//! Sketch document holding the entity collections.

use crate::entities::{
    Circle, Entity, EntityKind, EntityRef, Line, LinearDimension, Rectangle,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from document serialization.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// All entities of a sketch, bucketed by kind.
///
/// Ids are unique within their kind bucket. Entities are read out by
/// value and written back whole (`get`/`replace`); transform code
/// produces new entity values rather than mutating through the
/// document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SketchDocument {
    pub lines: Vec<Line>,
    pub rectangles: Vec<Rectangle>,
    pub circles: Vec<Circle>,
    pub dimensions: Vec<LinearDimension>,
}

impl SketchDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity to its kind bucket.
    pub fn add(&mut self, entity: Entity) {
        match entity {
            Entity::Line(e) => self.lines.push(e),
            Entity::Rectangle(e) => self.rectangles.push(e),
            Entity::Circle(e) => self.circles.push(e),
            Entity::Dimension(e) => self.dimensions.push(e),
        }
    }

    /// Get an entity by reference, cloned into the enum wrapper.
    pub fn get(&self, entity_ref: EntityRef) -> Option<Entity> {
        match entity_ref.kind {
            EntityKind::Line => self
                .lines
                .iter()
                .find(|e| e.id == entity_ref.id)
                .cloned()
                .map(Entity::Line),
            EntityKind::Rectangle => self
                .rectangles
                .iter()
                .find(|e| e.id == entity_ref.id)
                .cloned()
                .map(Entity::Rectangle),
            EntityKind::Circle => self
                .circles
                .iter()
                .find(|e| e.id == entity_ref.id)
                .cloned()
                .map(Entity::Circle),
            EntityKind::Dimension => self
                .dimensions
                .iter()
                .find(|e| e.id == entity_ref.id)
                .cloned()
                .map(Entity::Dimension),
        }
    }

    /// Replace the stored entity with the same kind and id.
    /// Returns false (and stores nothing) when no such entity exists.
    pub fn replace(&mut self, entity: Entity) -> bool {
        match entity {
            Entity::Line(e) => {
                if let Some(slot) = self.lines.iter_mut().find(|l| l.id == e.id) {
                    *slot = e;
                    return true;
                }
                false
            }
            Entity::Rectangle(e) => {
                if let Some(slot) = self.rectangles.iter_mut().find(|r| r.id == e.id) {
                    *slot = e;
                    return true;
                }
                false
            }
            Entity::Circle(e) => {
                if let Some(slot) = self.circles.iter_mut().find(|c| c.id == e.id) {
                    *slot = e;
                    return true;
                }
                false
            }
            Entity::Dimension(e) => {
                if let Some(slot) = self.dimensions.iter_mut().find(|d| d.id == e.id) {
                    *slot = e;
                    return true;
                }
                false
            }
        }
    }

    /// Remove an entity, returning it so callers can record it.
    pub fn remove(&mut self, entity_ref: EntityRef) -> Option<Entity> {
        match entity_ref.kind {
            EntityKind::Line => {
                let idx = self.lines.iter().position(|e| e.id == entity_ref.id)?;
                Some(Entity::Line(self.lines.remove(idx)))
            }
            EntityKind::Rectangle => {
                let idx = self.rectangles.iter().position(|e| e.id == entity_ref.id)?;
                Some(Entity::Rectangle(self.rectangles.remove(idx)))
            }
            EntityKind::Circle => {
                let idx = self.circles.iter().position(|e| e.id == entity_ref.id)?;
                Some(Entity::Circle(self.circles.remove(idx)))
            }
            EntityKind::Dimension => {
                let idx = self.dimensions.iter().position(|e| e.id == entity_ref.id)?;
                Some(Entity::Dimension(self.dimensions.remove(idx)))
            }
        }
    }

    /// Clear all entities.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.rectangles.clear();
        self.circles.clear();
        self.dimensions.clear();
    }

    /// Check if the document has no entities.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.rectangles.is_empty()
            && self.circles.is_empty()
            && self.dimensions.is_empty()
    }

    /// Total entity count across all kinds.
    pub fn len(&self) -> usize {
        self.lines.len() + self.rectangles.len() + self.circles.len() + self.dimensions.len()
    }

    /// Iterate all entities as enum values, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.lines
            .iter()
            .cloned()
            .map(Entity::Line)
            .chain(self.rectangles.iter().cloned().map(Entity::Rectangle))
            .chain(self.circles.iter().cloned().map(Entity::Circle))
            .chain(self.dimensions.iter().cloned().map(Entity::Dimension))
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> DocumentResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_document_creation() {
        let doc = SketchDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
    }

    #[test]
    fn test_add_and_get() {
        let mut doc = SketchDocument::new();
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let entity_ref = EntityRef::new(EntityKind::Line, line.id);

        doc.add(Entity::Line(line));
        assert_eq!(doc.len(), 1);
        assert!(doc.get(entity_ref).is_some());

        // Same id under a different kind resolves nothing
        let wrong_kind = EntityRef::new(EntityKind::Circle, entity_ref.id);
        assert!(doc.get(wrong_kind).is_none());
    }

    #[test]
    fn test_replace_by_id() {
        let mut doc = SketchDocument::new();
        let circle = Circle::new(Point::new(50.0, 50.0), 10.0);
        let entity_ref = EntityRef::new(EntityKind::Circle, circle.id);
        doc.add(Entity::Circle(circle.clone()));

        let mut updated = circle;
        updated.radius = 25.0;
        assert!(doc.replace(Entity::Circle(updated)));

        match doc.get(entity_ref) {
            Some(Entity::Circle(c)) => assert!((c.radius - 25.0).abs() < f64::EPSILON),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_replace_missing_is_noop() {
        let mut doc = SketchDocument::new();
        let circle = Circle::new(Point::ZERO, 10.0);
        assert!(!doc.replace(Entity::Circle(circle)));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_remove_returns_entity() {
        let mut doc = SketchDocument::new();
        let rect = Rectangle::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        let entity_ref = EntityRef::new(EntityKind::Rectangle, rect.id);
        doc.add(Entity::Rectangle(rect));

        let removed = doc.remove(entity_ref);
        assert!(removed.is_some());
        assert!(doc.is_empty());
        assert!(doc.remove(entity_ref).is_none());
    }

    #[test]
    fn test_clear_empties_every_bucket() {
        let mut doc = SketchDocument::new();
        doc.add(Entity::Line(Line::new(Point::ZERO, Point::new(10.0, 0.0))));
        doc.add(Entity::Circle(Circle::new(Point::ZERO, 5.0)));

        doc.clear();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let mut doc = SketchDocument::new();
        doc.add(Entity::Line(Line::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 50.0),
        )));
        doc.add(Entity::Circle(Circle::new(Point::new(10.0, 10.0), 5.0)));
        doc.add(Entity::Dimension(LinearDimension::new(
            Point::new(0.0, 0.0),
            Point::new(40.0, 0.0),
            15.0,
        )));

        let json = doc.to_json().unwrap();
        let restored = SketchDocument::from_json(&json).unwrap();
        assert_eq!(restored.len(), 3);
        assert_eq!(restored.lines[0].id, doc.lines[0].id);
        assert!((restored.circles[0].radius - 5.0).abs() < f64::EPSILON);
        assert!((restored.dimensions[0].offset - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(SketchDocument::from_json("not json").is_err());
    }
}
