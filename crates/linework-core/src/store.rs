//! Workspace state shared between the engine and its host.
//!
//! The engine receives a [`WorkspaceStore`] by injection so hosts can
//! back it with their own state container; [`MemoryStore`] covers
//! tests and headless use.

use crate::entities::Entity;
use kurbo::Vec2;

/// Maximum number of entries the delete history retains.
pub const DELETE_HISTORY_LIMIT: usize = 10;

/// Trait for workspace settings, clipboard, and delete history.
pub trait WorkspaceStore {
    /// Whether anchor snapping is active.
    fn snap_enabled(&self) -> bool;

    /// Whether orthogonal line constraint is active.
    fn ortho_enabled(&self) -> bool;

    /// Current zoom factor, as last published by the engine.
    fn zoom(&self) -> f64;

    /// Current pan offset in screen units, as last published by the engine.
    fn pan_offset(&self) -> Vec2;

    /// The copied entity, if any.
    fn clipboard(&self) -> Option<&Entity>;

    /// Deleted entities, oldest first.
    fn deleted_entities(&self) -> &[Entity];

    /// Flip anchor snapping.
    fn toggle_snap(&mut self);

    /// Flip the orthogonal constraint.
    fn toggle_ortho(&mut self);

    fn set_zoom(&mut self, zoom: f64);

    fn set_pan_offset(&mut self, offset: Vec2);

    /// Place an entity on the clipboard, replacing any previous entry.
    fn copy_entity(&mut self, entity: Entity);

    /// Empty the clipboard. No-op when already empty.
    fn clear_clipboard(&mut self);

    /// Record a deleted entity, discarding the oldest entry once the
    /// history exceeds [`DELETE_HISTORY_LIMIT`].
    fn add_deleted_entity(&mut self, entity: Entity);

    /// Record a batch of deleted entities in order, trimming as for
    /// [`WorkspaceStore::add_deleted_entity`].
    fn add_deleted_entities(&mut self, entities: Vec<Entity>);
}

/// In-memory workspace store for tests and ephemeral use.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    snap_enabled: bool,
    ortho_enabled: bool,
    zoom: f64,
    pan_offset: Vec2,
    clipboard: Option<Entity>,
    deleted: Vec<Entity>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            snap_enabled: true,
            ortho_enabled: true,
            zoom: 1.0,
            pan_offset: Vec2::ZERO,
            clipboard: None,
            deleted: Vec::new(),
        }
    }
}

impl MemoryStore {
    /// Create a store with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    fn trim_history(&mut self) {
        if self.deleted.len() > DELETE_HISTORY_LIMIT {
            let overflow = self.deleted.len() - DELETE_HISTORY_LIMIT;
            self.deleted.drain(..overflow);
        }
    }
}

impl WorkspaceStore for MemoryStore {
    fn snap_enabled(&self) -> bool {
        self.snap_enabled
    }

    fn ortho_enabled(&self) -> bool {
        self.ortho_enabled
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn pan_offset(&self) -> Vec2 {
        self.pan_offset
    }

    fn clipboard(&self) -> Option<&Entity> {
        self.clipboard.as_ref()
    }

    fn deleted_entities(&self) -> &[Entity] {
        &self.deleted
    }

    fn toggle_snap(&mut self) {
        self.snap_enabled = !self.snap_enabled;
    }

    fn toggle_ortho(&mut self) {
        self.ortho_enabled = !self.ortho_enabled;
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    fn set_pan_offset(&mut self, offset: Vec2) {
        self.pan_offset = offset;
    }

    fn copy_entity(&mut self, entity: Entity) {
        self.clipboard = Some(entity);
    }

    fn clear_clipboard(&mut self) {
        self.clipboard = None;
    }

    fn add_deleted_entity(&mut self, entity: Entity) {
        self.deleted.push(entity);
        self.trim_history();
    }

    fn add_deleted_entities(&mut self, entities: Vec<Entity>) {
        self.deleted.extend(entities);
        self.trim_history();
    }
}
