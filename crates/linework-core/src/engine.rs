//! Interaction engine driving selection, drawing, and transforms.
//!
//! All pointer work happens synchronously on the event that triggers
//! it. The engine owns the document, the camera, the active tool, and
//! the selection; hosts observe changes through a revision counter and
//! an optional change listener, then pull whatever they render.

use crate::anchor::AnchorPoint;
use crate::camera::Camera;
use crate::document::SketchDocument;
use crate::entities::{Entity, EntityId, EntityKind, EntityRef};
use crate::handles::{self, CursorIcon, HandleKind, HANDLE_SIZE, ROTATE_HANDLE_OFFSET};
use crate::hit::{self, HIT_TOLERANCE};
use crate::properties::{self, EntityProperties, PropertyUpdate};
use crate::snap::{self, SnapResult, HOVER_RADIUS_FACTOR, SNAP_DISTANCE};
use crate::store::WorkspaceStore;
use crate::tools::{DrawState, ToolKind, ToolManager};
use crate::transform;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Exclusive interaction states; pointer-down enters, pointer-up exits.
#[derive(Debug, Clone, Copy)]
enum Interaction {
    Idle,
    Drawing,
    Dragging { target: EntityRef, grab_offset: Vec2 },
    Resizing { target: EntityRef, handle: HandleKind },
    Rotating { target: EntityRef, prev_angle: f64 },
    Marquee { start: Point, current: Point },
    Panning { last_screen: Point },
}

/// Runtime sketch state: document, view, tool, and gesture handling.
///
/// The store is injected so hosts can supply their own settings and
/// clipboard backing; [`crate::store::MemoryStore`] works for tests
/// and headless use.
pub struct SketchEngine<S: WorkspaceStore> {
    /// The document being edited.
    pub document: SketchDocument,
    /// Camera for the view transform.
    pub camera: Camera,
    store: S,
    tools: ToolManager,
    viewport: Size,
    selection: Vec<EntityRef>,
    interaction: Interaction,
    hovered_anchors: Vec<AnchorPoint>,
    snap_indicator: Option<AnchorPoint>,
    cursor: CursorIcon,
    last_cursor_world: Option<Point>,
    selection_snapshot: Option<EntityProperties>,
    revision: u64,
    listener: Option<Box<dyn FnMut()>>,
}

impl<S: WorkspaceStore> SketchEngine<S> {
    /// Create an engine with an empty document. The camera starts from
    /// the zoom and pan the store holds.
    pub fn new(store: S) -> Self {
        Self::with_document(store, SketchDocument::new())
    }

    /// Create an engine around an existing document.
    pub fn with_document(store: S, document: SketchDocument) -> Self {
        let mut camera = Camera::new();
        camera.zoom = store.zoom();
        camera.offset = store.pan_offset();

        Self {
            document,
            camera,
            store,
            tools: ToolManager::new(),
            viewport: Size::new(800.0, 600.0),
            selection: Vec::new(),
            interaction: Interaction::Idle,
            hovered_anchors: Vec::new(),
            snap_indicator: None,
            cursor: CursorIcon::Crosshair,
            last_cursor_world: None,
            selection_snapshot: None,
            revision: 0,
            listener: None,
        }
    }

    /// Set the viewport size in screen units.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport = Size::new(width, height);
        self.notify();
    }

    /// Register the single change listener. Called after every state
    /// change alongside the revision bump; the host pulls state back.
    pub fn set_change_listener(&mut self, listener: impl FnMut() + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Monotonic revision, bumped on every state change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The injected workspace store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Currently selected entities.
    pub fn selection(&self) -> &[EntityRef] {
        &self.selection
    }

    /// Display snapshot of the selection; `Some` only when exactly one
    /// entity is selected.
    pub fn selected_properties(&self) -> Option<&EntityProperties> {
        self.selection_snapshot.as_ref()
    }

    /// Anchors near the idle pointer, for hover display.
    pub fn hovered_anchors(&self) -> &[AnchorPoint] {
        &self.hovered_anchors
    }

    /// The anchor an active gesture is snapped to, if any.
    pub fn snap_indicator(&self) -> Option<&AnchorPoint> {
        self.snap_indicator.as_ref()
    }

    /// Cursor the host should display.
    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    /// The last pointer position in world space.
    pub fn cursor_world_position(&self) -> Option<Point> {
        self.last_cursor_world
    }

    /// Preview entity for the draw gesture in progress.
    pub fn preview(&self) -> Option<Entity> {
        self.tools.preview()
    }

    /// The marquee box while box-selecting.
    pub fn marquee_rect(&self) -> Option<Rect> {
        match self.interaction {
            Interaction::Marquee { start, current } => Some(Rect::from_points(start, current)),
            _ => None,
        }
    }

    /// The active tool.
    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    /// Switch tools, cancelling any pending gesture.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool);
        self.interaction = Interaction::Idle;
        self.snap_indicator = None;
        self.cursor = CursorIcon::Crosshair;
        self.notify();
    }

    /// Abort any in-progress gesture without creating or changing
    /// entities. Selection is untouched.
    pub fn cancel(&mut self) {
        self.tools.cancel();
        self.interaction = Interaction::Idle;
        self.snap_indicator = None;
        self.cursor = CursorIcon::Crosshair;
        self.notify();
    }

    pub fn snap_enabled(&self) -> bool {
        self.store.snap_enabled()
    }

    pub fn ortho_enabled(&self) -> bool {
        self.store.ortho_enabled()
    }

    /// Flip anchor snapping.
    pub fn toggle_snap(&mut self) {
        self.store.toggle_snap();
        if !self.store.snap_enabled() {
            self.snap_indicator = None;
        }
        self.notify();
    }

    /// Flip the orthogonal line constraint.
    pub fn toggle_ortho(&mut self) {
        self.store.toggle_ortho();
        self.notify();
    }

    /// Zoom by a factor, keeping the given screen point fixed. The new
    /// view is published back to the store.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        self.camera.zoom_at(screen_point, factor);
        self.store.set_zoom(self.camera.zoom);
        self.store.set_pan_offset(self.camera.offset);
        self.notify();
    }

    /// Pan the view by a screen-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.camera.pan(delta);
        self.store.set_pan_offset(self.camera.offset);
        self.notify();
    }

    /// Select a single entity. Dimensions are not selectable.
    pub fn select(&mut self, target: EntityRef) {
        if target.kind == EntityKind::Dimension || self.document.get(target).is_none() {
            return;
        }
        self.selection = vec![target];
        self.notify();
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.notify();
    }

    /// Copy the selected entity to the clipboard, replacing any
    /// previous entry. Requires a single selected entity.
    pub fn copy_selected(&mut self) {
        let Some(target) = self.single_selection() else {
            return;
        };
        if target.kind == EntityKind::Dimension {
            return;
        }
        if let Some(entity) = self.document.get(target) {
            self.store.copy_entity(entity);
            self.notify();
        }
    }

    /// Paste the clipboard entity with a fresh id, re-centered at the
    /// last cursor position (or the viewport center if the pointer was
    /// never seen). The pasted entity becomes the selection.
    pub fn paste(&mut self) {
        let Some(mut entity) = self.store.clipboard().cloned() else {
            return;
        };
        entity.regenerate_id();
        let target = self
            .last_cursor_world
            .unwrap_or_else(|| self.viewport_center_world());
        transform::place_at(&mut entity, target);

        let pasted = entity.entity_ref();
        log::debug!("pasted {:?} at {:?}", pasted.kind, target);
        self.document.add(entity);
        self.selection = vec![pasted];
        self.notify();
    }

    /// Delete all selected entities, recording them in the store's
    /// delete history. No-op when nothing is selected.
    pub fn delete_selected(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let mut removed = Vec::new();
        for target in std::mem::take(&mut self.selection) {
            if let Some(entity) = self.document.remove(target) {
                removed.push(entity);
            }
        }
        if !removed.is_empty() {
            log::debug!("deleted {} entities", removed.len());
            self.store.add_deleted_entities(removed);
        }
        self.notify();
    }

    /// Freeze or unfreeze every selected entity. Idempotent.
    pub fn set_selected_frozen(&mut self, frozen: bool) {
        if self.selection.is_empty() {
            return;
        }
        for target in self.selection.clone() {
            if let Some(mut entity) = self.document.get(target) {
                entity.set_frozen(frozen);
                self.document.replace(entity);
            }
        }
        self.notify();
    }

    /// Apply an inspector update to an entity.
    pub fn apply_property_update(&mut self, target: EntityRef, update: &PropertyUpdate) {
        let Some(mut entity) = self.document.get(target) else {
            return;
        };
        properties::apply_property_update(&mut entity, update, self.viewport.height);
        self.document.replace(entity);
        self.notify();
    }

    /// Handle a pointer-down in screen coordinates.
    pub fn pointer_down(&mut self, screen: Point, button: MouseButton) {
        let world = self.camera.screen_to_world(screen);
        self.last_cursor_world = Some(world);

        // Middle button pans, exclusive of everything else
        if button == MouseButton::Middle {
            self.interaction = Interaction::Panning {
                last_screen: screen,
            };
            self.cursor = CursorIcon::Grabbing;
            self.notify();
            return;
        }
        if button != MouseButton::Left {
            return;
        }

        if self.tools.current_tool.is_drawing_tool() {
            let snapped = self.snap_point(world, None);
            self.hovered_anchors.clear();
            if let Some(entity) = self.tools.begin(snapped.point) {
                self.commit_entity(entity);
                self.snap_indicator = None;
                self.interaction = Interaction::Idle;
            } else {
                self.snap_indicator = snapped.anchor;
                self.interaction = Interaction::Drawing;
            }
            self.notify();
            return;
        }

        self.select_pointer_down(world);
    }

    /// Handle a pointer-move in screen coordinates.
    pub fn pointer_move(&mut self, screen: Point) {
        let world = self.camera.screen_to_world(screen);
        self.last_cursor_world = Some(world);

        match self.interaction {
            Interaction::Panning { last_screen } => {
                self.camera.pan(screen - last_screen);
                self.store.set_pan_offset(self.camera.offset);
                self.interaction = Interaction::Panning {
                    last_screen: screen,
                };
                self.notify();
            }
            Interaction::Drawing => {
                let point = self.adjusted_draw_point(world);
                self.tools.update(point);
                self.notify();
            }
            Interaction::Dragging {
                target,
                grab_offset,
            } => self.drag_move(world, target, grab_offset),
            Interaction::Resizing { target, handle } => self.resize_move(world, target, handle),
            Interaction::Rotating { target, prev_angle } => {
                self.rotate_move(world, target, prev_angle)
            }
            Interaction::Marquee { start, .. } => {
                self.interaction = Interaction::Marquee {
                    start,
                    current: world,
                };
                self.notify();
            }
            Interaction::Idle => self.hover_move(world),
        }
    }

    /// Handle a pointer-up in screen coordinates.
    pub fn pointer_up(&mut self, screen: Point, button: MouseButton) {
        let world = self.camera.screen_to_world(screen);
        self.last_cursor_world = Some(world);

        match self.interaction {
            Interaction::Panning { .. } => {
                if button != MouseButton::Middle {
                    return;
                }
                // A draw gesture interrupted by a pan resumes
                self.interaction = if self.tools.is_active() {
                    Interaction::Drawing
                } else {
                    Interaction::Idle
                };
                self.cursor = CursorIcon::Crosshair;
                self.notify();
            }
            Interaction::Drawing => {
                if button != MouseButton::Left {
                    return;
                }
                let point = self.adjusted_draw_point(world);
                if let Some(entity) = self.tools.end(point) {
                    self.commit_entity(entity);
                }
                if !self.tools.is_active() {
                    self.interaction = Interaction::Idle;
                    self.snap_indicator = None;
                }
                self.notify();
            }
            Interaction::Dragging { .. }
            | Interaction::Resizing { .. }
            | Interaction::Rotating { .. } => {
                if button != MouseButton::Left {
                    return;
                }
                self.interaction = Interaction::Idle;
                self.snap_indicator = None;
                self.cursor = CursorIcon::Crosshair;
                self.notify();
            }
            Interaction::Marquee { start, .. } => {
                if button != MouseButton::Left {
                    return;
                }
                self.selection = self.entities_in_box(Rect::from_points(start, world));
                self.interaction = Interaction::Idle;
                self.notify();
            }
            Interaction::Idle => {}
        }
    }

    fn select_pointer_down(&mut self, world: Point) {
        // Handle grab on the selected entity takes priority. Frozen
        // entities expose no handles, so the hit test vetoes them.
        if let Some(target) = self.single_selection() {
            if let Some(entity) = self.document.get(target) {
                let tolerance = self.camera.world_units(HANDLE_SIZE);
                let rotate_offset = self.camera.world_units(ROTATE_HANDLE_OFFSET);
                if let Some(handle) =
                    handles::hit_test_handles(&entity, world, tolerance, rotate_offset)
                {
                    self.interaction = if handle == HandleKind::Rotate {
                        Interaction::Rotating {
                            target,
                            prev_angle: transform::pointer_angle(entity.pivot(), world),
                        }
                    } else {
                        Interaction::Resizing { target, handle }
                    };
                    self.cursor = CursorIcon::Grabbing;
                    self.notify();
                    return;
                }
            }
        }

        let tolerance = self.camera.world_units(HIT_TOLERANCE);
        if let Some(target) = hit::find_entity_at_point(&self.document, world, tolerance) {
            self.selection = vec![target];
            if let Some(entity) = self.document.get(target) {
                if entity.frozen() {
                    // Frozen entities select but never start a drag
                    self.interaction = Interaction::Idle;
                } else {
                    let grab_offset = world - transform::drag_reference(&entity);
                    self.interaction = Interaction::Dragging {
                        target,
                        grab_offset,
                    };
                    self.cursor = CursorIcon::Move;
                }
            }
            self.notify();
            return;
        }

        self.selection.clear();
        self.interaction = Interaction::Marquee {
            start: world,
            current: world,
        };
        self.notify();
    }

    fn drag_move(&mut self, world: Point, target: EntityRef, grab_offset: Vec2) {
        let candidate = world - grab_offset;
        let snapped = self.snap_point(candidate, Some(target.id));
        let Some(mut entity) = self.document.get(target) else {
            return;
        };
        transform::move_entity_to(&mut entity, snapped.point);

        // Magnetic entity-to-entity alignment on top of position snap
        if self.store.snap_enabled() {
            let threshold = self.camera.world_units(SNAP_DISTANCE);
            if let Some(align) = snap::entity_snap_offset(&entity, &self.document, threshold) {
                entity.translate(align);
            }
        }

        self.document.replace(entity);
        self.snap_indicator = snapped.anchor;
        self.hovered_anchors.clear();
        self.cursor = CursorIcon::Move;
        self.notify();
    }

    fn resize_move(&mut self, world: Point, target: EntityRef, handle: HandleKind) {
        let snapped = self.snap_point(world, Some(target.id));
        let Some(entity) = self.document.get(target) else {
            return;
        };
        let resized = transform::resize_entity(&entity, handle, snapped.point);
        self.document.replace(resized);

        self.snap_indicator = snapped.anchor;
        self.hovered_anchors.clear();
        self.cursor = CursorIcon::Grabbing;
        self.notify();
    }

    fn rotate_move(&mut self, world: Point, target: EntityRef, prev_angle: f64) {
        let Some(mut entity) = self.document.get(target) else {
            return;
        };
        let angle = transform::pointer_angle(entity.pivot(), world);
        entity.set_rotation(entity.rotation() + (angle - prev_angle));
        self.document.replace(entity);

        self.interaction = Interaction::Rotating {
            target,
            prev_angle: angle,
        };
        self.cursor = CursorIcon::Grabbing;
        self.notify();
    }

    fn hover_move(&mut self, world: Point) {
        self.snap_indicator = None;

        // Cursor feedback over the selected entity's handles
        if let Some(target) = self.single_selection() {
            if let Some(entity) = self.document.get(target) {
                let tolerance = self.camera.world_units(HANDLE_SIZE);
                let rotate_offset = self.camera.world_units(ROTATE_HANDLE_OFFSET);
                if let Some(handle) =
                    handles::hit_test_handles(&entity, world, tolerance, rotate_offset)
                {
                    self.cursor = handles::cursor_for_handle(handle);
                    self.hovered_anchors.clear();
                    self.notify();
                    return;
                }
            }
        }

        let radius = self.camera.world_units(SNAP_DISTANCE * HOVER_RADIUS_FACTOR);
        self.hovered_anchors = snap::anchors_near(world, &self.document, radius);
        self.cursor = CursorIcon::Crosshair;
        self.notify();
    }

    /// Snap a world point against the document, honoring the snap
    /// toggle and scaling the threshold to the current zoom.
    fn snap_point(&self, target: Point, exclude: Option<EntityId>) -> SnapResult {
        if !self.store.snap_enabled() {
            return SnapResult::none(target);
        }
        let threshold = self.camera.world_units(SNAP_DISTANCE);
        snap::snap_to_nearest_anchor(target, &self.document, threshold, exclude)
    }

    /// Snap then ortho-constrain (line tool only) a draw point, and
    /// refresh the snap indicator.
    fn adjusted_draw_point(&mut self, world: Point) -> Point {
        let snapped = self.snap_point(world, None);
        self.snap_indicator = snapped.anchor;
        self.hovered_anchors.clear();

        let mut point = snapped.point;
        if self.tools.current_tool == ToolKind::Line && self.store.ortho_enabled() {
            if let DrawState::Active { start, .. } = &self.tools.state {
                point = transform::ortho_constrain(*start, point);
            }
        }
        point
    }

    fn commit_entity(&mut self, entity: Entity) {
        log::debug!("committed {:?} to document", entity.kind());
        self.document.add(entity);
    }

    /// Entities fully contained in the box, in document order.
    /// Dimensions are not selectable.
    fn entities_in_box(&self, rect: Rect) -> Vec<EntityRef> {
        self.document
            .iter()
            .filter(|entity| entity.kind() != EntityKind::Dimension)
            .filter(|entity| {
                let points = entity.extent_points();
                !points.is_empty()
                    && points.iter().all(|p| {
                        p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
                    })
            })
            .map(|entity| entity.entity_ref())
            .collect()
    }

    fn single_selection(&self) -> Option<EntityRef> {
        (self.selection.len() == 1).then(|| self.selection[0])
    }

    fn viewport_center_world(&self) -> Point {
        let center = Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0);
        self.camera.screen_to_world(center)
    }

    fn notify(&mut self) {
        self.revision += 1;
        self.selection_snapshot = self
            .single_selection()
            .and_then(|target| self.document.get(target))
            .and_then(|entity| properties::entity_properties(&entity, self.viewport.height));
        if let Some(listener) = self.listener.as_mut() {
            listener();
        }
    }
}
