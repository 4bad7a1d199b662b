//! Linework Core Library
//!
//! Platform-agnostic geometry and interaction engine for the Linework
//! 2D sketch tool.

pub mod anchor;
pub mod camera;
pub mod document;
pub mod engine;
pub mod entities;
pub mod handles;
pub mod hit;
pub mod properties;
pub mod snap;
pub mod store;
pub mod tools;
pub mod transform;

pub use anchor::{AnchorPoint, AnchorRole};
pub use camera::Camera;
pub use document::{DocumentError, DocumentResult, SketchDocument};
pub use engine::{MouseButton, SketchEngine};
pub use entities::{Circle, Color, Entity, EntityId, EntityKind, EntityRef, Line, LinearDimension, Rectangle};
pub use handles::{CursorIcon, Handle, HandleKind, HANDLE_SIZE, ROTATE_HANDLE_OFFSET};
pub use hit::{find_entity_at_point, HIT_TOLERANCE};
pub use properties::{DimensionUpdate, EntityDimensions, EntityProperties, PropertyUpdate};
pub use snap::{snap_to_nearest_anchor, SnapResult, HOVER_RADIUS_FACTOR, SNAP_DISTANCE};
pub use store::{MemoryStore, WorkspaceStore, DELETE_HISTORY_LIMIT};
pub use tools::{DrawState, ToolKind, ToolManager};
