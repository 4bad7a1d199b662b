//! Tool system for the sketch canvas.

use crate::entities::{Circle, Entity, Line, LinearDimension, Rectangle};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Line,
    Rectangle,
    Circle,
    Dimension,
}

impl ToolKind {
    /// Whether this tool creates entities.
    pub fn is_drawing_tool(self) -> bool {
        !matches!(self, ToolKind::Select)
    }
}

/// State of a draw gesture.
#[derive(Debug, Clone, Default)]
pub enum DrawState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// First point placed, second point tracking the pointer.
    Active { start: Point, current: Point },
    /// Dimension placement: measured segment fixed, offset pending.
    PlacingOffset {
        start: Point,
        end: Point,
        current: Point,
    },
}

/// Manages the current tool and its draw gesture.
///
/// Points arriving here are already snapped (and ortho-constrained for
/// lines) by the caller; the manager only tracks gesture phases and
/// builds entities.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the draw gesture.
    pub state: DrawState,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool, cancelling any gesture in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.state = DrawState::Idle;
    }

    /// Handle a pointer-down. Most tools start a gesture here; the
    /// dimension tool advances one placement click per call and
    /// returns the finished entity on the third.
    pub fn begin(&mut self, point: Point) -> Option<Entity> {
        if !self.current_tool.is_drawing_tool() {
            return None;
        }

        match (&self.state, self.current_tool) {
            (DrawState::Idle, _) => {
                self.state = DrawState::Active {
                    start: point,
                    current: point,
                };
                None
            }
            (DrawState::Active { start, .. }, ToolKind::Dimension) => {
                self.state = DrawState::PlacingOffset {
                    start: *start,
                    end: point,
                    current: point,
                };
                None
            }
            (DrawState::PlacingOffset { start, end, .. }, ToolKind::Dimension) => {
                let dimension =
                    LinearDimension::new(*start, *end, dimension_offset(*start, *end, point));
                self.state = DrawState::Idle;
                Some(Entity::Dimension(dimension))
            }
            // A stray down during an active drag gesture restarts it
            (DrawState::Active { .. } | DrawState::PlacingOffset { .. }, _) => {
                self.state = DrawState::Active {
                    start: point,
                    current: point,
                };
                None
            }
        }
    }

    /// Update the gesture with the latest pointer position.
    pub fn update(&mut self, point: Point) {
        match &mut self.state {
            DrawState::Active { current, .. } | DrawState::PlacingOffset { current, .. } => {
                *current = point;
            }
            DrawState::Idle => {}
        }
    }

    /// Handle a pointer-up and return any created entity. Dimension
    /// gestures span several clicks and commit in [`ToolManager::begin`]
    /// instead.
    pub fn end(&mut self, point: Point) -> Option<Entity> {
        if self.current_tool == ToolKind::Dimension {
            self.update(point);
            return None;
        }

        if let DrawState::Active { start, .. } = self.state {
            let entity = self.build_entity(start, point);
            self.state = DrawState::Idle;
            entity
        } else {
            None
        }
    }

    /// Cancel the current gesture.
    pub fn cancel(&mut self) {
        self.state = DrawState::Idle;
    }

    /// Check if a draw gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, DrawState::Idle)
    }

    /// Preview entity for the gesture in progress.
    pub fn preview(&self) -> Option<Entity> {
        match &self.state {
            DrawState::Idle => None,
            DrawState::Active { start, current } => {
                if self.current_tool == ToolKind::Dimension {
                    Some(Entity::Dimension(LinearDimension::new(
                        *start, *current, 0.0,
                    )))
                } else {
                    self.build_entity(*start, *current)
                }
            }
            DrawState::PlacingOffset {
                start,
                end,
                current,
            } => Some(Entity::Dimension(LinearDimension::new(
                *start,
                *end,
                dimension_offset(*start, *end, *current),
            ))),
        }
    }

    fn build_entity(&self, start: Point, end: Point) -> Option<Entity> {
        match self.current_tool {
            ToolKind::Line => Some(Entity::Line(Line::new(start, end))),
            ToolKind::Rectangle => Some(Entity::Rectangle(Rectangle::new(start, end))),
            ToolKind::Circle => {
                let radius = start.distance(end);
                Some(Entity::Circle(Circle::new(start, radius)))
            }
            ToolKind::Select | ToolKind::Dimension => None,
        }
    }
}

/// Signed perpendicular distance from the measured segment to `point`,
/// matching the displacement convention of
/// [`LinearDimension::offset_segment`].
fn dimension_offset(start: Point, end: Point, point: Point) -> f64 {
    let seg = end - start;
    let len = seg.hypot();
    if len < f64::EPSILON {
        return 0.0;
    }
    seg.cross(point - start) / len
}
