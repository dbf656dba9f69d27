// SPDX-License-Identifier: LGPL-3.0-only
use crate::actor::ActorId;
use crate::error::MxError;
use crate::event::Modifiers;
use crate::geometry::ActorBox;
use nalgebra::{Point2, Vector2};
use std::str::FromStr;

/// Contains the [Draggable](draggable::Draggable) role and the drag state machine.
pub mod draggable;

/// Contains the [Droppable](droppable::Droppable) role and the drop target tracking.
pub mod droppable;

/// Restricts drag motion to one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragAxis {
    /// Free motion.
    #[default]
    None,
    /// Horizontal motion only.
    X,
    /// Vertical motion only.
    Y,
}

impl DragAxis {
    /// Zero the components of a delta that the axis does not allow.
    pub fn project(&self, delta: Vector2<f32>) -> Vector2<f32> {
        match self {
            DragAxis::None => delta,
            DragAxis::X => Vector2::new(delta.x, 0.0),
            DragAxis::Y => Vector2::new(0.0, delta.y),
        }
    }
}

impl FromStr for DragAxis {
    type Err = MxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(DragAxis::None),
            "x" | "horizontal" => Ok(DragAxis::X),
            "y" | "vertical" => Ok(DragAxis::Y),
            _ => Err(MxError::Config {
                key: "drag axis".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Region the pointer is clamped into while dragging, in stage coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragContainment {
    /// No clamping.
    #[default]
    Disabled,
    /// The stage bounds.
    Stage,
    /// The bounds of the draggable's parent.
    Parent,
    /// A fixed area.
    Area(ActorBox),
}

/// Emitted when a press turns into a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragBegin {
    /// The draggable actor.
    pub draggable: ActorId,
    /// Press position in the draggable's coordinates.
    pub position: Point2<f32>,
    /// The pressed button.
    pub button: u32,
    /// Modifiers at press time.
    pub modifiers: Modifiers,
}

/// Emitted for each pointer motion during a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragMotion {
    /// The draggable actor.
    pub draggable: ActorId,
    /// Pointer travel since the previous motion, projected on the drag axis.
    pub delta: Vector2<f32>,
}

/// Emitted when the drag ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEnd {
    /// The draggable actor.
    pub draggable: ActorId,
    /// Final pointer position in the reference actor's coordinates.
    pub position: Point2<f32>,
}

/// Emitted on a drop target when a dragged actor enters or leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOver {
    /// The drop target.
    pub target: ActorId,
    /// The dragged actor.
    pub draggable: ActorId,
}

/// Emitted on a drop target when the dragged actor is released over it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropEvent {
    /// The drop target.
    pub target: ActorId,
    /// The dragged actor.
    pub draggable: ActorId,
    /// Release position in the target's coordinates.
    pub position: Point2<f32>,
    /// The released button.
    pub button: u32,
    /// Modifiers at release time.
    pub modifiers: Modifiers,
}

/// A stage-wide listener that sees every pointer event before bubbling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureListener {
    /// Drop target tracking, installed while any droppable is enabled.
    DropTargets,
    /// The drag state machine of one draggable, installed from press to release.
    Drag(ActorId),
}
