// SPDX-License-Identifier: LGPL-3.0-only
use crate::dnd::draggable::Draggable;
use crate::dnd::droppable::Droppable;
use crate::geometry::{ActorBox, Padding};
use crate::layout::LayoutManager;
use nalgebra::Point2;
use slotmap::Key;
use std::fmt;

slotmap::new_key_type! {
    /// A generational handle to an actor living on a [Stage](crate::stage::Stage).
    ///
    /// Handles of destroyed actors never alias newer actors.
    pub struct ActorId;
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = self.data().as_ffi();
        write!(f, "#{}v{}", raw & 0xffff_ffff, raw >> 32)
    }
}

/// A node of the actor tree.
///
/// Actors are owned by the stage and manipulated through it; this type only exposes read access.
pub struct Actor {
    pub(crate) name: Option<String>,
    pub(crate) parent: Option<ActorId>,
    pub(crate) children: Vec<ActorId>,
    pub(crate) allocation: ActorBox,
    pub(crate) position: Point2<f32>,
    pub(crate) visible: bool,
    pub(crate) reactive: bool,
    pub(crate) padding: Padding,
    pub(crate) layout: Box<dyn LayoutManager>,
    pub(crate) needs_allocation: bool,
    pub(crate) draggable: Option<Draggable>,
    pub(crate) droppable: Option<Droppable>,
}

impl Actor {
    pub(crate) fn new(layout: Box<dyn LayoutManager>) -> Self {
        Self {
            name: None,
            parent: None,
            children: Vec::new(),
            allocation: ActorBox::default(),
            position: Point2::origin(),
            visible: true,
            reactive: true,
            padding: Padding::ZERO,
            layout,
            needs_allocation: true,
            draggable: None,
            droppable: None,
        }
    }

    /// Debug name of the actor.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The parent actor, if attached.
    pub fn parent(&self) -> Option<ActorId> {
        self.parent
    }

    /// Children in paint order, the last one being on top.
    pub fn children(&self) -> &[ActorId] {
        &self.children
    }

    /// The last allocation, relative to the parent.
    pub fn allocation(&self) -> ActorBox {
        self.allocation
    }

    /// Position used by fixed layout parents.
    pub fn position(&self) -> Point2<f32> {
        self.position
    }

    /// Whether the actor is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the actor can be picked by pointer events.
    pub fn is_reactive(&self) -> bool {
        self.reactive
    }

    /// Inner padding used by the layout manager.
    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Whether the actor waits for a new allocation.
    pub fn needs_allocation(&self) -> bool {
        self.needs_allocation
    }

    /// The layout manager of this actor.
    pub fn layout(&self) -> &dyn LayoutManager {
        self.layout.as_ref()
    }

    /// The draggable role, if the actor has one.
    pub fn draggable(&self) -> Option<&Draggable> {
        self.draggable.as_ref()
    }

    /// The droppable role, if the actor has one.
    pub fn droppable(&self) -> Option<&Droppable> {
        self.droppable.as_ref()
    }
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("allocation", &self.allocation)
            .field("visible", &self.visible)
            .field("reactive", &self.reactive)
            .finish_non_exhaustive()
    }
}
