// SPDX-License-Identifier: LGPL-3.0-only
use crate::actor::{Actor, ActorId};
use crate::config::MxConfig;
use crate::dnd::droppable::DropContext;
use crate::dnd::CaptureListener;
use crate::error::{MxError, Result};
use crate::geometry::Padding;
use crate::layout::{FixedLayout, LayoutManager};
use nalgebra::{Point2, Vector2};
use slotmap::SlotMap;

mod coords;
mod dispatch;
mod negotiate;
mod tree;

/// The actor arena and the root of the actor tree.
///
/// The stage owns every actor, runs size negotiation and allocation, picks actors
/// under the pointer and dispatches pointer events to the drag/drop recognizers.
pub struct Stage {
    actors: SlotMap<ActorId, Actor>,
    root: ActorId,
    config: MxConfig,
    size: Vector2<f32>,
    drag_marker: Option<ActorId>,
    pub(crate) drop_context: Option<DropContext>,
    captures: Vec<CaptureListener>,
}

impl Stage {
    /// Create a stage with a fixed layout root sized by `config.stage`.
    pub fn new(config: MxConfig) -> Self {
        let size = config.stage.size;
        let mut stage = Self {
            actors: SlotMap::with_key(),
            root: ActorId::default(),
            config,
            size,
            drag_marker: None,
            drop_context: None,
            captures: Vec::new(),
        };

        stage.root = stage.create_actor(FixedLayout::new());
        stage.set_name(stage.root, "stage");
        stage
    }

    /// The root actor.
    pub fn root(&self) -> ActorId {
        self.root
    }

    /// The configuration the stage was created with.
    pub fn config(&self) -> &MxConfig {
        &self.config
    }

    /// Size of the stage.
    pub fn size(&self) -> Vector2<f32> {
        self.size
    }

    /// Resize the stage.
    pub fn set_size(&mut self, size: Vector2<f32>) {
        self.size = Vector2::new(size.x.max(0.0), size.y.max(0.0));
        self.queue_relayout(self.root);
    }

    /// Create a detached actor with the given layout manager.
    pub fn create_actor(&mut self, layout: impl LayoutManager + 'static) -> ActorId {
        self.actors.insert(Actor::new(Box::new(layout)))
    }

    /// Get an actor.
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id)
    }

    pub(crate) fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id)
    }

    pub(crate) fn get(&self, id: ActorId) -> Result<&Actor> {
        self.actor(id).ok_or(MxError::UnknownActor(id))
    }

    pub(crate) fn get_mut(&mut self, id: ActorId) -> Result<&mut Actor> {
        self.actor_mut(id).ok_or(MxError::UnknownActor(id))
    }

    /// Returns true if the handle names a live actor.
    pub fn contains(&self, id: ActorId) -> bool {
        self.actor(id).is_some()
    }

    /// Number of live actors, the root included.
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub(crate) fn take_actor(&mut self, id: ActorId) -> Option<Actor> {
        self.actors.remove(id)
    }

    /// Set the debug name of an actor.
    pub fn set_name(&mut self, id: ActorId, name: impl Into<String>) {
        if let Some(actor) = self.actor_mut(id) {
            actor.name = Some(name.into());
        }
    }

    /// Whether the actor itself is visible.
    pub fn is_visible(&self, id: ActorId) -> bool {
        self.actor(id).is_some_and(|actor| actor.visible)
    }

    /// Show or hide an actor.
    pub fn set_visible(&mut self, id: ActorId, visible: bool) {
        let Some(actor) = self.actor_mut(id) else {
            return;
        };

        if actor.visible == visible {
            return;
        }

        actor.visible = visible;
        let parent = actor.parent;
        self.queue_relayout(parent.unwrap_or(id));
    }

    /// Set whether an actor can be picked.
    pub fn set_reactive(&mut self, id: ActorId, reactive: bool) {
        if let Some(actor) = self.actor_mut(id) {
            actor.reactive = reactive;
        }
    }

    /// Set the inner padding of an actor.
    pub fn set_padding(&mut self, id: ActorId, padding: Padding) {
        let Some(actor) = self.actor_mut(id) else {
            return;
        };

        if actor.padding != padding {
            actor.padding = padding;
            self.queue_relayout(id);
        }
    }

    /// Set the position used by fixed layout parents.
    pub fn set_position(&mut self, id: ActorId, position: Point2<f32>) {
        let Some(actor) = self.actor_mut(id) else {
            return;
        };

        if actor.position != position {
            actor.position = position;
            let parent = actor.parent;
            self.queue_relayout(parent.unwrap_or(id));
        }
    }

    /// Move an actor by the given offset.
    pub fn move_by(&mut self, id: ActorId, delta: Vector2<f32>) {
        if let Some(actor) = self.actor(id) {
            let position = actor.position + delta;
            self.set_position(id, position);
        }
    }

    /// Downcast the layout manager of an actor.
    pub fn layout_manager<T: LayoutManager>(&self, id: ActorId) -> Option<&T> {
        self.actor(id)?.layout().as_any().downcast_ref::<T>()
    }

    /// Mutate the layout manager of an actor and queue a relayout.
    ///
    /// Fails if the actor is unknown or has a different layout manager.
    pub fn with_layout_mut<T: LayoutManager, R>(
        &mut self,
        id: ActorId,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R> {
        let actor = self.get_mut(id)?;
        let layout = (*actor.layout)
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or(MxError::NotAContainer {
                actor: id,
                expected: std::any::type_name::<T>(),
            })?;

        let result = f(layout);
        self.queue_relayout(id);
        Ok(result)
    }

    /// The draggable currently being dragged, if any.
    pub fn dragged_actor(&self) -> Option<ActorId> {
        self.drag_marker
    }

    pub(crate) fn set_drag_marker(&mut self, marker: Option<ActorId>) {
        self.drag_marker = marker;
    }

    /// The installed capture listeners, in dispatch order.
    pub fn capture_listeners(&self) -> &[CaptureListener] {
        &self.captures
    }

    pub(crate) fn install_capture(&mut self, listener: CaptureListener) {
        if !self.captures.contains(&listener) {
            log::trace!("Installing capture listener {:?}", listener);
            self.captures.push(listener);
        }
    }

    pub(crate) fn remove_capture(&mut self, listener: CaptureListener) {
        self.captures.retain(|installed| *installed != listener);
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(MxConfig::default())
    }
}
