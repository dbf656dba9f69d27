// SPDX-License-Identifier: LGPL-3.0-only
use super::Stage;
use crate::actor::ActorId;
use crate::dnd::draggable::DragState;
use crate::dnd::CaptureListener;
use crate::error::{MxError, Result};

impl Stage {
    /// The parent of an actor.
    pub fn parent(&self, id: ActorId) -> Option<ActorId> {
        self.actor(id)?.parent
    }

    /// The children of an actor in paint order.
    pub fn children(&self, id: ActorId) -> &[ActorId] {
        self.actor(id).map(|actor| actor.children()).unwrap_or(&[])
    }

    /// Iterate over the parent, grandparent, ... of an actor.
    pub fn ancestors(&self, id: ActorId) -> impl Iterator<Item = ActorId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// Returns true if the actor is the root or one of its descendants.
    pub fn is_on_stage(&self, id: ActorId) -> bool {
        if !self.contains(id) {
            return false;
        }

        id == self.root || self.ancestors(id).any(|ancestor| ancestor == self.root)
    }

    /// Returns true if the actor is on the stage and it and all its ancestors are visible.
    pub fn is_mapped(&self, id: ActorId) -> bool {
        self.is_on_stage(id)
            && self.is_visible(id)
            && self.ancestors(id).all(|ancestor| self.is_visible(ancestor))
    }

    /// Append a child to a parent.
    pub fn add_child(&mut self, parent: ActorId, child: ActorId) -> Result<()> {
        let index = self.get(parent)?.children.len();
        self.insert_child(parent, child, index)
    }

    /// Insert a child at the given paint order index, clamped to the child count.
    pub fn insert_child(&mut self, parent: ActorId, child: ActorId, index: usize) -> Result<()> {
        self.get(parent)?;
        if self.get(child)?.parent.is_some() {
            return Err(MxError::AlreadyParented(child));
        }

        if child == self.root {
            return Err(MxError::RootActor);
        }

        if parent == child || self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(MxError::Cycle { parent, child });
        }

        if !self.get(parent)?.layout.accepts_child(child) {
            return Err(MxError::ChildRefused { parent, child });
        }

        self.get_mut(child)?.parent = Some(parent);

        let parent_actor = self.get_mut(parent)?;
        let index = index.min(parent_actor.children.len());
        parent_actor.children.insert(index, child);
        parent_actor.layout.child_added(child);

        self.queue_relayout(parent);
        Ok(())
    }

    /// Detach a child from its parent. The child stays alive and can be added again.
    ///
    /// A drag in progress inside the detached subtree is cancelled.
    pub fn remove_child(&mut self, parent: ActorId, child: ActorId) -> Result<()> {
        if self.get(child)?.parent != Some(parent) {
            return Err(MxError::NotAChild { parent, child });
        }

        let parent_actor = self.get_mut(parent)?;
        parent_actor.children.retain(|c| *c != child);
        parent_actor.layout.child_removed(child);
        self.get_mut(child)?.parent = None;

        for id in self.subtree(child) {
            self.cancel_drag(id);
            if let Some(context) = self.drop_context.as_mut() {
                if context.last_target == Some(id) {
                    context.last_target = None;
                }
            }
        }

        self.queue_relayout(parent);
        Ok(())
    }

    /// Destroy an actor and all its descendants.
    ///
    /// Drag and drop roles are disabled first, so their capture listeners are gone
    /// before the actors are freed.
    pub fn destroy(&mut self, id: ActorId) -> Result<()> {
        if id == self.root {
            return Err(MxError::RootActor);
        }

        self.get(id)?;
        let subtree = self.subtree(id);

        for actor in &subtree {
            self.disable_drag(*actor);
            self.disable_drop(*actor);
        }

        if let Some(parent) = self.parent(id) {
            self.remove_child(parent, id)?;
        }

        for actor in subtree.into_iter().rev() {
            if self.dragged_actor() == Some(actor) {
                self.set_drag_marker(None);
            }
            self.take_actor(actor);
        }

        log::debug!("Destroyed actor {}", id);
        Ok(())
    }

    /// The actor and all its descendants, parents before children.
    pub(crate) fn subtree(&self, id: ActorId) -> Vec<ActorId> {
        let mut out = Vec::new();
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }

        out
    }

    /// Drop an in-progress press or drag without emitting anything.
    fn cancel_drag(&mut self, id: ActorId) {
        let Some(context) = self
            .actor_mut(id)
            .and_then(|actor| actor.draggable.as_mut())
            .and_then(|draggable| draggable.context.as_mut())
        else {
            return;
        };

        if context.state == DragState::Idle {
            return;
        }

        context.state = DragState::Idle;
        self.remove_capture(CaptureListener::Drag(id));
        if self.dragged_actor() == Some(id) {
            self.set_drag_marker(None);
        }

        log::debug!("Cancelled drag of {} because it left the stage", id);
    }
}
