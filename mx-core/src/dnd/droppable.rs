// SPDX-License-Identifier: LGPL-3.0-only
use super::{CaptureListener, DragOver, DropEvent};
use crate::actor::ActorId;
use crate::error::Result;
use crate::event::{PointerEvent, PointerEventKind};
use crate::signal::Handlers;
use crate::stage::Stage;
use crate::update::Update;

/// Predicate deciding whether a drop target accepts a dragged actor.
pub type AcceptDrop = Box<dyn Fn(ActorId) -> bool>;

/// The droppable role of an actor.
pub struct Droppable {
    enabled: bool,
    accept: Option<AcceptDrop>,
    /// Emitted when a dragged actor enters the target.
    pub over_in: Handlers<DragOver>,
    /// Emitted when a dragged actor leaves the target.
    pub over_out: Handlers<DragOver>,
    /// Emitted when a dragged actor is released over the target.
    pub drop: Handlers<DropEvent>,
}

impl Droppable {
    /// Create a disabled droppable role that accepts everything.
    pub fn new() -> Self {
        Self {
            enabled: false,
            accept: None,
            over_in: Handlers::new(),
            over_out: Handlers::new(),
            drop: Handlers::new(),
        }
    }

    /// Returns true if the target is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Only accept dragged actors for which the predicate returns true.
    pub fn set_accept(&mut self, accept: impl Fn(ActorId) -> bool + 'static) {
        self.accept = Some(Box::new(accept));
    }

    /// Accept every dragged actor again.
    pub fn clear_accept(&mut self) {
        self.accept = None;
    }

    /// Returns true if the target accepts the dragged actor.
    pub fn accepts(&self, draggable: ActorId) -> bool {
        self.accept.as_ref().map_or(true, |accept| accept(draggable))
    }
}

impl Default for Droppable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Droppable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Droppable")
            .field("enabled", &self.enabled)
            .field("filtered", &self.accept.is_some())
            .finish_non_exhaustive()
    }
}

/// Stage wide drop target tracking, alive while at least one droppable is enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropContext {
    pub(crate) targets: Vec<ActorId>,
    pub(crate) last_target: Option<ActorId>,
}

impl DropContext {
    /// The enabled drop targets, in enabling order.
    pub fn targets(&self) -> &[ActorId] {
        &self.targets
    }

    /// The target the dragged actor is currently over.
    pub fn current_target(&self) -> Option<ActorId> {
        self.last_target
    }
}

impl Stage {
    /// Give an actor the droppable role, or return the existing one.
    ///
    /// The role starts disabled, see [Stage::enable_drop].
    pub fn make_droppable(&mut self, id: ActorId) -> Result<&mut Droppable> {
        Ok(self.get_mut(id)?.droppable.get_or_insert_with(Droppable::new))
    }

    /// The droppable role of an actor.
    pub fn droppable(&self, id: ActorId) -> Option<&Droppable> {
        self.actor(id)?.droppable.as_ref()
    }

    /// The droppable role of an actor, mutably.
    pub fn droppable_mut(&mut self, id: ActorId) -> Option<&mut Droppable> {
        self.actor_mut(id)?.droppable.as_mut()
    }

    /// The stage wide drop tracking, if any droppable is enabled.
    pub fn drop_context(&self) -> Option<&DropContext> {
        self.drop_context.as_ref()
    }

    /// Register an actor as drop target, creating the role if needed.
    ///
    /// The actor must be on the stage, otherwise a warning is logged and nothing happens.
    /// Enabling an enabled droppable does nothing.
    pub fn enable_drop(&mut self, id: ActorId) {
        if !self.is_on_stage(id) {
            log::warn!("Droppable actor {} can only be enabled while it is on the stage", id);
            return;
        }

        let Ok(droppable) = self.make_droppable(id) else {
            return;
        };

        if droppable.enabled {
            return;
        }
        droppable.enabled = true;

        match self.drop_context.as_mut() {
            Some(context) => context.targets.push(id),
            None => {
                self.drop_context = Some(DropContext {
                    targets: vec![id],
                    last_target: None,
                });
                self.install_capture(CaptureListener::DropTargets);
            },
        }

        log::debug!("Enabled dropping on {}", id);
    }

    /// Unregister a drop target. The last one tears the stage wide tracking down.
    ///
    /// Disabling a disabled droppable does nothing.
    pub fn disable_drop(&mut self, id: ActorId) {
        let Some(droppable) = self.droppable_mut(id) else {
            return;
        };

        if !droppable.enabled {
            return;
        }
        droppable.enabled = false;

        if let Some(context) = self.drop_context.as_mut() {
            context.targets.retain(|target| *target != id);
            if context.last_target == Some(id) {
                context.last_target = None;
            }

            if context.targets.is_empty() {
                self.drop_context = None;
                self.remove_capture(CaptureListener::DropTargets);
            }
        }

        log::debug!("Disabled dropping on {}", id);
    }

    /// Returns true if the actor is an enabled drop target.
    pub fn is_drop_enabled(&self, id: ActorId) -> bool {
        self.droppable(id).is_some_and(Droppable::is_enabled)
    }

    /// Returns true if the actor is an enabled drop target accepting the dragged actor.
    pub fn accepts_drop(&self, target: ActorId, draggable: ActorId) -> bool {
        self.droppable(target)
            .is_some_and(|droppable| droppable.enabled && droppable.accepts(draggable))
    }

    /// The drop target for a drag over the picked actor.
    ///
    /// A picked drop target decides alone: when it refuses, its ancestors are not asked.
    fn find_drop_target(&self, picked: ActorId, dragged: ActorId) -> Option<ActorId> {
        if self.is_drop_enabled(picked) {
            return self.accepts_drop(picked, dragged).then_some(picked);
        }

        self.ancestors(picked)
            .find(|ancestor| self.accepts_drop(*ancestor, dragged))
    }

    pub(crate) fn drop_capture(&mut self, event: &PointerEvent) -> Update {
        if event.kind == PointerEventKind::Press {
            return Update::empty();
        }

        let Some(dragged) = self.dragged_actor() else {
            return Update::empty();
        };

        // Look through the dragged actor.
        let was_visible = match self.actor_mut(dragged) {
            Some(actor) => std::mem::replace(&mut actor.visible, false),
            None => return Update::empty(),
        };
        let picked = self.actor_at(event.position);
        if let Some(actor) = self.actor_mut(dragged) {
            actor.visible = was_visible;
        }

        let Some(picked) = picked else {
            return Update::empty();
        };

        let candidate = self.find_drop_target(picked, dragged);
        let Some(context) = self.drop_context.as_mut() else {
            return Update::empty();
        };

        if let Some(last) = context.last_target {
            if Some(last) != candidate {
                context.last_target = None;
                if let Some(droppable) = self.droppable_mut(last) {
                    droppable.over_out.emit(&DragOver {
                        target: last,
                        draggable: dragged,
                    });
                }
                log::trace!("Dragged actor {} left drop target {}", dragged, last);
                return Update::DRAW;
            }
        }

        let Some(target) = candidate else {
            return Update::empty();
        };

        match event.kind {
            PointerEventKind::Motion if context.last_target.is_none() => {
                context.last_target = Some(target);
                if let Some(droppable) = self.droppable_mut(target) {
                    droppable.over_in.emit(&DragOver {
                        target,
                        draggable: dragged,
                    });
                }
                log::trace!("Dragged actor {} entered drop target {}", dragged, target);
                Update::DRAW
            },
            PointerEventKind::Release if context.last_target.is_some() => {
                let position = match self.transform_stage_point(target, event.position) {
                    Ok(point) => point,
                    Err(err) => {
                        log::trace!("Ignoring drop on {}: {}", target, err);
                        return Update::empty();
                    },
                };

                if let Some(context) = self.drop_context.as_mut() {
                    context.last_target = None;
                }

                if let Some(droppable) = self.droppable_mut(target) {
                    droppable.drop.emit(&DropEvent {
                        target,
                        draggable: dragged,
                        position,
                        button: event.button,
                        modifiers: event.modifiers,
                    });
                }
                log::debug!("Dropped {} on {}", dragged, target);
                Update::DRAW
            },
            _ => Update::empty(),
        }
    }
}
