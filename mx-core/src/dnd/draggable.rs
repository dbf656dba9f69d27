// SPDX-License-Identifier: LGPL-3.0-only
use super::{CaptureListener, DragAxis, DragBegin, DragContainment, DragEnd, DragMotion};
use crate::actor::ActorId;
use crate::config::DragConfig;
use crate::error::Result;
use crate::event::{Modifiers, PointerEvent, PointerEventKind};
use crate::signal::Handlers;
use crate::stage::Stage;
use crate::update::Update;
use nalgebra::Point2;

/// Where a draggable is in its gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragState {
    /// Waiting for a press.
    #[default]
    Idle,
    /// Pressed, waiting for the pointer to travel past the threshold.
    Armed,
    /// Dragging.
    Dragging,
}

/// Gesture state of an enabled draggable.
///
/// Settings are copied from the [Draggable] on press and stay fixed until release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragContext {
    pub(crate) state: DragState,
    pub(crate) press: Point2<f32>,
    pub(crate) button: u32,
    pub(crate) modifiers: Modifiers,
    pub(crate) threshold: u32,
    pub(crate) axis: DragAxis,
    pub(crate) containment: DragContainment,
    pub(crate) drag_actor: Option<ActorId>,
    pub(crate) last: Point2<f32>,
    pub(crate) last_stage: Point2<f32>,
}

impl DragContext {
    fn idle() -> Self {
        Self {
            state: DragState::Idle,
            press: Point2::origin(),
            button: 0,
            modifiers: Modifiers::empty(),
            threshold: 0,
            axis: DragAxis::None,
            containment: DragContainment::Disabled,
            drag_actor: None,
            last: Point2::origin(),
            last_stage: Point2::origin(),
        }
    }

    /// The gesture state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Press position in the draggable's coordinates.
    pub fn press_position(&self) -> Point2<f32> {
        self.press
    }

    /// The pressed button.
    pub fn button(&self) -> u32 {
        self.button
    }

    /// Modifiers at press time.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// The last pointer position in the reference actor's coordinates.
    pub fn last_position(&self) -> Point2<f32> {
        self.last
    }
}

/// The draggable role of an actor.
pub struct Draggable {
    threshold: u32,
    axis: DragAxis,
    containment: DragContainment,
    drag_actor: Option<ActorId>,
    pub(crate) context: Option<DragContext>,
    /// Emitted when a press turns into a drag.
    pub drag_begin: Handlers<DragBegin>,
    /// Emitted for every motion while dragging.
    pub drag_motion: Handlers<DragMotion>,
    /// Emitted when the drag ends.
    pub drag_end: Handlers<DragEnd>,
}

impl Draggable {
    /// Create a disabled draggable role with the configured defaults.
    pub fn new(config: &DragConfig) -> Self {
        Self {
            threshold: config.threshold,
            axis: config.axis,
            containment: DragContainment::Disabled,
            drag_actor: None,
            context: None,
            drag_begin: Handlers::new(),
            drag_motion: Handlers::new(),
            drag_end: Handlers::new(),
        }
    }

    /// Pointer travel in pixels, per axis, before a press becomes a drag.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Set the drag threshold. Zero starts dragging on press.
    pub fn set_threshold(&mut self, threshold: u32) {
        self.threshold = threshold;
    }

    /// The axis constraint.
    pub fn axis(&self) -> DragAxis {
        self.axis
    }

    /// Set the axis constraint.
    pub fn set_axis(&mut self, axis: DragAxis) {
        self.axis = axis;
    }

    /// The containment region.
    pub fn containment(&self) -> DragContainment {
        self.containment
    }

    /// Set the containment region.
    pub fn set_containment(&mut self, containment: DragContainment) {
        self.containment = containment;
    }

    /// The actor used as coordinate reference while dragging.
    pub fn drag_actor(&self) -> Option<ActorId> {
        self.drag_actor
    }

    /// Use another actor, such as a drag proxy, as coordinate reference while dragging.
    pub fn set_drag_actor(&mut self, drag_actor: Option<ActorId>) {
        self.drag_actor = drag_actor;
    }

    /// Returns true if dragging is enabled.
    pub fn is_enabled(&self) -> bool {
        self.context.is_some()
    }

    /// The gesture state, if enabled.
    pub fn context(&self) -> Option<&DragContext> {
        self.context.as_ref()
    }

    /// The gesture state. Disabled draggables are idle.
    pub fn state(&self) -> DragState {
        self.context.map(|context| context.state).unwrap_or_default()
    }
}

impl std::fmt::Debug for Draggable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Draggable")
            .field("threshold", &self.threshold)
            .field("axis", &self.axis)
            .field("containment", &self.containment)
            .field("drag_actor", &self.drag_actor)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl Stage {
    /// Give an actor the draggable role, or return the existing one.
    ///
    /// The role starts disabled, see [Stage::enable_drag].
    pub fn make_draggable(&mut self, id: ActorId) -> Result<&mut Draggable> {
        let config = self.config().drag.clone();
        Ok(self
            .get_mut(id)?
            .draggable
            .get_or_insert_with(|| Draggable::new(&config)))
    }

    /// The draggable role of an actor.
    pub fn draggable(&self, id: ActorId) -> Option<&Draggable> {
        self.actor(id)?.draggable.as_ref()
    }

    /// The draggable role of an actor, mutably.
    pub fn draggable_mut(&mut self, id: ActorId) -> Option<&mut Draggable> {
        self.actor_mut(id)?.draggable.as_mut()
    }

    /// Start listening for drags on an actor, creating the role if needed.
    ///
    /// The actor must be on the stage, otherwise a warning is logged and nothing happens.
    /// Enabling an enabled draggable does nothing.
    pub fn enable_drag(&mut self, id: ActorId) {
        if !self.is_on_stage(id) {
            log::warn!("Draggable actor {} can only be enabled while it is on the stage", id);
            return;
        }

        let Ok(draggable) = self.make_draggable(id) else {
            return;
        };

        if draggable.context.is_none() {
            draggable.context = Some(DragContext::idle());
            log::debug!("Enabled dragging on {}", id);
        }
    }

    /// Stop listening for drags. A drag in progress is dropped without `drag-end`.
    ///
    /// Disabling a disabled draggable does nothing.
    pub fn disable_drag(&mut self, id: ActorId) {
        let Some(draggable) = self.draggable_mut(id) else {
            return;
        };

        if draggable.context.take().is_none() {
            return;
        }

        self.remove_capture(CaptureListener::Drag(id));
        if self.dragged_actor() == Some(id) {
            self.set_drag_marker(None);
        }

        log::debug!("Disabled dragging on {}", id);
    }

    /// Returns true if the actor is an enabled draggable.
    pub fn is_drag_enabled(&self, id: ActorId) -> bool {
        self.draggable(id).is_some_and(Draggable::is_enabled)
    }

    /// The gesture state of a draggable. Actors without an enabled role are idle.
    pub fn drag_state(&self, id: ActorId) -> DragState {
        self.draggable(id).map(Draggable::state).unwrap_or_default()
    }

    fn drag_context_mut(&mut self, id: ActorId) -> Option<&mut DragContext> {
        self.draggable_mut(id)?.context.as_mut()
    }

    /// The actor whose coordinates the current drag is reported in.
    fn drag_reference(&self, id: ActorId, context: &DragContext) -> ActorId {
        match context.drag_actor {
            Some(drag_actor) if context.state == DragState::Dragging && self.contains(drag_actor) => {
                drag_actor
            },
            _ => id,
        }
    }

    pub(crate) fn drag_press(&mut self, id: ActorId, event: &PointerEvent) -> Update {
        let local = match self.transform_stage_point(id, event.position) {
            Ok(point) => point,
            Err(err) => {
                log::trace!("Ignoring press on draggable {}: {}", id, err);
                return Update::empty();
            },
        };

        let Some(draggable) = self.draggable_mut(id) else {
            return Update::empty();
        };

        let threshold = draggable.threshold;
        let Some(context) = draggable.context.as_mut() else {
            return Update::empty();
        };

        *context = DragContext {
            state: if threshold == 0 {
                DragState::Dragging
            } else {
                DragState::Armed
            },
            press: local,
            button: event.button,
            modifiers: event.modifiers,
            threshold,
            axis: draggable.axis,
            containment: draggable.containment,
            drag_actor: draggable.drag_actor,
            last: local,
            last_stage: event.position,
        };

        if threshold == 0 {
            draggable.drag_begin.emit(&DragBegin {
                draggable: id,
                position: local,
                button: event.button,
                modifiers: event.modifiers,
            });
            self.set_drag_marker(Some(id));
            log::debug!("Drag of {} started on press", id);
        } else {
            log::trace!("Draggable {} armed at {:?}", id, local);
        }

        self.install_capture(CaptureListener::Drag(id));
        Update::DRAW
    }

    pub(crate) fn drag_capture(&mut self, id: ActorId, event: &PointerEvent) -> Update {
        match event.kind {
            PointerEventKind::Press => Update::empty(),
            // Motion without the button held means the release was lost.
            PointerEventKind::Motion if !event.modifiers.contains(Modifiers::BUTTON1) => {
                self.drag_release(id, event)
            },
            PointerEventKind::Motion => self.drag_motion(id, event),
            PointerEventKind::Release => self.drag_release(id, event),
        }
    }

    fn drag_motion(&mut self, id: ActorId, event: &PointerEvent) -> Update {
        let Some(context) = self.draggable(id).and_then(|draggable| draggable.context) else {
            return Update::empty();
        };

        let position = self.contain(id, context.containment, event.position);

        match context.state {
            DragState::Idle => Update::empty(),
            DragState::Armed => {
                let Ok(local) = self.transform_stage_point(id, position) else {
                    return Update::empty();
                };

                let delta = context.axis.project(local - context.press);
                let threshold = context.threshold as f32;
                if delta.x.abs() < threshold && delta.y.abs() < threshold {
                    return Update::empty();
                }

                self.set_drag_marker(Some(id));
                let Some(draggable) = self.draggable_mut(id) else {
                    return Update::empty();
                };

                if let Some(context) = draggable.context.as_mut() {
                    context.state = DragState::Dragging;
                    context.last = local;
                    context.last_stage = position;
                }

                log::debug!("Drag of {} started after {:?}", id, delta);
                draggable.drag_begin.emit(&DragBegin {
                    draggable: id,
                    position: context.press,
                    button: context.button,
                    modifiers: context.modifiers,
                });
                draggable.drag_motion.emit(&DragMotion { draggable: id, delta });
                Update::DRAW
            },
            DragState::Dragging => {
                let reference = self.drag_reference(id, &context);
                let Ok(local) = self.transform_stage_point(reference, position) else {
                    return Update::empty();
                };

                let previous = self
                    .transform_stage_point(reference, context.last_stage)
                    .unwrap_or(context.last);
                let delta = context.axis.project(local - previous);

                if let Some(context) = self.drag_context_mut(id) {
                    context.last = local;
                    context.last_stage = position;
                }

                if let Some(draggable) = self.draggable_mut(id) {
                    draggable.drag_motion.emit(&DragMotion { draggable: id, delta });
                }
                Update::DRAW
            },
        }
    }

    fn drag_release(&mut self, id: ActorId, event: &PointerEvent) -> Update {
        let Some(context) = self.draggable(id).and_then(|draggable| draggable.context) else {
            return Update::empty();
        };

        match context.state {
            DragState::Idle => Update::empty(),
            DragState::Armed => {
                if let Some(context) = self.drag_context_mut(id) {
                    context.state = DragState::Idle;
                }
                self.remove_capture(CaptureListener::Drag(id));
                log::trace!("Draggable {} released before the threshold", id);
                Update::empty()
            },
            DragState::Dragging => {
                let reference = self.drag_reference(id, &context);
                let position = self.contain(id, context.containment, event.position);
                let local = match self.transform_stage_point(reference, position) {
                    Ok(point) => point,
                    Err(err) => {
                        log::trace!("Ignoring release of draggable {}: {}", id, err);
                        return Update::empty();
                    },
                };

                if let Some(context) = self.drag_context_mut(id) {
                    context.state = DragState::Idle;
                    context.last = local;
                    context.last_stage = position;
                }

                self.remove_capture(CaptureListener::Drag(id));
                if let Some(draggable) = self.draggable_mut(id) {
                    draggable.drag_end.emit(&DragEnd {
                        draggable: id,
                        position: local,
                    });
                }

                if self.dragged_actor() == Some(id) {
                    self.set_drag_marker(None);
                }

                log::debug!("Drag of {} ended at {:?}", id, local);
                Update::DRAW
            },
        }
    }
}
