// SPDX-License-Identifier: LGPL-3.0-only
use super::Stage;
use crate::actor::ActorId;
use crate::dnd::DragContainment;
use crate::error::{MxError, Result};
use crate::geometry::ActorBox;
use nalgebra::{Point2, Vector2};

impl Stage {
    /// Map a point from stage coordinates into the actor's coordinates.
    ///
    /// Fails with [MxError::NotTransformable] if the actor is not mapped.
    pub fn transform_stage_point(&self, id: ActorId, point: Point2<f32>) -> Result<Point2<f32>> {
        if !self.is_mapped(id) {
            return Err(MxError::NotTransformable(id));
        }

        Ok(point - self.stage_offset(id))
    }

    /// The allocation of an actor in stage coordinates.
    pub fn stage_box(&self, id: ActorId) -> Option<ActorBox> {
        let allocation = self.actor(id)?.allocation;
        let parent_offset = self
            .parent(id)
            .map(|parent| self.stage_offset(parent))
            .unwrap_or_else(Vector2::zeros);

        Some(allocation.translate(parent_offset))
    }

    /// Sum of the allocation origins of the actor and all its ancestors.
    fn stage_offset(&self, id: ActorId) -> Vector2<f32> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .filter_map(|actor| self.actor(actor))
            .fold(Vector2::zeros(), |offset, actor| {
                offset + Vector2::new(actor.allocation.x1, actor.allocation.y1)
            })
    }

    /// The topmost visible and reactive actor under a point in stage coordinates.
    ///
    /// Later siblings are above earlier ones and children are above their parent.
    /// Hidden actors hide their whole subtree.
    pub fn actor_at(&self, point: Point2<f32>) -> Option<ActorId> {
        self.pick(self.root, Vector2::zeros(), point)
    }

    fn pick(&self, id: ActorId, parent_offset: Vector2<f32>, point: Point2<f32>) -> Option<ActorId> {
        let actor = self.actor(id)?;
        if !actor.visible {
            return None;
        }

        let stage_box = actor.allocation.translate(parent_offset);
        let offset = Vector2::new(stage_box.x1, stage_box.y1);

        actor
            .children
            .iter()
            .rev()
            .find_map(|child| self.pick(*child, offset, point))
            .or_else(|| (actor.reactive && stage_box.contains(point)).then_some(id))
    }

    /// Clamp a stage point into the containment region of a draggable.
    pub(crate) fn contain(&self, id: ActorId, containment: DragContainment, point: Point2<f32>) -> Point2<f32> {
        let area = match containment {
            DragContainment::Disabled => None,
            DragContainment::Stage => Some(ActorBox::from_size(self.size)),
            DragContainment::Parent => self.parent(id).and_then(|parent| self.stage_box(parent)),
            DragContainment::Area(area) => Some(area),
        };

        area.map(|area| area.clamp_point(point)).unwrap_or(point)
    }
}
