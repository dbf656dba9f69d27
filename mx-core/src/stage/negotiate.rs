// SPDX-License-Identifier: LGPL-3.0-only
use super::Stage;
use crate::actor::ActorId;
use crate::geometry::ActorBox;
use crate::layout::{LayoutCx, RequestMode, SizeRequest};
use nalgebra::Vector2;

impl Stage {
    /// The `(min, natural)` width of an actor, optionally for a given height.
    pub fn preferred_width(&self, id: ActorId, for_height: Option<f32>) -> SizeRequest {
        match self.actor(id) {
            Some(actor) => actor
                .layout
                .preferred_width(&LayoutCx::new(self, id), for_height.map(|h| h.max(0.0))),
            None => SizeRequest::ZERO,
        }
    }

    /// The `(min, natural)` height of an actor, optionally for a given width.
    pub fn preferred_height(&self, id: ActorId, for_width: Option<f32>) -> SizeRequest {
        match self.actor(id) {
            Some(actor) => actor
                .layout
                .preferred_height(&LayoutCx::new(self, id), for_width.map(|w| w.max(0.0))),
            None => SizeRequest::ZERO,
        }
    }

    /// Which dimension the actor negotiates first.
    pub fn request_mode(&self, id: ActorId) -> RequestMode {
        self.actor(id)
            .map(|actor| actor.layout.request_mode())
            .unwrap_or_default()
    }

    /// The natural size of an actor, negotiated in its request mode.
    pub fn natural_size(&self, id: ActorId) -> Vector2<f32> {
        match self.request_mode(id) {
            RequestMode::HeightForWidth => {
                let width = self.preferred_width(id, None).natural;
                let height = self.preferred_height(id, Some(width)).natural;
                Vector2::new(width, height)
            },
            RequestMode::WidthForHeight => {
                let height = self.preferred_height(id, None).natural;
                let width = self.preferred_width(id, Some(height)).natural;
                Vector2::new(width, height)
            },
        }
    }

    /// Assign a box to an actor and recursively allocate its children.
    pub fn allocate(&mut self, id: ActorId, allocation: ActorBox) {
        let allocation = ActorBox::new(allocation.x1, allocation.y1, allocation.x2, allocation.y2);

        let children = match self.actor(id) {
            Some(actor) => actor
                .layout
                .allocate(&LayoutCx::new(self, id), allocation.size()),
            None => return,
        };

        if let Some(actor) = self.actor_mut(id) {
            actor.allocation = allocation;
            actor.needs_allocation = false;
        }

        for (child, child_box) in children {
            self.allocate(child, child_box);
        }
    }

    /// Mark an actor and all its ancestors as needing a new allocation.
    pub fn queue_relayout(&mut self, id: ActorId) {
        let mut current = Some(id);

        while let Some(actor_id) = current {
            let Some(actor) = self.actor_mut(actor_id) else {
                break;
            };
            actor.needs_allocation = true;
            current = actor.parent;
        }
    }

    /// Returns true if a layout pass is pending.
    pub fn needs_relayout(&self) -> bool {
        self.actor(self.root).is_some_and(|root| root.needs_allocation)
    }

    /// Run a layout pass if anything is dirty. Returns true if a pass ran.
    pub fn layout(&mut self) -> bool {
        if !self.needs_relayout() {
            return false;
        }

        log::trace!("Running layout pass for a {}x{} stage", self.size.x, self.size.y);
        self.allocate(self.root, ActorBox::from_size(self.size));
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::config::MxConfig;
    use crate::geometry::{ActorBox, Padding};
    use crate::layout::{FixedLayout, FixedSize, SizeRequest};
    use crate::stage::Stage;
    use nalgebra::{Point2, Vector2};

    #[test]
    fn test_root_takes_stage_size() {
        let mut stage = Stage::new(MxConfig::default());
        assert!(stage.needs_relayout());
        assert!(stage.layout());
        assert!(!stage.needs_relayout());
        assert!(!stage.layout());

        let root = stage.actor(stage.root()).unwrap();
        assert_eq!(root.allocation(), ActorBox::new(0.0, 0.0, 800.0, 600.0));

        stage.set_size(Vector2::new(320.0, 240.0));
        assert!(stage.layout());
        assert_eq!(stage.actor(stage.root()).unwrap().allocation().size(), Vector2::new(320.0, 240.0));
    }

    #[test]
    fn test_relayout_marks_ancestors() {
        let mut stage = Stage::new(MxConfig::default());
        let group = stage.create_actor(FixedLayout::new());
        let leaf = stage.create_actor(FixedSize::new(10.0, 10.0));
        stage.add_child(stage.root(), group).unwrap();
        stage.add_child(group, leaf).unwrap();
        stage.layout();
        assert!(!stage.actor(leaf).unwrap().needs_allocation());

        stage.queue_relayout(leaf);
        for id in [leaf, group, stage.root()] {
            assert!(stage.actor(id).unwrap().needs_allocation());
        }

        assert!(stage.layout());
        for id in [leaf, group, stage.root()] {
            assert!(!stage.actor(id).unwrap().needs_allocation());
        }
    }

    #[test]
    fn test_fixed_layout_bounding_box() {
        let mut stage = Stage::new(MxConfig::default());
        let group = stage.create_actor(FixedLayout::new());
        let a = stage.create_actor(FixedSize::new(10.0, 10.0));
        let b = stage.create_actor(FixedSize::new(30.0, 5.0));
        stage.add_child(group, a).unwrap();
        stage.add_child(group, b).unwrap();
        stage.set_position(b, Point2::new(20.0, 40.0));

        assert_eq!(stage.preferred_width(group, None), SizeRequest::fixed(50.0));
        assert_eq!(stage.preferred_height(group, None), SizeRequest::fixed(45.0));
    }

    #[test]
    fn test_relayout_bubbles_up() {
        let mut stage = Stage::new(MxConfig::default());
        let group = stage.create_actor(FixedLayout::new());
        let leaf = stage.create_actor(FixedSize::new(10.0, 10.0));
        stage.add_child(stage.root(), group).unwrap();
        stage.add_child(group, leaf).unwrap();
        stage.layout();

        stage.set_padding(leaf, Padding::uniform(2.0));
        assert!(stage.needs_relayout());
        stage.layout();
        assert_eq!(stage.actor(leaf).unwrap().allocation().size(), Vector2::new(14.0, 14.0));
    }
}
