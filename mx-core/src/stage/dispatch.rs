// SPDX-License-Identifier: LGPL-3.0-only
use super::Stage;
use crate::dnd::CaptureListener;
use crate::event::{PointerEvent, PointerEventKind};
use crate::update::Update;

impl Stage {
    /// Deliver a pointer event.
    ///
    /// Pending layout is applied first so picking sees current geometry. Capture
    /// listeners then see the event in installation order. Presses finally bubble
    /// from the picked actor to the nearest enabled draggable.
    pub fn handle_event(&mut self, event: PointerEvent) -> Update {
        log::trace!("Handling {:?}", event);

        let mut update = Update::empty();
        if self.layout() {
            update |= Update::DRAW;
        }

        let snapshot = self.capture_listeners().to_vec();
        for listener in snapshot {
            // A previous listener may have removed this one.
            if !self.capture_listeners().contains(&listener) {
                continue;
            }

            update |= match listener {
                CaptureListener::DropTargets => self.drop_capture(&event),
                CaptureListener::Drag(id) => self.drag_capture(id, &event),
            };
        }

        if event.kind == PointerEventKind::Press {
            update |= self.dispatch_press(&event);
        }

        if self.needs_relayout() {
            update |= Update::LAYOUT;
        }

        update
    }

    fn dispatch_press(&mut self, event: &PointerEvent) -> Update {
        let Some(picked) = self.actor_at(event.position) else {
            return Update::empty();
        };

        let target = std::iter::once(picked)
            .chain(self.ancestors(picked))
            .find(|id| self.is_drag_enabled(*id));

        match target {
            Some(id) => self.drag_press(id, event),
            None => Update::empty(),
        }
    }
}
