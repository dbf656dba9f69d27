// SPDX-License-Identifier: LGPL-3.0-only
use mx_core::actor::ActorId;
use mx_core::error::{MxError, Result};
use mx_core::geometry::{ActorBox, Align};
use mx_core::layout::{allocate_align_fill, clamp_to_available, LayoutCx, LayoutManager, SizeRequest};
use mx_core::signal::Handlers;
use mx_core::stage::Stage;
use nalgebra::Vector2;

/// Gap between the arrow and the label.
const ARROW_SPACING: f32 = 6.0;

/// A container with a header (arrow and label) that shows or hides its content child.
///
/// `progress` scales the height taken by the content, so a host animation can
/// drive the transition between collapsed (0) and expanded (1). Children are
/// attached through [ExpanderExt]; a plain `add_child` is refused.
pub struct Expander {
    label: Option<ActorId>,
    child: Option<ActorId>,
    arrow_size: Vector2<f32>,
    spacing: f32,
    expanded: bool,
    progress: f32,
    x_align: Align,
    y_align: Align,
    x_fill: bool,
    y_fill: bool,
    /// Emitted with the new state when the expander opens or closes.
    pub expanded_changed: Handlers<bool>,
}

impl Expander {
    /// Create a collapsed expander with a 16x16 arrow.
    pub fn new() -> Self {
        Self {
            label: None,
            child: None,
            arrow_size: Vector2::new(16.0, 16.0),
            spacing: 0.0,
            expanded: false,
            progress: 0.0,
            x_align: Align::Start,
            y_align: Align::Start,
            x_fill: true,
            y_fill: true,
            expanded_changed: Handlers::new(),
        }
    }

    /// Set the arrow size.
    pub fn with_arrow_size(mut self, width: f32, height: f32) -> Self {
        self.arrow_size = Vector2::new(width.max(0.0), height.max(0.0));
        self
    }

    /// Set the spacing between the header and the content.
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing.max(0.0);
        self
    }

    /// Set the content alignment and fill.
    pub fn with_content_alignment(mut self, x_align: Align, y_align: Align, x_fill: bool, y_fill: bool) -> Self {
        self.x_align = x_align;
        self.y_align = y_align;
        self.x_fill = x_fill;
        self.y_fill = y_fill;
        self
    }

    /// The header label.
    pub fn label(&self) -> Option<ActorId> {
        self.label
    }

    /// The content child.
    pub fn child(&self) -> Option<ActorId> {
        self.child
    }

    /// Size of the arrow.
    pub fn arrow_size(&self) -> Vector2<f32> {
        self.arrow_size
    }

    /// Spacing between the header and the content.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Set the spacing between the header and the content.
    pub fn set_spacing(&mut self, spacing: f32) {
        self.spacing = spacing.max(0.0);
    }

    /// Whether the expander is open.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Open or close the expander, snapping the progress to the end state.
    ///
    /// Emits `expanded_changed` when the state changes.
    pub fn set_expanded(&mut self, expanded: bool) {
        if self.expanded == expanded {
            return;
        }

        self.expanded = expanded;
        self.progress = if expanded { 1.0 } else { 0.0 };
        log::debug!("Expander {}", if expanded { "expanded" } else { "collapsed" });
        self.expanded_changed.emit(&expanded);
    }

    /// How far the content is shown, between 0 and 1.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Set the transition progress, clamped between 0 and 1.
    pub fn set_progress(&mut self, progress: f32) {
        self.progress = progress.clamp(0.0, 1.0);
    }

    fn arrow_width(&self) -> f32 {
        if self.arrow_size.x > 0.0 {
            self.arrow_size.x + ARROW_SPACING
        } else {
            0.0
        }
    }

    fn visible(&self, cx: &LayoutCx<'_>, actor: Option<ActorId>) -> Option<ActorId> {
        actor.filter(|actor| cx.is_visible(*actor))
    }
}

impl Default for Expander {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Expander {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Expander")
            .field("label", &self.label)
            .field("child", &self.child)
            .field("expanded", &self.expanded)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

impl LayoutManager for Expander {
    fn preferred_width(&self, cx: &LayoutCx<'_>, _for_height: Option<f32>) -> SizeRequest {
        let padding = cx.padding();

        let header = self
            .visible(cx, self.label)
            .map(|label| cx.preferred_width(label, None))
            .unwrap_or_default()
            .grow(self.arrow_width());

        let content = self
            .visible(cx, self.child)
            .map(|child| cx.preferred_width(child, None))
            .unwrap_or_default();

        header.max(content).grow(padding.horizontal())
    }

    fn preferred_height(&self, cx: &LayoutCx<'_>, for_width: Option<f32>) -> SizeRequest {
        let padding = cx.padding();
        let available = for_width.map(|width| (width - padding.horizontal()).max(0.0));

        let header = self
            .visible(cx, self.label)
            .map(|label| cx.preferred_height(label, available.map(|w| (w - self.arrow_width()).max(0.0))))
            .unwrap_or_default()
            .max(SizeRequest::fixed(self.arrow_size.y));

        let content = self
            .visible(cx, self.child)
            .map(|child| cx.preferred_height(child, available).grow(self.spacing))
            .unwrap_or_default()
            .scale(self.progress);

        header.sum(content).grow(padding.vertical())
    }

    fn allocate(&self, cx: &LayoutCx<'_>, size: Vector2<f32>) -> Vec<(ActorId, ActorBox)> {
        let content = crate::content_box(cx, size);
        let arrow_width = self.arrow_width().min(content.width());
        let arrow_height = self.arrow_size.y.min(content.height());
        let mut boxes = Vec::new();

        let mut header_height = arrow_height;
        if let Some(label) = self.visible(cx, self.label) {
            let available = (content.width() - arrow_width).max(0.0);
            let width = clamp_to_available(cx.preferred_width(label, None), available);
            let height = clamp_to_available(cx.preferred_height(label, Some(width)), content.height());
            header_height = header_height.max(height);

            let x1 = content.x1 + arrow_width;
            let slot = ActorBox::new(x1, content.y1, x1 + width, content.y1 + header_height);
            boxes.push((label, allocate_align_fill(cx, label, slot, Align::Start, Align::Middle, false, false)));
        }

        if let Some(child) = self.visible(cx, self.child) {
            let y1 = (content.y1 + header_height + self.spacing).min(content.y2);

            // A collapsed child gets an empty box, so it is neither painted nor picked.
            let child_box = if self.progress <= 0.0 {
                ActorBox::new(content.x1, y1, content.x1, y1)
            } else {
                let slot = ActorBox::new(content.x1, y1, content.x2, content.y2);
                allocate_align_fill(cx, child, slot, self.x_align, self.y_align, self.x_fill, self.y_fill)
            };

            boxes.push((child, child_box));
        }

        boxes
    }

    fn accepts_child(&self, child: ActorId) -> bool {
        self.label == Some(child) || self.child == Some(child)
    }

    fn child_removed(&mut self, child: ActorId) {
        if self.label == Some(child) {
            self.label = None;
        }

        if self.child == Some(child) {
            self.child = None;
        }
    }
}

/// Expander operations on the stage.
pub trait ExpanderExt {
    /// Replace the header label. The previous label is detached but stays alive.
    fn expander_set_label(&mut self, expander: ActorId, label: Option<ActorId>) -> Result<()>;

    /// Replace the content child. The previous child is detached but stays alive.
    fn expander_set_child(&mut self, expander: ActorId, child: Option<ActorId>) -> Result<()>;

    /// Open or close an expander.
    fn expander_set_expanded(&mut self, expander: ActorId, expanded: bool) -> Result<()>;

    /// Flip the expanded state and return the new one.
    fn expander_toggle(&mut self, expander: ActorId) -> Result<bool>;
}

fn not_an_expander(actor: ActorId) -> MxError {
    MxError::NotAContainer {
        actor,
        expected: "Expander",
    }
}

impl ExpanderExt for Stage {
    fn expander_set_label(&mut self, expander: ActorId, label: Option<ActorId>) -> Result<()> {
        let previous = self
            .layout_manager::<Expander>(expander)
            .ok_or_else(|| not_an_expander(expander))?
            .label();

        if previous == label {
            return Ok(());
        }

        if let Some(previous) = previous {
            self.remove_child(expander, previous)?;
        }

        self.with_layout_mut::<Expander, _>(expander, |e| e.label = label)?;
        if let Some(label) = label {
            if let Err(err) = self.add_child(expander, label) {
                self.with_layout_mut::<Expander, _>(expander, |e| e.label = None)?;
                return Err(err);
            }
        }

        Ok(())
    }

    fn expander_set_child(&mut self, expander: ActorId, child: Option<ActorId>) -> Result<()> {
        let previous = self
            .layout_manager::<Expander>(expander)
            .ok_or_else(|| not_an_expander(expander))?
            .child();

        if previous == child {
            return Ok(());
        }

        if let Some(previous) = previous {
            self.remove_child(expander, previous)?;
        }

        self.with_layout_mut::<Expander, _>(expander, |e| e.child = child)?;
        if let Some(child) = child {
            if let Err(err) = self.add_child(expander, child) {
                self.with_layout_mut::<Expander, _>(expander, |e| e.child = None)?;
                return Err(err);
            }
        }

        Ok(())
    }

    fn expander_set_expanded(&mut self, expander: ActorId, expanded: bool) -> Result<()> {
        self.with_layout_mut::<Expander, _>(expander, |e| e.set_expanded(expanded))
    }

    fn expander_toggle(&mut self, expander: ActorId) -> Result<bool> {
        self.with_layout_mut::<Expander, _>(expander, |e| {
            e.set_expanded(!e.is_expanded());
            e.is_expanded()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mx_core::config::MxConfig;
    use mx_core::geometry::Padding;
    use mx_core::layout::FixedSize;
    use nalgebra::Point2;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn setup() -> (Stage, ActorId, ActorId, ActorId) {
        let mut stage = Stage::new(MxConfig::default());
        let expander = stage.create_actor(Expander::new().with_spacing(4.0));
        let label = stage.create_actor(FixedSize::new(60.0, 10.0));
        let child = stage.create_actor(FixedSize::new(100.0, 50.0));
        stage.add_child(stage.root(), expander).unwrap();
        stage.expander_set_label(expander, Some(label)).unwrap();
        stage.expander_set_child(expander, Some(child)).unwrap();
        (stage, expander, label, child)
    }

    #[test]
    fn test_collapsed_size() {
        let (mut stage, expander, _label, _child) = setup();
        stage.set_padding(expander, Padding::uniform(2.0));

        // max(child 100, label 60 + arrow 16 + gap 6) + padding
        assert_eq!(stage.preferred_width(expander, None), SizeRequest::fixed(104.0));
        // max(label 10, arrow 16) + padding, content hidden
        assert_eq!(stage.preferred_height(expander, None), SizeRequest::fixed(20.0));
    }

    #[test]
    fn test_expanded_size_and_signal() {
        let (mut stage, expander, _label, _child) = setup();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        stage
            .with_layout_mut::<Expander, _>(expander, |e| {
                e.expanded_changed.connect(move |expanded| s.borrow_mut().push(*expanded));
            })
            .unwrap();

        stage.expander_set_expanded(expander, true).unwrap();
        stage.expander_set_expanded(expander, true).unwrap();
        assert_eq!(stage.preferred_height(expander, None), SizeRequest::fixed(16.0 + 4.0 + 50.0));

        assert!(!stage.expander_toggle(expander).unwrap());
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn test_progress_scales_content() {
        let (mut stage, expander, _label, _child) = setup();
        stage
            .with_layout_mut::<Expander, _>(expander, |e| e.set_progress(0.5))
            .unwrap();
        assert_eq!(stage.preferred_height(expander, None), SizeRequest::fixed(16.0 + 27.0));
    }

    #[test]
    fn test_collapsed_content_not_picked() {
        let (mut stage, expander, label, child) = setup();
        stage.layout();

        assert_eq!(
            stage.actor(label).unwrap().allocation(),
            ActorBox::new(22.0, 3.0, 82.0, 13.0)
        );
        assert_eq!(stage.actor(child).unwrap().allocation().size(), Vector2::zeros());
        assert_eq!(stage.actor_at(Point2::new(10.0, 30.0)), Some(stage.root()));

        stage.expander_set_expanded(expander, true).unwrap();
        stage.layout();
        assert_eq!(
            stage.actor(child).unwrap().allocation(),
            ActorBox::new(0.0, 20.0, 100.0, 70.0)
        );
        assert_eq!(stage.actor_at(Point2::new(10.0, 30.0)), Some(child));
    }

    #[test]
    fn test_direct_add_refused() {
        let (mut stage, expander, label, child) = setup();
        let extra = stage.create_actor(FixedSize::new(10.0, 10.0));

        assert_eq!(
            stage.add_child(expander, extra),
            Err(MxError::ChildRefused { parent: expander, child: extra })
        );
        assert_eq!(stage.children(expander), &[label, child]);
    }

    #[test]
    fn test_failed_set_child_leaves_slot_empty() {
        let (mut stage, expander, _label, child) = setup();
        let elsewhere = stage.create_actor(FixedSize::new(10.0, 10.0));
        stage.add_child(stage.root(), elsewhere).unwrap();

        assert_eq!(
            stage.expander_set_child(expander, Some(elsewhere)),
            Err(MxError::AlreadyParented(elsewhere))
        );
        assert_eq!(stage.layout_manager::<Expander>(expander).unwrap().child(), None);
        assert_eq!(stage.parent(child), None);
    }
}
