// SPDX-License-Identifier: LGPL-3.0-only
use mx_core::actor::ActorId;
use mx_core::error::{MxError, Result};
use mx_core::geometry::{ActorBox, Align, Padding};
use mx_core::layout::{allocate_align_fill, LayoutCx, LayoutManager, SizeRequest};
use mx_core::stage::Stage;
use nalgebra::Vector2;

/// A container holding a single child, aligned or stretched inside its padding and border.
///
/// The child is set with [BinExt::bin_set_child].
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    child: Option<ActorId>,
    border: Padding,
    x_align: Align,
    y_align: Align,
    x_fill: bool,
    y_fill: bool,
}

impl Bin {
    /// Create an empty bin with a centered, unstretched child.
    pub fn new() -> Self {
        Self {
            child: None,
            border: Padding::ZERO,
            x_align: Align::Middle,
            y_align: Align::Middle,
            x_fill: false,
            y_fill: false,
        }
    }

    /// Set the child alignment.
    pub fn with_alignment(mut self, x_align: Align, y_align: Align) -> Self {
        self.set_alignment(x_align, y_align);
        self
    }

    /// Set whether the child is stretched on each axis.
    pub fn with_fill(mut self, x_fill: bool, y_fill: bool) -> Self {
        self.set_fill(x_fill, y_fill);
        self
    }

    /// Set the border, added to the actor padding.
    pub fn with_border(mut self, border: Padding) -> Self {
        self.border = border;
        self
    }

    /// The child.
    pub fn child(&self) -> Option<ActorId> {
        self.child
    }

    /// The child alignment.
    pub fn alignment(&self) -> (Align, Align) {
        (self.x_align, self.y_align)
    }

    /// Set the child alignment.
    pub fn set_alignment(&mut self, x_align: Align, y_align: Align) {
        self.x_align = x_align;
        self.y_align = y_align;
    }

    /// Whether the child is stretched on each axis.
    pub fn fill(&self) -> (bool, bool) {
        (self.x_fill, self.y_fill)
    }

    /// Set whether the child is stretched on each axis.
    pub fn set_fill(&mut self, x_fill: bool, y_fill: bool) {
        self.x_fill = x_fill;
        self.y_fill = y_fill;
    }

    /// The border.
    pub fn border(&self) -> Padding {
        self.border
    }

    /// Set the border.
    pub fn set_border(&mut self, border: Padding) {
        self.border = border;
    }

    fn insets(&self, cx: &LayoutCx<'_>) -> Padding {
        cx.padding() + self.border
    }

    fn visible_child(&self, cx: &LayoutCx<'_>) -> Option<ActorId> {
        self.child.filter(|child| cx.is_visible(*child))
    }
}

impl Default for Bin {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutManager for Bin {
    fn preferred_width(&self, cx: &LayoutCx<'_>, for_height: Option<f32>) -> SizeRequest {
        let insets = self.insets(cx);

        match self.visible_child(cx) {
            Some(child) => {
                let for_height = for_height.map(|height| (height - insets.vertical()).max(0.0));
                cx.preferred_width(child, for_height).grow(insets.horizontal())
            },
            None => SizeRequest::fixed(insets.horizontal()),
        }
    }

    fn preferred_height(&self, cx: &LayoutCx<'_>, for_width: Option<f32>) -> SizeRequest {
        let insets = self.insets(cx);

        match self.visible_child(cx) {
            Some(child) => {
                let for_width = for_width.map(|width| (width - insets.horizontal()).max(0.0));
                cx.preferred_height(child, for_width).grow(insets.vertical())
            },
            None => SizeRequest::fixed(insets.vertical()),
        }
    }

    fn allocate(&self, cx: &LayoutCx<'_>, size: Vector2<f32>) -> Vec<(ActorId, ActorBox)> {
        let Some(child) = self.visible_child(cx) else {
            return Vec::new();
        };

        let slot = ActorBox::from_size(size).shrink(&self.insets(cx));
        let child_box = allocate_align_fill(
            cx,
            child,
            slot,
            self.x_align,
            self.y_align,
            self.x_fill,
            self.y_fill,
        );

        vec![(child, child_box)]
    }

    fn accepts_child(&self, child: ActorId) -> bool {
        self.child.map_or(true, |current| current == child)
    }

    fn child_added(&mut self, child: ActorId) {
        self.child = Some(child);
    }

    fn child_removed(&mut self, child: ActorId) {
        if self.child == Some(child) {
            self.child = None;
        }
    }
}

/// Bin operations on the stage.
pub trait BinExt {
    /// Replace the child of a bin. The previous child is detached but stays alive.
    fn bin_set_child(&mut self, bin: ActorId, child: Option<ActorId>) -> Result<()>;

    /// The child of a bin.
    fn bin_child(&self, bin: ActorId) -> Option<ActorId>;
}

impl BinExt for Stage {
    fn bin_set_child(&mut self, bin: ActorId, child: Option<ActorId>) -> Result<()> {
        let previous = self
            .layout_manager::<Bin>(bin)
            .ok_or(MxError::NotAContainer {
                actor: bin,
                expected: "Bin",
            })?
            .child();

        if previous == child {
            return Ok(());
        }

        if let Some(previous) = previous {
            self.remove_child(bin, previous)?;
        }

        if let Some(child) = child {
            self.add_child(bin, child)?;
        }

        Ok(())
    }

    fn bin_child(&self, bin: ActorId) -> Option<ActorId> {
        self.layout_manager::<Bin>(bin)?.child()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mx_core::config::MxConfig;
    use mx_core::layout::FixedSize;

    fn bin_with_child(bin: Bin, child: FixedSize) -> (Stage, ActorId, ActorId) {
        let mut stage = Stage::new(MxConfig::default());
        let bin = stage.create_actor(bin);
        let child = stage.create_actor(child);
        stage.add_child(stage.root(), bin).unwrap();
        stage.bin_set_child(bin, Some(child)).unwrap();
        (stage, bin, child)
    }

    #[test]
    fn test_preferred_size_adds_insets() {
        let (mut stage, bin, child) =
            bin_with_child(Bin::new().with_border(Padding::uniform(2.0)), FixedSize::new(40.0, 20.0));
        stage.set_padding(bin, Padding::new(1.0, 3.0, 5.0, 7.0));

        assert_eq!(stage.preferred_width(bin, None), SizeRequest::fixed(54.0));
        assert_eq!(stage.preferred_height(bin, None), SizeRequest::fixed(30.0));

        stage.bin_set_child(bin, None).unwrap();
        assert!(stage.contains(child));
        assert_eq!(stage.preferred_width(bin, None), SizeRequest::fixed(14.0));
        assert_eq!(stage.preferred_height(bin, None), SizeRequest::fixed(10.0));
    }

    #[test]
    fn test_centered_child_offset() {
        let (mut stage, bin, child) = bin_with_child(Bin::new(), FixedSize::new(40.0, 20.0));
        stage.set_padding(bin, Padding::uniform(10.0));
        stage.allocate(bin, ActorBox::new(0.0, 0.0, 200.0, 100.0));

        let allocation = stage.actor(child).unwrap().allocation();
        assert!((allocation.x1 - (10.0 + (180.0 - 40.0) / 2.0)).abs() < 1e-4);
        assert!((allocation.y1 - (10.0 + (80.0 - 20.0) / 2.0)).abs() < 1e-4);
        assert_eq!(allocation.size(), Vector2::new(40.0, 20.0));
    }

    #[test]
    fn test_wide_child_clamped_to_available() {
        let (mut stage, bin, child) = bin_with_child(
            Bin::new().with_alignment(Align::Start, Align::Start),
            FixedSize::new(400.0, 20.0).with_min(100.0, 20.0),
        );
        stage.allocate(bin, ActorBox::new(0.0, 0.0, 300.0, 50.0));

        let allocation = stage.actor(child).unwrap().allocation();
        assert_eq!(allocation.x1, 0.0);
        assert_eq!(allocation.width(), 300.0);
    }

    #[test]
    fn test_never_negative_allocation() {
        for padding in [0.0, 5.0, 60.0, 500.0] {
            for natural in [0.0, 10.0, 90.0, 1000.0] {
                let (mut stage, bin, child) = bin_with_child(
                    Bin::new().with_border(Padding::uniform(padding / 2.0)),
                    FixedSize::new(natural, natural).with_min(natural / 2.0, natural / 2.0),
                );
                stage.set_padding(bin, Padding::uniform(padding));
                stage.allocate(bin, ActorBox::new(0.0, 0.0, 100.0, 100.0));

                let allocation = stage.actor(child).unwrap().allocation();
                assert!(allocation.width() >= 0.0);
                assert!(allocation.height() >= 0.0);
                assert!(allocation.x2 >= allocation.x1);
                assert!(allocation.y2 >= allocation.y1);
            }
        }
    }

    #[test]
    fn test_fill_and_end_alignment() {
        let (mut stage, bin, child) = bin_with_child(
            Bin::new().with_fill(true, false).with_alignment(Align::Start, Align::End),
            FixedSize::new(40.0, 20.0),
        );
        stage.allocate(bin, ActorBox::new(0.0, 0.0, 200.0, 100.0));
        assert_eq!(
            stage.actor(child).unwrap().allocation(),
            ActorBox::new(0.0, 80.0, 200.0, 100.0)
        );

        stage
            .with_layout_mut::<Bin, _>(bin, |bin| bin.set_fill(true, true))
            .unwrap();
        assert!(stage.needs_relayout());
        stage.allocate(bin, ActorBox::new(0.0, 0.0, 200.0, 100.0));
        assert_eq!(
            stage.actor(child).unwrap().allocation(),
            ActorBox::new(0.0, 0.0, 200.0, 100.0)
        );
    }

    #[test]
    fn test_second_direct_child_refused() {
        let mut stage = Stage::new(MxConfig::default());
        let bin = stage.create_actor(Bin::new());
        let first = stage.create_actor(FixedSize::new(10.0, 10.0));
        let second = stage.create_actor(FixedSize::new(20.0, 20.0));
        stage.add_child(stage.root(), bin).unwrap();

        stage.add_child(bin, first).unwrap();
        assert_eq!(
            stage.add_child(bin, second),
            Err(MxError::ChildRefused { parent: bin, child: second })
        );
        assert_eq!(stage.bin_child(bin), Some(first));
        assert_eq!(stage.children(bin), &[first]);
        assert_eq!(stage.parent(second), None);

        stage.bin_set_child(bin, Some(second)).unwrap();
        assert_eq!(stage.children(bin), &[second]);
    }

    #[test]
    fn test_wrong_container() {
        let mut stage = Stage::new(MxConfig::default());
        let plain = stage.create_actor(FixedSize::new(1.0, 1.0));
        let child = stage.create_actor(FixedSize::new(1.0, 1.0));
        assert!(matches!(
            stage.bin_set_child(plain, Some(child)),
            Err(MxError::NotAContainer { .. })
        ));
    }
}
