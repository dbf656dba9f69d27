// SPDX-License-Identifier: LGPL-3.0-only
use super::{LayoutCx, LayoutManager, RequestMode, SizeRequest};
use crate::actor::ActorId;
use crate::geometry::ActorBox;
use nalgebra::Vector2;

/// Places children at their fixed position with their natural size.
///
/// Used by the stage root and by plain group actors. The preferred size is the
/// bounding box of the visible children.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLayout;

impl FixedLayout {
    /// Create a new fixed layout.
    pub fn new() -> Self {
        Self
    }
}

impl LayoutManager for FixedLayout {
    fn preferred_width(&self, cx: &LayoutCx<'_>, _for_height: Option<f32>) -> SizeRequest {
        let extent = cx
            .visible_children()
            .map(|child| cx.position(child).x.max(0.0) + cx.natural_size(child).x)
            .fold(0.0f32, f32::max);

        SizeRequest::fixed(extent)
    }

    fn preferred_height(&self, cx: &LayoutCx<'_>, _for_width: Option<f32>) -> SizeRequest {
        let extent = cx
            .visible_children()
            .map(|child| cx.position(child).y.max(0.0) + cx.natural_size(child).y)
            .fold(0.0f32, f32::max);

        SizeRequest::fixed(extent)
    }

    fn allocate(&self, cx: &LayoutCx<'_>, _size: Vector2<f32>) -> Vec<(ActorId, ActorBox)> {
        cx.visible_children()
            .map(|child| {
                let child_box = ActorBox::from_origin_size(cx.position(child), cx.natural_size(child));
                (child, child_box)
            })
            .collect()
    }
}

/// Leaf content with constant size requests.
///
/// The actor's padding is added on top of the content size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSize {
    min: Vector2<f32>,
    natural: Vector2<f32>,
    request_mode: RequestMode,
}

impl FixedSize {
    /// Content with the given natural size, which is also its minimum.
    pub fn new(width: f32, height: f32) -> Self {
        let natural = Vector2::new(width.max(0.0), height.max(0.0));
        Self {
            min: natural,
            natural,
            request_mode: RequestMode::HeightForWidth,
        }
    }

    /// Set a smaller minimum size.
    pub fn with_min(mut self, width: f32, height: f32) -> Self {
        self.min = Vector2::new(width.max(0.0), height.max(0.0));
        self
    }

    /// Set the request mode.
    pub fn with_request_mode(mut self, request_mode: RequestMode) -> Self {
        self.request_mode = request_mode;
        self
    }

    /// The minimum size.
    pub fn min(&self) -> Vector2<f32> {
        self.min
    }

    /// The natural size.
    pub fn natural(&self) -> Vector2<f32> {
        self.natural
    }

    /// Change the natural size.
    pub fn set_natural(&mut self, width: f32, height: f32) {
        self.natural = Vector2::new(width.max(0.0), height.max(0.0));
    }

    /// Change the minimum size.
    pub fn set_min(&mut self, width: f32, height: f32) {
        self.min = Vector2::new(width.max(0.0), height.max(0.0));
    }
}

impl Default for FixedSize {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl LayoutManager for FixedSize {
    fn preferred_width(&self, cx: &LayoutCx<'_>, _for_height: Option<f32>) -> SizeRequest {
        SizeRequest::new(self.min.x, self.natural.x).grow(cx.padding().horizontal())
    }

    fn preferred_height(&self, cx: &LayoutCx<'_>, _for_width: Option<f32>) -> SizeRequest {
        SizeRequest::new(self.min.y, self.natural.y).grow(cx.padding().vertical())
    }

    fn allocate(&self, cx: &LayoutCx<'_>, size: Vector2<f32>) -> Vec<(ActorId, ActorBox)> {
        // Children of leaf content stay where they were placed.
        FixedLayout.allocate(cx, size)
    }

    fn request_mode(&self) -> RequestMode {
        self.request_mode
    }
}
