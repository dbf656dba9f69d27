// SPDX-License-Identifier: LGPL-3.0-only
use crate::actor::ActorId;
use crate::geometry::{ActorBox, Padding};
use crate::stage::Stage;
use nalgebra::{Point2, Vector2};
use std::any::Any;

mod fill;
mod fixed;

pub use fill::{allocate_align_fill, clamp_to_available};
pub use fixed::{FixedLayout, FixedSize};

/// A `(min, natural)` size pair for one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeRequest {
    /// The smallest usable size.
    pub min: f32,
    /// The preferred size.
    pub natural: f32,
}

impl SizeRequest {
    /// A request of zero.
    pub const ZERO: Self = Self { min: 0.0, natural: 0.0 };

    /// Create a request. Negative values are clamped to zero and natural is never below min.
    pub fn new(min: f32, natural: f32) -> Self {
        let min = min.max(0.0);
        Self {
            min,
            natural: natural.max(min),
        }
    }

    /// Min and natural set to the same value.
    pub fn fixed(size: f32) -> Self {
        Self::new(size, size)
    }

    /// Add the same amount to min and natural.
    pub fn grow(self, amount: f32) -> Self {
        Self::new(self.min + amount, self.natural + amount)
    }

    /// Multiply min and natural by a factor.
    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.min * factor, self.natural * factor)
    }

    /// Component wise maximum.
    pub fn max(self, other: Self) -> Self {
        Self::new(self.min.max(other.min), self.natural.max(other.natural))
    }

    /// Component wise sum.
    pub fn sum(self, other: Self) -> Self {
        Self::new(self.min + other.min, self.natural + other.natural)
    }
}

/// Which dimension is negotiated first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RequestMode {
    /// Ask for the width, then for the height given that width.
    #[default]
    HeightForWidth,
    /// Ask for the height, then for the width given that height.
    WidthForHeight,
}

/// Upcasting helper so layout managers can be downcast by the stage.
pub trait AsAny {
    /// Get a reference to `Any`.
    fn as_any(&self) -> &dyn Any;
    /// Get a mutable reference to `Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Computes preferred sizes and child allocations for an actor.
///
/// Every actor owns exactly one layout manager. Containers keep their per-child
/// metadata in the manager and drop it in [LayoutManager::child_removed].
pub trait LayoutManager: AsAny + 'static {
    /// The `(min, natural)` width, optionally for a given height.
    fn preferred_width(&self, cx: &LayoutCx<'_>, for_height: Option<f32>) -> SizeRequest;

    /// The `(min, natural)` height, optionally for a given width.
    fn preferred_height(&self, cx: &LayoutCx<'_>, for_width: Option<f32>) -> SizeRequest;

    /// Compute the boxes of the children for an actor of the given size.
    ///
    /// Returned boxes are relative to the actor itself.
    fn allocate(&self, cx: &LayoutCx<'_>, size: Vector2<f32>) -> Vec<(ActorId, ActorBox)>;

    /// Which dimension this actor negotiates first.
    fn request_mode(&self) -> RequestMode {
        RequestMode::HeightForWidth
    }

    /// Whether the layout takes the child. Checked before anything is attached.
    fn accepts_child(&self, _child: ActorId) -> bool {
        true
    }

    /// Called after a child was attached to the actor.
    fn child_added(&mut self, _child: ActorId) {}

    /// Called after a child was detached from the actor.
    fn child_removed(&mut self, _child: ActorId) {}
}

/// Read access to an actor and its children during size negotiation.
#[derive(Clone, Copy)]
pub struct LayoutCx<'a> {
    stage: &'a Stage,
    actor: ActorId,
}

impl<'a> LayoutCx<'a> {
    pub(crate) fn new(stage: &'a Stage, actor: ActorId) -> Self {
        Self { stage, actor }
    }

    /// The actor being laid out.
    pub fn actor(&self) -> ActorId {
        self.actor
    }

    /// The stage.
    pub fn stage(&self) -> &'a Stage {
        self.stage
    }

    /// Padding of the actor being laid out.
    pub fn padding(&self) -> Padding {
        self.stage
            .actor(self.actor)
            .map(|actor| actor.padding())
            .unwrap_or_default()
    }

    /// All children in paint order.
    pub fn children(&self) -> &'a [ActorId] {
        self.stage
            .actor(self.actor)
            .map(|actor| actor.children())
            .unwrap_or(&[])
    }

    /// Visible children in paint order.
    pub fn visible_children(&self) -> impl Iterator<Item = ActorId> + 'a {
        let stage = self.stage;
        self.children()
            .iter()
            .copied()
            .filter(move |child| stage.is_visible(*child))
    }

    /// Whether a child is visible.
    pub fn is_visible(&self, child: ActorId) -> bool {
        self.stage.is_visible(child)
    }

    /// Fixed position of a child.
    pub fn position(&self, child: ActorId) -> Point2<f32> {
        self.stage
            .actor(child)
            .map(|actor| actor.position())
            .unwrap_or_else(Point2::origin)
    }

    /// Preferred width of a child.
    pub fn preferred_width(&self, child: ActorId, for_height: Option<f32>) -> SizeRequest {
        self.stage.preferred_width(child, for_height)
    }

    /// Preferred height of a child.
    pub fn preferred_height(&self, child: ActorId, for_width: Option<f32>) -> SizeRequest {
        self.stage.preferred_height(child, for_width)
    }

    /// Natural size of a child, negotiated in its request mode.
    pub fn natural_size(&self, child: ActorId) -> Vector2<f32> {
        self.stage.natural_size(child)
    }

    /// Request mode of a child.
    pub fn request_mode(&self, child: ActorId) -> RequestMode {
        self.stage.request_mode(child)
    }
}
