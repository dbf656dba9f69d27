// SPDX-License-Identifier: LGPL-3.0-only
use indexmap::IndexMap;
use mx_core::actor::ActorId;
use mx_core::error::{MxError, Result};
use mx_core::geometry::{ActorBox, Align};
use mx_core::layout::{allocate_align_fill, LayoutCx, LayoutManager, SizeRequest};
use mx_core::stage::Stage;
use nalgebra::Vector2;

/// Packing properties of a [Stack] child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackChild {
    /// Stretch horizontally over the stack.
    pub x_fill: bool,
    /// Stretch vertically over the stack.
    pub y_fill: bool,
    /// Horizontal alignment.
    pub x_align: Align,
    /// Vertical alignment.
    pub y_align: Align,
}

impl Default for StackChild {
    fn default() -> Self {
        Self {
            x_fill: true,
            y_fill: true,
            x_align: Align::Middle,
            y_align: Align::Middle,
        }
    }
}

impl StackChild {
    /// Set whether the child is stretched on each axis.
    pub fn with_fill(mut self, x_fill: bool, y_fill: bool) -> Self {
        self.x_fill = x_fill;
        self.y_fill = y_fill;
        self
    }

    /// Set the alignment.
    pub fn with_alignment(mut self, x_align: Align, y_align: Align) -> Self {
        self.x_align = x_align;
        self.y_align = y_align;
        self
    }
}

/// Places all children on top of each other over the whole content box.
///
/// Later children are above earlier ones.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    children: IndexMap<ActorId, StackChild>,
}

impl Stack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Packing properties of a child.
    pub fn child_meta(&self, child: ActorId) -> Option<&StackChild> {
        self.children.get(&child)
    }

    /// Packing properties of a child, mutably.
    pub fn child_meta_mut(&mut self, child: ActorId) -> Option<&mut StackChild> {
        self.children.get_mut(&child)
    }
}

impl LayoutManager for Stack {
    fn preferred_width(&self, cx: &LayoutCx<'_>, for_height: Option<f32>) -> SizeRequest {
        let padding = cx.padding();
        let for_height = for_height.map(|height| (height - padding.vertical()).max(0.0));

        cx.visible_children()
            .map(|child| cx.preferred_width(child, for_height))
            .fold(SizeRequest::ZERO, SizeRequest::max)
            .grow(padding.horizontal())
    }

    fn preferred_height(&self, cx: &LayoutCx<'_>, for_width: Option<f32>) -> SizeRequest {
        let padding = cx.padding();
        let for_width = for_width.map(|width| (width - padding.horizontal()).max(0.0));

        cx.visible_children()
            .map(|child| cx.preferred_height(child, for_width))
            .fold(SizeRequest::ZERO, SizeRequest::max)
            .grow(padding.vertical())
    }

    fn allocate(&self, cx: &LayoutCx<'_>, size: Vector2<f32>) -> Vec<(ActorId, ActorBox)> {
        let content = crate::content_box(cx, size);

        cx.visible_children()
            .map(|child| {
                let meta = self.children.get(&child).copied().unwrap_or_default();
                let child_box = allocate_align_fill(
                    cx,
                    child,
                    content,
                    meta.x_align,
                    meta.y_align,
                    meta.x_fill,
                    meta.y_fill,
                );
                (child, child_box)
            })
            .collect()
    }

    fn child_added(&mut self, child: ActorId) {
        self.children.entry(child).or_default();
    }

    fn child_removed(&mut self, child: ActorId) {
        self.children.shift_remove(&child);
    }
}

/// Stack operations on the stage.
pub trait StackExt {
    /// Put a child on top of a stack.
    fn stack_push(&mut self, stack: ActorId, child: ActorId, meta: StackChild) -> Result<()>;

    /// Change the packing properties of a child.
    fn stack_set_child_meta(&mut self, stack: ActorId, child: ActorId, meta: StackChild) -> Result<()>;
}

impl StackExt for Stage {
    fn stack_push(&mut self, stack: ActorId, child: ActorId, meta: StackChild) -> Result<()> {
        if self.layout_manager::<Stack>(stack).is_none() {
            return Err(MxError::NotAContainer {
                actor: stack,
                expected: std::any::type_name::<Stack>(),
            });
        }

        self.add_child(stack, child)?;
        self.stack_set_child_meta(stack, child, meta)
    }

    fn stack_set_child_meta(&mut self, stack: ActorId, child: ActorId, meta: StackChild) -> Result<()> {
        self.with_layout_mut::<Stack, _>(stack, |layout| {
            layout
                .child_meta_mut(child)
                .map(|existing| *existing = meta)
                .ok_or(MxError::NotAChild { parent: stack, child })
        })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mx_core::config::MxConfig;
    use mx_core::geometry::Padding;
    use mx_core::layout::FixedSize;

    fn allocation(stage: &Stage, id: ActorId) -> ActorBox {
        stage.actor(id).unwrap().allocation()
    }

    #[test]
    fn test_preferred_size_is_largest_child() {
        let mut stage = Stage::new(MxConfig::default());
        let stack = stage.create_actor(Stack::new());
        stage.add_child(stage.root(), stack).unwrap();
        stage.set_padding(stack, Padding::uniform(2.0));

        let a = stage.create_actor(FixedSize::new(40.0, 10.0).with_min(20.0, 10.0));
        let b = stage.create_actor(FixedSize::new(30.0, 25.0));
        stage.stack_push(stack, a, StackChild::default()).unwrap();
        stage.stack_push(stack, b, StackChild::default()).unwrap();

        assert_eq!(stage.preferred_width(stack, None), SizeRequest::new(34.0, 44.0));
        assert_eq!(stage.preferred_height(stack, None), SizeRequest::fixed(29.0));
    }

    #[test]
    fn test_children_aligned_over_content_box() {
        let mut stage = Stage::new(MxConfig::default());
        let stack = stage.create_actor(Stack::new());
        stage.add_child(stage.root(), stack).unwrap();
        stage.set_padding(stack, Padding::uniform(10.0));

        let background = stage.create_actor(FixedSize::new(10.0, 10.0));
        let badge = stage.create_actor(FixedSize::new(20.0, 10.0));
        let centered = stage.create_actor(FixedSize::new(20.0, 20.0));
        stage.stack_push(stack, background, StackChild::default()).unwrap();
        stage
            .stack_push(
                stack,
                badge,
                StackChild::default()
                    .with_fill(false, false)
                    .with_alignment(Align::End, Align::Start),
            )
            .unwrap();
        stage
            .stack_push(stack, centered, StackChild::default().with_fill(false, false))
            .unwrap();

        stage.allocate(stack, ActorBox::new(0.0, 0.0, 120.0, 80.0));
        assert_eq!(allocation(&stage, background), ActorBox::new(10.0, 10.0, 110.0, 70.0));
        assert_eq!(allocation(&stage, badge), ActorBox::new(90.0, 10.0, 110.0, 20.0));
        assert_eq!(allocation(&stage, centered), ActorBox::new(50.0, 30.0, 70.0, 50.0));

        // the last child is on top
        let point = nalgebra::Point2::new(60.0, 40.0);
        assert_eq!(stage.actor_at(point), Some(centered));
    }

    #[test]
    fn test_set_meta_requires_child() {
        let mut stage = Stage::new(MxConfig::default());
        let stack = stage.create_actor(Stack::new());
        let stray = stage.create_actor(FixedSize::new(1.0, 1.0));

        assert_eq!(
            stage.stack_set_child_meta(stack, stray, StackChild::default()),
            Err(MxError::NotAChild { parent: stack, child: stray })
        );
    }
}
