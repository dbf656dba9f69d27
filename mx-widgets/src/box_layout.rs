// SPDX-License-Identifier: LGPL-3.0-only
use indexmap::IndexMap;
use mx_core::actor::ActorId;
use mx_core::error::{MxError, Result};
use mx_core::geometry::{ActorBox, Align, Orientation};
use mx_core::layout::{allocate_align_fill, LayoutCx, LayoutManager, SizeRequest};
use mx_core::stage::Stage;
use nalgebra::Vector2;

/// Packing properties of a [BoxLayout] child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxChild {
    /// Take a share of the extra space along the box axis.
    pub expand: bool,
    /// Stretch horizontally inside the slot.
    pub x_fill: bool,
    /// Stretch vertically inside the slot.
    pub y_fill: bool,
    /// Horizontal alignment inside the slot.
    pub x_align: Align,
    /// Vertical alignment inside the slot.
    pub y_align: Align,
}

impl Default for BoxChild {
    fn default() -> Self {
        Self {
            expand: false,
            x_fill: true,
            y_fill: true,
            x_align: Align::Middle,
            y_align: Align::Middle,
        }
    }
}

impl BoxChild {
    /// Set whether the child takes a share of the extra space.
    pub fn with_expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    /// Set whether the child is stretched on each axis.
    pub fn with_fill(mut self, x_fill: bool, y_fill: bool) -> Self {
        self.x_fill = x_fill;
        self.y_fill = y_fill;
        self
    }

    /// Set the alignment inside the slot.
    pub fn with_alignment(mut self, x_align: Align, y_align: Align) -> Self {
        self.x_align = x_align;
        self.y_align = y_align;
        self
    }
}

/// Lays out children in a single row or column.
#[derive(Debug, Clone, Default)]
pub struct BoxLayout {
    orientation: Orientation,
    spacing: f32,
    pack_start: bool,
    children: IndexMap<ActorId, BoxChild>,
}

impl BoxLayout {
    /// Create a horizontal box without spacing.
    pub fn new() -> Self {
        Self::default()
    }

    /// A box with the given orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the space between children.
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing.max(0.0);
        self
    }

    /// Lay out children in reverse order.
    pub fn with_pack_start(mut self, pack_start: bool) -> Self {
        self.pack_start = pack_start;
        self
    }

    /// The box axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Set the box axis.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Space between children.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Set the space between children.
    pub fn set_spacing(&mut self, spacing: f32) {
        self.spacing = spacing.max(0.0);
    }

    /// Whether children are laid out in reverse order.
    pub fn pack_start(&self) -> bool {
        self.pack_start
    }

    /// Lay out children in reverse order.
    pub fn set_pack_start(&mut self, pack_start: bool) {
        self.pack_start = pack_start;
    }

    /// Packing properties of a child.
    pub fn child_meta(&self, child: ActorId) -> Option<&BoxChild> {
        self.children.get(&child)
    }

    /// Packing properties of a child, mutably.
    pub fn child_meta_mut(&mut self, child: ActorId) -> Option<&mut BoxChild> {
        self.children.get_mut(&child)
    }

    fn meta(&self, child: ActorId) -> BoxChild {
        self.children.get(&child).copied().unwrap_or_default()
    }

    /// Size of one child along the box axis, for a cross axis extent.
    fn along(&self, cx: &LayoutCx<'_>, child: ActorId, across: Option<f32>) -> SizeRequest {
        match self.orientation {
            Orientation::Horizontal => cx.preferred_width(child, across),
            Orientation::Vertical => cx.preferred_height(child, across),
        }
    }

    /// Size of one child across the box axis.
    fn across(&self, cx: &LayoutCx<'_>, child: ActorId, along: Option<f32>) -> SizeRequest {
        match self.orientation {
            Orientation::Horizontal => cx.preferred_height(child, along),
            Orientation::Vertical => cx.preferred_width(child, along),
        }
    }

    fn total_along(&self, cx: &LayoutCx<'_>, across: Option<f32>) -> SizeRequest {
        let mut count = 0usize;
        let total = cx
            .visible_children()
            .map(|child| {
                count += 1;
                self.along(cx, child, across)
            })
            .fold(SizeRequest::ZERO, SizeRequest::sum);

        total.grow(self.spacing * count.saturating_sub(1) as f32)
    }

    fn total_across(&self, cx: &LayoutCx<'_>) -> SizeRequest {
        cx.visible_children()
            .map(|child| {
                let along = self.along(cx, child, None).natural;
                self.across(cx, child, Some(along))
            })
            .fold(SizeRequest::ZERO, SizeRequest::max)
    }
}

impl LayoutManager for BoxLayout {
    fn preferred_width(&self, cx: &LayoutCx<'_>, for_height: Option<f32>) -> SizeRequest {
        let padding = cx.padding();
        let request = match self.orientation {
            Orientation::Horizontal => {
                self.total_along(cx, for_height.map(|h| (h - padding.vertical()).max(0.0)))
            },
            Orientation::Vertical => self.total_across(cx),
        };

        request.grow(padding.horizontal())
    }

    fn preferred_height(&self, cx: &LayoutCx<'_>, for_width: Option<f32>) -> SizeRequest {
        let padding = cx.padding();
        let request = match self.orientation {
            Orientation::Horizontal => self.total_across(cx),
            Orientation::Vertical => {
                self.total_along(cx, for_width.map(|w| (w - padding.horizontal()).max(0.0)))
            },
        };

        request.grow(padding.vertical())
    }

    fn allocate(&self, cx: &LayoutCx<'_>, size: Vector2<f32>) -> Vec<(ActorId, ActorBox)> {
        let content = crate::content_box(cx, size);
        let (available, across) = match self.orientation {
            Orientation::Horizontal => (content.width(), content.height()),
            Orientation::Vertical => (content.height(), content.width()),
        };

        let mut children: Vec<(ActorId, f32, BoxChild)> = cx
            .visible_children()
            .map(|child| (child, self.along(cx, child, Some(across)).natural, self.meta(child)))
            .collect();

        if self.pack_start {
            children.reverse();
        }

        let preferred: f32 = children.iter().map(|(_, natural, _)| natural).sum::<f32>()
            + self.spacing * children.len().saturating_sub(1) as f32;
        let n_expand = children.iter().filter(|(_, _, meta)| meta.expand).count();
        let extra = if n_expand > 0 {
            ((available - preferred) / n_expand as f32).max(0.0)
        } else {
            0.0
        };

        let mut position = match self.orientation {
            Orientation::Horizontal => content.x1,
            Orientation::Vertical => content.y1,
        };

        children
            .into_iter()
            .map(|(child, natural, meta)| {
                let extent = if meta.expand { natural + extra } else { natural };
                let slot = match self.orientation {
                    Orientation::Horizontal => {
                        ActorBox::new(position, content.y1, position + extent, content.y2)
                    },
                    Orientation::Vertical => {
                        ActorBox::new(content.x1, position, content.x2, position + extent)
                    },
                };
                position += extent + self.spacing;

                let child_box = allocate_align_fill(
                    cx,
                    child,
                    slot,
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

/// Box layout operations on the stage.
pub trait BoxLayoutExt {
    /// Append a child to a box with the given packing properties.
    fn box_pack(&mut self, container: ActorId, child: ActorId, meta: BoxChild) -> Result<()>;

    /// Change the packing properties of a child.
    fn box_set_child_meta(&mut self, container: ActorId, child: ActorId, meta: BoxChild) -> Result<()>;
}

impl BoxLayoutExt for Stage {
    fn box_pack(&mut self, container: ActorId, child: ActorId, meta: BoxChild) -> Result<()> {
        if self.layout_manager::<BoxLayout>(container).is_none() {
            return Err(MxError::NotAContainer {
                actor: container,
                expected: "BoxLayout",
            });
        }

        self.add_child(container, child)?;
        self.box_set_child_meta(container, child, meta)
    }

    fn box_set_child_meta(&mut self, container: ActorId, child: ActorId, meta: BoxChild) -> Result<()> {
        self.with_layout_mut::<BoxLayout, _>(container, |layout| {
            layout
                .child_meta_mut(child)
                .map(|existing| *existing = meta)
                .ok_or(MxError::NotAChild {
                    parent: container,
                    child,
                })
        })?
    }
}
