// SPDX-License-Identifier: LGPL-3.0-only
#![warn(missing_docs)]

//! Container library for mx => See `mx` crate.
//!
//! Contains the layout managers used to build actor trees.

/// Contains the [bin::Bin] single child container.
pub mod bin;

/// Contains the [box_layout::BoxLayout] container.
pub mod box_layout;

/// Contains the [expander::Expander] container.
pub mod expander;

/// Contains the [grid::Grid] flow container.
pub mod grid;

/// Contains the [stack::Stack] container.
pub mod stack;

/// Contains the [table::Table] container.
pub mod table;

pub(crate) fn content_box(
    cx: &mx_core::layout::LayoutCx<'_>,
    size: nalgebra::Vector2<f32>,
) -> mx_core::geometry::ActorBox {
    mx_core::geometry::ActorBox::from_size(size).shrink(&cx.padding())
}
