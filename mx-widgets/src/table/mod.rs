// SPDX-License-Identifier: LGPL-3.0-only
use indexmap::IndexMap;
use mx_core::actor::ActorId;
use mx_core::error::{MxError, Result};
use mx_core::geometry::ActorBox;
use mx_core::layout::{allocate_align_fill, LayoutCx, LayoutManager, SizeRequest};
use mx_core::stage::Stage;
use nalgebra::Vector2;

mod child;
mod tracks;

pub use child::TableChild;
use tracks::{distribute, measure, offsets, span_extent, total, Track, TrackRequest};

/// Lays out children in rows and columns.
///
/// Children may span several tracks. Rows and columns without a visible child
/// collapse and take no spacing.
#[derive(Debug, Clone, Default)]
pub struct Table {
    row_spacing: f32,
    column_spacing: f32,
    children: IndexMap<ActorId, TableChild>,
}

impl Table {
    /// Create an empty table without spacing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the space between rows and between columns.
    pub fn with_spacing(mut self, row_spacing: f32, column_spacing: f32) -> Self {
        self.set_row_spacing(row_spacing);
        self.set_column_spacing(column_spacing);
        self
    }

    /// Space between rows.
    pub fn row_spacing(&self) -> f32 {
        self.row_spacing
    }

    /// Set the space between rows.
    pub fn set_row_spacing(&mut self, spacing: f32) {
        self.row_spacing = spacing.max(0.0);
    }

    /// Space between columns.
    pub fn column_spacing(&self) -> f32 {
        self.column_spacing
    }

    /// Set the space between columns.
    pub fn set_column_spacing(&mut self, spacing: f32) {
        self.column_spacing = spacing.max(0.0);
    }

    /// Number of rows, hidden children included.
    pub fn row_count(&self) -> usize {
        self.children.values().map(TableChild::row_end).max().unwrap_or(0)
    }

    /// Number of columns, hidden children included.
    pub fn column_count(&self) -> usize {
        self.children.values().map(TableChild::column_end).max().unwrap_or(0)
    }

    /// Placement of a child.
    pub fn child_meta(&self, child: ActorId) -> Option<&TableChild> {
        self.children.get(&child)
    }

    /// Placement of a child, mutably.
    pub fn child_meta_mut(&mut self, child: ActorId) -> Option<&mut TableChild> {
        self.children.get_mut(&child)
    }

    fn visible<'a>(&'a self, cx: &'a LayoutCx<'_>) -> impl Iterator<Item = (ActorId, &'a TableChild)> + 'a {
        self.children
            .iter()
            .filter(move |(child, _)| cx.is_visible(**child))
            .map(|(child, meta)| (*child, meta))
    }

    fn columns(&self, cx: &LayoutCx<'_>, width: Option<f32>) -> Vec<Track> {
        let requests: Vec<TrackRequest> = self
            .visible(cx)
            .map(|(child, meta)| TrackRequest {
                start: meta.column,
                span: meta.column_span.max(1),
                request: cx.preferred_width(child, None),
                expand: meta.x_expand,
            })
            .collect();

        let mut columns = measure(self.column_count(), &requests, self.column_spacing);
        distribute(&mut columns, width, self.column_spacing);
        columns
    }

    /// Rows are negotiated height-for-width from the final column sizes.
    fn rows(&self, cx: &LayoutCx<'_>, columns: &[Track], height: Option<f32>) -> Vec<Track> {
        let requests: Vec<TrackRequest> = self
            .visible(cx)
            .map(|(child, meta)| {
                let width = span_extent(columns, meta.column, meta.column_span, self.column_spacing);
                TrackRequest {
                    start: meta.row,
                    span: meta.row_span.max(1),
                    request: cx.preferred_height(child, Some(width)),
                    expand: meta.y_expand,
                }
            })
            .collect();

        let mut rows = measure(self.row_count(), &requests, self.row_spacing);
        distribute(&mut rows, height, self.row_spacing);
        rows
    }
}

impl LayoutManager for Table {
    fn preferred_width(&self, cx: &LayoutCx<'_>, _for_height: Option<f32>) -> SizeRequest {
        let columns = self.columns(cx, None);
        total(&columns, self.column_spacing).grow(cx.padding().horizontal())
    }

    fn preferred_height(&self, cx: &LayoutCx<'_>, for_width: Option<f32>) -> SizeRequest {
        let padding = cx.padding();
        let width = for_width.map(|w| (w - padding.horizontal()).max(0.0));
        let columns = self.columns(cx, width);
        let rows = self.rows(cx, &columns, None);
        total(&rows, self.row_spacing).grow(padding.vertical())
    }

    fn allocate(&self, cx: &LayoutCx<'_>, size: Vector2<f32>) -> Vec<(ActorId, ActorBox)> {
        let content = crate::content_box(cx, size);
        let columns = self.columns(cx, Some(content.width()));
        let rows = self.rows(cx, &columns, Some(content.height()));

        let column_offsets = offsets(&columns, content.x1, self.column_spacing);
        let row_offsets = offsets(&rows, content.y1, self.row_spacing);

        self.visible(cx)
            .filter_map(|(child, meta)| {
                let x1 = *column_offsets.get(meta.column)?;
                let y1 = *row_offsets.get(meta.row)?;
                let width = span_extent(&columns, meta.column, meta.column_span, self.column_spacing);
                let height = span_extent(&rows, meta.row, meta.row_span, self.row_spacing);
                let cell = ActorBox::new(x1, y1, x1 + width, y1 + height);

                let child_box = allocate_align_fill(
                    cx,
                    child,
                    cell,
                    meta.x_align,
                    meta.y_align,
                    meta.x_fill,
                    meta.y_fill,
                );
                Some((child, child_box))
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

/// Table operations on the stage.
pub trait TableExt {
    /// Add a child at a cell. A negative row or column appends after the last one.
    fn table_attach(&mut self, table: ActorId, child: ActorId, row: i32, column: i32) -> Result<()>;

    /// Add a child with full placement properties.
    fn table_attach_with(&mut self, table: ActorId, child: ActorId, meta: TableChild) -> Result<()>;

    /// Placement of a child.
    fn table_child(&self, table: ActorId, child: ActorId) -> Option<TableChild>;

    /// Change the placement of a child.
    fn table_set_child(&mut self, table: ActorId, child: ActorId, meta: TableChild) -> Result<()>;
}

impl TableExt for Stage {
    fn table_attach(&mut self, table: ActorId, child: ActorId, row: i32, column: i32) -> Result<()> {
        let layout = self.layout_manager::<Table>(table).ok_or(MxError::NotAContainer {
            actor: table,
            expected: std::any::type_name::<Table>(),
        })?;

        let row = usize::try_from(row).unwrap_or_else(|_| layout.row_count());
        let column = usize::try_from(column).unwrap_or_else(|_| layout.column_count());

        self.table_attach_with(table, child, TableChild::at(row, column))
    }

    fn table_attach_with(&mut self, table: ActorId, child: ActorId, meta: TableChild) -> Result<()> {
        if self.layout_manager::<Table>(table).is_none() {
            return Err(MxError::NotAContainer {
                actor: table,
                expected: std::any::type_name::<Table>(),
            });
        }

        self.add_child(table, child)?;
        self.table_set_child(table, child, meta)?;
        log::trace!("Attached {} to table {} at {}x{}", child, table, meta.row, meta.column);
        Ok(())
    }

    fn table_child(&self, table: ActorId, child: ActorId) -> Option<TableChild> {
        self.layout_manager::<Table>(table)?.child_meta(child).copied()
    }

    fn table_set_child(&mut self, table: ActorId, child: ActorId, meta: TableChild) -> Result<()> {
        let meta = meta.with_span(meta.row_span, meta.column_span);
        self.with_layout_mut::<Table, _>(table, |layout| {
            layout
                .child_meta_mut(child)
                .map(|existing| *existing = meta)
                .ok_or(MxError::NotAChild { parent: table, child })
        })?
    }
}
