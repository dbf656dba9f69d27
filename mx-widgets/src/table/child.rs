// SPDX-License-Identifier: LGPL-3.0-only
use mx_core::geometry::Align;

/// Placement and packing properties of a [Table](super::Table) child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableChild {
    /// First row.
    pub row: usize,
    /// First column.
    pub column: usize,
    /// Number of rows covered, at least 1.
    pub row_span: usize,
    /// Number of columns covered, at least 1.
    pub column_span: usize,
    /// The columns of the child take a share of extra width.
    pub x_expand: bool,
    /// The rows of the child take a share of extra height.
    pub y_expand: bool,
    /// Stretch horizontally inside the cell.
    pub x_fill: bool,
    /// Stretch vertically inside the cell.
    pub y_fill: bool,
    /// Horizontal alignment inside the cell.
    pub x_align: Align,
    /// Vertical alignment inside the cell.
    pub y_align: Align,
}

impl Default for TableChild {
    fn default() -> Self {
        Self {
            row: 0,
            column: 0,
            row_span: 1,
            column_span: 1,
            x_expand: true,
            y_expand: true,
            x_fill: true,
            y_fill: true,
            x_align: Align::Middle,
            y_align: Align::Middle,
        }
    }
}

impl TableChild {
    /// A child at the given cell.
    pub fn at(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            ..Self::default()
        }
    }

    /// Set the number of rows and columns covered.
    pub fn with_span(mut self, row_span: usize, column_span: usize) -> Self {
        self.row_span = row_span.max(1);
        self.column_span = column_span.max(1);
        self
    }

    /// Set whether the child's tracks take extra space.
    pub fn with_expand(mut self, x_expand: bool, y_expand: bool) -> Self {
        self.x_expand = x_expand;
        self.y_expand = y_expand;
        self
    }

    /// Set whether the child is stretched on each axis.
    pub fn with_fill(mut self, x_fill: bool, y_fill: bool) -> Self {
        self.x_fill = x_fill;
        self.y_fill = y_fill;
        self
    }

    /// Set the alignment inside the cell.
    pub fn with_alignment(mut self, x_align: Align, y_align: Align) -> Self {
        self.x_align = x_align;
        self.y_align = y_align;
        self
    }

    pub(crate) fn row_end(&self) -> usize {
        self.row + self.row_span.max(1)
    }

    pub(crate) fn column_end(&self) -> usize {
        self.column + self.column_span.max(1)
    }
}
