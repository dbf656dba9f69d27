// SPDX-License-Identifier: LGPL-3.0-only
use mx_core::actor::ActorId;
use mx_core::geometry::{ActorBox, Align, Orientation};
use mx_core::layout::{allocate_align_fill, LayoutCx, LayoutManager, SizeRequest};
use nalgebra::Vector2;

/// A child's cell, in flow coordinates.
#[derive(Debug, Clone, Copy)]
struct Cell {
    child: ActorId,
    along: f32,
    across: f32,
}

/// A run of cells laid out along the flow axis.
#[derive(Debug, Clone, Default)]
struct Line {
    cells: Vec<Cell>,
    along: f32,
    across: f32,
}

/// Flows children along one axis, wrapping them into lines.
///
/// With a horizontal orientation the children fill rows from left to right and
/// rows stack downwards. A vertical grid fills columns from top to bottom instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    orientation: Orientation,
    row_spacing: f32,
    column_spacing: f32,
    homogenous_rows: bool,
    homogenous_columns: bool,
    line_alignment: Align,
    child_x_align: Align,
    child_y_align: Align,
    max_stride: usize,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            row_spacing: 0.0,
            column_spacing: 0.0,
            homogenous_rows: false,
            homogenous_columns: false,
            line_alignment: Align::Start,
            child_x_align: Align::Start,
            child_y_align: Align::Start,
            max_stride: 0,
        }
    }
}

impl Grid {
    /// Create a horizontal grid without spacing or stride limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flow axis.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the space between rows and between columns.
    pub fn with_spacing(mut self, row_spacing: f32, column_spacing: f32) -> Self {
        self.row_spacing = row_spacing.max(0.0);
        self.column_spacing = column_spacing.max(0.0);
        self
    }

    /// Give every row and/or column the extent of the largest child.
    pub fn with_homogenous(mut self, rows: bool, columns: bool) -> Self {
        self.homogenous_rows = rows;
        self.homogenous_columns = columns;
        self
    }

    /// Set the maximum number of children per line, 0 for no limit.
    pub fn with_max_stride(mut self, max_stride: usize) -> Self {
        self.max_stride = max_stride;
        self
    }

    /// Set where short lines are placed along the flow axis.
    pub fn with_line_alignment(mut self, line_alignment: Align) -> Self {
        self.line_alignment = line_alignment;
        self
    }

    /// Set the alignment of children inside their cell.
    pub fn with_child_alignment(mut self, x_align: Align, y_align: Align) -> Self {
        self.child_x_align = x_align;
        self.child_y_align = y_align;
        self
    }

    /// The flow axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Set the flow axis.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
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

    /// Whether all rows have the same height.
    pub fn homogenous_rows(&self) -> bool {
        self.homogenous_rows
    }

    /// Set whether all rows have the same height.
    pub fn set_homogenous_rows(&mut self, homogenous: bool) {
        self.homogenous_rows = homogenous;
    }

    /// Whether all columns have the same width.
    pub fn homogenous_columns(&self) -> bool {
        self.homogenous_columns
    }

    /// Set whether all columns have the same width.
    pub fn set_homogenous_columns(&mut self, homogenous: bool) {
        self.homogenous_columns = homogenous;
    }

    /// Maximum number of children per line, 0 for no limit.
    pub fn max_stride(&self) -> usize {
        self.max_stride
    }

    /// Set the maximum number of children per line.
    pub fn set_max_stride(&mut self, max_stride: usize) {
        self.max_stride = max_stride;
    }

    /// Placement of short lines along the flow axis.
    pub fn line_alignment(&self) -> Align {
        self.line_alignment
    }

    /// Set the placement of short lines along the flow axis.
    pub fn set_line_alignment(&mut self, line_alignment: Align) {
        self.line_alignment = line_alignment;
    }

    /// Alignment of children inside their cell.
    pub fn child_alignment(&self) -> (Align, Align) {
        (self.child_x_align, self.child_y_align)
    }

    /// Set the alignment of children inside their cell.
    pub fn set_child_alignment(&mut self, x_align: Align, y_align: Align) {
        self.child_x_align = x_align;
        self.child_y_align = y_align;
    }

    /// Spacing between cells of a line and between lines.
    fn spacings(&self) -> (f32, f32) {
        match self.orientation {
            Orientation::Horizontal => (self.column_spacing, self.row_spacing),
            Orientation::Vertical => (self.row_spacing, self.column_spacing),
        }
    }

    fn cells(&self, cx: &LayoutCx<'_>) -> Vec<Cell> {
        let mut sizes: Vec<(ActorId, Vector2<f32>)> = cx
            .visible_children()
            .map(|child| (child, cx.natural_size(child)))
            .collect();

        if self.homogenous_columns || self.homogenous_rows {
            let largest = sizes
                .iter()
                .fold(Vector2::zeros(), |acc: Vector2<f32>, (_, size)| acc.sup(size));
            for (_, size) in sizes.iter_mut() {
                if self.homogenous_columns {
                    size.x = largest.x;
                }
                if self.homogenous_rows {
                    size.y = largest.y;
                }
            }
        }

        sizes
            .into_iter()
            .map(|(child, size)| match self.orientation {
                Orientation::Horizontal => Cell {
                    child,
                    along: size.x,
                    across: size.y,
                },
                Orientation::Vertical => Cell {
                    child,
                    along: size.y,
                    across: size.x,
                },
            })
            .collect()
    }

    /// Break cells into lines no longer than `extent` along the flow axis.
    ///
    /// A line always takes at least one cell, so a child larger than the extent
    /// gets a line of its own.
    fn lines(&self, cells: Vec<Cell>, extent: Option<f32>) -> Vec<Line> {
        let (spacing, _) = self.spacings();
        let mut lines = Vec::new();
        let mut line = Line::default();

        for cell in cells {
            if !line.cells.is_empty() {
                let full = self.max_stride > 0 && line.cells.len() >= self.max_stride;
                let overflows = extent.is_some_and(|extent| line.along + spacing + cell.along > extent);
                if full || overflows {
                    lines.push(std::mem::take(&mut line));
                }
            }

            if !line.cells.is_empty() {
                line.along += spacing;
            }
            line.along += cell.along;
            line.across = line.across.max(cell.across);
            line.cells.push(cell);
        }

        if !line.cells.is_empty() {
            lines.push(line);
        }

        lines
    }

    /// Natural extent along the flow axis for an unbounded line length.
    fn natural_along(&self, cx: &LayoutCx<'_>) -> f32 {
        self.lines(self.cells(cx), None)
            .iter()
            .map(|line| line.along)
            .fold(0.0, f32::max)
    }

    /// Natural extent across the flow axis when lines wrap at `extent`.
    fn natural_across(&self, cx: &LayoutCx<'_>, extent: Option<f32>) -> f32 {
        let (_, line_spacing) = self.spacings();
        let lines = self.lines(self.cells(cx), extent);
        lines.iter().map(|line| line.across).sum::<f32>()
            + line_spacing * lines.len().saturating_sub(1) as f32
    }

    fn box_from_flow(&self, along: f32, across: f32, along_len: f32, across_len: f32) -> ActorBox {
        match self.orientation {
            Orientation::Horizontal => ActorBox::new(along, across, along + along_len, across + across_len),
            Orientation::Vertical => ActorBox::new(across, along, across + across_len, along + along_len),
        }
    }
}

impl LayoutManager for Grid {
    fn preferred_width(&self, cx: &LayoutCx<'_>, for_height: Option<f32>) -> SizeRequest {
        let padding = cx.padding();
        let min = cx
            .visible_children()
            .map(|child| cx.preferred_width(child, None).min)
            .fold(0.0, f32::max);

        let natural = match self.orientation {
            Orientation::Horizontal => self.natural_along(cx),
            Orientation::Vertical => {
                let extent = for_height.map(|height| (height - padding.vertical()).max(0.0));
                self.natural_across(cx, extent)
            },
        };

        SizeRequest::new(min, natural).grow(padding.horizontal())
    }

    fn preferred_height(&self, cx: &LayoutCx<'_>, for_width: Option<f32>) -> SizeRequest {
        let padding = cx.padding();
        let min = cx
            .visible_children()
            .map(|child| cx.preferred_height(child, None).min)
            .fold(0.0, f32::max);

        let natural = match self.orientation {
            Orientation::Horizontal => {
                let extent = for_width.map(|width| (width - padding.horizontal()).max(0.0));
                self.natural_across(cx, extent)
            },
            Orientation::Vertical => self.natural_along(cx),
        };

        SizeRequest::new(min, natural).grow(padding.vertical())
    }

    fn allocate(&self, cx: &LayoutCx<'_>, size: Vector2<f32>) -> Vec<(ActorId, ActorBox)> {
        let content = crate::content_box(cx, size);
        let (spacing, line_spacing) = self.spacings();
        let (start, mut across, extent) = match self.orientation {
            Orientation::Horizontal => (content.x1, content.y1, content.width()),
            Orientation::Vertical => (content.y1, content.x1, content.height()),
        };

        let mut boxes = Vec::new();
        for line in self.lines(self.cells(cx), Some(extent)) {
            let mut along = start + (extent - line.along).max(0.0) * self.line_alignment.factor();

            for cell in &line.cells {
                let slot = self.box_from_flow(along, across, cell.along, line.across);
                let child_box = allocate_align_fill(
                    cx,
                    cell.child,
                    slot,
                    self.child_x_align,
                    self.child_y_align,
                    false,
                    false,
                );
                boxes.push((cell.child, child_box));
                along += cell.along + spacing;
            }

            across += line.across + line_spacing;
        }

        boxes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mx_core::config::MxConfig;
    use mx_core::layout::FixedSize;
    use mx_core::stage::Stage;

    fn setup(grid: Grid, sizes: &[(f32, f32)]) -> (Stage, ActorId, Vec<ActorId>) {
        let mut stage = Stage::new(MxConfig::default());
        let container = stage.create_actor(grid);
        stage.add_child(stage.root(), container).unwrap();

        let children = sizes
            .iter()
            .map(|&(w, h)| {
                let child = stage.create_actor(FixedSize::new(w, h));
                stage.add_child(container, child).unwrap();
                child
            })
            .collect();

        (stage, container, children)
    }

    fn allocation(stage: &Stage, id: ActorId) -> ActorBox {
        stage.actor(id).unwrap().allocation()
    }

    #[test]
    fn test_wraps_on_overflow() {
        let (mut stage, grid, children) =
            setup(Grid::new().with_spacing(5.0, 10.0), &[(30.0, 10.0), (30.0, 20.0), (30.0, 10.0)]);

        assert_eq!(stage.preferred_width(grid, None), SizeRequest::new(30.0, 110.0));
        // 80 wide fits two cells per row
        assert_eq!(stage.preferred_height(grid, Some(80.0)).natural, 35.0);

        stage.allocate(grid, ActorBox::new(0.0, 0.0, 80.0, 35.0));
        assert_eq!(allocation(&stage, children[0]), ActorBox::new(0.0, 0.0, 30.0, 10.0));
        assert_eq!(allocation(&stage, children[1]), ActorBox::new(40.0, 0.0, 70.0, 20.0));
        assert_eq!(allocation(&stage, children[2]), ActorBox::new(0.0, 25.0, 30.0, 35.0));
    }

    #[test]
    fn test_max_stride() {
        let (mut stage, grid, children) = setup(
            Grid::new()
                .with_orientation(Orientation::Vertical)
                .with_max_stride(2),
            &[(10.0, 10.0); 5],
        );

        assert_eq!(stage.preferred_height(grid, None).natural, 20.0);
        assert_eq!(stage.preferred_width(grid, None).natural, 30.0);

        stage.allocate(grid, ActorBox::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(allocation(&stage, children[1]), ActorBox::new(0.0, 10.0, 10.0, 20.0));
        assert_eq!(allocation(&stage, children[2]), ActorBox::new(10.0, 0.0, 20.0, 10.0));
        assert_eq!(allocation(&stage, children[4]), ActorBox::new(20.0, 0.0, 30.0, 10.0));
    }

    #[test]
    fn test_oversized_child_gets_own_line() {
        let (mut stage, grid, children) = setup(Grid::new(), &[(50.0, 10.0), (10.0, 10.0)]);
        stage.allocate(grid, ActorBox::new(0.0, 0.0, 20.0, 40.0));

        assert_eq!(allocation(&stage, children[0]).y1, 0.0);
        assert_eq!(allocation(&stage, children[1]), ActorBox::new(0.0, 10.0, 10.0, 20.0));
    }

    #[test]
    fn test_homogenous_cells_and_alignment() {
        let (mut stage, grid, children) = setup(
            Grid::new()
                .with_homogenous(true, true)
                .with_child_alignment(Align::Middle, Align::End),
            &[(10.0, 10.0), (30.0, 20.0)],
        );

        assert_eq!(stage.preferred_width(grid, None).natural, 60.0);

        stage.allocate(grid, ActorBox::new(0.0, 0.0, 60.0, 20.0));
        assert_eq!(allocation(&stage, children[0]), ActorBox::new(10.0, 10.0, 20.0, 20.0));
        assert_eq!(allocation(&stage, children[1]), ActorBox::new(30.0, 0.0, 60.0, 20.0));
    }

    #[test]
    fn test_line_alignment() {
        let (mut stage, grid, children) =
            setup(Grid::new().with_line_alignment(Align::End), &[(20.0, 10.0), (20.0, 10.0), (20.0, 10.0)]);
        stage.allocate(grid, ActorBox::new(0.0, 0.0, 50.0, 20.0));

        assert_eq!(allocation(&stage, children[0]).x1, 10.0);
        assert_eq!(allocation(&stage, children[1]).x1, 30.0);
        assert_eq!(allocation(&stage, children[2]), ActorBox::new(30.0, 10.0, 50.0, 20.0));
    }

    #[test]
    fn test_hidden_children_skipped() {
        let (mut stage, grid, children) = setup(Grid::new(), &[(10.0, 10.0), (10.0, 10.0), (10.0, 10.0)]);
        stage.set_visible(children[1], false);

        assert_eq!(stage.preferred_width(grid, None).natural, 20.0);
        stage.allocate(grid, ActorBox::new(0.0, 0.0, 20.0, 10.0));
        assert_eq!(allocation(&stage, children[2]).x1, 10.0);
    }
}
