use std::collections::BTreeMap;

use crate::{
    direction::{Direction, Side},
    grid::Grid,
    types::{Color, ColumnSpan},
};

/// A shape under construction: one inclusive `(top, bottom)` row range per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub color: Color,
    pub columns: BTreeMap<usize, (usize, usize)>,
}

impl Shape {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Only shapes spanning at least two columns become polygons
    pub fn is_polygon(&self) -> bool {
        self.columns.len() >= 2
    }

    pub fn spans(&self) -> Vec<ColumnSpan> {
        self.columns
            .iter()
            .map(|(&column, &(top, bottom))| ColumnSpan { column, top, bottom })
            .collect()
    }
}

/// Grows shapes column by column from a seed cell.
///
/// The builder only reads the grid; cells are consumed later, when the shape
/// is assembled into a polygon.
#[derive(Debug, Clone, Copy)]
pub struct ShapeBuilder<'a> {
    grid: &'a Grid,
}

impl<'a> ShapeBuilder<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    /// Grow a shape from `(column, row)`.
    ///
    /// Returns `None` when the cell cannot seed a shape. The returned shape may
    /// still have a single column, in which case it should be abandoned.
    pub fn build(&self, column: usize, row: usize) -> Option<Shape> {
        if !self.is_valid_seed(column, row) {
            return None;
        }

        let color = self.grid.color(column, row);
        let lowest = self.seed_extent(color, column, row);
        let mut shape = Shape {
            color,
            columns: BTreeMap::from([(column, (row, lowest))]),
        };

        self.grow(Side::East, &mut shape, column, row, lowest);
        self.grow(Side::West, &mut shape, column, row, lowest);
        Some(shape)
    }

    /// A seed needs a minimal triangle of matching cells below or beside it.
    pub fn is_valid_seed(&self, column: usize, row: usize) -> bool {
        let grid = self.grid;
        let Some(cell) = grid.cell(column, row) else {
            return false;
        };
        if cell.consumed || grid.is_bottom_edge(row) {
            return false;
        }

        let color = cell.color;
        let south = grid.matches(color, column, row + 1);
        let rightward = !grid.is_right_edge(column) && {
            let east = grid.matches(color, column + 1, row);
            let south_east = grid.matches(color, column + 1, row + 1);
            if south { east || south_east } else { east && south_east }
        };
        let leftward =
            !grid.is_left_edge(column) && south && grid.matches(color, column - 1, row + 1);

        rightward || leftward
    }

    /// Bottom row of the seed column.
    ///
    /// Descent stops above a non-matching cell. A matching cell with no east
    /// or west partner closes the column: it is kept, and nothing below it is.
    pub fn seed_extent(&self, color: Color, column: usize, row: usize) -> usize {
        let grid = self.grid;
        let mut lowest = row;
        while !grid.is_bottom_edge(lowest) {
            let next = lowest + 1;
            if !grid.matches(color, column, next) {
                return lowest;
            }
            // the unpartnered cell itself stays in the column
            if !grid.neighbor_matches(color, column, next, &[Direction::East, Direction::West]) {
                return next;
            }
            lowest = next;
        }
        lowest
    }

    fn grow(&self, side: Side, shape: &mut Shape, seed_column: usize, start_row: usize, lowest: usize) {
        if start_row >= lowest || self.grid.is_outer_edge(side, seed_column) {
            return;
        }

        let mut column = seed_column;
        let mut lowest = lowest;
        while let Some(next) = side.step(column) {
            column = next;
            let Some(upper) = self.upper_row(side, shape.color, column, start_row, lowest) else {
                break;
            };
            lowest = self.lower_row(side, shape.color, column, upper, lowest);
            shape.columns.insert(column, (upper, lowest));

            if self.grid.is_outer_edge(side, column) || upper >= lowest {
                break;
            }
        }
    }

    /// Top of the next column, or `None` when the shape cannot reach it.
    fn upper_row(
        &self,
        side: Side,
        color: Color,
        column: usize,
        start_row: usize,
        lowest: usize,
    ) -> Option<usize> {
        let grid = self.grid;
        if !grid.matches(color, column, start_row) {
            // the column may still connect lower down
            for row in start_row + 1..=lowest {
                if grid.matches(color, column, row) {
                    return Some(row);
                }
                if grid.is_bottom_edge(row) {
                    break;
                }
            }
            return None;
        }

        if !grid.neighbor_matches(color, column, start_row, &[Direction::North]) {
            return Some(start_row);
        }
        let mut upper = start_row - 1;
        if grid.is_outer_edge(side, column) {
            return Some(upper);
        }

        // chimney: keep climbing only while the cell is braced below and on the diagonal
        let diagonal = side.lower_diagonal();
        while upper > 0 {
            let row = upper - 1;
            if !grid.matches(color, column, row)
                || !grid.neighbor_matches(color, column, row, &[Direction::South])
                || !grid.neighbor_matches(color, column, row, &[diagonal])
            {
                break;
            }
            upper = row;
        }
        Some(upper)
    }

    /// Bottom of the next column, starting from its top.
    fn lower_row(&self, side: Side, color: Color, column: usize, upper: usize, lowest: usize) -> usize {
        let grid = self.grid;
        let mut previous = upper;
        for row in upper..=lowest {
            if !grid.neighbor_matches(color, column, row, &[Direction::South]) {
                return row;
            }
            previous = row;
        }

        if grid.is_outer_edge(side, column) {
            return if grid.neighbor_matches(color, column, previous, &[Direction::South]) {
                previous + 1
            } else {
                previous
            };
        }

        // stalactite: past the previous column, descend only while braced on the growth side
        // (the outward neighbor: east when growing east, not the inward column)
        let across = side.across();
        let mut bottom = previous;
        for row in previous + 1..grid.row_count() {
            if !grid.neighbor_matches(color, column, row, &[Direction::South])
                || !grid.neighbor_matches(color, column, row, &[across])
            {
                return row;
            }
            bottom = row;
        }
        bottom
    }
}
