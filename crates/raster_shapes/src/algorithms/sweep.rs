use crate::{
    direction::Direction,
    grid::Grid,
    types::{GridPoint, Line},
};

/// Collects cells left over after polygon extraction as straight runs.
#[derive(Debug, Clone, Copy)]
pub struct LineSweeper {
    /// First direction probed; the rest follow clockwise
    pub first_probe: Direction,
}

impl Default for LineSweeper {
    /// East first: the left-hand side of a walker heading south
    fn default() -> Self {
        Self {
            first_probe: Direction::East,
        }
    }
}

impl LineSweeper {
    /// Emit the run starting at `(column, row)` and consume its cells.
    ///
    /// The run follows the first matching neighbor and continues in that
    /// direction for as long as cells keep matching. Without any matching
    /// neighbor the result is a single dot.
    pub fn sweep(&self, grid: &mut Grid, column: usize, row: usize) -> Line {
        let color = grid.color(column, row);
        let start = GridPoint::new(column, row);

        let Some(direction) = self
            .first_probe
            .clockwise_from()
            .find(|&direction| grid.neighbor_matches(color, column, row, &[direction]))
        else {
            grid.consume(column, row);
            return Line { color, start, end: start };
        };

        let mut end = start;
        while let Some(next) = grid
            .neighbor(end.column, end.row, direction)
            .filter(|next| grid.matches(color, next.column, next.row))
        {
            grid.consume(end.column, end.row);
            end = next;
        }
        grid.consume(end.column, end.row);

        Line { color, start, end }
    }

    /// Sweep every unconsumed cell in row-major order
    pub fn sweep_all(&self, grid: &mut Grid) -> Vec<Line> {
        let mut lines = Vec::new();
        for row in 0..grid.row_count() {
            for column in 0..grid.column_count() {
                if !grid.is_consumed(column, row) {
                    lines.push(self.sweep(grid, column, row));
                }
            }
        }
        lines
    }
}
