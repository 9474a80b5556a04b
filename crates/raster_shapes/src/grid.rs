use crate::{
    direction::{Direction, Side},
    error::{Result, ShapeError},
    types::{Cell, Color, GridPoint},
};

/// Column-major matrix of colored cells with a per-cell consumed marker.
///
/// Cells are addressed `(column, row)` from the top-left corner. A grid is
/// owned by a single extraction run; once a cell is consumed it stays
/// consumed and no longer matches anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Vec<Cell>,
    column_count: usize,
    row_count: usize,
}

impl Grid {
    /// Build from a list of columns, each listing its rows top to bottom
    pub fn from_columns(columns: Vec<Vec<Color>>) -> Result<Self> {
        let row_count = columns.first().map(Vec::len).unwrap_or(0);
        if row_count == 0 {
            return Err(ShapeError::EmptyGrid);
        }

        let column_count = columns.len();
        let mut cells = Vec::with_capacity(column_count * row_count);
        for (index, column) in columns.into_iter().enumerate() {
            if column.len() != row_count {
                return Err(ShapeError::RaggedGrid {
                    index,
                    expected: row_count,
                    found: column.len(),
                });
            }
            cells.extend(column.into_iter().map(Cell::new));
        }

        Ok(Self {
            cells,
            column_count,
            row_count,
        })
    }

    /// Build from a list of rows, each listing its columns left to right
    pub fn from_rows(rows: Vec<Vec<Color>>) -> Result<Self> {
        let column_count = rows.first().map(Vec::len).unwrap_or(0);
        if column_count == 0 {
            return Err(ShapeError::EmptyGrid);
        }
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != column_count)
        {
            return Err(ShapeError::RaggedGrid {
                index,
                expected: column_count,
                found: row.len(),
            });
        }

        let columns = (0..column_count)
            .map(|column| rows.iter().map(|row| row[column]).collect())
            .collect();
        Self::from_columns(columns)
    }

    /// A grid where every cell has the same color
    pub fn filled(column_count: usize, row_count: usize, color: Color) -> Result<Self> {
        if column_count == 0 || row_count == 0 {
            return Err(ShapeError::EmptyGrid);
        }
        Ok(Self {
            cells: vec![Cell::new(color); column_count * row_count],
            column_count,
            row_count,
        })
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    fn index(&self, column: usize, row: usize) -> usize {
        column * self.row_count + row
    }

    fn contains(&self, column: usize, row: usize) -> bool {
        column < self.column_count && row < self.row_count
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<&Cell> {
        if self.contains(column, row) {
            Some(&self.cells[self.index(column, row)])
        } else {
            None
        }
    }

    /// Color of an in-bounds cell.
    ///
    /// # Panics
    ///
    /// Panics when `(column, row)` is outside the grid.
    pub fn color(&self, column: usize, row: usize) -> Color {
        self.cells[self.index_checked(column, row)].color
    }

    pub fn is_consumed(&self, column: usize, row: usize) -> bool {
        self.cell(column, row).is_some_and(|cell| cell.consumed)
    }

    /// Mark a cell as claimed by an emitted shape. Out-of-range coordinates panic.
    pub fn consume(&mut self, column: usize, row: usize) {
        let index = self.index_checked(column, row);
        self.cells[index].consumed = true;
    }

    fn index_checked(&self, column: usize, row: usize) -> usize {
        assert!(
            self.contains(column, row),
            "cell ({column}, {row}) outside {}x{} grid",
            self.column_count,
            self.row_count
        );
        self.index(column, row)
    }

    /// True when the cell exists, is unconsumed and has exactly `color`
    pub fn matches(&self, color: Color, column: usize, row: usize) -> bool {
        self.cell(column, row)
            .is_some_and(|cell| !cell.consumed && cell.color == color)
    }

    /// Whether a neighbor exists in `direction`
    pub fn in_bounds(&self, column: usize, row: usize, direction: Direction) -> bool {
        let (column_delta, row_delta) = direction.offset();
        match (
            column.checked_add_signed(column_delta),
            row.checked_add_signed(row_delta),
        ) {
            (Some(next_column), Some(next_row)) => self.contains(next_column, next_row),
            _ => false,
        }
    }

    pub fn neighbor(&self, column: usize, row: usize, direction: Direction) -> Option<GridPoint> {
        if self.in_bounds(column, row, direction) {
            Some(direction.neighbor_coordinate(column, row).into())
        } else {
            None
        }
    }

    /// True when any of the in-bounds neighbors in `directions` matches `color`
    pub fn neighbor_matches(
        &self,
        color: Color,
        column: usize,
        row: usize,
        directions: &[Direction],
    ) -> bool {
        directions.iter().any(|&direction| {
            self.neighbor(column, row, direction)
                .is_some_and(|point| self.matches(color, point.column, point.row))
        })
    }

    pub fn is_left_edge(&self, column: usize) -> bool {
        column == 0
    }

    pub fn is_right_edge(&self, column: usize) -> bool {
        column + 1 >= self.column_count
    }

    pub fn is_top_edge(&self, row: usize) -> bool {
        row == 0
    }

    pub fn is_bottom_edge(&self, row: usize) -> bool {
        row + 1 >= self.row_count
    }

    /// Whether `column` is the outermost column on `side`
    pub fn is_outer_edge(&self, side: Side, column: usize) -> bool {
        match side {
            Side::East => self.is_right_edge(column),
            Side::West => self.is_left_edge(column),
        }
    }

    /// Consumed flags, indexed `[column][row]`
    pub fn consumed_mask(&self) -> Vec<Vec<bool>> {
        self.cells
            .chunks(self.row_count)
            .map(|column| column.iter().map(|cell| cell.consumed).collect())
            .collect()
    }

    pub fn unconsumed_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.consumed).count()
    }

    pub fn is_fully_consumed(&self) -> bool {
        self.unconsumed_count() == 0
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Deterministic color for a text-art symbol
    pub fn symbol_color(symbol: char) -> Color {
        let value = symbol as u32 as u8;
        Color::rgba(value, value, value, 255)
    }

    /// Grid from rows of single-character symbols, e.g. `["bbr", "brr"]`
    pub fn grid(rows: &[&str]) -> Grid {
        let rows = rows
            .iter()
            .map(|row| row.chars().map(symbol_color).collect())
            .collect();
        Grid::from_rows(rows).expect("valid test grid")
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{grid, symbol_color};
    use super::*;

    #[test]
    fn test_from_rows_transposes() {
        let grid = grid(&["ab", "cd", "ef"]);
        assert_eq!(grid.column_count(), 2);
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.color(1, 0), symbol_color('b'));
        assert_eq!(grid.color(0, 2), symbol_color('e'));
    }

    #[test]
    fn test_rejects_empty_and_ragged() {
        assert!(matches!(Grid::from_columns(vec![]), Err(ShapeError::EmptyGrid)));
        assert!(matches!(Grid::from_rows(vec![vec![]]), Err(ShapeError::EmptyGrid)));
        let red = Color::rgb(255, 0, 0);
        let ragged = Grid::from_columns(vec![vec![red, red], vec![red]]);
        assert!(matches!(
            ragged,
            Err(ShapeError::RaggedGrid { index: 1, expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_matching_ignores_consumed_target() {
        let mut grid = grid(&["aab"]);
        let a = symbol_color('a');
        assert!(grid.matches(a, 1, 0));
        assert!(!grid.matches(a, 2, 0));
        assert!(!grid.matches(a, 3, 0));

        grid.consume(1, 0);
        assert!(!grid.matches(a, 1, 0));
        // only the target's consumption matters
        assert!(grid.neighbor_matches(a, 1, 0, &[Direction::West]));
        assert!(!grid.neighbor_matches(a, 0, 0, &[Direction::East]));
        grid.consume(0, 0);
        assert!(grid.is_consumed(0, 0));
    }

    #[test]
    fn test_bounds_at_corners() {
        let grid = grid(&["aaa", "aaa"]);
        assert!(!grid.in_bounds(0, 0, Direction::North));
        assert!(!grid.in_bounds(0, 0, Direction::West));
        assert!(grid.in_bounds(0, 0, Direction::SouthEast));
        assert!(!grid.in_bounds(2, 1, Direction::SouthEast));
        assert_eq!(grid.neighbor(2, 1, Direction::NorthWest), Some(GridPoint::new(1, 0)));
        assert!(grid.is_outer_edge(Side::East, 2));
        assert!(grid.is_outer_edge(Side::West, 0));
        assert!(grid.is_bottom_edge(1));
    }

    #[test]
    fn test_neighbor_matches_any() {
        let grid = grid(&["aba", "bab"]);
        let a = symbol_color('a');
        assert!(grid.neighbor_matches(a, 1, 1, &[Direction::North, Direction::NorthEast]));
        assert!(!grid.neighbor_matches(a, 1, 1, &[Direction::North, Direction::East]));
    }

    #[test]
    fn test_consumed_mask_is_column_major() {
        let mut grid = Grid::filled(3, 2, Color::rgb(0, 0, 0)).expect("grid");
        grid.consume(2, 1);
        let mask = grid.consumed_mask();
        assert_eq!(mask.len(), 3);
        assert_eq!(mask[2], vec![false, true]);
        assert_eq!(grid.unconsumed_count(), 5);
        assert!(!grid.is_fully_consumed());
    }
}
