//! Compass model for the eight neighbors of a cell.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

/// The eight neighbor directions, enumerated clockwise from north.
///
/// Rows grow downward, so `South` is `row + 1` and `East` is `column + 1`.
#[derive(
    Debug, Clone, Copy,
    PartialEq, Eq, Hash,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All directions in clockwise order starting at north
    pub const CLOCKWISE: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::CLOCKWISE.get(index).copied()
    }

    /// `(column, row)` delta of one step in this direction
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    fn rotated(self, steps: usize) -> Self {
        Self::CLOCKWISE[(self.index() + steps) % 8]
    }

    /// 45 degrees clockwise
    pub fn rotate_clockwise(self) -> Self {
        self.rotated(1)
    }

    /// 45 degrees counter-clockwise
    pub fn rotate_counter_clockwise(self) -> Self {
        self.rotated(7)
    }

    /// 90 degrees to the right of a walker heading this way
    pub fn turn_right(self) -> Self {
        self.rotated(2)
    }

    /// 90 degrees to the left of a walker heading this way
    pub fn turn_left(self) -> Self {
        self.rotated(6)
    }

    pub fn opposite(self) -> Self {
        self.rotated(4)
    }

    /// All eight directions clockwise, beginning with `self`
    pub fn clockwise_from(self) -> impl Iterator<Item = Direction> {
        (0..8).map(move |step| self.rotated(step))
    }

    /// Coordinate of the neighbor in this direction.
    ///
    /// Callers check bounds first (see [`crate::Grid::in_bounds`]).
    ///
    /// # Panics
    ///
    /// Panics when the step would leave the non-negative index space.
    pub fn neighbor_coordinate(self, column: usize, row: usize) -> (usize, usize) {
        let (column_delta, row_delta) = self.offset();
        match (
            column.checked_add_signed(column_delta),
            row.checked_add_signed(row_delta),
        ) {
            (Some(next_column), Some(next_row)) => (next_column, next_row),
            _ => panic!("no {self} neighbor for cell ({column}, {row})"),
        }
    }
}

/// Which way a shape grows from its seed column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    East,
    West,
}

impl Side {
    /// Neighbor across the side boundary (east or west)
    pub fn across(self) -> Direction {
        match self {
            Side::East => Direction::East,
            Side::West => Direction::West,
        }
    }

    /// Lower diagonal on the growth side (southeast or southwest)
    pub fn lower_diagonal(self) -> Direction {
        match self {
            Side::East => Direction::SouthEast,
            Side::West => Direction::SouthWest,
        }
    }

    /// Column one step further in the growth direction, if there is one
    pub fn step(self, column: usize) -> Option<usize> {
        match self {
            Side::East => column.checked_add(1),
            Side::West => column.checked_sub(1),
        }
    }
}
