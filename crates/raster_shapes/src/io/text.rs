use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, ShapeError},
    grid::Grid,
    traits::GridSource,
    types::Color,
};

/// A picture drawn with characters, one character per cell.
///
/// Every character must have an entry in the palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TextArt {
    pub rows: Vec<String>,
    pub palette: BTreeMap<char, Color>,
}

impl TextArt {
    pub fn new<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
            palette: BTreeMap::new(),
        }
    }

    pub fn with_symbol(mut self, symbol: char, color: Color) -> Self {
        self.palette.insert(symbol, color);
        self
    }

    /// A small sailboat on open water
    pub fn sailboat() -> Self {
        Self::new([
            "           m        ",
            "           m        ",
            "          sm        ",
            "         ssms       ",
            "        sssmss      ",
            "       ssssmss      ",
            "      sssssmsss     ",
            "    sssssssmsss     ",
            "  sssssssssmssss    ",
            "sssssssssssmssss    ",
            "           m        ",
            "  hhhhhhhhhhhhhhhhh ",
            "  hhhhhhhhhhhhhhhh  ",
            "   hhhhhhhhhhhhhh   ",
        ])
        .with_symbol(' ', Color::rgba(0, 0, 150, 0))
        .with_symbol('s', Color::rgba(250, 250, 245, 0))
        .with_symbol('m', Color::rgba(150, 150, 0, 0))
        .with_symbol('h', Color::rgba(220, 50, 0, 0))
    }
}

impl GridSource for TextArt {
    fn to_grid(&self) -> Result<Grid> {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(column, symbol)| {
                        self.palette
                            .get(&symbol)
                            .copied()
                            .ok_or(ShapeError::UnknownSymbol { symbol, row, column })
                    })
                    .collect::<Result<Vec<Color>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Grid::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pipeline;

    #[test]
    fn test_text_art_to_grid() {
        let art = TextArt::new(["ab", "ba", "aa"])
            .with_symbol('a', Color::rgb(1, 2, 3))
            .with_symbol('b', Color::rgb(4, 5, 6));
        let grid = art.to_grid().expect("grid");
        assert_eq!(grid.column_count(), 2);
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.color(1, 0), Color::rgb(4, 5, 6));
        assert_eq!(grid.color(1, 2), Color::rgb(1, 2, 3));
    }

    #[test]
    fn test_unknown_symbol() {
        let art = TextArt::new(["aa", "a?"]).with_symbol('a', Color::rgb(1, 2, 3));
        assert!(matches!(
            art.to_grid(),
            Err(ShapeError::UnknownSymbol { symbol: '?', row: 1, column: 1 })
        ));
    }

    #[test]
    fn test_ragged_rows() {
        let art = TextArt::new(["aaa", "aa"]).with_symbol('a', Color::rgb(1, 2, 3));
        assert!(matches!(
            art.to_grid(),
            Err(ShapeError::RaggedGrid { index: 1, expected: 3, found: 2 })
        ));
    }

    #[test]
    fn test_sailboat_is_fully_covered() {
        let mut grid = TextArt::sailboat().to_grid().expect("grid");
        assert_eq!(grid.column_count(), 20);
        assert_eq!(grid.row_count(), 14);

        let shapes = Pipeline::default().extract(&mut grid);
        assert!(grid.is_fully_consumed());
        assert_eq!(shapes.polygons.len(), 7);
        assert_eq!(shapes.lines.len(), 5);
        assert_eq!(shapes.claimed_cells(), 20 * 14);
    }
}
