use std::fmt;

use geo_types::{Coord, LineString, Polygon as GeoPolygon, Rect};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// RGBA color of a grid cell. Cells are compared by exact channel equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self([red, green, blue, 255])
    }

    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self([red, green, blue, alpha])
    }

    pub fn red(&self) -> u8 {
        self.0[0]
    }

    pub fn green(&self) -> u8 {
        self.0[1]
    }

    pub fn blue(&self) -> u8 {
        self.0[2]
    }

    pub fn alpha(&self) -> u8 {
        self.0[3]
    }

    /// `#RRGGBB` in uppercase hex. Alpha is not part of the rendering.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red(), self.green(), self.blue())
    }
}

impl From<[u8; 4]> for Color {
    fn from(channels: [u8; 4]) -> Self {
        Self(channels)
    }
}

impl From<image::Rgba<u8>> for Color {
    fn from(pixel: image::Rgba<u8>) -> Self {
        Self(pixel.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A single grid cell. `consumed` only ever goes from false to true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub color: Color,
    pub consumed: bool,
}

impl Cell {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            consumed: false,
        }
    }
}

/// A cell coordinate: `column` is x (left to right), `row` is y (top to bottom).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub struct GridPoint {
    pub column: usize,
    pub row: usize,
}

impl GridPoint {
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    pub fn to_coord(self) -> Coord<f64> {
        Coord {
            x: self.column as f64,
            y: self.row as f64,
        }
    }
}

impl From<(usize, usize)> for GridPoint {
    fn from((column, row): (usize, usize)) -> Self {
        Self { column, row }
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.column, self.row)
    }
}

/// Inclusive row range `top..=bottom` claimed within one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnSpan {
    pub column: usize,
    pub top: usize,
    pub bottom: usize,
}

impl ColumnSpan {
    pub fn len(&self) -> usize {
        self.bottom + 1 - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.bottom < self.top
    }

    pub fn cells(&self) -> impl Iterator<Item = GridPoint> + '_ {
        (self.top..=self.bottom).map(|row| GridPoint::new(self.column, row))
    }
}

/// A closed rectilinear outline of same-colored cells.
///
/// The last vertex implicitly connects back to the first. `spans` lists the
/// cells the polygon claimed from the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Polygon {
    pub color: Color,
    pub vertices: Vec<GridPoint>,
    pub spans: Vec<ColumnSpan>,
}

impl Polygon {
    /// Convert to a geo-types Polygon with a closed exterior ring
    pub fn to_geo_polygon(&self) -> GeoPolygon<f64> {
        let exterior: Vec<Coord<f64>> = self.vertices.iter().map(|p| p.to_coord()).collect();
        // LineString gets closed by Polygon::new
        GeoPolygon::new(LineString::new(exterior), vec![])
    }

    /// Area enclosed by the outline, in grid units
    pub fn area(&self) -> f64 {
        use geo::Area;
        self.to_geo_polygon().unsigned_area()
    }

    pub fn bounding_box(&self) -> Option<Rect<f64>> {
        use geo::BoundingRect;
        self.to_geo_polygon().bounding_rect()
    }

    pub fn cells(&self) -> impl Iterator<Item = GridPoint> + '_ {
        self.spans.iter().flat_map(|span| span.cells())
    }

    pub fn cell_count(&self) -> usize {
        self.spans.iter().map(ColumnSpan::len).sum()
    }
}

/// A straight run of same-colored cells. `start == end` is a single dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Line {
    pub color: Color,
    pub start: GridPoint,
    pub end: GridPoint,
}

impl Line {
    pub fn is_dot(&self) -> bool {
        self.start == self.end
    }

    /// Number of cells covered, endpoints included
    pub fn cell_count(&self) -> usize {
        self.start.column.abs_diff(self.end.column)
            .max(self.start.row.abs_diff(self.end.row))
            + 1
    }

    /// Cells from `start` to `end`; lines are horizontal, vertical or 45 degree diagonals
    pub fn cells(&self) -> impl Iterator<Item = GridPoint> + '_ {
        let step = |from: usize, to: usize| (to as isize - from as isize).signum();
        let column_step = step(self.start.column, self.end.column);
        let row_step = step(self.start.row, self.end.row);
        (0..self.cell_count() as isize).map(move |i| {
            GridPoint::new(
                (self.start.column as isize + column_step * i) as usize,
                (self.start.row as isize + row_step * i) as usize,
            )
        })
    }

    pub fn to_geo_line(&self) -> geo_types::Line<f64> {
        geo_types::Line::new(self.start.to_coord(), self.end.to_coord())
    }
}

/// Everything extracted from one grid, in scan order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedShapes {
    pub column_count: usize,
    pub row_count: usize,
    pub polygons: Vec<Polygon>,
    pub lines: Vec<Line>,
}

impl ExtractedShapes {
    pub fn shape_count(&self) -> usize {
        self.polygons.len() + self.lines.len()
    }

    /// Total number of cells claimed by polygons and lines
    pub fn claimed_cells(&self) -> usize {
        self.polygons.iter().map(Polygon::cell_count).sum::<usize>()
            + self.lines.iter().map(Line::cell_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_ignores_alpha() {
        assert_eq!(Color::rgba(1, 171, 255, 0).to_hex(), "#01ABFF");
        assert_eq!(Color::rgb(220, 50, 0).to_string(), "#DC3200");
    }

    #[test]
    fn test_line_cells_follow_diagonal() {
        let line = Line {
            color: Color::rgb(1, 1, 1),
            start: GridPoint::new(3, 1),
            end: GridPoint::new(1, 3),
        };
        let cells: Vec<_> = line.cells().collect();
        assert_eq!(
            cells,
            vec![GridPoint::new(3, 1), GridPoint::new(2, 2), GridPoint::new(1, 3)]
        );
        assert_eq!(line.cell_count(), 3);
        assert!(!line.is_dot());
    }

    #[test]
    fn test_polygon_area_and_cells() {
        let polygon = Polygon {
            color: Color::rgb(9, 9, 9),
            vertices: vec![(0, 0).into(), (4, 0).into(), (4, 3).into(), (0, 3).into()],
            spans: (0..5)
                .map(|column| ColumnSpan { column, top: 0, bottom: 3 })
                .collect(),
        };
        assert_eq!(polygon.area(), 12.0);
        assert_eq!(polygon.cell_count(), 20);
        assert_eq!(polygon.cells().count(), 20);
        let bbox = polygon.bounding_box().expect("non-empty polygon");
        assert_eq!(bbox.max().x, 4.0);
        assert_eq!(bbox.max().y, 3.0);
    }
}
