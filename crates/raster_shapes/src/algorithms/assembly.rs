use crate::{
    algorithms::growth::Shape,
    grid::Grid,
    types::{GridPoint, Polygon},
};

/// Ordered outline of a shape: the top edge left to right, then the bottom
/// edge right to left.
///
/// Wherever adjacent columns differ by more than one row a corner point is
/// inserted, so each step between points is horizontal, vertical or a single
/// diagonal cell. Repeated consecutive points are dropped.
pub fn outline(shape: &Shape) -> Vec<GridPoint> {
    let columns: Vec<(usize, (usize, usize))> =
        shape.columns.iter().map(|(&column, &range)| (column, range)).collect();
    let mut points = Vec::with_capacity(columns.len() * 4);

    for (index, &(column, (top, _))) in columns.iter().enumerate() {
        points.push(GridPoint::new(column, top));
        if let Some(&(next_column, (next_top, _))) = columns.get(index + 1) {
            if next_top > top + 1 {
                points.push(GridPoint::new(column, next_top - 1));
            } else if next_top + 1 < top {
                points.push(GridPoint::new(next_column, top - 1));
            }
        }
    }

    for (index, &(column, (_, bottom))) in columns.iter().enumerate().rev() {
        points.push(GridPoint::new(column, bottom));
        if index > 0 {
            let (previous_column, (_, previous_bottom)) = columns[index - 1];
            if previous_bottom + 1 < bottom {
                points.push(GridPoint::new(column, previous_bottom + 1));
            } else if previous_bottom > bottom + 1 {
                points.push(GridPoint::new(previous_column, bottom + 1));
            }
        }
    }

    points.dedup();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

/// Turn a grown shape into a polygon and claim its cells.
///
/// Returns `None`, leaving the grid untouched, for shapes with fewer than two
/// columns.
pub fn assemble_polygon(grid: &mut Grid, shape: &Shape) -> Option<Polygon> {
    if !shape.is_polygon() {
        return None;
    }

    let vertices = outline(shape);
    let spans = shape.spans();
    for span in &spans {
        for cell in span.cells() {
            grid.consume(cell.column, cell.row);
        }
    }

    Some(Polygon {
        color: shape.color,
        vertices,
        spans,
    })
}
