pub mod builder;

use tracing::{debug, trace};

use crate::{
    algorithms::{assemble_polygon, LineSweeper, ShapeBuilder},
    error::Result,
    grid::Grid,
    traits::{GridSource, OutlineReducer},
    types::{ExtractedShapes, Polygon},
};

/// Extraction pipeline: polygons first, then lines for whatever is left.
pub struct Pipeline {
    reducer: Box<dyn OutlineReducer>,
    sweeper: LineSweeper,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    /// Create a new pipeline with the given components
    pub fn new(reducer: Box<dyn OutlineReducer>, sweeper: LineSweeper) -> Self {
        Self { reducer, sweeper }
    }

    /// Run both passes over `grid`, consuming every cell.
    ///
    /// Cells are scanned row by row, left to right, so the output order is
    /// deterministic for a given grid.
    pub fn extract(&self, grid: &mut Grid) -> ExtractedShapes {
        let polygons = self.extract_polygons(grid);
        let lines = self.sweeper.sweep_all(grid);

        debug!(
            columns = grid.column_count(),
            rows = grid.row_count(),
            polygons = polygons.len(),
            lines = lines.len(),
            "extracted shapes"
        );

        ExtractedShapes {
            column_count: grid.column_count(),
            row_count: grid.row_count(),
            polygons,
            lines,
        }
    }

    /// Take ownership of a grid for a single run
    pub fn process(&self, mut grid: Grid) -> ExtractedShapes {
        self.extract(&mut grid)
    }

    /// Decode a source into a fresh grid and run both passes
    pub fn process_source<S: GridSource + ?Sized>(&self, source: &S) -> Result<ExtractedShapes> {
        Ok(self.process(source.to_grid()?))
    }

    fn extract_polygons(&self, grid: &mut Grid) -> Vec<Polygon> {
        let mut polygons = Vec::new();
        for row in 0..grid.row_count() {
            for column in 0..grid.column_count() {
                let Some(shape) = ShapeBuilder::new(grid).build(column, row) else {
                    continue;
                };
                let Some(mut polygon) = assemble_polygon(grid, &shape) else {
                    trace!(column, row, "abandoned single-column shape");
                    continue;
                };

                let reduced = self.reducer.reduce(&polygon.vertices);
                trace!(
                    column,
                    row,
                    color = %polygon.color,
                    vertices = reduced.points.len(),
                    reductions = reduced.reductions,
                    "assembled polygon"
                );
                polygon.vertices = reduced.points;
                polygons.push(polygon);
            }
        }
        polygons
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!(
            "Pipeline: column-growth shape builder, outline reducer, line sweeper probing {} first",
            self.sweeper.first_probe
        )
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::builder().build()
    }
}
