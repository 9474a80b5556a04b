//! # Raster Shapes
//!
//! Turns a grid of colored cells into vector shapes: rectilinear polygons for
//! same-colored regions and straight lines for the thin leftovers.
//!
//! ## Core Features
//!
//! - **Column Growth**: shapes grow column by column from a seed cell, refusing
//!   one-cell spikes above and below
//! - **Outline Reduction**: straight runs and repeating staircases collapse to
//!   their endpoints
//! - **Full Coverage**: every cell ends up in exactly one polygon or line
//! - **SVG / GeoJSON Export**: write results for browsers or GIS tools
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use raster_shapes::{AlphaMode, Pipeline, RasterSource};
//!
//! let pipeline = Pipeline::builder().build();
//!
//! let source = RasterSource::open("sprite.png", AlphaMode::Ignore)?;
//! let shapes = pipeline.process_source(&source)?;
//!
//! shapes.save_svg("sprite.svg")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Text Art
//!
//! ```rust
//! use raster_shapes::{Color, Pipeline, TextArt};
//!
//! let art = TextArt::new(["rrb", "rbb"])
//!     .with_symbol('r', Color::rgb(200, 0, 0))
//!     .with_symbol('b', Color::rgb(0, 0, 200));
//!
//! let shapes = Pipeline::default().process_source(&art)?;
//! assert_eq!(shapes.claimed_cells(), 6);
//! # Ok::<(), raster_shapes::ShapeError>(())
//! ```

pub mod error;
pub mod types;
pub mod direction;
pub mod grid;
pub mod traits;
pub mod algorithms;
pub mod pipeline;
pub mod io;

pub use error::{Result, ShapeError};
pub use types::{Cell, Color, ColumnSpan, ExtractedShapes, GridPoint, Line, Polygon};
pub use direction::{Direction, Side};
pub use grid::Grid;
pub use traits::*;
pub use algorithms::*;
pub use pipeline::{Pipeline, builder::PipelineBuilder};
pub use io::{load_grid, AlphaMode, OutputFormat, RasterSource, TextArt};
