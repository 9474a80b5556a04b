use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("Grid has no cells")]
    EmptyGrid,

    #[error("Ragged grid: line {index} has {found} cells, expected {expected}")]
    RaggedGrid {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("Unknown palette symbol '{symbol}' at row {row}, column {column}")]
    UnknownSymbol {
        symbol: char,
        row: usize,
        column: usize,
    },

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShapeError>;
