use crate::{
    error::Result,
    grid::Grid,
    types::GridPoint,
};

/// Outline with the number of collapses that produced it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReducedOutline {
    pub reductions: usize,
    pub points: Vec<GridPoint>,
}

/// Trait for outline simplification applied to every assembled polygon
pub trait OutlineReducer: Send + Sync {
    /// Drop redundant points from a closed outline, keeping its first point
    fn reduce(&self, outline: &[GridPoint]) -> ReducedOutline;
}

/// Trait for anything that can be decoded into a color grid
pub trait GridSource {
    /// Build a fresh grid with every cell unconsumed
    fn to_grid(&self) -> Result<Grid>;
}
