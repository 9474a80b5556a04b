use crate::{
    algorithms::{LineSweeper, NoReduction, StaircaseReducer},
    direction::Direction,
    pipeline::Pipeline,
    traits::OutlineReducer,
};

/// Builder for creating extraction pipelines with a fluent API
pub struct PipelineBuilder {
    reducer: Option<Box<dyn OutlineReducer>>,
    sweeper: LineSweeper,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            reducer: None,
            sweeper: LineSweeper::default(),
        }
    }

    /// Set the outline reducer (replaces any existing one)
    pub fn set_reducer<R>(mut self, reducer: R) -> Self
    where
        R: OutlineReducer + 'static,
    {
        self.reducer = Some(Box::new(reducer));
        self
    }

    /// Keep every step of each polygon outline
    pub fn without_reduction(self) -> Self {
        self.set_reducer(NoReduction)
    }

    /// Toggle staircase reduction on or off
    pub fn with_reduction(self, enabled: bool) -> Self {
        if enabled {
            self.set_reducer(StaircaseReducer)
        } else {
            self.without_reduction()
        }
    }

    /// Direction the line sweeper probes first
    pub fn with_first_line_probe(mut self, direction: Direction) -> Self {
        self.sweeper.first_probe = direction;
        self
    }

    /// Build the pipeline with default components if not specified
    pub fn build(self) -> Pipeline {
        let reducer = self.reducer.unwrap_or_else(|| Box::new(StaircaseReducer));
        Pipeline::new(reducer, self.sweeper)
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
