use strum::{Display, IntoStaticStr};

use crate::{
    traits::{OutlineReducer, ReducedOutline},
    types::GridPoint,
};

/// Direction of one step between consecutive outline points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum StepCode {
    #[strum(serialize = "")]
    Stay,
    #[strum(serialize = "R")]
    Right,
    #[strum(serialize = "L")]
    Left,
    #[strum(serialize = "U")]
    Up,
    #[strum(serialize = "D")]
    Down,
    #[strum(serialize = "RU")]
    RightUp,
    #[strum(serialize = "RD")]
    RightDown,
    #[strum(serialize = "LU")]
    LeftUp,
    #[strum(serialize = "LD")]
    LeftDown,
}

impl StepCode {
    pub fn between(from: GridPoint, to: GridPoint) -> Self {
        use std::cmp::Ordering::*;
        match (to.column.cmp(&from.column), to.row.cmp(&from.row)) {
            (Equal, Equal) => StepCode::Stay,
            (Greater, Equal) => StepCode::Right,
            (Less, Equal) => StepCode::Left,
            (Equal, Less) => StepCode::Up,
            (Equal, Greater) => StepCode::Down,
            (Greater, Less) => StepCode::RightUp,
            (Greater, Greater) => StepCode::RightDown,
            (Less, Less) => StepCode::LeftUp,
            (Less, Greater) => StepCode::LeftDown,
        }
    }
}

pub fn step_codes(points: &[GridPoint]) -> Vec<StepCode> {
    points
        .windows(2)
        .map(|pair| StepCode::between(pair[0], pair[1]))
        .collect()
}

/// Number of leading steps sharing the first step's code
fn run_end(steps: &[StepCode]) -> usize {
    match steps.first() {
        Some(first) => steps.iter().position(|step| step != first).unwrap_or(steps.len()),
        None => 0,
    }
}

/// End of the last complete repetition of the leading pattern, counted in
/// steps. The pattern is the leading run plus the one step that breaks it.
fn pattern_end(steps: &[StepCode]) -> usize {
    let pattern_len = run_end(steps) + 1;
    if pattern_len <= 1 || pattern_len >= steps.len() {
        return 0;
    }

    let pattern = &steps[..pattern_len];
    let mut last = 0;
    let mut index = pattern_len;
    while index + pattern_len <= steps.len() {
        if &steps[index..index + pattern_len] != pattern {
            return if last > 0 { index } else { 0 };
        }
        index += pattern_len;
        last = index;
    }
    last
}

/// Index of the last point of the leading straight run, `len - 1` when the
/// whole outline is one run and 0 for fewer than two points.
pub fn last_repeat_index(points: &[GridPoint]) -> usize {
    run_end(&step_codes(points))
}

/// Index of the point ending the last repetition of the leading staircase
/// pattern (e.g. `R R D`), or 0 when the pattern does not repeat.
pub fn last_pattern_index(points: &[GridPoint]) -> usize {
    pattern_end(&step_codes(points))
}

fn reduce_pass(points: &[GridPoint], staircases: bool) -> ReducedOutline {
    if points.len() < 3 {
        return ReducedOutline {
            reductions: 0,
            points: points.to_vec(),
        };
    }

    let steps = step_codes(points);
    let mut reduced = Vec::with_capacity(points.len());
    reduced.push(points[0]);
    let mut reductions = 0;
    let mut index = 0;

    while index + 4 < points.len() {
        let pattern = if staircases { pattern_end(&steps[index..]) } else { 0 };
        if pattern > 3 {
            index += pattern;
            reduced.push(points[index]);
            reductions += 1;
            continue;
        }

        let run = run_end(&steps[index..]);
        if run > 1 {
            index += run;
            reduced.push(points[index]);
            reductions += 1;
            continue;
        }

        index += 1;
        reduced.push(points[index]);
    }

    let run = run_end(&steps[index..]);
    if run > 1 {
        index += run;
        reduced.push(points[index]);
        reductions += 1;
    }
    reduced.extend_from_slice(&points[index + 1..]);

    ReducedOutline {
        reductions,
        points: reduced,
    }
}

/// Collapse straight runs and repeated staircase patterns to their endpoints.
///
/// Passes repeat until nothing changes, so reducing a reduced outline is a
/// no-op. `reductions` is the total over all passes. A collapsed staircase
/// becomes one diagonal edge, which cuts the corners of the stairs.
pub fn reduce_outline(points: &[GridPoint]) -> ReducedOutline {
    reduce_to_fixpoint(points, true)
}

/// Collapse straight runs only.
///
/// Every removed point lies on the edge between its kept neighbors, so
/// tracing the result visits exactly the boundary cells of the input.
pub fn reduce_straight_runs(points: &[GridPoint]) -> ReducedOutline {
    reduce_to_fixpoint(points, false)
}

fn reduce_to_fixpoint(points: &[GridPoint], staircases: bool) -> ReducedOutline {
    let mut current = ReducedOutline {
        reductions: 0,
        points: points.to_vec(),
    };
    loop {
        let pass = reduce_pass(&current.points, staircases);
        if pass.reductions == 0 {
            return current;
        }
        current = ReducedOutline {
            reductions: current.reductions + pass.reductions,
            points: pass.points,
        };
    }
}

/// Default reducer: straight runs and staircases
#[derive(Debug, Clone, Copy, Default)]
pub struct StaircaseReducer;

impl OutlineReducer for StaircaseReducer {
    fn reduce(&self, outline: &[GridPoint]) -> ReducedOutline {
        reduce_outline(outline)
    }
}

/// Straight runs only; staircases keep their steps
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightRunReducer;

impl OutlineReducer for StraightRunReducer {
    fn reduce(&self, outline: &[GridPoint]) -> ReducedOutline {
        reduce_straight_runs(outline)
    }
}

/// Keeps every outline point
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReduction;

impl OutlineReducer for NoReduction {
    fn reduce(&self, outline: &[GridPoint]) -> ReducedOutline {
        ReducedOutline {
            reductions: 0,
            points: outline.to_vec(),
        }
    }
}
