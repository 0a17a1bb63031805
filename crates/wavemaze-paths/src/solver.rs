//! The solve loop tying the wavefront step, heuristics, meeting detector and
//! reconstruction together.

use std::time::{Duration, Instant};

use log::{debug, trace};
use wavemaze_core::{Grid, Labyrinth, Point};

use crate::error::SolveError;
use crate::field::{StateField, WallMask};
use crate::heuristics::{DeadEnd, FeasibilityGate};
use crate::meeting::{Meeting, detect};
use crate::reconstruct::reconstruct;
use crate::wavefront::step;

/// Solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolveConfig {
    /// Skip the meeting check until the fronts could have met.
    /// Turning this off only costs time.
    pub feasibility_gate: bool,
    /// When a stalled step ends the search.
    pub dead_end: DeadEnd,
    /// Give up with [`SolveError::StepLimit`] after this many steps.
    pub max_steps: Option<usize>,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            feasibility_gate: true,
            dead_end: DeadEnd::default(),
            max_steps: None,
        }
    }
}

/// A successful solve.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Cells from start to end, both included.
    pub path: Vec<Point>,
    /// Propagation steps committed before the meeting was found.
    pub steps: usize,
    /// The adjacent pair where the fronts met.
    pub meeting: Meeting,
    /// Time spent propagating, including meeting checks.
    pub propagation: Duration,
    /// Time spent walking the field back into a path.
    pub reconstruction: Duration,
}

impl Solution {
    /// Path length in edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Always false: a path holds at least the start and the end.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Receives the state field after initialisation and after every step.
///
/// Purely observational: an observer cannot change the outcome of a solve.
pub trait StepObserver {
    /// `step` is 0 for the initial field.
    fn on_step(&mut self, step: usize, field: &StateField);
}

impl StepObserver for () {
    #[inline]
    fn on_step(&mut self, _step: usize, _field: &StateField) {}
}

/// Records a copy of every field.
impl StepObserver for Vec<StateField> {
    fn on_step(&mut self, _step: usize, field: &StateField) {
        self.push(field.clone());
    }
}

impl<O: StepObserver + ?Sized> StepObserver for &mut O {
    #[inline]
    fn on_step(&mut self, step: usize, field: &StateField) {
        (**self).on_step(step, field);
    }
}

/// Bidirectional wavefront solver.
///
/// Owns the state field, wall mask and frontier scratch buffer so that
/// repeated solves on labyrinths of similar size do not reallocate.
#[derive(Debug, Clone)]
pub struct WavefrontSolver {
    config: SolveConfig,
    field: StateField,
    mask: WallMask,
    scratch: Grid<i32>,
}

impl Default for WavefrontSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl WavefrontSolver {
    pub fn new() -> Self {
        Self::with_config(SolveConfig::default())
    }

    pub fn with_config(config: SolveConfig) -> Self {
        Self {
            config,
            field: StateField::empty(),
            mask: WallMask::empty(),
            scratch: Grid::new(0, 0, 0),
        }
    }

    #[inline]
    pub fn config(&self) -> &SolveConfig {
        &self.config
    }

    #[inline]
    pub fn set_config(&mut self, config: SolveConfig) {
        self.config = config;
    }

    /// The state field as left by the last solve.
    #[inline]
    pub fn field(&self) -> &StateField {
        &self.field
    }

    /// Find a shortest path from the labyrinth's start to its end.
    pub fn solve<O: StepObserver>(
        &mut self,
        lab: &Labyrinth,
        mut observer: O,
    ) -> Result<Solution, SolveError> {
        let started = Instant::now();
        self.field.reset(lab);
        self.mask.rebuild(lab);

        let gate = if self.config.feasibility_gate {
            FeasibilityGate::new(lab.start(), lab.end())
        } else {
            FeasibilityGate::open()
        };
        debug!(
            "solving {}x{} labyrinth from {} to {}, meeting check from iteration {}",
            lab.width(),
            lab.height(),
            lab.start(),
            lab.end(),
            gate.opens_at()
        );
        observer.on_step(0, &self.field);

        let mut steps = 0;
        let meeting = loop {
            if gate.is_open(steps + 1) {
                if let Some(m) = detect(&self.field) {
                    break m;
                }
            }
            if let Some(limit) = self.config.max_steps {
                if steps >= limit {
                    debug!("step limit {limit} reached");
                    return Err(SolveError::StepLimit { limit });
                }
            }

            let outcome = step(&mut self.field, &self.mask, &mut self.scratch);
            steps += 1;
            trace!(
                "step {steps}: +{} -{} ({} contested)",
                outcome.from_start, outcome.from_end, outcome.contested
            );
            observer.on_step(steps, &self.field);

            if self.config.dead_end.fires(&outcome) {
                // A stalled front may still be touching the other one.
                if let Some(m) = detect(&self.field) {
                    break m;
                }
                debug!("fronts sealed off after {steps} steps");
                return Err(SolveError::Unreachable { steps });
            }
        };
        let propagation = started.elapsed();

        let started = Instant::now();
        let path = reconstruct(&self.field, &meeting)?;
        let reconstruction = started.elapsed();
        debug!(
            "met at {}|{} after {steps} steps, path of {} cells",
            meeting.from_start,
            meeting.from_end,
            path.len()
        );

        Ok(Solution {
            path,
            steps,
            meeting,
            propagation,
            reconstruction,
        })
    }
}

/// Find a shortest path through `lab` with the default configuration.
///
/// When `states` is given, a copy of the state field is appended for the
/// initial field and after every step.
pub fn find_shortest_path(
    lab: &Labyrinth,
    states: Option<&mut Vec<StateField>>,
) -> Result<Vec<Point>, SolveError> {
    let mut solver = WavefrontSolver::new();
    let solution = match states {
        Some(states) => solver.solve(lab, states)?,
        None => solver.solve(lab, ())?,
    };
    Ok(solution.path)
}

/// [`find_shortest_path`] over raw integer code rows.
///
/// Validation failures come back as [`SolveError::InvalidGrid`] before any
/// step runs.
pub fn find_shortest_path_in_codes<R: AsRef<[i32]>>(
    rows: &[R],
    states: Option<&mut Vec<StateField>>,
) -> Result<Vec<Point>, SolveError> {
    let lab = Labyrinth::from_codes(rows)?;
    find_shortest_path(&lab, states)
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip_and_defaults() {
        let cfg = SolveConfig {
            feasibility_gate: false,
            dead_end: DeadEnd::BothFronts,
            max_steps: Some(10),
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SolveConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
        let partial: SolveConfig = serde_json::from_str(r#"{"max_steps": 3}"#).unwrap();
        assert!(partial.feasibility_gate);
        assert_eq!(partial.max_steps, Some(3));
    }
}
