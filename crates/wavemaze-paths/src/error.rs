use std::fmt;

use wavemaze_core::{GridError, Point};

/// Errors that end a solve call. None of them carry a partial path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The input grid failed validation. Returned by
    /// [`find_shortest_path_in_codes`](crate::find_shortest_path_in_codes) and
    /// by callers chaining `Labyrinth` construction into a solve with `?`.
    InvalidGrid(GridError),
    /// The fronts stopped growing without meeting: start and end lie in
    /// disconnected regions.
    Unreachable { steps: usize },
    /// The walk-back found no neighbour one step closer to its origin.
    /// This means the state field is corrupt.
    Reconstruction { at: Point, value: i32 },
    /// The configured step cap was reached before the search finished.
    StepLimit { limit: usize },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGrid(e) => write!(f, "invalid labyrinth: {e}"),
            Self::Unreachable { steps } => {
                write!(f, "no path between start and end (gave up after {steps} steps)")
            }
            Self::Reconstruction { at, value } => write!(
                f,
                "inconsistent state field: no predecessor for value {value} at {at}"
            ),
            Self::StepLimit { limit } => write!(f, "search exceeded the limit of {limit} steps"),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidGrid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SolveError {
    fn from(e: GridError) -> Self {
        Self::InvalidGrid(e)
    }
}
