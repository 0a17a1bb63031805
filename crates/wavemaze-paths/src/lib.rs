//! Bidirectional wavefront shortest-path search on grid labyrinths.
//!
//! Two fronts grow at once, one from the start cell and one from the end
//! cell. Every step each front claims the unclaimed cells next to it,
//! writing signed distances into a shared [`StateField`]: positive values
//! belong to the start front, negative ones to the end front. When two
//! cells of opposite sign touch, the path is read back out of the field.
//!
//! - **Solve** a labyrinth with [`WavefrontSolver::solve`] or the one-shot
//!   [`find_shortest_path`] ([`find_shortest_path_in_codes`] for raw code rows)
//! - **Observe** every intermediate field through a [`StepObserver`]
//! - **Cross-check** results with the plain [`Bfs`] reference search
//!
//! The building blocks ([`step`], [`detect`], [`reconstruct`]) are public so
//! the search can also be driven by hand.
//!
//! # Cargo features
//!
//! | Feature | Effect |
//! |---|---|
//! | `rayon` | Compute the frontier rows of each step in parallel |
//! | `serde` | `Serialize`/`Deserialize` for fields, meetings and configs |

mod bfs;
mod distance;
mod error;
mod field;
mod heuristics;
mod meeting;
mod reconstruct;
mod solver;
mod traits;
mod wavefront;

pub use bfs::{Bfs, UNREACHABLE};
pub use distance::manhattan;
pub use error::SolveError;
pub use field::{Direction, Shifted, StateField, WallMask};
pub use heuristics::{DeadEnd, FeasibilityGate};
pub use meeting::{Meeting, detect};
pub use reconstruct::{reconstruct, walk_back};
pub use solver::{
    Solution, SolveConfig, StepObserver, WavefrontSolver, find_shortest_path,
    find_shortest_path_in_codes,
};
pub use traits::Pather;
pub use wavefront::{Candidates, StepOutcome, commit, compute_frontier, step};
