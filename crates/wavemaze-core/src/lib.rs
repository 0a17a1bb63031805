//! **wavemaze-core** — foundational types for the *wavemaze* workspace.
//!
//! This crate provides geometry primitives, a dense row-major [`Grid`], and
//! the validated [`Labyrinth`] model consumed by the solver and produced by
//! the generators.

pub mod geom;
pub mod grid;
pub mod labyrinth;

pub use geom::{Point, Range};
pub use grid::Grid;
pub use labyrinth::{CellKind, GridError, Labyrinth};
