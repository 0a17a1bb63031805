//! Labyrinth sources for the *wavemaze* workspace.
//!
//! - [`LabyrinthGen`]: random and carved (always solvable) generators
//! - [`Layout`]: text layouts, parsed into and rendered from [`Labyrinth`]s
//!
//! [`Labyrinth`]: wavemaze_core::Labyrinth

pub mod layout;
pub mod mapgen;

pub use layout::{Layout, LayoutError, PATH_GLYPH};
pub use mapgen::{FourDirectionWalker, GenConfig, LabyrinthGen, Method, RandomWalker};
