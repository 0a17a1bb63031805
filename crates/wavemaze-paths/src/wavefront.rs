//! One propagation step of both wavefronts.
//!
//! Each unclaimed cell looks at its four shifted neighbour values, keeps the
//! nearest positive and the nearest negative one, and proposes the next
//! value for each side. The proposals form the frontier candidate array `M`,
//! which is committed as `S ← S + W ⊙ M`: walls are blocked by the mask at
//! commit time, not while reading neighbours.

use wavemaze_core::{Grid, Point};

use crate::field::{StateField, WallMask};

/// The per-side proposals for a single cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Candidates {
    /// Next value from the start front (`> 0`), if any neighbour is positive.
    pub pos: Option<i32>,
    /// Next value from the end front (`< 0`), if any neighbour is negative.
    pub neg: Option<i32>,
}

impl Candidates {
    /// Collect the proposals from the four neighbour values of a cell.
    pub fn from_neighbours(values: [i32; 4]) -> Self {
        let pos = values.iter().copied().filter(|&v| v > 0).min();
        let neg = values.iter().copied().filter(|&v| v < 0).max();
        Self {
            pos: pos.map(|v| v + 1),
            neg: neg.map(|v| v - 1),
        }
    }

    /// Both fronts reach the cell in the same step.
    #[inline]
    pub fn is_contested(&self) -> bool {
        self.pos.is_some() && self.neg.is_some()
    }

    /// The value written into `M`. A contested cell goes to the start front;
    /// the end front is then adjacent to it and the meeting is detected on the
    /// next check.
    #[inline]
    pub fn merged(&self) -> i32 {
        self.pos.or(self.neg).unwrap_or(0)
    }
}

/// What a single step changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Cells newly claimed by the start front.
    pub from_start: usize,
    /// Cells newly claimed by the end front.
    pub from_end: usize,
    /// Open cells that received candidates from both fronts.
    pub contested: usize,
}

impl StepOutcome {
    /// Total cells claimed this step.
    #[inline]
    pub fn claimed(&self) -> usize {
        self.from_start + self.from_end
    }

    /// Nothing changed: `M ⊙ W` was all zeros.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.claimed() == 0
    }

    /// At least one of the fronts claimed nothing this step.
    #[inline]
    pub fn is_stalled(&self) -> bool {
        self.from_start == 0 || self.from_end == 0
    }
}

/// Fill one row of `M`. Returns how many cells of the row were contested.
fn frontier_row(field: &StateField, mask: &WallMask, y: i32, row: &mut [i32]) -> usize {
    let mut contested = 0;
    for (x, m) in row.iter_mut().enumerate() {
        let p = Point::new(x as i32, y);
        if field.is_claimed(p) {
            *m = 0;
            continue;
        }
        let c = Candidates::from_neighbours(field.neighbour_values(p));
        if c.is_contested() && mask.at(p) == 1 {
            contested += 1;
        }
        *m = c.merged();
    }
    contested
}

/// Compute the frontier candidate array `M` into `scratch`.
///
/// Claimed cells get 0. Returns the number of contested open cells.
pub fn compute_frontier(field: &StateField, mask: &WallMask, scratch: &mut Grid<i32>) -> usize {
    scratch.reset(field.width(), field.height(), 0);
    let width = field.width().max(1) as usize;
    fill_rows(field, mask, scratch.as_mut_slice(), width)
}

#[cfg(feature = "rayon")]
fn fill_rows(field: &StateField, mask: &WallMask, cells: &mut [i32], width: usize) -> usize {
    use rayon::prelude::*;
    cells
        .par_chunks_mut(width)
        .enumerate()
        .map(|(y, row)| frontier_row(field, mask, y as i32, row))
        .sum()
}

#[cfg(not(feature = "rayon"))]
fn fill_rows(field: &StateField, mask: &WallMask, cells: &mut [i32], width: usize) -> usize {
    cells
        .chunks_mut(width)
        .enumerate()
        .map(|(y, row)| frontier_row(field, mask, y as i32, row))
        .sum()
}

/// Commit `S ← S + W ⊙ M` and count the claims per side.
pub fn commit(field: &mut StateField, mask: &WallMask, scratch: &Grid<i32>) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    let cells = field
        .as_mut_slice()
        .iter_mut()
        .zip(scratch.as_slice())
        .zip(mask.as_grid().as_slice());
    for ((s, &m), &w) in cells {
        let v = m * i32::from(w);
        if v == 0 {
            continue;
        }
        debug_assert_eq!(*s, 0, "claimed cells are immutable");
        *s += v;
        if v > 0 {
            outcome.from_start += 1;
        } else {
            outcome.from_end += 1;
        }
    }
    outcome
}

/// Advance both fronts by one layer of graph distance.
pub fn step(field: &mut StateField, mask: &WallMask, scratch: &mut Grid<i32>) -> StepOutcome {
    let contested = compute_frontier(field, mask, scratch);
    let mut outcome = commit(field, mask, scratch);
    outcome.contested = contested;
    outcome
}
