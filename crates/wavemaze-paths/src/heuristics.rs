//! Early-exit heuristics: when to look for a meeting, and when to give up.

use wavemaze_core::Point;

use crate::distance::manhattan;
use crate::wavefront::StepOutcome;

/// Holds the meeting check back until the fronts could possibly touch.
///
/// Two fronts advancing one cell per step cannot meet before they have
/// covered half the Manhattan distance between start and end. Iterations
/// are counted from 1; iteration `k` inspects the field after `k - 1` steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeasibilityGate {
    opens_at: usize,
}

impl FeasibilityGate {
    /// Gate for a start/end pair: opens at `ceil(manhattan / 2)`.
    pub fn new(start: Point, end: Point) -> Self {
        let d = manhattan(start, end).max(0) as usize;
        Self {
            opens_at: d.div_ceil(2),
        }
    }

    /// A gate that is always open.
    pub const fn open() -> Self {
        Self { opens_at: 0 }
    }

    /// First iteration at which the meeting check runs.
    #[inline]
    pub fn opens_at(&self) -> usize {
        self.opens_at
    }

    #[inline]
    pub fn is_open(&self, iteration: usize) -> bool {
        iteration >= self.opens_at
    }
}

/// When a step's outcome proves that no meeting can happen any more.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeadEnd {
    /// Give up only when neither front claimed anything.
    BothFronts,
    /// Give up as soon as one front claimed nothing. A front that stops
    /// growing without touching the other one is sealed in.
    #[default]
    EitherFront,
}

impl DeadEnd {
    /// Whether `outcome` ends the search, provided the fronts are not
    /// already touching.
    #[inline]
    pub fn fires(self, outcome: &StepOutcome) -> bool {
        match self {
            Self::BothFronts => outcome.is_empty(),
            Self::EitherFront => outcome.is_stalled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_opens_at_half_the_distance_rounded_up() {
        let g = FeasibilityGate::new(Point::new(0, 0), Point::new(3, 4));
        assert_eq!(g.opens_at(), 4);
        assert!(!g.is_open(3));
        assert!(g.is_open(4));

        let g = FeasibilityGate::new(Point::new(0, 0), Point::new(2, 2));
        assert_eq!(g.opens_at(), 2);

        // Adjacent start and end: checked on the very first iteration.
        let g = FeasibilityGate::new(Point::new(0, 0), Point::new(1, 0));
        assert_eq!(g.opens_at(), 1);
        assert!(g.is_open(1));
    }

    #[test]
    fn open_gate_is_always_open() {
        assert!(FeasibilityGate::open().is_open(0));
    }

    #[test]
    fn dead_end_policies() {
        let one_sided = StepOutcome {
            from_start: 0,
            from_end: 2,
            contested: 0,
        };
        let empty = StepOutcome::default();
        let growing = StepOutcome {
            from_start: 1,
            from_end: 1,
            contested: 0,
        };
        assert!(!DeadEnd::BothFronts.fires(&one_sided));
        assert!(DeadEnd::BothFronts.fires(&empty));
        assert!(DeadEnd::EitherFront.fires(&one_sided));
        assert!(DeadEnd::EitherFront.fires(&empty));
        assert!(!DeadEnd::EitherFront.fires(&growing));
    }
}
