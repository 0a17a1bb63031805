//! The signed state field, the wall mask, and shifted neighbour views.
//!
//! A state field value of `+k` means the cell was claimed by the start
//! front and lies `k - 1` steps from the start; `-k` means the same for the
//! end front. `0` is unclaimed. Claimed cells never change again.

use wavemaze_core::{Grid, Labyrinth, Point};

// ---------------------------------------------------------------------------
// WallMask
// ---------------------------------------------------------------------------

/// 1 for traversable cells, 0 for walls. Built once per solve.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallMask {
    grid: Grid<u8>,
}

impl WallMask {
    pub fn from_labyrinth(lab: &Labyrinth) -> Self {
        let mut mask = Self::empty();
        mask.rebuild(lab);
        mask
    }

    pub(crate) fn empty() -> Self {
        Self {
            grid: Grid::new(0, 0, 0),
        }
    }

    /// Recompute the mask for `lab`, reusing the allocation.
    pub(crate) fn rebuild(&mut self, lab: &Labyrinth) {
        self.grid.reset(lab.width(), lab.height(), 0);
        for (m, k) in self
            .grid
            .as_mut_slice()
            .iter_mut()
            .zip(lab.cells().as_slice())
        {
            *m = u8::from(k.is_passable());
        }
    }

    /// Mask value at `p`; 0 outside the grid.
    #[inline]
    pub fn at(&self, p: Point) -> u8 {
        self.grid.at_or(p, 0)
    }

    #[inline]
    pub fn as_grid(&self) -> &Grid<u8> {
        &self.grid
    }
}

// ---------------------------------------------------------------------------
// StateField
// ---------------------------------------------------------------------------

/// The signed distance/ownership field the wavefronts are written into.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateField {
    grid: Grid<i32>,
}

impl StateField {
    /// Initial field for `lab`: `+1` at the start, `-1` at the end.
    pub fn initial(lab: &Labyrinth) -> Self {
        let mut field = Self::empty();
        field.reset(lab);
        field
    }

    pub(crate) fn empty() -> Self {
        Self {
            grid: Grid::new(0, 0, 0),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_grid(grid: Grid<i32>) -> Self {
        Self { grid }
    }

    /// Reset to the initial field for `lab`, reusing the allocation.
    pub(crate) fn reset(&mut self, lab: &Labyrinth) {
        self.grid.reset(lab.width(), lab.height(), 0);
        self.grid.set(lab.start(), 1);
        self.grid.set(lab.end(), -1);
    }

    /// Value at `p`; 0 outside the grid, so edges read as unclaimed.
    #[inline]
    pub fn value(&self, p: Point) -> i32 {
        self.grid.at_or(p, 0)
    }

    /// Whether `p` has been claimed by either front.
    #[inline]
    pub fn is_claimed(&self, p: Point) -> bool {
        self.value(p) != 0
    }

    /// Number of cells claimed by the start front and by the end front.
    pub fn claimed(&self) -> (usize, usize) {
        let pos = self.grid.count_fn(|&v| v > 0);
        let neg = self.grid.count_fn(|&v| v < 0);
        (pos, neg)
    }

    /// The neighbour view along `dir`.
    #[inline]
    pub fn shifted(&self, dir: Direction) -> Shifted<'_> {
        Shifted { field: self, dir }
    }

    /// The values of the four neighbours of `p`, in [`Direction::ALL`]
    /// order, with 0 past the edges.
    #[inline]
    pub fn neighbour_values(&self, p: Point) -> [i32; 4] {
        Direction::ALL.map(|d| self.shifted(d).at(p))
    }

    #[inline]
    pub fn as_grid(&self) -> &Grid<i32> {
        &self.grid
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [i32] {
        self.grid.as_mut_slice()
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.grid.height()
    }
}

// ---------------------------------------------------------------------------
// Directional shifts
// ---------------------------------------------------------------------------

/// The four axis directions a field can be shifted along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Same order as [`Point::CARDINALS`].
    pub const ALL: [Direction; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    #[inline]
    pub const fn offset(self) -> Point {
        match self {
            Self::Up => Point::new(0, -1),
            Self::Right => Point::new(1, 0),
            Self::Down => Point::new(0, 1),
            Self::Left => Point::new(-1, 0),
        }
    }
}

/// A read-only view of a [`StateField`] shifted by one cell so that every
/// cell sees its neighbour along `dir`.
///
/// The exposed boundary row or column reads as 0; the view never wraps.
#[derive(Debug, Clone, Copy)]
pub struct Shifted<'a> {
    field: &'a StateField,
    dir: Direction,
}

impl Shifted<'_> {
    /// The neighbour value of `p` along the view's direction.
    #[inline]
    pub fn at(&self, p: Point) -> i32 {
        self.field.value(p + self.dir.offset())
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lab() -> Labyrinth {
        Labyrinth::from_codes(&[[2, 0, 1], [1, 0, 1], [1, 1, 3]]).unwrap()
    }

    #[test]
    fn wall_mask_marks_passable_cells() {
        let mask = WallMask::from_labyrinth(&lab());
        assert_eq!(mask.as_grid().as_slice(), &[1, 0, 1, 1, 0, 1, 1, 1, 1]);
        assert_eq!(mask.at(Point::new(-1, 0)), 0);
    }

    #[test]
    fn initial_field_labels_start_and_end() {
        let f = StateField::initial(&lab());
        assert_eq!(f.value(Point::new(0, 0)), 1);
        assert_eq!(f.value(Point::new(2, 2)), -1);
        assert_eq!(f.claimed(), (1, 1));
        assert!(!f.is_claimed(Point::new(1, 1)));
    }

    #[test]
    fn shifts_pad_with_zero_and_never_wrap() {
        let lab = Labyrinth::from_codes(&[[2, 1, 3]]).unwrap();
        let f = StateField::initial(&lab);
        // Left edge: nothing to the left, even though the right edge holds -1.
        assert_eq!(f.shifted(Direction::Left).at(Point::new(0, 0)), 0);
        assert_eq!(f.shifted(Direction::Right).at(Point::new(2, 0)), 0);
        assert_eq!(f.shifted(Direction::Up).at(Point::new(1, 0)), 0);
        assert_eq!(f.shifted(Direction::Down).at(Point::new(1, 0)), 0);
        assert_eq!(f.neighbour_values(Point::new(1, 0)), [0, -1, 0, 1]);
    }

    #[test]
    fn direction_order_matches_cardinals() {
        let offsets = Direction::ALL.map(Direction::offset);
        assert_eq!(offsets, Point::CARDINALS);
    }

    #[test]
    fn reset_reuses_field_for_new_labyrinth() {
        let mut f = StateField::initial(&lab());
        let small = Labyrinth::from_codes(&[[3, 2]]).unwrap();
        f.reset(&small);
        assert_eq!(f.as_grid().as_slice(), &[-1, 1]);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn state_field_round_trip() {
        let lab = Labyrinth::from_codes(&[[2, 1], [0, 3]]).unwrap();
        let f = StateField::initial(&lab);
        let json = serde_json::to_string(&f).unwrap();
        let back: StateField = serde_json::from_str(&json).unwrap();
        assert_eq!(back, f);
    }
}
