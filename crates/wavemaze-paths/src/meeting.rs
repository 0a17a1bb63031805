//! Detection of the point where the two fronts touch.

use wavemaze_core::Point;

use crate::field::{Direction, StateField};

/// A pair of adjacent cells owned by opposite fronts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meeting {
    /// The cell claimed by the start front (value ≥ 1).
    pub from_start: Point,
    /// The cell claimed by the end front (value ≤ -1).
    pub from_end: Point,
    /// Edges on the start→end walk through this pair.
    pub length: usize,
}

impl Meeting {
    fn new(field: &StateField, a: Point, b: Point) -> Self {
        let (va, vb) = (field.value(a), field.value(b));
        let length = (va.unsigned_abs() + vb.unsigned_abs() - 1) as usize;
        if va > 0 {
            Self {
                from_start: a,
                from_end: b,
                length,
            }
        } else {
            Self {
                from_start: b,
                from_end: a,
                length,
            }
        }
    }
}

#[inline]
fn opposite(a: i32, b: i32) -> bool {
    a.signum() * b.signum() < 0
}

/// Find the meeting pair with the shortest walk, if the fronts touch.
///
/// Every cell is compared with its upper and right neighbour only; the down
/// and left comparisons are the same pairs seen from the other cell. Among
/// pairs of equal length the first in row-major scan order wins (upper
/// neighbour before right neighbour).
pub fn detect(field: &StateField) -> Option<Meeting> {
    let mut best: Option<Meeting> = None;
    for (p, &v) in field.as_grid().iter() {
        if v == 0 {
            continue;
        }
        for dir in [Direction::Up, Direction::Right] {
            if !opposite(v, field.shifted(dir).at(p)) {
                continue;
            }
            let m = Meeting::new(field, p, p + dir.offset());
            if best.is_none_or(|b| m.length < b.length) {
                best = Some(m);
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::WallMask;
    use crate::wavefront::step;
    use wavemaze_core::{Grid, Labyrinth};

    fn advance(rows: &[&[i32]], steps: usize) -> StateField {
        let lab = Labyrinth::from_codes(rows).unwrap();
        let mut f = StateField::initial(&lab);
        let mask = WallMask::from_labyrinth(&lab);
        let mut m = Grid::new(0, 0, 0);
        for _ in 0..steps {
            step(&mut f, &mask, &mut m);
        }
        f
    }

    #[test]
    fn no_meeting_while_fronts_are_apart() {
        let f = advance(&[&[2, 1, 1, 1, 1, 3]], 1);
        assert_eq!(detect(&f), None);
    }

    #[test]
    fn adjacent_start_and_end_meet_immediately() {
        let f = advance(&[&[3, 2]], 0);
        let m = detect(&f).unwrap();
        assert_eq!(m.from_start, Point::new(1, 0));
        assert_eq!(m.from_end, Point::new(0, 0));
        assert_eq!(m.length, 1);
    }

    #[test]
    fn vertical_pairs_are_found_through_the_upper_neighbour() {
        let f = advance(&[&[3], &[1], &[1], &[2]], 1);
        // [-1, -2, 2, 1] top to bottom.
        let m = detect(&f).unwrap();
        assert_eq!(m.from_start, Point::new(0, 2));
        assert_eq!(m.from_end, Point::new(0, 1));
        assert_eq!(m.length, 3);
    }

    #[test]
    fn shortest_pair_beats_scan_order() {
        // The first pair in scan order (3|-4) is longer than the one below.
        let values = [[3, -4], [2, -2]];
        let f = StateField::from_grid(Grid::from_fn(2, 2, |p| {
            values[p.y as usize][p.x as usize]
        }));
        let m = detect(&f).unwrap();
        assert_eq!(m.length, 3);
        assert_eq!(m.from_start, Point::new(0, 1));
        assert_eq!(m.from_end, Point::new(1, 1));
    }

    #[test]
    fn ties_go_to_the_first_pair_in_row_major_order() {
        // Two symmetric corridors of equal length.
        let f = advance(&[&[1, 1, 1], &[2, 0, 3], &[1, 1, 1]], 2);
        let m = detect(&f).unwrap();
        assert_eq!(m.length, 4);
        assert_eq!(m.from_start.y, 0);
    }
}
