//! Walk a finished state field back from the meeting pair to both origins.

use log::warn;
use wavemaze_core::Point;

use crate::error::SolveError;
use crate::field::StateField;
use crate::meeting::Meeting;

/// Follow strictly decreasing magnitudes of one sign from `from` down to the
/// origin (value `±1`). Returns `[from, ..., origin]`.
///
/// Neighbours are tried up, right, down, left; the first match is taken.
pub fn walk_back(field: &StateField, from: Point) -> Result<Vec<Point>, SolveError> {
    let mut p = from;
    let mut v = field.value(p);
    if v == 0 {
        return Err(SolveError::Reconstruction { at: p, value: v });
    }
    let mut cells = Vec::with_capacity(v.unsigned_abs() as usize);
    cells.push(p);
    while v.abs() != 1 {
        let target = v - v.signum();
        let Some(next) = p.neighbors_4().into_iter().find(|&n| field.value(n) == target) else {
            warn!("walk-back stuck at {p} (value {v})");
            return Err(SolveError::Reconstruction { at: p, value: v });
        };
        p = next;
        v = target;
        cells.push(p);
    }
    Ok(cells)
}

/// Produce the full start→end path through `meeting`.
pub fn reconstruct(field: &StateField, meeting: &Meeting) -> Result<Vec<Point>, SolveError> {
    let mut path = walk_back(field, meeting.from_start)?;
    path.reverse();
    let end_half = walk_back(field, meeting.from_end)?;
    path.extend(end_half);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavemaze_core::Grid;

    fn field(rows: &[&[i32]]) -> StateField {
        StateField::from_grid(Grid::from_fn(rows[0].len() as i32, rows.len() as i32, |p| {
            rows[p.y as usize][p.x as usize]
        }))
    }

    #[test]
    fn joins_both_halves_through_the_meeting_pair() {
        let f = field(&[&[1, 0, 0], &[2, 0, -3], &[3, -2, -1]]);
        let m = Meeting {
            from_start: Point::new(0, 2),
            from_end: Point::new(1, 2),
            length: 4,
        };
        let path = reconstruct(&f, &m).unwrap();
        assert_eq!(
            path,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(0, 2),
                Point::new(1, 2),
                Point::new(2, 2),
            ]
        );
    }

    #[test]
    fn origin_cells_walk_to_themselves() {
        let f = field(&[&[1, -1]]);
        assert_eq!(walk_back(&f, Point::new(0, 0)).unwrap(), vec![Point::new(0, 0)]);
        assert_eq!(walk_back(&f, Point::new(1, 0)).unwrap(), vec![Point::new(1, 0)]);
    }

    #[test]
    fn missing_predecessor_is_reported() {
        // 3 has no neighbour holding 2.
        let f = field(&[&[1, 0, 3]]);
        assert_eq!(
            walk_back(&f, Point::new(2, 0)),
            Err(SolveError::Reconstruction {
                at: Point::new(2, 0),
                value: 3
            })
        );
    }

    #[test]
    fn walk_never_crosses_to_the_other_sign() {
        let f = field(&[&[1, 2, -2, -1]]);
        assert_eq!(
            walk_back(&f, Point::new(2, 0)).unwrap(),
            vec![Point::new(2, 0), Point::new(3, 0)]
        );
    }

    #[test]
    fn unclaimed_start_cell_is_an_error() {
        let f = field(&[&[1, 0, -1]]);
        assert!(walk_back(&f, Point::new(1, 0)).is_err());
    }
}
