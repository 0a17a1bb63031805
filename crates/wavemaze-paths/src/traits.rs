use wavemaze_core::{Labyrinth, Point};

/// Minimal search interface: neighbour enumeration over 4-connected cells.
pub trait Pather {
    /// Append the passable neighbours of `p` into `buf`. The caller clears
    /// `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

impl Pather for Labyrinth {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.passable(n)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labyrinth_neighbors_skip_walls_and_edges() {
        let lab = Labyrinth::from_codes(&[[2, 0, 1], [1, 1, 3]]).unwrap();
        let mut buf = Vec::new();
        lab.neighbors(Point::new(0, 0), &mut buf);
        assert_eq!(buf, vec![Point::new(0, 1)]);
        buf.clear();
        lab.neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(buf, vec![Point::new(2, 1), Point::new(0, 1)]);
    }
}
