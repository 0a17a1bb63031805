//! Plain breadth-first search, used as an independent reference for the
//! wavefront solver.

use std::collections::VecDeque;

use wavemaze_core::{Grid, Point, Range};

use crate::traits::Pather;

/// Sentinel value meaning "unreachable" in BFS distance maps.
pub const UNREACHABLE: i32 = i32::MAX;

/// Breadth-first search over a fixed rectangle, reusing its buffers between
/// queries.
#[derive(Debug, Clone)]
pub struct Bfs {
    dist: Grid<i32>,
    queue: VecDeque<usize>,
    nbuf: Vec<Point>,
}

impl Bfs {
    /// Create a search for the given rectangle (anchored at the origin).
    pub fn new(rng: Range) -> Self {
        Self {
            dist: Grid::new(rng.max.x, rng.max.y, UNREACHABLE),
            queue: VecDeque::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Compute the distance map from `from`. Every step has cost 1.
    pub fn map<P: Pather>(&mut self, pather: &P, from: Point) -> &Grid<i32> {
        self.dist.fill(UNREACHABLE);
        self.queue.clear();

        let Some(si) = self.dist.index(from) else {
            return &self.dist;
        };
        self.dist.as_mut_slice()[si] = 0;
        self.queue.push_back(si);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        while let Some(ci) = self.queue.pop_front() {
            let cp = self.dist.point(ci);
            let nd = self.dist.as_slice()[ci] + 1;

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);
            for &np in nbuf.iter() {
                let Some(ni) = self.dist.index(np) else {
                    continue;
                };
                if self.dist.as_slice()[ni] != UNREACHABLE {
                    continue;
                }
                self.dist.as_mut_slice()[ni] = nd;
                self.queue.push_back(ni);
            }
        }
        self.nbuf = nbuf;
        &self.dist
    }

    /// Shortest path length in edges, or `None` if `to` is unreachable.
    pub fn path_len<P: Pather>(&mut self, pather: &P, from: Point, to: Point) -> Option<usize> {
        let d = self.map(pather, from).at(to)?;
        (d != UNREACHABLE).then_some(d as usize)
    }

    /// One shortest path from `from` to `to`, both included.
    pub fn path<P: Pather>(&mut self, pather: &P, from: Point, to: Point) -> Option<Vec<Point>> {
        // Distances from the goal let the walk run forwards from `from`.
        self.map(pather, to);
        let mut d = self.dist.at(from).filter(|&d| d != UNREACHABLE)?;
        let mut path = Vec::with_capacity(d as usize + 1);
        let mut p = from;
        path.push(p);
        let mut nbuf = Vec::with_capacity(4);
        while d > 0 {
            nbuf.clear();
            pather.neighbors(p, &mut nbuf);
            p = nbuf
                .iter()
                .copied()
                .find(|&n| self.dist.at(n) == Some(d - 1))?;
            d -= 1;
            path.push(p);
        }
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavemaze_core::Labyrinth;

    #[test]
    fn distances_around_a_wall() {
        let lab = Labyrinth::from_codes(&[[2, 0, 1], [1, 0, 1], [1, 1, 3]]).unwrap();
        let mut bfs = Bfs::new(lab.bounds());
        let map = bfs.map(&lab, lab.start());
        assert_eq!(map.at(Point::new(2, 2)), Some(4));
        assert_eq!(map.at(Point::new(2, 0)), Some(6));
        assert_eq!(map.at(Point::new(1, 0)), Some(UNREACHABLE));
        assert_eq!(bfs.path_len(&lab, lab.start(), lab.end()), Some(4));
    }

    #[test]
    fn path_is_connected_and_shortest() {
        let lab = Labyrinth::from_codes(&[[2, 1, 1], [0, 0, 1], [3, 1, 1]]).unwrap();
        let mut bfs = Bfs::new(lab.bounds());
        let path = bfs.path(&lab, lab.start(), lab.end()).unwrap();
        assert_eq!(path.len(), 7);
        assert_eq!(path[0], lab.start());
        assert_eq!(path[6], lab.end());
        assert!(path.windows(2).all(|w| w[0].is_adjacent(w[1])));
    }

    #[test]
    fn sealed_goal_is_unreachable() {
        let lab = Labyrinth::from_codes(&[[2, 0, 3]]).unwrap();
        let mut bfs = Bfs::new(lab.bounds());
        assert_eq!(bfs.path_len(&lab, lab.start(), lab.end()), None);
        assert_eq!(bfs.path(&lab, lab.start(), lab.end()), None);
    }
}
