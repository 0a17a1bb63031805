//! Random labyrinth generators.
//!
//! Provides two generators:
//! - **Random**: every cell is a wall with a fixed probability. The result
//!   may well have no path between start and end.
//! - **Carved**: starts from solid rock and random-walks a tunnel from the
//!   start cell until it has reached the end cell and opened enough space.
//!   Always solvable.

use log::debug;
use rand::Rng;
use wavemaze_core::{CellKind, Grid, GridError, Labyrinth, Point};

/// Trait for choosing a random neighbor during carving.
pub trait RandomWalker {
    /// Given a position `p`, return a random neighbor using `rng`.
    fn neighbor(&self, p: Point, rng: &mut impl Rng) -> Point;
}

/// A simple 4-directional random walker.
#[derive(Debug, Clone, Copy, Default)]
pub struct FourDirectionWalker;

impl RandomWalker for FourDirectionWalker {
    fn neighbor(&self, p: Point, rng: &mut impl Rng) -> Point {
        p + Point::CARDINALS[rng.random_range(0..4usize)]
    }
}

/// Which generator [`LabyrinthGen::generate`] runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    #[default]
    Random,
    Carved,
}

/// Generator settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GenConfig {
    pub width: i32,
    pub height: i32,
    pub method: Method,
    /// Wall probability for [`Method::Random`].
    pub complexity: f64,
    /// Minimum open fraction for [`Method::Carved`].
    pub fill: f64,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            method: Method::Random,
            complexity: 0.4,
            fill: 0.5,
        }
    }
}

/// Labyrinth generator driven by a random number generator.
pub struct LabyrinthGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> LabyrinthGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Run the generator selected by `cfg`.
    pub fn generate(&mut self, cfg: &GenConfig) -> Result<Labyrinth, GridError> {
        match cfg.method {
            Method::Random => self.random(cfg.width, cfg.height, cfg.complexity),
            Method::Carved => self.carved(cfg.width, cfg.height, cfg.fill),
        }
    }

    /// Generate a labyrinth where each cell is a wall with probability
    /// `complexity` (clamped to 0.0–1.0).
    ///
    /// Start and end are then placed on two distinct random cells,
    /// overwriting whatever was there. Fails only for grids with fewer than
    /// two cells.
    pub fn random(
        &mut self,
        width: i32,
        height: i32,
        complexity: f64,
    ) -> Result<Labyrinth, GridError> {
        let complexity = complexity.clamp(0.0, 1.0);
        let rng = &mut self.rng;
        let mut cells = Grid::from_fn(width, height, |_| {
            if rng.random::<f64>() < complexity {
                CellKind::Wall
            } else {
                CellKind::Open
            }
        });
        if let Some((start, end)) = self.endpoints(&cells) {
            cells.set(start, CellKind::Start);
            cells.set(end, CellKind::End);
        }
        Labyrinth::from_grid(cells)
    }

    /// Generate a solvable labyrinth with [`FourDirectionWalker`].
    pub fn carved(&mut self, width: i32, height: i32, fill: f64) -> Result<Labyrinth, GridError> {
        self.carved_with(&FourDirectionWalker, width, height, fill)
    }

    /// Generate a solvable labyrinth by carving a random walk.
    ///
    /// The walk starts at the start cell and continues until it has visited
    /// the end cell and at least `fill` (0.0–1.0) of the area is open.
    pub fn carved_with(
        &mut self,
        walker: &impl RandomWalker,
        width: i32,
        height: i32,
        fill: f64,
    ) -> Result<Labyrinth, GridError> {
        let mut cells = Grid::new(width, height, CellKind::Wall);
        let Some((start, end)) = self.endpoints(&cells) else {
            return Labyrinth::from_grid(cells);
        };
        let total = cells.len();
        let target = (total as f64 * fill.clamp(0.0, 1.0)).ceil() as usize;

        cells.set(start, CellKind::Open);
        let mut carved = 1;
        let mut reached = false;
        let mut pos = start;
        // A bounded walk reaches every cell eventually; the limit only
        // guards against pathological walkers.
        let step_limit = total.saturating_mul(total).max(64);
        for _ in 0..step_limit {
            if reached && carved >= target {
                break;
            }
            let next = walker.neighbor(pos, &mut self.rng);
            if !cells.contains(next) {
                continue;
            }
            pos = next;
            if cells.at(pos) == Some(CellKind::Wall) {
                cells.set(pos, CellKind::Open);
                carved += 1;
            }
            reached |= pos == end;
        }
        if !reached {
            debug!("walk gave up at {pos}, tunnelling straight to {end}");
            carved += tunnel(&mut cells, pos, end);
        }
        debug!("carved {carved} of {total} cells");

        cells.set(start, CellKind::Start);
        cells.set(end, CellKind::End);
        Labyrinth::from_grid(cells)
    }

    /// Two distinct random cells of `cells`, or `None` if it has fewer than
    /// two.
    fn endpoints<T>(&mut self, cells: &Grid<T>) -> Option<(Point, Point)> {
        let n = cells.len();
        if n < 2 {
            return None;
        }
        let s = self.rng.random_range(0..n);
        let mut e = self.rng.random_range(0..n - 1);
        if e >= s {
            e += 1;
        }
        Some((cells.point(s), cells.point(e)))
    }
}

/// Open an L-shaped corridor from `from` to `to`, horizontal leg first.
/// Returns the number of walls removed.
fn tunnel(cells: &mut Grid<CellKind>, from: Point, to: Point) -> usize {
    let mut opened = 0;
    let mut p = from;
    loop {
        if cells.at(p) == Some(CellKind::Wall) {
            cells.set(p, CellKind::Open);
            opened += 1;
        }
        if p == to {
            return opened;
        }
        p = if p.x != to.x {
            p.shift((to.x - p.x).signum(), 0)
        } else {
            p.shift(0, (to.y - p.y).signum())
        };
    }
}
