//! The labyrinth model: cell kinds and a validated grid of them.
//!
//! Integer codes follow the usual labyrinth map convention:
//!
//! | code | kind |
//! |---|---|
//! | 0 | wall |
//! | 1 | open |
//! | 2 | start |
//! | 3 | end |

use std::fmt;

use crate::geom::{Point, Range};
use crate::grid::Grid;

/// What occupies a single labyrinth cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Wall,
    Open,
    Start,
    End,
}

impl CellKind {
    /// Decode an integer map code.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Wall),
            1 => Some(Self::Open),
            2 => Some(Self::Start),
            3 => Some(Self::End),
            _ => None,
        }
    }

    /// The integer map code of this kind.
    pub const fn code(self) -> i32 {
        match self {
            Self::Wall => 0,
            Self::Open => 1,
            Self::Start => 2,
            Self::End => 3,
        }
    }

    /// Everything except walls can be walked on.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Character used by text layouts.
    pub const fn glyph(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Open => '.',
            Self::Start => 'S',
            Self::End => 'E',
        }
    }

    /// Inverse of [`glyph`](Self::glyph); also accepts the digit codes.
    pub const fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            '#' | '0' => Some(Self::Wall),
            '.' | '1' => Some(Self::Open),
            'S' | '2' => Some(Self::Start),
            'E' | '3' => Some(Self::End),
            _ => None,
        }
    }
}

/// A rectangular labyrinth with exactly one start and one end cell.
///
/// Construction validates the grid, so every `Labyrinth` value is
/// well-formed. It is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Labyrinth {
    cells: Grid<CellKind>,
    start: Point,
    end: Point,
}

impl Labyrinth {
    /// Build a labyrinth from rows of integer codes (row 0 is the top).
    pub fn from_codes<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if height == 0 || width == 0 {
            return Err(GridError::Empty);
        }
        let mut kinds = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(GridError::Ragged {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &code) in row.iter().enumerate() {
                let kind = CellKind::from_code(code).ok_or(GridError::UnknownCode {
                    pos: Point::new(x as i32, y as i32),
                    code,
                })?;
                kinds.push(kind);
            }
        }
        Self::from_kinds(width as i32, height as i32, kinds)
    }

    /// Build a labyrinth from a row-major list of kinds.
    pub fn from_kinds(width: i32, height: i32, kinds: Vec<CellKind>) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::Empty);
        }
        let expected = (width as usize) * (height as usize);
        if kinds.len() != expected {
            return Err(GridError::Ragged {
                row: kinds.len() / width as usize,
                expected: width as usize,
                found: kinds.len() % width as usize,
            });
        }
        let mut it = kinds.into_iter();
        let cells = Grid::from_fn(width, height, |_| it.next().unwrap_or_default());
        Self::from_grid(cells)
    }

    /// Validate an existing grid of kinds.
    pub fn from_grid(cells: Grid<CellKind>) -> Result<Self, GridError> {
        if cells.is_empty() {
            return Err(GridError::Empty);
        }
        let expected = (cells.width() as usize) * (cells.height() as usize);
        if cells.len() != expected {
            return Err(GridError::Ragged {
                row: cells.len() / cells.width().max(1) as usize,
                expected: cells.width() as usize,
                found: cells.len() % cells.width().max(1) as usize,
            });
        }
        let mut starts = Vec::new();
        let mut ends = Vec::new();
        for (p, &k) in cells.iter() {
            match k {
                CellKind::Start => starts.push(p),
                CellKind::End => ends.push(p),
                _ => {}
            }
        }
        if starts.len() != 1 {
            return Err(GridError::StartCount(starts.len()));
        }
        if ends.len() != 1 {
            return Err(GridError::EndCount(ends.len()));
        }
        Ok(Self {
            cells,
            start: starts[0],
            end: ends[0],
        })
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.cells.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.cells.height()
    }

    /// Size as a `Point` (x = width, y = height).
    #[inline]
    pub fn size(&self) -> Point {
        self.cells.size()
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.cells.bounds()
    }

    /// Kind at `p`, or `None` outside the labyrinth.
    #[inline]
    pub fn kind_at(&self, p: Point) -> Option<CellKind> {
        self.cells.at(p)
    }

    /// Whether `p` is inside the labyrinth and not a wall.
    #[inline]
    pub fn passable(&self, p: Point) -> bool {
        self.kind_at(p).is_some_and(CellKind::is_passable)
    }

    /// The underlying grid of kinds.
    #[inline]
    pub fn cells(&self) -> &Grid<CellKind> {
        &self.cells
    }

    /// Rows of integer codes, the inverse of [`from_codes`](Self::from_codes).
    pub fn codes(&self) -> Vec<Vec<i32>> {
        (0..self.height())
            .map(|y| self.cells.row(y).iter().map(|k| k.code()).collect())
            .collect()
    }
}

/// Text layout: one line per row using [`CellKind::glyph`].
impl fmt::Display for Labyrinth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            if y > 0 {
                writeln!(f)?;
            }
            for k in self.cells.row(y) {
                write!(f, "{}", k.glyph())?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Labyrinth {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            cells: Grid<CellKind>,
        }
        let raw = Raw::deserialize(deserializer)?;
        Labyrinth::from_grid(raw.cells).map_err(serde::de::Error::custom)
    }
}

/// Errors from labyrinth validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Zero rows or zero columns.
    Empty,
    /// A row whose width differs from the first row.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// An integer code outside `0..=3`.
    UnknownCode { pos: Point, code: i32 },
    /// Number of start cells found, when it is not exactly one.
    StartCount(usize),
    /// Number of end cells found, when it is not exactly one.
    EndCount(usize),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "labyrinth has no cells"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "labyrinth is not rectangular: row {row} has {found} cells, expected {expected}"
            ),
            Self::UnknownCode { pos, code } => {
                write!(f, "unknown cell code {code} at {pos}")
            }
            Self::StartCount(n) => write!(f, "expected exactly one start cell, found {n}"),
            Self::EndCount(n) => write!(f, "expected exactly one end cell, found {n}"),
        }
    }
}

impl std::error::Error for GridError {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn labyrinth_round_trip() {
        let lab = Labyrinth::from_codes(&[[2, 1], [0, 3]]).unwrap();
        let json = serde_json::to_string(&lab).unwrap();
        let back: Labyrinth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, lab);
    }

    #[test]
    fn deserialize_validates() {
        let lab = Labyrinth::from_codes(&[[2, 1], [0, 3]]).unwrap();
        let json = serde_json::to_string(&lab)
            .unwrap()
            .replace("\"End\"", "\"Open\"");
        assert!(serde_json::from_str::<Labyrinth>(&json).is_err());
    }

    #[test]
    fn negative_dimensions_are_rejected() {
        let json = r#"{"cells":{"cells":["Start","End"],"width":-1,"height":-2},
            "start":{"x":-1,"y":-2},"end":{"x":-1,"y":-1}}"#;
        assert!(serde_json::from_str::<Labyrinth>(json).is_err());
    }
}
