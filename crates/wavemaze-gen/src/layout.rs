//! Labyrinths written as text.
//!
//! A [`Layout`] holds an ASCII drawing of a labyrinth, one line per row:
//!
//! ```text
//! S.#
//! .##
//! ..E
//! ```
//!
//! `#` is a wall, `.` open floor, `S` the start and `E` the end. The digit
//! codes `0`-`3` are accepted too, so `"201\n101\n113"` is the same kind of
//! layout.

use std::fmt;

use wavemaze_core::{CellKind, Grid, GridError, Labyrinth, Point};

/// Glyph used by [`Layout::render`] for path cells between start and end.
pub const PATH_GLYPH: char = '*';

/// A parsed text layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    content: String,
    size: Point,
}

impl Layout {
    /// Parse a layout, checking its shape and characters.
    ///
    /// Leading and trailing whitespace around the whole text is ignored, as
    /// are `\r` line endings; individual lines are not trimmed.
    pub fn new(s: &str) -> Result<Self, LayoutError> {
        let content = s.trim().replace('\r', "");
        let mut width = None;
        let mut height = 0;
        for (y, line) in content.split('\n').enumerate() {
            let mut w = 0;
            for (x, ch) in line.chars().enumerate() {
                if CellKind::from_glyph(ch).is_none() {
                    return Err(LayoutError::InvalidRune {
                        ch,
                        pos: Point::new(x as i32, y as i32),
                    });
                }
                w += 1;
            }
            match width {
                None => width = Some(w),
                Some(expected) if expected != w => {
                    return Err(LayoutError::InconsistentSize {
                        line: y,
                        expected,
                        found: w,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }
        let width = width.unwrap_or(0);
        let size = if width == 0 {
            Point::ZERO
        } else {
            Point::new(width, height)
        };
        Ok(Self { content, size })
    }

    /// Parse a layout straight into a validated labyrinth.
    pub fn parse(s: &str) -> Result<Labyrinth, LayoutError> {
        Self::new(s)?.to_labyrinth()
    }

    /// The normalised text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// (width, height) in cells.
    pub fn size(&self) -> Point {
        self.size
    }

    /// Iterate over all positions and their characters.
    pub fn iter(&self, mut f: impl FnMut(Point, char)) {
        for (y, line) in self.content.split('\n').enumerate() {
            for (x, ch) in line.chars().enumerate() {
                f(Point::new(x as i32, y as i32), ch);
            }
        }
    }

    /// Build the labyrinth this layout describes.
    pub fn to_labyrinth(&self) -> Result<Labyrinth, LayoutError> {
        let mut cells = Grid::new(self.size.x, self.size.y, CellKind::Wall);
        self.iter(|p, ch| {
            if let Some(kind) = CellKind::from_glyph(ch) {
                cells.set(p, kind);
            }
        });
        Ok(Labyrinth::from_grid(cells)?)
    }

    /// Draw `lab` with the cells of `path` marked by [`PATH_GLYPH`].
    ///
    /// Start and end keep their own glyphs; points outside the labyrinth are
    /// ignored.
    pub fn render(lab: &Labyrinth, path: &[Point]) -> String {
        let mut glyphs = lab.cells().map(|k| k.glyph());
        for &p in path {
            if lab.kind_at(p) == Some(CellKind::Open) {
                glyphs.set(p, PATH_GLYPH);
            }
        }
        let mut out = String::with_capacity(glyphs.len() + glyphs.height() as usize);
        for y in 0..glyphs.height() {
            if y > 0 {
                out.push('\n');
            }
            out.extend(glyphs.row(y));
        }
        out
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

/// Errors that can occur when parsing a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Lines have inconsistent widths.
    InconsistentSize {
        line: usize,
        expected: i32,
        found: i32,
    },
    /// A character that is not a cell glyph.
    InvalidRune { ch: char, pos: Point },
    /// The layout is well-formed text but not a valid labyrinth.
    Grid(GridError),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentSize {
                line,
                expected,
                found,
            } => write!(
                f,
                "layout: line {line} is {found} cells wide, expected {expected}"
            ),
            Self::InvalidRune { ch, pos } => {
                write!(f, "layout contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::Grid(e) => write!(f, "layout: {e}"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for LayoutError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "\
S.#
.##
..E";

    #[test]
    fn parse_and_size() {
        let l = Layout::new(ROOM).unwrap();
        assert_eq!(l.size(), Point::new(3, 3));
        let lab = l.to_labyrinth().unwrap();
        assert_eq!(lab.start(), Point::new(0, 0));
        assert_eq!(lab.end(), Point::new(2, 2));
        assert!(!lab.passable(Point::new(2, 0)));
    }

    #[test]
    fn digit_codes_match_glyphs() {
        let a = Layout::parse("20#\n1.0\n113").unwrap();
        let b = Layout::parse("S##\n..#\n..E").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn surrounding_whitespace_and_crlf_are_ignored() {
        let lab = Layout::parse("\n  \nS.\r\n.E\r\n\n").unwrap();
        assert_eq!(lab.size(), Point::new(2, 2));
    }

    #[test]
    fn iter_positions() {
        let l = Layout::new(ROOM).unwrap();
        let mut cells = Vec::new();
        l.iter(|p, ch| cells.push((p, ch)));
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], (Point::new(0, 0), 'S'));
        assert_eq!(cells[5], (Point::new(2, 1), '#'));
    }

    #[test]
    fn ragged_lines_are_rejected() {
        assert_eq!(
            Layout::new("S..\n.E"),
            Err(LayoutError::InconsistentSize {
                line: 1,
                expected: 3,
                found: 2
            })
        );
        // A longer later line is just as wrong.
        assert!(matches!(
            Layout::new("S.\n..E"),
            Err(LayoutError::InconsistentSize { .. })
        ));
    }

    #[test]
    fn unknown_characters_are_rejected() {
        assert_eq!(
            Layout::new("S.\n.x"),
            Err(LayoutError::InvalidRune {
                ch: 'x',
                pos: Point::new(1, 1)
            })
        );
    }

    #[test]
    fn grid_validation_errors_are_wrapped() {
        assert_eq!(
            Layout::parse("S.S\n..E"),
            Err(LayoutError::Grid(GridError::StartCount(2)))
        );
        assert_eq!(Layout::parse(""), Err(LayoutError::Grid(GridError::Empty)));
    }

    #[test]
    fn render_marks_path_cells() {
        let lab = Layout::parse(ROOM).unwrap();
        let path = [
            Point::new(0, 0),
            Point::new(0, 1),
            Point::new(0, 2),
            Point::new(1, 2),
            Point::new(2, 2),
        ];
        assert_eq!(Layout::render(&lab, &path), "S.#\n*##\n**E");
        assert_eq!(Layout::render(&lab, &[]), lab.to_string());
    }

    #[test]
    fn render_parses_back() {
        let lab = Layout::parse(ROOM).unwrap();
        let text = Layout::render(&lab, &[]);
        assert_eq!(Layout::parse(&text).unwrap(), lab);
    }
}
