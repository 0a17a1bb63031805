//! A dense, owned 2D grid stored row-major in a flat buffer.
//!
//! Every per-cell array in the workspace (cell kinds, wall mask, state field,
//! scratch buffers) is a `Grid<T>`. The origin is always (0, 0).

use crate::geom::{Point, Range};

/// A rectangular grid of `T` values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Grid<T> {
    cells: Vec<T>,
    width: i32,
    height: i32,
}

impl<T: Copy> Grid<T> {
    /// Create a new grid filled with `fill`. Negative sizes are clamped to 0.
    pub fn new(width: i32, height: i32, fill: T) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            cells: vec![fill; (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    /// Build a grid by evaluating `f` at every point, in row-major order.
    pub fn from_fn(width: i32, height: i32, mut f: impl FnMut(Point) -> T) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let cells = Range::new(0, 0, width, height).iter().map(&mut f).collect();
        Self {
            cells,
            width,
            height,
        }
    }

    /// Get the value at a point, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<T> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Get the value at a point, or `outside` if out of bounds.
    #[inline]
    pub fn at_or(&self, p: Point, outside: T) -> T {
        self.at(p).unwrap_or(outside)
    }

    /// Set the value at a point. Does nothing if out of bounds.
    #[inline]
    pub fn set(&mut self, p: Point, v: T) {
        if let Some(i) = self.index(p) {
            self.cells[i] = v;
        }
    }

    /// Overwrite every cell with `v`.
    pub fn fill(&mut self, v: T) {
        self.cells.fill(v);
    }

    /// Resize to `width`×`height` and overwrite every cell with `v`.
    ///
    /// The backing allocation is reused when it is large enough.
    pub fn reset(&mut self, width: i32, height: i32, v: T) {
        self.width = width.max(0);
        self.height = height.max(0);
        self.cells.clear();
        self.cells
            .resize((self.width as usize) * (self.height as usize), v);
    }
}

impl<T> Grid<T> {
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Size as a `Point` (x = width, y = height).
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// The bounding range, always anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y as usize) * (self.width as usize) + (p.x as usize))
    }

    /// Point at flat index `i`. `i` must be below [`len`](Self::len).
    #[inline]
    pub fn point(&self, i: usize) -> Point {
        let w = self.width.max(1) as usize;
        Point::new((i % w) as i32, (i / w) as i32)
    }

    /// The whole buffer in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Mutable access to the whole buffer in row-major order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// One row of the grid. Panics if `y` is out of bounds.
    #[inline]
    pub fn row(&self, y: i32) -> &[T] {
        let w = self.width as usize;
        let start = (y as usize) * w;
        &self.cells[start..start + w]
    }

    /// Iterate over `(Point, &T)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> + '_ {
        self.bounds().iter().zip(self.cells.iter())
    }

    /// Count how many cells satisfy a predicate.
    pub fn count_fn(&self, mut f: impl FnMut(&T) -> bool) -> usize {
        self.cells.iter().filter(|v| f(v)).count()
    }

    /// Apply `f` to every value, producing a grid of the same shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            cells: self.cells.iter().map(f).collect(),
            width: self.width,
            height: self.height,
        }
    }
}

/// Rejects negative sizes and buffers whose length is not `width * height`.
#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Grid<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        #[derive(serde::Deserialize)]
        struct Raw<U> {
            cells: Vec<U>,
            width: i32,
            height: i32,
        }
        let raw = Raw::<T>::deserialize(deserializer)?;
        if raw.width < 0 || raw.height < 0 {
            return Err(D::Error::custom(format!(
                "negative grid size {}x{}",
                raw.width, raw.height
            )));
        }
        let expected = (raw.width as usize).checked_mul(raw.height as usize);
        if expected != Some(raw.cells.len()) {
            return Err(D::Error::custom(format!(
                "{}x{} grid holds {} cells",
                raw.width,
                raw.height,
                raw.cells.len()
            )));
        }
        Ok(Self {
            cells: raw.cells,
            width: raw.width,
            height: raw.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_and_size() {
        let g = Grid::new(10, 5, 0i32);
        assert_eq!(g.size(), Point::new(10, 5));
        assert_eq!(g.len(), 50);
        assert!(!g.is_empty());
        assert!(Grid::new(0, 3, 0u8).is_empty());
    }

    #[test]
    fn set_and_at() {
        let mut g = Grid::new(4, 4, 0i32);
        let p = Point::new(2, 3);
        g.set(p, 42);
        assert_eq!(g.at(p), Some(42));
        assert_eq!(g.at(Point::new(0, 0)), Some(0));
        assert_eq!(g.at(Point::new(4, 0)), None);
        assert_eq!(g.at(Point::new(0, -1)), None);
        assert_eq!(g.at_or(Point::new(-1, 0), 7), 7);
        // Out of bounds writes are ignored.
        g.set(Point::new(9, 9), 1);
        assert_eq!(g.count_fn(|&v| v != 0), 1);
    }

    #[test]
    fn index_point_roundtrip() {
        let g = Grid::new(5, 3, 0u8);
        for (i, (p, _)) in g.iter().enumerate() {
            assert_eq!(g.index(p), Some(i));
            assert_eq!(g.point(i), p);
        }
    }

    #[test]
    fn from_fn_is_row_major() {
        let g = Grid::from_fn(3, 2, |p| p.y * 10 + p.x);
        assert_eq!(g.as_slice(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(g.row(1), &[10, 11, 12]);
    }

    #[test]
    fn reset_reuses_and_refills() {
        let mut g = Grid::new(4, 4, 3i32);
        g.reset(2, 3, -1);
        assert_eq!(g.size(), Point::new(2, 3));
        assert!(g.as_slice().iter().all(|&v| v == -1));
    }

    #[test]
    fn map_keeps_shape() {
        let g = Grid::from_fn(3, 2, |p| p.x);
        let m = g.map(|&v| v > 0);
        assert_eq!(m.size(), g.size());
        assert_eq!(m.count_fn(|&b| b), 4);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g = Grid::from_fn(3, 2, |p| p.x - p.y);
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn rejects_negative_sizes() {
        let json = r#"{"cells":[1,2],"width":-1,"height":-2}"#;
        assert!(serde_json::from_str::<Grid<i32>>(json).is_err());
        let json = r#"{"cells":[],"width":-3,"height":0}"#;
        assert!(serde_json::from_str::<Grid<i32>>(json).is_err());
    }

    #[test]
    fn rejects_mismatched_cell_count() {
        let json = r#"{"cells":[1,2,3],"width":2,"height":2}"#;
        assert!(serde_json::from_str::<Grid<i32>>(json).is_err());
        let json = r#"{"cells":[1,2,3,4],"width":2,"height":2}"#;
        let g: Grid<i32> = serde_json::from_str(json).unwrap();
        assert_eq!(g.row(1), &[3, 4]);
    }
}
