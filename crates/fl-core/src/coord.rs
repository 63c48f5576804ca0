use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Integer cell position on the unbounded grid.
///
/// Neighbour arithmetic wraps at the `i64` limits, so the grid is a torus of
/// 2^64 cells per axis and a cell at `i64::MAX` neighbours one at `i64::MIN`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i64,
    pub y: i64,
}

/// Sparse live-cell map: coordinates absent from it hold the vacuum value.
pub type LiveMap = HashMap<Coord, f64>;

impl Coord {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i64, dy: i64) -> Self {
        Self::new(self.x.wrapping_add(dx), self.y.wrapping_add(dy))
    }

    /// The 8 surrounding cells.
    pub fn moore(self) -> impl Iterator<Item = Coord> {
        self.block().filter(move |&c| c != self)
    }

    /// The 3x3 block centered on this cell, itself included.
    pub fn block(self) -> impl Iterator<Item = Coord> {
        (-1..=1).flat_map(move |dy| (-1..=1).map(move |dx| self.offset(dx, dy)))
    }
}

impl From<(i64, i64)> for Coord {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

/// Row-major: by `y`, then `x`.
impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Tight integer bounding box of a set of cells, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub min: Coord,
    pub max: Coord,
}

impl Bounds {
    pub fn of<'a>(cells: impl IntoIterator<Item = &'a Coord>) -> Option<Self> {
        let mut iter = cells.into_iter();
        let first = *iter.next()?;
        let mut bounds = Bounds {
            min: first,
            max: first,
        };
        for c in iter {
            bounds.min.x = bounds.min.x.min(c.x);
            bounds.min.y = bounds.min.y.min(c.y);
            bounds.max.x = bounds.max.x.max(c.x);
            bounds.max.y = bounds.max.y.max(c.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> u64 {
        self.max.x.abs_diff(self.min.x).saturating_add(1)
    }

    pub fn height(&self) -> u64 {
        self.max.y.abs_diff(self.min.y).saturating_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moore_excludes_self() {
        let c = Coord::new(3, -2);
        let n: Vec<Coord> = c.moore().collect();
        assert_eq!(n.len(), 8);
        assert!(!n.contains(&c));
        assert!(n.contains(&Coord::new(2, -3)));
        assert!(n.contains(&Coord::new(4, -1)));
    }

    #[test]
    fn test_block_includes_self() {
        let c = Coord::new(0, 0);
        let b: Vec<Coord> = c.block().collect();
        assert_eq!(b.len(), 9);
        assert!(b.contains(&c));
    }

    #[test]
    fn test_neighbours_wrap_at_limits() {
        let edge = Coord::new(i64::MAX, i64::MIN);
        let n: Vec<Coord> = edge.moore().collect();
        assert_eq!(n.len(), 8);
        assert!(n.contains(&Coord::new(i64::MIN, i64::MAX)));
        assert!(n.contains(&Coord::new(i64::MAX - 1, i64::MIN + 1)));
        assert_eq!(edge.offset(1, -1), Coord::new(i64::MIN, i64::MAX));
    }

    #[test]
    fn test_bounds_span_saturates() {
        let b = Bounds::of(&[Coord::new(i64::MIN, 0), Coord::new(i64::MAX, 0)]).unwrap();
        assert_eq!(b.width(), u64::MAX);
        assert_eq!(b.height(), 1);
    }

    #[test]
    fn test_row_major_order() {
        let mut v = vec![Coord::new(5, 1), Coord::new(-3, 2), Coord::new(0, 1)];
        v.sort();
        assert_eq!(v, vec![Coord::new(0, 1), Coord::new(5, 1), Coord::new(-3, 2)]);
    }

    #[test]
    fn test_bounds() {
        let cells = [Coord::new(2, 7), Coord::new(-1, 3), Coord::new(4, 5)];
        let b = Bounds::of(&cells).unwrap();
        assert_eq!(b.min, Coord::new(-1, 3));
        assert_eq!(b.max, Coord::new(4, 7));
        assert_eq!(b.width(), 6);
        assert_eq!(b.height(), 5);
        assert!(Bounds::of(std::iter::empty::<&Coord>()).is_none());
    }
}
