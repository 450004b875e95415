//! Dense per-tile storage sized for the largest dungeon.

use core::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use super::Point;
use crate::{DMAXX, DMAXY};

/// One value per dungeon tile, indexed by [`Point`]
///
/// Indexing outside the grid panics; callers that deal with untrusted
/// coordinates check [`Point::in_bounds`] or use [`Grid::get`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn filled(value: T) -> Self {
        Self {
            cells: vec![value; DMAXX * DMAXY],
        }
    }

    pub fn fill(&mut self, value: T) {
        for cell in &mut self.cells {
            *cell = value.clone();
        }
    }
}

impl<T: Clone + Default> Default for Grid<T> {
    fn default() -> Self {
        Self::filled(T::default())
    }
}

impl<T> Grid<T> {
    #[inline]
    fn offset(p: Point) -> usize {
        assert!(p.in_bounds(), "tile {p:?} outside the dungeon grid");
        p.x as usize * DMAXY + p.y as usize
    }

    pub fn get(&self, p: Point) -> Option<&T> {
        if p.in_bounds() {
            Some(&self.cells[Self::offset(p)])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, p: Point) -> Option<&mut T> {
        if p.in_bounds() {
            Some(&mut self.cells[Self::offset(p)])
        } else {
            None
        }
    }

    /// Every tile with its value, column-major
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> {
        self.cells.iter().enumerate().map(|(i, v)| {
            (
                Point::new((i / DMAXY) as i32, (i % DMAXY) as i32),
                v,
            )
        })
    }
}

impl<T> Index<Point> for Grid<T> {
    type Output = T;

    fn index(&self, p: Point) -> &T {
        &self.cells[Self::offset(p)]
    }
}

impl<T> IndexMut<Point> for Grid<T> {
    fn index_mut(&mut self, p: Point) -> &mut T {
        &mut self.cells[Self::offset(p)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_and_iter() {
        let mut g: Grid<u8> = Grid::default();
        g[Point::new(3, 4)] = 9;
        assert_eq!(g[Point::new(3, 4)], 9);
        assert_eq!(g.get(Point::new(-1, 0)), None);
        let hits: Vec<_> = g.iter().filter(|(_, v)| **v == 9).map(|(p, _)| p).collect();
        assert_eq!(hits, vec![Point::new(3, 4)]);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_panics() {
        let g: Grid<u8> = Grid::default();
        let _ = g[Point::new(112, 0)];
    }
}
