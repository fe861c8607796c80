use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::types::ToNdIndex;
use crate::*;

/// Fixed-size two-dimensional storage addressed by [`Coord2`].
///
/// Every position in `[0, width) x [0, height)` holds exactly one item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "GridData<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct Grid<T> {
    cells: Array2<T>,
}

#[derive(Deserialize)]
struct GridData<T> {
    cells: Array2<T>,
}

impl<T> TryFrom<GridData<T>> for Grid<T> {
    type Error = GameError;

    fn try_from(data: GridData<T>) -> Result<Self> {
        let (height, width) = data.cells.dim();
        if width == 0 || height == 0 || Coord::try_from(width.max(height)).is_err() {
            return Err(GameError::InvalidDimension);
        }
        Ok(Self { cells: data.cells })
    }
}

impl<T> Grid<T> {
    /// Builds a grid by calling `initializer` for every position, in row-major order (y outer, x inner).
    pub fn new(
        width: Coord,
        height: Coord,
        mut initializer: impl FnMut(Coord2) -> T,
    ) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(GameError::InvalidDimension);
        }

        let cells = Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
            initializer(Coord2::new(x as Coord, y as Coord))
        });
        Ok(Self { cells })
    }

    pub fn from_elem(width: Coord, height: Coord, elem: T) -> Result<Self>
    where
        T: Clone,
    {
        Self::new(width, height, |_| elem.clone())
    }

    pub fn width(&self) -> Coord {
        self.cells.ncols() as Coord
    }

    pub fn height(&self) -> Coord {
        self.cells.nrows() as Coord
    }

    /// `(width, height)` packed as a coordinate.
    pub fn size(&self) -> Coord2 {
        Coord2::new(self.width(), self.height())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_valid_position(&self, position: Coord2) -> bool {
        0 <= position.x && position.x < self.width() && 0 <= position.y && position.y < self.height()
    }

    pub fn validate_position(&self, position: Coord2) -> Result<Coord2> {
        if self.is_valid_position(position) {
            Ok(position)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn get(&self, position: Coord2) -> Result<&T> {
        let position = self.validate_position(position)?;
        Ok(&self.cells[position.to_nd_index()])
    }

    pub fn get_mut(&mut self, position: Coord2) -> Result<&mut T> {
        let position = self.validate_position(position)?;
        Ok(&mut self.cells[position.to_nd_index()])
    }

    /// Replaces the item at `position`, returning the previous one.
    pub fn set(&mut self, position: Coord2, value: T) -> Result<T> {
        Ok(core::mem::replace(self.get_mut(position)?, value))
    }

    /// Same-shaped grid with `mapper` applied to every item.
    pub fn map<U>(&self, mut mapper: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            cells: self.cells.map(|item| mapper(item)),
        }
    }

    /// Like [`Grid::map`], but the mapper also receives each item's position.
    pub fn map_with_position<U>(&self, mut mapper: impl FnMut(Coord2, &T) -> U) -> Grid<U> {
        let cells = Array2::from_shape_fn(self.cells.dim(), |(y, x)| {
            let position = Coord2::new(x as Coord, y as Coord);
            mapper(position, &self[position])
        });
        Grid { cells }
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Coord2> + use<T> {
        let Coord2 {
            x: width,
            y: height,
        } = self.size();
        (0..height).flat_map(move |y| (0..width).map(move |x| Coord2::new(x, y)))
    }

    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }

    /// `(position, item)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &T)> {
        self.cells
            .indexed_iter()
            .map(|((y, x), item)| (Coord2::new(x as Coord, y as Coord), item))
    }

    /// In-bounds neighbors of `position`, in [`DIRECTIONS`] order.
    pub fn around(&self, position: Coord2) -> NeighborIter {
        NeighborIter::new(position, self.size())
    }

    pub fn slice(&self, start: Coord2, direction: Coord2) -> GridSlice<'_, T> {
        GridSlice {
            grid: self,
            start,
            direction,
        }
    }

    pub fn row(&self, y: Coord) -> GridSlice<'_, T> {
        self.slice(Coord2::new(0, y), Coord2::EAST)
    }

    pub fn column(&self, x: Coord) -> GridSlice<'_, T> {
        self.slice(Coord2::new(x, 0), Coord2::NORTH)
    }

    pub fn rows(&self) -> impl Iterator<Item = GridSlice<'_, T>> {
        (0..self.height()).map(move |y| self.row(y))
    }

    pub fn columns(&self) -> impl Iterator<Item = GridSlice<'_, T>> {
        (0..self.width()).map(move |x| self.column(x))
    }
}

/// Panics when `position` is out of bounds; use [`Grid::get`] for a checked lookup.
impl<T> Index<Coord2> for Grid<T> {
    type Output = T;

    fn index(&self, position: Coord2) -> &Self::Output {
        &self.cells[position.to_nd_index()]
    }
}

impl<T> IndexMut<Coord2> for Grid<T> {
    fn index_mut(&mut self, position: Coord2) -> &mut Self::Output {
        &mut self.cells[position.to_nd_index()]
    }
}

/// A straight line of grid positions: `start`, `start + direction`, `start + 2 * direction`, ...
#[derive(Debug)]
pub struct GridSlice<'a, T> {
    grid: &'a Grid<T>,
    start: Coord2,
    direction: Coord2,
}

impl<'a, T> GridSlice<'a, T> {
    /// `None` when the position does not fit in a [`Coord2`].
    pub fn position_at(&self, index: Coord) -> Option<Coord2> {
        self.start.checked_add(self.direction.checked_mul(index)?)
    }

    pub fn is_valid_index(&self, index: Coord) -> bool {
        self.position_at(index)
            .is_some_and(|position| self.grid.is_valid_position(position))
    }

    pub fn get(&self, index: Coord) -> Option<&'a T> {
        self.grid.get(self.position_at(index)?).ok()
    }

    /// Number of in-bounds positions, counting from index 0.
    pub fn len(&self) -> usize {
        if !self.grid.is_valid_position(self.start) {
            return 0;
        }
        if self.direction == Coord2::ZERO {
            return 1;
        }

        let mut count = 0;
        while self.is_valid_index(count) {
            count += 1;
        }
        count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a T> + use<'a, T> {
        let grid = self.grid;
        let start = self.start;
        let direction = self.direction;
        (0..self.len() as Coord).map(move |index| &grid[start + direction * index])
    }
}

impl<T> Clone for GridSlice<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for GridSlice<'_, T> {}

/// Applies `delta` to `center`, returning a value only when it remains in bounds.
fn apply_delta(center: Coord2, delta: Coord2, bounds: Coord2) -> Option<Coord2> {
    let next = Coord2::new(center.x.checked_add(delta.x)?, center.y.checked_add(delta.y)?);
    if next.x < 0 || next.x >= bounds.x || next.y < 0 || next.y >= bounds.y {
        return None;
    }
    Some(next)
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DIRECTIONS.len() {
                return None;
            }

            let next_item = apply_delta(self.center, DIRECTIONS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
