use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::{Direction, Position};

/// Represents errors that can occur within the grid operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Grid has no cells")]
    Empty,
    #[error("Inconsistent width at row {row}: expected {expected}, found {found}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A generic 2D grid structure.
///
/// Stores elements of type `T` in a flat vector using row-major order.
/// Cells are addressed by `(row, col)` with row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Builds a grid from nested rows.
    ///
    /// Every row must have the same, non-zero length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, GridError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(GridError::Empty);
        }
        let height = rows.len();
        let mut cells = Vec::with_capacity(height * cols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != cols {
                return Err(GridError::Ragged {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }
        Ok(Grid {
            rows: height,
            cols,
            cells,
        })
    }

    /// Returns the grid as nested rows. Inverse of [`Grid::from_rows`].
    pub fn to_rows(&self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        if self.cols == 0 {
            return Vec::new();
        }
        self.cells.chunks(self.cols).map(<[T]>::to_vec).collect()
    }

    /// Returns the number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Converts (row, col) coordinates to a flat vector index.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[inline]
    fn coords_to_index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    /// Converts a flat vector index back to a position.
    #[inline]
    fn index_to_position(cols: usize, index: usize) -> Position {
        Position {
            row: index / cols,
            col: index % cols,
        }
    }

    /// Checks if the given coordinates are within the grid boundaries.
    #[inline]
    fn is_valid(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Returns the neighbour of `position` one step in `direction`,
    /// or `None` if that step leaves the grid.
    pub fn step(&self, position: Position, direction: Direction) -> Option<Position> {
        let (d_row, d_col) = direction.delta();
        let row = position.row.checked_add_signed(d_row)?;
        let col = position.col.checked_add_signed(d_col)?;
        self.is_valid(row, col).then_some(Position { row, col })
    }

    /// Returns an iterator over the cells of the grid in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }

    /// Returns an iterator that yields `(Position, &T)` for each cell in row-major order.
    pub fn enumerate(&self) -> impl Iterator<Item = (Position, &T)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| (Self::index_to_position(cols, index), cell))
    }
}

/// Allows indexing the grid using `(row, col)` coordinates for immutable access.
impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let (row, col) = index;
        match self.coords_to_index(row, col) {
            Some(idx) => &self.cells[idx],
            None => panic!(
                "Grid index ({}, {}) out of bounds for grid size ({}, {})",
                row, col, self.rows, self.cols
            ),
        }
    }
}

/// Indexing using Position coordinates for immutable access
impl<T> Index<Position> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: Position) -> &Self::Output {
        &self[(index.row, index.col)]
    }
}

/// Indexing using Position coordinates for mutable access
impl<T> IndexMut<Position> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, index: Position) -> &mut Self::Output {
        let (row, col) = (index.row, index.col);
        let (rows, cols) = (self.rows, self.cols);
        match self.coords_to_index(row, col) {
            Some(idx) => &mut self.cells[idx],
            None => panic!(
                "Grid index ({}, {}) out of bounds for grid size ({}, {})",
                row, col, rows, cols
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_round_trip_preserves_every_cell() {
        let rows = vec![vec![77u8, 11, 99], vec![20, 10, 51]];
        let grid = Grid::from_rows(rows.clone()).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid[(1, 2)], 51);
        assert_eq!(grid.to_rows(), rows);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Grid::from_rows(vec![vec![10u8, 10], vec![10]]).unwrap_err();
        assert_eq!(
            err,
            GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn from_rows_rejects_empty_input() {
        assert_eq!(Grid::<u8>::from_rows(vec![]).unwrap_err(), GridError::Empty);
        assert_eq!(
            Grid::<u8>::from_rows(vec![vec![]]).unwrap_err(),
            GridError::Empty
        );
    }

    #[test]
    fn step_stops_at_the_border() {
        let grid = Grid::from_rows(vec![vec![10u8, 10, 10], vec![10, 10, 10]]).unwrap();
        let corner = Position::new(0, 0);
        assert_eq!(grid.step(corner, Direction::Up), None);
        assert_eq!(grid.step(corner, Direction::Left), None);
        assert_eq!(grid.step(corner, Direction::Right), Some(Position::new(0, 1)));
        assert_eq!(grid.step(Position::new(1, 2), Direction::Down), None);
    }

    #[test]
    fn enumerate_is_row_major() {
        let grid = Grid::from_rows(vec![vec![1u8, 2], vec![3, 4]]).unwrap();
        let order: Vec<(Position, u8)> = grid.enumerate().map(|(p, v)| (p, *v)).collect();
        assert_eq!(order[1], (Position::new(0, 1), 2));
        assert_eq!(order[2], (Position::new(1, 0), 3));
    }
}
