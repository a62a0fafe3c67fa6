use serde::{Deserialize, Serialize};

pub mod cell;
pub mod index;
pub mod level;
pub mod map;
pub mod problem;
pub mod rules;
pub mod search;
pub mod transition;

/// A game state: an immutable snapshot of every cell code on the board.
pub type State = map::Grid<cell::CellCode>;

/// Represents a 2D coordinate. Row 0 is the top of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Returns manhattan distance between two positions
    pub fn manhattan_distance(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// The four moves available to the player and the pursuers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// All directions in priority order. Successor enumeration and the
    /// pursuer tie-break both rely on this exact order.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Returns the `(d_row, d_col)` step for this direction.
    #[inline]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Right => (0, 1),
            Direction::Left => (0, -1),
            Direction::Down => (1, 0),
            Direction::Up => (-1, 0),
        }
    }

    /// Tie-break rank used when two candidate moves are equally close.
    #[inline]
    pub const fn priority(self) -> usize {
        match self {
            Direction::Right => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Up => 3,
        }
    }

    /// Single-letter name, as used in printed plans.
    pub const fn letter(self) -> char {
        match self {
            Direction::Right => 'R',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Up => 'U',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = Position::new(0, 3);
        let b = Position::new(2, 1);
        assert_eq!(a.manhattan_distance(&b), 4);
        assert_eq!(b.manhattan_distance(&a), 4);
    }

    #[test]
    fn priority_follows_declaration_order() {
        let ranks: Vec<usize> = Direction::ALL.iter().map(|d| d.priority()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
    }
}
