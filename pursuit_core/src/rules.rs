//! Per-agent move rules applied to a working copy of the board.

use crate::{
    Direction, Position, State,
    cell::{self, CAPTURE, COIN, EMPTY, PLAYER, Pursuer},
    index::PositionIndex,
};

/// Represents the outcome of one player move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMove {
    Moved,
    /// The player walked onto a pursuer. The destination now holds `CAPTURE`.
    Captured,
    /// Off the board or into a wall. The board is untouched.
    Blocked,
}

/// Represents the outcome of one pursuer move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PursuerMove {
    Moved(Direction),
    Captured(Direction),
    /// Every neighbour was a wall, another pursuer, or off the board.
    Stuck,
}

/// Moves the player one step in `direction`, consuming any coin it lands on.
pub fn move_player(
    grid: &mut State,
    index: &mut PositionIndex,
    direction: Direction,
) -> PlayerMove {
    let Some(origin) = index.player() else {
        return PlayerMove::Blocked;
    };
    let Some(target) = grid.step(origin, direction) else {
        return PlayerMove::Blocked;
    };
    if cell::is_wall(grid[target]) {
        return PlayerMove::Blocked;
    }

    // A player never stands on a coin, so nothing is left behind.
    grid[origin] = EMPTY;

    let dest = grid[target];
    if cell::is_empty(dest) || cell::is_coin(dest) {
        grid[target] = PLAYER;
        index.set_player(target);
        PlayerMove::Moved
    } else {
        grid[target] = CAPTURE;
        PlayerMove::Captured
    }
}

/// Orders the four directions by distance from the pursuer's candidate cell to
/// `target`, breaking ties Right, Down, Left, Up.
///
/// Candidates are ranked before any bounds check, so a step off the board
/// still takes part in the ordering.
pub fn rank_directions(from: Position, target: Position) -> [Direction; 4] {
    let distance = |d: Direction| {
        let (d_row, d_col) = d.delta();
        let row = from.row as isize + d_row;
        let col = from.col as isize + d_col;
        (row - target.row as isize).unsigned_abs() + (col - target.col as isize).unsigned_abs()
    };
    let mut ranked = Direction::ALL;
    ranked.sort_by_key(|d| (distance(*d), d.priority()));
    ranked
}

/// Moves `pursuer` one step toward the player's current position.
///
/// The index must already hold the player's post-move position and the
/// pursuer's current position.
pub fn move_pursuer(grid: &mut State, index: &mut PositionIndex, pursuer: Pursuer) -> PursuerMove {
    let (Some(origin), Some(player)) = (index.pursuer(pursuer), index.player()) else {
        return PursuerMove::Stuck;
    };

    let choice = rank_directions(origin, player).into_iter().find_map(|direction| {
        let target = grid.step(origin, direction)?;
        let dest = grid[target];
        (cell::is_empty(dest) || cell::is_coin(dest) || cell::is_player(dest))
            .then_some((direction, target))
    });
    let Some((direction, target)) = choice else {
        return PursuerMove::Stuck;
    };

    let captured = match grid[target] {
        PLAYER => {
            grid[target] = CAPTURE;
            true
        }
        COIN => {
            grid[target] = pursuer.code(true);
            false
        }
        _ => {
            grid[target] = pursuer.code(false);
            false
        }
    };

    // The coin under a pursuer stays where it was.
    grid[origin] = if cell::is_coin_bearing(grid[origin]) { COIN } else { EMPTY };
    index.set_pursuer(pursuer, target);

    if captured {
        PursuerMove::Captured(direction)
    } else {
        PursuerMove::Moved(direction)
    }
}
