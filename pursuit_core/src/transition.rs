use tracing::trace;

use crate::{
    Direction, State,
    cell::CAPTURE,
    index::{PositionIndex, locate_code},
    rules::{PlayerMove, move_player, move_pursuer},
};

/// Why a transition produced no resulting state.
///
/// These are ordinary game outcomes, not failures: the search simply drops
/// the branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pruned {
    /// The incoming state already holds a capture marker.
    Terminal,
    /// The player tried to leave the board or walk into a wall.
    Blocked,
    /// The player walked onto a pursuer.
    PlayerCaptured,
    /// A pursuer reached the player during its reaction.
    PursuerCaught,
}

/// Plays one full tick: the player's move followed by each pursuer's reaction
/// in the fixed order blue, yellow, green, red.
pub fn transition(state: &State, direction: Direction) -> Result<State, Pruned> {
    if locate_code(state, CAPTURE).is_some() {
        return Err(Pruned::Terminal);
    }

    let mut grid = state.clone();
    let mut index = PositionIndex::scan(&grid);

    match move_player(&mut grid, &mut index, direction) {
        PlayerMove::Moved => {}
        PlayerMove::Blocked => return Err(Pruned::Blocked),
        PlayerMove::Captured => return Err(Pruned::PlayerCaptured),
    }

    let active: Vec<_> = index.active_pursuers().map(|(pursuer, _)| pursuer).collect();
    for pursuer in active {
        let outcome = move_pursuer(&mut grid, &mut index, pursuer);
        trace!(?pursuer, ?outcome, "pursuer reacted");
    }

    if locate_code(&grid, CAPTURE).is_some() {
        return Err(Pruned::PursuerCaught);
    }
    Ok(grid)
}

/// The state reached by playing `direction`, or `None` if the branch is pruned.
pub fn result(state: &State, direction: Direction) -> Option<State> {
    match transition(state, direction) {
        Ok(next) => Some(next),
        Err(reason) => {
            trace!(?direction, ?reason, "transition pruned");
            None
        }
    }
}
