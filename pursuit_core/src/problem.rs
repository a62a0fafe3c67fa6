use crate::{
    Direction, State,
    cell::{self, CAPTURE, PLAYER},
    index::locate_code,
    level::{self, LevelError},
    search::{Node, SearchProblem},
    transition,
};

/// Number of coin-bearing cells, including coins under pursuers.
pub fn coin_count(state: &State) -> usize {
    state.iter().filter(|code| cell::is_coin_bearing(**code)).count()
}

/// Collect every coin without being caught.
#[derive(Debug, Clone)]
pub struct PursuitProblem {
    initial: State,
}

impl PursuitProblem {
    /// Wraps a starting board, rejecting malformed ones up front.
    pub fn new(initial: State) -> Result<Self, LevelError> {
        level::validate(&initial)?;
        Ok(PursuitProblem { initial })
    }
}

impl SearchProblem for PursuitProblem {
    type State = State;
    type Action = Direction;

    fn initial(&self) -> &State {
        &self.initial
    }

    fn successors(&self, state: &State) -> Vec<(Direction, State)> {
        if locate_code(state, CAPTURE).is_some() {
            return Vec::new();
        }
        Direction::ALL
            .into_iter()
            .filter_map(|direction| {
                transition::result(state, direction).map(|next| (direction, next))
            })
            .collect()
    }

    fn is_goal(&self, state: &State) -> bool {
        coin_count(state) == 0
    }

    /// Remaining coins plus a nearest-coin distance term.
    ///
    /// The distance term starts at zero and only ever takes a strictly smaller
    /// value, so it never moves off zero and the estimate is the coin count.
    fn heuristic(&self, node: &Node<State, Direction>) -> i64 {
        let state = &node.state;
        let Some(player) = locate_code(state, PLAYER) else {
            return coin_count(state) as i64;
        };

        let mut min_distance = 0;
        let mut coins = 0;
        for (position, code) in state.enumerate() {
            if cell::is_coin_bearing(*code) {
                coins += 1;
                let distance = player.manhattan_distance(&position) as i64;
                if distance < min_distance {
                    min_distance = distance;
                }
            }
        }
        coins + min_distance
    }
}
