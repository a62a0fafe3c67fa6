use crate::{
    Position, State,
    cell::{CellCode, PLAYER, Pursuer},
};

/// Finds the first cell in row-major order holding `pursuer`, on a coin or not.
pub fn locate(grid: &State, pursuer: Pursuer) -> Option<Position> {
    let (bare, on_coin) = (pursuer.code(false), pursuer.code(true));
    grid.enumerate()
        .find_map(|(pos, code)| (*code == bare || *code == on_coin).then_some(pos))
}

/// Finds the first cell in row-major order whose code is exactly `code`.
pub fn locate_code(grid: &State, code: CellCode) -> Option<Position> {
    grid.enumerate()
        .find_map(|(pos, cell)| (*cell == code).then_some(pos))
}

/// Where each agent stands during one transition.
///
/// Derived from the grid at the start of the transition and kept in sync
/// with the working copy while agents move. Never outlives the transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionIndex {
    player: Option<Position>,
    pursuers: [Option<Position>; 4],
}

impl PositionIndex {
    /// Scans the grid for the player and every pursuer.
    pub fn scan(grid: &State) -> Self {
        let mut index = PositionIndex {
            player: locate_code(grid, PLAYER),
            ..Default::default()
        };
        for pursuer in Pursuer::ALL {
            index.pursuers[pursuer.slot()] = locate(grid, pursuer);
        }
        index
    }

    pub fn player(&self) -> Option<Position> {
        self.player
    }

    pub fn set_player(&mut self, position: Position) {
        self.player = Some(position);
    }

    pub fn pursuer(&self, pursuer: Pursuer) -> Option<Position> {
        self.pursuers[pursuer.slot()]
    }

    pub fn set_pursuer(&mut self, pursuer: Pursuer, position: Position) {
        self.pursuers[pursuer.slot()] = Some(position);
    }

    /// Pursuers present on the board, in processing order.
    pub fn active_pursuers(&self) -> impl Iterator<Item = (Pursuer, Position)> + '_ {
        Pursuer::ALL
            .into_iter()
            .filter_map(|p| self.pursuer(p).map(|pos| (p, pos)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CAPTURE;
    use crate::map::Grid;

    fn grid(rows: Vec<Vec<CellCode>>) -> State {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn locate_matches_bare_and_coin_bearing_forms() {
        let g = grid(vec![vec![10, 31], vec![20, 77]]);
        assert_eq!(locate(&g, Pursuer::Yellow), Some(Position::new(0, 1)));
        assert_eq!(locate(&g, Pursuer::Blue), Some(Position::new(1, 0)));
        assert_eq!(locate(&g, Pursuer::Red), None);
    }

    #[test]
    fn locate_code_is_exact() {
        let g = grid(vec![vec![11, 77], vec![88, 10]]);
        assert_eq!(locate_code(&g, PLAYER), Some(Position::new(0, 1)));
        assert_eq!(locate_code(&g, CAPTURE), Some(Position::new(1, 0)));
        assert_eq!(locate_code(&g, 21), None);
    }

    #[test]
    fn locate_returns_first_in_row_major_order() {
        let g = grid(vec![vec![10, 11, 20], vec![21, 10, 10]]);
        assert_eq!(locate(&g, Pursuer::Blue), Some(Position::new(0, 2)));
    }

    #[test]
    fn scan_collects_every_agent() {
        let g = grid(vec![vec![77, 10, 50], vec![41, 10, 99]]);
        let index = PositionIndex::scan(&g);
        assert_eq!(index.player(), Some(Position::new(0, 0)));
        assert_eq!(index.pursuer(Pursuer::Red), Some(Position::new(0, 2)));
        assert_eq!(index.pursuer(Pursuer::Green), Some(Position::new(1, 0)));
        assert_eq!(index.pursuer(Pursuer::Blue), None);

        let active: Vec<Pursuer> = index.active_pursuers().map(|(p, _)| p).collect();
        assert_eq!(active, vec![Pursuer::Green, Pursuer::Red]);
    }
}
