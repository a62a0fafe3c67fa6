//! Loading boards from their text form.
//!
//! A level is one row per line of whitespace-separated cell codes. Blank
//! lines and lines starting with `#` are skipped:
//!
//! ```text
//! # player, coin, wall
//! 77 11 99
//! 10 20 10
//! ```

use crate::{
    Position, State,
    cell::{Cell, CellCode, Pursuer},
    map::{Grid, GridError},
};

/// Represents errors found while reading or checking a level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    #[error("Cannot read cell code '{token}' at line {line}")]
    Parse { line: usize, token: String },
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("Unknown cell code {code} at ({}, {})", .position.row, .position.col)]
    InvalidCode { code: CellCode, position: Position },
    #[error("No player (77) found in level")]
    MissingPlayer,
    #[error("Second player found at ({}, {})", .position.row, .position.col)]
    DuplicatePlayer { position: Position },
    #[error(
        "Pursuer {pursuer:?} appears more than once, again at ({}, {})",
        .position.row,
        .position.col
    )]
    DuplicatePursuer { pursuer: Pursuer, position: Position },
    #[error("Second capture marker found at ({}, {})", .position.row, .position.col)]
    DuplicateCapture { position: Position },
    #[error("Capture marker and player both present, at ({}, {})", .position.row, .position.col)]
    CaptureWithPlayer { position: Position },
}

/// Parses a level into a validated board.
pub fn parse_grid(text: &str) -> Result<State, LevelError> {
    let mut rows = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<CellCode>().map_err(|_| LevelError::Parse {
                    line: line_no + 1,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }

    let grid = Grid::from_rows(rows)?;
    validate(&grid)?;
    Ok(grid)
}

/// Checks that every code is known and that each agent appears at most once.
///
/// A live board has exactly one player. A finished board has exactly one
/// capture marker (88) in place of the player.
pub fn validate(grid: &State) -> Result<(), LevelError> {
    let mut player = None;
    let mut capture = None;
    let mut seen = [false; 4];

    for (position, code) in grid.enumerate() {
        match Cell::decode(*code) {
            None => return Err(LevelError::InvalidCode { code: *code, position }),
            Some(Cell::Player) => {
                if player.replace(position).is_some() {
                    return Err(LevelError::DuplicatePlayer { position });
                }
                if capture.is_some() {
                    return Err(LevelError::CaptureWithPlayer { position });
                }
            }
            Some(Cell::Capture) => {
                if capture.replace(position).is_some() {
                    return Err(LevelError::DuplicateCapture { position });
                }
                if player.is_some() {
                    return Err(LevelError::CaptureWithPlayer { position });
                }
            }
            Some(Cell::Pursuer { pursuer, .. }) => {
                let slot = &mut seen[pursuer.slot()];
                if *slot {
                    return Err(LevelError::DuplicatePursuer { pursuer, position });
                }
                *slot = true;
            }
            Some(_) => {}
        }
    }

    if player.is_none() && capture.is_none() {
        return Err(LevelError::MissingPlayer);
    }
    Ok(())
}
