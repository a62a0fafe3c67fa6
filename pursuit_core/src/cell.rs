//! Packed integer encoding of cell contents.
//!
//! The low decimal digit is the coin bit; the tens digit, when in `2..=5`,
//! names the pursuer standing on the cell.

use serde::{Deserialize, Serialize};

/// One packed cell value.
pub type CellCode = u8;

pub const IMPASSABLE: CellCode = 99;
pub const EMPTY: CellCode = 10;
pub const COIN: CellCode = 11;
pub const PLAYER: CellCode = 77;
pub const CAPTURE: CellCode = 88;

/// Identity of one of the four pursuers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pursuer {
    Blue = 2,
    Yellow = 3,
    Green = 4,
    Red = 5,
}

impl Pursuer {
    /// Pursuers in the order they react within a transition.
    pub const ALL: [Pursuer; 4] = [Pursuer::Blue, Pursuer::Yellow, Pursuer::Green, Pursuer::Red];

    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    pub const fn from_id(id: u8) -> Option<Pursuer> {
        match id {
            2 => Some(Pursuer::Blue),
            3 => Some(Pursuer::Yellow),
            4 => Some(Pursuer::Green),
            5 => Some(Pursuer::Red),
            _ => None,
        }
    }

    /// Code for this pursuer standing on a cell, with or without a coin beneath.
    #[inline]
    pub const fn code(self, on_coin: bool) -> CellCode {
        self.id() * 10 + on_coin as u8
    }

    /// Slot of this pursuer in per-pursuer arrays.
    #[inline]
    pub(crate) const fn slot(self) -> usize {
        (self.id() - 2) as usize
    }
}

#[inline]
pub const fn is_wall(code: CellCode) -> bool {
    code == IMPASSABLE
}

#[inline]
pub const fn is_empty(code: CellCode) -> bool {
    code == EMPTY
}

#[inline]
pub const fn is_coin(code: CellCode) -> bool {
    code == COIN
}

/// True for a loose coin or a pursuer standing on one.
#[inline]
pub const fn is_coin_bearing(code: CellCode) -> bool {
    code % 10 == 1
}

/// Returns the pursuer occupying a cell, if any.
pub const fn pursuer_id_of(code: CellCode) -> Option<Pursuer> {
    if code % 10 > 1 {
        return None;
    }
    Pursuer::from_id(code / 10)
}

#[inline]
pub const fn is_pursuer(code: CellCode) -> bool {
    pursuer_id_of(code).is_some()
}

#[inline]
pub const fn is_player(code: CellCode) -> bool {
    code == PLAYER
}

#[inline]
pub const fn is_capture(code: CellCode) -> bool {
    code == CAPTURE
}

/// True if `code` belongs to the encoding scheme.
pub const fn is_valid_code(code: CellCode) -> bool {
    matches!(code, IMPASSABLE | EMPTY | COIN | PLAYER | CAPTURE) || is_pursuer(code)
}

/// Decoded view of a cell code.
///
/// Game rules work on raw codes; this is for validation and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Wall,
    Empty,
    Coin,
    Pursuer { pursuer: Pursuer, on_coin: bool },
    Player,
    Capture,
}

impl Cell {
    pub fn decode(code: CellCode) -> Option<Cell> {
        match code {
            IMPASSABLE => Some(Cell::Wall),
            EMPTY => Some(Cell::Empty),
            COIN => Some(Cell::Coin),
            PLAYER => Some(Cell::Player),
            CAPTURE => Some(Cell::Capture),
            other => pursuer_id_of(other).map(|pursuer| Cell::Pursuer {
                pursuer,
                on_coin: is_coin_bearing(other),
            }),
        }
    }

    pub fn encode(self) -> CellCode {
        match self {
            Cell::Wall => IMPASSABLE,
            Cell::Empty => EMPTY,
            Cell::Coin => COIN,
            Cell::Pursuer { pursuer, on_coin } => pursuer.code(on_coin),
            Cell::Player => PLAYER,
            Cell::Capture => CAPTURE,
        }
    }
}
