use serde::{Deserialize, Serialize};

use crate::{GameStatus, Piece, Variant};

/// A single piece on the board, including coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupiedSquare {
    pub row: i8,
    pub col: i8,
    pub piece: Piece,
}

/// A single step by one piece: a slide, or one jump of a capture sequence.
///
/// Coordinates are `(row, col)` pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: (i8, i8),
    pub to: (i8, i8),
}

impl Move {
    pub fn new(from: (i8, i8), to: (i8, i8)) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}) -> ({}, {})",
            self.from.0, self.from.1, self.to.0, self.to.1
        )
    }
}

/// Everything a user interface needs to draw a game in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub variant: Variant,
    pub light_player: String,
    pub dark_player: String,
    pub light_turn: bool,
    /// The piece that has to continue capturing before the turn passes.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub jump_in_progress: Option<(i8, i8)>,
    pub status: GameStatus,
    pub squares: Vec<OccupiedSquare>,
}
