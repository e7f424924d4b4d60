/// The error type for raw [`Board`](crate::Board) queries and mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardError {
    /// Off the board, or on a square of the unplayed checker color.
    InvalidPosition { row: i8, col: i8 },
    OccupiedDestination { row: i8, col: i8 },
    EmptySquare { row: i8, col: i8 },
}

impl std::error::Error for BoardError {}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::InvalidPosition { row, col } => {
                write!(f, "({}, {}) is not a playable square on this board", row, col)
            }
            BoardError::OccupiedDestination { row, col } => {
                write!(f, "Tried to put a piece on ({}, {}), which is occupied", row, col)
            }
            BoardError::EmptySquare { row, col } => {
                write!(f, "There is no piece on ({}, {})", row, col)
            }
        }
    }
}

/// The error type for playing a move.
///
/// Only [`MoveError::IllegalMove`] is an expected outcome; the other kinds
/// mean the caller passed garbage or the board was corrupted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveError {
    InvalidPosition { row: i8, col: i8 },
    /// The coordinates are fine, but the rules, the turn or an unfinished
    /// capture sequence forbid this move.
    IllegalMove { from: (i8, i8), to: (i8, i8) },
    OccupiedDestination { row: i8, col: i8 },
    EmptySquare { row: i8, col: i8 },
}

impl std::error::Error for MoveError {}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::InvalidPosition { row, col } => {
                write!(f, "({}, {}) is not a playable square on this board", row, col)
            }
            MoveError::IllegalMove { from, to } => write!(
                f,
                "Moving from ({}, {}) to ({}, {}) is not allowed in this position",
                from.0, from.1, to.0, to.1
            ),
            MoveError::OccupiedDestination { row, col } => {
                write!(f, "Tried to put a piece on ({}, {}), which is occupied", row, col)
            }
            MoveError::EmptySquare { row, col } => {
                write!(f, "There is no piece on ({}, {})", row, col)
            }
        }
    }
}

impl From<BoardError> for MoveError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::InvalidPosition { row, col } => MoveError::InvalidPosition { row, col },
            BoardError::OccupiedDestination { row, col } => {
                MoveError::OccupiedDestination { row, col }
            }
            BoardError::EmptySquare { row, col } => MoveError::EmptySquare { row, col },
        }
    }
}
