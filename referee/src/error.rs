use checkers::{Move, MoveError};

/// A move in a game file that the engine rejected.
#[derive(Debug)]
pub struct IllegalMove {
    /// Zero-based position in the list of moves
    pub move_idx: usize,
    pub played: Move,
    pub err: MoveError,
}

impl std::error::Error for IllegalMove {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.err)
    }
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Move number {} ({}) was rejected",
            self.move_idx + 1,
            self.played
        )
    }
}
