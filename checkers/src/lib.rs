//! A rules engine for checkers (draughts) in ten national variants.
//!
//! Start a game with [`new_game()`], ask [`GameState::can_move()`] whether a
//! move is legal and play it with [`GameState::apply_move()`].

pub use board::*;
pub use engine::*;
pub use errors::*;
pub use game::*;
pub use piece::*;
pub use protocol_types::*;
pub use rules::*;
pub use victory::{evaluate, POOL_ENDGAME_MOVE_LIMIT};
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod engine;
mod errors;
mod game;
mod piece;
mod protocol_types;
mod rules;
mod victory;
mod visualization;
