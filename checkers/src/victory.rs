use crate::engine::has_any_move;
use crate::{Board, Color, GameState, GameStatus, Rank, RuleSet, VictoryCondition};

/// How many turns the side with three kings gets to beat a lone king in
/// pool checkers before the game is a draw.
pub const POOL_ENDGAME_MOVE_LIMIT: u8 = 13;

/// Tracks a pool checkers endgame of three kings against one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct KingsEndgame {
    pub strong: Color,
    /// Turns completed by the strong side since the endgame arose.
    pub moves: u8,
}

/// Decides whether the game is over, and who won.
///
/// A side that is out of moves is only judged once the turn has passed to
/// it, never in the middle of a capture sequence.
pub fn evaluate(state: &GameState) -> GameStatus {
    let (board, rules) = (&state.board, &state.rules);
    let blocked = if state.jump_in_progress.is_none() && !has_any_move(board, rules, state.turn())
    {
        Some(state.turn())
    } else {
        None
    };

    match rules.victory_condition {
        VictoryCondition::CaptureAll
        | VictoryCondition::PoolSpecial
        | VictoryCondition::RussianSpecial => {
            if let Some(status) = reduced_to(board, 0, false) {
                return status;
            }
            if let Some(side) = blocked {
                return GameStatus::won_by(side.opponent());
            }
            if state
                .endgame
                .is_some_and(|endgame| endgame.moves >= POOL_ENDGAME_MOVE_LIMIT)
            {
                return GameStatus::Draw;
            }
            GameStatus::InProgress
        }
        VictoryCondition::SuicideSpecial => reduced_to(board, 0, true)
            .or(blocked.map(GameStatus::won_by))
            .unwrap_or(GameStatus::InProgress),
        VictoryCondition::GhanaianSpecial => reduced_to(board, 1, false)
            .or(blocked.map(|side| GameStatus::won_by(side.opponent())))
            .unwrap_or(GameStatus::InProgress),
    }
}

/// The result when a side is down to `at_most` pieces. Normally that side
/// loses; with `loser_wins` it wins instead.
fn reduced_to(board: &Board, at_most: usize, loser_wins: bool) -> Option<GameStatus> {
    let light_out = board.count(Color::Light) <= at_most;
    let dark_out = board.count(Color::Dark) <= at_most;
    let side = match (light_out, dark_out) {
        (false, false) => return None,
        (true, true) => return Some(GameStatus::Draw),
        (true, false) => Color::Light,
        (false, true) => Color::Dark,
    };
    Some(if loser_wins {
        GameStatus::won_by(side)
    } else {
        GameStatus::won_by(side.opponent())
    })
}

/// The side with three kings, if the other side has nothing but one king.
pub(crate) fn three_kings_against_one(board: &Board) -> Option<Color> {
    let only_kings = |color: Color, n: usize| {
        board.count(color) == n && board.pieces_of(color).all(|(_, _, p)| p.rank == Rank::King)
    };
    [Color::Light, Color::Dark]
        .into_iter()
        .find(|&strong| only_kings(strong, 3) && only_kings(strong.opponent(), 1))
}

/// The endgame counter for a position that has just been set up.
pub(crate) fn kings_endgame(board: &Board, rules: &RuleSet) -> Option<KingsEndgame> {
    if rules.victory_condition != VictoryCondition::PoolSpecial {
        return None;
    }
    three_kings_against_one(board).map(|strong| KingsEndgame { strong, moves: 0 })
}

/// Updates the endgame counter and the status after `mover` played a move.
pub(crate) fn update(state: &mut GameState, mover: Color, turn_passed: bool) {
    state.endgame = match (state.endgame, kings_endgame(&state.board, &state.rules)) {
        (Some(previous), Some(current)) if previous.strong == current.strong => {
            let completed = turn_passed && mover == current.strong;
            Some(KingsEndgame {
                strong: current.strong,
                moves: previous.moves.saturating_add(u8::from(completed)),
            })
        }
        (_, current) => current,
    };
    state.status = evaluate(state);
}
