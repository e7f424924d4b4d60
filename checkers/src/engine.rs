use crate::{
    Board, BoardError, Color, GameState, GameStatus, Move, MoveError, Piece, RuleSet, Variant,
};

/// The four diagonal directions as `(row, col)` steps.
pub const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// How a legal move gets from its source to its destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Slide,
    Jump { captured: (i8, i8) },
}

/// What happened to a piece after it was put down on its destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Landing {
    pub captured: Option<Piece>,
    pub promoted: bool,
    /// The piece has to keep capturing before the turn passes.
    pub continues: bool,
}

/// Facts about the whole turn that each single move is judged against.
struct TurnContext {
    any_jump: bool,
    /// Length of the longest capture chain, only computed when the rules
    /// force the maximum capture.
    longest_chain: usize,
}

/// The square `piece` would capture by jumping from `from` to `to`, if this
/// is a well-formed jump.
///
/// Ignores whose turn it is. A pawn or a non-flying king jumps exactly two
/// squares over an adjacent enemy; a flying king may jump any distance as
/// long as exactly one enemy piece and nothing else lies in between.
pub(crate) fn captured_square(
    board: &Board,
    rules: &RuleSet,
    piece: Piece,
    from: (i8, i8),
    to: (i8, i8),
) -> Option<(i8, i8)> {
    if !board.is_playable_position(to.0, to.1) || board.get(to.0, to.1).is_some() {
        return None;
    }
    let (dr, dc) = (to.0 - from.0, to.1 - from.1);
    let distance = dr.abs();
    if distance != dc.abs() || distance < 2 {
        return None;
    }
    let step = (dr.signum(), dc.signum());
    if !(piece.is_king() && rules.can_kings_fly) {
        if distance != 2 {
            return None;
        }
        if !piece.is_king() && step.0 != piece.color.forward() && !rules.can_pawns_jump_backwards {
            return None;
        }
    }
    let mut captured = None;
    for i in 1..distance {
        let (row, col) = (from.0 + step.0 * i, from.1 + step.1 * i);
        if let Some(other) = board.get(row, col) {
            if other.color == piece.color || captured.is_some() {
                return None;
            }
            captured = Some((row, col));
        }
    }
    captured
}

/// Is this a well-formed non-capturing move for `piece`?
pub(crate) fn is_slide(
    board: &Board,
    rules: &RuleSet,
    piece: Piece,
    from: (i8, i8),
    to: (i8, i8),
) -> bool {
    if !board.is_playable_position(to.0, to.1) || board.get(to.0, to.1).is_some() {
        return false;
    }
    let (dr, dc) = (to.0 - from.0, to.1 - from.1);
    let distance = dr.abs();
    if distance != dc.abs() || distance == 0 {
        return false;
    }
    if !piece.is_king() {
        return dr == piece.color.forward();
    }
    if distance == 1 {
        return true;
    }
    let step = (dr.signum(), dc.signum());
    rules.can_kings_fly
        && (1..distance).all(|i| board.get(from.0 + step.0 * i, from.1 + step.1 * i).is_none())
}

/// All squares reachable along the diagonals from `from`, nearest first.
fn diagonal_targets(board: &Board, from: (i8, i8)) -> impl Iterator<Item = (i8, i8)> + '_ {
    DIAGONALS.into_iter().flat_map(move |(dr, dc)| {
        (1..board.size())
            .map(move |i| (from.0 + dr * i, from.1 + dc * i))
            .take_while(|&(row, col)| board.is_in_bounds(row, col))
    })
}

/// Every jump the piece on `from` could make, as `(destination, captured)`.
pub(crate) fn jumps_from(
    board: &Board,
    rules: &RuleSet,
    from: (i8, i8),
    piece: Piece,
) -> Vec<((i8, i8), (i8, i8))> {
    diagonal_targets(board, from)
        .filter_map(|to| captured_square(board, rules, piece, from, to).map(|cap| (to, cap)))
        .collect()
}

fn has_jump_from(board: &Board, rules: &RuleSet, from: (i8, i8), piece: Piece) -> bool {
    diagonal_targets(board, from).any(|to| captured_square(board, rules, piece, from, to).is_some())
}

/// Moves a piece and resolves everything that follows from where it lands:
/// the capture, crowning, and whether the capture sequence goes on.
///
/// A pawn reaching its promotion row by sliding is crowned. One reaching it
/// by jumping is crowned and stops, except that
/// - in Russian checkers it is crowned and keeps capturing as a king, and
/// - where pawns capture backwards, it passes through uncrowned if it can
///   keep capturing as a pawn.
pub(crate) fn land(
    board: &mut Board,
    rules: &RuleSet,
    from: (i8, i8),
    to: (i8, i8),
    kind: MoveKind,
) -> Result<Landing, BoardError> {
    let piece = board.relocate_piece(from, to)?;
    let captured = match kind {
        MoveKind::Slide => None,
        MoveKind::Jump { captured } => board.remove_piece(captured.0, captured.1)?,
    };
    let reaches_promotion_row =
        !piece.is_king() && to.0 == piece.color.promotion_row(board.size());

    let mut promoted = false;
    let continues = match kind {
        MoveKind::Slide => {
            promoted = reaches_promotion_row;
            false
        }
        MoveKind::Jump { .. } if !reaches_promotion_row => has_jump_from(board, rules, to, piece),
        MoveKind::Jump { .. } if rules.variant == Variant::Russian => {
            promoted = true;
            has_jump_from(board, rules, to, piece.crowned())
        }
        MoveKind::Jump { .. } => {
            let passes_through =
                rules.can_pawns_jump_backwards && has_jump_from(board, rules, to, piece);
            promoted = !passes_through;
            passes_through
        }
    };
    if promoted {
        board.replace_piece(to.0, to.1, piece.crowned())?;
    }
    Ok(Landing {
        captured,
        promoted,
        continues,
    })
}

/// The number of pieces captured by the longest sequence that starts with
/// the given jump.
fn chain_length(
    board: &Board,
    rules: &RuleSet,
    from: (i8, i8),
    to: (i8, i8),
    captured: (i8, i8),
) -> usize {
    let mut board = board.clone();
    let Ok(landing) = land(&mut board, rules, from, to, MoveKind::Jump { captured }) else {
        return 0;
    };
    if !landing.continues {
        return 1;
    }
    let Some(piece) = board.get(to.0, to.1) else {
        return 1;
    };
    1 + jumps_from(&board, rules, to, piece)
        .into_iter()
        .map(|(next, cap)| chain_length(&board, rules, to, next, cap))
        .max()
        .unwrap_or(0)
}

/// The squares of the pieces that may move this turn.
fn movable_sources(state: &GameState) -> Vec<(i8, i8)> {
    match state.jump_in_progress {
        Some(active) => vec![active],
        None => state
            .board
            .pieces_of(state.turn())
            .map(|(row, col, _)| (row, col))
            .collect(),
    }
}

fn turn_context(state: &GameState) -> TurnContext {
    let (board, rules) = (&state.board, &state.rules);
    let mut any_jump = false;
    let mut longest_chain = 0;
    for from in movable_sources(state) {
        let Some(piece) = board.get(from.0, from.1) else {
            continue;
        };
        if rules.ranks_captures() {
            for (to, captured) in jumps_from(board, rules, from, piece) {
                any_jump = true;
                longest_chain = longest_chain.max(chain_length(board, rules, from, to, captured));
            }
        } else if has_jump_from(board, rules, from, piece) {
            any_jump = true;
            break;
        }
    }
    TurnContext {
        any_jump,
        longest_chain,
    }
}

fn classify(
    state: &GameState,
    ctx: &TurnContext,
    from: (i8, i8),
    to: (i8, i8),
) -> Option<MoveKind> {
    if state.status != GameStatus::InProgress {
        return None;
    }
    let (board, rules) = (&state.board, &state.rules);
    let piece = board.get(from.0, from.1).filter(|p| p.color == state.turn())?;
    if state.jump_in_progress.is_some_and(|active| active != from) {
        return None;
    }

    if let Some(captured) = captured_square(board, rules, piece, from, to) {
        if rules.ranks_captures()
            && chain_length(board, rules, from, to, captured) < ctx.longest_chain
        {
            return None;
        }
        return Some(MoveKind::Jump { captured });
    }

    // Only jumps may continue a capture sequence, and a pending capture
    // rules out every slide.
    if state.jump_in_progress.is_some() || (rules.must_capture && ctx.any_jump) {
        return None;
    }
    is_slide(board, rules, piece, from, to).then_some(MoveKind::Slide)
}

/// Decides whether a move is legal, and what kind of move it is.
///
/// Coordinates outside the board or on unplayable squares are an
/// [`MoveError::InvalidPosition`]; anything the rules forbid is an
/// [`MoveError::IllegalMove`].
pub fn validate_move(
    state: &GameState,
    source_row: i8,
    source_col: i8,
    target_row: i8,
    target_col: i8,
) -> Result<MoveKind, MoveError> {
    for (row, col) in [(source_row, source_col), (target_row, target_col)] {
        if !state.board.is_playable_position(row, col) {
            return Err(MoveError::InvalidPosition { row, col });
        }
    }
    let (from, to) = ((source_row, source_col), (target_row, target_col));
    classify(state, &turn_context(state), from, to).ok_or(MoveError::IllegalMove { from, to })
}

/// Returns if a piece can move from the source to the target square, either
/// by sliding or by jumping, in the current state of the game.
///
/// This is a pure query. Malformed coordinates just give `false`; use
/// [`validate_move()`] to get a [`MoveError::InvalidPosition`] for them instead.
pub fn can_move(
    state: &GameState,
    source_row: i8,
    source_col: i8,
    target_row: i8,
    target_col: i8,
) -> bool {
    validate_move(state, source_row, source_col, target_row, target_col).is_ok()
}

/// Is this a well-formed slide for the player to move, ignoring whether a
/// capture is mandatory?
pub fn can_slide(state: &GameState, from: (i8, i8), to: (i8, i8)) -> bool {
    state
        .board
        .get(from.0, from.1)
        .filter(|piece| piece.color == state.turn())
        .is_some_and(|piece| is_slide(&state.board, &state.rules, piece, from, to))
}

/// Is this a well-formed jump for the player to move, ignoring how long a
/// capture chain it starts?
pub fn can_jump(state: &GameState, from: (i8, i8), to: (i8, i8)) -> bool {
    state
        .board
        .get(from.0, from.1)
        .filter(|piece| piece.color == state.turn())
        .is_some_and(|piece| captured_square(&state.board, &state.rules, piece, from, to).is_some())
}

/// Can the player to move capture anything this turn?
pub fn can_player_jump(state: &GameState) -> bool {
    turn_context(state).any_jump
}

/// All legal moves for the player to move.
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    let ctx = turn_context(state);
    movable_sources(state)
        .into_iter()
        .flat_map(|from| legal_targets(state, &ctx, from))
        .collect()
}

/// All legal moves of the piece on the given square.
pub fn legal_moves_from(state: &GameState, row: i8, col: i8) -> Vec<Move> {
    if !state.board.is_playable_position(row, col) {
        return Vec::new();
    }
    legal_targets(state, &turn_context(state), (row, col))
}

fn legal_targets(state: &GameState, ctx: &TurnContext, from: (i8, i8)) -> Vec<Move> {
    diagonal_targets(&state.board, from)
        .filter(|&to| classify(state, ctx, from, to).is_some())
        .map(|to| Move::new(from, to))
        .collect()
}

/// Returns if the piece on this square can slide or jump this turn, taking
/// into account whose turn it is and any capture in progress.
pub fn is_movable_piece(state: &GameState, row: i8, col: i8) -> bool {
    !legal_moves_from(state, row, col).is_empty()
}

/// Could the given side make any move at all if it were their turn?
///
/// Capture ranking is irrelevant here: if any capture exists, so does a
/// longest one.
pub(crate) fn has_any_move(board: &Board, rules: &RuleSet, color: Color) -> bool {
    board.pieces_of(color).any(|(row, col, piece)| {
        diagonal_targets(board, (row, col)).any(|to| {
            is_slide(board, rules, piece, (row, col), to)
                || captured_square(board, rules, piece, (row, col), to).is_some()
        })
    })
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::position;
    use crate::{new_game, Rank, AMERICAN, INTERNATIONAL, RUSSIAN};

    quickcheck! {
        fn can_move_agrees_with_legal_moves(state: GameState, coords: (u8, u8, u8, u8)) -> bool {
            let size = state.board().size() as u8;
            let (sr, sc, tr, tc) = (
                (coords.0 % size) as i8,
                (coords.1 % size) as i8,
                (coords.2 % size) as i8,
                (coords.3 % size) as i8,
            );
            let legal = legal_moves(&state);
            can_move(&state, sr, sc, tr, tc) == legal.contains(&Move::new((sr, sc), (tr, tc)))
        }

        fn can_move_is_pure(state: GameState) -> bool {
            let before = state.clone();
            let first: Vec<bool> = legal_moves(&before)
                .iter()
                .map(|mv| can_move(&state, mv.from.0, mv.from.1, mv.to.0, mv.to.1))
                .collect();
            let second: Vec<bool> = legal_moves(&before)
                .iter()
                .map(|mv| can_move(&state, mv.from.0, mv.from.1, mv.to.0, mv.to.1))
                .collect();
            first == second && first.iter().all(|&legal| legal) && state == before
        }

        fn pending_capture_forbids_slides(state: GameState) -> bool {
            if !(state.rules().must_capture && can_player_jump(&state)) {
                return true;
            }
            legal_moves(&state).iter().all(|mv| {
                matches!(
                    validate_move(&state, mv.from.0, mv.from.1, mv.to.0, mv.to.1),
                    Ok(MoveKind::Jump { .. })
                )
            })
        }

        fn movable_pieces_have_moves(state: GameState) -> bool {
            state.board().pieces().all(|(row, col, _)| {
                let has_moves = legal_moves(&state).iter().any(|mv| mv.from == (row, col));
                is_movable_piece(&state, row, col) == has_moves
            })
        }
    }

    #[test]
    fn opening_slides() {
        let state = new_game(0, "light", "dark");
        // Dark moves first in American checkers, forward is down.
        assert!(can_move(&state, 2, 1, 3, 2));
        assert!(can_move(&state, 2, 1, 3, 0));
        assert!(!can_move(&state, 2, 1, 1, 0));
        // Not light's turn yet.
        assert!(!can_move(&state, 5, 4, 4, 3));
        // Two squares is not a slide for a pawn.
        assert!(!can_move(&state, 2, 3, 4, 5));
        // Occupied destination.
        assert!(!can_move(&state, 1, 0, 2, 1));
        assert_eq!(legal_moves(&state).len(), 7);
    }

    #[test]
    fn invalid_positions_are_errors() {
        let state = new_game(0, "light", "dark");
        assert_eq!(
            validate_move(&state, 2, 1, 3, 3),
            Err(MoveError::InvalidPosition { row: 3, col: 3 })
        );
        assert_eq!(
            validate_move(&state, -1, 0, 0, 1),
            Err(MoveError::InvalidPosition { row: -1, col: 0 })
        );
        assert_eq!(
            validate_move(&state, 2, 1, 1, 0),
            Err(MoveError::IllegalMove {
                from: (2, 1),
                to: (1, 0)
            })
        );
        assert!(!can_move(&state, 20, 20, 21, 21));
        assert!(!is_movable_piece(&state, 100, -3));
    }

    #[test]
    fn capture_is_mandatory() {
        let state = position(
            &AMERICAN,
            &[
                "........", //
                "........",
                "...d....",
                "....l...",
                "........",
                "......l.",
            ],
            false,
        );
        assert!(can_player_jump(&state));
        assert!(can_move(&state, 2, 3, 4, 5));
        assert!(!can_move(&state, 2, 3, 3, 2));
        assert!(can_slide(&state, (2, 3), (3, 2)));
        assert_eq!(legal_moves(&state), vec![Move::new((2, 3), (4, 5))]);
    }

    #[test]
    fn pawns_jump_backwards_only_when_allowed() {
        let rows = [
            "........", //
            "........",
            "........",
            "....l...",
            ".....d..",
        ];
        let american = position(&AMERICAN, &rows, true);
        assert!(!can_jump(&american, (3, 4), (5, 6)));
        assert!(!can_player_jump(&american));
        assert!(can_move(&american, 3, 4, 2, 3));
        // Dark cannot capture upwards with a pawn either.
        let dark_to_move = position(&AMERICAN, &rows, false);
        assert!(!can_player_jump(&dark_to_move));

        let international = position(
            &INTERNATIONAL,
            &[
                "..........", //
                "..........",
                "..........",
                "....l.....",
                ".....d....",
            ],
            true,
        );
        assert!(can_move(&international, 3, 4, 5, 6));
        assert!(!can_move(&international, 3, 4, 2, 3));
    }

    #[test]
    fn kings_move_backwards() {
        let state = position(
            &AMERICAN,
            &[
                "........", //
                "........",
                "........",
                "....D...",
                "........",
                "........",
                "........",
                "l.......",
            ],
            false,
        );
        assert!(can_move(&state, 3, 4, 2, 3));
        assert!(can_move(&state, 3, 4, 4, 5));
        // American kings don't fly.
        assert!(!can_move(&state, 3, 4, 1, 2));
        assert_eq!(legal_moves(&state).len(), 4);
    }

    #[test]
    fn flying_kings() {
        let state = position(
            &INTERNATIONAL,
            &[
                ".d........", //
                "..........",
                "..........",
                "..........",
                "..........",
                "..........",
                "..........",
                "..........",
                ".L........",
                "..........",
            ],
            true,
        );
        assert!(can_move(&state, 8, 1, 1, 8));
        assert!(can_move(&state, 8, 1, 9, 0));
        assert_eq!(legal_moves(&state).len(), 11);

        let blocked = position(
            &INTERNATIONAL,
            &[
                ".d........", //
                "..........",
                "..........",
                "..........",
                ".....l....",
                "..........",
                "..........",
                "..........",
                ".L........",
                "..........",
            ],
            true,
        );
        assert!(can_move(&blocked, 8, 1, 5, 4));
        assert!(!can_move(&blocked, 8, 1, 3, 6));
    }

    #[test]
    fn flying_king_captures_from_a_distance() {
        let state = position(
            &INTERNATIONAL,
            &[
                "..........", //
                "..........",
                "..........",
                "......d...",
                "..........",
                "..........",
                "..........",
                "..........",
                ".L........",
                "..........",
            ],
            true,
        );
        // No slides while there is something to capture.
        assert!(!can_move(&state, 8, 1, 7, 2));
        assert!(can_move(&state, 8, 1, 2, 7));
        assert!(can_move(&state, 8, 1, 0, 9));
        assert!(!can_move(&state, 8, 1, 3, 6));
        assert_eq!(legal_moves(&state).len(), 3);
    }

    #[test]
    fn cannot_jump_two_pieces_at_once() {
        let state = position(
            &INTERNATIONAL,
            &[
                "..........", //
                "..........",
                "..........",
                "......d...",
                ".....d....",
                "..........",
                "..........",
                "..........",
                ".L........",
                "..........",
            ],
            true,
        );
        assert!(!can_jump(&state, (8, 1), (2, 7)));
        assert!(!can_jump(&state, (8, 1), (3, 6)));
        assert!(!can_player_jump(&state));
        assert!(can_move(&state, 8, 1, 5, 4));
    }

    #[test]
    fn maximum_capture_is_enforced() {
        // Light can take one piece to the left, or two to the right.
        let state = position(
            &INTERNATIONAL,
            &[
                "..........", //
                "..........",
                "..........",
                "..........",
                ".......d..",
                "..........",
                "...d.d....",
                "....l.....",
            ],
            true,
        );
        assert!(can_jump(&state, (7, 4), (5, 2)));
        assert!(!can_move(&state, 7, 4, 5, 2));
        assert!(can_move(&state, 7, 4, 5, 6));
        assert_eq!(legal_moves(&state), vec![Move::new((7, 4), (5, 6))]);
    }

    #[test]
    fn american_takes_any_capture() {
        let state = position(
            &AMERICAN,
            &[
                "........", //
                "........",
                "........",
                "........",
                ".....d..",
                "........",
                ".d.d....",
                "..l.....",
            ],
            true,
        );
        assert!(can_move(&state, 7, 2, 5, 0));
        assert!(can_move(&state, 7, 2, 5, 4));
        assert!(!can_move(&state, 7, 2, 6, 1));
    }

    #[test]
    fn landing_on_promotion_row() {
        let mut board = position(&AMERICAN, &["........", "..d.....", ".l......"], true)
            .board()
            .clone();
        let landing = land(
            &mut board,
            &AMERICAN,
            (2, 1),
            (0, 3),
            MoveKind::Jump { captured: (1, 2) },
        )
        .unwrap();
        assert!(landing.promoted);
        assert!(!landing.continues);
        assert_eq!(landing.captured, Some(Piece::DARK_PAWN));
        assert_eq!(board.get(0, 3), Some(Piece::LIGHT_KING));
        assert_eq!(board.get(1, 2), None);

        // A Russian pawn is crowned and keeps capturing as a flying king.
        let mut board = position(
            &RUSSIAN,
            &["........", "..d.d...", ".l......", "......d."],
            true,
        )
        .board()
        .clone();
        let landing = land(
            &mut board,
            &RUSSIAN,
            (2, 1),
            (0, 3),
            MoveKind::Jump { captured: (1, 2) },
        )
        .unwrap();
        assert!(landing.promoted);
        assert!(landing.continues);
        assert_eq!(board.get(0, 3).map(|p| p.rank), Some(Rank::King));
    }

    #[test]
    fn passing_through_promotion_row() {
        let rows = [
            "..........", //
            "..d.d.....",
            ".l........",
        ];
        let mut board = position(&INTERNATIONAL, &rows, true).board().clone();
        let landing = land(
            &mut board,
            &INTERNATIONAL,
            (2, 1),
            (0, 3),
            MoveKind::Jump { captured: (1, 2) },
        )
        .unwrap();
        assert!(!landing.promoted);
        assert!(landing.continues);
        assert_eq!(board.get(0, 3), Some(Piece::LIGHT_PAWN));
    }

    #[test]
    fn has_any_move_detects_blocked_sides() {
        let open = position(
            &AMERICAN,
            &[
                "........", //
                "........",
                "........",
                "........",
                "........",
                "d.......",
                ".d.d....",
                "..l.....",
            ],
            false,
        );
        assert!(has_any_move(open.board(), open.rules(), Color::Light));
        let blocked = position(
            &AMERICAN,
            &[
                "........", //
                "........",
                "........",
                "........",
                "........",
                "d...d...",
                ".d.d....",
                "..l.....",
            ],
            false,
        );
        assert!(!has_any_move(blocked.board(), blocked.rules(), Color::Light));
        assert!(has_any_move(blocked.board(), blocked.rules(), Color::Dark));
    }
}
