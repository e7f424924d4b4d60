use serde::{Deserialize, Serialize};

use crate::engine::{self, land, MoveKind};
use crate::victory::{self, KingsEndgame};
use crate::{Board, BoardError, Color, GameSnapshot, Move, MoveError, OccupiedSquare, RuleSet};

pub const DEFAULT_PLAYER_NAME: &str = "Unnamed Player";

/// The state of a game as a whole.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    LightWins,
    DarkWins,
    Draw,
}

impl GameStatus {
    pub fn won_by(color: Color) -> Self {
        match color {
            Color::Light => GameStatus::LightWins,
            Color::Dark => GameStatus::DarkWins,
        }
    }

    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::LightWins => Some(Color::Light),
            GameStatus::DarkWins => Some(Color::Dark),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::LightWins => write!(f, "light wins"),
            GameStatus::DarkWins => write!(f, "dark wins"),
            GameStatus::Draw => write!(f, "draw"),
        }
    }
}

/// A game of checkers: the board, the rules, and whose turn it is.
///
/// The only way to change a game is to play a legal move, see
/// [`GameState::calculate()`]. Once the game is over, no move is legal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) rules: RuleSet,
    pub(crate) light_turn: bool,
    /// The piece that has to keep capturing before the turn passes.
    pub(crate) jump_in_progress: Option<(i8, i8)>,
    pub(crate) status: GameStatus,
    pub(crate) light_player: String,
    pub(crate) dark_player: String,
    pub(crate) endgame: Option<KingsEndgame>,
}

/// Summarizes the effects of playing a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub played: Move,
    pub captured: Option<(i8, i8)>,
    pub promoted: bool,
    /// False if the same piece has to continue capturing.
    pub turn_passed: bool,
    pub status: GameStatus,
}

pub struct MoveCalculation<'a> {
    /// This ties the planned board to the state it was planned from
    state: &'a GameState,
    board: Board,
    pub played: Move,
    pub kind: MoveKind,
    pub promoted: bool,
    /// Does the moved piece have to keep capturing?
    pub continues: bool,
}

/// Starts a new game with the rules of the given variant identifier.
///
/// Unknown identifiers get American rules, see [`resolve()`](crate::resolve).
pub fn new_game(variant_id: i32, light_player: &str, dark_player: &str) -> GameState {
    GameState::new(crate::resolve(variant_id), light_player, dark_player)
}

/// Plays a move on a copy of the game, leaving the original untouched.
pub fn apply_move(
    state: &GameState,
    source_row: i8,
    source_col: i8,
    target_row: i8,
    target_col: i8,
) -> Result<GameState, MoveError> {
    state.apply_move(source_row, source_col, target_row, target_col)
}

pub fn status(state: &GameState) -> GameStatus {
    state.status
}

impl GameState {
    /// Sets up the standard starting position.
    pub fn new(rules: RuleSet, light_player: &str, dark_player: &str) -> Self {
        Self {
            board: Board::new(&rules),
            rules,
            light_turn: rules.light_player_first,
            jump_in_progress: None,
            status: GameStatus::InProgress,
            light_player: String::from(light_player),
            dark_player: String::from(dark_player),
            endgame: None,
        }
    }

    /// Resumes a game from an arbitrary position.
    ///
    /// The status is evaluated right away, so a position where one side has
    /// already lost starts out finished.
    pub fn from_position(
        rules: RuleSet,
        squares: &[OccupiedSquare],
        light_turn: bool,
    ) -> Result<Self, BoardError> {
        let mut state = Self {
            board: Board::from_squares(&rules, squares)?,
            rules,
            light_turn,
            jump_in_progress: None,
            status: GameStatus::InProgress,
            light_player: String::from(DEFAULT_PLAYER_NAME),
            dark_player: String::from(DEFAULT_PLAYER_NAME),
            endgame: None,
        };
        state.endgame = victory::kings_endgame(&state.board, &state.rules);
        state.status = victory::evaluate(&state);
        Ok(state)
    }

    pub fn with_players(mut self, light_player: &str, dark_player: &str) -> Self {
        self.light_player = String::from(light_player);
        self.dark_player = String::from(dark_player);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn is_light_turn(&self) -> bool {
        self.light_turn
    }

    /// The side that moves next.
    pub fn turn(&self) -> Color {
        if self.light_turn {
            Color::Light
        } else {
            Color::Dark
        }
    }

    pub fn jump_in_progress(&self) -> Option<(i8, i8)> {
        self.jump_in_progress
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn light_player(&self) -> &str {
        &self.light_player
    }

    pub fn dark_player(&self) -> &str {
        &self.dark_player
    }

    pub fn player_name(&self, color: Color) -> &str {
        match color {
            Color::Light => &self.light_player,
            Color::Dark => &self.dark_player,
        }
    }

    /// See [`engine::can_move()`].
    pub fn can_move(
        &self,
        source_row: i8,
        source_col: i8,
        target_row: i8,
        target_col: i8,
    ) -> bool {
        engine::can_move(self, source_row, source_col, target_row, target_col)
    }

    /// See [`engine::is_movable_piece()`].
    pub fn is_movable_piece(&self, row: i8, col: i8) -> bool {
        engine::is_movable_piece(self, row, col)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        engine::legal_moves(self)
    }

    /// Checks a move and plans out its effects without changing the game.
    ///
    /// The returned struct has a method to actually apply these changes and
    /// get the next state of the game.
    pub fn calculate(
        &self,
        source_row: i8,
        source_col: i8,
        target_row: i8,
        target_col: i8,
    ) -> Result<MoveCalculation<'_>, MoveError> {
        let kind = engine::validate_move(self, source_row, source_col, target_row, target_col)?;
        let played = Move::new((source_row, source_col), (target_row, target_col));
        let mut board = self.board.clone();
        let landing = land(&mut board, &self.rules, played.from, played.to, kind)?;
        Ok(MoveCalculation {
            state: self,
            board,
            played,
            kind,
            promoted: landing.promoted,
            continues: landing.continues,
        })
    }

    /// Returns the game after playing the move. Nothing changes if the move
    /// is rejected.
    pub fn apply_move(
        &self,
        source_row: i8,
        source_col: i8,
        target_row: i8,
        target_col: i8,
    ) -> Result<GameState, MoveError> {
        Ok(self
            .calculate(source_row, source_col, target_row, target_col)?
            .execute())
    }

    /// Plays the move in place.
    pub fn play(
        &mut self,
        source_row: i8,
        source_col: i8,
        target_row: i8,
        target_col: i8,
    ) -> Result<MoveOutcome, MoveError> {
        let calculation = self.calculate(source_row, source_col, target_row, target_col)?;
        let (played, kind, promoted, continues) = (
            calculation.played,
            calculation.kind,
            calculation.promoted,
            calculation.continues,
        );
        *self = calculation.execute();
        Ok(MoveOutcome {
            played,
            captured: match kind {
                MoveKind::Slide => None,
                MoveKind::Jump { captured } => Some(captured),
            },
            promoted,
            turn_passed: !continues,
            status: self.status,
        })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            variant: self.rules.variant,
            light_player: self.light_player.clone(),
            dark_player: self.dark_player.clone(),
            light_turn: self.light_turn,
            jump_in_progress: self.jump_in_progress,
            status: self.status,
            squares: self.board.to_squares_vec(),
        }
    }
}

impl MoveCalculation<'_> {
    /// Apply the planned move and get the next state of the game.
    ///
    /// If the moved piece can keep capturing, it is marked as the piece that
    /// must continue and the turn stays. Otherwise the turn passes. The
    /// victory conditions are checked last.
    pub fn execute(self) -> GameState {
        let mover = self.state.turn();
        let turn_passed = !self.continues;
        let mut next = GameState {
            board: self.board,
            rules: self.state.rules,
            light_turn: self.state.light_turn != turn_passed,
            jump_in_progress: self.continues.then_some(self.played.to),
            status: self.state.status,
            light_player: self.state.light_player.clone(),
            dark_player: self.state.dark_player.clone(),
            endgame: self.state.endgame,
        };
        victory::update(&mut next, mover, turn_passed);
        next
    }
}
