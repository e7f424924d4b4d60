use checkers::{Color, GameState, GameStatus, RuleSet};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, trace};

use crate::config::GameConfig;
use crate::error::IllegalMove;
use crate::recording::Recorder;

/// Random games that take longer than this are abandoned.
pub const MAX_RANDOM_GAME_MOVES: usize = 1000;

#[derive(Debug)]
pub enum GameResult {
    WonByPlayer { color: Color },
    Draw,
    /// The moves ran out before the game was decided.
    Unfinished,
    IllegalMoveByPlayer { color: Color, err: IllegalMove },
}

impl GameResult {
    /// The status to put in the player records. A player who makes an
    /// illegal move forfeits the game.
    pub fn final_status(&self) -> GameStatus {
        match self {
            GameResult::WonByPlayer { color } => GameStatus::won_by(*color),
            GameResult::Draw => GameStatus::Draw,
            GameResult::Unfinished => GameStatus::InProgress,
            GameResult::IllegalMoveByPlayer { color, .. } => GameStatus::won_by(color.opponent()),
        }
    }
}

fn result_of(state: &GameState) -> GameResult {
    match state.status() {
        GameStatus::InProgress => GameResult::Unfinished,
        GameStatus::Draw => GameResult::Draw,
        GameStatus::LightWins => GameResult::WonByPlayer {
            color: Color::Light,
        },
        GameStatus::DarkWins => GameResult::WonByPlayer { color: Color::Dark },
    }
}

/// Plays the moves of a game file one by one.
///
/// Returns an error only when the game can't be set up or recorded, not
/// when an illegal move is played.
pub fn replay_game(
    config: &GameConfig,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    let rules = config.variant.rules()?;
    let mut state = GameState::new(rules, &config.light, &config.dark);
    debug!(variant = %rules.variant, light = config.light, dark = config.dark, "Replaying game");

    for (move_idx, &played) in config.moves.iter().enumerate() {
        let color = state.turn();
        let (from, to) = (played.from, played.to);
        match state.play(from.0, from.1, to.0, to.1) {
            Ok(outcome) => {
                trace!(move_idx, %played, ?outcome);
                if let Some(rec) = recorder {
                    rec.store_move(played);
                }
            }
            Err(err) => {
                if let Some(rec) = recorder {
                    rec.discard_game();
                }
                return Ok(GameResult::IllegalMoveByPlayer {
                    color,
                    err: IllegalMove {
                        move_idx,
                        played,
                        err,
                    },
                })
            }
        }
    }

    if let Some(rec) = recorder {
        rec.write_game_recording(&state)?;
    }
    Ok(result_of(&state))
}

/// Plays a game where both sides pick uniformly among their legal moves.
pub fn play_random_game(
    rng: &mut StdRng,
    rules: RuleSet,
    light: &str,
    dark: &str,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    let mut state = GameState::new(rules, light, dark);
    let mut num_moves = 0;
    while !state.status().is_over() && num_moves < MAX_RANDOM_GAME_MOVES {
        let legal_moves = state.legal_moves();
        let Some(&played) = legal_moves.choose(rng) else {
            anyhow::bail!("No legal move for {} in a game in progress", state.turn());
        };
        let (from, to) = (played.from, played.to);
        let outcome = state.play(from.0, from.1, to.0, to.1)?;
        trace!(num_moves, %played, ?outcome);
        if let Some(rec) = recorder {
            rec.store_move(played);
        }
        num_moves += 1;
    }
    debug!(num_moves, status = %state.status(), "Random game over");

    if let Some(rec) = recorder {
        rec.write_game_recording(&state)?;
    }
    Ok(result_of(&state))
}

#[cfg(test)]
mod tests {
    use checkers::{Move, MoveError, ALL_VARIANTS};
    use rand::SeedableRng;

    use super::*;
    use crate::config::VariantRef;

    fn config(moves: &[((i8, i8), (i8, i8))]) -> GameConfig {
        GameConfig {
            variant: VariantRef::Name(String::from("american")),
            light: String::from("Alice"),
            dark: String::from("Bob"),
            moves: moves.iter().map(|&(from, to)| Move::new(from, to)).collect(),
        }
    }

    #[test]
    fn replay_legal_opening() {
        let game = config(&[((2, 1), (3, 2)), ((5, 4), (4, 3)), ((3, 2), (5, 4))]);
        let result = replay_game(&game, &mut None).unwrap();
        assert!(matches!(result, GameResult::Unfinished));
        assert_eq!(result.final_status(), GameStatus::InProgress);
    }

    #[test]
    fn replay_illegal_move_forfeits() {
        // Dark has to capture on the third move.
        let game = config(&[((2, 1), (3, 2)), ((5, 4), (4, 3)), ((2, 5), (3, 4))]);
        let result = replay_game(&game, &mut None).unwrap();
        let GameResult::IllegalMoveByPlayer { color, err } = &result else {
            panic!("expected an illegal move, got {:?}", result);
        };
        assert_eq!(*color, Color::Dark);
        assert_eq!(err.move_idx, 2);
        assert_eq!(
            err.err,
            MoveError::IllegalMove {
                from: (2, 5),
                to: (3, 4)
            }
        );
        assert_eq!(result.final_status(), GameStatus::LightWins);
    }

    #[test]
    fn forfeited_game_is_not_recorded() {
        let dir = crate::scratch_directory("forfeit");
        let mut recorder = Some(Recorder::new(dir.clone()).unwrap());
        let forfeited = config(&[((2, 1), (3, 2)), ((5, 4), (4, 3)), ((2, 5), (3, 4))]);
        let result = replay_game(&forfeited, &mut recorder).unwrap();
        assert!(matches!(result, GameResult::IllegalMoveByPlayer { .. }));
        assert!(!dir.join("game_000001.json").exists());

        let game = config(&[((2, 1), (3, 0))]);
        replay_game(&game, &mut recorder).unwrap();
        let recording: crate::GameRecording = serde_json::from_str(
            &std::fs::read_to_string(dir.join("game_000001.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(recording.moves, vec![Move::new((2, 1), (3, 0))]);
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn random_games_terminate() {
        let mut rng = StdRng::seed_from_u64(7);
        for variant in ALL_VARIANTS {
            let result =
                play_random_game(&mut rng, variant.rules(), "Alice", "Bob", &mut None).unwrap();
            assert!(
                !matches!(result, GameResult::IllegalMoveByPlayer { .. }),
                "{}",
                variant
            );
        }
    }

    #[test]
    fn random_game_is_recorded() {
        let dir = crate::scratch_directory("random");
        let mut recorder = Some(Recorder::new(dir.clone()).unwrap());
        let mut rng = StdRng::seed_from_u64(1);
        let result =
            play_random_game(&mut rng, checkers::AMERICAN, "Alice", "Bob", &mut recorder).unwrap();
        let recording: crate::GameRecording = serde_json::from_str(
            &std::fs::read_to_string(dir.join("game_000001.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(recording.status, result.final_status());
        assert!(!recording.moves.is_empty());
        std::fs::remove_dir_all(dir).unwrap();
    }
}
