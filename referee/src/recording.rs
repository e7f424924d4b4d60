use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use checkers::{GameState, GameStatus, Move, Variant};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Writes every finished game into its own numbered JSON file.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    moves: Vec<Move>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            moves: Vec::new(),
        })
    }

    pub fn store_move(&mut self, played: Move) {
        self.moves.push(played);
    }

    /// Forgets the moves stored since the last recording was written.
    pub fn discard_game(&mut self) {
        self.moves.clear();
    }

    /// Writes `game_NNNNNN.json` with the moves stored since the last call.
    pub fn write_game_recording(&mut self, final_state: &GameState) -> anyhow::Result<PathBuf> {
        let recording = GameRecording {
            variant: final_state.rules().variant,
            light: String::from(final_state.light_player()),
            dark: String::from(final_state.dark_player()),
            moves: std::mem::take(&mut self.moves),
            status: final_state.status(),
        };
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(writer, &recording)?;
        debug!(path = %filepath.display(), moves = recording.moves.len(), "Recorded game");
        self.num += 1;
        Ok(filepath)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecording {
    pub variant: Variant,
    pub light: String,
    pub dark: String,
    pub moves: Vec<Move>,
    pub status: GameStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_numbered_files() {
        let dir = crate::scratch_directory("recording");
        let mut recorder = Recorder::new(dir.clone()).unwrap();
        let mut state = checkers::new_game(0, "Alice", "Bob");
        state.play(2, 1, 3, 2).unwrap();
        recorder.store_move(Move::new((2, 1), (3, 2)));

        let first = recorder.write_game_recording(&state).unwrap();
        assert_eq!(first, dir.join("game_000001.json"));
        let recording: GameRecording =
            serde_json::from_str(&std::fs::read_to_string(&first).unwrap()).unwrap();
        assert_eq!(recording.variant, Variant::American);
        assert_eq!(recording.light, "Alice");
        assert_eq!(recording.moves, vec![Move::new((2, 1), (3, 2))]);
        assert_eq!(recording.status, GameStatus::InProgress);

        let second = recorder.write_game_recording(&state).unwrap();
        assert_eq!(second, dir.join("game_000002.json"));
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_directory() {
        assert!(Recorder::new(PathBuf::from("/this/does/not/exist")).is_err());
    }
}
