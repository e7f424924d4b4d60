use std::io::{BufReader, BufWriter};
use std::path::Path;

use checkers::{Color, GameStatus};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The win/loss/tie record of one player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl PlayerRecord {
    pub fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
            ..Default::default()
        }
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

/// All known players, stored as a JSON list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerRecords {
    players: Vec<PlayerRecord>,
}

impl PlayerRecords {
    /// Reads the records, or starts with none if the file doesn't exist yet.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No player records yet");
            return Ok(Self::default());
        }
        let reader = BufReader::new(std::fs::File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let writer = BufWriter::new(std::fs::File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&PlayerRecord> {
        self.players.iter().find(|record| record.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter()
    }

    fn get_or_insert(&mut self, name: &str) -> &mut PlayerRecord {
        let idx = match self.players.iter().position(|record| record.name == name) {
            Some(idx) => idx,
            None => {
                self.players.push(PlayerRecord::new(name));
                self.players.len() - 1
            }
        };
        &mut self.players[idx]
    }

    /// Updates both players' counters from the final status of their game.
    /// Games still in progress are not counted.
    pub fn record_result(&mut self, light: &str, dark: &str, status: GameStatus) {
        match status {
            GameStatus::InProgress => {}
            GameStatus::Draw => {
                self.get_or_insert(light).ties += 1;
                self.get_or_insert(dark).ties += 1;
            }
            GameStatus::LightWins | GameStatus::DarkWins => {
                let (winner, loser) = if status.winner() == Some(Color::Light) {
                    (light, dark)
                } else {
                    (dark, light)
                };
                self.get_or_insert(winner).wins += 1;
                self.get_or_insert(loser).losses += 1;
            }
        }
    }
}
