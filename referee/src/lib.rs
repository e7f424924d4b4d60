mod config;
mod error;
mod game;
mod player;
mod recording;
pub use config::*;
pub use error::*;
pub use game::*;
pub use player::*;
pub use recording::*;

#[cfg(test)]
pub(crate) fn scratch_directory(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("referee-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
