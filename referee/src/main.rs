use std::path::PathBuf;

use checkers::{Color, Variant};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use referee::{play_random_game, replay_game, GameConfig, GameResult, PlayerRecords, Recorder};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Update the win/loss/tie counters in this JSON file
    #[arg(short, long, global = true)]
    players: Option<PathBuf>,

    /// Record the games as JSON files into this directory
    #[arg(short, long, global = true)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info", global = true)]
    log_level: LevelFilter,
}

#[derive(Subcommand)]
enum Command {
    /// Check and play out the moves of recorded games
    Replay {
        /// Path to the game JSON files
        #[clap(num_args(1..), required = true)]
        game_files: Vec<PathBuf>,
    },
    /// Let two players that pick random legal moves play each other
    Random {
        /// Variant name or numeric identifier
        #[arg(short, long, default_value = "american")]
        variant: Variant,

        /// How many games to play
        #[arg(short, long, default_value_t = 100)]
        num_games: usize,

        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Default)]
struct Score {
    light_wins: usize,
    dark_wins: usize,
    draws: usize,
    unfinished: usize,
    illegal_moves: usize,
}

impl Score {
    fn add(&mut self, game_idx: usize, result: &GameResult) {
        match result {
            GameResult::WonByPlayer { color } => {
                debug!(winner = %color, game_idx);
                match color {
                    Color::Light => self.light_wins += 1,
                    Color::Dark => self.dark_wins += 1,
                }
            }
            GameResult::Draw => {
                debug!(game_idx, "Draw");
                self.draws += 1;
            }
            GameResult::Unfinished => {
                debug!(game_idx, "Unfinished");
                self.unfinished += 1;
            }
            GameResult::IllegalMoveByPlayer { color, err } => {
                info!(player = %color, game_idx, "Illegal move by player");
                let mut err_dyn = err as &dyn std::error::Error;
                while let Some(src_err) = err_dyn.source() {
                    info!("{}", err_dyn);
                    err_dyn = src_err;
                }
                info!("{}", err_dyn);
                self.illegal_moves += 1;
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let mut recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let mut records = match &args.players {
        Some(path) => Some(PlayerRecords::load(path)?),
        None => None,
    };

    let mut score = Score::default();
    match args.command {
        Command::Replay { game_files } => {
            for (game_idx, path) in game_files.iter().enumerate() {
                let config = GameConfig::load(path)?;
                let result = replay_game(&config, &mut recorder)?;
                score.add(game_idx, &result);
                if let Some(records) = &mut records {
                    records.record_result(&config.light, &config.dark, result.final_status());
                }
            }
        }
        Command::Random {
            variant,
            num_games,
            seed,
        } => {
            // Get a random seed
            let seed = seed.unwrap_or_else(rand::random);
            info!(seed, %variant);
            let mut rng = StdRng::seed_from_u64(seed);
            let (light, dark) = ("Random Light", "Random Dark");
            for game_idx in 0..num_games {
                let result =
                    play_random_game(&mut rng, variant.rules(), light, dark, &mut recorder)?;
                score.add(game_idx, &result);
                if let Some(records) = &mut records {
                    records.record_result(light, dark, result.final_status());
                }
            }
        }
    }

    eprintln!(
        "End result:\n- {} won by light\n- {} won by dark\n- {} draws\n- {} unfinished\n\
         - {} illegal moves",
        score.light_wins, score.dark_wins, score.draws, score.unfinished, score.illegal_moves
    );

    if let (Some(path), Some(records)) = (&args.players, &records) {
        records.save(path)?;
        for record in records.iter() {
            debug!(
                player = record.name,
                wins = record.wins,
                losses = record.losses,
                ties = record.ties
            );
        }
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
