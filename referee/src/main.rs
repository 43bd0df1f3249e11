use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use referee::{load_cards, load_grid, play_game, PlayerChoice, Recorder};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use trios::{Color, Outcome};

#[derive(Parser)]
struct Args {
    /// Path to the grid file
    #[arg(long)]
    grid: PathBuf,

    /// Path to the card file
    #[arg(long)]
    cards: PathBuf,

    /// Who plays red
    #[arg(long, value_enum, default_value_t = PlayerChoice::MaxFlips)]
    red: PlayerChoice,

    /// Who plays blue
    #[arg(long, value_enum, default_value_t = PlayerChoice::MaxFlips)]
    blue: PlayerChoice,

    /// How many games to play
    #[arg(short, long, default_value_t = 1)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Shuffle the cards before dealing them
    #[arg(long, default_value_t = false)]
    shuffle: bool,

    /// Record the snapshots of each game as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default)]
struct MatchScore {
    /// Indexed like [`Color::ALL`].
    wins: [usize; 2],
    draws: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let layout = load_grid(&args.grid)?;
    let cards = load_cards(&args.cards)?;

    let mut match_score = MatchScore::default();
    let mut last_game = None;
    for game_idx in 0..args.num_games {
        let game = play_game(
            &mut rng,
            &layout,
            cards.clone(),
            [args.red, args.blue],
            args.shuffle,
            &mut recorder,
        )?;
        let outcome = game.winner()?;
        debug!(game_idx, %outcome);
        match outcome {
            Outcome::Winner(Color::Red) => match_score.wins[0] += 1,
            Outcome::Winner(Color::Blue) => match_score.wins[1] += 1,
            Outcome::Draw => match_score.draws += 1,
        }
        last_game = Some(game);
    }

    if let Some(game) = last_game {
        eprintln!("Final board of the last game:\n{}", game.board());
    }

    eprintln!(
        "End result:\n- {} wins by {} ({:?})\n- {} wins by {} ({:?})\n- {} draws",
        match_score.wins[0],
        Color::Red,
        args.red,
        match_score.wins[1],
        Color::Blue,
        args.blue,
        match_score.draws
    );

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
