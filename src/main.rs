use anyhow::{Context, Result};
use checkers_core::engine::config::{Difficulty, EngineConfig, EvaluatorKind};
use checkers_core::engine::search::MinimaxEngine;
use checkers_core::logic::game::{GameState, GameStatus};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Plays a game of checkers between two engine players.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Board edge length; must be even and at least 4.
    #[arg(long)]
    size: Option<usize>,

    /// Search depth preset.
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,

    /// Explicit search depth, overrides `--difficulty`.
    #[arg(long)]
    depth: Option<u8>,

    #[arg(long, value_enum)]
    evaluator: Option<EvaluatorArg>,

    /// Shuffle root moves with this seed instead of taking the first best.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many turns even if the game is not decided.
    #[arg(long, default_value_t = 200)]
    max_turns: u32,

    /// JSON engine config; command line flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Normal,
    Difficult,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Normal => Self::Normal,
            DifficultyArg::Difficult => Self::Difficult,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EvaluatorArg {
    Heuristic,
    PieceCount,
}

impl From<EvaluatorArg> for EvaluatorKind {
    fn from(arg: EvaluatorArg) -> Self {
        match arg {
            EvaluatorArg::Heuristic => Self::Heuristic,
            EvaluatorArg::PieceCount => Self::PieceCount,
        }
    }
}

fn build_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            EngineConfig::load_from_json(&json)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    if let Some(size) = cli.size {
        config.board_size = size;
    }
    if let Some(difficulty) = cli.difficulty {
        config = config.with_difficulty(difficulty.into());
    }
    if let Some(depth) = cli.depth {
        config.depth_limit = depth;
    }
    if let Some(evaluator) = cli.evaluator {
        config.evaluator = evaluator.into();
    }
    if cli.seed.is_some() {
        config.shuffle_seed = cli.seed;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    // initialize tracing; library `log` records are forwarded too
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Arc::new(build_config(&cli)?);
    info!(
        "{}x{} board, depth {}, {:?} evaluator",
        config.board_size, config.board_size, config.depth_limit, config.evaluator
    );

    let mut game = GameState::from_config(&config)?;
    let mut engine = MinimaxEngine::new(Arc::clone(&config));
    let evaluator = config.build_evaluator();

    println!("{}", game.board);
    for turn in 1..=cli.max_turns {
        if game.status != GameStatus::Playing {
            break;
        }
        let player = game.turn;
        let outcome = game
            .play_engine_turn(&mut engine, evaluator.as_ref())
            .with_context(|| format!("engine failed on turn {turn} for {player}"))?;

        for (from, to) in &outcome.moves_played {
            println!("{turn:>3}. {player}: {from} -> {to}");
        }
        debug!(
            "turn {turn}: {} nodes in {} ms",
            outcome.stats.nodes, outcome.stats.time_ms
        );
    }
    println!("{}", game.board);

    match game.status {
        GameStatus::Won(winner) => println!("{winner} wins"),
        GameStatus::Draw => println!(
            "Draw: {} moves without a capture",
            game.moves_without_capture
        ),
        GameStatus::Playing => println!("Stopped after {} turns", cli.max_turns),
    }
    Ok(())
}
