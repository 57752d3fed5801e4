//! Self-play CLI
//!
//! Plays a match between two strategies and writes the games as JSON.

use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use tracing::info;

use chess_rules::ChessPosition;
use game_core::Notation;
use selfplay::{MatchConfig, MatchRunner, Player};
use uci_engine::{EngineSettings, StrategyKind};

fn print_usage() {
    println!("ML-chess self-play runner");
    println!();
    println!("Usage:");
    println!("  selfplay [options]");
    println!();
    println!("Options:");
    println!("  --config <path>      engine settings TOML shared by both players");
    println!("  --white <strategy>   first player: mcts | alphabeta (default mcts)");
    println!("  --black <strategy>   second player: mcts | alphabeta (default alphabeta)");
    println!("  --games, -g <n>      number of games (default 2)");
    println!("  --max-moves <n>      plies per game before a draw is declared (default 200)");
    println!("  --movetime <ms>      time per move for both players");
    println!("  --depth, -d <n>      alpha-beta search depth");
    println!("  --fen <fen>          start position (default: standard start)");
    println!("  --fixed-colors       do not swap colours between games");
    println!("  --out, -o <path>     write the match summary as JSON");
    println!();
    println!("Examples:");
    println!("  selfplay --white mcts --black alphabeta --games 4 --movetime 500");
    println!("  selfplay --config engine.toml --depth 4 --out results.json");
}

struct Args {
    config: Option<PathBuf>,
    white: StrategyKind,
    black: StrategyKind,
    games: u32,
    max_moves: u32,
    movetime: Option<u64>,
    depth: Option<u32>,
    fen: Option<String>,
    alternate_colors: bool,
    out: Option<PathBuf>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            config: None,
            white: StrategyKind::Mcts,
            black: StrategyKind::Alphabeta,
            games: 2,
            max_moves: 200,
            movetime: None,
            depth: None,
            fen: None,
            alternate_colors: true,
            out: None,
        }
    }
}

fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{flag} needs a value"))
}

fn parsed<T: FromStr>(args: &[String], i: &mut usize, flag: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    let raw = value(args, i, flag)?;
    raw.parse()
        .map_err(|e| anyhow!("invalid value '{raw}' for {flag}: {e}"))
}

/// `None` when usage was printed.
fn parse_args(args: &[String]) -> Result<Option<Args>> {
    let mut parsed_args = Args::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => parsed_args.config = Some(value(args, &mut i, "--config")?.into()),
            "--white" => parsed_args.white = parsed(args, &mut i, "--white")?,
            "--black" => parsed_args.black = parsed(args, &mut i, "--black")?,
            "--games" | "-g" => parsed_args.games = parsed(args, &mut i, "--games")?,
            "--max-moves" => parsed_args.max_moves = parsed(args, &mut i, "--max-moves")?,
            "--movetime" => parsed_args.movetime = Some(parsed(args, &mut i, "--movetime")?),
            "--depth" | "-d" => parsed_args.depth = Some(parsed(args, &mut i, "--depth")?),
            "--fen" => parsed_args.fen = Some(value(args, &mut i, "--fen")?.to_string()),
            "--fixed-colors" => parsed_args.alternate_colors = false,
            "--out" | "-o" => parsed_args.out = Some(value(args, &mut i, "--out")?.into()),
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            other => {
                print_usage();
                bail!("unknown argument '{other}'");
            }
        }
        i += 1;
    }

    Ok(Some(parsed_args))
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// One player from the shared settings with its own strategy. `seed_offset`
/// keeps two randomized players from searching identically.
fn build_player(
    settings: &EngineSettings,
    kind: StrategyKind,
    args: &Args,
    label: &str,
    seed_offset: u64,
) -> Result<Player> {
    let mut settings = settings.clone();
    settings.strategy = kind;
    settings.seed = settings.seed.wrapping_add(seed_offset);

    let mut config = settings.engine_config()?;
    if let Some(ms) = args.movetime {
        config.time_limit_per_move = Duration::from_millis(ms);
    }
    if let Some(depth) = args.depth {
        config.max_depth = depth;
    }
    config.validate()?;

    let strategy = settings
        .build_strategy()
        .with_context(|| format!("failed to build {label} player"))?;
    Ok(Player::new(format!("{label} ({})", kind.as_str()), strategy, config))
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(args) = parse_args(&args)? else {
        return Ok(());
    };

    let settings = EngineSettings::load(args.config.as_deref()).context("failed to load settings")?;
    init_tracing(&settings.log_level);

    let start_position = match &args.fen {
        Some(fen) => ChessPosition::decode(fen)?,
        None => ChessPosition::startpos(),
    };

    let player1 = build_player(&settings, args.white, &args, "p1", 0)?;
    let player2 = build_player(&settings, args.black, &args, "p2", 1)?;

    info!(
        player1 = %player1.name,
        player2 = %player2.name,
        games = args.games,
        max_moves = args.max_moves,
        "starting match"
    );

    let runner = MatchRunner::new(MatchConfig {
        num_games: args.games,
        max_moves: args.max_moves,
        alternate_colors: args.alternate_colors,
        start_position,
    });
    let summary = runner.run_match(&player1, &player2);

    print!("{}", summary.report());

    if let Some(path) = &args.out {
        summary
            .save(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "results saved");
    }

    Ok(())
}
