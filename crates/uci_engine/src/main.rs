use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use chess_rules::ChessPosition;
use uci_engine::{EngineSettings, UciSession};

/// Logs go to stderr; stdout belongs to the protocol.
fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    // Settings path: first argument, else ENGINE_CONFIG, else built-in defaults
    let path = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os("ENGINE_CONFIG"))
        .map(PathBuf::from);

    let settings = EngineSettings::load(path.as_deref()).context("failed to load settings")?;
    init_tracing(&settings.log_level);

    let config = settings.engine_config()?;
    let strategy = settings
        .build_strategy()
        .context("failed to build search strategy")?;

    info!(
        name = %settings.name,
        strategy = strategy.kind().as_str(),
        evaluator = ?settings.evaluator,
        time_limit_ms = config.time_limit_per_move.as_millis() as u64,
        "engine ready"
    );

    let mut session: UciSession<ChessPosition> =
        UciSession::new(settings.name, settings.author, strategy, config);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    session.run(stdin.lock(), &mut stdout)?;

    info!("engine exiting");
    Ok(())
}
