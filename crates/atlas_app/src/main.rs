//! Headless CLI front-end: parses engine configuration from the command
//! line, scans the asset root, and runs the engine to completion.

use std::process::ExitCode;

use atlas_asset::AssetRegistry;
use atlas_engine::{Engine, EngineConfig, EngineMode};
use clap::{Parser, ValueEnum};

/// Runs the engine core headlessly for a fixed or unbounded number of ticks.
#[derive(Debug, Parser)]
#[command(name = "atlas_app", version, about)]
struct Cli {
    /// Runtime role to boot the engine in.
    #[arg(long, value_enum, default_value = "client")]
    mode: Mode,

    /// Root directory to scan for `.atlas`/`.atlasb` assets.
    #[arg(long, default_value = "assets")]
    asset_root: String,

    /// Scheduler tick rate in Hz.
    #[arg(long, default_value_t = 30)]
    tick_rate: u32,

    /// Stop after this many ticks. `0` runs until interrupted.
    #[arg(long, default_value_t = 0)]
    max_ticks: u64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Editor,
    Client,
    Server,
}

impl From<Mode> for EngineMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Editor => EngineMode::Editor,
            Mode::Client => EngineMode::Client,
            Mode::Server => EngineMode::Server,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
            |_| tracing_subscriber::EnvFilter::new("info"),
        ))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "atlas_app exited with an error");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut registry = AssetRegistry::new();
    registry.scan(&cli.asset_root);
    tracing::info!(
        asset_root = %cli.asset_root,
        asset_count = registry.count(),
        "asset registry scanned"
    );

    let config = EngineConfig {
        mode: cli.mode.into(),
        asset_root: cli.asset_root,
        tick_rate: cli.tick_rate,
        max_ticks: cli.max_ticks,
    };

    let mut engine = Engine::new(config);
    engine.init_core();
    engine.init_render();
    engine.init_ui();
    engine.init_ecs();
    engine.init_networking();
    engine.init_editor();

    engine.run();
    engine.shutdown();
    Ok(())
}
