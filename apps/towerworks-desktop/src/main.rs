mod app;
mod error;
mod state;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use crate::app::TowerApp;
use crate::error::FatalError;

const DEFAULT_ASSETS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets");

#[derive(Parser)]
#[command(
    name = "towerworks-desktop",
    about = "Stack, unstack and orbit a tower of cubes"
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding `shaders/` and `author.png`
    #[arg(long, default_value = DEFAULT_ASSETS)]
    assets: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    tracing::info!("towerworks-desktop starting");

    match run(cli.assets) {
        Ok(()) => {
            tracing::info!("towerworks-desktop exited");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(assets: PathBuf) -> Result<(), FatalError> {
    let event_loop = EventLoop::new()?;
    let mut app = TowerApp::new(assets);
    event_loop.run_app(&mut app)?;
    app.into_result()
}
