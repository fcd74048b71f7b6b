//! Tic-Tac-Toe GUI
//!
//! Play against the computer or another player on a 3×3 or 4×4 board.

use std::path::PathBuf;

use clap::Parser;
use tictactoe::ui::{GameMode, TicTacToeApp};
use tictactoe::AppConfig;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tictactoe", about = "N×N Tic-Tac-Toe against a minimax computer")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Skip the mode menu
    #[arg(short, long, value_enum)]
    mode: Option<GameMode>,

    /// Skip the size menu
    #[arg(short, long)]
    size: Option<usize>,
}

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tictactoe=debug")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path).unwrap_or_else(|err| {
            warn!(%err, "falling back to default config");
            AppConfig::default()
        }),
        None => AppConfig::default(),
    };

    if let Some(mode) = cli.mode {
        config.game.mode = Some(mode);
    }
    if let Some(size) = cli.size {
        config.game.size = Some(size);
    }
    if let Err(err) = config.validate() {
        warn!(%err, "ignoring invalid game settings");
        config.game.size = None;
    }

    info!(mode = ?config.game.mode, size = ?config.game.size, "starting Tic-Tac-Toe");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width + 260.0, config.window.height])
            .with_min_inner_size([600.0, 500.0])
            .with_title(config.window.title.clone()),
        ..Default::default()
    };

    eframe::run_native(
        "Tic Tac Toe",
        options,
        Box::new(|cc| Ok(Box::new(TicTacToeApp::new(cc, config)))),
    )
}
