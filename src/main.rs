use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::GameConfig;
use grid_snake::logging::{self, LogTarget};
use grid_snake::modes::{HeadlessMode, HumanMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Grid snake in the terminal")]
struct Cli {
    /// How to drive the game
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON game configuration; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width (default 84)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (default 48)
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds between ticks (default 125)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for fruit placement
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate in headless mode
    #[arg(long, default_value = "10000")]
    ticks: u64,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Play with the keyboard
    Human,
    /// Let the autopilot play without a terminal UI
    Headless,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let target = LogTarget::select(cli.log_file.as_deref(), cli.mode == Mode::Human);
    logging::init(target)?;

    let config = cli.game_config()?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config);
            human_mode.run().await?;
        }
        Mode::Headless => {
            let report = HeadlessMode::new(config, cli.ticks).run();
            println!(
                "{} ticks, {} games, {} fruit, best length {}",
                report.ticks, report.games_finished, report.fruit_eaten, report.best_length
            );
        }
    }

    Ok(())
}
