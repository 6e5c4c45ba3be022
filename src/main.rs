use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use siedler::game::{FoodPlacement, GameConfig};
use siedler::logging::init_file_logging;
use siedler::modes::PageMode;

#[derive(Parser)]
#[command(name = "siedler")]
#[command(version, about = "Siedler coming soon - with a Snake game while you wait")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells per side of the square grid
    #[arg(long)]
    tile_count: Option<usize>,

    /// Milliseconds between snake moves
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Where eaten food may reappear
    #[arg(long)]
    food_placement: Option<Placement>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Placement {
    /// Any cell, even under the snake
    Anywhere,
    /// Only cells the snake does not cover
    AvoidSnake,
}

impl From<Placement> for FoodPlacement {
    fn from(placement: Placement) -> Self {
        match placement {
            Placement::Anywhere => FoodPlacement::Anywhere,
            Placement::AvoidSnake => FoodPlacement::AvoidSnake,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(tile_count) = self.tile_count {
            config.tile_count = tile_count;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(placement) = self.food_placement {
            config.food_placement = placement.into();
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

    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }

    let config = cli.game_config()?;

    let mut page = PageMode::new(config);
    page.run().await?;

    Ok(())
}
