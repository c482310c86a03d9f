use anyhow::{Result, anyhow};
use clap::Parser;
use grid_snake::audio::{AudioCue, Silent, TerminalBell};
use grid_snake::game::{FoodPlacer, GameConfig, GameEngine};
use grid_snake::modes::HumanMode;
use grid_snake::storage::{HighScoreStore, JsonFileStore, MemoryStore};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Grid snake game for the terminal")]
struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width and height in cells
    #[arg(long)]
    grid_size: Option<usize>,

    /// Speed level each game starts at, kept across resets
    #[arg(long)]
    speed: Option<u8>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// File holding the high score
    #[arg(long, default_value = "snake_high_score.json")]
    high_score_file: PathBuf,

    /// Keep the high score in memory only
    #[arg(long, conflicts_with = "high_score_file")]
    no_save: bool,

    /// Allow moving into the cell the tail is leaving
    #[arg(long)]
    tail_follow: bool,

    /// Ring the terminal bell on food and game over
    #[arg(long)]
    bell: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    // Create game configuration from file and CLI arguments
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(grid_size) = cli.grid_size {
        config.grid_size = grid_size;
    }
    if let Some(level) = cli.speed {
        config.start_level = level;
    }
    if cli.tail_follow {
        config.tail_follow = true;
    }
    config
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    let store: Box<dyn HighScoreStore> = if cli.no_save {
        Box::new(MemoryStore::default())
    } else {
        let file_store = JsonFileStore::new(cli.high_score_file);
        info!("high score file: {:?}", file_store.path());
        Box::new(file_store)
    };

    let placer = match cli.seed {
        Some(seed) => FoodPlacer::seeded(seed),
        None => FoodPlacer::new(),
    };

    let engine = GameEngine::with_placer(config, store, placer);

    let audio: Box<dyn AudioCue> = if cli.bell {
        Box::new(TerminalBell::new())
    } else {
        Box::new(Silent)
    };

    let mut human_mode = HumanMode::new(engine, audio);
    human_mode.run().await?;

    Ok(())
}
