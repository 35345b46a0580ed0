use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use snek::assets::TextureCache;
use snek::game::GameConfig;
use snek::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "snek")]
#[command(version, about = "Terminal snake with a smoothly turning body")]
struct Cli {
    /// JSON file with game settings; missing fields take defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in tiles
    #[arg(long)]
    width: Option<u32>,

    /// Board height in tiles
    #[arg(long)]
    height: Option<u32>,

    /// Number of rocks
    #[arg(long)]
    rocks: Option<usize>,

    /// Seed for fruit and rock placement
    #[arg(long)]
    seed: Option<u64>,

    /// Directory searched for sprite sheets before the bundled ones
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Where log output goes; the terminal belongs to the game
    #[arg(long, default_value = "snek.log")]
    log_file: PathBuf,

    /// Also log turns and fruit pickups
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.board_width = width;
        }
        if let Some(height) = self.height {
            config.board_height = height;
        }
        if let Some(rocks) = self.rocks {
            config.rock_count = rocks;
        }

        config
            .validate()
            .map_err(|e| anyhow!(e))
            .context("Invalid game configuration")?;

        Ok(config)
    }
}

fn init_logging(path: &Path, verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    WriteLogger::init(level, Config::default(), file).context("Failed to initialize logger")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_file, cli.verbose)?;
    let config = cli.game_config()?;

    let textures = match &cli.assets {
        Some(dir) => TextureCache::with_root(dir),
        None => TextureCache::builtin(),
    };

    info!(
        "Starting snek on a {}x{} board",
        config.board_width, config.board_height
    );

    let mut human_mode = HumanMode::new(config, cli.seed, textures);
    human_mode.run().await?;

    info!("Goodbye");
    Ok(())
}
