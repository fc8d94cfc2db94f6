use anyhow::{Context, Result};
use clap::Parser;
use shrink_snake::game::GameConfig;
use shrink_snake::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "shrink-snake")]
#[command(version, about = "Snake in a border that shrinks every time you leave it")]
struct Cli {
    /// JSON file that may set `tick_ms` and `seed`; other keys are rejected
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds between game ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for reproducible fruit placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

/// The terminal owns stderr, so logs only go to a file when one is given
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;
    let config = cli.game_config()?;
    log::debug!("using config {:?}", config);

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}
