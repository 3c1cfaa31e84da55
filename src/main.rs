use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::{GameConfig, RoundPolicy};
use grid_snake::logging::{self, LogTarget};
use grid_snake::metrics::GameMetrics;
use grid_snake::modes::{PlayMode, SimulateConfig, SimulateMode, WatchMode};
use grid_snake::scores::HighScores;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    #[arg(long, value_enum, default_value = "play")]
    mode: Mode,

    /// TOML file with game settings; command-line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds per game tick
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Show a game-over screen instead of starting the next round right away
    #[arg(long)]
    wait_for_restart: bool,

    /// Rounds to play in simulate mode
    #[arg(long, default_value = "100")]
    rounds: usize,

    /// Step cap per round in simulate mode
    #[arg(long, default_value = "10000")]
    max_steps: u32,

    /// JSON file keeping the best score across runs
    #[arg(long)]
    scores_file: Option<PathBuf>,

    /// Write logs to this file (play and watch modes log nowhere without it)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Steer the snake with the keyboard
    Play,
    /// Watch the autopilot play
    Watch,
    /// Run autopilot rounds without a terminal UI and print a summary
    Simulate,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("Failed to load config from {:?}", path))?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.wait_for_restart {
            config.round_policy = RoundPolicy::WaitForRestart;
        }

        config.validate()?;
        Ok(config)
    }

    fn log_target(&self) -> LogTarget<'_> {
        match (&self.mode, &self.log_file) {
            (_, Some(path)) => LogTarget::File(path),
            (Mode::Simulate, None) => LogTarget::Stderr,
            _ => LogTarget::Off,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_target(), &cli.log_level)?;

    let config = cli.game_config()?;

    match cli.mode {
        Mode::Play => {
            let mut play_mode = PlayMode::new(config);
            play_mode.run().await?;
            save_scores(cli.scores_file.as_deref(), play_mode.metrics())?;
        }
        Mode::Watch => {
            let mut watch_mode = WatchMode::new(config);
            watch_mode.run().await?;
            save_scores(cli.scores_file.as_deref(), watch_mode.metrics())?;
        }
        Mode::Simulate => {
            let sim_config = SimulateConfig {
                max_steps: cli.max_steps,
                ..SimulateConfig::new(cli.rounds, config)
            };
            let mut simulate_mode = SimulateMode::new(sim_config);
            let summary = simulate_mode.run();
            println!("{summary}");
        }
    }

    Ok(())
}

fn save_scores(path: Option<&Path>, metrics: &GameMetrics) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let (scores, new_best) = HighScores::update_file(path, metrics)
        .with_context(|| format!("Failed to update score file {:?}", path))?;

    if new_best {
        println!("New high score: {}", scores.best);
    } else {
        println!("Best: {} (this session: {})", scores.best, metrics.high_score);
    }

    Ok(())
}
