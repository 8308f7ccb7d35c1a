//! Aim trainer headless runner.
//!
//! Plays one session with the scripted bot and prints the end-of-session
//! report as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Simulated time, default settings
//! aimtrainer
//!
//! # Custom settings file, sloppier bot
//! aimtrainer --settings settings.json --bot-hit-rate 0.6
//!
//! # Drive the real-time game loop instead of simulated time
//! aimtrainer --realtime
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use aimtrainer_app::bot::{self, BotConfig};
use aimtrainer_core::settings::GameSettings;
use aimtrainer_sim::SimConfig;

/// Aim trainer session runner
#[derive(Parser, Debug)]
#[command(name = "aimtrainer")]
#[command(author, version, about = "Headless aim-training session runner", long_about = None)]
struct Cli {
    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// JSON settings file (camelCase keys); defaults apply when omitted
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Seed for target placement
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Share of bot shots aimed at a target, 0.0 - 1.0
    #[arg(long, default_value_t = 0.8)]
    bot_hit_rate: f64,

    /// Milliseconds between bot shots
    #[arg(long, default_value_t = 450.0)]
    bot_shot_interval_ms: f64,

    /// Run against the real-time game loop (takes the full session duration)
    #[arg(long)]
    realtime: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("aimtrainer v{}", env!("CARGO_PKG_VERSION"));

    let settings = load_settings(cli.settings.as_ref())?;
    info!(
        targets = settings.target_count,
        size = settings.target_size,
        duration = settings.duration,
        "settings loaded"
    );

    let config = SimConfig {
        seed: cli.seed,
        settings,
    };
    if !(0.0..=1.0).contains(&cli.bot_hit_rate) {
        bail!("--bot-hit-rate must be between 0.0 and 1.0, got {}", cli.bot_hit_rate);
    }
    if !cli.bot_shot_interval_ms.is_finite() || cli.bot_shot_interval_ms <= 0.0 {
        bail!(
            "--bot-shot-interval-ms must be a positive number, got {}",
            cli.bot_shot_interval_ms
        );
    }

    let bot_config = BotConfig {
        hit_rate: cli.bot_hit_rate,
        shot_interval_ms: cli.bot_shot_interval_ms,
        seed: cli.seed.wrapping_add(1),
    };

    let report = if cli.realtime {
        bot::run_realtime_session(config, &bot_config).context("real-time session failed")?
    } else {
        bot::run_simulated_session(config, &bot_config)
    };

    match report {
        Some(report) => {
            info!(grade = %report.grade, score = report.score, "session report ready");
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        None => warn!("session ended without a report"),
    }

    Ok(())
}

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<GameSettings> {
    let Some(path) = path else {
        return Ok(GameSettings::default());
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    let settings = GameSettings::from_json_str(&json)
        .with_context(|| format!("parsing settings from {}", path.display()))?;
    Ok(settings)
}
