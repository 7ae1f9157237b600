//! Headless snake runner.
//!
//! Loads a level and behavior set, drives the snake for `max_steps` steps
//! with a scripted turn sequence and logs the outcome.
mod config;

use std::path::PathBuf;

use anyhow::Result;
use config::CliConfig;
use snake_content::ContentFactory;
use snake_core::SnakeError;
use snake_runtime::Simulation;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env()?;
    let _guard = setup_logging(config.session_id.as_deref())?;

    run(&config)
}

fn run(config: &CliConfig) -> Result<()> {
    let factory = ContentFactory::new(config.data_dir.clone());
    let mut game = factory.load_config()?;
    config.apply(&mut game);

    let (layout, behaviors) = factory.load_scenario(&config.level, &game)?;
    tracing::info!(
        level = %config.level,
        seed = ?game.seed,
        max_steps = game.max_steps,
        behaviors = behaviors.programs.len(),
        "starting run"
    );

    let mut simulation = Simulation::seeded(layout, behaviors, game).inspect_err(|error| {
        tracing::error!(
            code = error.error_code(),
            severity = error.severity().as_str(),
            %error,
            "level rejected"
        );
    })?;
    let summary = simulation.run(|index| config.turn(index));

    let (x, y) = simulation.head_position();
    let apple = match simulation.spawn_item(0) {
        Ok(cell) => cell,
        Err(error) => {
            tracing::warn!(code = error.error_code(), %error, "apple spawn skipped");
            None
        }
    };
    tracing::info!(
        seed = ?simulation.seed(),
        steps = summary.steps,
        moves = summary.moves,
        stops = summary.stops,
        died = summary.died,
        x,
        y,
        direction = %simulation.direction(),
        acceleration = %simulation.acceleration(),
        ?apple,
        "summary"
    );

    Ok(())
}

/// Setup logging to both stderr and file
fn setup_logging(
    session_id: Option<&str>,
) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    use std::time::{SystemTime, UNIX_EPOCH};

    let session_id = match session_id {
        Some(id) => id.to_string(),
        None => {
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default();
            format!("session_{}", timestamp)
        }
    };

    let session_log_dir = log_dir().join(&session_id);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "snake.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}/snake.log", session_log_dir.display());

    Ok(guard)
}

/// Platform-specific log directory, e.g. `~/.cache/snake/logs` on Linux.
fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "snake")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/snake"))
        .join("logs")
}
