//! Command-line entry point: load the maze and config, then play.

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::bounded;
use env_logger::{Env, Target};
use mazechase::actor::{Engine, InputActor, Painter, RendererActor};
use mazechase::terminal::TerminalGuard;
use mazechase::{Config, Maze, Outcome};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Commands buffered between the input thread and the engine.
const INPUT_QUEUE: usize = 64;

/// How often the input thread checks for shutdown.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Terminal maze-chase game.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(long, default_value = "config.json")]
    config_file: PathBuf,

    /// Path to the maze file.
    #[arg(long, default_value = "maze.txt")]
    maze_file: PathBuf,

    /// Write logs to this file (stdout is the game screen).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seed for pursuer movement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,
}

/// Where log records go. Never stderr: it shares the terminal with the game.
fn log_target(log_file: Option<&Path>) -> Result<Target> {
    let Some(path) = log_file else {
        return Ok(Target::Pipe(Box::new(io::sink())));
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    Ok(Target::Pipe(Box::new(file)))
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .target(log_target(log_file)?)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let maze = Maze::load(&cli.maze_file)
        .with_context(|| format!("failed to load maze {}", cli.maze_file.display()))?;
    let config = Config::load(&cli.config_file)
        .with_context(|| format!("failed to load config {}", cli.config_file.display()))?;

    let outcome = play(&cli, maze, &config)?;
    log::info!("finished: {outcome:?}");
    Ok(())
}

fn play(cli: &Cli, maze: Maze, config: &Config) -> Result<Outcome> {
    let terminal = TerminalGuard::enter().context("failed to enter raw mode")?;

    let (input_tx, input_rx) = bounded(INPUT_QUEUE);
    let input = InputActor::spawn(input_tx, INPUT_POLL).context("failed to start input thread")?;
    let renderer = RendererActor::spawn(Painter::new(config.glyphs.clone(), config.display_mode))
        .context("failed to start render thread")?;

    let rng = cli.seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let engine = Engine::with_rng(config.engine_config(), maze, input_rx, renderer.handle(), rng)
        .context("failed to start power timer")?;

    let outcome = engine.run();

    input.join();
    renderer.join();
    drop(terminal);

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_log_file_discards_records() {
        assert!(matches!(log_target(None).unwrap(), Target::Pipe(_)));
    }

    #[test]
    fn test_log_file_is_created() {
        let path = std::env::temp_dir().join(format!("mazechase-{}.log", std::process::id()));
        assert!(matches!(log_target(Some(&path)).unwrap(), Target::Pipe(_)));
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_unwritable_log_file() {
        assert!(log_target(Some(Path::new("/nonexistent/mazechase/game.log"))).is_err());
    }
}
