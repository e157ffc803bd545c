use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mazelab::{app, config::MazeArgs, error::Result};

/// Generate and solve mazes in the terminal, one animated step at a time.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    maze: MazeArgs,

    /// Directory for the log file. The terminal is busy drawing the maze.
    #[arg(long, value_name = "DIR", default_value = ".")]
    log_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.maze.into_config()?;

    let file_appender = tracing_appender::rolling::never(&cli.log_dir, "mazelab.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    tracing::info!(?config, "starting");

    let mut stdout = std::io::stdout();
    app::setup_terminal(&mut stdout)?;
    let result = app::run(config);
    app::restore_terminal(&mut stdout)?;
    if let Err(e) = &result {
        tracing::error!(error = %e, "app exited with an error");
    }
    result
}
