use std::time::Duration;

use crate::{
    animation::SPEED_PRESETS_MS,
    error::Result,
    generators::Generator,
    maze::Maze,
    solvers::Solver,
};

/// Validated settings for a maze session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeConfig {
    /// Side length of the square grid. Odd, within the accepted range.
    pub size: usize,
    pub generator: Generator,
    pub solver: Solver,
    /// Pause between animation steps. Zero disables pacing.
    pub interval: Duration,
    /// Fixed RNG seed for reproducible mazes.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            size: 21,
            generator: Generator::default(),
            solver: Solver::default(),
            interval: Duration::from_millis(50),
            seed: None,
        }
    }
}

impl MazeConfig {
    pub fn validate(&self) -> Result<()> {
        Maze::validate_size(self.size)
    }
}

/// Command-line options shared by the binaries.
#[derive(Debug, Clone, clap::Args)]
pub struct MazeArgs {
    /// Side length of the maze grid (odd, 5 to 255). The classic sizes are 15, 21, 31 and 41.
    #[arg(short, long, default_value_t = 21)]
    pub size: usize,

    /// Generation algorithm: `recursive` or `prim`.
    #[arg(short, long, default_value = "recursive")]
    pub generator: Generator,

    /// Solving algorithm: `astar` or `dijkstra`.
    #[arg(short = 'a', long, default_value = "astar")]
    pub solver: Solver,

    /// Milliseconds between animation steps: 10, 50, 100 or 200.
    #[arg(long, value_name = "MILLISECONDS", default_value_t = 50, value_parser = parse_speed)]
    pub speed: u64,

    /// Random seed for reproducible mazes.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl MazeArgs {
    pub fn into_config(self) -> Result<MazeConfig> {
        let config = MazeConfig {
            size: self.size,
            generator: self.generator,
            solver: self.solver,
            interval: Duration::from_millis(self.speed),
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_speed(s: &str) -> std::result::Result<u64, String> {
    let ms = s
        .parse::<u64>()
        .map_err(|_| format!("`{s}` is not a number of milliseconds"))?;
    if SPEED_PRESETS_MS.contains(&ms) {
        Ok(ms)
    } else {
        Err(format!("speed must be one of {SPEED_PRESETS_MS:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MazeError;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        maze: MazeArgs,
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::try_parse_from(["mazelab"]).unwrap();
        let config = cli.maze.into_config().unwrap();
        assert_eq!(config, MazeConfig::default());
    }

    #[test]
    fn test_parse_all_options() {
        let cli = TestCli::try_parse_from([
            "mazelab",
            "--size",
            "41",
            "--generator",
            "prim",
            "--solver",
            "dijkstra",
            "--speed",
            "200",
            "--seed",
            "7",
        ])
        .unwrap();
        let config = cli.maze.into_config().unwrap();
        assert_eq!(config.size, 41);
        assert_eq!(config.generator, Generator::Prim);
        assert_eq!(config.solver, Solver::Dijkstra);
        assert_eq!(config.interval, Duration::from_millis(200));
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_rejects_unknown_algorithms_and_speeds() {
        assert!(TestCli::try_parse_from(["mazelab", "--generator", "kruskal"]).is_err());
        assert!(TestCli::try_parse_from(["mazelab", "--solver", "bfs"]).is_err());
        assert!(TestCli::try_parse_from(["mazelab", "--speed", "25"]).is_err());
    }

    #[test]
    fn test_rejects_even_size() {
        let cli = TestCli::try_parse_from(["mazelab", "--size", "20"]).unwrap();
        assert!(matches!(cli.maze.into_config(), Err(MazeError::InvalidSize(20))));
    }
}
