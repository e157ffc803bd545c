use rand::{SeedableRng, rngs::StdRng};

mod prim;
mod recur_backtrack;

use prim::randomized_prim;
use recur_backtrack::recursive_backtrack;

use crate::{
    error::{MazeError, Result},
    maze::Maze,
};

/// Get a random number generator, optionally seeded for reproducibility.
pub(crate) fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Generator {
    #[default]
    RecurBacktrack,
    Prim,
}

impl Generator {
    pub const ALL: [Generator; 2] = [Generator::RecurBacktrack, Generator::Prim];
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::RecurBacktrack => write!(f, "Recursive Backtracking"),
            Generator::Prim => write!(f, "Prim's Algorithm"),
        }
    }
}

impl std::str::FromStr for Generator {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recursive" | "backtrack" => Ok(Generator::RecurBacktrack),
            "prim" => Ok(Generator::Prim),
            _ => Err(MazeError::UnknownGenerator(s.to_string())),
        }
    }
}

/// Carve a perfect maze into `maze`, starting from an all-wall grid.
///
/// Fails with [`MazeError::Disconnected`] if the exit is not reachable from
/// the entrance afterwards; the maze is then left flagged as not generated.
pub fn generate_maze(maze: &mut Maze, generator: Generator, seed: Option<u64>) -> Result<()> {
    maze.reset();
    let mut rng = get_rng(seed);

    match generator {
        Generator::RecurBacktrack => recursive_backtrack(maze, &mut rng),
        Generator::Prim => randomized_prim(maze, &mut rng),
    }

    finish_generation(maze, generator)
}

/// Flag the maze generated if its exit is reachable from the entrance.
pub(crate) fn finish_generation(maze: &mut Maze, generator: Generator) -> Result<()> {
    if !maze.is_reachable(maze.entrance(), maze.exit()) {
        tracing::warn!(%generator, size = maze.size(), "generator left the exit unreachable");
        maze.mark_generated(false);
        return Err(MazeError::Disconnected);
    }
    maze.mark_generated(true);
    Ok(())
}
