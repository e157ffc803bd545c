mod astar;
mod dijkstra;

use astar::solve_astar;
use dijkstra::solve_dijkstra;

use crate::{
    error::{MazeError, Result},
    maze::{Coord, Maze},
};

/// An entry in a solver's priority queue.
///
/// Ordered by `priority` and then by `seq`, so entries with equal priority
/// come out in insertion order. Wrap in [`std::cmp::Reverse`] for a min-heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TrackedCell {
    /// Coordinates of the cell in the maze
    coord: Coord,
    /// Cost to reach this cell from the start
    traveling_cost: u32,
    /// Queue priority: traveling cost plus heuristic for A*, traveling cost for Dijkstra
    priority: u32,
    /// Insertion counter used as the tie-break
    seq: u64,
}

impl Ord for TrackedCell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for TrackedCell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-cell bookkeeping shared by the solvers, indexed like the grid.
struct CellTable<T> {
    data: Vec<T>,
    size: u16,
}

impl<T: Clone> CellTable<T> {
    fn new(size: u16, value: T) -> Self {
        CellTable {
            data: vec![value; size as usize * size as usize],
            size,
        }
    }
}

impl<T> std::ops::Index<Coord> for CellTable<T> {
    type Output = T;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.data[index.0 as usize * self.size as usize + index.1 as usize]
    }
}

impl<T> std::ops::IndexMut<Coord> for CellTable<T> {
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        &mut self.data[index.0 as usize * self.size as usize + index.1 as usize]
    }
}

/// Walk parent pointers back from `goal` and return the route start-first.
fn reconstruct_path(parents: &CellTable<Option<Coord>>, goal: Coord) -> Vec<Coord> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(parent) = parents[current] {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

/// Output of a solve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    /// Cells in the order the solver finalized them. Only meant for animation.
    pub visited: Vec<Coord>,
    /// Entrance-to-exit route, empty if the exit could not be reached.
    pub path: Vec<Coord>,
}

impl Solution {
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Solver {
    #[default]
    AStar,
    Dijkstra,
}

impl Solver {
    pub const ALL: [Solver; 2] = [Solver::AStar, Solver::Dijkstra];
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::AStar => write!(f, "A* Search"),
            Solver::Dijkstra => write!(f, "Dijkstra's Algorithm"),
        }
    }
}

impl std::str::FromStr for Solver {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "astar" | "a*" => Ok(Solver::AStar),
            "dijkstra" => Ok(Solver::Dijkstra),
            _ => Err(MazeError::UnknownSolver(s.to_string())),
        }
    }
}

/// Search for the route from the maze entrance to its exit. The maze is only read.
pub fn solve_maze(maze: &Maze, solver: Solver) -> Solution {
    let start = maze.entrance();
    let goal = maze.exit();
    if !maze.is_path(start) || !maze.is_path(goal) {
        return Solution::default();
    }

    match solver {
        Solver::AStar => solve_astar(maze, start, goal),
        Solver::Dijkstra => solve_dijkstra(maze, start, goal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{Generator, generate_maze};
    use crate::maze::manhattan;

    fn generated(size: usize, generator: Generator, seed: u64) -> Maze {
        let mut maze = Maze::new(size, None).unwrap();
        generate_maze(&mut maze, generator, Some(seed)).unwrap();
        maze
    }

    fn assert_valid_path(maze: &Maze, path: &[Coord]) {
        assert_eq!(path.first(), Some(&maze.entrance()));
        assert_eq!(path.last(), Some(&maze.exit()));
        assert!(path.iter().all(|&c| maze.is_path(c)));
        assert!(path.windows(2).all(|w| manhattan(w[0], w[1]) == 1));
        let unique = path.iter().collect::<std::collections::HashSet<_>>();
        assert_eq!(unique.len(), path.len(), "path repeats a cell");
    }

    #[test]
    fn test_solvers_agree_on_path_length() {
        for size in [15, 21, 31, 41] {
            for generator in Generator::ALL {
                let maze = generated(size, generator, size as u64);
                let astar = solve_maze(&maze, Solver::AStar);
                let dijkstra = solve_maze(&maze, Solver::Dijkstra);
                assert!(astar.is_found() && dijkstra.is_found());
                assert_eq!(astar.path.len(), dijkstra.path.len());
                // A perfect maze has a single route, so both find the same one
                assert_eq!(astar.path, dijkstra.path);
                assert_valid_path(&maze, &astar.path);
                assert_valid_path(&maze, &dijkstra.path);
            }
        }
    }

    #[test]
    fn test_small_recursive_astar_matches_dijkstra() {
        let maze = generated(15, Generator::RecurBacktrack, 11);
        let astar = solve_maze(&maze, Solver::AStar);
        let dijkstra = solve_maze(&maze, Solver::Dijkstra);
        assert_eq!(astar.path.len(), dijkstra.path.len());
    }

    #[test]
    fn test_solve_is_deterministic() {
        let maze = generated(31, Generator::Prim, 5);
        for solver in Solver::ALL {
            let first = solve_maze(&maze, solver);
            let second = solve_maze(&maze, solver);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_visited_cells_are_unique_and_open() {
        let maze = generated(21, Generator::RecurBacktrack, 9);
        for solver in Solver::ALL {
            let solution = solve_maze(&maze, solver);
            assert_eq!(solution.visited.first(), Some(&maze.entrance()));
            assert_eq!(solution.visited.last(), Some(&maze.exit()));
            let unique = solution
                .visited
                .iter()
                .collect::<std::collections::HashSet<_>>();
            assert_eq!(unique.len(), solution.visited.len());
            assert!(solution.visited.iter().all(|&c| maze.is_path(c)));
        }
    }

    #[test]
    fn test_unreachable_exit_gives_empty_path() {
        let mut maze = Maze::new(7, None).unwrap();
        maze.carve((1, 1));
        maze.carve_passage((1, 1), (1, 3));
        maze.carve((5, 5));
        for solver in Solver::ALL {
            let solution = solve_maze(&maze, solver);
            assert!(!solution.is_found());
            assert_eq!(solution.visited, vec![(1, 1), (1, 2), (1, 3)]);
        }
    }

    #[test]
    fn test_all_wall_maze_gives_empty_solution() {
        let maze = Maze::new(9, None).unwrap();
        for solver in Solver::ALL {
            assert_eq!(solve_maze(&maze, solver), Solution::default());
        }
    }

    #[test]
    fn test_shortest_route_on_maze_with_loop() {
        // Open 5x5 interior: an unweighted grid, shortest route is 9 cells
        let mut maze = Maze::new(7, None).unwrap();
        for row in 1..6 {
            for col in 1..6 {
                maze.carve((row, col));
            }
        }
        for solver in Solver::ALL {
            let solution = solve_maze(&maze, solver);
            assert_eq!(solution.path.len(), 9, "{solver}");
            assert_valid_path(&maze, &solution.path);
        }
    }

    #[test]
    fn test_tie_break_is_fifo() {
        let mut heap = std::collections::BinaryHeap::new();
        for (seq, coord) in [(0, (1, 1)), (1, (2, 2)), (2, (3, 3))] {
            heap.push(std::cmp::Reverse(TrackedCell {
                coord,
                traveling_cost: 0,
                priority: 4,
                seq,
            }));
        }
        let order = std::iter::from_fn(|| heap.pop().map(|c| c.0.coord)).collect::<Vec<_>>();
        assert_eq!(order, vec![(1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_parse_solver() {
        assert_eq!("astar".parse::<Solver>().unwrap(), Solver::AStar);
        assert_eq!("Dijkstra".parse::<Solver>().unwrap(), Solver::Dijkstra);
        assert!(matches!(
            "bfs".parse::<Solver>(),
            Err(MazeError::UnknownSolver(name)) if name == "bfs"
        ));
    }
}
