use std::{cmp::Reverse, collections::BinaryHeap};

use super::{CellTable, Solution, TrackedCell, reconstruct_path};
use crate::maze::{Coord, Maze, manhattan};

/// A* over the 4-connected grid with unit step cost and a Manhattan heuristic.
pub fn solve_astar(maze: &Maze, start: Coord, goal: Coord) -> Solution {
    let size = maze.size();
    let mut g_scores = CellTable::new(size, u32::MAX);
    let mut parents: CellTable<Option<Coord>> = CellTable::new(size, None);
    let mut closed = CellTable::new(size, false);
    let mut visited = Vec::new();

    // Using Reverse to turn the max-heap into a min-heap
    let mut open_set = BinaryHeap::new();
    let mut seq = 0u64;
    g_scores[start] = 0;
    open_set.push(Reverse(TrackedCell {
        coord: start,
        traveling_cost: 0,
        priority: manhattan(start, goal),
        seq,
    }));

    while let Some(Reverse(current)) = open_set.pop() {
        // Stale entry for a cell that was already expanded
        if closed[current.coord] {
            continue;
        }
        closed[current.coord] = true;
        visited.push(current.coord);

        if current.coord == goal {
            return Solution {
                visited,
                path: reconstruct_path(&parents, goal),
            };
        }

        let tentative = current.traveling_cost + 1;
        for neighbor in maze.open_neighbors(current.coord) {
            if closed[neighbor] || tentative >= g_scores[neighbor] {
                continue;
            }
            g_scores[neighbor] = tentative;
            parents[neighbor] = Some(current.coord);
            seq += 1;
            open_set.push(Reverse(TrackedCell {
                coord: neighbor,
                traveling_cost: tentative,
                priority: tentative + manhattan(neighbor, goal),
                seq,
            }));
        }
    }

    tracing::debug!(?start, ?goal, "A* exhausted the open set without reaching the goal");
    Solution {
        visited,
        path: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corridor() {
        let mut maze = Maze::new(5, None).unwrap();
        for coord in [(1, 1), (1, 2), (1, 3), (2, 3), (3, 3)] {
            maze.carve(coord);
        }
        let solution = solve_astar(&maze, (1, 1), (3, 3));
        assert_eq!(solution.path, vec![(1, 1), (1, 2), (1, 3), (2, 3), (3, 3)]);
        assert_eq!(solution.visited, solution.path);
    }

    #[test]
    fn test_heuristic_skips_dead_end() {
        // A dead end branches off southwards while the goal lies east
        let mut maze = Maze::new(7, None).unwrap();
        for coord in [(1, 1), (2, 1), (3, 1), (4, 1), (5, 1), (1, 2), (1, 3), (1, 4), (1, 5)] {
            maze.carve(coord);
        }
        let solution = solve_astar(&maze, (1, 1), (1, 5));
        assert_eq!(solution.path.len(), 5);
        // Every cell on the branch has a larger f-score than the corridor east
        assert!(!solution.visited.contains(&(5, 1)));
    }
}
