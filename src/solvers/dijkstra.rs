use std::{cmp::Reverse, collections::BinaryHeap};

use super::{CellTable, Solution, TrackedCell, reconstruct_path};
use crate::maze::{Coord, Maze};

pub fn solve_dijkstra(maze: &Maze, start: Coord, goal: Coord) -> Solution {
    let size = maze.size();
    // Tentative distances, infinite until a cell is reached
    let mut distances = CellTable::new(size, u32::MAX);
    let mut parents: CellTable<Option<Coord>> = CellTable::new(size, None);
    let mut finalized = CellTable::new(size, false);
    let mut visited = Vec::new();

    // Priority queue for Dijkstra's algorithm
    // Using Reverse to turn the max-heap into a min-heap
    let mut pq = BinaryHeap::new();
    let mut seq = 0u64;
    distances[start] = 0;
    pq.push(Reverse(TrackedCell {
        coord: start,
        traveling_cost: 0,
        priority: 0,
        seq,
    }));

    while let Some(Reverse(current)) = pq.pop() {
        if finalized[current.coord] || current.traveling_cost > distances[current.coord] {
            continue;
        }
        finalized[current.coord] = true;
        visited.push(current.coord);

        if current.coord == goal {
            return Solution {
                visited,
                path: reconstruct_path(&parents, goal),
            };
        }

        let new_cost = current.traveling_cost + 1; // Uniform cost for each step
        for neighbor in maze.open_neighbors(current.coord) {
            // Relax only when the neighbor gets strictly cheaper
            if finalized[neighbor] || new_cost >= distances[neighbor] {
                continue;
            }
            distances[neighbor] = new_cost;
            parents[neighbor] = Some(current.coord);
            seq += 1;
            pq.push(Reverse(TrackedCell {
                coord: neighbor,
                traveling_cost: new_cost,
                priority: new_cost,
                seq,
            }));
        }
    }

    tracing::debug!(?start, ?goal, "Dijkstra ran out of reachable cells");
    Solution {
        visited,
        path: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expands_in_distance_order() {
        // Plus-shaped junction around (3, 3)
        let mut maze = Maze::new(7, None).unwrap();
        for coord in [(3, 3), (2, 3), (1, 3), (4, 3), (5, 3), (3, 2), (3, 1), (3, 4), (3, 5)] {
            maze.carve(coord);
        }
        let solution = solve_dijkstra(&maze, (3, 3), (3, 5));
        assert_eq!(solution.path, vec![(3, 3), (3, 4), (3, 5)]);
        // All distance-1 cells come before any distance-2 cell, in N, S, W, E order
        assert_eq!(
            solution.visited,
            vec![(3, 3), (2, 3), (4, 3), (3, 2), (3, 4), (1, 3), (5, 3), (3, 1), (3, 5)]
        );
    }
}
