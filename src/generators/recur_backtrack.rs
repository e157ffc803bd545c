use rand::{Rng, rngs::StdRng};

use crate::maze::Maze;

/// Randomized depth-first carving from the entrance.
///
/// Expects an all-wall maze. A room counts as visited once it is a path.
pub fn recursive_backtrack(maze: &mut Maze, rng: &mut StdRng) {
    let start = maze.entrance();
    maze.carve(start);

    // The stack will keep only carved rooms
    let mut stack = vec![start];

    while let Some(&cell) = stack.last() {
        let neighbors = maze
            .room_neighbors(cell)
            .filter(|&c| !maze.is_path(c))
            .collect::<Vec<_>>();

        if neighbors.is_empty() {
            // Dead end, backtrack to the previous room
            stack.pop();
            continue;
        }

        let neighbor = neighbors[rng.random_range(0..neighbors.len())];
        maze.carve_passage(cell, neighbor);
        // Continue carving from the neighbor; this room stays on the stack
        stack.push(neighbor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;

    #[test]
    fn test_smallest_maze() {
        let mut maze = Maze::new(5, None).unwrap();
        recursive_backtrack(&mut maze, &mut get_rng(Some(0)));
        // Four rooms joined by exactly three passages
        let carved = maze.grid().cells().iter().filter(|c| c.is_path()).count();
        assert_eq!(carved, 7);
        assert!(maze.is_perfect());
    }
}
