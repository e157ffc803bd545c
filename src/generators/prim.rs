use rand::{Rng, rngs::StdRng};

use crate::maze::{Coord, Maze};

/// A wall cell on the frontier together with the carved room it was reached from.
#[derive(Debug, Clone, Copy)]
struct FrontierEdge {
    wall: Coord,
    from: Coord,
}

impl FrontierEdge {
    /// The room on the other side of the wall, if it lies on the grid.
    fn far_side(&self) -> Option<Coord> {
        let row = (self.wall.0 * 2).checked_sub(self.from.0)?;
        let col = (self.wall.1 * 2).checked_sub(self.from.1)?;
        Some((row, col))
    }
}

/// Randomized Prim's algorithm over wall edges, seeded from the entrance.
///
/// Expects an all-wall maze.
pub fn randomized_prim(maze: &mut Maze, rng: &mut StdRng) {
    let start = maze.entrance();
    maze.carve(start);

    let mut frontier = maze
        .wall_neighbors(start)
        .map(|wall| FrontierEdge { wall, from: start })
        .collect::<Vec<_>>();

    while !frontier.is_empty() {
        // Pick a random frontier edge
        let idx = rng.random_range(0..frontier.len());
        let edge = frontier.swap_remove(idx);

        let Some(far) = edge.far_side() else {
            continue;
        };
        // Skip edges leading off the interior or into an already carved room
        if !maze.room_neighbors(edge.from).any(|c| c == far) || maze.is_path(far) {
            continue;
        }

        maze.carve(edge.wall);
        maze.carve(far);

        frontier.extend(
            maze.wall_neighbors(far)
                .map(|wall| FrontierEdge { wall, from: far }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;

    #[test]
    fn test_far_side() {
        let edge = FrontierEdge {
            wall: (0, 1),
            from: (1, 1),
        };
        assert_eq!(edge.far_side(), None);
        let edge = FrontierEdge {
            wall: (2, 1),
            from: (1, 1),
        };
        assert_eq!(edge.far_side(), Some((3, 1)));
        let edge = FrontierEdge {
            wall: (3, 2),
            from: (3, 3),
        };
        assert_eq!(edge.far_side(), Some((3, 1)));
    }

    #[test]
    fn test_randomized_prim() {
        let mut maze = Maze::new(7, None).unwrap();
        randomized_prim(&mut maze, &mut get_rng(Some(0)));
        assert!(maze.is_path((1, 1)));
        assert!(maze.is_path((5, 5)));
        // Nine rooms, eight passages
        let carved = maze.grid().cells().iter().filter(|c| c.is_path()).count();
        assert_eq!(carved, 17);
        assert!(maze.is_perfect());
    }
}
