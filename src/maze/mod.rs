pub mod cell;
pub mod grid;

use std::collections::VecDeque;
use std::sync::mpsc::Sender;

use crate::error::{MazeError, Result};
pub use cell::{Cell, Tile};
use grid::{Grid, GridEvent};

/// A `(row, col)` pair, 0-indexed.
pub type Coord = (u16, u16);

/// Smallest accepted maze size.
pub const MIN_SIZE: usize = 5;
/// Largest accepted maze size.
pub const MAX_SIZE: usize = 255;

/// A square maze of odd size with a fixed entrance at `(1, 1)` and exit at
/// `(size - 2, size - 2)`.
///
/// Cells with two odd coordinates are rooms; the cells between them are the
/// walls a generator may knock down. The outer ring is never carved.
pub struct Maze {
    grid: Grid,
    generated: bool,
}

impl Maze {
    /// Creates an all-wall maze. Rejects even sizes and sizes outside
    /// [`MIN_SIZE`]..=[`MAX_SIZE`].
    pub fn new(size: usize, sender: Option<Sender<GridEvent>>) -> Result<Self> {
        Maze::validate_size(size)?;
        Ok(Maze {
            grid: Grid::new(size as u16, Cell::Wall, sender),
            generated: false,
        })
    }

    pub fn validate_size(size: usize) -> Result<()> {
        if size % 2 == 0 || !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(MazeError::InvalidSize(size));
        }
        Ok(())
    }

    pub fn size(&self) -> u16 {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn entrance(&self) -> Coord {
        (1, 1)
    }

    pub fn exit(&self) -> Coord {
        (self.size() - 2, self.size() - 2)
    }

    /// Whether a generator has finished carving this maze.
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    pub(crate) fn mark_generated(&mut self, generated: bool) {
        self.generated = generated;
    }

    /// Put every cell back to wall and forget any previous generation.
    pub fn reset(&mut self) {
        self.grid.fill(Cell::Wall);
        self.generated = false;
    }

    pub fn is_path(&self, coord: Coord) -> bool {
        self.grid.get(coord).is_some_and(Cell::is_path)
    }

    /// Carve a cell, refusing to touch the outer ring.
    pub fn carve(&mut self, coord: Coord) -> bool {
        if !self.grid.in_bounds(coord) || self.grid.is_boundary(coord) {
            return false;
        }
        self.grid.carve(coord)
    }

    /// Carve the wall between two rooms two steps apart, then the far room.
    pub fn carve_passage(&mut self, from: Coord, to: Coord) {
        let wall = ((from.0 + to.0) / 2, (from.1 + to.1) / 2);
        self.carve(wall);
        self.carve(to);
    }

    /// Path cells one step away, in north, south, west, east order.
    pub fn open_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        offsets(coord, 1).filter(move |&c| self.is_path(c))
    }

    /// In-bounds wall cells one step away, in north, south, west, east order.
    pub fn wall_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        offsets(coord, 1).filter(move |&c| self.grid.get(c) == Some(Cell::Wall))
    }

    /// Interior rooms two steps away, in north, south, west, east order.
    /// Rooms on the outer ring are never returned.
    pub fn room_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        offsets(coord, 2).filter(move |&c| self.grid.in_bounds(c) && !self.grid.is_boundary(c))
    }

    /// Breadth-first connectivity check between two cells over path cells.
    pub fn is_reachable(&self, from: Coord, to: Coord) -> bool {
        if !self.is_path(from) || !self.is_path(to) {
            return false;
        }
        let size = self.size() as usize;
        let mut seen = vec![false; size * size];
        let mut queue = VecDeque::from([from]);
        seen[from.0 as usize * size + from.1 as usize] = true;
        while let Some(cell) = queue.pop_front() {
            if cell == to {
                return true;
            }
            for next in self.open_neighbors(cell) {
                let idx = next.0 as usize * size + next.1 as usize;
                if !seen[idx] {
                    seen[idx] = true;
                    queue.push_back(next);
                }
            }
        }
        false
    }

    /// A perfect maze is a spanning tree over its path cells: connected and
    /// without cycles, i.e. `edges == cells - 1` with everything reachable.
    pub fn is_perfect(&self) -> bool {
        let size = self.size();
        let mut cells = 0usize;
        let mut edges = 0usize;
        for row in 0..size {
            for col in 0..size {
                if !self.is_path((row, col)) {
                    continue;
                }
                cells += 1;
                // Count each edge once via its south and east ends
                edges += [(row + 1, col), (row, col + 1)]
                    .into_iter()
                    .filter(|&c| self.is_path(c))
                    .count();
            }
        }
        if cells == 0 || edges + 1 != cells {
            return false;
        }
        self.count_reachable(self.entrance()) == cells
    }

    /// Number of path cells connected to `from`, itself included.
    fn count_reachable(&self, from: Coord) -> usize {
        if !self.is_path(from) {
            return 0;
        }
        let size = self.size() as usize;
        let mut seen = vec![false; size * size];
        let mut stack = vec![from];
        seen[from.0 as usize * size + from.1 as usize] = true;
        let mut count = 0;
        while let Some(cell) = stack.pop() {
            count += 1;
            for next in self.open_neighbors(cell) {
                let idx = next.0 as usize * size + next.1 as usize;
                if !seen[idx] {
                    seen[idx] = true;
                    stack.push(next);
                }
            }
        }
        count
    }
}

/// The four cells `step` away from `coord`, in north, south, west, east order.
/// Coordinates that would underflow or overflow are dropped.
fn offsets(coord: Coord, step: u16) -> impl Iterator<Item = Coord> {
    let (row, col) = coord;
    [
        row.checked_sub(step).map(|r| (r, col)),
        row.checked_add(step).map(|r| (r, col)),
        col.checked_sub(step).map(|c| (row, c)),
        col.checked_add(step).map(|c| (row, c)),
    ]
    .into_iter()
    .flatten()
}

/// Manhattan distance between two cells.
pub fn manhattan(a: Coord, b: Coord) -> u32 {
    (a.0.abs_diff(b.0) + a.1.abs_diff(b.1)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_sizes() {
        for size in [0, 1, 3, 4, 6, 20, 256, 257] {
            assert!(
                matches!(Maze::new(size, None), Err(MazeError::InvalidSize(s)) if s == size),
                "size {size} should be rejected"
            );
        }
        for size in [5, 15, 21, 31, 41, 255] {
            assert!(Maze::new(size, None).is_ok(), "size {size} should be accepted");
        }
    }

    #[test]
    fn test_entrance_and_exit() {
        let maze = Maze::new(15, None).unwrap();
        assert_eq!(maze.entrance(), (1, 1));
        assert_eq!(maze.exit(), (13, 13));
        assert!(!maze.is_generated());
    }

    #[test]
    fn test_carve_keeps_outer_ring() {
        let mut maze = Maze::new(5, None).unwrap();
        assert!(!maze.carve((0, 1)));
        assert!(!maze.carve((1, 4)));
        assert!(!maze.carve((9, 9)));
        assert!(maze.carve((1, 1)));
        assert!(maze.is_path((1, 1)));
    }

    #[test]
    fn test_carve_passage() {
        let mut maze = Maze::new(5, None).unwrap();
        maze.carve((1, 1));
        maze.carve_passage((1, 1), (1, 3));
        assert!(maze.is_path((1, 2)));
        assert!(maze.is_path((1, 3)));
        assert!(maze.is_reachable((1, 1), (1, 3)));
        assert!(!maze.is_reachable((1, 1), (3, 3)));
    }

    #[test]
    fn test_room_neighbors_skip_outer_ring() {
        let maze = Maze::new(7, None).unwrap();
        let neighbors = maze.room_neighbors((3, 3)).collect::<Vec<_>>();
        assert_eq!(neighbors, vec![(1, 3), (5, 3), (3, 1), (3, 5)]);
        let corner = maze.room_neighbors((1, 1)).collect::<Vec<_>>();
        assert_eq!(corner, vec![(3, 1), (1, 3)]);
    }

    #[test]
    fn test_is_perfect_detects_cycles() {
        let mut maze = Maze::new(5, None).unwrap();
        maze.carve((1, 1));
        maze.carve_passage((1, 1), (1, 3));
        maze.carve_passage((1, 3), (3, 3));
        maze.carve_passage((3, 3), (3, 1));
        assert!(maze.is_perfect());
        // Closing the loop introduces a cycle
        maze.carve_passage((3, 1), (1, 1));
        assert!(!maze.is_perfect());
    }

    #[test]
    fn test_reset_restores_walls() {
        let mut maze = Maze::new(5, None).unwrap();
        maze.carve((1, 1));
        maze.mark_generated(true);
        maze.reset();
        assert!(!maze.is_generated());
        assert!(maze.grid().cells().iter().all(|&c| c == Cell::Wall));
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(manhattan((1, 1), (13, 13)), 24);
        assert_eq!(manhattan((5, 2), (2, 5)), 6);
    }
}
