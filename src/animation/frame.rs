use crate::maze::{Cell, Coord, Tile, grid::Grid};

use super::step::Step;

/// What the rendering surface sees on each tick: the grid, the visited set
/// and the path, rebuilt step by step from the animation queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    size: u16,
    cells: Vec<Cell>,
    visited: Vec<Coord>,
    path: Vec<Coord>,
    // Membership masks so tile lookups stay O(1)
    seen_mask: Vec<bool>,
    path_mask: Vec<bool>,
}

impl Frame {
    /// An all-wall frame of the given size.
    pub fn new(size: u16) -> Self {
        let len = size as usize * size as usize;
        Frame {
            size,
            cells: vec![Cell::Wall; len],
            visited: Vec::new(),
            path: Vec::new(),
            seen_mask: vec![false; len],
            path_mask: vec![false; len],
        }
    }

    /// Snapshot of a grid with no overlay.
    pub fn from_grid(grid: &Grid) -> Self {
        let mut frame = Frame::new(grid.size());
        frame.cells.copy_from_slice(grid.cells());
        frame
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn visited(&self) -> &[Coord] {
        &self.visited
    }

    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        (coord.0 < self.size && coord.1 < self.size)
            .then(|| coord.0 as usize * self.size as usize + coord.1 as usize)
    }

    pub fn apply(&mut self, step: &Step) {
        match *step {
            Step::Fill { cell, size } => {
                if size != self.size {
                    *self = Frame::new(size);
                }
                self.cells.iter_mut().for_each(|c| *c = cell);
                self.clear_overlay();
            }
            Step::Carve { coord, cell } => {
                if let Some(idx) = self.index(coord) {
                    self.cells[idx] = cell;
                }
            }
            Step::ClearOverlay => self.clear_overlay(),
            Step::Visit(coord) => {
                if let Some(idx) = self.index(coord) {
                    self.seen_mask[idx] = true;
                    self.visited.push(coord);
                }
            }
            Step::Route(coord) => {
                if let Some(idx) = self.index(coord) {
                    self.path_mask[idx] = true;
                    self.path.push(coord);
                }
            }
        }
    }

    fn clear_overlay(&mut self) {
        self.visited.clear();
        self.path.clear();
        self.seen_mask.iter_mut().for_each(|v| *v = false);
        self.path_mask.iter_mut().for_each(|v| *v = false);
    }

    /// Resolve the tile shown at `coord`, with precedence
    /// start > end > solution > visited > open > wall.
    pub fn tile(&self, coord: Coord) -> Tile {
        let Some(idx) = self.index(coord) else {
            return Tile::Wall;
        };
        if coord == (1, 1) {
            Tile::Start
        } else if coord == (self.size.saturating_sub(2), self.size.saturating_sub(2)) {
            Tile::End
        } else if self.path_mask[idx] {
            Tile::Solution
        } else if self.seen_mask[idx] {
            Tile::Visited
        } else if self.cells[idx].is_path() {
            Tile::Open
        } else {
            Tile::Wall
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_precedence() {
        let mut frame = Frame::new(5);
        for coord in [(1, 1), (1, 2), (1, 3), (2, 3), (3, 3)] {
            frame.apply(&Step::Carve {
                coord,
                cell: Cell::Path,
            });
        }
        assert_eq!(frame.tile((0, 0)), Tile::Wall);
        assert_eq!(frame.tile((1, 2)), Tile::Open);

        frame.apply(&Step::Visit((1, 1)));
        frame.apply(&Step::Visit((1, 2)));
        frame.apply(&Step::Visit((1, 3)));
        assert_eq!(frame.tile((1, 1)), Tile::Start);
        assert_eq!(frame.tile((1, 2)), Tile::Visited);

        frame.apply(&Step::Route((1, 2)));
        frame.apply(&Step::Route((3, 3)));
        assert_eq!(frame.tile((1, 2)), Tile::Solution);
        assert_eq!(frame.tile((1, 3)), Tile::Visited);
        assert_eq!(frame.tile((3, 3)), Tile::End);
        assert_eq!(frame.tile((2, 3)), Tile::Open);
    }

    #[test]
    fn test_fill_clears_overlay_and_resizes() {
        let mut frame = Frame::new(5);
        frame.apply(&Step::Visit((1, 1)));
        frame.apply(&Step::Route((1, 1)));
        frame.apply(&Step::Fill {
            cell: Cell::Wall,
            size: 7,
        });
        assert_eq!(frame.size(), 7);
        assert_eq!(frame.cells().len(), 49);
        assert!(frame.visited().is_empty());
        assert!(frame.path().is_empty());
    }

    #[test]
    fn test_out_of_bounds_steps_are_ignored() {
        let mut frame = Frame::new(5);
        frame.apply(&Step::Visit((9, 9)));
        frame.apply(&Step::Carve {
            coord: (5, 0),
            cell: Cell::Path,
        });
        assert!(frame.visited().is_empty());
        assert_eq!(frame, Frame::new(5));
    }
}
