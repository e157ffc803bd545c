use std::sync::mpsc::Sender;

use super::{Coord, cell::Cell};

/// A change to the grid, emitted to an optional listener as it happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    /// The whole grid was (re)created filled with `cell`.
    Initial { cell: Cell, size: u16 },
    /// A single cell changed from `old` to `new`.
    Update { coord: Coord, old: Cell, new: Cell },
}

/// Square matrix of cells addressed by `(row, col)`.
pub struct Grid {
    data: Box<[Cell]>,
    size: u16,
    sender: Option<Sender<GridEvent>>,
}

impl Grid {
    pub fn new(size: u16, cell: Cell, sender: Option<Sender<GridEvent>>) -> Self {
        let data = vec![cell; size as usize * size as usize].into_boxed_slice();
        if let Some(s) = &sender {
            // A dropped receiver only means nobody is watching
            let _ = s.send(GridEvent::Initial { cell, size });
        }
        Grid { data, size, sender }
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.data
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.size && coord.1 < self.size
    }

    pub fn is_boundary(&self, coord: Coord) -> bool {
        coord.0 == 0 || coord.1 == 0 || coord.0 == self.size - 1 || coord.1 == self.size - 1
    }

    fn ravel_index(&self, coord: Coord) -> usize {
        coord.0 as usize * self.size as usize + coord.1 as usize
    }

    /// Overwrite every cell with `cell`, announcing it as a fresh grid.
    pub fn fill(&mut self, cell: Cell) {
        self.data.iter_mut().for_each(|c| *c = cell);
        if let Some(s) = &self.sender {
            let _ = s.send(GridEvent::Initial {
                cell,
                size: self.size,
            });
        }
    }

    /// Set a cell, emitting an update when the value actually changes.
    /// Out-of-bounds coordinates are ignored. Returns whether the cell changed.
    pub fn set(&mut self, coord: Coord, cell: Cell) -> bool {
        if !self.in_bounds(coord) {
            return false;
        }
        let idx = self.ravel_index(coord);
        let old = self.data[idx];
        if old == cell {
            return false;
        }
        self.data[idx] = cell;
        if let Some(sender) = &self.sender {
            let _ = sender.send(GridEvent::Update {
                coord,
                old,
                new: cell,
            });
        }
        true
    }

    /// Turn a cell into a path. Silently does nothing out of bounds.
    pub fn carve(&mut self, coord: Coord) -> bool {
        self.set(coord, Cell::Path)
    }

    /// Bounds-checked read.
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.in_bounds(coord).then(|| self.data[self.ravel_index(coord)])
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.data[self.ravel_index(index)]
    }
}
