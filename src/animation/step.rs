use std::collections::VecDeque;
use std::sync::mpsc::Receiver;

use crate::{
    maze::{Cell, Coord, grid::GridEvent},
    solvers::Solution,
};

/// One discrete unit of animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Replace the whole grid with `cell`; the visited set and path are dropped too.
    Fill { cell: Cell, size: u16 },
    /// A single grid cell changed.
    Carve { coord: Coord, cell: Cell },
    /// Drop the visited set and path, keeping the grid.
    ClearOverlay,
    /// The solver examined a cell.
    Visit(Coord),
    /// A cell of the discovered route.
    Route(Coord),
}

impl From<GridEvent> for Step {
    fn from(event: GridEvent) -> Self {
        match event {
            GridEvent::Initial { cell, size } => Step::Fill { cell, size },
            GridEvent::Update { coord, new, .. } => Step::Carve { coord, cell: new },
        }
    }
}

/// FIFO of pending steps, drained one at a time by the animator.
#[derive(Debug, Default)]
pub struct StepQueue {
    steps: VecDeque<Step>,
}

impl StepQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push_back(step);
    }

    /// Move every grid event currently waiting on `events` into the queue.
    pub fn extend_from_events(&mut self, events: &Receiver<GridEvent>) {
        self.steps.extend(events.try_iter().map(Step::from));
    }

    /// Queue a solve: clear the old overlay, replay the visitation order, then trace the route.
    pub fn extend_from_solution(&mut self, solution: &Solution) {
        self.steps.push_back(Step::ClearOverlay);
        self.steps
            .extend(solution.visited.iter().copied().map(Step::Visit));
        self.steps.extend(solution.path.iter().copied().map(Step::Route));
    }

    pub fn pop(&mut self) -> Option<Step> {
        self.steps.pop_front()
    }

    /// Drop everything still pending.
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_events_become_steps_in_order() {
        let (tx, rx) = std::sync::mpsc::channel();
        tx.send(GridEvent::Initial {
            cell: Cell::Wall,
            size: 5,
        })
        .unwrap();
        tx.send(GridEvent::Update {
            coord: (1, 1),
            old: Cell::Wall,
            new: Cell::Path,
        })
        .unwrap();

        let mut queue = StepQueue::new();
        queue.extend_from_events(&rx);
        assert_eq!(queue.len(), 2);
        assert_eq!(
            queue.pop(),
            Some(Step::Fill {
                cell: Cell::Wall,
                size: 5
            })
        );
        assert_eq!(
            queue.pop(),
            Some(Step::Carve {
                coord: (1, 1),
                cell: Cell::Path
            })
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_solution_steps() {
        let solution = Solution {
            visited: vec![(1, 1), (1, 2), (2, 1)],
            path: vec![(1, 1), (2, 1)],
        };
        let mut queue = StepQueue::new();
        queue.extend_from_solution(&solution);
        let steps = std::iter::from_fn(|| queue.pop()).collect::<Vec<_>>();
        assert_eq!(
            steps,
            vec![
                Step::ClearOverlay,
                Step::Visit((1, 1)),
                Step::Visit((1, 2)),
                Step::Visit((2, 1)),
                Step::Route((1, 1)),
                Step::Route((2, 1)),
            ]
        );
    }
}
