use super::{frame::Frame, step::Step};

/// Anything that can show animation frames.
///
/// `draw` is called once per step, after `step` has been applied to `frame`,
/// so implementations may redraw incrementally or wholesale.
pub trait Surface {
    fn draw(&mut self, frame: &Frame, step: &Step) -> std::io::Result<()>;

    /// Repaint the whole frame, e.g. after the output area was cleared.
    fn redraw(&mut self, _frame: &Frame) -> std::io::Result<()> {
        Ok(())
    }
}

/// Discards every frame. Used for headless runs.
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn draw(&mut self, _frame: &Frame, _step: &Step) -> std::io::Result<()> {
        Ok(())
    }
}

/// Keeps every step it was shown and the most recent frame.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    steps: Vec<Step>,
    redraws: usize,
    last_frame: Option<Frame>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// How many full repaints were requested.
    pub fn redraws(&self) -> usize {
        self.redraws
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    fn record_frame(&mut self, frame: &Frame) {
        match &mut self.last_frame {
            Some(last) => last.clone_from(frame),
            None => self.last_frame = Some(frame.clone()),
        }
    }
}

impl Surface for RecordingSurface {
    fn draw(&mut self, frame: &Frame, step: &Step) -> std::io::Result<()> {
        self.steps.push(*step);
        self.record_frame(frame);
        Ok(())
    }

    fn redraw(&mut self, frame: &Frame) -> std::io::Result<()> {
        self.redraws += 1;
        self.record_frame(frame);
        Ok(())
    }
}
