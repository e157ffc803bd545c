use std::io::{Stdout, Write};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::{
    animation::{Frame, Step, Surface},
    maze::{Coord, Tile},
};

/// Draws frames onto the terminal, two columns per cell, with status lines
/// underneath the grid.
pub struct TerminalSurface {
    /// Standard output handle to write to the terminal
    stdout: Stdout,
    /// Size of the grid last drawn
    grid_size: Option<u16>,
    /// The terminal was too small on the last full redraw
    too_small: bool,
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSurface {
    /// Rows reserved below the grid for status text.
    pub const NUM_STATUS_ROWS: u16 = 3;

    pub fn new() -> Self {
        Self {
            stdout: std::io::stdout(),
            grid_size: None,
            too_small: false,
        }
    }

    /// Check if terminal size is sufficient for the given grid size.
    /// If not, show a message in place of the grid.
    fn check_size(&mut self, size: u16) -> std::io::Result<bool> {
        let (term_width, term_height) = terminal::size()?;
        if term_width >= size * Tile::CELL_WIDTH && term_height >= size + Self::NUM_STATUS_ROWS {
            return Ok(true);
        }
        let msg = format!(
            "Terminal size is too small ({}x{}) for a {}x{} maze. Please resize the terminal.\r\n",
            term_width, term_height, size, size
        );
        queue!(
            self.stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold)),
        )?;
        self.stdout.flush()?;
        Ok(false)
    }

    fn draw_all(&mut self, frame: &Frame) -> std::io::Result<()> {
        let size = frame.size();
        if self.grid_size != Some(size) {
            self.stdout.queue(terminal::Clear(ClearType::All))?;
        }
        self.grid_size = Some(size);
        self.too_small = !self.check_size(size)?;
        if self.too_small {
            tracing::warn!(size, "terminal too small to draw the maze");
            return Ok(());
        }

        self.stdout.queue(cursor::MoveTo(0, 0))?;
        for row in 0..size {
            for col in 0..size {
                self.stdout.queue(style::Print(frame.tile((row, col))))?;
            }
            self.stdout.queue(style::Print("\r\n"))?;
        }
        self.stdout.flush()
    }

    fn draw_cell(&mut self, frame: &Frame, coord: Coord) -> std::io::Result<()> {
        if self.too_small {
            return Ok(());
        }
        // Move the cursor to the cell and print its resolved tile
        queue!(
            self.stdout,
            cursor::MoveTo(coord.1 * Tile::CELL_WIDTH, coord.0),
            style::Print(frame.tile(coord))
        )?;
        self.stdout.flush()
    }

    /// Replace the status rows below the grid. Lines are cut to the terminal width.
    pub fn draw_status(&mut self, lines: &[String]) -> std::io::Result<()> {
        let Some(size) = self.grid_size else {
            return Ok(());
        };
        let width = terminal::size().map(|(w, _)| w as usize).unwrap_or(80);
        for (i, line) in lines.iter().take(Self::NUM_STATUS_ROWS as usize).enumerate() {
            let (text, _) = line.unicode_truncate(width);
            queue!(
                self.stdout,
                cursor::MoveTo(0, size + i as u16),
                terminal::Clear(ClearType::CurrentLine),
            )?;
            let styled = match i {
                0 => text.with(Color::Green).attribute(Attribute::Bold),
                1 => text.with(Color::Yellow),
                _ => text.with(Color::Cyan),
            };
            self.stdout.queue(style::PrintStyledContent(styled))?;
        }
        self.stdout.flush()
    }
}

impl Surface for TerminalSurface {
    fn draw(&mut self, frame: &Frame, step: &Step) -> std::io::Result<()> {
        if self.grid_size != Some(frame.size()) {
            return self.draw_all(frame);
        }
        match *step {
            Step::Fill { .. } | Step::ClearOverlay => self.draw_all(frame),
            Step::Carve { coord, .. } | Step::Visit(coord) | Step::Route(coord) => {
                self.draw_cell(frame, coord)
            }
        }
    }

    /// Clear the screen and repaint every cell, e.g. after a terminal resize.
    fn redraw(&mut self, frame: &Frame) -> std::io::Result<()> {
        self.stdout.queue(terminal::Clear(ClearType::All))?;
        self.draw_all(frame)
    }
}
