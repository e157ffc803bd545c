use crossterm::style::{Color, Stylize};

use std::fmt;

/// State of a single grid cell. The generator only ever turns walls into paths.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Wall,
    Path,
}

impl Cell {
    pub fn is_path(self) -> bool {
        self == Cell::Path
    }
}

/// What a rendering surface shows for a cell once the visited set and the
/// solution path are layered over the grid.
///
/// Variants are declared from highest to lowest display precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tile {
    /// The maze entrance.
    Start,
    /// The maze exit.
    End,
    /// A cell on the discovered solution path.
    Solution,
    /// A cell examined by the solver.
    Visited,
    /// A carved cell nobody has touched yet.
    Open,
    Wall,
}

impl Tile {
    /// The width of each tile when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Tile::Start => "🟩".with(Color::Green),
            Tile::End => "🟥".with(Color::Red),
            Tile::Solution => "🟨".with(Color::Yellow),
            Tile::Visited => "* ".with(Color::Blue),
            Tile::Open => "  ".with(Color::Reset),
            Tile::Wall => "⬜".with(Color::White),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Tile::CELL_WIDTH as usize,
                "Each tile must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_precedence_order() {
        assert!(Tile::Start < Tile::End);
        assert!(Tile::End < Tile::Solution);
        assert!(Tile::Solution < Tile::Visited);
        assert!(Tile::Visited < Tile::Open);
        assert!(Tile::Open < Tile::Wall);
    }

    #[test]
    fn test_tiles_render_with_symbols() {
        // Display asserts the two-column width in debug builds
        for tile in [
            Tile::Start,
            Tile::End,
            Tile::Solution,
            Tile::Visited,
            Tile::Open,
            Tile::Wall,
        ] {
            assert!(!tile.to_string().is_empty());
        }
    }
}
