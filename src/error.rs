use thiserror::Error;

/// Errors surfaced by a maze session.
#[derive(Error, Debug)]
pub enum MazeError {
    #[error("invalid maze size {0}: must be odd and between 5 and 255")]
    InvalidSize(usize),
    #[error("unknown generation algorithm `{0}` (expected `recursive` or `prim`)")]
    UnknownGenerator(String),
    #[error("unknown solving algorithm `{0}` (expected `astar` or `dijkstra`)")]
    UnknownSolver(String),
    #[error("another generation or solve is still in progress")]
    Busy,
    #[error("the maze has not been generated yet")]
    NotGenerated,
    /// The solver found no route on a maze that claims to be perfect.
    #[error("no path from the entrance to the exit on a generated maze")]
    Unreachable,
    /// The generator finished without connecting the entrance to the exit.
    #[error("generation left the exit disconnected from the entrance")]
    Disconnected,
    /// A playback thread died while drawing, as opposed to being cancelled.
    #[error("the animation thread panicked while drawing")]
    PlaybackPanicked,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MazeError>;
