//! Maze generation and pathfinding with paced, cancellable animation.
//!
//! A [`session::MazeSession`] owns one maze, carves it with one of the
//! [`generators`], searches it with one of the [`solvers`] and replays every
//! change onto an [`animation::Surface`] at a user-controlled speed.

pub mod animation;
pub mod app;
pub mod config;
pub mod error;
pub mod generators;
pub mod maze;
pub mod session;
pub mod solvers;
