//! Perfect-maze generation and single-player movement for a maze escape game.
//!
//! [`generate`] carves a maze on a grid of odd dimensions; [`try_move`]
//! decides whether a one-cell step is legal; [`Session`] tracks the player
//! and the run timer. None of it touches the terminal.

pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod movement;
pub mod session;

pub use config::Config;
pub use error::MazeError;
pub use generator::{generate, generate_with_rng, Maze};
pub use grid::{Cell, Grid, Pos};
pub use movement::{try_move, Dir};
pub use session::Session;
