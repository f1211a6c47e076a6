use std::time::{Duration, Instant};

use crate::generator::Maze;
use crate::grid::Pos;
use crate::movement::{try_move, Dir};

/// One play-through of a maze: where the player stands and how long the run
/// has taken so far.
pub struct Session {
    maze: Maze,
    player: Pos,
    started: Instant,
    finished: Option<Duration>,
}

impl Session {
    pub fn new(maze: Maze, now: Instant) -> Self {
        let player = maze.start;
        // A 3x3 maze starts on its exit.
        let finished = (player == maze.exit).then_some(Duration::ZERO);
        Self {
            maze,
            player,
            started: now,
            finished,
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    /// Moves the player one cell. Ignored once the exit has been reached.
    pub fn apply(&mut self, dir: Dir, now: Instant) -> Pos {
        if self.finished.is_some() {
            return self.player;
        }
        self.player = try_move(&self.maze.grid, self.player, dir);
        if self.player == self.maze.exit {
            self.finished = Some(now.saturating_duration_since(self.started));
        }
        self.player
    }

    /// Live time while running, frozen time once finished.
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.finished
            .unwrap_or_else(|| now.saturating_duration_since(self.started))
    }
}
