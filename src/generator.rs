//! Randomized depth-first maze carving.
//!
//! Rooms are the cells with both coordinates odd. Carving walks from room to
//! room in two-cell strides and opens the single wall cell it crosses, so the
//! open cells form a spanning tree over every room reachable from the start.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::MazeError;
use crate::grid::{Grid, Pos};

const STRIDES: [(isize, isize); 4] = [(0, -2), (0, 2), (-2, 0), (2, 0)];

/// A generated maze with its fixed entry and exit cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    pub grid: Grid,
    pub start: Pos,
    pub exit: Pos,
}

/// One room on the carve stack, with the order it will try its neighbours in.
struct Frame {
    room: Pos,
    strides: [(isize, isize); 4],
    next: usize,
}

impl Frame {
    fn enter(grid: &mut Grid, room: Pos, rng: &mut impl Rng) -> Result<Self, MazeError> {
        grid.set_open(room.x, room.y)?;
        let mut strides = STRIDES;
        strides.shuffle(rng);
        Ok(Self {
            room,
            strides,
            next: 0,
        })
    }
}

/// Generates a maze, seeding the random source with `seed` when given so the
/// same seed and dimensions always give the same grid.
pub fn generate(width: usize, height: usize, seed: Option<u64>) -> Result<Maze, MazeError> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate_with_rng(width, height, &mut rng)
}

pub fn generate_with_rng(
    width: usize,
    height: usize,
    rng: &mut impl Rng,
) -> Result<Maze, MazeError> {
    let mut grid = Grid::new(width, height)?;
    let start = Pos::new(1, 1);
    let exit = Pos::new(width - 2, height - 2);

    let rooms = carve(&mut grid, start, rng)?;
    // The exit stays enterable even if carving never reached it.
    grid.set_open(exit.x, exit.y)?;

    debug!("carved {}x{} maze: {} rooms", width, height, rooms);
    Ok(Maze { grid, start, exit })
}

/// Carves from `start` and returns how many rooms were opened.
fn carve(grid: &mut Grid, start: Pos, rng: &mut impl Rng) -> Result<usize, MazeError> {
    let mut stack = vec![Frame::enter(grid, start, rng)?];
    let mut rooms = 1;

    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.strides.len() {
            stack.pop();
            continue;
        }
        let (dx, dy) = frame.strides[frame.next];
        frame.next += 1;
        let room = frame.room;

        let Some(next) = interior_neighbour(grid, room, dx, dy) else {
            continue;
        };
        if grid.is_open(next.x, next.y) {
            continue;
        }

        let wall_x = (room.x + next.x) / 2;
        let wall_y = (room.y + next.y) / 2;
        grid.set_open(wall_x, wall_y)?;
        stack.push(Frame::enter(grid, next, rng)?);
        rooms += 1;
    }
    Ok(rooms)
}

/// The room two cells away, if it lies strictly inside the outer wall ring.
fn interior_neighbour(grid: &Grid, room: Pos, dx: isize, dy: isize) -> Option<Pos> {
    let x = room.x.checked_add_signed(dx)?;
    let y = room.y.checked_add_signed(dy)?;
    if x == 0 || y == 0 || x >= grid.width() - 1 || y >= grid.height() - 1 {
        return None;
    }
    Some(Pos::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room_count(maze: &Maze) -> usize {
        maze.grid
            .open_cells()
            .filter(|p| p.x % 2 == 1 && p.y % 2 == 1)
            .count()
    }

    #[test]
    fn small_maze_has_fixed_endpoints() {
        let maze = generate(5, 5, Some(1)).unwrap();
        assert_eq!(maze.grid.width(), 5);
        assert_eq!(maze.grid.height(), 5);
        assert_eq!(maze.start, Pos::new(1, 1));
        assert_eq!(maze.exit, Pos::new(3, 3));
        assert!(maze.grid.is_open(1, 1));
        assert!(maze.grid.is_open(3, 3));
    }

    #[test]
    fn every_room_is_carved() {
        let maze = generate(11, 7, Some(7)).unwrap();
        assert_eq!(room_count(&maze), 5 * 3);
        // A spanning tree over n rooms opens n - 1 walls.
        assert_eq!(maze.grid.open_cells().count(), 2 * 15 - 1);
    }

    #[test]
    fn smallest_maze_is_a_single_room() {
        let maze = generate(3, 3, Some(0)).unwrap();
        assert_eq!(maze.start, maze.exit);
        assert_eq!(maze.grid.open_cells().collect::<Vec<_>>(), vec![Pos::new(1, 1)]);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generate(21, 21, Some(42)).unwrap();
        let b = generate(21, 21, Some(42)).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            a.grid.open_cells().collect::<Vec<_>>(),
            b.grid.open_cells().collect::<Vec<_>>()
        );
    }

    #[test]
    fn different_seeds_usually_differ() {
        let a = generate(21, 21, Some(1)).unwrap();
        let b = generate(21, 21, Some(2)).unwrap();
        assert_ne!(a.grid, b.grid);
    }

    #[test]
    fn injected_rng_is_used() {
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        let a = generate_with_rng(15, 9, &mut rng_a).unwrap();
        let b = generate_with_rng(15, 9, &mut rng_b).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, generate(15, 9, Some(99)).unwrap());
    }

    #[test]
    fn even_width_is_rejected() {
        assert_eq!(
            generate(20, 21, None),
            Err(MazeError::InvalidDimension {
                width: 20,
                height: 21
            })
        );
    }

    #[test]
    fn overflowing_size_is_an_error_not_a_panic() {
        assert_eq!(
            generate(usize::MAX, 3, Some(1)),
            Err(MazeError::InvalidDimension {
                width: usize::MAX,
                height: 3
            })
        );
    }

    #[test]
    fn large_maze_does_not_recurse() {
        let maze = generate(401, 401, Some(3)).unwrap();
        assert_eq!(room_count(&maze), 200 * 200);
    }
}
