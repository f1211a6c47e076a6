use crate::grid::{Grid, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }

    /// Maps a raw step to a direction. Diagonal, zero and multi-cell steps
    /// have no direction.
    pub fn from_delta(dx: isize, dy: isize) -> Option<Dir> {
        Dir::ALL.into_iter().find(|dir| dir.delta() == (dx, dy))
    }
}

fn step(pos: Pos, dir: Dir) -> Option<Pos> {
    let (dx, dy) = dir.delta();
    Some(Pos {
        x: pos.x.checked_add_signed(dx)?,
        y: pos.y.checked_add_signed(dy)?,
    })
}

/// Returns the cell one step from `pos`, or `pos` itself when that cell is
/// off the grid or a wall.
pub fn try_move(grid: &Grid, pos: Pos, dir: Dir) -> Pos {
    match step(pos, dir) {
        Some(next) if grid.is_open(next.x, next.y) => next,
        _ => pos,
    }
}
