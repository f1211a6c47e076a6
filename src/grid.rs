use std::fmt::{self, Display};

use crate::error::MazeError;

pub const MIN_DIMENSION: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Open,
}

impl Cell {
    pub const fn to_char(self) -> char {
        match self {
            Self::Wall => '█',
            Self::Open => ' ',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Fixed-size wall/open grid, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-wall grid. Both dimensions must be odd and at least 3.
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        let invalid = MazeError::InvalidDimension { width, height };
        if !valid_dimension(width) || !valid_dimension(height) {
            return Err(invalid);
        }
        let len = width.checked_mul(height).ok_or(invalid)?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Wall; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }

    /// Off-grid coordinates are never open.
    pub fn is_open(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == Some(Cell::Open)
    }

    pub fn set_open(&mut self, x: usize, y: usize) -> Result<(), MazeError> {
        if !self.in_bounds(x, y) {
            return Err(MazeError::OutOfRange { x, y });
        }
        self.cells[y * self.width + x] = Cell::Open;
        Ok(())
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Open)
            .map(move |(idx, _)| Pos::new(idx % width, idx / width))
    }
}

fn valid_dimension(n: usize) -> bool {
    n >= MIN_DIMENSION && n % 2 == 1
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
