use std::error::Error;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MazeError {
    /// Width or height is even or smaller than 3.
    InvalidDimension { width: usize, height: usize },
    /// A write targeted a cell outside the grid.
    OutOfRange { x: usize, y: usize },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::InvalidDimension { width, height } => write!(
                f,
                "invalid maze dimensions {}x{}: width and height must be odd and at least 3",
                width, height
            ),
            MazeError::OutOfRange { x, y } => write!(f, "cell ({}, {}) is outside the grid", x, y),
        }
    }
}

impl Error for MazeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimension_names_both_sides() {
        let msg = MazeError::InvalidDimension {
            width: 20,
            height: 21,
        }
        .to_string();
        assert!(msg.contains("20x21"));
    }
}
