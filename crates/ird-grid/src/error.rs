//! Grid validation errors.

use std::fmt;

use ird_core::Point;
use thiserror::Error;

/// One of the four grid borders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Border {
    /// Row 0.
    Top,
    /// The last row.
    Bottom,
    /// Column 0.
    Left,
    /// The last column.
    Right,
}

impl fmt::Display for Border {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Border::Top => "top",
            Border::Bottom => "bottom",
            Border::Left => "left",
            Border::Right => "right",
        };
        f.write_str(name)
    }
}

/// A grid failed one of its structural invariants.
///
/// Every variant identifies the invariant that broke; no partially
/// validated layout is ever produced.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GridError {
    /// The grid has no rows, or its first row has no cells.
    #[error("grid must have at least one row and one column")]
    Empty,
    /// A row's length differs from the first row's.
    #[error("ragged grid: row {row} has {found} cells, expected {expected}")]
    Ragged {
        /// Index of the offending row.
        row: usize,
        /// Width of row 0.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A border cell is not a wall.
    #[error("{border} border must be a wall, found non-wall at {point}")]
    BorderNotWall {
        /// Which border.
        border: Border,
        /// The first non-wall cell on that border.
        point: Point,
    },
    /// A cell token is not a wall, empty space, start marker or number.
    #[error("invalid cell {token:?} at {point}: must be X, A, blank space, or a number")]
    InvalidToken {
        /// The raw token.
        token: String,
        /// Where it appeared.
        point: Point,
    },
    /// The start marker must appear exactly once.
    #[error("start marker 'A' must be present exactly once, found {found}")]
    StartCount {
        /// Number of start markers seen.
        found: usize,
    },
    /// No cell carries a reward.
    #[error("there must be at least one reward cell")]
    NoReward,
}
