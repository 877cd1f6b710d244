//! The five-action gridworld vocabulary.
//!
//! Four cardinal moves carry a unit displacement in `(x, y)` screen
//! coordinates (y grows downward, so NORTH is `(0, -1)`). EXIT is a
//! distinguished non-geometric token that leaves a reward cell for the
//! terminal sentinel.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DirectionError;
use crate::id::Point;

/// A gridworld action.
///
/// The discriminants fix the compact numeric encoding used by downstream
/// numeric models: NORTH, SOUTH, EAST, WEST, EXIT.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// Move one cell up (y - 1).
    North = 0,
    /// Move one cell down (y + 1).
    South = 1,
    /// Move one cell right (x + 1).
    East = 2,
    /// Move one cell left (x - 1).
    West = 3,
    /// Leave a reward cell for the terminal state.
    Exit = 4,
}

impl Direction {
    /// Number of actions in the vocabulary.
    pub const COUNT: usize = 5;

    /// Every action in index order.
    pub const ALL: [Direction; Self::COUNT] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Exit,
    ];

    /// The four geometric moves, in the order MDPs offer them.
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Returns the `(dx, dy)` displacement, or `None` for EXIT.
    pub fn offset(self) -> Option<(i32, i32)> {
        match self {
            Direction::North => Some((0, -1)),
            Direction::South => Some((0, 1)),
            Direction::East => Some((1, 0)),
            Direction::West => Some((-1, 0)),
            Direction::Exit => None,
        }
    }

    /// Whether this is one of the four geometric moves.
    pub fn is_cardinal(self) -> bool {
        self != Direction::Exit
    }

    /// Take one step from `point` in this direction.
    ///
    /// No bounds or wall checks happen here; the MDP decides what a
    /// blocked move means.
    pub fn move_point(self, point: Point) -> Result<Point, DirectionError> {
        let (dx, dy) = self
            .offset()
            .ok_or(DirectionError::NotCardinal { direction: self })?;
        Ok(Point::new(point.x + dx, point.y + dy))
    }

    /// The two directions perpendicular to this one.
    ///
    /// NORTH/SOUTH drift to `[EAST, WEST]`; EAST/WEST drift to
    /// `[NORTH, SOUTH]`. The order is part of the transition model's
    /// determinism contract.
    pub fn adjacent(self) -> Result<[Direction; 2], DirectionError> {
        match self {
            Direction::North | Direction::South => Ok([Direction::East, Direction::West]),
            Direction::East | Direction::West => Ok([Direction::North, Direction::South]),
            Direction::Exit => Err(DirectionError::NotCardinal { direction: self }),
        }
    }

    /// Position in [`Direction::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`index`](Self::index).
    pub fn from_index(index: usize) -> Option<Direction> {
        Self::ALL.get(index).copied()
    }
}

impl TryFrom<usize> for Direction {
    type Error = DirectionError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Direction::from_index(index).ok_or(DirectionError::IndexOutOfRange { index })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Exit => "exit",
        };
        f.write_str(name)
    }
}
