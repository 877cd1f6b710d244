//! Error types for the action vocabulary.

use thiserror::Error;

use crate::direction::Direction;

/// Errors from geometric operations on a [`Direction`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DirectionError {
    /// The operation needs a displacement vector, but EXIT has none.
    #[error("direction {direction} is not a cardinal move")]
    NotCardinal {
        /// The offending direction.
        direction: Direction,
    },
    /// A numeric index is outside the five-action vocabulary.
    #[error("direction index {index} out of range (expected 0..{})", Direction::COUNT)]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
    },
}
