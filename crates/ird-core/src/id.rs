//! Grid coordinates and the state sum type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell coordinate: `x` is the column, `y` the row.
///
/// Signed so that a move off the top or left edge is representable
/// before the MDP rejects it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Column index.
    pub x: i32,
    /// Row index.
    pub y: i32,
}

impl Point {
    /// Create a point at column `x`, row `y`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An MDP state: a position in the underlying space, or the terminal
/// sentinel reached only through EXIT.
///
/// `P` is [`Point`] for gridworlds and a plain index for N-state MDPs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State<P> {
    /// A regular state at the given position.
    At(P),
    /// The absorbing end-of-episode state. It has no actions.
    Terminal,
}

impl<P> State<P> {
    /// Whether this is the terminal sentinel.
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Terminal)
    }

    /// The position, or `None` for the terminal sentinel.
    pub fn position(&self) -> Option<&P> {
        match self {
            State::At(p) => Some(p),
            State::Terminal => None,
        }
    }
}

impl<P: fmt::Display> fmt::Display for State<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::At(p) => write!(f, "{p}"),
            State::Terminal => f.write_str("terminal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_has_no_position() {
        let s: State<Point> = State::Terminal;
        assert!(s.is_terminal());
        assert_eq!(s.position(), None);
        assert_eq!(s.to_string(), "terminal");
    }

    #[test]
    fn cell_state_displays_coordinates() {
        let s = State::At(Point::new(3, 1));
        assert!(!s.is_terminal());
        assert_eq!(s.position(), Some(&Point::new(3, 1)));
        assert_eq!(s.to_string(), "(3, 1)");
    }

    #[test]
    fn point_from_tuple() {
        assert_eq!(Point::from((4, 2)), Point::new(4, 2));
    }
}
