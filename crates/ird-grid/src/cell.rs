//! Grid cell tokens.

/// The contents of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell {
    /// Impassable. Every border cell must be a wall.
    Wall,
    /// Free space.
    Empty,
    /// The agent's start position. Exactly one per grid.
    Start,
    /// A reward cell; only EXIT is legal here.
    Reward(f64),
}

impl Cell {
    /// Parse the single-character form.
    ///
    /// Rewards are limited to one decimal digit; multi-character and
    /// fractional rewards need [`Cell::parse_token`] or a structured
    /// [`Cell::Reward`].
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            'X' => Some(Cell::Wall),
            ' ' => Some(Cell::Empty),
            'A' => Some(Cell::Start),
            _ => c.to_digit(10).map(|d| Cell::Reward(f64::from(d))),
        }
    }

    /// Parse a string token: `X`, a single space, `A`, or any finite
    /// decimal number.
    pub fn parse_token(token: &str) -> Option<Cell> {
        match token {
            "X" => Some(Cell::Wall),
            " " => Some(Cell::Empty),
            "A" => Some(Cell::Start),
            _ => token
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Cell::Reward),
        }
    }

    /// Whether this cell is a wall.
    pub fn is_wall(&self) -> bool {
        matches!(self, Cell::Wall)
    }

    /// The reward value, if this is a reward cell.
    pub fn reward(&self) -> Option<f64> {
        match self {
            Cell::Reward(v) => Some(*v),
            _ => None,
        }
    }
}
