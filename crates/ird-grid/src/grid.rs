//! Unvalidated cell matrices and their validation into a [`Layout`].

use std::str::FromStr;

use indexmap::IndexMap;
use ird_core::Point;

use crate::cell::Cell;
use crate::error::{Border, GridError};
use crate::layout::Layout;

/// A matrix of cells, indexed `rows[y][x]`.
///
/// Construction only checks that each token is a known cell; the
/// structural invariants are checked by [`validate`](Grid::validate).
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Build a grid from character rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use ird_grid::Grid;
    ///
    /// let layout = Grid::from_rows(&["XXXXX", "XA 3X", "XXXXX"])
    ///     .unwrap()
    ///     .validate()
    ///     .unwrap();
    /// assert_eq!(layout.width(), 5);
    /// assert_eq!(layout.rewards().len(), 1);
    /// ```
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let mut cells = Vec::with_capacity(rows.len());
        for (y, row) in rows.iter().enumerate() {
            let mut parsed = Vec::with_capacity(row.as_ref().len());
            for (x, c) in row.as_ref().chars().enumerate() {
                let cell = Cell::from_char(c).ok_or_else(|| GridError::InvalidToken {
                    token: c.to_string(),
                    point: Point::new(x as i32, y as i32),
                })?;
                parsed.push(cell);
            }
            cells.push(parsed);
        }
        Ok(Self { rows: cells })
    }

    /// Build a grid from per-cell string tokens.
    pub fn from_tokens<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Self, GridError> {
        let mut cells = Vec::with_capacity(rows.len());
        for (y, row) in rows.iter().enumerate() {
            let mut parsed = Vec::with_capacity(row.len());
            for (x, token) in row.iter().enumerate() {
                let token = token.as_ref();
                let cell = Cell::parse_token(token).ok_or_else(|| GridError::InvalidToken {
                    token: token.to_string(),
                    point: Point::new(x as i32, y as i32),
                })?;
                parsed.push(cell);
            }
            cells.push(parsed);
        }
        Ok(Self { rows: cells })
    }

    /// Wrap already-structured cells.
    pub fn from_cells(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// The cell rows, `rows()[y][x]`.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Check every structural invariant and produce a [`Layout`].
    ///
    /// Checks run in a fixed order and the first failure is reported:
    /// emptiness, raggedness, borders (left/right per row, then
    /// top/bottom per column), start count, reward count.
    pub fn validate(&self) -> Result<Layout, GridError> {
        let height = self.rows.len();
        let width = self.rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(GridError::Empty);
        }

        for (y, row) in self.rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::Ragged {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
        }

        for (y, row) in self.rows.iter().enumerate() {
            if !row[0].is_wall() {
                return Err(GridError::BorderNotWall {
                    border: Border::Left,
                    point: Point::new(0, y as i32),
                });
            }
            if !row[width - 1].is_wall() {
                return Err(GridError::BorderNotWall {
                    border: Border::Right,
                    point: Point::new(width as i32 - 1, y as i32),
                });
            }
        }
        for x in 0..width {
            if !self.rows[0][x].is_wall() {
                return Err(GridError::BorderNotWall {
                    border: Border::Top,
                    point: Point::new(x as i32, 0),
                });
            }
            if !self.rows[height - 1][x].is_wall() {
                return Err(GridError::BorderNotWall {
                    border: Border::Bottom,
                    point: Point::new(x as i32, height as i32 - 1),
                });
            }
        }

        let mut walls = Vec::with_capacity(height * width);
        let mut rewards = IndexMap::new();
        let mut starts = Vec::new();
        for (y, row) in self.rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let point = Point::new(x as i32, y as i32);
                walls.push(cell.is_wall());
                match cell {
                    Cell::Start => starts.push(point),
                    Cell::Reward(v) => {
                        rewards.insert(point, *v);
                    }
                    Cell::Wall | Cell::Empty => {}
                }
            }
        }

        let start = match starts.as_slice() {
            [start] => *start,
            _ => return Err(GridError::StartCount { found: starts.len() }),
        };
        if rewards.is_empty() {
            return Err(GridError::NoReward);
        }

        Ok(Layout::from_parts(height, width, walls, rewards, start))
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parse newline-separated character rows.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().collect();
        Grid::from_rows(&rows)
    }
}
