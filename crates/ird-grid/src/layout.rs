//! Validated grid layouts: wall matrix, reward map and start coordinate.

use std::collections::VecDeque;
use std::fmt;

use indexmap::IndexMap;
use ird_core::{Direction, Point};
use ndarray::Array2;

use crate::cell::Cell;
use crate::grid::Grid;

/// The validated contents of a grid.
///
/// Invariants (established by [`Grid::validate`]): all border cells are
/// walls, `start` is a non-wall non-reward cell, and `rewards` is
/// non-empty. Rewards are kept in row-major order of their coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    height: usize,
    width: usize,
    walls: Vec<bool>,
    rewards: IndexMap<Point, f64>,
    start: Point,
}

/// A layout encoded as dense arrays for numeric models.
///
/// Arrays are indexed `[y, x]`.
#[derive(Clone, Debug, PartialEq)]
pub struct NumericEncoding {
    /// 1 where a wall is present, 0 elsewhere.
    pub walls: Array2<u8>,
    /// Reward value of each reward cell, 0.0 elsewhere. Excludes the
    /// living reward.
    pub rewards: Array2<f64>,
    /// The start coordinate.
    pub start: Point,
}

impl Layout {
    pub(crate) fn from_parts(
        height: usize,
        width: usize,
        walls: Vec<bool>,
        rewards: IndexMap<Point, f64>,
        start: Point,
    ) -> Self {
        Self {
            height,
            width,
            walls,
            rewards,
            start,
        }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The start coordinate.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Reward cells in row-major order.
    pub fn rewards(&self) -> &IndexMap<Point, f64> {
        &self.rewards
    }

    /// Whether `p` lies inside the grid.
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    fn index(&self, p: Point) -> Option<usize> {
        self.in_bounds(p)
            .then(|| p.y as usize * self.width + p.x as usize)
    }

    /// Whether `p` is a wall. Out-of-bounds points count as walls.
    pub fn is_wall(&self, p: Point) -> bool {
        self.index(p).map_or(true, |i| self.walls[i])
    }

    /// The reward at `p`, if `p` is a reward cell.
    pub fn reward_at(&self, p: Point) -> Option<f64> {
        self.rewards.get(&p).copied()
    }

    /// Wall occupancy as nested rows, `walls[y][x]`.
    pub fn wall_matrix(&self) -> Vec<Vec<bool>> {
        self.walls.chunks(self.width).map(<[bool]>::to_vec).collect()
    }

    /// Every coordinate in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Point::new(x as i32, y as i32)))
    }

    /// Every non-wall coordinate in row-major order.
    pub fn open_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points().filter(move |p| !self.is_wall(*p))
    }

    /// Every coordinate off the border ring, row-major.
    pub fn interior_points(&self) -> impl Iterator<Item = Point> + '_ {
        let (h, w) = (self.height as i32, self.width as i32);
        self.points()
            .filter(move |p| p.x > 0 && p.y > 0 && p.x < w - 1 && p.y < h - 1)
    }

    /// The cell at `p` as a [`Cell`]; out-of-bounds points read as walls.
    pub fn cell(&self, p: Point) -> Cell {
        if self.is_wall(p) {
            Cell::Wall
        } else if let Some(v) = self.reward_at(p) {
            Cell::Reward(v)
        } else if p == self.start {
            Cell::Start
        } else {
            Cell::Empty
        }
    }

    /// Lossless conversion back to a structured [`Grid`].
    pub fn to_grid(&self) -> Grid {
        let rows = (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| self.cell(Point::new(x as i32, y as i32)))
                    .collect()
            })
            .collect();
        Grid::from_cells(rows)
    }

    /// Encode walls, rewards and start for a downstream numeric model.
    pub fn to_numeric(&self) -> NumericEncoding {
        let walls = Array2::from_shape_fn((self.height, self.width), |(y, x)| {
            u8::from(self.walls[y * self.width + x])
        });
        let mut rewards = Array2::zeros((self.height, self.width));
        for (p, v) in &self.rewards {
            rewards[[p.y as usize, p.x as usize]] = *v;
        }
        NumericEncoding {
            walls,
            rewards,
            start: self.start,
        }
    }

    /// Reward cells reachable from `from` by cardinal moves, in BFS order.
    ///
    /// Reward cells are absorbing (their only action is EXIT), so the
    /// search never expands past one.
    pub fn reachable_rewards(&self, from: Point) -> Vec<Point> {
        let Some(origin) = self.index(from) else {
            return Vec::new();
        };
        if self.walls[origin] {
            return Vec::new();
        }

        let mut visited = vec![false; self.walls.len()];
        let mut queue = VecDeque::new();
        let mut found = Vec::new();
        visited[origin] = true;
        queue.push_back(from);

        while let Some(p) = queue.pop_front() {
            if self.rewards.contains_key(&p) {
                found.push(p);
                continue;
            }
            for d in Direction::CARDINAL {
                let Ok(next) = d.move_point(p) else { continue };
                let Some(i) = self.index(next) else { continue };
                if !visited[i] && !self.walls[i] {
                    visited[i] = true;
                    queue.push_back(next);
                }
            }
        }
        found
    }
}

/// Single-character rendering of a reward: the integer digit when it
/// fits, otherwise `R` (non-negative) or `N` (negative).
fn reward_char(v: f64) -> char {
    let text = if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    };
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ if v >= 0.0 => 'R',
        _ => 'N',
    }
}

impl fmt::Display for Layout {
    /// Render in the character form, one line per row.
    ///
    /// Lossy for rewards that do not fit in one character.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width {
                let c = match self.cell(Point::new(x as i32, y as i32)) {
                    Cell::Wall => 'X',
                    Cell::Reward(v) => reward_char(v),
                    Cell::Start => 'A',
                    Cell::Empty => ' ',
                };
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
