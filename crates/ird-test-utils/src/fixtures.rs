//! Reusable gridworld fixtures.
//!
//! - [`GOLDEN_ROWS`]: three moves then EXIT from the start, V(start) = 2.97
//!   with living reward -0.01 and gamma 1.
//! - [`OPEN_4X4_ROWS`]: 4x4 interior with two rewards and one inner wall.
//! - [`SINGLE_PATH_4X4_ROWS`]: 4x4 interior where the only reward is +1
//!   at the end of a single corridor.
//! - [`TWO_EXITS_ROWS`]: corridor with a small reward on one side and a
//!   large one on the other.

use ird_core::Point;
use ird_mdp::{GridworldMdp, MdpConfig};

/// Small grid with a single reward three moves from the start.
pub const GOLDEN_ROWS: [&str; 4] = ["XXXXX", "XA  X", "X X3X", "XXXXX"];

/// Optimal start value of [`GOLDEN_ROWS`] at gamma 1.
pub const GOLDEN_START_VALUE: f64 = 2.97;

/// 4x4 interior used to cross-check planners.
pub const OPEN_4X4_ROWS: [&str; 6] = [
    "XXXXXX", "XA   X", "X X  X", "X   9X", "X1   X", "XXXXXX",
];

/// 4x4 interior snaking to a single +1 reward: one path, nine moves
/// then EXIT.
pub const SINGLE_PATH_4X4_ROWS: [&str; 6] = [
    "XXXXXX", "XA   X", "XXXX X", "X    X", "X1XXXX", "XXXXXX",
];

/// Moves from the start of [`SINGLE_PATH_4X4_ROWS`] to its reward.
pub const SINGLE_PATH_MOVES: i32 = 9;

/// Corridor with exits on both ends.
pub const TWO_EXITS_ROWS: [&str; 3] = ["XXXXXXXX", "X1 A  9X", "XXXXXXXX"];

/// Start cell of every fixture above.
pub fn start_of(rows: &[&str]) -> Point {
    rows.iter()
        .enumerate()
        .find_map(|(y, row)| row.find('A').map(|x| Point::new(x as i32, y as i32)))
        .unwrap_or(Point::new(0, 0))
}

/// Build a gridworld from `rows` with the given noise and the default
/// living reward. Panics on invalid fixtures.
pub fn gridworld(rows: &[&str], noise: f64) -> GridworldMdp {
    GridworldMdp::from_rows(
        rows,
        MdpConfig {
            noise,
            ..Default::default()
        },
    )
    .unwrap_or_else(|e| panic!("fixture {rows:?} is invalid: {e}"))
}

/// [`GOLDEN_ROWS`] without noise.
pub fn golden() -> GridworldMdp {
    gridworld(&GOLDEN_ROWS, 0.0)
}
