//! Test utilities for IRD development.
//!
//! Provides gridworld fixtures ([`fixtures`]), a plain BFS over open
//! cells for reachability checks, and assertions for distributions and
//! value tables.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::VecDeque;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use ird_core::{Direction, Point};
use ird_grid::Layout;
use ird_mdp::{Distribution, PROBABILITY_TOLERANCE};

pub use fixtures::{gridworld, golden, start_of, GOLDEN_ROWS, GOLDEN_START_VALUE};

/// Every non-wall cell reachable from `from` by cardinal moves.
///
/// Unlike [`Layout::reachable_rewards`] this walks through reward cells,
/// which is what a generator's connectivity guarantee is about.
pub fn reachable_cells(layout: &Layout, from: Point) -> IndexSet<Point> {
    let mut seen = IndexSet::new();
    if layout.is_wall(from) {
        return seen;
    }
    let mut queue = VecDeque::from([from]);
    seen.insert(from);
    while let Some(p) = queue.pop_front() {
        for d in Direction::CARDINAL {
            if let Ok(q) = d.move_point(p) {
                if !layout.is_wall(q) && seen.insert(q) {
                    queue.push_back(q);
                }
            }
        }
    }
    seen
}

/// Assert that every open cell of `layout` is reachable from its start.
pub fn assert_fully_connected(layout: &Layout) {
    let reached = reachable_cells(layout, layout.start());
    for p in layout.open_points() {
        assert!(
            reached.contains(&p),
            "{p} is not reachable from the start in\n{layout}"
        );
    }
}

/// Assert that `dist` sums to one and has no negative mass.
pub fn assert_normalized<S: Copy + PartialEq + std::fmt::Debug>(dist: &Distribution<S>) {
    let total = dist.total();
    assert!(
        (total - 1.0).abs() <= PROBABILITY_TOLERANCE,
        "distribution sums to {total}: {dist:?}"
    );
    for (s, p) in dist.iter() {
        assert!(p >= 0.0, "negative mass {p} on {s:?}");
    }
}

/// Assert that two value tables share keys and agree within `tol`.
pub fn assert_tables_close<K: Eq + Hash + std::fmt::Debug>(
    actual: &IndexMap<K, f64>,
    expected: &IndexMap<K, f64>,
    tol: f64,
) {
    assert_eq!(actual.len(), expected.len(), "tables differ in size");
    for (k, &e) in expected {
        let a = actual
            .get(k)
            .unwrap_or_else(|| panic!("missing key {k:?}"));
        assert!((a - e).abs() <= tol, "{k:?}: {a} vs expected {e}");
    }
}
