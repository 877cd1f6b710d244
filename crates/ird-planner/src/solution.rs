//! Planner output: state values, Q-values and the greedy policy.

use std::hash::Hash;

use indexmap::IndexMap;
use ird_core::State;
use ird_mdp::ActionList;

/// Result of [`ValueIteration::solve()`](crate::ValueIteration::solve).
///
/// Tables are keyed in the MDP's `states()` / `actions()` order.
#[derive(Clone, Debug)]
pub struct Solution<P, A> {
    pub(crate) values: IndexMap<State<P>, f64>,
    pub(crate) q_values: IndexMap<(State<P>, A), f64>,
    pub(crate) actions: IndexMap<State<P>, ActionList<A>>,
    pub(crate) iterations: usize,
    pub(crate) final_delta: f64,
    pub(crate) converged: bool,
}

impl<P: Copy + Eq + Hash, A: Copy + Eq + Hash> Solution<P, A> {
    /// Value of `state`, or `None` if it is not a state of the MDP.
    pub fn value(&self, state: State<P>) -> Option<f64> {
        self.values.get(&state).copied()
    }

    /// All state values.
    pub fn values(&self) -> &IndexMap<State<P>, f64> {
        &self.values
    }

    /// Q-value of a legal `(state, action)` pair.
    pub fn q_value(&self, state: State<P>, action: A) -> Option<f64> {
        self.q_values.get(&(state, action)).copied()
    }

    /// Q-values of every legal state-action pair.
    pub fn q_values(&self) -> &IndexMap<(State<P>, A), f64> {
        &self.q_values
    }

    /// Number of sweeps performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Largest per-state change in the last sweep.
    pub fn final_delta(&self) -> f64 {
        self.final_delta
    }

    /// Whether the sweep change dropped below the configured tolerance.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// First action in `actions(state)` order with maximal Q-value.
    /// `None` for terminal and action-less states.
    pub fn greedy_action(&self, state: State<P>) -> Option<A> {
        let mut best: Option<(A, f64)> = None;
        for &a in self.actions.get(&state)? {
            let q = self.q_value(state, a)?;
            if best.map_or(true, |(_, b)| q > b) {
                best = Some((a, q));
            }
        }
        best.map(|(a, _)| a)
    }

    /// Greedy action for every state that has one.
    pub fn policy(&self) -> IndexMap<State<P>, A> {
        self.actions
            .keys()
            .filter_map(|&s| self.greedy_action(s).map(|a| (s, a)))
            .collect()
    }
}

/// Whether two tables have the same keys and every pair of entries
/// satisfies `|a - b| <= tol + tol * |b|`.
///
/// Used to check an alternative planner against value iteration.
pub fn q_tables_match<K: Eq + Hash>(
    a: &IndexMap<K, f64>,
    b: &IndexMap<K, f64>,
    tol: f64,
) -> bool {
    a.len() == b.len()
        && a.iter().all(|(k, &x)| {
            b.get(k)
                .is_some_and(|&y| (x - y).abs() <= tol + tol * y.abs())
        })
}
