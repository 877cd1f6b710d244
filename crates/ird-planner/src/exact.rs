//! Exact policy evaluation by solving the linear Bellman system.
//!
//! For a fixed policy `pi` the values satisfy `(I - gamma P_pi) V = R_pi`,
//! with `V(s) = 0` for terminal and action-less states. The system is
//! solved with Gaussian elimination and partial pivoting.

use indexmap::IndexMap;
use ird_mdp::{Mdp, RewardParams, StateOf};
use ndarray::{Array1, Array2};
use tracing::debug;

use crate::config::validate_gamma;
use crate::error::PlannerError;
use crate::value_iteration::Model;

/// Pivots smaller than this are treated as zero.
const PIVOT_EPSILON: f64 = 1e-12;

/// Values of the deterministic policy `policy` on `mdp` under `params`.
///
/// `policy` is only consulted for states that have legal actions.
///
/// # Errors
///
/// [`PlannerError::MissingAction`] if `policy` returns `None` for such a
/// state, [`PlannerError::Mdp`] if it returns an illegal action, and
/// [`PlannerError::SingularSystem`] if the values are not uniquely
/// determined.
pub fn evaluate_policy_exact<M: Mdp>(
    mdp: &M,
    params: &RewardParams,
    mut policy: impl FnMut(StateOf<M>) -> Option<M::Action>,
    gamma: f64,
) -> Result<IndexMap<StateOf<M>, f64>, PlannerError> {
    validate_gamma(gamma)?;
    let model = Model::build(mdp, params)?;
    let n = model.states.len();

    let mut a = Array2::<f64>::eye(n);
    let mut b = Array1::<f64>::zeros(n);
    for (i, (&s, edges)) in model.states.iter().zip(&model.edges).enumerate() {
        if edges.is_empty() {
            continue;
        }
        let action = policy(s).ok_or_else(|| PlannerError::MissingAction {
            state: format!("{s:?}"),
        })?;
        mdp.ensure_legal(s, action)?;
        let edge = edges
            .iter()
            .find(|e| e.action == action)
            .ok_or_else(|| PlannerError::MissingAction {
                state: format!("{s:?}"),
            })?;
        b[i] = edge.reward;
        for &(j, p) in &edge.successors {
            a[[i, j]] -= gamma * p;
        }
    }

    let v = solve_linear(a, b)?;
    debug!(states = n, gamma, "exact policy evaluation solved");
    Ok(model.states.into_iter().zip(v.iter().copied()).collect())
}

/// Solve `a x = b` in place by Gaussian elimination with partial pivoting.
fn solve_linear(mut a: Array2<f64>, mut b: Array1<f64>) -> Result<Array1<f64>, PlannerError> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&r1, &r2| a[[r1, col]].abs().total_cmp(&a[[r2, col]].abs()))
            .unwrap_or(col);
        if a[[pivot, col]].abs() < PIVOT_EPSILON {
            return Err(PlannerError::SingularSystem { row: col });
        }
        if pivot != col {
            for k in 0..n {
                a.swap([col, k], [pivot, k]);
            }
            b.swap(col, pivot);
        }
        for row in col + 1..n {
            let factor = a[[row, col]] / a[[col, col]];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[[row, k]] -= factor * a[[col, k]];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = Array1::<f64>::zeros(n);
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[[row, k]] * x[k]).sum();
        x[row] = (b[row] - tail) / a[[row, row]];
    }
    Ok(x)
}
