//! Synchronous value iteration.
//!
//! ```text
//! V(terminal) = 0
//! V(s)        = max_a [ R(s,a) + gamma * sum_s' P(s'|s,a) V(s') ]
//! ```
//!
//! States with no legal actions keep value 0. Every sweep reads only the
//! previous sweep's values.

use indexmap::{IndexMap, IndexSet};
use ird_mdp::{Mdp, RewardParams, StateOf};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::solution::Solution;

/// A legal action with its reward and successor distribution, successors
/// given as indices into `states()`.
pub(crate) struct Edge<A> {
    pub(crate) action: A,
    pub(crate) reward: f64,
    pub(crate) successors: SmallVec<[(usize, f64); 3]>,
}

/// The MDP under fixed reward parameters, flattened for repeated sweeps.
pub(crate) struct Model<M: Mdp> {
    pub(crate) states: IndexSet<StateOf<M>>,
    pub(crate) edges: Vec<Vec<Edge<M::Action>>>,
}

impl<M: Mdp> Model<M> {
    pub(crate) fn build(mdp: &M, params: &RewardParams) -> Result<Self, PlannerError> {
        mdp.check_params(params)?;
        let states: IndexSet<StateOf<M>> = mdp.states().into_iter().collect();
        let mut edges = Vec::with_capacity(states.len());
        for &s in &states {
            let mut out = Vec::new();
            if !mdp.is_terminal(s) {
                for action in mdp.actions(s) {
                    let reward = mdp.reward(params, s, action)?;
                    let mut successors = SmallVec::new();
                    for (next, p) in mdp.transition(s, action)?.iter() {
                        let j = states.get_index_of(&next).ok_or_else(|| {
                            PlannerError::UnknownSuccessor {
                                from: format!("{s:?}"),
                                to: format!("{next:?}"),
                            }
                        })?;
                        successors.push((j, p));
                    }
                    out.push(Edge {
                        action,
                        reward,
                        successors,
                    });
                }
            }
            edges.push(out);
        }
        Ok(Self { states, edges })
    }

    fn q(edge: &Edge<M::Action>, gamma: f64, values: &[f64]) -> f64 {
        edge.reward
            + gamma
                * edge
                    .successors
                    .iter()
                    .map(|&(j, p)| p * values[j])
                    .sum::<f64>()
    }
}

/// Exact tabular planner.
///
/// # Examples
///
/// ```
/// use ird_core::{Point, State};
/// use ird_mdp::{GridworldMdp, Mdp, MdpConfig};
/// use ird_planner::{PlannerConfig, ValueIteration};
///
/// let mdp = GridworldMdp::from_rows(&["XXXXX", "XA  X", "X X3X", "XXXXX"], MdpConfig::default()).unwrap();
/// let planner = ValueIteration::new(PlannerConfig::default().with_gamma(1.0)).unwrap();
/// let solution = planner.solve(&mdp, mdp.default_params()).unwrap();
/// let v = solution.value(State::At(Point::new(1, 1))).unwrap();
/// assert!((v - 2.97).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct ValueIteration {
    config: PlannerConfig,
}

impl ValueIteration {
    /// Validate `config` and build the planner.
    pub fn new(config: PlannerConfig) -> Result<Self, PlannerError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The planner configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Compute optimal values and Q-values of `mdp` under `params`.
    ///
    /// # Errors
    ///
    /// [`PlannerError::Mdp`] if `params` does not fit the MDP or a query
    /// fails, and [`PlannerError::UnknownSuccessor`] if a transition
    /// leaves `states()`.
    pub fn solve<M: Mdp>(
        &self,
        mdp: &M,
        params: &RewardParams,
    ) -> Result<Solution<M::Position, M::Action>, PlannerError> {
        let model = Model::build(mdp, params)?;
        let gamma = self.config.gamma;
        let n = model.states.len();

        let mut values = vec![0.0; n];
        let mut next = vec![0.0; n];
        let mut iterations = 0;
        let mut delta = 0.0;
        let mut converged = false;

        while iterations < self.config.max_iters {
            delta = 0.0f64;
            for (i, edges) in model.edges.iter().enumerate() {
                next[i] = edges
                    .iter()
                    .map(|e| Model::<M>::q(e, gamma, &values))
                    .reduce(f64::max)
                    .unwrap_or(0.0);
                delta = delta.max((next[i] - values[i]).abs());
            }
            std::mem::swap(&mut values, &mut next);
            iterations += 1;
            trace!(iteration = iterations, delta, "value iteration sweep");
            if self.config.tolerance.is_some_and(|tol| delta < tol) {
                converged = true;
                break;
            }
        }

        if converged {
            debug!(iterations, delta, states = n, "value iteration converged");
        } else if self.config.tolerance.is_some() {
            warn!(iterations, delta, "value iteration stopped before converging");
        }

        let mut q_values = IndexMap::new();
        let mut actions = IndexMap::with_capacity(n);
        for (&s, edges) in model.states.iter().zip(&model.edges) {
            for e in edges {
                q_values.insert((s, e.action), Model::<M>::q(e, gamma, &values));
            }
            actions.insert(s, edges.iter().map(|e| e.action).collect());
        }

        Ok(Solution {
            values: model.states.iter().copied().zip(values).collect(),
            q_values,
            actions,
            iterations,
            final_delta: delta,
            converged,
        })
    }
}
