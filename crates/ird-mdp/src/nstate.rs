//! Fully connected N-state MDP.

use std::fmt;

use indexmap::IndexSet;
use ird_core::State;
use serde::{Deserialize, Serialize};
use smallvec::smallvec;

use crate::distribution::Distribution;
use crate::error::MdpError;
use crate::mdp::{ActionList, Mdp};
use crate::params::RewardParams;

/// An action of an [`NStateMdp`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Choice {
    /// Jump to the given state.
    Goto(usize),
    /// Leave a preterminal state.
    Exit,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Goto(i) => write!(f, "goto {i}"),
            Choice::Exit => f.write_str("exit"),
        }
    }
}

/// `n` states where action `Goto(i)` always moves to state `i`.
///
/// Preterminal states offer only [`Choice::Exit`], which leads to the
/// terminal sentinel. Any action taken in state `i` pays
/// `params.values[i]`; the living reward is unused.
#[derive(Clone, Debug)]
pub struct NStateMdp {
    num_states: usize,
    start: usize,
    preterminal: IndexSet<usize>,
    defaults: RewardParams,
}

impl NStateMdp {
    /// Build an MDP with one reward per state.
    ///
    /// # Errors
    ///
    /// [`MdpError::InvalidModel`] if there are no states or `start` or a
    /// preterminal index is out of range, and [`MdpError::RewardArity`]
    /// or [`MdpError::NonFiniteReward`] if `rewards` does not fit.
    pub fn new(
        rewards: Vec<f64>,
        start: usize,
        preterminal: impl IntoIterator<Item = usize>,
    ) -> Result<Self, MdpError> {
        let num_states = rewards.len();
        if num_states == 0 {
            return Err(MdpError::InvalidModel {
                reason: "an N-state MDP needs at least one state".into(),
            });
        }
        if start >= num_states {
            return Err(MdpError::InvalidModel {
                reason: format!("start state {start} out of range for {num_states} states"),
            });
        }
        let preterminal: IndexSet<usize> = preterminal.into_iter().collect();
        if let Some(&bad) = preterminal.iter().find(|&&i| i >= num_states) {
            return Err(MdpError::InvalidModel {
                reason: format!("preterminal state {bad} out of range for {num_states} states"),
            });
        }
        let defaults = RewardParams::new(rewards, 0.0);
        defaults.check(num_states)?;
        Ok(Self {
            num_states,
            start,
            preterminal,
            defaults,
        })
    }

    /// Number of non-terminal states.
    pub fn num_states(&self) -> usize {
        self.num_states
    }

    /// Whether `state` offers only [`Choice::Exit`].
    pub fn is_preterminal(&self, state: usize) -> bool {
        self.preterminal.contains(&state)
    }
}

impl Mdp for NStateMdp {
    type Position = usize;
    type Action = Choice;

    fn states(&self) -> Vec<State<usize>> {
        (0..self.num_states)
            .map(State::At)
            .chain(std::iter::once(State::Terminal))
            .collect()
    }

    fn start_state(&self) -> State<usize> {
        State::At(self.start)
    }

    fn actions(&self, state: State<usize>) -> ActionList<Choice> {
        match state {
            State::At(i) if i >= self.num_states => ActionList::new(),
            State::At(i) if self.is_preterminal(i) => smallvec![Choice::Exit],
            State::At(_) => (0..self.num_states).map(Choice::Goto).collect(),
            State::Terminal => ActionList::new(),
        }
    }

    fn reward(
        &self,
        params: &RewardParams,
        state: State<usize>,
        action: Choice,
    ) -> Result<f64, MdpError> {
        self.ensure_legal(state, action)?;
        let i = state.position().copied().unwrap_or_default();
        params.values.get(i).copied().ok_or(MdpError::RewardArity {
            expected: self.num_states,
            found: params.arity(),
        })
    }

    fn transition(
        &self,
        state: State<usize>,
        action: Choice,
    ) -> Result<Distribution<State<usize>>, MdpError> {
        self.ensure_legal(state, action)?;
        Ok(match action {
            Choice::Goto(j) => Distribution::certain(State::At(j)),
            Choice::Exit => Distribution::certain(State::Terminal),
        })
    }

    fn default_params(&self) -> &RewardParams {
        &self.defaults
    }
}
