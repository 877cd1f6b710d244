//! The shared MDP capability interface.

use std::fmt::Debug;
use std::hash::Hash;

use ird_core::State;
use smallvec::SmallVec;

use crate::distribution::Distribution;
use crate::error::MdpError;
use crate::params::RewardParams;

/// Legal actions of one state. Four inline slots cover every gridworld
/// state without allocating.
pub type ActionList<A> = SmallVec<[A; 4]>;

/// The state type of an MDP.
pub type StateOf<M> = State<<M as Mdp>::Position>;

/// A finite Markov decision process with a terminal sentinel.
///
/// Implementations must be deterministic: [`states`](Mdp::states) and
/// [`actions`](Mdp::actions) return the same sequences on every call,
/// because planners index their tables by that order.
///
/// Rewards are evaluated under explicit [`RewardParams`], keeping the
/// structure (states, actions, transition kernel) independent of the
/// reward hypothesis being tested.
pub trait Mdp {
    /// Position of a non-terminal state.
    type Position: Copy + Eq + Hash + Debug;
    /// Action type.
    type Action: Copy + Eq + Hash + Debug;

    /// Every state, in deterministic order, terminal last.
    fn states(&self) -> Vec<State<Self::Position>>;

    /// The state an episode starts in.
    fn start_state(&self) -> State<Self::Position>;

    /// Legal actions in `state`, in deterministic order. Empty for the
    /// terminal state and for positions that are not states.
    fn actions(&self, state: State<Self::Position>) -> ActionList<Self::Action>;

    /// Reward for taking `action` in `state` under `params`.
    ///
    /// # Errors
    ///
    /// [`MdpError::IllegalAction`] if `action` is not in
    /// `actions(state)`.
    fn reward(
        &self,
        params: &RewardParams,
        state: State<Self::Position>,
        action: Self::Action,
    ) -> Result<f64, MdpError>;

    /// Distribution over next states for `action` in `state`.
    ///
    /// # Errors
    ///
    /// [`MdpError::IllegalAction`] if `action` is not in
    /// `actions(state)`.
    fn transition(
        &self,
        state: State<Self::Position>,
        action: Self::Action,
    ) -> Result<Distribution<State<Self::Position>>, MdpError>;

    /// Whether `state` ends the episode.
    fn is_terminal(&self, state: State<Self::Position>) -> bool {
        state.is_terminal()
    }

    /// Reward parameters the MDP was constructed with.
    fn default_params(&self) -> &RewardParams;

    /// Number of reward slots [`RewardParams::values`] must provide.
    fn reward_slots(&self) -> usize {
        self.default_params().arity()
    }

    /// Check that `params` fits this MDP.
    fn check_params(&self, params: &RewardParams) -> Result<(), MdpError> {
        params.check(self.reward_slots())
    }

    /// Fail with [`MdpError::IllegalAction`] unless `action` is legal in
    /// `state`.
    fn ensure_legal(
        &self,
        state: State<Self::Position>,
        action: Self::Action,
    ) -> Result<(), MdpError> {
        if self.actions(state).contains(&action) {
            Ok(())
        } else {
            Err(MdpError::IllegalAction {
                state: format!("{state:?}"),
                action: format!("{action:?}"),
            })
        }
    }
}
