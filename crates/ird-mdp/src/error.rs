//! Error types for MDP construction, queries and sampling.

use ird_grid::GridError;
use thiserror::Error;

/// Errors detected by [`MdpConfig::validate()`](crate::MdpConfig::validate).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Noise must be a probability.
    #[error("noise must be in [0, 1], got {value}")]
    InvalidNoise {
        /// The invalid value.
        value: f64,
    },
    /// The living reward is NaN or infinite.
    #[error("living_reward must be finite, got {value}")]
    InvalidLivingReward {
        /// The invalid value.
        value: f64,
    },
}

/// Errors from MDP construction and queries.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum MdpError {
    /// The grid failed validation.
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
    /// The MDP configuration failed validation.
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    /// The action is not in `actions(state)`.
    #[error("illegal action {action} in state {state}")]
    IllegalAction {
        /// Debug rendering of the state.
        state: String,
        /// Debug rendering of the action.
        action: String,
    },
    /// Reward parameters have the wrong number of per-cell values.
    #[error("reward parameters carry {found} values, MDP has {expected} reward slots")]
    RewardArity {
        /// Number of reward slots in the MDP.
        expected: usize,
        /// Number of values supplied.
        found: usize,
    },
    /// A reward value is NaN or infinite.
    #[error("reward value at slot {slot} must be finite, got {value}")]
    NonFiniteReward {
        /// The offending slot.
        slot: usize,
        /// The offending value.
        value: f64,
    },
    /// The living reward is NaN or infinite.
    #[error("living reward must be finite, got {value}")]
    NonFiniteLivingReward {
        /// The offending value.
        value: f64,
    },
    /// An override names a slot the parameters do not have.
    #[error("reward slot {slot} out of range for {slots} slots")]
    SlotOutOfRange {
        /// The requested slot.
        slot: usize,
        /// Number of slots in the parameters.
        slots: usize,
    },
    /// The model description is inconsistent.
    #[error("invalid model: {reason}")]
    InvalidModel {
        /// What went wrong.
        reason: String,
    },
}

/// The transition function produced a distribution that does not sum
/// to one.
///
/// This indicates a bug in an MDP's transition function, never a user
/// error; it is reported instead of clamped.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SampleError {
    /// The cumulative probability exceeded one.
    #[error("total transition probability {total} exceeds one")]
    ProbabilityAboveOne {
        /// Cumulative probability when the overflow was seen.
        total: f64,
    },
    /// Enumeration ended before the cumulative probability reached one.
    #[error("total transition probability {total} is less than one")]
    ProbabilityBelowOne {
        /// Final cumulative probability.
        total: f64,
    },
}

/// Errors from [`Environment::step()`](crate::Environment::step).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum StepError {
    /// The MDP rejected the query (usually an illegal action).
    #[error(transparent)]
    Mdp(#[from] MdpError),
    /// The transition distribution was malformed.
    #[error(transparent)]
    Sample(#[from] SampleError),
}
