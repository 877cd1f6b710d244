//! Planner configuration and solve errors.

use ird_mdp::MdpError;
use thiserror::Error;

/// Errors detected by [`PlannerConfig::validate()`](crate::PlannerConfig::validate).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Discount outside `[0, 1]`.
    #[error("gamma must be in [0, 1], got {value}")]
    InvalidGamma {
        /// The invalid value.
        value: f64,
    },
    /// `max_iters` is zero.
    #[error("max_iters must be at least 1")]
    ZeroIterations,
    /// Tolerance is not a positive finite number.
    #[error("tolerance must be positive and finite, got {value}")]
    InvalidTolerance {
        /// The invalid value.
        value: f64,
    },
}

/// Errors from planning and policy evaluation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum PlannerError {
    /// The planner configuration failed validation.
    #[error("invalid planner config: {0}")]
    Config(#[from] ConfigError),
    /// The MDP rejected a query or the reward parameters.
    #[error(transparent)]
    Mdp(#[from] MdpError),
    /// A transition leads outside `states()`.
    #[error("transition from {from} reaches unknown state {to}")]
    UnknownSuccessor {
        /// Debug rendering of the source state.
        from: String,
        /// Debug rendering of the unknown successor.
        to: String,
    },
    /// The evaluated policy gives no action for a state that has some.
    #[error("policy has no action for state {state}")]
    MissingAction {
        /// Debug rendering of the state.
        state: String,
    },
    /// `(I - gamma P) V = R` has no unique solution, typically because
    /// the policy never reaches the terminal state and `gamma == 1`.
    #[error("policy evaluation system is singular at row {row}")]
    SingularSystem {
        /// Elimination step where no usable pivot was found.
        row: usize,
    },
}
