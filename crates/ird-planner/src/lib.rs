//! Exact planners for IRD MDPs.
//!
//! [`ValueIteration`] computes optimal state values and Q-values for any
//! [`Mdp`](ird_mdp::Mdp) under explicit reward parameters. It serves as
//! the reference oracle: [`q_tables_match`] compares an alternative
//! planner's table against it, and [`evaluate_policy_exact`] solves the
//! linear Bellman system of a fixed policy directly.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod exact;
pub mod solution;
pub mod value_iteration;

pub use config::PlannerConfig;
pub use error::{ConfigError, PlannerError};
pub use exact::evaluate_policy_exact;
pub use solution::{q_tables_match, Solution};
pub use value_iteration::ValueIteration;
