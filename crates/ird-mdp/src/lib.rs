//! MDP model and environment driver for IRD experiments.
//!
//! The [`Mdp`] trait is the shared capability interface every variant
//! implements: state enumeration, legal actions, rewards under explicit
//! [`RewardParams`], transition [`Distribution`]s and terminal checks.
//! Two variants ship with the crate:
//!
//! - [`GridworldMdp`]: a walled grid with reward cells, a living reward
//!   and perpendicular drift noise;
//! - [`NStateMdp`]: a fully connected N-state chain where action `i`
//!   jumps to state `i`.
//!
//! MDP structure is immutable. Reward hypotheses are expressed as
//! separate [`RewardParams`] values passed to [`Mdp::reward`], so one
//! MDP can be evaluated under many rewards without aliasing.
//!
//! [`Environment`] is the only stateful piece: a cursor over a borrowed
//! MDP with its own seeded RNG.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod distribution;
pub mod env;
pub mod error;
pub mod gridworld;
pub mod mdp;
pub mod nstate;
pub mod params;

#[cfg(test)]
pub(crate) mod compliance;

pub use config::MdpConfig;
pub use distribution::{Distribution, PROBABILITY_TOLERANCE};
pub use env::{Environment, Transition};
pub use error::{ConfigError, MdpError, SampleError, StepError};
pub use gridworld::GridworldMdp;
pub use mdp::{ActionList, Mdp, StateOf};
pub use nstate::{Choice, NStateMdp};
pub use params::RewardParams;
