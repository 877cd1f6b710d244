//! Random gridworld generation for IRD experiments.
//!
//! - [`generate_random`] samples walls, empty cells and rewards
//!   independently. The start may be cut off from every reward.
//! - [`generate_random_connected`] carves a connected region with
//!   [`DisjointSets`] and places everything inside it, so all rewards are
//!   reachable from the start.
//!
//! Every generator takes an explicit RNG, so instances are reproducible
//! from a seed.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod disjoint;
pub mod error;
pub mod generate;

pub use config::GeneratorConfig;
pub use disjoint::DisjointSets;
pub use error::{ConfigError, GenError};
pub use generate::{generate_random, generate_random_connected, random_reward, GUARANTEED_REWARD};
