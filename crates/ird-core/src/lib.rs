//! Core types for the IRD gridworld substrate.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the action vocabulary shared by every MDP variant ([`Direction`]),
//! grid coordinates ([`Point`]), the state sum type with its terminal
//! sentinel ([`State`]), and the errors those types can raise.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod direction;
pub mod error;
pub mod id;

pub use direction::Direction;
pub use error::DirectionError;
pub use id::{Point, State};
