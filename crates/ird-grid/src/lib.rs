//! Grid encoding and validation for IRD gridworlds.
//!
//! A [`Grid`] is an unvalidated rectangular matrix of [`Cell`]s, built
//! from one of three input forms:
//!
//! - character rows (`"XA 3X"`): `X` wall, space empty, `A` start,
//!   a single decimal digit reward;
//! - string tokens, one per cell, where rewards may be any finite
//!   decimal (`"-9"`, `"3.5"`);
//! - structured [`Cell`] rows.
//!
//! [`Grid::validate`] enforces the structural invariants and produces a
//! [`Layout`]: wall matrix, ordered reward map and start coordinate.
//! A layout renders back to the character form (lossy for rewards that
//! do not fit one character) and exports a [`NumericEncoding`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod grid;
pub mod layout;

pub use cell::Cell;
pub use error::{Border, GridError};
pub use grid::Grid;
pub use layout::{Layout, NumericEncoding};
