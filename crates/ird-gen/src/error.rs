//! Generator errors.

use ird_mdp::MdpError;
use thiserror::Error;

/// Errors detected by [`GeneratorConfig::validate()`](crate::GeneratorConfig::validate).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Height or width below 3 leaves no interior.
    #[error("grid must be at least 3x3, got {height}x{width}")]
    InvalidDimensions {
        /// Configured height.
        height: usize,
        /// Configured width.
        width: usize,
    },
    /// A probability outside `[0, 1]`.
    #[error("{name} must be in [0, 1], got {value}")]
    InvalidProbability {
        /// Field name.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },
    /// The embedded MDP config is invalid.
    #[error(transparent)]
    Mdp(#[from] ird_mdp::ConfigError),
}

/// Errors from instance generation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GenError {
    /// The generator configuration failed validation.
    #[error("invalid generator config: {0}")]
    Config(#[from] ConfigError),
    /// Fewer than two interior cells: the start and a reward cannot both
    /// be placed.
    #[error("interior has {interior} cells, need at least 2")]
    TooSmall {
        /// Number of interior cells.
        interior: usize,
    },
    /// No cell was available for a mandatory marker.
    #[error("no cell available for the {marker} marker")]
    NoFreeCell {
        /// Which marker could not be placed.
        marker: &'static str,
    },
    /// The generated grid did not produce a valid MDP.
    #[error(transparent)]
    Mdp(#[from] MdpError),
}
