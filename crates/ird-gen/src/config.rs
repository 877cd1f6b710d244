//! Generator configuration.

use ird_mdp::MdpConfig;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Size, cell probabilities and MDP settings for generated instances.
///
/// Built with [`new()`](GeneratorConfig::new) and the `with_*` methods,
/// then checked by [`validate()`](GeneratorConfig::validate) when a
/// generator runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Rows including the wall border. Default: 8.
    pub height: usize,
    /// Columns including the wall border. Default: 8.
    pub width: usize,
    /// Unconstrained generator: probability that a non-reward interior
    /// cell is a wall. Unused by the connected generator. Default: 0.2.
    pub pr_wall: f64,
    /// Unconstrained generator: per-cell reward probability. Connected
    /// generator: probability of adding each further reward. Default: 0.05.
    pub pr_reward: f64,
    /// Dynamics of the generated MDP.
    pub mdp: MdpConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            height: 8,
            width: 8,
            pr_wall: 0.2,
            pr_reward: 0.05,
            mdp: MdpConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Defaults with the given dimensions.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            ..Self::default()
        }
    }

    /// Set the wall probability.
    pub fn with_pr_wall(mut self, pr_wall: f64) -> Self {
        self.pr_wall = pr_wall;
        self
    }

    /// Set the reward probability.
    pub fn with_pr_reward(mut self, pr_reward: f64) -> Self {
        self.pr_reward = pr_reward;
        self
    }

    /// Set the MDP dynamics.
    pub fn with_mdp(mut self, mdp: MdpConfig) -> Self {
        self.mdp = mdp;
        self
    }

    /// Number of non-border cells.
    pub fn interior_cells(&self) -> usize {
        self.height.saturating_sub(2) * self.width.saturating_sub(2)
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.height < 3 || self.width < 3 {
            return Err(ConfigError::InvalidDimensions {
                height: self.height,
                width: self.width,
            });
        }
        for (name, value) in [("pr_wall", self.pr_wall), ("pr_reward", self.pr_reward)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }
        self.mdp.validate()?;
        Ok(())
    }
}
