//! Gridworld MDP configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Dynamics and living-reward settings for a [`GridworldMdp`](crate::GridworldMdp).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MdpConfig {
    /// Reward for every non-EXIT action. Default: -0.01.
    pub living_reward: f64,
    /// Probability that a cardinal move drifts to one of its two
    /// perpendicular directions (split evenly). Default: 0.0.
    pub noise: f64,
}

impl Default for MdpConfig {
    fn default() -> Self {
        Self {
            living_reward: -0.01,
            noise: 0.0,
        }
    }
}

impl MdpConfig {
    /// Check that `noise` is a probability and `living_reward` is finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.noise) {
            return Err(ConfigError::InvalidNoise { value: self.noise });
        }
        if !self.living_reward.is_finite() {
            return Err(ConfigError::InvalidLivingReward {
                value: self.living_reward,
            });
        }
        Ok(())
    }
}
