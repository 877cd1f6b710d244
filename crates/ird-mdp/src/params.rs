//! Reward parameters, kept separate from MDP structure.

use serde::{Deserialize, Serialize};

use crate::error::MdpError;

/// The reward function an MDP is evaluated under.
///
/// `values[i]` is the reward for the i-th reward slot of the MDP (for a
/// gridworld, the i-th reward cell in row-major order; for an N-state
/// MDP, state `i`). `living_reward` applies to every non-EXIT action
/// in MDPs that have one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardParams {
    /// Per-slot reward values.
    pub values: Vec<f64>,
    /// Reward for non-EXIT actions.
    pub living_reward: f64,
}

impl RewardParams {
    /// Create reward parameters.
    pub fn new(values: Vec<f64>, living_reward: f64) -> Self {
        Self {
            values,
            living_reward,
        }
    }

    /// Number of reward slots.
    pub fn arity(&self) -> usize {
        self.values.len()
    }

    /// A copy with `values` replaced wholesale.
    pub fn with_values(&self, values: Vec<f64>) -> Self {
        Self {
            values,
            living_reward: self.living_reward,
        }
    }

    /// A copy with selected slots overwritten.
    ///
    /// Used to pose a proxy-reward hypothesis that changes a few slots
    /// and keeps the rest.
    pub fn with_overrides(
        &self,
        overrides: impl IntoIterator<Item = (usize, f64)>,
    ) -> Result<Self, MdpError> {
        let mut values = self.values.clone();
        for (slot, value) in overrides {
            let slots = values.len();
            let v = values
                .get_mut(slot)
                .ok_or(MdpError::SlotOutOfRange { slot, slots })?;
            *v = value;
        }
        Ok(self.with_values(values))
    }

    /// Check arity and finiteness (slot values and living reward) against an MDP with `slots` reward slots.
    pub fn check(&self, slots: usize) -> Result<(), MdpError> {
        if self.values.len() != slots {
            return Err(MdpError::RewardArity {
                expected: slots,
                found: self.values.len(),
            });
        }
        if let Some((slot, &value)) = self
            .values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(MdpError::NonFiniteReward { slot, value });
        }
        if !self.living_reward.is_finite() {
            return Err(MdpError::NonFiniteLivingReward {
                value: self.living_reward,
            });
        }
        Ok(())
    }
}
