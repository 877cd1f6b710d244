//! Value-iteration configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings for [`ValueIteration`](crate::ValueIteration).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Discount factor in `[0, 1]`. Default: 0.95.
    pub gamma: f64,
    /// Maximum number of synchronous sweeps. Default: 50.
    pub max_iters: usize,
    /// Stop once the largest per-state change in a sweep is below this.
    /// `None` always runs `max_iters` sweeps. Default: `Some(1e-9)`.
    pub tolerance: Option<f64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            gamma: 0.95,
            max_iters: 50,
            tolerance: Some(1e-9),
        }
    }
}

impl PlannerConfig {
    /// Set the discount factor.
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set the sweep limit.
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set or clear the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: Option<f64>) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_gamma(self.gamma)?;
        if self.max_iters == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if let Some(tol) = self.tolerance {
            if !tol.is_finite() || tol <= 0.0 {
                return Err(ConfigError::InvalidTolerance { value: tol });
            }
        }
        Ok(())
    }
}

pub(crate) fn validate_gamma(gamma: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&gamma) {
        Ok(())
    } else {
        Err(ConfigError::InvalidGamma { value: gamma })
    }
}
