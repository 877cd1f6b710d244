//! Finite transition distributions.

use smallvec::SmallVec;

use crate::error::SampleError;

/// Slack allowed when checking that probabilities sum to one.
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// A distribution over next states.
///
/// Outcomes keep insertion order, and adding an outcome that is already
/// present sums its probability instead of listing it twice. Three
/// inline slots cover a noisy cardinal move (intended cell plus two
/// perpendicular drifts) without allocating.
#[derive(Clone, Debug, PartialEq)]
pub struct Distribution<S> {
    outcomes: SmallVec<[(S, f64); 3]>,
}

impl<S: Copy + PartialEq> Distribution<S> {
    /// An empty distribution. Not normalized until outcomes are added.
    pub fn new() -> Self {
        Self {
            outcomes: SmallVec::new(),
        }
    }

    /// A point mass on `state`.
    pub fn certain(state: S) -> Self {
        let mut d = Self::new();
        d.add(state, 1.0);
        d
    }

    /// Add `probability` mass to `state`, merging with an existing entry.
    pub fn add(&mut self, state: S, probability: f64) {
        match self.outcomes.iter_mut().find(|(s, _)| *s == state) {
            Some((_, p)) => *p += probability,
            None => self.outcomes.push((state, probability)),
        }
    }

    /// Iterate over `(state, probability)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (S, f64)> + '_ {
        self.outcomes.iter().copied()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether there are no outcomes.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Probability of `state` (0.0 if absent).
    pub fn probability(&self, state: S) -> f64 {
        self.outcomes
            .iter()
            .find(|(s, _)| *s == state)
            .map_or(0.0, |(_, p)| *p)
    }

    /// Sum of all probabilities.
    pub fn total(&self) -> f64 {
        self.outcomes.iter().map(|(_, p)| p).sum()
    }

    /// Expected value of `f` over next states.
    pub fn expectation(&self, mut f: impl FnMut(S) -> f64) -> f64 {
        self.outcomes.iter().map(|&(s, p)| p * f(s)).sum()
    }

    /// Pick the outcome selected by one uniform draw `u` in `[0, 1)`
    /// against the cumulative distribution.
    ///
    /// # Errors
    ///
    /// [`SampleError::ProbabilityAboveOne`] if the running total passes
    /// `1 + PROBABILITY_TOLERANCE` before `u` is covered, and
    /// [`SampleError::ProbabilityBelowOne`] if enumeration ends with a
    /// total under `1 - PROBABILITY_TOLERANCE`.
    pub fn sample(&self, u: f64) -> Result<S, SampleError> {
        let mut total = 0.0;
        for &(state, p) in &self.outcomes {
            total += p;
            if total > 1.0 + PROBABILITY_TOLERANCE {
                return Err(SampleError::ProbabilityAboveOne { total });
            }
            if u < total {
                return Ok(state);
            }
        }
        match self.outcomes.last() {
            // Rounding left a sliver of [total, 1) uncovered.
            Some(&(state, _)) if total >= 1.0 - PROBABILITY_TOLERANCE => Ok(state),
            _ => Err(SampleError::ProbabilityBelowOne { total }),
        }
    }
}

impl<S: Copy + PartialEq> Default for Distribution<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Copy + PartialEq> FromIterator<(S, f64)> for Distribution<S> {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut d = Self::new();
        for (s, p) in iter {
            d.add(s, p);
        }
        d
    }
}
