//! PERT three-point duration estimation.
//!
//! Each task carries three estimates in days:
//! - Optimistic (O): best case
//! - Most Likely (M): normal conditions
//! - Pessimistic (P): worst case
//!
//! Mean = (O + 4M + P) / 6, StdDev = (P - O) / 6
//!
//! `O <= M <= P` is expected but not enforced. When `O > P` the values are
//! used as given, so the standard deviation comes out negative while the
//! variance stays non-negative.
//!
//! # References
//!
//! Malcolm et al. (1959), "Application of a technique for R&D program evaluation"

use serde::{Deserialize, Serialize};

use crate::error::{EstimateField, ScheduleError, ScheduleResult};

/// Three-point duration estimate (days).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PertEstimate {
    /// Optimistic duration (days).
    pub optimistic: f64,
    /// Most likely duration (days).
    pub most_likely: f64,
    /// Pessimistic duration (days).
    pub pessimistic: f64,
}

impl PertEstimate {
    /// Creates a new PERT estimate.
    pub fn new(optimistic: f64, most_likely: f64, pessimistic: f64) -> Self {
        Self {
            optimistic,
            most_likely,
            pessimistic,
        }
    }

    /// Creates a deterministic estimate (O = M = P).
    pub fn fixed(days: f64) -> Self {
        Self::new(days, days, days)
    }

    /// Expected duration: `(O + 4M + P) / 6`.
    pub fn expected(&self) -> f64 {
        (self.optimistic + 4.0 * self.most_likely + self.pessimistic) / 6.0
    }

    /// Standard deviation: `(P - O) / 6`.
    pub fn std_dev(&self) -> f64 {
        (self.pessimistic - self.optimistic) / 6.0
    }

    /// Variance.
    pub fn variance(&self) -> f64 {
        let sd = self.std_dev();
        sd * sd
    }

    /// Whether the estimates are ordered `O <= M <= P`.
    pub fn is_ordered(&self) -> bool {
        self.optimistic <= self.most_likely && self.most_likely <= self.pessimistic
    }

    /// Checks that every estimate is a positive finite number and that the
    /// expected duration derived from them is finite.
    ///
    /// `task` and `name` only label the error.
    pub fn validate(&self, task: usize, name: &str) -> ScheduleResult<()> {
        let fields = [
            (EstimateField::Optimistic, self.optimistic),
            (EstimateField::MostLikely, self.most_likely),
            (EstimateField::Pessimistic, self.pessimistic),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ScheduleError::InvalidDuration {
                    task,
                    name: name.to_string(),
                    field,
                    value,
                });
            }
        }
        let expected = self.expected();
        if !expected.is_finite() {
            return Err(ScheduleError::InvalidDuration {
                task,
                name: name.to_string(),
                field: EstimateField::Expected,
                value: expected,
            });
        }
        Ok(())
    }
}

impl Default for PertEstimate {
    fn default() -> Self {
        Self::fixed(1.0)
    }
}

/// Summed spread of a chain of estimates.
///
/// Assumes independent durations, so variances add.
pub fn path_std_dev<'a, I>(estimates: I) -> f64
where
    I: IntoIterator<Item = &'a PertEstimate>,
{
    estimates
        .into_iter()
        .map(PertEstimate::variance)
        .sum::<f64>()
        .sqrt()
}
