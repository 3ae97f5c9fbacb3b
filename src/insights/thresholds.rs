//! Insight policy thresholds.
//!
//! The risk and deadline cutoffs are heuristics, not canonical values. Each
//! has a named default constant so tests can target boundaries exactly, and
//! every field can be overridden per call.

use serde::{Deserialize, Serialize};

/// Zero-slack fraction above which overall risk is High.
pub const HIGH_RISK_CRITICAL_FRACTION: f64 = 0.5;

/// Deadline buffer, as a fraction of total duration, below which risk is
/// at least Medium.
pub const MEDIUM_RISK_BUFFER_FRACTION: f64 = 0.10;

/// Average slack, as a fraction of total duration, below which risk is at
/// least Medium.
pub const MEDIUM_RISK_SLACK_RATIO: f64 = 0.10;

/// Overrun (days past the deadline) still reported as "At risk" rather
/// than "Behind schedule".
pub const AT_RISK_OVERRUN_DAYS: f64 = 1.0;

/// Slack (days) below which an incomplete task is high risk.
pub const HIGH_RISK_SLACK_DAYS: f64 = 1.0;

/// Maximum number of high-risk tasks reported.
pub const MAX_HIGH_RISK_TASKS: usize = 5;

/// Share of total duration at or above which a task's impact is High.
pub const HIGH_IMPACT_SHARE: f64 = 0.3;

/// Share of total duration at or above which a task's impact is Medium.
pub const MEDIUM_IMPACT_SHARE: f64 = 0.1;

/// Tunable insight policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightThresholds {
    /// See [`HIGH_RISK_CRITICAL_FRACTION`].
    pub high_risk_critical_fraction: f64,
    /// See [`MEDIUM_RISK_BUFFER_FRACTION`].
    pub medium_risk_buffer_fraction: f64,
    /// See [`MEDIUM_RISK_SLACK_RATIO`].
    pub medium_risk_slack_ratio: f64,
    /// See [`AT_RISK_OVERRUN_DAYS`].
    pub at_risk_overrun_days: f64,
    /// See [`HIGH_RISK_SLACK_DAYS`].
    pub high_risk_slack_days: f64,
    /// See [`MAX_HIGH_RISK_TASKS`].
    pub max_high_risk_tasks: usize,
    /// See [`HIGH_IMPACT_SHARE`].
    pub high_impact_share: f64,
    /// See [`MEDIUM_IMPACT_SHARE`].
    pub medium_impact_share: f64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            high_risk_critical_fraction: HIGH_RISK_CRITICAL_FRACTION,
            medium_risk_buffer_fraction: MEDIUM_RISK_BUFFER_FRACTION,
            medium_risk_slack_ratio: MEDIUM_RISK_SLACK_RATIO,
            at_risk_overrun_days: AT_RISK_OVERRUN_DAYS,
            high_risk_slack_days: HIGH_RISK_SLACK_DAYS,
            max_high_risk_tasks: MAX_HIGH_RISK_TASKS,
            high_impact_share: HIGH_IMPACT_SHARE,
            medium_impact_share: MEDIUM_IMPACT_SHARE,
        }
    }
}

impl InsightThresholds {
    /// Creates the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the High-risk zero-slack fraction.
    pub fn with_high_risk_critical_fraction(mut self, fraction: f64) -> Self {
        self.high_risk_critical_fraction = fraction;
        self
    }

    /// Sets the Medium-risk buffer fraction.
    pub fn with_medium_risk_buffer_fraction(mut self, fraction: f64) -> Self {
        self.medium_risk_buffer_fraction = fraction;
        self
    }

    /// Sets the Medium-risk average-slack ratio.
    pub fn with_medium_risk_slack_ratio(mut self, ratio: f64) -> Self {
        self.medium_risk_slack_ratio = ratio;
        self
    }

    /// Sets the "At risk" overrun allowance (days).
    pub fn with_at_risk_overrun_days(mut self, days: f64) -> Self {
        self.at_risk_overrun_days = days;
        self
    }

    /// Sets the high-risk slack cutoff (days).
    pub fn with_high_risk_slack_days(mut self, days: f64) -> Self {
        self.high_risk_slack_days = days;
        self
    }

    /// Sets the high-risk list cap.
    pub fn with_max_high_risk_tasks(mut self, max: usize) -> Self {
        self.max_high_risk_tasks = max;
        self
    }
}
