//! Insight report types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Overall schedule risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Comfortable slack and buffer.
    Low,
    /// Thin slack or buffer.
    Medium,
    /// Deadline missed or most work on the critical path.
    High,
}

impl RiskLevel {
    /// Display label.
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Schedule position relative to the deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeadlineStatus {
    /// The plan has no deadline.
    NoDeadline,
    /// Finishes on or before the deadline.
    OnTrack,
    /// Overruns by no more than the at-risk allowance.
    AtRisk,
    /// Overruns by more than the at-risk allowance.
    Behind,
}

impl DeadlineStatus {
    /// Display label.
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::NoDeadline => "No deadline set",
            Self::OnTrack => "On track",
            Self::AtRisk => "At risk",
            Self::Behind => "Behind schedule",
        }
    }
}

impl fmt::Display for DeadlineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// How much of the project a single task's duration represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Impact {
    /// Below the medium share.
    Low,
    /// Between the medium and high shares.
    Medium,
    /// At or above the high share.
    High,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        })
    }
}

/// An incomplete task with little or no slack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighRiskTask {
    /// Position in the plan.
    pub index: usize,
    /// Task name.
    pub name: String,
    /// Slack (days).
    pub slack: f64,
    /// PERT expected duration (days).
    pub expected_duration: f64,
    /// Share-of-duration label.
    pub impact: Impact,
}

/// Schedule health analytics for a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsReport {
    /// Combined risk classification.
    pub overall_risk: RiskLevel,
    /// Completed tasks as a percentage of all tasks.
    pub progress_percentage: f64,
    /// Mean slack over scheduled tasks (days).
    pub average_slack: f64,
    /// Number of tasks with slack within tolerance of zero.
    pub zero_slack_tasks: usize,
    /// `zero_slack_tasks / task count`.
    pub critical_fraction: f64,
    /// Deadline classification.
    pub deadline_status: DeadlineStatus,
    /// Human-readable deadline summary.
    pub deadline_message: String,
    /// Days between projected finish and deadline; negative means late.
    pub buffer_days: Option<f64>,
    /// Names along the reported critical chain.
    pub critical_path: Vec<String>,
    /// PERT spread of the critical chain (days).
    pub critical_path_std_dev: f64,
    /// Riskiest incomplete tasks, lowest slack first.
    pub high_risk_tasks: Vec<HighRiskTask>,
    /// Ordered, rule-based advice.
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(DeadlineStatus::NoDeadline.to_string(), "No deadline set");
        assert_eq!(DeadlineStatus::OnTrack.to_string(), "On track");
        assert_eq!(DeadlineStatus::AtRisk.to_string(), "At risk");
        assert_eq!(DeadlineStatus::Behind.to_string(), "Behind schedule");
        assert_eq!(RiskLevel::Medium.to_string(), "Medium");
        assert_eq!(Impact::High.to_string(), "High");
    }

    #[test]
    fn test_risk_ordering() {
        assert!(RiskLevel::High > RiskLevel::Medium);
        assert!(RiskLevel::Medium > RiskLevel::Low);
    }
}
