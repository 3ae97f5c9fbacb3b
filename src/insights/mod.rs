//! Schedule health insights.
//!
//! Derives analytics from a scheduled plan: slack statistics, deadline
//! buffer and status, overall risk, the riskiest open tasks, and ordered
//! rule-based recommendations. Every output is a pure derivation; nothing
//! here fails or calls out to external services.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Average slack | Mean of per-task slack |
//! | Zero-slack tasks | Tasks the last scheduling pass flagged critical |
//! | Buffer | Days from plan start to deadline, minus total duration |
//! | Progress | Completed tasks / all tasks × 100 |
//! | Critical-path spread | √(Σ PERT variance) along the critical chain |
//!
//! Policy cutoffs live in [`InsightThresholds`], defaulting to the named
//! constants exported here.

mod analyzer;
mod report;
mod thresholds;

pub use analyzer::{classify_deadline, classify_impact, classify_risk, compute_insights};
pub use report::{DeadlineStatus, HighRiskTask, Impact, InsightsReport, RiskLevel};
pub use thresholds::{
    InsightThresholds, AT_RISK_OVERRUN_DAYS, HIGH_IMPACT_SHARE, HIGH_RISK_CRITICAL_FRACTION,
    HIGH_RISK_SLACK_DAYS, MAX_HIGH_RISK_TASKS, MEDIUM_IMPACT_SHARE, MEDIUM_RISK_BUFFER_FRACTION,
    MEDIUM_RISK_SLACK_RATIO,
};
