//! Insight derivation.
//!
//! Pure function of a plan and a threshold policy. Missing inputs degrade
//! to documented defaults instead of failing:
//! - no tasks: Low risk, 0% progress, a single "add tasks" recommendation
//! - no deadline: `NoDeadline`, no buffer
//! - stale or missing schedule: only scheduled tasks feed slack metrics

use chrono::Utc;

use super::report::{DeadlineStatus, HighRiskTask, Impact, InsightsReport, RiskLevel};
use super::thresholds::InsightThresholds;
use crate::models::{path_std_dev, Plan, Task};
use crate::scheduler::CalendarMapper;

/// Derives schedule health insights for `plan`.
pub fn compute_insights(plan: &Plan, thresholds: &InsightThresholds) -> InsightsReport {
    let tasks = plan.tasks();
    let total_duration = plan.total_duration().unwrap_or(0.0);

    let buffer_days = plan.deadline().map(|deadline| {
        let anchor = plan
            .start_date()
            .or_else(|| {
                tasks
                    .iter()
                    .filter_map(|t| t.schedule.as_ref().map(|s| s.start_date))
                    .min()
            })
            .unwrap_or_else(Utc::now);
        CalendarMapper::new(anchor).days_until(deadline) - total_duration
    });
    let deadline_status = classify_deadline(buffer_days, thresholds);
    let deadline_message = deadline_message(deadline_status, buffer_days, total_duration);

    if tasks.is_empty() {
        return InsightsReport {
            overall_risk: RiskLevel::Low,
            progress_percentage: 0.0,
            average_slack: 0.0,
            zero_slack_tasks: 0,
            critical_fraction: 0.0,
            deadline_status,
            deadline_message,
            buffer_days,
            critical_path: Vec::new(),
            critical_path_std_dev: 0.0,
            high_risk_tasks: Vec::new(),
            recommendations: vec!["Add tasks to this plan to unlock scheduling insights.".into()],
        };
    }

    let total_tasks = tasks.len();
    let completed = tasks.iter().filter(|t| t.is_complete).count();
    let progress_percentage = completed as f64 / total_tasks as f64 * 100.0;

    let slacks: Vec<f64> = tasks.iter().filter_map(Task::slack).collect();
    let average_slack = if slacks.is_empty() {
        0.0
    } else {
        slacks.iter().sum::<f64>() / slacks.len() as f64
    };
    let zero_slack_tasks = tasks.iter().filter(|t| t.is_on_critical_path()).count();
    let critical_fraction = zero_slack_tasks as f64 / total_tasks as f64;

    let critical_indices: Vec<usize> = if plan.critical_path().is_empty() {
        (0..total_tasks)
            .filter(|&i| tasks[i].is_on_critical_path())
            .collect()
    } else {
        plan.critical_path().to_vec()
    };
    let critical_path: Vec<String> = critical_indices
        .iter()
        .filter_map(|&i| tasks.get(i).map(|t| t.name.clone()))
        .collect();
    let critical_path_std_dev = path_std_dev(
        critical_indices
            .iter()
            .filter_map(|&i| tasks.get(i).map(|t| &t.estimate)),
    );

    let high_risk_tasks = collect_high_risk(tasks, total_duration, thresholds);

    let overall_risk = classify_risk(
        critical_fraction,
        average_slack,
        total_duration,
        buffer_days,
        thresholds,
    );

    let mut recommendations = Vec::new();
    if !plan.is_scheduled() {
        recommendations.push("Run a scheduling pass to refresh timing data.".to_string());
    }
    match buffer_days {
        Some(buffer) if buffer < 0.0 => recommendations.push(format!(
            "Deadline buffer is negative by {:.1} days; reduce scope or extend the deadline.",
            -buffer
        )),
        Some(buffer) if buffer < thresholds.medium_risk_buffer_fraction * total_duration => {
            recommendations.push(format!(
                "Deadline buffer is only {buffer:.1} days; add contingency or accelerate critical tasks."
            ));
        }
        Some(_) => {}
        None => recommendations
            .push("Set a deadline to track schedule risk and buffer.".to_string()),
    }
    if let Some(focus) = high_risk_tasks.first() {
        recommendations.push(format!(
            "Prioritise '{}': slack is only {:.1} days.",
            focus.name, focus.slack
        ));
    }
    if zero_slack_tasks > 0 {
        let noun = if zero_slack_tasks == 1 { "task" } else { "tasks" };
        recommendations.push(format!(
            "Critical path has {zero_slack_tasks} {noun} with zero slack; consider re-sequencing or adding parallel workstreams."
        ));
    }
    if completed < total_tasks {
        recommendations.push(
            "Review completed work weekly and keep task statuses up to date.".to_string(),
        );
    }

    InsightsReport {
        overall_risk,
        progress_percentage,
        average_slack,
        zero_slack_tasks,
        critical_fraction,
        deadline_status,
        deadline_message,
        buffer_days,
        critical_path,
        critical_path_std_dev,
        high_risk_tasks,
        recommendations,
    }
}

/// Classifies deadline health from the buffer.
pub fn classify_deadline(buffer_days: Option<f64>, thresholds: &InsightThresholds) -> DeadlineStatus {
    match buffer_days {
        None => DeadlineStatus::NoDeadline,
        Some(b) if b >= 0.0 => DeadlineStatus::OnTrack,
        Some(b) if b >= -thresholds.at_risk_overrun_days => DeadlineStatus::AtRisk,
        Some(_) => DeadlineStatus::Behind,
    }
}

/// Combines critical fraction, relative slack and deadline buffer.
///
/// High if the buffer is negative or the zero-slack fraction exceeds its
/// cutoff. Medium if the buffer is under its fraction of total duration or
/// the average slack is under its fraction of total duration. Low otherwise.
pub fn classify_risk(
    critical_fraction: f64,
    average_slack: f64,
    total_duration: f64,
    buffer_days: Option<f64>,
    thresholds: &InsightThresholds,
) -> RiskLevel {
    if buffer_days.is_some_and(|b| b < 0.0)
        || critical_fraction > thresholds.high_risk_critical_fraction
    {
        return RiskLevel::High;
    }

    let thin_buffer = buffer_days
        .is_some_and(|b| b < thresholds.medium_risk_buffer_fraction * total_duration);
    let thin_slack = total_duration > 0.0
        && average_slack / total_duration < thresholds.medium_risk_slack_ratio;
    if thin_buffer || thin_slack {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Labels a task by the share of total duration it represents.
pub fn classify_impact(
    expected_duration: f64,
    total_duration: f64,
    thresholds: &InsightThresholds,
) -> Impact {
    if total_duration <= 0.0 {
        return Impact::Low;
    }
    let share = expected_duration / total_duration;
    if share >= thresholds.high_impact_share {
        Impact::High
    } else if share >= thresholds.medium_impact_share {
        Impact::Medium
    } else {
        Impact::Low
    }
}

fn collect_high_risk(
    tasks: &[Task],
    total_duration: f64,
    thresholds: &InsightThresholds,
) -> Vec<HighRiskTask> {
    let mut out: Vec<HighRiskTask> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| !t.is_complete)
        .filter_map(|(index, t)| {
            let s = t.schedule.as_ref()?;
            (s.slack < thresholds.high_risk_slack_days).then(|| HighRiskTask {
                index,
                name: t.name.clone(),
                slack: s.slack,
                expected_duration: s.expected_duration,
                impact: classify_impact(s.expected_duration, total_duration, thresholds),
            })
        })
        .collect();
    // Stable: equal slack keeps plan order.
    out.sort_by(|a, b| a.slack.total_cmp(&b.slack));
    out.truncate(thresholds.max_high_risk_tasks);
    out
}

fn deadline_message(status: DeadlineStatus, buffer_days: Option<f64>, total_duration: f64) -> String {
    let buffer = buffer_days.unwrap_or(0.0);
    match status {
        DeadlineStatus::NoDeadline => {
            format!("No deadline provided; total duration is {total_duration:.1} days.")
        }
        DeadlineStatus::OnTrack => {
            format!("Deadline achievable with {buffer:.1} days of buffer.")
        }
        DeadlineStatus::AtRisk => format!(
            "Schedule overruns the deadline by {:.1} days; small adjustments can recover it.",
            -buffer
        ),
        DeadlineStatus::Behind => {
            format!("Schedule exceeds the deadline by {:.1} days.", -buffer)
        }
    }
}
