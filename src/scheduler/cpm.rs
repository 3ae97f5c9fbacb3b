//! Critical Path Method (CPM).
//!
//! # Algorithm
//!
//! 1. **Forward pass** (topological order): sources start at 0, every other
//!    task starts at the latest earliest-finish of its dependencies.
//! 2. **Total duration**: the latest earliest-finish over all tasks (always
//!    attained by a sink).
//! 3. **Backward pass** (reverse topological order): sinks finish at the
//!    total duration, every other task finishes by the earliest
//!    latest-start of its dependents.
//! 4. **Slack** = LS - ES. Tasks with slack within tolerance of zero are
//!    critical.
//! 5. **Critical path**: from the lowest-index critical source, repeatedly
//!    step to the lowest-index critical dependent that starts exactly when
//!    the current task finishes, until a sink is reached.
//!
//! A critical non-sink always has such a dependent (the one that fixes its
//! latest finish), so the walk ends at a sink finishing at the total
//! duration. When several critical chains exist only one is reported, but
//! every critical task is flagged.
//!
//! # Complexity
//! O(V + E).
//!
//! # Reference
//! Kelley & Walker (1959), "Critical-path planning and scheduling"

use crate::graph::DependencyGraph;

/// CPM timing for one task (days from plan start).
#[derive(Debug, Clone, PartialEq)]
pub struct CpmTiming {
    /// Node weight.
    pub duration: f64,
    /// ES.
    pub earliest_start: f64,
    /// EF.
    pub earliest_finish: f64,
    /// LS.
    pub latest_start: f64,
    /// LF.
    pub latest_finish: f64,
    /// LS - ES.
    pub slack: f64,
    /// Slack within tolerance of zero.
    pub is_critical: bool,
}

/// Output of a CPM pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CpmAnalysis {
    /// Timing per task, indexed by task position.
    pub timings: Vec<CpmTiming>,
    /// Max earliest finish over all tasks.
    pub total_duration: f64,
    /// One critical chain in dependency order.
    pub critical_path: Vec<usize>,
}

/// Runs forward and backward passes.
///
/// `order` must be a topological order of `graph`, and `durations` must
/// hold one entry per graph node, indexed by task position.
pub(crate) fn analyze(
    graph: &DependencyGraph,
    order: &[usize],
    durations: &[f64],
    tolerance: f64,
) -> CpmAnalysis {
    let n = graph.len();
    debug_assert_eq!(durations.len(), n, "one duration per task");
    debug_assert_eq!(order.len(), n, "order covers every task");
    if n == 0 {
        return CpmAnalysis {
            timings: Vec::new(),
            total_duration: 0.0,
            critical_path: Vec::new(),
        };
    }

    let preds: Vec<Vec<usize>> = (0..n).map(|i| graph.predecessors(i)).collect();
    let succs: Vec<Vec<usize>> = (0..n).map(|i| graph.successors(i)).collect();

    // Forward pass
    let mut es = vec![0.0; n];
    let mut ef = vec![0.0; n];
    for &node in order {
        es[node] = preds[node]
            .iter()
            .map(|&p| ef[p])
            .fold(0.0, f64::max);
        ef[node] = es[node] + durations[node];
    }

    let total_duration = ef.iter().copied().fold(0.0, f64::max);

    // Backward pass
    let mut ls = vec![0.0; n];
    let mut lf = vec![0.0; n];
    for &node in order.iter().rev() {
        lf[node] = if succs[node].is_empty() {
            total_duration
        } else {
            succs[node]
                .iter()
                .map(|&s| ls[s])
                .fold(f64::INFINITY, f64::min)
        };
        ls[node] = lf[node] - durations[node];
    }

    let timings: Vec<CpmTiming> = (0..n)
        .map(|i| {
            let slack = ls[i] - es[i];
            CpmTiming {
                duration: durations[i],
                earliest_start: es[i],
                earliest_finish: ef[i],
                latest_start: ls[i],
                latest_finish: lf[i],
                slack,
                is_critical: slack.abs() <= tolerance,
            }
        })
        .collect();

    let critical_path = trace_critical_path(&timings, &preds, &succs, tolerance);

    CpmAnalysis {
        timings,
        total_duration,
        critical_path,
    }
}

fn trace_critical_path(
    timings: &[CpmTiming],
    preds: &[Vec<usize>],
    succs: &[Vec<usize>],
    tolerance: f64,
) -> Vec<usize> {
    let Some(start) = (0..timings.len()).find(|&i| preds[i].is_empty() && timings[i].is_critical)
    else {
        return Vec::new();
    };

    let mut path = vec![start];
    let mut current = start;
    // Successor lists are ascending, so `find` takes the lowest index.
    while let Some(&next) = succs[current].iter().find(|&&s| {
        timings[s].is_critical
            && (timings[s].earliest_start - timings[current].earliest_finish).abs() <= tolerance
    }) {
        path.push(next);
        current = next;
    }
    path
}
