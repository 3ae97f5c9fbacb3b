//! Candidate task intake.
//!
//! An external text generator proposes tasks for a goal as free text that
//! should contain a JSON array of objects like:
//!
//! ```json
//! [{"name": "Research", "description": "...", "optimistic_duration": 1,
//!   "most_likely_duration": 2, "pessimistic_duration": 4, "dependencies": []}]
//! ```
//!
//! Generated output is unreliable, so intake is lenient: it finds the array
//! wherever it sits in the text, skips unusable entries, coerces estimates
//! to positive numbers and drops dependency references it cannot trust.
//! The result still goes through full validation when scheduled.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::IntakeError;
use crate::models::Task;

/// Dependency indices at or above this are discarded.
pub const MAX_DEPENDENCY_INDEX: usize = 50;

/// Names are cut to this many characters.
pub const MAX_NAME_CHARS: usize = 120;

/// Descriptions are cut to this many characters.
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

type Pattern = LazyLock<Result<Regex, regex::Error>>;

static FENCED_ARRAY: Pattern = LazyLock::new(|| Regex::new(r"(?is)```json\s*(\[.*?\])\s*```"));

static BRACKETED_ARRAY: Pattern = LazyLock::new(|| Regex::new(r"(?s)\[.*\]"));

const REQUIRED_KEYS: [&str; 4] = [
    "name",
    "optimistic_duration",
    "most_likely_duration",
    "pessimistic_duration",
];

/// Parses generated text into candidate tasks.
///
/// `goal` becomes the description of entries that lack one.
///
/// Dependency indices in the text refer to positions in the generated
/// array. Entries that are skipped shift later positions, so references
/// are renumbered to the returned list, and references to skipped entries
/// are dropped.
pub fn parse_candidate_tasks(text: &str, goal: &str) -> Result<Vec<Task>, IntakeError> {
    let array = locate_array(text)?;
    let entries: Vec<Value> = match serde_json::from_str::<Value>(array)? {
        Value::Array(entries) => entries,
        _ => return Err(IntakeError::NoTaskList),
    };

    let kept: Vec<(usize, &serde_json::Map<String, Value>)> = entries
        .iter()
        .enumerate()
        .filter_map(|(pos, entry)| {
            let obj = entry.as_object()?;
            REQUIRED_KEYS
                .iter()
                .all(|k| obj.contains_key(*k))
                .then_some((pos, obj))
        })
        .collect();

    if kept.len() < entries.len() {
        debug!(
            dropped = entries.len() - kept.len(),
            kept = kept.len(),
            "skipped unusable candidate task entries"
        );
    }
    if kept.is_empty() {
        return Err(IntakeError::Empty);
    }

    let mut renumber = vec![None; entries.len()];
    for (new_pos, (raw_pos, _)) in kept.iter().enumerate() {
        renumber[*raw_pos] = Some(new_pos);
    }

    let tasks = kept
        .iter()
        .map(|&(raw_pos, obj)| {
            let deps = raw_dependencies(obj.get("dependencies"), raw_pos)
                .into_iter()
                .filter_map(|d| renumber.get(d).copied().flatten());
            candidate_task(obj, goal).with_dependencies(deps)
        })
        .collect();

    Ok(tasks)
}

/// Finds the JSON array: the whole text, a fenced `json` block, or the
/// widest bracketed span.
fn locate_array(text: &str) -> Result<&str, IntakeError> {
    let trimmed = text.trim();
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        return Ok(trimmed);
    }

    if let Some(m) = compiled(&FENCED_ARRAY)?
        .captures(trimmed)
        .and_then(|c| c.get(1))
    {
        return Ok(m.as_str());
    }

    compiled(&BRACKETED_ARRAY)?
        .find(trimmed)
        .map(|m| m.as_str())
        .ok_or(IntakeError::NoTaskList)
}

/// Compiled once per process; later calls reuse it.
fn compiled(pattern: &'static Pattern) -> Result<&'static Regex, IntakeError> {
    match &**pattern {
        Ok(re) => Ok(re),
        Err(e) => Err(IntakeError::Pattern(e.clone())),
    }
}

fn candidate_task(obj: &serde_json::Map<String, Value>, goal: &str) -> Task {
    let optimistic = positive_or(obj.get("optimistic_duration"), 1.0);
    let most_likely = positive_or(obj.get("most_likely_duration"), optimistic.max(1.5));
    let pessimistic = positive_or(
        obj.get("pessimistic_duration"),
        (most_likely * 1.5).max(3.0),
    )
    .max(most_likely)
    .max(optimistic);

    let name = match obj.get("name") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "Task".to_string(),
    };
    let description = match obj.get("description") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => goal.to_string(),
        Some(other) => other.to_string(),
    };

    Task::new(clip(&name, MAX_NAME_CHARS))
        .with_description(clip(&description, MAX_DESCRIPTION_CHARS))
        .with_estimate(optimistic, most_likely, pessimistic)
}

/// Positive finite number from a JSON number or numeric string.
fn positive_or(value: Option<&Value>, fallback: f64) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(fallback)
}

fn raw_dependencies(value: Option<&Value>, own_pos: usize) -> Vec<usize> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        })
        .filter_map(|d| usize::try_from(d).ok())
        .filter(|&d| d < MAX_DEPENDENCY_INDEX && d != own_pos)
        .collect()
}

fn clip(text: &str, max_chars: usize) -> String {
    text.trim().chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IntakeError;

    #[test]
    fn test_bare_array() {
        let text = r#"[
            {"name": "Research", "optimistic_duration": 1, "most_likely_duration": 2,
             "pessimistic_duration": 4, "dependencies": []},
            {"name": "Write", "description": "Draft it", "optimistic_duration": 2,
             "most_likely_duration": 3, "pessimistic_duration": 5, "dependencies": [0]}
        ]"#;
        let tasks = parse_candidate_tasks(text, "Publish a paper").unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].name, "Research");
        assert_eq!(tasks[0].description.as_deref(), Some("Publish a paper"));
        assert_eq!(tasks[1].description.as_deref(), Some("Draft it"));
        assert_eq!(tasks[1].dependencies, vec![0]);
        assert_eq!(tasks[1].estimate.most_likely, 3.0);
    }

    #[test]
    fn test_fenced_block_in_prose() {
        let text = "Here is your plan:\n```json\n[{\"name\": \"Only\", \"optimistic_duration\": 1, \
                    \"most_likely_duration\": 1, \"pessimistic_duration\": 1}]\n```\nGood luck!";
        let tasks = parse_candidate_tasks(text, "g").unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Only");
    }

    #[test]
    fn test_bracketed_span_in_prose() {
        let text = "Sure! [{\"name\": \"A\", \"optimistic_duration\": 1, \
                    \"most_likely_duration\": 2, \"pessimistic_duration\": 3}] Hope that helps.";
        let tasks = parse_candidate_tasks(text, "g").unwrap();
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn test_patterns_compile_once() {
        let first = compiled(&FENCED_ARRAY).unwrap();
        let again = compiled(&FENCED_ARRAY).unwrap();
        assert!(std::ptr::eq(first, again));
        assert!(compiled(&BRACKETED_ARRAY).is_ok());
    }

    #[test]
    fn test_no_array() {
        let err = parse_candidate_tasks("I cannot help with that.", "g").unwrap_err();
        assert!(matches!(err, IntakeError::NoTaskList));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_candidate_tasks("[{\"name\": }]", "g").unwrap_err();
        assert!(matches!(err, IntakeError::Malformed(_)));
    }

    #[test]
    fn test_no_usable_entries() {
        let err = parse_candidate_tasks(r#"[1, "two", {"name": "x"}]"#, "g").unwrap_err();
        assert!(matches!(err, IntakeError::Empty));
    }

    #[test]
    fn test_estimate_coercion() {
        let text = r#"[{"name": "Fix", "optimistic_duration": "-3",
                        "most_likely_duration": "abc", "pessimistic_duration": 0}]"#;
        let tasks = parse_candidate_tasks(text, "g").unwrap();
        let est = tasks[0].estimate;
        assert_eq!(est.optimistic, 1.0);
        assert_eq!(est.most_likely, 1.5);
        assert_eq!(est.pessimistic, 3.0);
    }

    #[test]
    fn test_pessimistic_raised_to_others() {
        let text = r#"[{"name": "Odd", "optimistic_duration": 4,
                        "most_likely_duration": 6, "pessimistic_duration": "2.5"}]"#;
        let tasks = parse_candidate_tasks(text, "g").unwrap();
        assert_eq!(tasks[0].estimate.pessimistic, 6.0);
    }

    #[test]
    fn test_dependency_filtering() {
        let text = r#"[
            {"name": "A", "optimistic_duration": 1, "most_likely_duration": 1, "pessimistic_duration": 1},
            {"name": "B", "optimistic_duration": 1, "most_likely_duration": 1, "pessimistic_duration": 1,
             "dependencies": [1, -1, 99, "0", 0, null, 0.0]}
        ]"#;
        let tasks = parse_candidate_tasks(text, "g").unwrap();
        // Self, negative, out-of-range and null dropped; duplicates collapse.
        assert_eq!(tasks[1].dependencies, vec![0]);
    }

    #[test]
    fn test_dependencies_renumbered_past_skipped_entries() {
        let text = r#"[
            {"name": "A", "optimistic_duration": 1, "most_likely_duration": 1, "pessimistic_duration": 1},
            "garbage",
            {"name": "C", "optimistic_duration": 1, "most_likely_duration": 1, "pessimistic_duration": 1,
             "dependencies": [0, 1]},
            {"name": "D", "optimistic_duration": 1, "most_likely_duration": 1, "pessimistic_duration": 1,
             "dependencies": [2]}
        ]"#;
        let tasks = parse_candidate_tasks(text, "g").unwrap();
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[1].dependencies, vec![0]);
        assert_eq!(tasks[2].dependencies, vec![1]);
    }

    #[test]
    fn test_text_clipping() {
        let long_name = "n".repeat(300);
        let text = format!(
            r#"[{{"name": "  {long_name}  ", "optimistic_duration": 1,
                 "most_likely_duration": 1, "pessimistic_duration": 1}}]"#
        );
        let tasks = parse_candidate_tasks(&text, &"g".repeat(5000)).unwrap();
        assert_eq!(tasks[0].name.chars().count(), MAX_NAME_CHARS);
        assert_eq!(
            tasks[0].description.as_ref().unwrap().chars().count(),
            MAX_DESCRIPTION_CHARS
        );
    }

    #[test]
    fn test_intake_output_schedules() {
        let text = r#"[
            {"name": "Plan", "optimistic_duration": 1, "most_likely_duration": 2, "pessimistic_duration": 3},
            {"name": "Do", "optimistic_duration": 2, "most_likely_duration": 4, "pessimistic_duration": 12,
             "dependencies": [0]}
        ]"#;
        let tasks = parse_candidate_tasks(text, "g").unwrap();
        let out = crate::scheduler::compute_schedule(&tasks, None).unwrap();
        assert_eq!(out.critical_path, vec![0, 1]);
        assert!((out.total_duration - 7.0).abs() < 1e-9);
    }
}
