//! Calendar mapping of day offsets.
//!
//! Converts CPM offsets (days from plan start) into absolute UTC dates by
//! pure additive arithmetic. Weekends and holidays are not skipped.
//! Fractional days are kept to millisecond precision.

use chrono::{DateTime, TimeDelta, Utc};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Maps day offsets onto dates relative to a fixed anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMapper {
    anchor: DateTime<Utc>,
}

impl CalendarMapper {
    /// Creates a mapper anchored at `anchor`.
    pub fn new(anchor: DateTime<Utc>) -> Self {
        Self { anchor }
    }

    /// Creates a mapper anchored at the current instant.
    pub fn starting_now() -> Self {
        Self::new(Utc::now())
    }

    /// Uses `anchor` if given, otherwise the current instant.
    pub fn anchored_or_now(anchor: Option<DateTime<Utc>>) -> Self {
        anchor.map_or_else(Self::starting_now, Self::new)
    }

    /// The plan start.
    pub fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    /// `anchor + days`.
    ///
    /// Saturates at the representable date range.
    pub fn date_at(&self, days: f64) -> DateTime<Utc> {
        let millis = (days * MILLIS_PER_DAY).round() as i64;
        TimeDelta::try_milliseconds(millis)
            .and_then(|delta| self.anchor.checked_add_signed(delta))
            .unwrap_or(if days < 0.0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            })
    }

    /// Start and end dates for an `[earliest_start, earliest_finish]` span.
    pub fn span(&self, earliest_start: f64, earliest_finish: f64) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.date_at(earliest_start), self.date_at(earliest_finish))
    }

    /// Signed number of days from the anchor to `date`.
    pub fn days_until(&self, date: DateTime<Utc>) -> f64 {
        (date - self.anchor).num_milliseconds() as f64 / MILLIS_PER_DAY
    }
}
