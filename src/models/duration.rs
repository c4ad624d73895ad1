use crate::errors::{AppError, AppResult};
use crate::store::KeyValueStore;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Store key holding the serialized [`DurationRecord`].
pub const DURATION_KEY: &str = "countdownDuration";

/// Countdown length used when no usable record is stored.
pub const DEFAULT_TOTAL_SECONDS: u64 = 3600;

/// Total countdown length plus the absolute instant it was (re)started.
///
/// The JSON form is the one the settings page has always written:
/// `{"hours":1,"minutes":0,"seconds":0,"totalSeconds":3600,"startTime":"…Z"}`.
///
/// The components are informational and may be negative in older payloads
/// (`{"hours":2,"minutes":-5,…,"totalSeconds":6900}`); only `totalSeconds`
/// and `startTime` drive the countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationRecord {
    #[serde(default)]
    pub hours: i64,
    #[serde(default)]
    pub minutes: i64,
    #[serde(default)]
    pub seconds: i64,
    pub total_seconds: u64,
    pub start_time: String,
}

impl DurationRecord {
    /// Build a record started at `now`.
    pub fn new(hours: u64, minutes: u64, seconds: u64, now: DateTime<Utc>) -> Self {
        Self {
            hours: component(hours),
            minutes: component(minutes),
            seconds: component(seconds),
            total_seconds: total_seconds(hours, minutes, seconds),
            start_time: to_iso(now),
        }
    }

    /// Record used when nothing (or nothing readable) is stored.
    pub fn default_at(total: u64, now: DateTime<Utc>) -> Self {
        Self {
            hours: component(total / 3600),
            minutes: component((total % 3600) / 60),
            seconds: component(total % 60),
            total_seconds: total,
            start_time: to_iso(now),
        }
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.start_time)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Whole seconds left at `now`, clamped at zero.
    ///
    /// Loaded records always carry a readable start time; see [`parse_record`].
    pub fn remaining_at(&self, now: DateTime<Utc>) -> u64 {
        let elapsed = match self.started_at() {
            Some(start) => elapsed_seconds(start, now),
            None => 0,
        };
        remaining_seconds(self.total_seconds, elapsed)
    }

    /// Two records describe the same countdown when start and length match.
    pub fn same_countdown(&self, other: &DurationRecord) -> bool {
        self.start_time == other.start_time && self.total_seconds == other.total_seconds
    }

    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn component(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

/// `hours*3600 + minutes*60 + seconds`, saturating instead of overflowing.
pub fn total_seconds(hours: u64, minutes: u64, seconds: u64) -> u64 {
    hours
        .saturating_mul(3600)
        .saturating_add(minutes.saturating_mul(60))
        .saturating_add(seconds)
}

/// `floor((now - start) / 1000ms)`; a start in the future counts as zero.
pub fn elapsed_seconds(start: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let ms = (now - start).num_milliseconds();
    if ms <= 0 { 0 } else { (ms / 1000) as u64 }
}

pub fn remaining_seconds(total: u64, elapsed: u64) -> u64 {
    total.saturating_sub(elapsed)
}

/// ISO 8601 in UTC with millisecond precision, e.g. `2026-10-19T08:00:00.000Z`.
pub fn to_iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Result of reading the duration key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Present(DurationRecord),
    Missing,
    Malformed(String),
}

impl LoadOutcome {
    pub fn record(&self) -> Option<&DurationRecord> {
        match self {
            LoadOutcome::Present(r) => Some(r),
            _ => None,
        }
    }

    /// The stored record, or the default started at `now`.
    pub fn or_default(self, default_total: u64, now: DateTime<Utc>) -> DurationRecord {
        match self {
            LoadOutcome::Present(r) => r,
            LoadOutcome::Missing | LoadOutcome::Malformed(_) => {
                DurationRecord::default_at(default_total, now)
            }
        }
    }
}

fn malformed(reason: impl Into<String>) -> LoadOutcome {
    let err = AppError::MalformedRecord {
        key: DURATION_KEY.to_string(),
        reason: reason.into(),
    };
    LoadOutcome::Malformed(err.to_string())
}

/// Parse a stored payload. Blank payloads count as missing; a payload whose
/// `startTime` cannot be read is malformed.
pub fn parse_record(raw: Option<&str>) -> LoadOutcome {
    match raw {
        None => LoadOutcome::Missing,
        Some(s) if s.trim().is_empty() => LoadOutcome::Missing,
        Some(s) => match serde_json::from_str::<DurationRecord>(s) {
            Ok(r) if r.started_at().is_none() => {
                malformed(format!("unreadable startTime '{}'", r.start_time))
            }
            Ok(r) => LoadOutcome::Present(r),
            Err(e) => malformed(e.to_string()),
        },
    }
}

/// Read the duration key from `store` without deciding what absence means.
pub fn load_record<S: KeyValueStore + ?Sized>(store: &S) -> AppResult<LoadOutcome> {
    let raw = store.get_item(DURATION_KEY)?;
    Ok(parse_record(raw.as_deref()))
}

/// Replace the stored record wholesale.
pub fn save_record<S: KeyValueStore + ?Sized>(
    store: &mut S,
    record: &DurationRecord,
) -> AppResult<()> {
    store.set_item(DURATION_KEY, &record.to_json()?)
}
