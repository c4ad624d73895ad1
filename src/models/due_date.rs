use crate::errors::{AppError, AppResult};
use crate::models::duration::to_iso;
use crate::store::KeyValueStore;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

/// Store key holding the advisory due date.
pub const DUE_KEY: &str = "dueTime";

pub const NOT_SET: &str = "Not Set";
pub const INVALID_DATE: &str = "Invalid Date";

/// Stored due date as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DueDate {
    Unset,
    At(DateTime<Utc>),
    /// Present but unreadable; shown as "Invalid Date".
    Unreadable(String),
}

impl DueDate {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => DueDate::Unset,
            Some(s) => match DateTime::parse_from_rfc3339(s.trim()) {
                Ok(dt) => DueDate::At(dt.with_timezone(&Utc)),
                Err(_) => DueDate::Unreadable(s.to_string()),
            },
        }
    }

    /// Display text in the local time zone.
    pub fn display(&self) -> String {
        match self {
            DueDate::Unset => NOT_SET.to_string(),
            DueDate::At(at) => format_long(&at.with_timezone(&Local)),
            DueDate::Unreadable(_) => INVALID_DATE.to_string(),
        }
    }
}

/// Long-form en-US text, e.g. `October 19, 2026 at 03:00 PM`.
pub fn format_long<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%B %-d, %Y at %I:%M %p").to_string()
}

/// Parse a `YYYY-MM-DDTHH:MM` (seconds optional) wall-clock value.
pub fn parse_input_naive(input: &str) -> Option<NaiveDateTime> {
    let s = input.trim();
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Resolve a wall-clock input value in `tz`. On a DST overlap the earlier
/// instant wins; a value inside a DST gap is rejected.
pub fn parse_input_in<Tz: TimeZone>(input: &str, tz: &Tz) -> AppResult<DateTime<Utc>> {
    let naive =
        parse_input_naive(input).ok_or_else(|| AppError::InvalidDueDate(input.to_string()))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| AppError::InvalidDueDate(input.to_string()))
}

pub fn parse_input(input: &str) -> AppResult<DateTime<Utc>> {
    parse_input_in(input, &Local)
}

/// Render an instant the way the editor field holds it.
pub fn to_input_value<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.with_timezone(tz).format("%Y-%m-%dT%H:%M").to_string()
}

pub fn load_due<S: KeyValueStore + ?Sized>(store: &S) -> AppResult<DueDate> {
    let raw = store.get_item(DUE_KEY)?;
    Ok(DueDate::parse(raw.as_deref()))
}

/// Write the due date, or remove the key entirely when `None`.
pub fn save_due<S: KeyValueStore + ?Sized>(
    store: &mut S,
    due: Option<DateTime<Utc>>,
) -> AppResult<()> {
    match due {
        Some(at) => store.set_item(DUE_KEY, &to_iso(at)),
        None => store.remove_item(DUE_KEY),
    }
}
