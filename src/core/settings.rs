//! Settings page: editable duration and due-date fields with live preview.
//!
//! Fields hold raw text, exactly as typed; every edit clamps the numeric
//! fields in place and recomputes the preview.

use crate::core::clock::Clock;
use crate::errors::{AppError, AppResult};
use crate::models::due_date::{
    self, DueDate, INVALID_DATE, NOT_SET, format_long, load_due, parse_input_in, save_due,
};
use crate::models::duration::{DurationRecord, load_record, save_record, total_seconds};
use crate::store::KeyValueStore;
use crate::utils::formatting::format_hms;
use crate::utils::input::parse_int_or_zero;
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

const MAX_MINUTES: i64 = 59;
const MAX_SECONDS: i64 = 59;

/// Where the user ends up after leaving the settings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    DisplayPage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationPreview {
    pub text: String,
    pub save_enabled: bool,
}

pub struct SettingsEditor<Tz: TimeZone = Local> {
    tz: Tz,
    hours: String,
    minutes: String,
    seconds: String,
    due_date: String,
    preview: DurationPreview,
    due_preview: String,
}

impl SettingsEditor<Local> {
    /// Populate the fields from the store, in the local time zone.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> AppResult<Self> {
        Self::load_in(store, Local)
    }
}

impl<Tz> SettingsEditor<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn load_in<S: KeyValueStore + ?Sized>(store: &S, tz: Tz) -> AppResult<Self> {
        let (hours, minutes, seconds) = match load_record(store)?.record() {
            Some(r) => (r.hours, r.minutes, r.seconds),
            None => (1, 0, 0),
        };

        let due_date = match load_due(store)? {
            DueDate::At(at) => due_date::to_input_value(at, &tz),
            DueDate::Unset | DueDate::Unreadable(_) => String::new(),
        };

        let mut editor = Self {
            tz,
            hours: hours.to_string(),
            minutes: minutes.to_string(),
            seconds: seconds.to_string(),
            due_date,
            preview: DurationPreview {
                text: format_hms(0),
                save_enabled: false,
            },
            due_preview: NOT_SET.to_string(),
        };
        editor.update_preview();
        editor.update_due_preview();
        Ok(editor)
    }

    pub fn hours(&self) -> &str {
        &self.hours
    }

    pub fn minutes(&self) -> &str {
        &self.minutes
    }

    pub fn seconds(&self) -> &str {
        &self.seconds
    }

    pub fn due_date(&self) -> &str {
        &self.due_date
    }

    pub fn preview(&self) -> &DurationPreview {
        &self.preview
    }

    pub fn due_preview(&self) -> &str {
        &self.due_preview
    }

    pub fn set_hours(&mut self, value: &str) -> &DurationPreview {
        self.hours = value.to_string();
        self.update_preview()
    }

    pub fn set_minutes(&mut self, value: &str) -> &DurationPreview {
        self.minutes = value.to_string();
        self.update_preview()
    }

    pub fn set_seconds(&mut self, value: &str) -> &DurationPreview {
        self.seconds = value.to_string();
        self.update_preview()
    }

    pub fn set_due_date(&mut self, value: &str) -> &str {
        self.due_date = value.trim().to_string();
        self.update_due_preview()
    }

    /// Current hours/minutes/seconds as numbers, already clamped.
    pub fn components(&self) -> (u64, u64, u64) {
        let h = parse_int_or_zero(&self.hours).max(0) as u64;
        let m = parse_int_or_zero(&self.minutes).clamp(0, MAX_MINUTES) as u64;
        let s = parse_int_or_zero(&self.seconds).clamp(0, MAX_SECONDS) as u64;
        (h, m, s)
    }

    pub fn total_seconds(&self) -> u64 {
        let (h, m, s) = self.components();
        total_seconds(h, m, s)
    }

    fn update_preview(&mut self) -> &DurationPreview {
        clamp_field(&mut self.hours, None);
        clamp_field(&mut self.minutes, Some(MAX_MINUTES));
        clamp_field(&mut self.seconds, Some(MAX_SECONDS));

        let total = self.total_seconds();
        self.preview = DurationPreview {
            text: format_hms(total),
            save_enabled: total > 0,
        };
        &self.preview
    }

    fn update_due_preview(&mut self) -> &str {
        self.due_preview = if self.due_date.is_empty() {
            NOT_SET.to_string()
        } else {
            match parse_input_in(&self.due_date, &self.tz) {
                Ok(at) => format_long(&at.with_timezone(&self.tz)),
                Err(_) => INVALID_DATE.to_string(),
            }
        };
        &self.due_preview
    }

    /// Due date the save would write, `None` for a cleared field.
    pub fn parsed_due_date(&self) -> AppResult<Option<DateTime<Utc>>> {
        if self.due_date.is_empty() {
            return Ok(None);
        }
        parse_input_in(&self.due_date, &self.tz).map(Some)
    }

    /// Persist a fresh record started now, then write or clear the due date.
    /// Nothing is written when validation fails.
    pub fn save<S, C>(&self, store: &mut S, clock: &C) -> AppResult<Navigation>
    where
        S: KeyValueStore + ?Sized,
        C: Clock + ?Sized,
    {
        if self.total_seconds() == 0 {
            return Err(AppError::ZeroDuration);
        }
        let due = self.parsed_due_date()?;

        let (h, m, s) = self.components();
        let record = DurationRecord::new(h, m, s, clock.now());
        save_record(store, &record)?;
        save_due(store, due)?;

        Ok(Navigation::DisplayPage)
    }

    /// Leave without touching the store.
    pub fn cancel(&self) -> Navigation {
        Navigation::DisplayPage
    }
}

/// Rewrite the field when it falls outside `0..=max`.
fn clamp_field(field: &mut String, max: Option<i64>) {
    let value = parse_int_or_zero(field);
    if value < 0 {
        *field = "0".to_string();
    } else if let Some(max) = max
        && value > max
    {
        *field = max.to_string();
    }
}
