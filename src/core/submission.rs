//! File picker and submit control of the display page.
//!
//! Nothing is uploaded: a submission only flips the page state and shows a
//! confirmation for a fixed window.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, Utc};
use std::path::Path;

pub const ALLOWED_EXTENSIONS: [&str; 4] = [".pdf", ".doc", ".docx", ".txt"];

/// How long the confirmation stays up unless dismissed.
pub const CONFIRMATION_SECS: i64 = 3;

/// Lowercase extension including the dot, taken after the last '.'.
/// A name without a dot yields the whole name, so it never matches.
pub fn extension_of(name: &str) -> String {
    let file = Path::new(name)
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| name.to_string());
    let last = file.rsplit('.').next().unwrap_or_default();
    format!(".{}", last.to_lowercase())
}

pub fn is_allowed(name: &str) -> bool {
    let ext = extension_of(name);
    ALLOWED_EXTENSIONS.contains(&ext.as_str())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSelection {
    selected: Option<String>,
    submit_enabled: bool,
    submitted: bool,
    overlay_until: Option<DateTime<Utc>>,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Accept `name` if its extension is allowed. A rejected name leaves the
    /// current selection untouched.
    pub fn select(&mut self, name: &str) -> AppResult<()> {
        if !is_allowed(name) {
            return Err(AppError::UnsupportedFileType(name.to_string()));
        }
        self.selected = Some(name.to_string());
        self.submit_enabled = true;
        Ok(())
    }

    pub fn remove(&mut self) {
        self.selected = None;
        self.submit_enabled = false;
    }

    /// Submit the selected file: shows the confirmation until
    /// `now + CONFIRMATION_SECS` and disables submit again. The file stays
    /// selected.
    pub fn submit(&mut self, now: DateTime<Utc>) -> AppResult<String> {
        let Some(name) = self.selected.clone().filter(|_| self.submit_enabled) else {
            return Err(AppError::NoFileSelected);
        };
        self.submit_enabled = false;
        self.submitted = true;
        self.overlay_until = Some(now + Duration::seconds(CONFIRMATION_SECS));
        Ok(name)
    }

    pub fn overlay_visible(&self, now: DateTime<Utc>) -> bool {
        matches!(self.overlay_until, Some(until) if now < until)
    }

    pub fn overlay_until(&self) -> Option<DateTime<Utc>> {
        self.overlay_until
    }

    pub fn dismiss_overlay(&mut self) {
        self.overlay_until = None;
    }
}
