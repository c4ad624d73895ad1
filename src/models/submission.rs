//! Last submission, shared between the `submit` command and running displays.

use crate::errors::AppResult;
use crate::models::duration::to_iso;
use crate::store::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SUBMISSION_KEY: &str = "submission";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub file_name: String,
    pub submitted_at: String,
}

impl SubmissionRecord {
    pub fn new(file_name: &str, at: DateTime<Utc>) -> Self {
        Self {
            file_name: file_name.to_string(),
            submitted_at: to_iso(at),
        }
    }
}

/// Unreadable payloads count as no submission.
pub fn parse_submission(raw: Option<&str>) -> Option<SubmissionRecord> {
    raw.and_then(|s| serde_json::from_str(s).ok())
}

pub fn load_submission<S: KeyValueStore + ?Sized>(
    store: &S,
) -> AppResult<Option<SubmissionRecord>> {
    let raw = store.get_item(SUBMISSION_KEY)?;
    Ok(parse_submission(raw.as_deref()))
}

pub fn save_submission<S: KeyValueStore + ?Sized>(
    store: &mut S,
    record: &SubmissionRecord,
) -> AppResult<()> {
    store.set_item(SUBMISSION_KEY, &serde_json::to_string(record)?)
}
