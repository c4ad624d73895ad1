//! Shared key-value store seen by every display and settings context.
//!
//! Both values and keys are plain strings; callers serialize and parse.
//! A write made through one context is reported to every *other* context as
//! a [`StorageEvent`]; the writer itself is never notified.

pub mod memory;
pub mod sqlite;

use crate::errors::AppResult;
use std::collections::HashMap;

/// Change to one key made by another context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> AppResult<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> AppResult<()>;

    fn remove_item(&mut self, key: &str) -> AppResult<()>;

    /// All keys currently stored, sorted.
    fn keys(&self) -> AppResult<Vec<String>>;

    /// Drain the changes other contexts made since the last call.
    fn take_events(&mut self) -> AppResult<Vec<StorageEvent>>;
}

/// Diff two key/value snapshots into storage events, sorted by key.
pub(crate) fn diff_snapshots(
    before: &HashMap<String, String>,
    after: &HashMap<String, String>,
) -> Vec<StorageEvent> {
    let mut keys: Vec<&String> = before.keys().chain(after.keys()).collect();
    keys.sort();
    keys.dedup();

    keys.into_iter()
        .filter_map(|k| {
            let old = before.get(k);
            let new = after.get(k);
            if old == new {
                None
            } else {
                Some(StorageEvent {
                    key: k.clone(),
                    old_value: old.cloned(),
                    new_value: new.cloned(),
                })
            }
        })
        .collect()
}
