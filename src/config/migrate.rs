use crate::config::{
    Config, default_duration_secs, default_notify_slice_ms, default_poll_interval_ms,
    default_tick_interval_ms,
};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Every field a current configuration file is expected to carry, with the
/// value written when the field is missing.
fn expected_fields() -> Vec<(&'static str, Value)> {
    vec![
        (
            "database",
            Value::String(Config::database_file().to_string_lossy().to_string()),
        ),
        ("tick_interval_ms", Value::from(default_tick_interval_ms())),
        ("poll_interval_ms", Value::from(default_poll_interval_ms())),
        ("notify_slice_ms", Value::from(default_notify_slice_ms())),
        ("default_duration_secs", Value::from(default_duration_secs())),
    ]
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let yaml: Value = serde_yaml::from_str(&content)?;

    match yaml {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} is not a YAML mapping",
            path.display()
        ))),
    }
}

/// List the expected fields missing from the config file at `path`.
pub fn missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
    let map = read_mapping(path)?;

    Ok(expected_fields()
        .into_iter()
        .filter(|(name, _)| !map.contains_key(*name))
        .map(|(name, _)| name)
        .collect())
}

/// Add every missing field to the config file with its default value.
///   Returns the names of the fields that were added (empty → no change).
pub fn migrate_config_file(path: &Path) -> AppResult<Vec<&'static str>> {
    let mut map = read_mapping(path)?;
    let mut added = Vec::new();

    for (name, default) in expected_fields() {
        if !map.contains_key(name) {
            map.insert(Value::String(name.to_string()), default);
            added.push(name);
        }
    }

    if added.is_empty() {
        info(format!("{} is already up to date.", path.display()));
        return Ok(added);
    }

    let serialized = serde_yaml::to_string(&Value::Mapping(map))?;
    fs::write(path, serialized).map_err(|_| AppError::ConfigSave)?;

    success(format!(
        "Configuration migrated: added {}",
        added.join(", ")
    ));

    Ok(added)
}
