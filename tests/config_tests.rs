use rcountdown::config::Config;
use rcountdown::config::migrate::{migrate_config_file, missing_fields};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

fn temp_conf(name: &str, content: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("{}_rcountdown.conf", name));
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_missing_optional_fields_take_defaults() {
    let path = temp_conf("cfg_defaults", "database: /tmp/x.sqlite\n");
    let cfg = Config::load_from(&path).unwrap();

    assert_eq!(cfg.database, "/tmp/x.sqlite");
    assert_eq!(cfg.poll_interval(), Duration::from_secs(1));
    assert_eq!(cfg.tick_interval(), Duration::from_secs(1));
    assert_eq!(cfg.notify_slice(), Duration::from_millis(200));
    assert_eq!(cfg.default_duration_secs, 3600);
}

#[test]
fn test_missing_file_yields_defaults() {
    let mut path = env::temp_dir();
    path.push("cfg_does_not_exist_rcountdown.conf");
    fs::remove_file(&path).ok();

    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg.poll_interval_ms, 1000);
}

#[test]
fn test_poll_interval_is_configurable() {
    let path = temp_conf(
        "cfg_poll",
        "database: /tmp/x.sqlite\npoll_interval_ms: 250\n",
    );
    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg.poll_interval(), Duration::from_millis(250));
}

#[test]
fn test_migrate_adds_missing_fields() {
    let path = temp_conf(
        "cfg_migrate",
        "database: /tmp/x.sqlite\npoll_interval_ms: 500\n",
    );

    let missing = missing_fields(&path).unwrap();
    assert!(missing.contains(&"tick_interval_ms"));
    assert!(!missing.contains(&"poll_interval_ms"));

    let added = migrate_config_file(&path).unwrap();
    assert_eq!(added, missing);
    assert!(missing_fields(&path).unwrap().is_empty());

    // existing values are kept
    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg.poll_interval_ms, 500);
    assert_eq!(cfg.database, "/tmp/x.sqlite");

    assert!(migrate_config_file(&path).unwrap().is_empty());
}
