#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, TimeZone, Utc};
use rcountdown::models::tier::Tier;
use rcountdown::ui::view::CountdownView;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rcd() -> Command {
    cargo_bin_cmd!("rcountdown")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rcountdown.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize an empty DB through the CLI
pub fn init_db(db_path: &str) {
    rcd()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Fixed instant all engine tests start from
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap()
}

/// View that remembers everything it was asked to render
#[derive(Debug, Default)]
pub struct RecordingView {
    pub timers: Vec<(String, Tier)>,
    pub statuses: Vec<String>,
    pub due_dates: Vec<String>,
}

impl RecordingView {
    pub fn last_timer(&self) -> Option<(&str, Tier)> {
        self.timers.last().map(|(t, tier)| (t.as_str(), *tier))
    }

    pub fn last_status(&self) -> Option<&str> {
        self.statuses.last().map(String::as_str)
    }

    pub fn last_due(&self) -> Option<&str> {
        self.due_dates.last().map(String::as_str)
    }
}

impl CountdownView for RecordingView {
    fn render_timer(&mut self, text: &str, tier: Tier) {
        self.timers.push((text.to_string(), tier));
    }

    fn render_status(&mut self, status: &str) {
        self.statuses.push(status.to_string());
    }

    fn render_due_date(&mut self, text: &str) {
        self.due_dates.push(text.to_string());
    }
}
