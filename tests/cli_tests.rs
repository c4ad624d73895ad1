use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db, rcd, setup_test_db};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    rcd()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_settings_without_edits_only_loads() {
    let db_path = setup_test_db("cli_settings_load");
    init_db(&db_path);

    rcd()
        .args(["--db", &db_path, "--test", "settings"])
        .assert()
        .success()
        .stdout(contains("Hours   : 1"))
        .stdout(contains("Preview: 01:00:00"))
        .stdout(contains("Settings saved").not());
}

#[test]
fn test_settings_save_then_show_once() {
    let db_path = setup_test_db("cli_save_show");
    init_db(&db_path);

    rcd()
        .args([
            "--db",
            &db_path,
            "--test",
            "settings",
            "--hours",
            "2",
            "--minutes",
            "30",
            "--seconds",
            "15",
        ])
        .assert()
        .success()
        .stdout(contains("Preview: 02:30:15"))
        .stdout(contains("Settings saved"));

    rcd()
        .args(["--db", &db_path, "--test", "settings"])
        .assert()
        .success()
        .stdout(contains("Hours   : 2"))
        .stdout(contains("Minutes : 30"))
        .stdout(contains("Seconds : 15"));

    rcd()
        .args(["--db", &db_path, "--test", "show", "--once"])
        .assert()
        .success()
        .stdout(contains("02:30:1"))
        .stdout(contains("In Progress"))
        .stdout(contains("Not Set"));
}

#[test]
fn test_show_once_on_empty_store_uses_default() {
    let db_path = setup_test_db("cli_show_default");
    init_db(&db_path);

    rcd()
        .args(["--db", &db_path, "--test", "show", "--once"])
        .assert()
        .success()
        .stdout(contains("01:00:00").or(contains("00:59:59")));

    rcd()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("default"));
}

#[test]
fn test_zero_duration_is_rejected() {
    let db_path = setup_test_db("cli_zero");
    init_db(&db_path);

    rcd()
        .args([
            "--db",
            &db_path,
            "--test",
            "settings",
            "--hours",
            "0",
            "--minutes",
            "0",
            "--seconds",
            "0",
        ])
        .assert()
        .failure()
        .stderr(contains("greater than 0"));

    // nothing was written: the editor still loads the defaults
    rcd()
        .args(["--db", &db_path, "--test", "settings"])
        .assert()
        .success()
        .stdout(contains("Hours   : 1"));
}

#[test]
fn test_settings_cancel_clamps_but_does_not_save() {
    let db_path = setup_test_db("cli_cancel");
    init_db(&db_path);

    rcd()
        .args([
            "--db", &db_path, "--test", "settings", "--minutes", "75", "--cancel",
        ])
        .assert()
        .success()
        .stdout(contains("Minutes : 59"))
        .stdout(contains("Preview: 01:59:00"))
        .stdout(contains("Settings not saved"));

    rcd()
        .args(["--db", &db_path, "--test", "settings"])
        .assert()
        .success()
        .stdout(contains("Minutes : 0"));
}

#[test]
fn test_due_date_set_and_cleared() {
    let db_path = setup_test_db("cli_due");
    init_db(&db_path);

    rcd()
        .args([
            "--db",
            &db_path,
            "--test",
            "settings",
            "--due",
            "2026-12-24T18:00",
        ])
        .assert()
        .success()
        .stdout(contains("December 24, 2026 at 06:00 PM"));

    rcd()
        .args(["--db", &db_path, "--test", "show", "--once"])
        .assert()
        .success()
        .stdout(contains("December 24, 2026"));

    rcd()
        .args(["--db", &db_path, "--test", "settings", "--clear-due"])
        .assert()
        .success()
        .stdout(contains("Not Set"));

    rcd()
        .args(["--db", &db_path, "--test", "show", "--once"])
        .assert()
        .success()
        .stdout(contains("Not Set"));
}

#[test]
fn test_submit_accepts_allowed_documents() {
    let db_path = setup_test_db("cli_submit_ok");
    init_db(&db_path);

    rcd()
        .args(["--db", &db_path, "--test", "submit", "essay.PDF"])
        .assert()
        .success()
        .stdout(contains("Submitted"));

    rcd()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("submit"))
        .stdout(contains("essay.PDF"));

    // running displays read the submission from the store
    rcd()
        .args(["--db", &db_path, "--test", "db", "--info"])
        .assert()
        .success()
        .stdout(contains("submission"))
        .stdout(contains("fileName"));
}

#[test]
fn test_submit_rejects_other_files() {
    let db_path = setup_test_db("cli_submit_bad");
    init_db(&db_path);

    rcd()
        .args(["--db", &db_path, "--test", "submit", "holiday.png"])
        .assert()
        .failure()
        .stderr(contains("valid file type"));

    rcd()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("holiday.png").not());
}

#[test]
fn test_db_info_lists_stored_keys() {
    let db_path = setup_test_db("cli_db_info");
    init_db(&db_path);

    rcd()
        .args(["--db", &db_path, "--test", "settings", "--hours", "4"])
        .assert()
        .success();

    rcd()
        .args(["--db", &db_path, "--test", "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("countdownDuration"))
        .stdout(contains("Integrity check passed"));
}
