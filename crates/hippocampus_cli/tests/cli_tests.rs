//! Integration tests for the `hippocampus` binary

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::hippocampus_cmd;

#[test]
fn test_add_then_list_day() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("journal.db");

    hippocampus_cmd(&db)
        .args(["add", "--title", "Day 1", "--body", "Notes", "--date", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Added content://hippocampus.journal/entries/1",
        ));

    hippocampus_cmd(&db)
        .args(["list", "--date", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 1"));

    hippocampus_cmd(&db)
        .args(["list", "--date", "2024-01-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found"));
}

#[test]
fn test_list_puts_pinned_first() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("journal.db");

    hippocampus_cmd(&db)
        .args(["add", "-t", "plain", "-d", "Jan 05 2024"])
        .assert()
        .success();
    hippocampus_cmd(&db)
        .args(["add", "-t", "important", "-d", "2024-01-05", "--pin"])
        .assert()
        .success();

    let output = hippocampus_cmd(&db)
        .args(["list", "--date", "2024-01-05"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let important = stdout.find("important").unwrap();
    let plain = stdout.find("plain").unwrap();
    assert!(important < plain, "pinned entry should come first:\n{stdout}");
}

#[test]
fn test_add_with_nothing_to_save_is_noop() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("journal.db");

    hippocampus_cmd(&db)
        .args(["add", "--title", "  ", "--date", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to save"));

    hippocampus_cmd(&db)
        .args(["--json", "list", "--date", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn test_add_body_without_title_is_rejected() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("journal.db");

    hippocampus_cmd(&db)
        .args(["add", "--body", "orphan text", "--date", "2024-01-01"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("title cannot be blank"));
}

#[test]
fn test_invalid_date_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("journal.db");

    hippocampus_cmd(&db)
        .args(["list", "--date", "someday"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid date"));
}

#[test]
fn test_show_edit_and_remove() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("journal.db");

    hippocampus_cmd(&db)
        .args(["add", "-t", "Draft", "-b", "first", "--tag", "ideas", "-d", "2024-02-01"])
        .assert()
        .success();

    hippocampus_cmd(&db)
        .args(["edit", "1", "--body", "second", "--pin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("*Draft  #ideas"));

    hippocampus_cmd(&db)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("second"))
        .stdout(predicate::str::contains("first").not());

    hippocampus_cmd(&db).args(["rm", "1"]).assert().success();

    hippocampus_cmd(&db)
        .args(["show", "1"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("entry not found: 1"));
    hippocampus_cmd(&db).args(["rm", "1"]).assert().code(3);
    hippocampus_cmd(&db)
        .args(["edit", "1", "--title", "ghost"])
        .assert()
        .code(3);
}

#[test]
fn test_show_json_uses_iso_dates() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("journal.db");

    hippocampus_cmd(&db)
        .args(["add", "-t", "Day 1", "-d", "2024-01-01"])
        .assert()
        .success();

    let output = hippocampus_cmd(&db)
        .args(["--json", "show", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["id"], 1);
    assert_eq!(value["title"], "Day 1");
    assert_eq!(value["date_ref"], "2024-01-01");
    assert_eq!(value["pinned"], false);
}

#[test]
fn test_clear_removes_everything() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("journal.db");

    for day in ["2024-01-01", "2024-01-02"] {
        hippocampus_cmd(&db)
            .args(["add", "-t", "entry", "-d", day])
            .assert()
            .success();
    }

    hippocampus_cmd(&db)
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 2 entries"));
}

#[test]
fn test_week_shows_counts() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("journal.db");

    hippocampus_cmd(&db)
        .args(["add", "-t", "a", "-d", "2024-03-13"])
        .assert()
        .success();

    hippocampus_cmd(&db)
        .args(["week", "--date", "2024-03-13"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  Sun Mar 10 0"))
        .stdout(predicate::str::contains("> Wed Mar 13 1"))
        .stdout(predicate::str::contains("  Sat Mar 16 0"));
}

#[test]
fn test_day_metadata_roundtrip() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("journal.db");

    hippocampus_cmd(&db)
        .args(["day", "2024-01-01", "--mood", "4", "--location", "Porto"])
        .assert()
        .success();

    hippocampus_cmd(&db)
        .args(["day", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "2024-01-01 mood=4 weather=- location=Porto",
        ));
}

#[test]
fn test_day_updates_keep_other_fields() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("journal.db");

    hippocampus_cmd(&db)
        .args(["day", "2024-01-01", "--mood", "4", "--location", "Porto"])
        .assert()
        .success();
    hippocampus_cmd(&db)
        .args(["day", "2024-01-01", "--weather", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "2024-01-01 mood=4 weather=2 location=Porto",
        ));

    hippocampus_cmd(&db)
        .args(["day", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "2024-01-01 mood=4 weather=2 location=Porto",
        ));
}

#[test]
fn test_mime_types() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("journal.db");

    hippocampus_cmd(&db)
        .args(["mime", "content://hippocampus.journal/entries/3"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "vnd.android.cursor.item/hippocampus.journal/entries",
        ));

    hippocampus_cmd(&db)
        .args(["mime", "content://hippocampus.journal/moods"])
        .assert()
        .code(3);
}

#[test]
fn test_config_file_sets_authority() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("journal.db");
    let config = temp.path().join("hippocampus.toml");
    fs::write(&config, "authority = \"org.example.diary\"\n").unwrap();

    hippocampus_cmd(&db)
        .arg("--config")
        .arg(&config)
        .args(["add", "-t", "Day 1", "-d", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "content://org.example.diary/entries/1",
        ));
}

#[test]
fn test_missing_config_file_fails() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("journal.db");

    hippocampus_cmd(&db)
        .arg("--config")
        .arg(temp.path().join("absent.toml"))
        .arg("clear")
        .assert()
        .code(1);
}
