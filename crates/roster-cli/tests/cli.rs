//! End-to-end tests of the `roster` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `roster` command whose default config location is inside `home`.
fn roster(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("roster").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"));
    cmd
}

#[test]
fn test_help() {
    let home = TempDir::new().unwrap();
    roster(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_extract_to_csv() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let resume = dir.path().join("cv.txt");
    fs::write(&resume, "Jane Doe\njane@x.com 555-000-1111\n").unwrap();
    let out = dir.path().join("out.csv");

    roster(&home)
        .arg("extract")
        .arg(&resume)
        .args(["-f", "csv", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 1 contacts"));

    let csv = fs::read_to_string(&out).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("Name,Name_Found_On_Page,Email,Email_Found_On_Page,Phone,Phone_Found_On_Page")
    );
    assert_eq!(lines.next(), Some("Jane Doe,1,jane@x.com,1,555-000-1111,1"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_unsupported_file_is_reported() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("cv.txt");
    fs::write(&good, "Jane Doe\njane@x.com 555-000-1111\n").unwrap();
    let bad = dir.path().join("scan.png");
    fs::write(&bad, [0u8; 8]).unwrap();
    let out = dir.path().join("report.json");

    roster(&home)
        .arg("extract")
        .arg(&good)
        .arg(&bad)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed files:"))
        .stdout(predicate::str::contains("scan.png"));

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(report["roster"].as_array().map(Vec::len), Some(1));
    let statuses: Vec<&str> = report["documents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["success", "failed"]);
}

#[test]
fn test_fail_fast_stops_on_unsupported_file() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("scan.png");
    fs::write(&bad, [0u8; 8]).unwrap();

    roster(&home)
        .arg("extract")
        .arg(&bad)
        .arg("--fail-fast")
        .arg("-o")
        .arg(dir.path().join("out.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported file format"));
}

#[test]
fn test_config_init_and_get() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("roster.json");

    roster(&home)
        .arg("-c")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not created"));

    roster(&home)
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();

    roster(&home)
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "extraction.lone_fields", "keep"])
        .assert()
        .success();

    roster(&home)
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "extraction.lone_fields"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"keep\""));
}
