use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};

fn lob() -> Command {
    Command::cargo_bin("lob").expect("lob binary")
}

fn write(dir: &Path, name: &str, body: &str) -> String {
    let p = dir.join(name);
    std::fs::write(&p, body).unwrap();
    p.to_string_lossy().to_string()
}

fn shipped(rel: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../config")
        .join(rel)
        .to_string_lossy()
        .to_string()
}

#[test]
fn config_hash_prints_hash_and_canonical_json() {
    let dir = tempfile::tempdir().unwrap();
    let base = write(
        dir.path(),
        "base.yaml",
        "cache:\n  max_entries: 5\ncalendar:\n  end: \"2019-12-31\"\n",
    );

    lob()
        .args(["config-hash", &base])
        .assert()
        .success()
        .stdout(predicate::str::is_match("config_hash=[0-9a-f]{64}").unwrap())
        .stdout(predicate::str::contains(
            r#"{"cache":{"max_entries":5},"calendar":{"end":"2019-12-31"}}"#,
        ));
}

#[test]
fn config_check_accepts_valid_layers() {
    let dir = tempfile::tempdir().unwrap();
    let base = write(
        dir.path(),
        "base.yaml",
        "calendar:\n  start: \"2019-01-02\"\n  end: \"2019-01-31\"\n",
    );

    lob()
        .args(["config-check", &base])
        .assert()
        .success()
        .stdout(predicate::str::contains("config_ok=true"))
        .stdout(predicate::str::contains("unused_leaf_keys=0"));
}

#[test]
fn config_check_warns_then_strict_fails_on_typo() {
    let dir = tempfile::tempdir().unwrap();
    let base = write(dir.path(), "typo.yaml", "calender:\n  start: \"2019-01-02\"\n");

    lob()
        .args(["config-check", &base])
        .assert()
        .success()
        .stderr(predicate::str::contains("unused=/calender/start"))
        .stdout(predicate::str::contains("unused_leaf_keys=1"));

    lob()
        .args(["config-check", "--strict", &base])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONFIG_UNUSED_KEYS"));
}

#[test]
fn config_check_rejects_overlapping_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let base = write(
        dir.path(),
        "bad.yaml",
        "schedule:\n  afternoon_open: \"11:00\"\n",
    );

    lob()
        .args(["config-check", &base])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid schedule"));
}

#[test]
fn config_hash_requires_paths() {
    lob().arg("config-hash").assert().failure();
}

#[test]
fn shipped_base_layer_passes_strict_check() {
    lob()
        .args(["config-check", "--strict", &shipped("default.yaml")])
        .assert()
        .success()
        .stdout(predicate::str::contains("unused_leaf_keys=0"))
        .stdout(predicate::str::contains("trading_days_count=487"));
}

#[test]
fn shipped_base_layer_loads_without_warnings() {
    lob()
        .args(["--config", &shipped("default.yaml"), "time", "--step", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("accurate_time=2019-01-02 09:15"))
        .stderr(predicate::str::contains("CONFIG_UNUSED_KEYS").not());
}

#[test]
fn daemon_layer_is_not_read_by_the_cli() {
    lob()
        .args([
            "config-check",
            "--strict",
            &shipped("default.yaml"),
            &shipped("daemon.yaml"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/daemon/addr"));
}
