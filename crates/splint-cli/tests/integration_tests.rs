//! End-to-end tests for the `splint` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `splint` running inside `dir`, isolated from the user's config.
fn splint(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("splint").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("SPLINT_PROJECT")
        .env_remove("SPLINT__DEFAULTS__FEATURES")
        .arg("--no-color");
    cmd
}

fn new_project(dir: &Path, features: &[&str]) {
    let mut cmd = splint(dir);
    cmd.args(["new", "demo"]);
    for feature in features {
        cmd.args(["-f", feature]);
    }
    cmd.assert().success();
}

#[test]
fn test_help() {
    let temp = TempDir::new().unwrap();
    splint(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Feature-driven"))
        .stdout(predicate::str::contains("enable"))
        .stdout(predicate::str::contains("disable"));
}

#[test]
fn test_version() {
    let temp = TempDir::new().unwrap();
    splint(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ── new ───────────────────────────────────────────────────────────────────────

#[test]
fn test_new_writes_project_state() {
    let temp = TempDir::new().unwrap();
    splint(temp.path())
        .args(["new", "demo", "-f", "ninja"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ninja"))
        .stdout(predicate::str::contains("created"));

    let state = std::fs::read_to_string(temp.path().join("demo/.splint.json")).unwrap();
    assert!(state.contains("ninja"));
    assert!(!state.contains("make"));
}

#[test]
fn test_new_dry_run_creates_nothing() {
    let temp = TempDir::new().unwrap();
    splint(temp.path())
        .args(["new", "demo", "-f", "gtest", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("make"))
        .stdout(predicate::str::contains("gtest"));

    assert!(!temp.path().join("demo").exists());
}

#[test]
fn test_new_twice_is_rejected() {
    let temp = TempDir::new().unwrap();
    new_project(temp.path(), &["make"]);

    splint(temp.path())
        .args(["new", "demo"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_new_uses_config_defaults() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("splint.toml");
    std::fs::write(&config, "[defaults]\nfeatures = [\"xcode\"]\n").unwrap();

    splint(temp.path())
        .args(["--config", "splint.toml", "new", "demo"])
        .assert()
        .success();

    let state = std::fs::read_to_string(temp.path().join("demo/.splint.json")).unwrap();
    assert!(state.contains("xcode"));
}

// ── enable / disable ──────────────────────────────────────────────────────────

#[test]
fn test_enable_pulls_in_dependencies() {
    let temp = TempDir::new().unwrap();
    new_project(temp.path(), &["make"]);

    splint(temp.path())
        .args(["-p", "demo", "enable", "format"])
        .assert()
        .success()
        .stdout(predicate::str::contains("file  (dependency)"))
        .stdout(predicate::str::contains("Enabled format"));
}

#[test]
fn test_enable_conflicting_member_fails() {
    let temp = TempDir::new().unwrap();
    new_project(temp.path(), &["ninja"]);

    splint(temp.path())
        .args(["-p", "demo", "enable", "xcode"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("already has 'ninja' active"));
}

#[test]
fn test_disable_takes_unneeded_dependencies_along() {
    let temp = TempDir::new().unwrap();
    new_project(temp.path(), &["gtest"]);

    splint(temp.path())
        .args(["-p", "demo", "disable", "gtest", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("make  (dependency)"))
        .stdout(predicate::str::contains("Disabled gtest, make"));

    let state = std::fs::read_to_string(temp.path().join("demo/.splint.json")).unwrap();
    assert!(!state.contains("gtest"));
}

#[test]
fn test_disable_required_dependency_fails() {
    let temp = TempDir::new().unwrap();
    new_project(temp.path(), &["gtest"]);

    splint(temp.path())
        .args(["-p", "demo", "disable", "make", "--yes"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("'gtest' depends on it"));
}

#[test]
fn test_disable_inactive_is_a_no_op() {
    let temp = TempDir::new().unwrap();
    new_project(temp.path(), &["make"]);

    splint(temp.path())
        .args(["-p", "demo", "disable", "doxygen", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to disable"));
}

// ── order / run / features ────────────────────────────────────────────────────

#[test]
fn test_order_outside_a_project() {
    let temp = TempDir::new().unwrap();
    splint(temp.path())
        .args(["order", "gtest"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?s)make.*gtest").unwrap());
}

#[test]
fn test_order_json() {
    let temp = TempDir::new().unwrap();
    let out = splint(temp.path())
        .args(["--format", "json", "order", "gtest"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["total_order"], serde_json::json!(["make", "gtest"]));
    assert_eq!(json["flatten_order"], serde_json::json!(["gtest"]));
}

#[test]
fn test_run_emits_commands() {
    let temp = TempDir::new().unwrap();
    new_project(temp.path(), &["ninja"]);

    splint(temp.path())
        .args(["-p", "demo", "run", "ninja", "configure"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cmake -S . -B _build/debug -G \"Ninja\""));
}

#[test]
fn test_run_unknown_action() {
    let temp = TempDir::new().unwrap();
    new_project(temp.path(), &["make"]);

    splint(temp.path())
        .args(["-p", "demo", "run", "make", "deploy"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("no action 'deploy'"));
}

#[test]
fn test_features_json_reflects_project() {
    let temp = TempDir::new().unwrap();
    new_project(temp.path(), &["xcode"]);

    let out = splint(temp.path())
        .args(["-p", "demo", "--format", "json", "features"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let build = &json[0];
    assert_eq!(build["name"], "build");
    assert_eq!(build["active"], true);
    let xcode = build["features"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["name"] == "xcode")
        .unwrap();
    assert_eq!(xcode["active"], true);
}

#[test]
fn test_feature_flags() {
    let temp = TempDir::new().unwrap();
    new_project(temp.path(), &["make"]);

    splint(temp.path())
        .args(["-p", "demo", "features", "--flags"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project_feature_make = true"))
        .stdout(predicate::str::contains("project_feature_ninja = false"))
        .stdout(predicate::str::contains("project_feature_category_build = true"));
}

// ── config / completions ──────────────────────────────────────────────────────

#[test]
fn test_init_local_then_get() {
    let temp = TempDir::new().unwrap();
    splint(temp.path())
        .args(["init", "--local"])
        .assert()
        .success();
    assert!(temp.path().join(".splint.toml").is_file());

    splint(temp.path())
        .args(["init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    splint(temp.path())
        .args(["config", "get", "project.state_file"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".splint.json"));
}

#[test]
fn test_completions_bash() {
    let temp = TempDir::new().unwrap();
    splint(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("splint"));
}
