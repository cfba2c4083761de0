//! Tests for error messages, suggestions, and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn splint(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("splint").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env_remove("SPLINT_PROJECT")
        .arg("--no-color");
    cmd
}

#[test]
fn test_unknown_feature_is_not_found() {
    let temp = TempDir::new().unwrap();
    splint(&temp)
        .args(["new", "demo", "-f", "cargo"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Unknown feature or category: cargo"))
        .stderr(predicate::str::contains("splint features"));
}

#[test]
fn test_two_members_of_one_category() {
    let temp = TempDir::new().unwrap();
    splint(&temp)
        .args(["new", "demo", "-f", "make", "-f", "ninja"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Only one of"));

    assert!(!temp.path().join("demo").exists());
}

#[test]
fn test_sentinel_mixed_with_names() {
    let temp = TempDir::new().unwrap();
    splint(&temp)
        .args(["order", "make", "all"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_invalid_project_name() {
    let temp = TempDir::new().unwrap();
    splint(&temp)
        .args(["new", ".hidden"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name"));
}

#[test]
fn test_enable_outside_a_project() {
    let temp = TempDir::new().unwrap();
    splint(&temp)
        .args(["enable", "doc"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("No project found"));
}

#[test]
fn test_missing_config_file() {
    let temp = TempDir::new().unwrap();
    splint(&temp)
        .args(["--config", "absent.toml", "features"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_verbose_hint() {
    let temp = TempDir::new().unwrap();
    splint(&temp)
        .args(["run", "make"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--verbose"));
}

#[test]
fn test_bad_arguments_exit_two() {
    let temp = TempDir::new().unwrap();
    splint(&temp)
        .args(["new"])
        .assert()
        .failure()
        .code(2);
}
