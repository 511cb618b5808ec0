//! End-to-end tests of the `vcsview` binary

mod common;

use assert_cmd::Command;
use common::GitFixture;
use predicates::prelude::*;
use tempfile::TempDir;

fn vcsview() -> Command {
    let mut cmd = Command::cargo_bin("vcsview").unwrap();
    cmd.arg("--no-color");
    cmd
}

#[test]
fn test_help() {
    vcsview()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("branches"))
        .stdout(predicate::str::contains("log"));
}

#[test]
fn test_branches() {
    let fixture = GitFixture::new();
    vcsview()
        .arg("-C")
        .arg(fixture.path())
        .arg("branches")
        .assert()
        .success()
        .stdout(predicate::str::contains("* master"))
        .stdout(predicate::str::contains("remotes/origin/feature"));
}

#[test]
fn test_log_text() {
    let fixture = GitFixture::new();
    vcsview()
        .arg("-C")
        .arg(fixture.path())
        .args(["log", "-n", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Update readme"))
        .stdout(predicate::str::contains("Add library"))
        .stdout(predicate::str::contains("Initial commit").not());
}

#[test]
fn test_log_json() {
    let fixture = GitFixture::new();
    let output = vcsview()
        .arg("-C")
        .arg(fixture.path())
        .args(["--format", "json", "log", "--path", "src/lib.rs"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let commits: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let commits = commits.as_array().unwrap();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0]["id"], fixture.commits[1].as_str());
    assert_eq!(commits[0]["message"], "Add library");
}

#[test]
fn test_show() {
    let fixture = GitFixture::new();
    vcsview()
        .arg("-C")
        .arg(fixture.path())
        .args(["show", &fixture.commits[0]])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parents: (root)"))
        .stdout(predicate::str::contains("Initial commit"));
}

#[test]
fn test_show_unknown_commit_fails() {
    let fixture = GitFixture::new();
    vcsview()
        .arg("-C")
        .arg(fixture.path())
        .args(["show", "deadbeefdeadbeef"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_status_clean() {
    let fixture = GitFixture::new();
    vcsview()
        .arg("-C")
        .arg(fixture.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Working tree clean"));
}

#[test]
fn test_not_a_repository() {
    let temp_dir = TempDir::new().unwrap();
    vcsview()
        .arg("-C")
        .arg(temp_dir.path())
        .arg("branches")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no .git or .hg directory found"));
}

#[test]
fn test_verbose_prints_commands() {
    let fixture = GitFixture::new();
    vcsview()
        .arg("-v")
        .arg("-C")
        .arg(fixture.path())
        .arg("branches")
        .assert()
        .success()
        .stderr(predicate::str::contains("execute command: git --no-pager branch -a -v --no-color"));
}

#[test]
fn test_version_lists_tools() {
    vcsview()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vcsview"))
        .stdout(predicate::str::contains("Git"));
}
