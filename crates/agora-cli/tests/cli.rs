//! End-to-end CLI tests against a temporary data directory

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn agora(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("agora").unwrap();
    cmd.arg("--no-color")
        .arg("--data-dir")
        .arg(data_dir.path());
    cmd
}

fn last_token(output: &[u8]) -> String {
    String::from_utf8_lossy(output)
        .split_whitespace()
        .last()
        .unwrap()
        .to_string()
}

#[test]
fn test_help() {
    Command::cargo_bin("agora")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("post"))
        .stdout(predicate::str::contains("vote"));
}

#[test]
fn test_init_creates_identity_and_config() {
    let dir = TempDir::new().unwrap();
    agora(&dir).arg("init").assert().success();

    assert!(dir.path().join("identity").exists());
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_post_comment_vote_flow() {
    let dir = TempDir::new().unwrap();
    agora(&dir).arg("init").assert().success();

    let output = agora(&dir)
        .args(["post", "create", "--community", "rust", "--title", "Hello"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let post_id = last_token(&output);

    agora(&dir)
        .args(["vote", "cast", "post", &post_id, "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("delta +1"));

    // Idempotent re-vote applies no delta.
    agora(&dir)
        .args(["vote", "cast", "post", &post_id, "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("delta +0"));

    agora(&dir)
        .args(["comment", "add", &post_id, "--content", "First comment"])
        .assert()
        .success();

    agora(&dir)
        .args(["post", "show", &post_id, "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello"))
        .stdout(predicate::str::contains("First comment"));
}

#[test]
fn test_invalid_vote_value_rejected() {
    let dir = TempDir::new().unwrap();
    agora(&dir).arg("init").assert().success();

    let output = agora(&dir)
        .args(["post", "create", "--community", "rust", "--title", "Target"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let post_id = last_token(&output);

    agora(&dir)
        .args(["vote", "cast", "post", &post_id, "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid vote value"));
}

#[test]
fn test_invalid_votable_kind_rejected() {
    let dir = TempDir::new().unwrap();
    agora(&dir).arg("init").assert().success();

    agora(&dir)
        .args([
            "vote",
            "cast",
            "thread",
            "00000000-0000-0000-0000-000000000000",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid votable kind"));
}
