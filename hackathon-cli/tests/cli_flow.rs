use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn hackathon_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("hackathon"));
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env("NO_COLOR", "1")
        .env_remove("HACKATHON_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Runs `hackathon apply` and returns the printed application id.
fn apply(home: &Path, team: &str, lead: &str, members: &[&str]) -> String {
    let mut cmd = hackathon_cmd(home);
    cmd.args(["apply", "--team", team, "--lead-name", "Lead", "--lead-email", lead]);
    for member in members {
        cmd.args(["--member", member]);
    }
    let assert = cmd.assert().success().stdout(contains("Application ID:"));
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");
    stdout
        .lines()
        .find_map(|line| line.trim().strip_prefix("Application ID: "))
        .expect("id line")
        .trim()
        .to_string()
}

fn byte_busters(home: &Path) -> String {
    apply(home, "Byte Busters", "a@x.com", &["B:b@x.com", "C:c@x.com"])
}

fn submit(home: &Path, id: &str) -> assert_cmd::assert::Assert {
    hackathon_cmd(home)
        .args([
            "submit",
            id,
            "--name",
            "Packet Pal",
            "--theme",
            "networking",
            "--description",
            "Explains packets",
            "--tech-stack",
            "Rust",
        ])
        .assert()
}

#[test]
fn apply_submit_select_status_flow() {
    let home = TempDir::new().expect("home");
    let id = byte_busters(home.path());
    assert!(id.starts_with("APP-"), "got id: {id}");

    hackathon_cmd(home.path())
        .args(["status", "byte busters"])
        .assert()
        .success()
        .stdout(contains("under review"))
        .stdout(contains("No project submitted yet"));

    submit(home.path(), &id).success().stdout(contains("Packet Pal"));
    submit(home.path(), &id)
        .failure()
        .stderr(contains("already been submitted"));

    hackathon_cmd(home.path())
        .args(["select", &id])
        .assert()
        .success()
        .stdout(contains("Selected"));

    hackathon_cmd(home.path())
        .args(["status", &id.to_lowercase()])
        .assert()
        .success()
        .stdout(contains("SELECTED"))
        .stdout(contains("Project Name: Packet Pal"));
}

#[test]
fn duplicate_team_name_is_rejected() {
    let home = TempDir::new().expect("home");
    byte_busters(home.path());

    hackathon_cmd(home.path())
        .args([
            "apply", "--team", "BYTE BUSTERS", "--lead-name", "Z", "--lead-email", "z@x.com",
            "--member", "Y:y@x.com", "--member", "W:w@x.com",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("already exists"));
}

#[test]
fn too_few_members_is_rejected() {
    let home = TempDir::new().expect("home");
    hackathon_cmd(home.path())
        .args([
            "apply", "--team", "Solo", "--lead-name", "A", "--lead-email", "a@x.com",
            "--member", "B:b@x.com",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("at least 2 team members"));

    let snapshot = home.path().join(".hackathon").join("hackathon_applications.json");
    assert!(!snapshot.exists(), "rejected application must not be persisted");
}

#[test]
fn unknown_status_query_fails() {
    let home = TempDir::new().expect("home");
    hackathon_cmd(home.path())
        .args(["status", "nobody"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("not found"));
}

#[test]
fn broken_config_is_not_a_rejection() {
    let home = TempDir::new().expect("home");
    let dir = home.path().join(".hackathon");
    fs::create_dir_all(&dir).expect("mkdir");
    fs::write(dir.join("config.yaml"), "key_prefix: [unterminated\n").expect("config");

    hackathon_cmd(home.path())
        .args(["stats"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("failed to load hackathon config"));
}

#[test]
fn stats_json_counts() {
    let home = TempDir::new().expect("home");
    let id = byte_busters(home.path());
    apply(home.path(), "Orion", "o@x.com", &["P:p@x.com", "Q:q@x.com"]);
    submit(home.path(), &id).success();
    hackathon_cmd(home.path()).args(["select", &id]).assert().success();

    let assert = hackathon_cmd(home.path())
        .args(["stats", "--json"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");
    let stats: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(stats["totalApplications"], 2);
    assert_eq!(stats["totalProjects"], 1);
    assert_eq!(stats["totalSelected"], 1);
}

#[test]
fn list_filters_by_status() {
    let home = TempDir::new().expect("home");
    let id = byte_busters(home.path());
    apply(home.path(), "Orion", "o@x.com", &["P:p@x.com", "Q:q@x.com"]);
    hackathon_cmd(home.path()).args(["reject", &id]).assert().success();

    hackathon_cmd(home.path())
        .args(["list", "--status", "rejected"])
        .assert()
        .success()
        .stdout(contains("Byte Busters"))
        .stdout(contains("Orion").not());

    hackathon_cmd(home.path())
        .args(["list", "--status", "bogus"])
        .assert()
        .failure()
        .stderr(contains("unknown status"));
}

#[test]
fn data_dir_flag_and_config_prefix() {
    let home = TempDir::new().expect("home");
    let config_dir = home.path().join(".hackathon");
    fs::create_dir_all(&config_dir).expect("mkdir");
    fs::write(config_dir.join("config.yaml"), "key_prefix: spring\n").expect("config");

    let data = TempDir::new().expect("data");
    hackathon_cmd(home.path())
        .args([
            "--data-dir",
            data.path().to_str().expect("utf8 path"),
            "apply", "--team", "Orion", "--lead-name", "A", "--lead-email", "a@x.com",
            "--member", "B:b@x.com", "--member", "C:c@x.com",
        ])
        .assert()
        .success();

    assert!(data.path().join("spring_applications.json").exists());
    assert!(!config_dir.join("spring_applications.json").exists());
}

#[test]
fn corrupt_snapshot_is_treated_as_empty() {
    let home = TempDir::new().expect("home");
    let dir = home.path().join(".hackathon");
    fs::create_dir_all(&dir).expect("mkdir");
    fs::write(dir.join("hackathon_applications.json"), "not json at all").expect("write");

    hackathon_cmd(home.path())
        .args(["stats"])
        .assert()
        .success()
        .stdout(contains("Applications: 0"));
}
