use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};

#[allow(deprecated)]
fn get_mediacenter_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("mediacenter")
}

fn mediacenter(profile: &Path) -> Command {
    let mut cmd = Command::new(get_mediacenter_bin());
    cmd.env_remove("MEDIACENTER_PROFILE_DIR")
        .arg("--profile-dir")
        .arg(profile);
    cmd
}

#[test]
fn test_launch_command_help() {
    let mut cmd = Command::new(get_mediacenter_bin());
    cmd.arg("launch").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("full-screen"))
        .stdout(predicate::str::contains("--url"))
        .stdout(predicate::str::contains("--platform"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_launch_requires_url() {
    let temp = tempfile::tempdir().unwrap();

    mediacenter(temp.path())
        .arg("launch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--url"));
}

#[test]
fn test_launch_dry_run_each_platform() {
    let temp = tempfile::tempdir().unwrap();
    let profile = temp.path().join("profile");

    for (platform, program) in [
        ("macos", "open -a 'Google Chrome' --args"),
        ("windows", "cmd /c start \"\""),
        ("linux", "|| chromium"),
    ] {
        mediacenter(&profile)
            .args(["launch", "--url", "https://hub.local", "--dry-run", "--platform", platform])
            .assert()
            .success()
            .stdout(predicate::str::contains(program))
            .stdout(predicate::str::contains("--new-window https://hub.local"))
            .stdout(predicate::str::contains("--start-fullscreen"))
            .stdout(predicate::str::contains("--user-data-dir="));
    }
}

#[test]
fn test_launch_dry_run_json_argv() {
    let temp = tempfile::tempdir().unwrap();
    let profile = temp.path().join("profile");

    let output = mediacenter(&profile)
        .args([
            "--format", "json", "launch", "--url", "hub.local", "--dry-run", "--platform", "linux",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let launch: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let argv: Vec<String> = launch["argv"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();

    assert_eq!(argv[0], "google-chrome");
    assert!(argv.contains(&format!("--user-data-dir={}", profile.display())));
    assert!(argv.contains(&"https://hub.local".to_string()));
    assert_eq!(launch["fallbacks"][0], "chromium");
}

#[test]
fn test_launch_windowed_omits_fullscreen() {
    let temp = tempfile::tempdir().unwrap();

    mediacenter(temp.path())
        .args(["launch", "--url", "https://hub.local", "--dry-run", "--windowed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--start-fullscreen").not());
}

#[test]
fn test_launch_rejects_unknown_platform() {
    let temp = tempfile::tempdir().unwrap();

    mediacenter(temp.path())
        .args(["launch", "--url", "https://hub.local", "--dry-run", "--platform", "beos"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown platform"));
}

#[test]
fn test_launch_without_profile_fails() {
    let temp = tempfile::tempdir().unwrap();

    mediacenter(&temp.path().join("missing-profile"))
        .args(["launch", "--url", "https://hub.local"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile dir not found"));
}

#[test]
fn test_launch_rejects_invalid_url() {
    let temp = tempfile::tempdir().unwrap();

    mediacenter(temp.path())
        .args(["launch", "--url", "http://", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid target URL"));
}
