use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_mediacenter_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("mediacenter")
}

#[test]
fn test_profile_command_help() {
    let mut cmd = Command::new(get_mediacenter_bin());
    cmd.arg("profile").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Inspect the kiosk Chrome profile"))
        .stdout(predicate::str::contains("path"));
}

#[test]
fn test_profile_path_from_flag() {
    let temp = tempfile::tempdir().unwrap();
    let profile = temp.path().join("kiosk-profile");

    let mut cmd = Command::new(get_mediacenter_bin());
    cmd.env_remove("MEDIACENTER_PROFILE_DIR")
        .arg("--profile-dir")
        .arg(&profile)
        .arg("profile")
        .arg("path");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(profile.display().to_string()));

    // Resolving a path never creates it
    assert!(!profile.exists());
}

#[test]
fn test_profile_path_from_environment() {
    let temp = tempfile::tempdir().unwrap();
    let profile = temp.path().join("env-profile");

    let mut cmd = Command::new(get_mediacenter_bin());
    cmd.env("MEDIACENTER_PROFILE_DIR", &profile)
        .arg("--format")
        .arg("json")
        .arg("profile")
        .arg("path");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("env-profile"))
        .stdout(predicate::str::contains("\"exists\": false"));
}

#[test]
fn test_profile_path_default_location() {
    let mut cmd = Command::new(get_mediacenter_bin());
    cmd.env_remove("MEDIACENTER_PROFILE_DIR")
        .arg("profile")
        .arg("path");

    let output = cmd.output().unwrap();
    if !output.status.success() {
        // No user data directory in this environment
        return;
    }

    let stdout = String::from_utf8(output.stdout).unwrap();
    let path = PathBuf::from(stdout.trim());
    assert!(path.is_absolute());
    assert!(path.ends_with(PathBuf::from("mediacenter").join("chrome-profile")));
}
