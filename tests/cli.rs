// CLI-level checks; anything that would spawn the framework binary lives in
// tests/staging.rs behind a fake invoker instead.

use predicates::prelude::*;

#[test]
fn dev_rejects_framework_config_without_tool_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("next.config.js"), "module.exports = {};").unwrap();

    let mut cmd = assert_cmd::Command::cargo_bin("blitz").unwrap();
    cmd.arg("dev").arg(dir.path());

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("next.config.js"))
        .stderr(predicates::str::contains("rename"));
}

#[test]
fn dev_fails_for_missing_root() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = assert_cmd::Command::cargo_bin("blitz").unwrap();
    cmd.arg("dev").arg(dir.path().join("nope"));

    cmd.assert().failure().stderr(predicates::str::contains("I/O error"));
}

#[test]
fn requires_a_subcommand() {
    let mut cmd = assert_cmd::Command::cargo_bin("blitz").unwrap();

    cmd.assert().failure().stderr(predicates::str::contains("Usage"));
}

#[test]
fn help_describes_the_staging_commands() {
    let mut cmd = assert_cmd::Command::cargo_bin("blitz").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("dev").and(predicates::str::contains("build")));
}
