#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{csrender_cmd, fixture};
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn config_file_disables_markup_and_sets_indent() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.toml");
    std::fs::write(
        &config,
        "[markup]\nenabled = false\n\n[layout]\nsnippet_indent = 2\n",
    )
    .unwrap();

    csrender_cmd()
        .arg("--config")
        .arg(&config)
        .args(["render", "-q", "RegisterTask"])
        .arg(fixture("search.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  60 void AtExitManager::RegisterTask"))
        .stdout(predicate::str::contains("^").not());
}

#[test]
fn environment_disables_markup() {
    csrender_cmd()
        .env("CSRENDER_MARKUP", "off")
        .args(["render", "-q", "RegisterTask"])
        .arg(fixture("search.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("CodeSearch results for RegisterTask\n"));
}

#[test]
fn invalid_environment_value_fails() {
    csrender_cmd()
        .env("CSRENDER_MARKUP", "sometimes")
        .arg("render")
        .arg(fixture("search.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("CSRENDER_MARKUP must be a boolean"));
}

#[test]
fn invalid_config_file_fails() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.toml");
    std::fs::write(&config, "[markup\n").unwrap();

    csrender_cmd()
        .arg("--config")
        .arg(&config)
        .arg("render")
        .arg(fixture("search.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"))
        .stderr(predicate::str::contains("Serialization error"));
}
