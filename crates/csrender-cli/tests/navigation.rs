#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{csrender_cmd, fixture};
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn jump_resolves_through_markup() {
    csrender_cmd()
        .args(["jump"])
        .arg(fixture("search.json"))
        .args(["4", "37"])
        .assert()
        .success()
        .stdout("base/at_exit.cc:60:21\n");
}

#[test]
fn jump_without_markup_counts_plain_columns() {
    csrender_cmd()
        .args(["--no-markup", "jump"])
        .arg(fixture("search.json"))
        .args(["4", "37"])
        .assert()
        .success()
        .stdout("base/at_exit.cc:60:30\n");
}

#[test]
fn jump_json() {
    let output = csrender_cmd()
        .args(["jump", "--format", "json"])
        .arg(fixture("search.json"))
        .args(["9", "8"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let target: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(target["file"], "base/at_exit.h");
    assert_eq!(target["line"], 40);
    assert_eq!(target["column"], 1);
}

#[test]
fn jump_above_first_target_fails() {
    csrender_cmd()
        .args(["jump"])
        .arg(fixture("search.json"))
        .args(["1", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No jump target at 1:1"));
}

#[test]
fn file_block_navigation() {
    let search = fixture("search.json");
    let run = |command: &str, line: &str| {
        let output = csrender_cmd()
            .arg(command)
            .arg(&search)
            .arg(line)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        String::from_utf8(output).unwrap().trim().to_string()
    };

    assert_eq!(run("next-file", "4"), "8");
    assert_eq!(run("next-file", "9"), "9");
    assert_eq!(run("prev-file", "9"), "3");
    assert_eq!(run("prev-file", "4"), "1");
}

#[test]
fn signature_lookup() {
    csrender_cmd()
        .args(["signature"])
        .arg(fixture("call_graph.json"))
        .arg("4")
        .assert()
        .success()
        .stdout("cpp:Setup\n");

    csrender_cmd()
        .args(["signature"])
        .arg(fixture("search.json"))
        .arg("4")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No signature at line 4"));
}
