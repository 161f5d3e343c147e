#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{csrender_cmd, fixture};
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn run_json(args: &[&std::ffi::OsStr]) -> Value {
    let output = csrender_cmd()
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn callers_lists_call_sites() {
    csrender_cmd()
        .arg("callers")
        .arg(fixture("call_graph.json"))
        .assert()
        .success()
        .stdout("base/setup.cc:12:3: Setup()\n");
}

#[test]
fn expand_then_collapse() {
    let tmp = TempDir::new().unwrap();
    let graph = fixture("call_graph.json");
    let fetched = fixture("setup_callers.json");

    let expanded = run_json(&[
        "expand".as_ref(),
        graph.as_os_str(),
        "--signature".as_ref(),
        "cpp:Setup".as_ref(),
        "--with".as_ref(),
        fetched.as_os_str(),
    ]);
    let setup = &expanded["call_graph_response"][0]["node"]["children"][0];
    assert_eq!(setup["children"][0]["signature"], "cpp:main");

    let expanded_path = tmp.path().join("expanded.json");
    std::fs::write(&expanded_path, serde_json::to_string(&expanded).unwrap()).unwrap();

    csrender_cmd()
        .args(["--no-markup", "render"])
        .arg(&expanded_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("    [-] Setup base/setup.cc\n"))
        .stdout(predicate::str::contains("        [+] main app/main.cc\n"));

    let collapsed = run_json(&[
        "collapse".as_ref(),
        expanded_path.as_os_str(),
        "--signature".as_ref(),
        "cpp:RegisterTask".as_ref(),
    ]);
    let root = &collapsed["call_graph_response"][0]["node"];
    assert_eq!(root["signature"], "cpp:RegisterTask");
    assert!(root.get("children").is_none());
}

#[test]
fn expand_with_empty_answer_marks_leaf() {
    let tmp = TempDir::new().unwrap();
    let empty = tmp.path().join("empty.json");
    std::fs::write(&empty, r#"{"call_graph_response": [{}]}"#).unwrap();

    let expanded = run_json(&[
        "expand".as_ref(),
        fixture("call_graph.json").as_os_str(),
        "-s".as_ref(),
        "cpp:Setup".as_ref(),
        "--with".as_ref(),
        empty.as_os_str(),
    ]);
    let setup = &expanded["call_graph_response"][0]["node"]["children"][0];
    assert_eq!(setup["children"], serde_json::json!([]));
}

#[test]
fn expand_unknown_signature_fails() {
    csrender_cmd()
        .arg("expand")
        .arg(fixture("call_graph.json"))
        .args(["--signature", "cpp:Nope", "--with"])
        .arg(fixture("setup_callers.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No call graph node with signature: cpp:Nope",
        ));
}

#[test]
fn callers_requires_call_graph() {
    csrender_cmd()
        .arg("callers")
        .arg(fixture("search.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("holds no call graph"));
}
