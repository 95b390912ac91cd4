//! Integration tests for the ri binary
//!
//! Every test here exercises a failure path that must trigger before any
//! network call, or a pure CLI surface behavior, so no server is needed.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Unreachable but syntactically valid base URL; tests using it must fail
/// before the client would connect.
const BOGUS_URL: &str = "http://127.0.0.1:9";

fn ri(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ri").expect("binary builds");
    // Scrub every resolution source so each test controls them explicitly,
    // and run from a temp dir so no local config file is picked up.
    cmd.env_remove("RAGENGINE_URL");
    cmd.env_remove("INGRESS_IP");
    cmd.env_remove("RAGENGINE_MODEL");
    cmd.env_remove("XDG_CONFIG_HOME");
    cmd.env("HOME", workdir.path());
    cmd.current_dir(workdir.path());
    cmd
}

fn write_doc(workdir: &TempDir, content: &str) -> String {
    let path = workdir.path().join("doc.txt");
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_create_without_base_url_fails_fast() {
    let temp = TempDir::new().unwrap();
    let file = write_doc(&temp, "some paragraph of text");

    ri(&temp)
        .args(["create", "--index", "rag_index", "--file", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing base URL"));
}

#[test]
fn test_list_without_base_url_fails_fast() {
    let temp = TempDir::new().unwrap();

    ri(&temp)
        .args(["list", "--index", "rag_index"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing base URL"));
}

#[test]
fn test_chat_without_base_url_fails_fast() {
    let temp = TempDir::new().unwrap();

    ri(&temp)
        .args(["chat", "--index", "rag_index", "--question", "hello?"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing base URL"));
}

#[test]
fn test_invalid_metadata_json_reported_before_network() {
    let temp = TempDir::new().unwrap();
    let file = write_doc(&temp, "some paragraph of text");

    // Base URL is resolvable, but the metadata error must come first.
    ri(&temp)
        .args([
            "create",
            "--index",
            "rag_index",
            "--file",
            &file,
            "--base-url",
            BOGUS_URL,
            "--metadata-json",
            "{not json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid metadata JSON"));
}

#[test]
fn test_non_object_metadata_json_rejected() {
    let temp = TempDir::new().unwrap();
    let file = write_doc(&temp, "some paragraph of text");

    ri(&temp)
        .args([
            "update",
            "--index",
            "rag_index",
            "--file",
            &file,
            "--base-url",
            BOGUS_URL,
            "--metadata-json",
            "[1,2,3]",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be an object"));
}

#[test]
fn test_invalid_metadata_pair_rejected() {
    let temp = TempDir::new().unwrap();
    let file = write_doc(&temp, "some paragraph of text");

    ri(&temp)
        .args([
            "create",
            "--index",
            "rag_index",
            "--file",
            &file,
            "--base-url",
            BOGUS_URL,
            "--metadata",
            "no-separator",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected KEY=VALUE"));
}

#[test]
fn test_invalid_metadata_filter_rejected() {
    let temp = TempDir::new().unwrap();

    ri(&temp)
        .args([
            "list",
            "--index",
            "rag_index",
            "--base-url",
            BOGUS_URL,
            "--metadata-filter",
            "not json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --metadata-filter"));
}

#[test]
fn test_missing_file_rejected() {
    let temp = TempDir::new().unwrap();

    ri(&temp)
        .args([
            "create",
            "--index",
            "rag_index",
            "--file",
            "nonexistent.txt",
            "--base-url",
            BOGUS_URL,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_empty_file_has_nothing_to_ingest() {
    let temp = TempDir::new().unwrap();
    let file = write_doc(&temp, "   \n\n  \n");

    ri(&temp)
        .args(["create", "--index", "rag_index", "--file", &file, "--base-url", BOGUS_URL])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No ingestible text"));
}

#[test]
fn test_chat_requires_a_question() {
    let temp = TempDir::new().unwrap();

    ri(&temp)
        .args(["chat", "--index", "rag_index", "--base-url", BOGUS_URL])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--question"));
}

#[test]
fn test_missing_question_file_rejected() {
    let temp = TempDir::new().unwrap();

    ri(&temp)
        .args([
            "chat",
            "--index",
            "rag_index",
            "--base-url",
            BOGUS_URL,
            "--question-file",
            "nonexistent.txt",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("question-file"));
}

#[test]
fn test_help_prints_usage() {
    let temp = TempDir::new().unwrap();

    ri(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("chat"));
}
