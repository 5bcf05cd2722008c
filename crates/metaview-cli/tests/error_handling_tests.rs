//! Tests for exit codes and error suggestions.

use assert_cmd::cargo;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn metaview(dir: &TempDir) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("metaview");
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("METAVIEW_CONFIG");
    cmd
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    let temp = TempDir::new().unwrap();
    metaview(&temp).arg("frobnicate").assert().failure().code(2);
}

#[test]
fn test_unparseable_payload_is_user_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("junk.json"), "{\"nothing\": true}").unwrap();

    metaview(&temp)
        .args(["parse", "junk.json"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn test_unclassifiable_member_is_reported() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("type.json"),
        r#"{"canonicalName": "demo.Customer", "members": [
            {"rel": "urn:org.restfulobjects:rels/self", "href": "http://x/demo.Customer/self"}
        ]}"#,
    )
    .unwrap();

    metaview(&temp)
        .args(["diagram", "--file", "type.json", "--text-only"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("tertium non datur"));
}

#[test]
fn test_missing_file_is_internal_error() {
    let temp = TempDir::new().unwrap();
    metaview(&temp)
        .args(["parse", "absent.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("absent.json"));
}

#[test]
fn test_missing_explicit_config_is_config_error() {
    let temp = TempDir::new().unwrap();
    metaview(&temp)
        .args(["-c", "absent.toml", "config", "list"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_unknown_config_key() {
    let temp = TempDir::new().unwrap();
    metaview(&temp)
        .args(["config", "get", "server.colour"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_unreachable_server_reports_failed_requests() {
    let temp = TempDir::new().unwrap();
    metaview(&temp)
        .env("METAVIEW_SERVER__BASE_URL", "http://127.0.0.1:9/restful")
        .env("METAVIEW_SERVER__TIMEOUT_SECS", "5")
        .args(["diagram", "demo.Customer", "--text-only"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("could not be loaded"))
        .stderr(predicate::str::contains("domain-types/demo.Customer"));
}
