//! Integration tests for metaview-cli.

use assert_cmd::cargo;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const DOMAIN_TYPE: &str = r#"{
    "canonicalName": "demo.Customer",
    "members": [
        {"rel": "urn:org.restfulobjects:rels/property", "href": "http://localhost:8080/restful/domain-types/demo.Customer/properties/name"},
        {"rel": "urn:org.restfulobjects:rels/property", "href": "http://localhost:8080/restful/domain-types/demo.Customer/properties/email"},
        {"rel": "urn:org.restfulobjects:rels/action", "href": "http://localhost:8080/restful/domain-types/demo.Customer/actions/rename"}
    ]
}"#;

const LAYOUT: &str = r#"{
    "row": [
        {"cols": [
            {"col": {"span": 12, "fieldSet": [
                {"id": "details", "property": [{"id": "email"}, {"id": "name"}]}
            ]}}
        ]}
    ]
}"#;

const USER: &str = r#"{"userName": "sven", "roles": ["iniRealm:admin_role"], "links": []}"#;

/// Binary isolated from the developer's config, `.env` and environment.
fn metaview(dir: &TempDir) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("metaview");
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("METAVIEW_CONFIG")
        .env_remove("METAVIEW_PUSH__URL")
        .env_remove("METAVIEW_SERVER__BASE_URL");
    cmd
}

fn write(dir: &TempDir, name: &str, body: &str) -> String {
    fs::write(dir.path().join(name), body).unwrap();
    name.to_string()
}

#[test]
fn test_help_flag() {
    let temp = TempDir::new().unwrap();
    metaview(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("diagram"))
        .stdout(predicate::str::contains("system"));
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().unwrap();
    metaview(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_parse_detects_kind() {
    let temp = TempDir::new().unwrap();
    let file = write(&temp, "user.json", USER);
    metaview(&temp)
        .args(["parse", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsed user payload"))
        .stdout(predicate::str::contains("sven"));
}

#[test]
fn test_parse_json_output() {
    let temp = TempDir::new().unwrap();
    let file = write(&temp, "type.json", DOMAIN_TYPE);
    metaview(&temp)
        .args(["--output-format", "json", "parse", &file, "--kind", "domain-type"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"domain-type\""))
        .stdout(predicate::str::contains("demo.Customer"));
}

#[test]
fn test_parse_reads_stdin() {
    let temp = TempDir::new().unwrap();
    metaview(&temp)
        .args(["parse", "-", "--kind", "user"])
        .write_stdin(USER)
        .assert()
        .success()
        .stdout(predicate::str::contains("sven"));
}

#[test]
fn test_diagram_from_file_follows_layout() {
    let temp = TempDir::new().unwrap();
    let file = write(&temp, "type.json", DOMAIN_TYPE);
    let layout = write(&temp, "layout.json", LAYOUT);
    metaview(&temp)
        .args(["diagram", "--file", &file, "--layout", &layout, "--text-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "@startuml\npackage demo {\nclass Customer\nCustomer : email\nCustomer : name\nCustomer : rename()\n}\n@enduml",
        ));
}

#[test]
fn test_watch_without_push_url() {
    let temp = TempDir::new().unwrap();
    metaview(&temp)
        .args(["-q", "watch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Server push is not supported"));
}

#[test]
fn test_config_set_then_get() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("metaview.toml");
    fs::write(&config, "").unwrap();
    let config = config.to_str().unwrap();

    metaview(&temp)
        .args(["-c", config, "config", "set", "server.base_url", "http://demo:9090/restful"])
        .assert()
        .success();

    metaview(&temp)
        .args(["-c", config, "config", "get", "server.base_url"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://demo:9090/restful"));
}

#[test]
fn test_environment_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    metaview(&temp)
        .env("METAVIEW_RENDER__ENDPOINT", "http://render.local/")
        .args(["config", "get", "render.endpoint"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://render.local/"));
}

#[test]
fn test_server_flag_overrides_config() {
    let temp = TempDir::new().unwrap();
    metaview(&temp)
        .env("METAVIEW_SERVER__BASE_URL", "http://from-env/restful")
        .args(["config", "get", "server.base_url", "--server", "http://from-flag/restful"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://from-flag/restful"));
}

#[test]
fn test_init_local() {
    let temp = TempDir::new().unwrap();
    metaview(&temp).args(["init", "--local"]).assert().success();

    let written = fs::read_to_string(temp.path().join(".metaview.toml")).unwrap();
    assert!(written.contains("[server]"));
    assert!(written.contains("base_url"));
}

#[test]
fn test_completions() {
    let temp = TempDir::new().unwrap();
    metaview(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("metaview"));
}
