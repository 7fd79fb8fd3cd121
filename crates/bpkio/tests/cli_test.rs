#![allow(deprecated)] // TODO: migrate cargo_bin to cargo_bin_cmd!

use assert_cmd::Command;
use predicates::prelude::*;

const BIN: &str = "terraform-provider-bpkio";

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.env_remove("BPKIO_API_KEY")
        .env_remove("BPKIO_ENDPOINT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("schema"))
        .stdout(predicate::str::contains("resources"))
        .stdout(predicate::str::contains("version"));
}

#[test]
fn test_cli_version() {
    cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("terraform-provider-bpkio "));
}

#[test]
fn test_schema_lists_every_type() {
    let output = cmd().arg("schema").output().unwrap();
    assert!(output.status.success());

    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    for name in [
        "bpkio_source_adserver",
        "bpkio_source_slate",
        "bpkio_source_live",
        "bpkio_service_ad_insertion",
    ] {
        assert!(schema["resources"].get(name).is_some(), "missing {name}");
    }
    assert!(schema["data_sources"].get("bpkio_transcoding_profiles").is_some());
    assert_eq!(
        schema["provider"]["attributes"]["api_key"]["sensitive"],
        serde_json::json!(true)
    );
}

#[test]
fn test_schema_of_one_resource() {
    cmd()
        .args(["schema", "--name", "source_slate", "--pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"format\""))
        .stdout(predicate::str::contains("\n  "));

    cmd()
        .args(["schema", "--name", "bpkio_source_slate"])
        .assert()
        .success();
}

#[test]
fn test_schema_of_unknown_name_fails() {
    cmd()
        .args(["schema", "--name", "source_vod"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("source_vod"));
}

#[test]
fn test_resources_listing() {
    cmd()
        .arg("resources")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resources"))
        .stdout(predicate::str::contains("Data sources"))
        .stdout(predicate::str::contains("bpkio_service_ad_insertion"))
        .stdout(predicate::str::contains("bpkio_sources"));
}

#[test]
fn test_serve_answers_line_by_line() {
    let input = concat!(
        r#"{"method":"get_schema"}"#,
        "\n",
        "not json\n",
        r#"{"method":"configure_provider","params":{"config":{}}}"#,
        "\n",
    );
    let output = cmd().arg("serve").write_stdin(input).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let responses: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 3);

    assert!(responses[0]["schema"]["resources"]["bpkio_source_live"].is_object());
    assert_eq!(
        responses[1]["diagnostics"][0]["summary"],
        serde_json::json!("Invalid Request")
    );
    assert_eq!(
        responses[2]["diagnostics"][0]["summary"],
        serde_json::json!("Missing bpkio API Key")
    );
}

#[test]
fn test_serve_is_the_default_command() {
    cmd()
        .write_stdin("{\"method\":\"get_schema\"}\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("bpkio_source_adserver"));
}
