use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::{TempDir, tempdir};

const CONFIG: &str = "APPLICATION_ID=abc123\nCLIENT_ID=client-x\nCLIENT_SECRET=secret-9f2a\n";

fn project(config: Option<&str>) -> TempDir {
    let dir = tempdir().expect("failed to create project dir");
    fs::write(dir.path().join("app.py"), "print('hello')").unwrap();
    fs::create_dir_all(dir.path().join("node_modules/dep")).unwrap();
    fs::write(dir.path().join("node_modules/dep/index.js"), "x").unwrap();
    if let Some(config) = config {
        fs::write(dir.path().join("intrucept-config.txt"), config).unwrap();
    }
    dir
}

fn intrucept(project: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("intrucept"));
    cmd.arg("--project")
        .arg(project)
        .env_remove("INTRUCEPT_FORMAT")
        .env_remove("INTRUCEPT_API_HOST")
        .env_remove("INTRUCEPT_PROJECT")
        .env_remove("RUST_LOG");
    cmd
}

fn assert_cleaned_up(project: &Path) {
    assert!(!project.join("project.zip").exists(), "archive left behind");
    assert!(
        !project.join("temp_project_folder").exists(),
        "staging directory left behind"
    );
}

#[test]
fn version_prints_package_version() {
    Command::new(assert_cmd::cargo::cargo_bin!("intrucept"))
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn status_without_config_reports_missing_file() {
    let dir = project(None);

    intrucept(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration not found"))
        .stdout(predicate::str::contains("intrucept-config.txt"));
}

#[test]
fn status_masks_client_secret() {
    let dir = project(Some(CONFIG));

    intrucept(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("APPLICATION_ID: abc123"))
        .stdout(predicate::str::contains("CLIENT_ID: client-x"))
        .stdout(predicate::str::contains("********9f2a"))
        .stdout(predicate::str::contains("secret-9f2a").not());
}

#[test]
fn status_json_lists_missing_keys() {
    let dir = project(Some("APPLICATION_ID=abc123\n"));

    let assert = intrucept(dir.path())
        .args(["status", "--format", "json"])
        .assert()
        .success();

    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(value["configFound"], true);
    assert_eq!(value["keys"]["APPLICATION_ID"], true);
    assert_eq!(value["keys"]["CLIENT_SECRET"], false);
}

#[test]
fn scan_without_config_fails_before_upload() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", mockito::Matcher::Any)
        .expect(0)
        .create();
    let dir = project(None);

    intrucept(dir.path())
        .args(["scan", "sast"])
        .env("INTRUCEPT_API_HOST", server.url())
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Failed to read intrucept-config.txt. Please ensure it exists in the project root.",
        ));

    mock.assert();
    assert_cleaned_up(dir.path());
}

#[test]
fn scan_with_incomplete_config_names_missing_key() {
    let dir = project(Some("APPLICATION_ID=abc123\nCLIENT_ID=client-x\n"));

    intrucept(dir.path())
        .args(["scan", "sca"])
        .env("INTRUCEPT_API_HOST", "http://127.0.0.1:9")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Missing required configuration keys: CLIENT_SECRET",
        ));

    assert_cleaned_up(dir.path());
}

#[test]
fn sast_scan_prints_vulnerability_table() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/v1/integrations/performSASTScan")
        .match_header("Client-ID", "client-x")
        .match_header("Client-Secret", "secret-9f2a")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"vulnsTable":"CVE-1234 | requests | HIGH"}"#)
        .create();
    let dir = project(Some(CONFIG));

    intrucept(dir.path())
        .args(["scan", "sast"])
        .env("INTRUCEPT_API_HOST", server.url())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initiating SAST scan on"))
        .stdout(predicate::str::contains("Sending SAST scan request..."))
        .stdout(predicate::str::contains("CVE-1234 | requests | HIGH"))
        .stderr(predicate::str::contains("SAST scan completed successfully."));

    mock.assert();
    assert_cleaned_up(dir.path());
}

#[test]
fn sca_scan_with_empty_table_reports_no_vulnerabilities() {
    let mut server = mockito::Server::new();
    let sast = server
        .mock("POST", "/api/v1/integrations/performSASTScan")
        .expect(0)
        .create();
    let sca = server
        .mock("POST", "/api/v1/integrations/performSCAScan")
        .with_status(200)
        .with_body(r#"{"vulnsTable":""}"#)
        .create();
    let dir = project(Some(CONFIG));

    intrucept(dir.path())
        .args(["scan", "sca"])
        .env("INTRUCEPT_API_HOST", server.url())
        .assert()
        .success()
        .stdout(predicate::str::contains("No vulnerabilities were found."));

    sca.assert();
    sast.assert();
    assert_cleaned_up(dir.path());
}

#[test]
fn scan_without_data_reports_generic_message() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/api/v1/integrations/performSCAScan")
        .with_status(200)
        .with_body(r#"{"message":"accepted"}"#)
        .create();
    let dir = project(Some(CONFIG));

    intrucept(dir.path())
        .args(["scan", "sca"])
        .env("INTRUCEPT_API_HOST", server.url())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "SCA scan completed, but no vulnerability data was returned.",
        ));

    assert_cleaned_up(dir.path());
}

#[test]
fn server_error_fails_and_removes_archive() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/v1/integrations/performSASTScan")
        .with_status(500)
        .with_body("scanner unavailable")
        .create();
    let dir = project(Some(CONFIG));

    intrucept(dir.path())
        .args(["scan", "sast"])
        .env("INTRUCEPT_API_HOST", server.url())
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Error during SAST scan: Server error: scanner unavailable",
        ))
        .stderr(predicate::str::contains("Error:"));

    mock.assert();
    assert_cleaned_up(dir.path());
}

#[test]
fn json_format_prints_result_document() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/api/v1/integrations/performSASTScan")
        .with_status(200)
        .with_body(r#"{"vulnsTable":"CVE-1234 ..."}"#)
        .create();
    let dir = project(Some(CONFIG));

    let assert = intrucept(dir.path())
        .args(["--format", "json", "scan", "sast"])
        .env("INTRUCEPT_API_HOST", server.url())
        .assert()
        .success();

    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("stdout should be JSON only");
    assert_eq!(value["data"]["scanType"], "SAST");
    assert_eq!(value["data"]["outcome"]["kind"], "vulnerabilities");
    assert_eq!(value["data"]["message"], "CVE-1234 ...");
    assert!(value["meta"]["version"].is_string());

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("Sending SAST scan request..."));
    assert_cleaned_up(dir.path());
}

#[test]
fn missing_project_directory_fails() {
    let dir = tempdir().unwrap();

    intrucept(&dir.path().join("does-not-exist"))
        .args(["scan", "sast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
