//
//  marketplace-sdk
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Tests of the `mkp` binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn mkp() -> Command {
    let mut cmd = Command::cargo_bin("mkp").unwrap();
    cmd.env_remove("MKP_API_KEY")
        .env_remove("MKP_BASE_URL")
        .env_remove("MKP_DEBUG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    mkp()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("api"))
        .stdout(predicate::str::contains("divisions"))
        .stdout(predicate::str::contains("menus"));
}

#[test]
fn test_version_reports_user_agent() {
    mkp()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("marketplace-sdk-rust/"));
}

#[test]
fn test_unknown_method_is_rejected() {
    mkp()
        .args(["api", "FETCH", "divisions/FR"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid HTTP method"));
}

#[test]
fn test_absolute_url_is_a_usage_error() {
    mkp()
        .args(["api", "GET", "https://elsewhere.test/x"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("relative to the base URL"));
}

#[test]
fn test_api_call_against_mock_server() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/v1/divisions/FR")
        .match_header("authorization", "token abc")
        .with_status(200)
        .with_body(r#"[{"code":"FR"}]"#)
        .create();

    mkp()
        .env("MKP_BASE_URL", format!("{}/api/v1", server.url()))
        .env("MKP_API_KEY", "abc")
        .args(["api", "get", "divisions/FR"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""code": "FR""#));

    mock.assert();
}

#[test]
fn test_divisions_tree_output() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/v1/divisions/FR")
        .with_status(200)
        .with_body(
            r#"[{"code":"FR"},{"code":"FR-69","parentCode":"FR"},{"code":"FR-01","parentCode":"FR"}]"#,
        )
        .create();

    mkp()
        .env("MKP_BASE_URL", format!("{}/api/v1", server.url()))
        .args(["divisions", "FR"])
        .assert()
        .success()
        .stdout(predicate::str::contains("├── FR-69"))
        .stdout(predicate::str::contains("└── FR-01"));
}

#[test]
fn test_company_divisions_without_key_exit_code() {
    mkp()
        .args(["divisions", "--company", "3"])
        .assert()
        .failure()
        .code(4);
}
