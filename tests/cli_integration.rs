//! End-to-end CLI runs against a mocked GraphQL endpoint.

use assert_cmd::Command;
use httpmock::{Method::POST, MockServer};
use predicates::prelude::*;
use serde_json::json;

fn cmd_with_server(server: &MockServer) -> Command {
    let mut cmd = Command::cargo_bin("gh-timeline").unwrap();
    cmd.env("GITHUB_TOKEN", "t")
        .env("GITHUB_GRAPHQL_URL", format!("{}/graphql", server.base_url()))
        .env_remove("RUST_LOG")
        .arg("--log-level")
        .arg("warn");
    cmd
}

#[test]
fn prints_normalized_issue_timeline() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(POST).path("/graphql").body_contains("IssueTimeline");
        then.status(200).json_body(json!({
            "data": {"repository": {"issue": {"timelineItems": {"edges": [
                {"node": {"__typename": "IssueComment", "id": "IC_1",
                          "createdAt": "2025-02-01T10:00:00Z",
                          "author": {"__typename": "User", "login": "alice"},
                          "body": "hello"}},
                {"node": {"__typename": "FutureEventType"}}
            ]}}}}
        }));
    });

    cmd_with_server(&server)
        .args(["o/r", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"commented\""))
        .stdout(predicate::str::contains("\"kind\": \"unknown\""))
        .stdout(predicate::str::contains("\"unknown_variants\": 1"))
        .stdout(predicate::str::contains("\"truncated\": false"));
}

#[test]
fn pull_request_flag_selects_the_pr_document() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(POST)
            .path("/graphql")
            .body_contains("PullRequestTimeline");
        then.status(200).json_body(json!({
            "data": {"repository": {"pullRequest": {"timelineItems": {"edges": [
                {"node": {"__typename": "MergedEvent", "id": "M_1",
                          "createdAt": "2025-02-03T10:00:00Z",
                          "actor": {"__typename": "User", "login": "maintainer"},
                          "mergeRefName": "main"}}
            ]}}}}
        }));
    });

    cmd_with_server(&server)
        .args(["o/r", "2", "--pull-request"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"subject\": \"pull_request\""))
        .stdout(predicate::str::contains("\"kind\": \"merged\""));
    m.assert();
}

#[test]
fn linkage_flag_prints_subject_fields() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(POST).path("/graphql").body_contains("IssueLinkage");
        then.status(200).json_body(json!({
            "data": {"repository": {"issue": {
                "closed": true,
                "state": "CLOSED",
                "stateReason": "COMPLETED",
                "title": "Flaky test",
                "body": null,
                "timelineItems": {"edges": [
                    {"node": {"__typename": "ConnectedEvent"}}
                ]}
            }}}
        }));
    });

    cmd_with_server(&server)
        .args(["o/r", "3", "--linkage"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Flaky test\""))
        .stdout(predicate::str::contains("\"state_reason\": \"COMPLETED\""))
        .stdout(predicate::str::contains("\"kind\": \"connected\""));
}

#[test]
fn missing_token_is_a_configuration_error() {
    let mut cmd = Command::cargo_bin("gh-timeline").unwrap();
    cmd.env_remove("GITHUB_TOKEN")
        .env_remove("GH_TOKEN")
        .args(["o/r", "1", "--log-level", "warn"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GITHUB_TOKEN"));
}

#[test]
fn not_found_subject_fails_with_context() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(POST).path("/graphql");
        then.status(200)
            .json_body(json!({"data": {"repository": null}}));
    });

    cmd_with_server(&server)
        .args(["o/r", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn version_flag_short_circuits() {
    Command::cargo_bin("gh-timeline")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("gh-timeline "));
}
