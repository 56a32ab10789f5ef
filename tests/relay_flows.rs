mod common;

use common::TestEnv;
use mockito::Matcher;
use predicates::str::contains;
use serde_json::{json, Value};

#[test]
fn clean_scan_sets_response_and_instruction_outputs() {
    let mut env = TestEnv::new();
    let mock = env
        .server
        .mock("POST", "/scan")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "scan_results": {"errors": []},
            "instructions": {
                "filename": "AGENTS.md",
                "content": "# Agent rules\n\n- never call eval\n"
            }
        })))
        .with_status(200)
        .with_body(r#"{"findings_processed": 1, "suggestions": []}"#)
        .create();

    env.cmd()
        .assert()
        .success()
        .stdout(contains("Processing scan results with scanner type: semgrep"))
        .stdout(contains("API returned HTTP 200"))
        .stdout(contains("API call successful"));

    mock.assert();
    let outputs = env.outputs();
    let response: Value = serde_json::from_str(&outputs["api_response"]).expect("json output");
    assert_eq!(response["findings_processed"], 1);
    assert_eq!(
        outputs["instruction_file"],
        env.instructions.to_string_lossy()
    );
    assert!(!outputs.contains_key("updated_instructions"));
    assert_eq!(env.instructions_text(), "# Agent rules\n\n- never call eval\n");
}

#[test]
fn api_response_output_is_the_body_text() {
    let mut env = TestEnv::new();
    let body = r#"{"score": 1.0, "ratio": 2.50, "notes": []}"#;
    let _mock = env.respond(200, body);

    env.cmd().assert().success();

    assert_eq!(env.outputs()["api_response"], body);
}

#[test]
fn disabled_auto_commit_only_exposes_update() {
    let mut env = TestEnv::new();
    let _mock = env.respond(
        200,
        r#"{"updated_instructions": "X"}"#,
    );

    env.cmd()
        .env("INPUT_AUTO_COMMIT", "false")
        .assert()
        .success()
        .stdout(contains("Updated instructions received from API"));

    let outputs = env.outputs();
    assert_eq!(outputs["updated_instructions"], "X");
    assert_eq!(env.instructions_text(), "# Agent rules\n\n- never call eval\n");
}

#[test]
fn multiline_update_round_trips_through_output_file() {
    let mut env = TestEnv::new();
    let updated = "# Agent rules\n\n- never call eval\n- validate SQL inputs";
    let _mock = env.respond(200, &json!({"updated_instructions": updated}).to_string());

    env.cmd().env("INPUT_AUTO_COMMIT", "false").assert().success();

    assert_eq!(env.outputs()["updated_instructions"], updated);
}

#[test]
fn directory_input_resolves_markdown_file() {
    let mut env = TestEnv::new();
    let dir = env.instructions.parent().expect("parent").to_path_buf();
    std::fs::write(dir.join("notes.txt"), "not instructions").expect("write notes");
    let _mock = env.respond(200, "{}");

    env.cmd()
        .env("INPUT_INSTRUCTION_FILE_PATH", &dir)
        .assert()
        .success()
        .stdout(contains("Searching for instruction file in directory"));

    assert_eq!(
        env.outputs()["instruction_file"],
        dir.join("AGENTS.md").to_string_lossy()
    );
}

#[test]
fn http_failure_reports_status_and_body() {
    let mut env = TestEnv::new();
    let _mock = env.respond(500, "internal error");

    env.cmd()
        .assert()
        .failure()
        .code(1)
        .stdout(contains("::error::API call failed with HTTP 500: internal error"));

    assert!(env.outputs().is_empty());
}

#[test]
fn api_error_field_fails_run() {
    let mut env = TestEnv::new();
    let _mock = env.respond(200, r#"{"error": "invalid scan format"}"#);

    env.cmd()
        .assert()
        .failure()
        .stdout(contains("::error::API returned error: invalid scan format"));

    assert!(env.outputs().is_empty());
}

#[test]
fn non_json_response_fails_run() {
    let mut env = TestEnv::new();
    let _mock = env.respond(200, "<html>ok</html>");

    env.cmd()
        .assert()
        .failure()
        .stdout(contains("::error::Invalid JSON response from API"));
}

#[test]
fn directory_without_markdown_skips_api() {
    let mut env = TestEnv::new();
    let mock = env.server.mock("POST", "/scan").expect(0).create();
    let empty = env.workspace.join("empty");
    std::fs::create_dir_all(&empty).expect("create dir");
    std::fs::write(empty.join("README.txt"), "plain").expect("write file");

    env.cmd()
        .env("INPUT_INSTRUCTION_FILE_PATH", &empty)
        .assert()
        .failure()
        .stdout(contains("::error::No markdown file found in directory"));

    mock.assert();
}

#[test]
fn missing_input_is_reported() {
    let env = TestEnv::new();

    env.cmd()
        .env_remove("INPUT_SCANNER_TYPE")
        .assert()
        .failure()
        .stdout(contains(
            "::error::Input required and not supplied: scanner_type",
        ));
}

#[test]
fn api_key_is_masked_in_logs() {
    let mut env = TestEnv::new();
    let _mock = env.respond(200, "{}");

    env.cmd()
        .assert()
        .success()
        .stdout(contains("::add-mask::secret-key"));
}

#[test]
fn flags_work_without_output_file() {
    let mut env = TestEnv::new();
    let _mock = env.respond(200, r#"{"ok": true}"#);
    let scan = env.scan_results.to_string_lossy().to_string();

    env.cmd()
        .env_remove("GITHUB_OUTPUT")
        .env_remove("INPUT_SCAN_RESULTS_PATH")
        .args(["--scan-results-path", scan.as_str()])
        .assert()
        .success()
        .stdout(contains("::set-output name=api_response::{\"ok\": true}"));

    assert!(env.outputs().is_empty());
}
