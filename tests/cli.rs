//! Integration tests for the gridjson command line

use serde_json::{Value, json};
use std::path::Path;
use std::process::Command;

fn run_gridjson(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .arg("run")
        .arg("-q")
        .arg("--")
        // Tests must not depend on a user's config.toml.
        .arg("--no-config")
        .args(args)
        .env_remove("GRIDJSON_LOG")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn write_file(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().to_string()
}

fn parse(stdout: &str) -> Value {
    serde_json::from_str(stdout.trim()).expect("stdout should be JSON")
}

const SALES_GRD: &str = r#"
!ref: A1:C4
!merge: A1:A2
!merge: B1:C1
B1: "sales"
B2: "q1"
C2: "q2"
A3: "north"
B3: 10
C3: 20
A4: "south"
B4: 30
C4: 40
"#;

#[test]
fn test_csv_with_column_header() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "people.csv", "name,age\nada,36\ngrace,85\n");
    let (stdout, _, code) = run_gridjson(&["-t", "col", "--compact", &file]);
    assert_eq!(code, 0);
    assert_eq!(
        parse(&stdout),
        json!([{"name": "ada", "age": 36.0}, {"name": "grace", "age": 85.0}])
    );
    assert_eq!(stdout.trim().lines().count(), 1);
}

#[test]
fn test_headerless_csv_uses_column_letters() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "plain.csv", "a,b\n");
    let (stdout, _, code) = run_gridjson(&[&file]);
    assert_eq!(code, 0);
    assert_eq!(parse(&stdout), json!([{"A": "a", "B": "b"}]));
}

#[test]
fn test_grd_merged_group_with_row_header() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "sales.grd", SALES_GRD);
    let (stdout, _, code) = run_gridjson(&["-t", "both", &file]);
    assert_eq!(code, 0);
    assert_eq!(
        parse(&stdout),
        json!({
            "north": {"sales": {"q1": 10.0, "q2": 20.0}},
            "south": {"sales": {"q1": 30.0, "q2": 40.0}},
        })
    );
}

#[test]
fn test_json_sheet_formatted_text() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(
        dir.path(),
        "rates.json",
        r#"{
            "!ref": "A1:A2",
            "A1": {"t": "s", "v": "rate"},
            "A2": {"t": "n", "v": 0.5, "w": "50%"}
        }"#,
    );
    let (stdout, _, code) = run_gridjson(&["--header-type", "col", &file]);
    assert_eq!(code, 0);
    assert_eq!(parse(&stdout), json!([{"rate": "50%"}]));
}

#[test]
fn test_header_key_expression() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "people.csv", "Name,Age\nada,36\n");
    let (stdout, _, code) = run_gridjson(&[
        "-t",
        "col",
        "--header-key-col",
        "content.to_lower()",
        &file,
    ]);
    assert_eq!(code, 0);
    assert_eq!(parse(&stdout), json!([{"name": "ada", "age": 36.0}]));
}

#[test]
fn test_supplied_headers_file() {
    let dir = tempfile::tempdir().unwrap();
    let sheet = write_file(dir.path(), "people.csv", "name,age\nada,36\n");
    let headers = write_file(
        dir.path(),
        "headers.json",
        r#"{"col": [{"name": "who", "address": "A1"}, {"name": "years", "address": "B1"}]}"#,
    );
    let (stdout, _, code) = run_gridjson(&["-t", "col", "--headers", &headers, &sheet]);
    assert_eq!(code, 0);
    assert_eq!(parse(&stdout), json!([{"who": "ada", "years": 36.0}]));
}

#[test]
fn test_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "people.csv", "name\nada\n");
    let out = dir.path().join("out.json");
    let out_str = out.to_string_lossy().to_string();
    let (stdout, stderr, code) = run_gridjson(&["-t", "col", "-o", &out_str, &file]);
    assert_eq!(code, 0);
    assert!(stdout.trim().is_empty());
    assert!(stderr.contains("Wrote 1 records"));
    let written: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written, json!([{"name": "ada"}]));
}

#[test]
fn test_malformed_range_fails() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "people.csv", "name\nada\n");
    let (_, stderr, code) = run_gridjson(&["-r", "A1-B2", &file]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_unknown_option_fails() {
    let (_, stderr, code) = run_gridjson(&["--frobnicate"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown option: --frobnicate"));
}

#[test]
fn test_missing_input_file_fails() {
    let (_, stderr, code) = run_gridjson(&["--compact"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("missing input file"));
}

#[test]
fn test_bad_header_type_fails() {
    let (_, stderr, code) = run_gridjson(&["-t", "diagonal", "x.csv"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid header type"));
}

#[test]
fn test_blank_rows_kept_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "gaps.grd", "A1: \"x\"\nA2: 1\nA4: 3\n");
    let (stdout, _, code) = run_gridjson(&["-t", "col", &file]);
    assert_eq!(code, 0);
    assert_eq!(parse(&stdout), json!([{"x": 1.0}, {"x": null}, {"x": 3.0}]));

    let (stdout, _, code) = run_gridjson(&["-t", "col", "--skip-blank-rows", &file]);
    assert_eq!(code, 0);
    assert_eq!(parse(&stdout), json!([{"x": 1.0}, {"x": 3.0}]));
}

#[test]
fn test_failing_header_key_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "people.csv", "name\nada\n");
    let (stdout, stderr, code) = run_gridjson(&[
        "-t",
        "col",
        "--header-key-col",
        "no_such_fn(content)",
        &file,
    ]);
    assert_eq!(code, 0);
    assert!(stderr.contains("Warning: header key failed"), "stderr: {stderr}");
    assert_eq!(parse(&stdout), json!([{"name": "ada"}]));
}

#[test]
fn test_recovered_error_is_a_warning() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "people.csv", "name\nada\n");
    let (stdout, stderr, code) = run_gridjson(&["--default-range", "nowhere", "-t", "col", &file]);
    assert_eq!(code, 0);
    assert_eq!(stderr.matches("Warning: Invalid default range").count(), 1);
    assert_eq!(parse(&stdout), json!([{"name": "ada"}]));
}

#[test]
fn test_multi_line_csv_field() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "notes.csv", "name,notes\nada,\"line1\nline2\"\ngrace,x\n");
    let (stdout, _, code) = run_gridjson(&["-t", "col", "--compact", &file]);
    assert_eq!(code, 0);
    assert_eq!(
        parse(&stdout),
        json!([{"name": "ada", "notes": "line1\nline2"}, {"name": "grace", "notes": "x"}])
    );
}
