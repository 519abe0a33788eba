use crate::common::TestProject;
use predicates::prelude::*;

#[test]
fn test_unknown_key_prefix() {
    let project = TestProject::new().unwrap();
    project
        .render_by_id("zzz000000000001", "{! Name }", &[])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("Unknown object type: 'zzz'");
}

#[test]
fn test_record_not_found() {
    let project = TestProject::new().unwrap();
    project
        .render_by_id("003000000000099", "{! FirstName }", &[])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("No Contact record found with id '003000000000099'")
        .assert_stderr_contains("suggestion");
}

#[test]
fn test_blank_command_line_delimiters() {
    let project = TestProject::new().unwrap();
    project
        .render_by_id("003000000000001", "{! FirstName }", &["--start", " "])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("Invalid delimiters");
}

#[test]
fn test_missing_schema_file() {
    let project = TestProject::new().unwrap();
    project
        .mergefield()
        .args(["check", "--schema", "absent.toml", "--object", "Contact", "Id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.toml"));
}

#[test]
fn test_malformed_records_file() {
    let project = TestProject::new().unwrap();
    project.write_file("broken.json", "[{ \"Id\": ").unwrap();

    project
        .mergefield()
        .args([
            "render",
            "--schema",
            "schema.toml",
            "--data",
            "broken.json",
            "--id",
            "003000000000001",
            "-t",
            "{! FirstName }",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.json"));
}

#[test]
fn test_missing_template_source_is_a_usage_error() {
    let project = TestProject::new().unwrap();
    project
        .mergefield()
        .args(["fields", "--schema", "schema.toml", "--object", "Contact"])
        .assert()
        .failure()
        .code(2);
}
