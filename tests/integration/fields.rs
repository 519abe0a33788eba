use crate::common::TestProject;
use predicates::prelude::*;

const TEMPLATE: &str =
    "{! LastName } {! NoSuchField } {! Account.Name } {!LastName} {! account.owner.name }";

#[test]
fn test_fields_text_output_is_sorted_and_filtered() {
    let project = TestProject::new().unwrap();
    project
        .run_mergefield(&[
            "fields",
            "--schema",
            "schema.toml",
            "--object",
            "Contact",
            "--template",
            TEMPLATE,
        ])
        .unwrap()
        .assert_success()
        .assert_stdout_eq("Account.Name\nLastName\naccount.owner.name\n");
}

#[test]
fn test_fields_json_output() {
    let project = TestProject::new().unwrap();
    let output = project
        .run_mergefield(&[
            "fields",
            "--schema",
            "schema.toml",
            "--object",
            "Contact",
            "--template",
            TEMPLATE,
            "--format",
            "json",
        ])
        .unwrap();
    output.assert_success();

    let fields: Vec<String> = serde_json::from_str(&output.stdout).unwrap();
    assert_eq!(fields, ["Account.Name", "LastName", "account.owner.name"]);
}

#[test]
fn test_fields_polymorphic_paths_are_kept() {
    let project = TestProject::new().unwrap();
    project
        .mergefield()
        .args([
            "fields",
            "--schema",
            "schema.toml",
            "--object",
            "Task",
            "-t",
            "{! Who.Anything } {! Subject.Nope }",
        ])
        .assert()
        .success()
        .stdout("Who.Anything\n");
}

#[test]
fn test_fields_unknown_object_fails() {
    let project = TestProject::new().unwrap();
    project
        .mergefield()
        .args(["fields", "--schema", "schema.toml", "--object", "Opportunity", "-t", "{! Name }"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown object type: 'Opportunity'"));
}
