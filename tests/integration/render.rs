use crate::common::TestProject;
use mergefield_cli::test_utils::RecordsFixture;
use predicates::prelude::*;

#[test]
fn test_render_by_id() {
    let project = TestProject::new().unwrap();
    project
        .render_by_id(
            "003000000000001",
            "Hello {! FirstName }, your account is {! Account.Name }!",
            &[],
        )
        .unwrap()
        .assert_success()
        .assert_stdout_eq("Hello Jo, your account is Acme!\n");
}

#[test]
fn test_render_follows_multi_hop_and_custom_relationships() {
    let project = TestProject::new().unwrap();
    project
        .render_by_id(
            "003000000000001",
            "{!Account.Owner.Name} / {! Partner__r.Name } / {! Owner.Alias }",
            &[],
        )
        .unwrap()
        .assert_success()
        .assert_stdout_eq("Dana Reyes / Globex / dreyes\n");
}

#[test]
fn test_render_null_values_and_parents_are_empty() {
    let project = TestProject::new().unwrap();
    project
        .render_by_id(
            "003000000000002",
            "[{! Account.Name }][{! Email }][{! ReportsTo.FirstName }]",
            &[],
        )
        .unwrap()
        .assert_success()
        .assert_stdout_eq("[][][Jo]\n");
}

#[test]
fn test_render_invalid_paths_are_empty() {
    let project = TestProject::new().unwrap();
    project
        .render_by_id(
            "003000000000001",
            "{! LastName }{! NoSuchField }{! Account.Nope }",
            &[],
        )
        .unwrap()
        .assert_success()
        .assert_stdout_eq("Smith\n");
}

#[test]
fn test_render_polymorphic_relationship() {
    let project = TestProject::new().unwrap();
    project
        .render_by_id(
            "00T000000000001",
            "{! Subject }: {! Who.FirstName } at {! What.Name }",
            &[],
        )
        .unwrap()
        .assert_success()
        .assert_stdout_eq("Call back: Jo at Acme\n");
}

#[test]
fn test_render_blank_template_needs_no_record() {
    let project = TestProject::new().unwrap();
    // The id is never looked up for a blank template
    project
        .render_by_id("nothing", "   ", &[])
        .unwrap()
        .assert_success()
        .assert_stdout_eq("   \n");
}

#[test]
fn test_render_with_report() {
    let project = TestProject::new().unwrap();
    project
        .render_by_id(
            "003000000000001",
            "{! FirstName } {! Title } {! ReportsTo.FirstName }",
            &["--report"],
        )
        .unwrap()
        .assert_success()
        .assert_stdout_eq("Jo  \n")
        .assert_stderr_contains("{! Title }")
        .assert_stderr_contains("rendered empty: field 'Title' is null")
        .assert_stderr_contains("{! ReportsTo.FirstName }")
        .assert_stderr_contains("rendered empty: related record 'ReportsTo' is null");

    project
        .render_by_id("003000000000001", "{! FirstName }", &["--report"])
        .unwrap()
        .assert_success()
        .assert_stderr_contains("all placeholders resolved");
}

#[test]
fn test_render_custom_delimiters() {
    let project = TestProject::new().unwrap();
    project
        .render_by_id(
            "003000000000001",
            "Dear <<LastName>>, {! FirstName }",
            &["--start", "<<", "--end", ">>"],
        )
        .unwrap()
        .assert_success()
        .assert_stdout_eq("Dear Smith, {! FirstName }\n");
}

#[test]
fn test_render_template_file() {
    let project = TestProject::new().unwrap();
    project
        .write_file("letter.txt", "Dear {! FirstName },\n\nRegards,\n{! Owner.Name }\n")
        .unwrap();

    project
        .mergefield()
        .args([
            "render",
            "--schema",
            "schema.toml",
            "--data",
            "records.json",
            "--id",
            "003000000000001",
            "--template-file",
            "letter.txt",
        ])
        .assert()
        .success()
        .stdout("Dear Jo,\n\nRegards,\nDana Reyes\n");
}

#[test]
fn test_render_record_file() {
    let project = TestProject::new().unwrap();
    RecordsFixture::contact().write_to(project.project_path()).unwrap();

    project
        .mergefield()
        .args([
            "render",
            "--schema",
            "schema.toml",
            "--record",
            "contact.json",
            "-t",
            "{! FirstName } {! LastName } ({! Account.Name }){! Title }",
        ])
        .assert()
        .success()
        .stdout(predicate::eq("Ana Ortiz (Umbrella)\n"));
}
