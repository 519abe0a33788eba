use crate::common::TestProject;
use mergefield_cli::test_utils::ConfigFixture;
use predicates::prelude::*;

const TEMPLATE: &str = "[[ FirstName ]] {! LastName }";

#[test]
fn test_config_in_working_directory() {
    let project = TestProject::new().unwrap();
    project.write_config(&ConfigFixture::square_brackets()).unwrap();

    project
        .render_by_id("003000000000001", TEMPLATE, &[])
        .unwrap()
        .assert_success()
        .assert_stdout_eq("Jo {! LastName }\n");
}

#[test]
fn test_command_line_delimiters_override_config() {
    let project = TestProject::new().unwrap();
    project.write_config(&ConfigFixture::square_brackets()).unwrap();

    project
        .render_by_id("003000000000001", TEMPLATE, &["--start", "{!", "--end", "}"])
        .unwrap()
        .assert_success()
        .assert_stdout_eq("[[ FirstName ]] Smith\n");
}

#[test]
fn test_explicit_config_flag() {
    let project = TestProject::new().unwrap();
    let path = project
        .write_file("conf/custom.toml", "[delimiters]\nstart = \"<%\"\nend = \"%>\"\n")
        .unwrap();

    project
        .mergefield()
        .arg("--config")
        .arg(&path)
        .args([
            "render",
            "--schema",
            "schema.toml",
            "--data",
            "records.json",
            "--id",
            "003000000000001",
            "-t",
            "<% FirstName %>",
        ])
        .assert()
        .success()
        .stdout("Jo\n");
}

#[test]
fn test_config_from_environment() {
    let project = TestProject::new().unwrap();
    let path = project
        .write_file("env.toml", "[delimiters]\nstart = \"((\"\nend = \"))\"\n")
        .unwrap();

    project
        .mergefield()
        .env("MERGEFIELD_CONFIG", &path)
        .args([
            "render",
            "--schema",
            "schema.toml",
            "--data",
            "records.json",
            "--id",
            "003000000000001",
            "-t",
            "((LastName))",
        ])
        .assert()
        .success()
        .stdout("Smith\n");
}

#[test]
fn test_custom_relationship_conventions() {
    let project = TestProject::new().unwrap();
    project
        .write_file(
            "mergefield.toml",
            "[conventions]\ncustom_relationship_suffix = \"__rel\"\n",
        )
        .unwrap();

    project
        .render_by_id("003000000000001", "{! Partner__rel.Name }|{! Partner__r.Name }", &[])
        .unwrap()
        .assert_success()
        .assert_stdout_eq("Globex|\n");
}

#[test]
fn test_blank_delimiters_in_config_fail() {
    let project = TestProject::new().unwrap();
    project
        .write_file("mergefield.toml", "[delimiters]\nstart = \"  \"\n")
        .unwrap();

    project
        .mergefield()
        .args(["check", "--schema", "schema.toml", "--object", "Contact", "Id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid delimiters"));
}

#[test]
fn test_unknown_config_key_fails() {
    let project = TestProject::new().unwrap();
    project.write_file("mergefield.toml", "delimiter = \"{{\"\n").unwrap();

    project
        .mergefield()
        .args(["check", "--schema", "schema.toml", "--object", "Contact", "Id"])
        .assert()
        .failure()
        .code(1);
}
