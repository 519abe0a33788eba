use crate::common::TestProject;

#[test]
fn test_check_all_valid() {
    let project = TestProject::new().unwrap();
    project
        .run_mergefield(&[
            "check",
            "--schema",
            "schema.toml",
            "--object",
            "Contact",
            "LastName",
            "Account.Owner.Alias",
            "Partner__r.Industry",
            "Id",
        ])
        .unwrap()
        .assert_success()
        .assert_stdout_contains("✓ LastName")
        .assert_stdout_contains("✓ Account.Owner.Alias")
        .assert_stdout_contains("✓ Partner__r.Industry")
        .assert_stdout_contains("✓ Id");
}

#[test]
fn test_check_reports_invalid_paths_and_suggestions() {
    let project = TestProject::new().unwrap();
    project
        .run_mergefield(&[
            "check",
            "--schema",
            "schema.toml",
            "--object",
            "Contact",
            "LastName",
            "FirstNme",
            "Acount.Name",
        ])
        .unwrap()
        .assert_failure()
        .assert_stdout_contains("✓ LastName")
        .assert_stdout_contains("✗ FirstNme")
        .assert_stdout_contains("did you mean: FirstName")
        .assert_stdout_contains("✗ Acount.Name")
        .assert_stderr_contains("2 of 3 path(s) are not valid on Contact");
}

#[test]
fn test_check_scalar_hop_is_invalid() {
    let project = TestProject::new().unwrap();
    let output = project
        .run_mergefield(&[
            "check", "--schema", "schema.toml", "--object", "Contact", "FirstName.Name",
        ])
        .unwrap();
    output.assert_failure().assert_stdout_contains("✗ FirstName.Name");
    assert_eq!(output.code, Some(1));
}
