//! Common test utilities and fixtures for mergefield integration tests
//!
//! Every [`TestProject`] is a temporary directory seeded with the CRM schema
//! and records from `tests/fixtures/`, in which the `mergefield` binary runs.

// Not every helper is used by every test module
#![allow(dead_code)]

use anyhow::{Context, Result};
use mergefield_cli::test_utils::{ConfigFixture, RecordsFixture, SchemaFixture};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Temporary project directory with schema and data files
pub struct TestProject {
    _temp_dir: TempDir,
    project_dir: PathBuf,
    schema_path: PathBuf,
    data_path: PathBuf,
}

impl TestProject {
    /// Create a project holding the CRM `schema.toml` and `records.json`
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().to_path_buf();
        let schema_path = SchemaFixture::crm().write_to(&project_dir)?;
        let data_path = RecordsFixture::crm().write_to(&project_dir)?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
            schema_path,
            data_path,
        })
    }

    /// Get the project directory path
    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    /// Path of the schema file
    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }

    /// Path of the records file
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Write a file relative to the project directory
    pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.project_dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Write `mergefield.toml` into the project directory
    pub fn write_config(&self, fixture: &ConfigFixture) -> Result<PathBuf> {
        fixture.write_to(&self.project_dir)
    }

    /// An `assert_cmd` command for the binary, run inside the project
    pub fn mergefield(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("mergefield").unwrap();
        cmd.current_dir(&self.project_dir)
            .env_remove("MERGEFIELD_CONFIG")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    /// Run a mergefield command in the project directory
    pub fn run_mergefield(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(env!("CARGO_BIN_EXE_mergefield"))
            .args(args)
            .current_dir(&self.project_dir)
            .env_remove("MERGEFIELD_CONFIG")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .output()
            .context("Failed to run mergefield command")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }

    /// `render --schema schema.toml --data records.json --id <id> --template <template>`
    pub fn render_by_id(&self, id: &str, template: &str, extra: &[&str]) -> Result<CommandOutput> {
        let mut args = vec![
            "render",
            "--schema",
            "schema.toml",
            "--data",
            "records.json",
            "--id",
            id,
            "--template",
            template,
        ];
        args.extend_from_slice(extra);
        self.run_mergefield(&args)
    }
}

/// Command output helper
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "Command failed with code {:?}\nStderr: {}",
            self.code, self.stderr
        );
        self
    }

    /// Assert the command failed
    pub fn assert_failure(&self) -> &Self {
        assert!(
            !self.success,
            "Command unexpectedly succeeded\nStdout: {}",
            self.stdout
        );
        self
    }

    /// Assert stdout equals the given text exactly
    pub fn assert_stdout_eq(&self, expected: &str) -> &Self {
        assert_eq!(self.stdout, expected, "Stderr: {}", self.stderr);
        self
    }

    /// Assert stdout contains the given text
    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    /// Assert stderr contains the given text
    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Expected stderr to contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }
}
