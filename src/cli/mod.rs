//! Command-line interface for mergefield.
//!
//! # Available Commands
//!
//! - `render` - Merge a record (by id, or from a record file) into a template
//! - `fields` - Print the fields a template needs fetched for an object type
//! - `check` - Validate dotted field paths against the schema
//!
//! # Global Options
//!
//! All commands support these global options:
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Only log errors
//! - `--config` - Path to a `mergefield.toml` (otherwise `MERGEFIELD_CONFIG`,
//!   then `./mergefield.toml`)
//!
//! # Example
//!
//! ```bash
//! mergefield fields --schema schema.toml --object Contact \
//!     --template "Hello {! FirstName } of {! Account.Name }"
//!
//! mergefield --verbose render --schema schema.toml --data records.json \
//!     --id 003000000000001 --template-file letter.txt
//! ```

mod check;
pub mod common;
mod fields;
mod render;


use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::MergeConfig;

/// Runtime configuration for CLI execution.
///
/// Built from the global flags so tests can inspect the effect of a command
/// line without touching process-wide state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter directive. `None` means `RUST_LOG`, else `warn`.
    pub log_level: Option<String>,

    /// Explicit configuration file.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create a new CLI configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init_logging(&self) {
        let filter = match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Main CLI structure for mergefield.
#[derive(Parser, Debug)]
#[command(
    name = "mergefield",
    about = "Merge-field templating: fill {! Field.Path } placeholders from records",
    version,
    long_about = "Resolves delimited placeholders such as {! Account.Name } against a record \
                  and its related records, using a schema to decide which paths are valid."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a mergefield.toml configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge a record into a template.
    ///
    /// See [`render::RenderCommand`] for options.
    Render(render::RenderCommand),

    /// Print the fields a template needs fetched.
    ///
    /// See [`fields::FieldsCommand`] for options.
    Fields(fields::FieldsCommand),

    /// Check dotted field paths against the schema.
    ///
    /// See [`check::CheckCommand`] for options.
    Check(check::CheckCommand),
}

impl Cli {
    /// Execute the CLI with configuration built from its own flags.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config)
    }

    /// Translate the global flags into a [`CliConfig`].
    ///
    /// - `--verbose` logs at `debug`
    /// - `--quiet` logs at `error`
    /// - otherwise `RUST_LOG` applies, defaulting to `warn`
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute the CLI with an explicit configuration.
    pub fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let merge_config = MergeConfig::resolve(config.config_path.as_deref())?;

        match self.command {
            Commands::Render(cmd) => cmd.execute(&merge_config),
            Commands::Fields(cmd) => cmd.execute(&merge_config),
            Commands::Check(cmd) => cmd.execute(&merge_config),
        }
    }
}
