//! Configuration for mergefield.
//!
//! All settings live in an optional `mergefield.toml`:
//!
//! ```toml
//! [delimiters]
//! start = "{!"
//! end = "}"
//!
//! [conventions]
//! custom_relationship_suffix = "__r"
//! custom_field_suffix = "__c"
//! standard_reference_suffix = "Id"
//! ```
//!
//! Every table and key is optional and defaults to the values shown.
//!
//! # Lookup order
//!
//! 1. An explicit path (the `--config` flag)
//! 2. The `MERGEFIELD_CONFIG` environment variable
//! 3. `mergefield.toml` in the current directory, if it exists
//! 4. Built-in defaults
//!
//! An explicitly named file (1 or 2) must exist; the current-directory file is
//! only used when present.

pub mod parser;

pub use parser::{parse_config, parse_config_str};

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{CONFIG_ENV_VAR, CONFIG_FILE_NAME};
use crate::schema::RelationshipConventions;
use crate::templating::DelimiterPair;

/// Settings loaded from `mergefield.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    /// Default placeholder delimiters
    pub delimiters: DelimiterPair,
    /// Relationship-to-reference-field naming rules
    pub conventions: RelationshipConventions,
}

impl MergeConfig {
    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed, or if its delimiters are
    /// blank.
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = parse_config(path)?;
        config
            .delimiters
            .validate()
            .with_context(|| format!("Invalid [delimiters] in {}", path.display()))?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration text.
    ///
    /// # Errors
    ///
    /// Fails if the text is not valid TOML for this structure or if its
    /// delimiters are blank.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = parse_config_str(content)?;
        config.delimiters.validate()?;
        Ok(config)
    }

    /// Find and load the configuration following the lookup order.
    ///
    /// # Errors
    ///
    /// Fails if an explicitly named file is missing or invalid.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let env_value = std::env::var_os(CONFIG_ENV_VAR);
        let cwd = std::env::current_dir().context("Failed to determine the current directory")?;

        match locate_config(explicit, env_value.as_deref(), &cwd) {
            Some(path) => Self::load(&path),
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Pick the configuration file to load, if any.
///
/// `env_value` is the value of `MERGEFIELD_CONFIG`; an empty value is ignored.
pub fn locate_config(
    explicit: Option<&Path>,
    env_value: Option<&OsStr>,
    cwd: &Path,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(value));
    }

    let local = cwd.join(CONFIG_FILE_NAME);
    local.is_file().then_some(local)
}
