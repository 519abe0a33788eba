//! TOML file parsing with path context.
//!
//! Both `mergefield.toml` and schema files go through [`parse_config`], so a
//! read or syntax failure always names the file that caused it:
//!
//! ```text
//! Failed to parse config file: ./mergefield.toml
//! Caused by:
//!     invalid type: integer `3`, expected a string
//! ```

use anyhow::{Context, Result};
use std::path::Path;

/// Read `path` and deserialize it as TOML into `T`.
///
/// # Examples
///
/// ```rust,no_run
/// use mergefield_cli::config::{MergeConfig, parse_config};
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let config: MergeConfig = parse_config(Path::new("mergefield.toml"))?;
/// println!("start delimiter: {}", config.delimiters.start);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - The file cannot be read (missing, a directory, no permission)
/// - The contents are not valid TOML or do not match `T`
///
/// The underlying [`std::io::Error`] or [`toml::de::Error`] is kept as the
/// source so [`user_friendly_error`](crate::core::user_friendly_error) can
/// recognize it.
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Deserialize TOML text into `T`.
///
/// # Errors
///
/// Returns the [`toml::de::Error`] if the text is invalid or does not match `T`.
pub fn parse_config_str<T>(content: &str) -> std::result::Result<T, toml::de::Error>
where
    T: serde::de::DeserializeOwned,
{
    toml::from_str(content)
}
