//! Test fixtures for schema, record and configuration files
//!
//! The CRM fixtures are the files under `tests/fixtures/`, embedded so unit
//! tests and integration tests see the same data.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Test fixture for a schema TOML file
#[derive(Clone, Debug)]
pub struct SchemaFixture {
    pub content: String,
    pub name: String,
}

impl SchemaFixture {
    /// Contact, Account, User, Lead and Task
    pub fn crm() -> Self {
        Self {
            name: "schema.toml".to_string(),
            content: include_str!("../../tests/fixtures/schema.toml").to_string(),
        }
    }

    /// Schema whose two objects claim the same key prefix
    pub fn duplicate_prefix() -> Self {
        Self {
            name: "schema.toml".to_string(),
            content: r#"
[objects.Contact]
key_prefix = "003"

[objects.Person]
key_prefix = "003"
"#
            .trim()
            .to_string(),
        }
    }

    /// Write the schema file into `dir`
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.name);
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// Test fixture for a JSON records file
#[derive(Clone, Debug)]
pub struct RecordsFixture {
    pub content: String,
    pub name: String,
}

impl RecordsFixture {
    /// Records matching [`SchemaFixture::crm`]
    pub fn crm() -> Self {
        Self {
            name: "records.json".to_string(),
            content: include_str!("../../tests/fixtures/records.json").to_string(),
        }
    }

    /// A single Contact record, usable with `render --record`
    pub fn contact() -> Self {
        Self {
            name: "contact.json".to_string(),
            content: r#"{
  "attributes": { "type": "Contact" },
  "Id": "003000000000009",
  "FirstName": "Ana",
  "LastName": "Ortiz",
  "Title": null,
  "Account": { "attributes": { "type": "Account" }, "Name": "Umbrella" }
}"#
            .to_string(),
        }
    }

    /// Write the records file into `dir`
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.name);
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// Test fixture for a `mergefield.toml`
#[derive(Clone, Debug)]
pub struct ConfigFixture {
    pub content: String,
}

impl ConfigFixture {
    /// `[[` and `]]` delimiters
    pub fn square_brackets() -> Self {
        Self {
            content: include_str!("../../tests/fixtures/mergefield.toml").to_string(),
        }
    }

    /// Write the config as `mergefield.toml` into `dir`
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(crate::constants::CONFIG_FILE_NAME);
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
