//! Arguments and loaders shared by the CLI commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::MergeConfig;
use crate::schema::SchemaCatalog;
use crate::store::MemorySchemaProvider;
use crate::templating::DelimiterPair;

/// Where the template text comes from. Exactly one source is required.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct TemplateArgs {
    /// Template text given inline
    #[arg(short, long, value_name = "TEXT")]
    pub template: Option<String>,

    /// Read the template from a file
    #[arg(long, value_name = "FILE")]
    pub template_file: Option<PathBuf>,
}

impl TemplateArgs {
    /// The template text.
    pub fn read(&self) -> Result<String> {
        match (&self.template, &self.template_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read template file: {}", path.display())),
            (None, None) => {
                Err(anyhow::anyhow!("Either --template or --template-file is required"))
            }
        }
    }
}

/// Delimiter overrides for a single invocation.
#[derive(Args, Debug, Clone, Default)]
pub struct DelimiterArgs {
    /// Placeholder start delimiter (default from mergefield.toml, else `{!`)
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    pub start: Option<String>,

    /// Placeholder end delimiter (default from mergefield.toml, else `}`)
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    pub end: Option<String>,
}

impl DelimiterArgs {
    /// The configured delimiters with any command-line overrides applied.
    pub fn resolve(&self, config: &MergeConfig) -> DelimiterPair {
        DelimiterPair {
            start: self.start.clone().unwrap_or_else(|| config.delimiters.start.clone()),
            end: self.end.clone().unwrap_or_else(|| config.delimiters.end.clone()),
        }
    }
}

/// Load a schema file into a fresh catalog.
pub fn load_catalog(schema: &Path) -> Result<Arc<SchemaCatalog>> {
    let provider = MemorySchemaProvider::load(schema)?;
    Ok(Arc::new(SchemaCatalog::new(Arc::new(provider))))
}
