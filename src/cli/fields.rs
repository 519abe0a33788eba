//! Print the fields a template needs fetched for an object type.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use super::common::{DelimiterArgs, TemplateArgs, load_catalog};
use crate::config::MergeConfig;
use crate::store::MemoryRecordStore;
use crate::templating::MergeEngine;

/// Output format for the field list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One field per line
    Text,
    /// A JSON array
    Json,
}

/// Plan the fetch for a template.
#[derive(Args, Debug)]
pub struct FieldsCommand {
    /// Schema file (TOML)
    #[arg(long, value_name = "FILE")]
    pub schema: PathBuf,

    /// Root object type of the template
    #[arg(long, value_name = "TYPE")]
    pub object: String,

    #[command(flatten)]
    pub template: TemplateArgs,

    #[command(flatten)]
    pub delimiters: DelimiterArgs,

    /// Output format: text or json
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl FieldsCommand {
    /// Run the command.
    pub fn execute(self, config: &MergeConfig) -> Result<()> {
        let template = self.template.read()?;
        let catalog = load_catalog(&self.schema)?;
        // Field planning swallows unknown object types; the CLI reports them
        catalog.descriptors_for(&self.object)?;

        let engine = MergeEngine::with_options(
            catalog,
            Arc::new(MemoryRecordStore::new()),
            &config.delimiters,
            config.conventions.clone(),
        )?;
        let delimiters = self.delimiters.resolve(config);
        let fields = engine.build_field_set(Some(&delimiters), &template, &self.object)?;

        match self.format {
            OutputFormat::Text => {
                for field in &fields {
                    println!("{field}");
                }
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&fields)?),
        }
        Ok(())
    }
}
