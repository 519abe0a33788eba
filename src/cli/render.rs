//! Merge a record into a template.
//!
//! The record is either looked up by id in a JSON data file (the full
//! pipeline: field planning, fetch, substitution) or read directly from a JSON
//! file holding one already-populated record.
//!
//! # Examples
//!
//! ```bash
//! # Fetch by id
//! mergefield render --schema schema.toml --data records.json \
//!     --id 003000000000001 --template "Hello {! FirstName }"
//!
//! # Use a record file, custom delimiters, report empty placeholders
//! mergefield render --schema schema.toml --record contact.json \
//!     --template-file letter.txt --start "[[" --end "]]" --report
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::debug;

use super::common::{DelimiterArgs, TemplateArgs, load_catalog};
use crate::config::MergeConfig;
use crate::record::JsonRecord;
use crate::store::MemoryRecordStore;
use crate::templating::{MergeEngine, SubstitutionReport};

/// Render a template against one record.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Schema file (TOML)
    #[arg(long, value_name = "FILE")]
    pub schema: PathBuf,

    /// Record data file (JSON array of records)
    #[arg(long, value_name = "FILE", requires = "id")]
    pub data: Option<PathBuf>,

    /// Id of the root record to fetch from --data
    #[arg(
        long,
        value_name = "ID",
        requires = "data",
        conflicts_with = "record",
        required_unless_present = "record"
    )]
    pub id: Option<String>,

    /// File holding one populated record (JSON object) to merge directly
    #[arg(long, value_name = "FILE")]
    pub record: Option<PathBuf>,

    #[command(flatten)]
    pub template: TemplateArgs,

    #[command(flatten)]
    pub delimiters: DelimiterArgs,

    /// List placeholders that rendered empty on stderr
    #[arg(long)]
    pub report: bool,
}

impl RenderCommand {
    /// Run the command.
    pub fn execute(self, config: &MergeConfig) -> Result<()> {
        let template = self.template.read()?;
        let delimiters = self.delimiters.resolve(config);
        let catalog = load_catalog(&self.schema)?;

        let store = match &self.data {
            Some(path) => MemoryRecordStore::load(path)?,
            None => MemoryRecordStore::new(),
        }
        .with_conventions(config.conventions.clone());

        let engine = MergeEngine::with_options(
            catalog,
            Arc::new(store),
            &delimiters,
            config.conventions.clone(),
        )?;

        let report = match (&self.id, &self.record) {
            (Some(id), _) => engine
                .substitute_by_id_with_report(None, &template, id)
                .with_context(|| format!("Failed to render template for record {id}"))?,
            (None, Some(path)) => {
                let record = read_record(path)?;
                engine.substitute_with_record_report(None, &template, &record)?
            }
            (None, None) => return Err(anyhow::anyhow!("Either --id or --record is required")),
        };

        debug!("{} placeholder(s) rendered empty", report.unresolved.len());
        if self.report {
            print_report(&report);
        }

        if report.output.ends_with('\n') {
            print!("{}", report.output);
        } else {
            println!("{}", report.output);
        }
        Ok(())
    }
}

fn read_record(path: &std::path::Path) -> Result<JsonRecord> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read record file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse record file: {}", path.display()))
}

fn print_report(report: &SubstitutionReport) {
    if report.is_complete() {
        eprintln!("{} all placeholders resolved", "✓".green());
        return;
    }
    for unresolved in &report.unresolved {
        eprintln!(
            "{} {} rendered empty: {}",
            "⚠".yellow(),
            unresolved.placeholder.bold(),
            unresolved.reason
        );
    }
}
