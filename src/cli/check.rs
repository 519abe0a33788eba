//! Validate dotted field paths against a schema.
//!
//! Prints one verdict per path and fails if any path is invalid. For an invalid
//! single-segment path the closest field names of the object type are offered.
//!
//! ```bash
//! $ mergefield check --schema schema.toml --object Contact LastName Acount.Name FirstNme
//! ✓ LastName
//! ✗ Acount.Name
//! ✗ FirstNme
//!   did you mean: FirstName?
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use strsim::levenshtein;

use super::common::load_catalog;
use crate::config::MergeConfig;
use crate::schema::{ObjectDescriptor, PathValidator};

/// Maximum edit distance for a suggestion, as a percentage of the name length
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Check paths for an object type.
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Schema file (TOML)
    #[arg(long, value_name = "FILE")]
    pub schema: PathBuf,

    /// Object type the paths start from
    #[arg(long, value_name = "TYPE")]
    pub object: String,

    /// Dotted paths to check
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,
}

impl CheckCommand {
    /// Run the command.
    pub fn execute(self, config: &MergeConfig) -> Result<()> {
        let catalog = load_catalog(&self.schema)?;
        let descriptor = catalog.descriptors_for(&self.object)?;
        let validator = PathValidator::new(catalog, config.conventions.clone());

        let mut invalid = 0;
        for path in &self.paths {
            let path = path.trim();
            if validator.is_valid(&self.object, path) {
                println!("{} {}", "✓".green(), path);
                continue;
            }

            invalid += 1;
            println!("{} {}", "✗".red(), path);
            if !path.contains('.') {
                let suggestions = find_similar_fields(path, &descriptor);
                if !suggestions.is_empty() {
                    println!("  did you mean: {}?", suggestions.join(", ").green());
                }
            }
        }

        if invalid > 0 {
            return Err(anyhow::anyhow!(
                "{invalid} of {} path(s) are not valid on {}",
                self.paths.len(),
                descriptor.name()
            ));
        }
        Ok(())
    }
}

/// Up to three field names closest to `target`, nearest first.
fn find_similar_fields(target: &str, descriptor: &ObjectDescriptor) -> Vec<String> {
    let target_lower = target.to_lowercase();
    let mut scored: Vec<(&str, usize)> = descriptor
        .field_names()
        .map(|name| (name, levenshtein(&target_lower, &name.to_lowercase())))
        .collect();

    scored.sort_by(|(a_name, a_dist), (b_name, b_dist)| {
        a_dist.cmp(b_dist).then(a_name.cmp(b_name))
    });

    scored
        .into_iter()
        .filter(|(_, dist)| *dist <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
        .take(3)
        .map(|(name, _)| name.to_string())
        .collect()
}
