//! mergefield - merge-field templating engine
//!
//! Fills delimited placeholders such as `{! Account.Name }` in a text template
//! with values from a record and the records it references. Paths are checked
//! against a schema before any data is fetched, so a fetch only asks for fields
//! that can actually be reached; at substitution time anything that cannot be
//! resolved degrades to an empty string instead of failing the merge.
//!
//! # Core Modules
//!
//! - [`templating`] - Delimiter compiler, field collector, substitution and the
//!   [`MergeEngine`](templating::MergeEngine) entry points
//! - [`schema`] - Object descriptors, the memoizing
//!   [`SchemaCatalog`](schema::SchemaCatalog) and the
//!   [`PathValidator`](schema::PathValidator)
//! - [`record`] - The [`Record`](record::Record) access capability and the
//!   [`RecordFetcher`](record::RecordFetcher) collaborator
//! - [`core`] - Error types and user-facing error reporting
//!
//! ## Supporting Modules
//!
//! - [`store`] - Schema provider and record store backed by TOML/JSON files
//! - [`config`] - `mergefield.toml` loading
//! - [`cli`] - The `mergefield` command-line interface
//! - [`constants`] - Default delimiters and naming conventions
//!
//! # Template Syntax
//!
//! ```text
//! Dear {! FirstName },
//!
//! Your account manager at {! Account.Name } is {! Account.Owner.Name }.
//! Partner: {! Partner__r.Name }
//! ```
//!
//! - One dotted path per placeholder; no expressions, loops or conditionals
//! - Every segment but the last is a relationship name: `Account` is reached
//!   through the `AccountId` reference field, `Partner__r` through `Partner__c`
//! - Whitespace inside the delimiters is ignored
//! - Delimiters are configurable per call or in `mergefield.toml`
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mergefield_cli::schema::SchemaCatalog;
//! use mergefield_cli::store::{MemoryRecordStore, MemorySchemaProvider};
//! use mergefield_cli::templating::MergeEngine;
//!
//! # fn example() -> anyhow::Result<()> {
//! let schema = MemorySchemaProvider::load("schema.toml".as_ref())?;
//! let records = MemoryRecordStore::load("records.json".as_ref())?;
//! let catalog = Arc::new(SchemaCatalog::new(Arc::new(schema)));
//! let engine = MergeEngine::new(catalog, Arc::new(records))?;
//!
//! // Which fields does this template need on a Contact?
//! let fields = engine.build_field_set(None, "{! FirstName } {! Account.Name }", "Contact")?;
//! assert!(fields.contains("Account.Name"));
//!
//! // Fetch and merge in one go
//! let letter = engine.substitute_by_id(
//!     None,
//!     "Hello {! FirstName }, your account is {! Account.Name }!",
//!     "003000000000001",
//! )?;
//! println!("{letter}");
//! # Ok(())
//! # }
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! mergefield render --schema schema.toml --data records.json \
//!     --id 003000000000001 --template "Hello {! FirstName }"
//! mergefield fields --schema schema.toml --object Contact --template-file letter.txt
//! mergefield check --schema schema.toml --object Contact Account.Name Who.Name
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod record;
pub mod schema;
pub mod store;
pub mod templating;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
