//! Test utilities for mergefield
//!
//! Shared schema and record fixtures, plus helpers that wire them into a
//! ready-to-use [`MergeEngine`].
//!
//! # Fixture Data
//!
//! The fixtures model a small CRM: `Contact` (`003`), `Account` (`001`),
//! `User` (`005`), `Lead` (`00Q`) and `Task` (`00T`, with polymorphic
//! `Who`/`What` relationships). The same files back the integration tests in
//! `tests/`.
//!
//! # Example
//!
//! ```rust,no_run
//! use mergefield_cli::test_utils::fixture_engine;
//!
//! let engine = fixture_engine();
//! let output = engine
//!     .substitute_by_id(None, "Hello {! FirstName }", "003000000000001")
//!     .unwrap();
//! assert_eq!(output, "Hello Jo");
//! ```

pub mod fixtures;

pub use fixtures::{ConfigFixture, RecordsFixture, SchemaFixture};

use std::sync::{Arc, Once};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::schema::SchemaCatalog;
use crate::store::{MemoryRecordStore, MemorySchemaProvider};
use crate::templating::MergeEngine;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, else
/// `RUST_LOG`; with neither, tests run without a subscriber.
///
/// ```bash
/// RUST_LOG=mergefield_cli=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// A catalog over the fixture schema.
///
/// # Panics
///
/// Panics if the bundled schema fixture does not parse.
pub fn fixture_catalog() -> Arc<SchemaCatalog> {
    let provider = MemorySchemaProvider::from_toml_str(&SchemaFixture::crm().content)
        .expect("schema fixture should parse");
    Arc::new(SchemaCatalog::new(Arc::new(provider)))
}

/// The fixture record store, with `restricted` object types denied.
///
/// # Panics
///
/// Panics if the bundled records fixture does not parse.
pub fn fixture_store(restricted: &[&str]) -> MemoryRecordStore {
    MemoryRecordStore::from_json_str(&RecordsFixture::crm().content)
        .expect("records fixture should parse")
        .with_restricted(restricted.iter().copied())
}

/// An engine over the fixture schema and records with default delimiters.
pub fn fixture_engine() -> MergeEngine {
    fixture_engine_with_store(&[]).0
}

/// An engine over the fixture data, returning the store it fetches from.
///
/// # Panics
///
/// Panics if the fixtures do not load.
pub fn fixture_engine_with_store(restricted: &[&str]) -> (MergeEngine, Arc<MemoryRecordStore>) {
    init_test_logging(None);
    let store = Arc::new(fixture_store(restricted));
    let engine = MergeEngine::new(fixture_catalog(), store.clone())
        .expect("default delimiters should compile");
    (engine, store)
}
