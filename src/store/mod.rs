//! File-backed collaborators.
//!
//! The engine talks to the outside world through two traits:
//! [`SchemaProvider`](crate::schema::SchemaProvider) and
//! [`RecordFetcher`](crate::record::RecordFetcher). This module implements both
//! over data held in memory, loaded from a TOML schema file and a JSON data
//! file. The `mergefield` binary and the test suites use them.

pub mod records;
pub mod schema;

pub use records::MemoryRecordStore;
pub use schema::MemorySchemaProvider;
