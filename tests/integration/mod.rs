//! Integration test suite for mergefield
//!
//! End-to-end tests that run the `mergefield` binary against the CRM fixtures
//! in a temporary directory.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **render**: Rendering by id and from a record file, reports, delimiters
//! - **fields**: Field planning output in text and JSON
//! - **check**: Path validation and suggestions
//! - **config**: `mergefield.toml` discovery and overrides
//! - **error_scenarios**: Exit codes and messages for fatal errors

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod check;
mod config;
mod error_scenarios;
mod fields;
mod render;
