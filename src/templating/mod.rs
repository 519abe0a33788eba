//! Merge-field templating.
//!
//! A template is plain text with placeholders such as `{! Account.Name }`. Each
//! placeholder names one dotted field path; there are no conditionals, loops or
//! expressions.
//!
//! # Pipeline
//!
//! 1. [`PlaceholderMatcher`] - compiles a [`DelimiterPair`] and extracts
//!    placeholders from the template
//! 2. [`collect_fields`] - keeps the placeholders whose paths are valid on the
//!    root object type, producing the [`FieldSet`] to fetch
//! 3. A [`RecordFetcher`](crate::record::RecordFetcher) loads the record
//! 4. [`substitute`] - resolves each placeholder on the record graph and
//!    replaces it with the value, or with `""` if it cannot be resolved
//!
//! [`MergeEngine`] exposes the whole pipeline and its stages.
//!
//! # Examples
//!
//! ```
//! use mergefield_cli::record::JsonRecord;
//! use mergefield_cli::templating::{DelimiterPair, PlaceholderMatcher, substitute};
//!
//! let record: JsonRecord = serde_json::from_str(
//!     r#"{"FirstName": "Jo", "Account": {"Name": "Acme"}}"#,
//! ).unwrap();
//! let matcher = PlaceholderMatcher::compile(&DelimiterPair::default()).unwrap();
//!
//! let text = substitute(&matcher, "Hello {! FirstName } of {! Account.Name }", &record);
//! assert_eq!(text, "Hello Jo of Acme");
//! ```

pub mod collector;
pub mod delimiters;
pub mod engine;
pub mod substitution;


pub use collector::{FieldSet, collect_fields};
pub use delimiters::{DelimiterPair, Placeholder, PlaceholderMatcher};
pub use engine::MergeEngine;
pub use substitution::{
    EmptyReason, Resolution, SubstitutionReport, Unresolved, resolve_path, substitute,
    substitute_with_report,
};
