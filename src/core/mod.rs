//! Core types and error handling for mergefield
//!
//! # Modules
//!
//! ## `error` - Error Handling System
//!
//! - [`MergeError`] - Enumerated error types covering the engine's contract failures
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! # Design Principles
//!
//! Contract violations (bad delimiters, unknown object types, failed fetches)
//! are returned as [`MergeError`]. Data problems inside a template never are:
//! they degrade to empty placeholder values.

pub mod error;

pub use error::{ErrorContext, MergeError, user_friendly_error};
