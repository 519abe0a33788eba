//! Error handling for mergefield
//!
//! This module provides the error types and user-friendly error reporting for the
//! merge-field engine. The error system follows two principles:
//! 1. **Strongly-typed errors** for the engine's contract violations
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`MergeError`] - Enumerated failures the engine reports to its callers
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # What is (and is not) an error
//!
//! The engine distinguishes *contract* failures from *data* failures:
//!
//! - Blank delimiters, an id that maps to no known object type, and a failed
//!   record fetch are contract failures. They surface as [`MergeError`].
//! - A placeholder that cannot be resolved (missing field, null parent record,
//!   value of the wrong shape) is a data failure. It never becomes an error; the
//!   placeholder renders as the empty string and the reason is logged.
//!
//! Inside path validation, [`MergeError::UnknownObjectType`] collapses into an
//! "invalid path" verdict instead of propagating.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mergefield_cli::core::{ErrorContext, MergeError, user_friendly_error};
//!
//! let error = MergeError::UnknownObjectType {
//!     name: "Contcat".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for merge-field operations.
///
/// Every variant carries owned strings only so the error can be cloned out of
/// an [`anyhow::Error`] when building an [`ErrorContext`].
///
/// # Error Categories
///
/// ## Configuration
/// - [`InvalidDelimiters`] - A start or end delimiter is blank
/// - [`ConfigError`] - Configuration or fixture contents are malformed
///
/// ## Schema
/// - [`UnknownObjectType`] - The schema provider does not know an object type
///
/// ## Record fetch
/// - [`RecordNotFound`] - No record exists for the id
/// - [`AccessDenied`] - The caller may not read the object type
/// - [`QueryError`] - The fetch itself failed
///
/// [`InvalidDelimiters`]: MergeError::InvalidDelimiters
/// [`ConfigError`]: MergeError::ConfigError
/// [`UnknownObjectType`]: MergeError::UnknownObjectType
/// [`RecordNotFound`]: MergeError::RecordNotFound
/// [`AccessDenied`]: MergeError::AccessDenied
/// [`QueryError`]: MergeError::QueryError
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// A delimiter pair with a blank start or end pattern.
    ///
    /// Delimiters are trimmed before they are compiled into a matcher, so a
    /// delimiter made only of whitespace is as invalid as an empty one.
    #[error("Invalid delimiters: start '{start}' and end '{end}' must both be non-blank")]
    InvalidDelimiters {
        /// The start delimiter as supplied
        start: String,
        /// The end delimiter as supplied
        end: String,
    },

    /// The schema provider has no descriptor for this object type.
    #[error("Unknown object type: '{name}'")]
    UnknownObjectType {
        /// Object type name (or id key prefix) that could not be resolved
        name: String,
    },

    /// The record fetcher found no record for the id.
    #[error("No {object_type} record found with id '{id}'")]
    RecordNotFound {
        /// Object type the id was resolved to
        object_type: String,
        /// The requested record id
        id: String,
    },

    /// The record fetcher refused access to the object type.
    #[error("Access denied to {object_type}: {reason}")]
    AccessDenied {
        /// Object type that could not be read
        object_type: String,
        /// Reason reported by the fetcher
        reason: String,
    },

    /// The record fetch failed for any other reason.
    #[error("Record query failed: {reason}")]
    QueryError {
        /// Reason reported by the fetcher
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information
///
/// `ErrorContext` wraps a [`MergeError`] and adds optional suggestions and details
/// that help users understand and resolve the error. It's designed for CLI output
/// where a plain error message is not enough.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying merge error
    pub error: MergeError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`MergeError`]
    #[must_use]
    pub const fn new(error: MergeError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    ///
    /// Suggestions are displayed in green in the terminal.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    ///
    /// Details are displayed in yellow in the terminal.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Known error types get tailored suggestions:
/// - [`MergeError`] variants
/// - [`std::io::Error`] (missing files, permissions)
/// - [`toml::de::Error`] (configuration and schema files)
/// - [`serde_json::Error`] (record data files)
///
/// Anything else is reported as a [`MergeError::ConfigError`] carrying the full
/// error chain.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(merge_error) = error.downcast_ref::<MergeError>() {
        return create_error_context(merge_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(MergeError::ConfigError {
                    message: format!("{error:#}"),
                })
                .with_suggestion("Check that the file exists and the path is correct");
            }
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(MergeError::ConfigError {
                    message: format!("{error:#}"),
                })
                .with_suggestion("Check the file permissions");
            }
            _ => {}
        }
    }

    if error.downcast_ref::<toml::de::Error>().is_some() {
        return ErrorContext::new(MergeError::ConfigError {
            message: format!("{error:#}"),
        })
        .with_suggestion("Check the TOML syntax. Verify quotes, brackets, and table headers")
        .with_details("Configuration and schema files are parsed as TOML");
    }

    if error.downcast_ref::<serde_json::Error>().is_some() {
        return ErrorContext::new(MergeError::ConfigError {
            message: format!("{error:#}"),
        })
        .with_suggestion("Check the JSON syntax of the record data file")
        .with_details("Record data files must contain a JSON array of record objects");
    }

    // Walk the chain: a MergeError wrapped in .context() still deserves its suggestions
    for cause in error.chain() {
        if let Some(merge_error) = cause.downcast_ref::<MergeError>() {
            return create_error_context(merge_error.clone());
        }
    }

    ErrorContext::new(MergeError::ConfigError {
        message: format!("{error:#}"),
    })
}

fn create_error_context(error: MergeError) -> ErrorContext {
    match &error {
        MergeError::InvalidDelimiters { .. } => ErrorContext::new(error)
            .with_suggestion("Use non-blank --start/--end, or fix [delimiters] in mergefield.toml")
            .with_details("Delimiters are trimmed; whitespace-only delimiters are rejected"),
        MergeError::UnknownObjectType { name } => {
            let details = format!(
                "'{name}' is neither an object type in the schema nor the key prefix of one"
            );
            ErrorContext::new(error)
                .with_suggestion("Check the name, or add the object and its key_prefix")
                .with_details(details)
        }
        MergeError::RecordNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Verify the record id against the data file"),
        MergeError::AccessDenied { .. } => ErrorContext::new(error)
            .with_suggestion("Check that the record store can read this object type"),
        MergeError::QueryError { .. } => ErrorContext::new(error)
            .with_suggestion("Run with --verbose to see which fields were requested"),
        MergeError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Check mergefield.toml and the files passed on the command line"),
    }
}
