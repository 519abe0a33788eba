//! Placeholder substitution over a live record graph.
//!
//! Each placeholder resolves to a [`Resolution`]. Anything other than
//! [`Resolution::Resolved`] renders as the empty string: a missing field, a
//! null parent record or a value of the wrong shape never aborts the merge.

use thiserror::Error;
use tracing::debug;

use super::PlaceholderMatcher;
use crate::record::{FieldAccessError, Record};

/// Why a placeholder rendered as the empty string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    /// A relationship along the path has no related record.
    #[error("related record '{relationship}' is null")]
    NullParent {
        /// The relationship hop that was null
        relationship: String,
    },

    /// The terminal field is null.
    #[error("field '{field}' is null")]
    NullValue {
        /// The terminal field
        field: String,
    },

    /// The record could not be read as the path requires.
    #[error(transparent)]
    FieldAccess(#[from] FieldAccessError),
}

/// Outcome of resolving one placeholder path against a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The path produced a value.
    Resolved(String),
    /// The path produced nothing; renders as `""`.
    Empty(EmptyReason),
}

impl Resolution {
    /// Whether a value was produced.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// The rendered text: the value, or `""`.
    pub fn into_value(self) -> String {
        match self {
            Self::Resolved(value) => value,
            Self::Empty(_) => String::new(),
        }
    }
}

/// Resolve a dotted path by walking `record` through every hop but the last.
///
/// ```
/// use mergefield_cli::record::JsonRecord;
/// use mergefield_cli::templating::{Resolution, resolve_path};
///
/// let record: JsonRecord = serde_json::from_str(
///     r#"{"LastName": "Smith", "Account": {"Name": "Acme"}}"#,
/// ).unwrap();
///
/// assert_eq!(resolve_path(&record, "Account.Name"), Resolution::Resolved("Acme".into()));
/// assert!(!resolve_path(&record, "Owner.Name").is_resolved());
/// ```
pub fn resolve_path(record: &dyn Record, path: &str) -> Resolution {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((terminal, hops)) = segments.split_last() else {
        return Resolution::Empty(EmptyReason::NullValue {
            field: path.to_string(),
        });
    };

    let mut current = record;
    for hop in hops {
        match current.get_child(hop) {
            Ok(Some(child)) => current = child,
            Ok(None) => {
                return Resolution::Empty(EmptyReason::NullParent {
                    relationship: (*hop).to_string(),
                });
            }
            Err(e) => return Resolution::Empty(e.into()),
        }
    }

    match current.get_scalar(terminal) {
        Ok(Some(value)) => Resolution::Resolved(value),
        Ok(None) => Resolution::Empty(EmptyReason::NullValue {
            field: (*terminal).to_string(),
        }),
        Err(e) => Resolution::Empty(e.into()),
    }
}

/// A placeholder that rendered as the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    /// The full placeholder text, delimiters included
    pub placeholder: String,
    /// The trimmed dotted path
    pub path: String,
    /// Why it was empty
    pub reason: EmptyReason,
}

/// Output of [`substitute_with_report`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubstitutionReport {
    /// The merged text
    pub output: String,
    /// Distinct placeholders that rendered empty, in template order
    pub unresolved: Vec<Unresolved>,
}

impl SubstitutionReport {
    /// Whether every placeholder produced a value.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Merge `record` into `template`.
///
/// Shorthand for [`substitute_with_report`] that drops the diagnostics.
pub fn substitute(matcher: &PlaceholderMatcher, template: &str, record: &dyn Record) -> String {
    substitute_with_report(matcher, template, record).output
}

/// Merge `record` into `template` and report which placeholders came out empty.
///
/// - A blank template is returned unchanged without scanning it.
/// - Placeholders are resolved in the order they first appear.
/// - Every occurrence of a placeholder's exact text is replaced with its
///   value, so `{! LastName } {! LastName }` resolves `LastName` once.
///
/// Replacement happens on the working string. A value that itself contains
/// text equal to a later placeholder is replaced again when that placeholder's
/// turn comes.
pub fn substitute_with_report(
    matcher: &PlaceholderMatcher,
    template: &str,
    record: &dyn Record,
) -> SubstitutionReport {
    if template.trim().is_empty() {
        return SubstitutionReport {
            output: template.to_string(),
            unresolved: Vec::new(),
        };
    }

    let mut output = template.to_string();
    let mut unresolved = Vec::new();

    for placeholder in matcher.distinct_placeholders(template) {
        let value = match resolve_path(record, placeholder.path()) {
            Resolution::Resolved(value) => value,
            Resolution::Empty(reason) => {
                debug!("Placeholder '{}' resolved empty: {}", placeholder.text(), reason);
                unresolved.push(Unresolved {
                    placeholder: placeholder.text().to_string(),
                    path: placeholder.path().to_string(),
                    reason,
                });
                String::new()
            }
        };
        output = output.replace(placeholder.text(), &value);
    }

    SubstitutionReport {
        output,
        unresolved,
    }
}
