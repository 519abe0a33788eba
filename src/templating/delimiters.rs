//! Delimiter compilation and placeholder extraction.
//!
//! A [`DelimiterPair`] is compiled into a [`PlaceholderMatcher`], a regular
//! expression that finds `<start> path <end>` spans in a template.
//!
//! # Matching rules
//!
//! - Both delimiters are trimmed before compilation
//! - Each space in a delimiter matches one or more whitespace characters, so
//!   `{ !` also matches `{    !` and `{  !` needs at least two
//! - Every other character, tabs included, is matched literally
//! - The captured text is any run of characters other than the first character
//!   of the end delimiter
//!
//! The capture boundary is a heuristic, not a nested-delimiter parser. With the
//! delimiters `{!` and `}`, the text `{! a}b }` captures ` a` and leaves `b }`
//! alone. Existing templates depend on this behavior.

use std::ops::Range;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_END_DELIMITER, DEFAULT_START_DELIMITER};
use crate::core::MergeError;

/// Start and end markers of a placeholder.
///
/// Deserializes from the `[delimiters]` table of `mergefield.toml`; a missing
/// key falls back to the default (`{!` and `}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelimiterPair {
    /// Start marker
    pub start: String,
    /// End marker
    pub end: String,
}

impl Default for DelimiterPair {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_DELIMITER.to_string(),
            end: DEFAULT_END_DELIMITER.to_string(),
        }
    }
}

impl DelimiterPair {
    /// Create a pair. Validation happens in [`DelimiterPair::validate`] and
    /// when compiling.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Check that neither delimiter is blank.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::InvalidDelimiters`] if either delimiter is empty
    /// after trimming.
    pub fn validate(&self) -> Result<(), MergeError> {
        if self.start.trim().is_empty() || self.end.trim().is_empty() {
            return Err(MergeError::InvalidDelimiters {
                start: self.start.clone(),
                end: self.end.clone(),
            });
        }
        Ok(())
    }
}

/// One placeholder occurrence in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'t> {
    text: &'t str,
    raw: &'t str,
    start: usize,
}

impl<'t> Placeholder<'t> {
    /// The full matched text, delimiters included (`{! Account.Name }`).
    pub fn text(&self) -> &'t str {
        self.text
    }

    /// The captured text between the delimiters, untrimmed (` Account.Name `).
    pub fn raw(&self) -> &'t str {
        self.raw
    }

    /// The dotted path, trimmed (`Account.Name`).
    pub fn path(&self) -> &'t str {
        self.raw.trim()
    }

    /// Byte range of the placeholder in the template.
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.text.len()
    }
}

/// A compiled delimiter pair.
///
/// Compiling is cheap; callers with per-call delimiters may compile on every
/// call.
///
/// # Examples
///
/// ```
/// use mergefield_cli::templating::{DelimiterPair, PlaceholderMatcher};
///
/// let matcher = PlaceholderMatcher::compile(&DelimiterPair::default()).unwrap();
/// let paths: Vec<_> = matcher
///     .placeholders("Dear {! FirstName }, re: {!Account.Name}")
///     .map(|p| p.path())
///     .collect();
/// assert_eq!(paths, ["FirstName", "Account.Name"]);
/// ```
#[derive(Debug, Clone)]
pub struct PlaceholderMatcher {
    delimiters: DelimiterPair,
    regex: Regex,
}

impl PlaceholderMatcher {
    /// Compile a delimiter pair into a matcher.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::InvalidDelimiters`] if either delimiter is blank.
    pub fn compile(delimiters: &DelimiterPair) -> Result<Self, MergeError> {
        delimiters.validate()?;

        let start = delimiters.start.trim();
        let end = delimiters.end.trim();
        // Non-empty after validate
        let boundary = end
            .chars()
            .next()
            .map(|c| regex::escape(&c.to_string()))
            .unwrap_or_default();

        let pattern = format!(
            "{}([^{}]*){}",
            delimiter_pattern(start),
            boundary,
            delimiter_pattern(end)
        );
        let regex = Regex::new(&pattern).map_err(|e| MergeError::InvalidDelimiters {
            start: format!("{} ({e})", delimiters.start),
            end: delimiters.end.clone(),
        })?;

        Ok(Self {
            delimiters: delimiters.clone(),
            regex,
        })
    }

    /// The delimiter pair this matcher was compiled from.
    pub fn delimiters(&self) -> &DelimiterPair {
        &self.delimiters
    }

    /// The compiled regular expression.
    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }

    /// Lazily iterate over non-overlapping placeholders, left to right.
    pub fn placeholders<'t>(&self, template: &'t str) -> impl Iterator<Item = Placeholder<'t>> {
        self.regex.captures_iter(template).filter_map(|caps| {
            let whole = caps.get(0)?;
            let raw = caps.get(1)?;
            Some(Placeholder {
                text: whole.as_str(),
                raw: raw.as_str(),
                start: whole.start(),
            })
        })
    }

    /// Placeholders with distinct matched text, in order of first occurrence.
    pub fn distinct_placeholders<'t>(&self, template: &'t str) -> Vec<Placeholder<'t>> {
        let mut seen = std::collections::HashSet::new();
        self.placeholders(template).filter(|p| seen.insert(p.text())).collect()
    }
}

/// Escape a trimmed delimiter, turning each space into `\s+`.
fn delimiter_pattern(delimiter: &str) -> String {
    let mut pattern = String::with_capacity(delimiter.len() * 3);
    let mut buf = [0u8; 4];

    for ch in delimiter.chars() {
        if ch == ' ' {
            pattern.push_str(r"\s+");
        } else {
            pattern.push_str(&regex::escape(ch.encode_utf8(&mut buf)));
        }
    }

    pattern
}
