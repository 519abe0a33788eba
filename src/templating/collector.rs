//! Fetch planning: which fields a template needs.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::PlaceholderMatcher;
use crate::schema::PathValidator;

/// The fields a record fetch must request to satisfy a template.
///
/// Entries are dotted paths exactly as written in the template (trimmed).
/// Iteration is sorted, so the set renders the same way on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldSet(BTreeSet<String>);

impl FieldSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path. Returns `false` if it was already present.
    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        self.0.insert(path.into())
    }

    /// Whether the set contains exactly this path.
    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }

    /// Number of paths.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over paths in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join(", "))
    }
}

impl<S: Into<String>> FromIterator<S> for FieldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Collect every valid placeholder path of `template` for `object_type`.
///
/// Placeholders whose path fails [`PathValidator::is_valid`] are left out, so
/// the resulting fetch only asks for provably reachable fields. Repeated
/// placeholders collapse. An empty set is returned as-is; adding a default
/// such as the `Id` field is up to the fetcher.
pub fn collect_fields(
    matcher: &PlaceholderMatcher,
    template: &str,
    object_type: &str,
    validator: &PathValidator,
) -> FieldSet {
    let mut fields = FieldSet::new();
    if template.trim().is_empty() {
        return fields;
    }

    for placeholder in matcher.placeholders(template) {
        let path = placeholder.path();
        if fields.contains(path) {
            continue;
        }
        if validator.is_valid(object_type, path) {
            fields.insert(path);
        } else {
            debug!("Skipping invalid placeholder '{}' for {}", placeholder.text(), object_type);
        }
    }

    debug!("Fields to fetch for {}: [{}]", object_type, fields);
    fields
}
