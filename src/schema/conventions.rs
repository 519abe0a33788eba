//! Relationship naming conventions.
//!
//! Placeholders walk relationships by *relationship name* (`Account`,
//! `Partner__r`), but the schema indexes the *reference field* behind it
//! (`AccountId`, `Partner__c`). [`RelationshipConventions`] turns one into the
//! other.

use serde::{Deserialize, Serialize};

use crate::constants::{
    CUSTOM_FIELD_SUFFIX, CUSTOM_RELATIONSHIP_SUFFIX, STANDARD_REFERENCE_SUFFIX,
};

/// Suffix rules that map a relationship name to its reference field name.
///
/// Loaded from the `[conventions]` table of `mergefield.toml`; every key is
/// optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationshipConventions {
    /// Suffix marking a custom relationship name (default `__r`).
    pub custom_relationship_suffix: String,
    /// Suffix of the matching custom reference field (default `__c`).
    pub custom_field_suffix: String,
    /// Suffix appended to standard relationship names (default `Id`).
    pub standard_reference_suffix: String,
}

impl Default for RelationshipConventions {
    fn default() -> Self {
        Self {
            custom_relationship_suffix: CUSTOM_RELATIONSHIP_SUFFIX.to_string(),
            custom_field_suffix: CUSTOM_FIELD_SUFFIX.to_string(),
            standard_reference_suffix: STANDARD_REFERENCE_SUFFIX.to_string(),
        }
    }
}

impl RelationshipConventions {
    /// Derive the reference field name for a relationship hop.
    ///
    /// - `Partner__r` becomes `Partner__c` (custom suffix swapped)
    /// - `Account` becomes `AccountId` (standard suffix appended)
    ///
    /// The custom suffix is matched case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use mergefield_cli::schema::RelationshipConventions;
    ///
    /// let conventions = RelationshipConventions::default();
    /// assert_eq!(conventions.reference_field_for("Account"), "AccountId");
    /// assert_eq!(conventions.reference_field_for("Partner__r"), "Partner__c");
    /// ```
    pub fn reference_field_for(&self, relationship: &str) -> String {
        match strip_suffix_ignore_case(relationship, &self.custom_relationship_suffix) {
            Some(stem) => format!("{stem}{}", self.custom_field_suffix),
            None => format!("{relationship}{}", self.standard_reference_suffix),
        }
    }
}

fn strip_suffix_ignore_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    if suffix.is_empty() || value.len() < suffix.len() {
        return None;
    }
    let split = value.len() - suffix.len();
    if !value.is_char_boundary(split) {
        return None;
    }
    let (stem, tail) = value.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(stem)
}
