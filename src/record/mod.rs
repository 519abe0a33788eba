//! Record access capability.
//!
//! The substitution engine reads record data through the two-method
//! [`Record`] trait and nothing else: a scalar lookup and a child-record lookup.
//! Any record representation can take part by implementing it. The crate ships
//! an implementation for JSON objects ([`JsonRecord`]), which is also what the
//! [`RecordFetcher`] collaborator returns.
//!
//! # JSON record shape
//!
//! ```json
//! {
//!   "attributes": { "type": "Contact" },
//!   "Id": "003000000000001",
//!   "FirstName": "Jo",
//!   "AccountId": "001000000000001",
//!   "Account": { "attributes": { "type": "Account" }, "Name": "Acme" }
//! }
//! ```
//!
//! Parent records reached through a relationship are nested under the
//! relationship name. A `null` relationship means there is no related record.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::constants::ATTRIBUTES_KEY;
use crate::core::MergeError;
use crate::templating::FieldSet;

/// A record as a JSON object.
pub type JsonRecord = Map<String, Value>;

/// Why a field could not be read from a record.
///
/// These never escape the substitution engine; they become the reason of an
/// empty placeholder value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldAccessError {
    /// The record does not carry the field at all (it was not fetched, or does
    /// not exist).
    #[error("field '{field}' is not present on the record")]
    MissingField {
        /// Requested field name
        field: String,
    },

    /// The field holds a nested record or list where a scalar was expected.
    #[error("field '{field}' does not hold a scalar value")]
    NotAScalar {
        /// Requested field name
        field: String,
    },

    /// The field holds a scalar or list where a related record was expected.
    #[error("field '{field}' does not hold a related record")]
    NotARecord {
        /// Requested relationship name
        field: String,
    },
}

/// Read access to one record in a record graph.
///
/// Names are matched case-insensitively, like the schema's field names.
pub trait Record {
    /// Object type of this record, when the record knows it.
    fn object_type(&self) -> Option<&str>;

    /// Read a scalar field rendered as text.
    ///
    /// `Ok(None)` means the field is present but null.
    fn get_scalar(&self, field: &str) -> Result<Option<String>, FieldAccessError>;

    /// Follow a relationship to the related record.
    ///
    /// `Ok(None)` means the relationship is present but there is no related
    /// record.
    fn get_child(&self, relationship: &str) -> Result<Option<&dyn Record>, FieldAccessError>;
}

/// External collaborator that loads a root record and its related records.
///
/// The returned record must contain every field in `fields`. Dotted entries
/// (`Account.Name`) are relationship traversals: the fetcher must nest the
/// related record under the relationship name so the substitution engine can
/// walk it.
pub trait RecordFetcher: Send + Sync {
    /// Fetch one record by id.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::RecordNotFound`], [`MergeError::AccessDenied`] or
    /// [`MergeError::QueryError`]. The engine propagates them unchanged.
    fn fetch(&self, object_type: &str, id: &str, fields: &FieldSet)
    -> Result<JsonRecord, MergeError>;
}

/// Case-insensitive key lookup on a JSON object.
///
/// An exact match wins over a case-folded one.
pub fn lookup<'a>(record: &'a JsonRecord, name: &str) -> Option<&'a Value> {
    record.get(name).or_else(|| {
        record
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

impl Record for JsonRecord {
    fn object_type(&self) -> Option<&str> {
        self.get(ATTRIBUTES_KEY)
            .and_then(|attributes| attributes.get("type"))
            .and_then(Value::as_str)
    }

    fn get_scalar(&self, field: &str) -> Result<Option<String>, FieldAccessError> {
        match lookup(self, field) {
            None => Err(FieldAccessError::MissingField {
                field: field.to_string(),
            }),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Array(_) | Value::Object(_)) => Err(FieldAccessError::NotAScalar {
                field: field.to_string(),
            }),
        }
    }

    fn get_child(&self, relationship: &str) -> Result<Option<&dyn Record>, FieldAccessError> {
        match lookup(self, relationship) {
            None => Err(FieldAccessError::MissingField {
                field: relationship.to_string(),
            }),
            Some(Value::Null) => Ok(None),
            Some(Value::Object(child)) => Ok(Some(child as &dyn Record)),
            Some(_) => Err(FieldAccessError::NotARecord {
                field: relationship.to_string(),
            }),
        }
    }
}
