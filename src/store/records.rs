//! In-memory record store, loadable from a JSON data file.
//!
//! The data file is a JSON array of flat records. Each record names its object
//! type in `attributes.type` and carries a string `Id`; references hold the id
//! of the related record:
//!
//! ```json
//! [
//!   { "attributes": { "type": "Account" }, "Id": "001000000000001", "Name": "Acme" },
//!   { "attributes": { "type": "Contact" }, "Id": "003000000000001",
//!     "FirstName": "Jo", "AccountId": "001000000000001" }
//! ]
//! ```
//!
//! [`MemoryRecordStore::fetch`] answers a [`FieldSet`] the way a query with
//! relationship traversal would: dotted fields follow reference ids and the
//! related record is nested under the relationship name.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, trace};

use crate::constants::{ATTRIBUTES_KEY, ID_FIELD};
use crate::core::MergeError;
use crate::record::{JsonRecord, Record, RecordFetcher, lookup};
use crate::schema::RelationshipConventions;
use crate::templating::FieldSet;

/// A [`RecordFetcher`] over records held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: HashMap<String, JsonRecord>,
    conventions: RelationshipConventions,
    /// Lowercase names of object types the store refuses to read
    restricted: HashSet<String>,
}

impl MemoryRecordStore {
    /// An empty store with the default relationship conventions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use different relationship conventions when following dotted fields.
    #[must_use]
    pub fn with_conventions(mut self, conventions: RelationshipConventions) -> Self {
        self.conventions = conventions;
        self
    }

    /// Refuse access to these object types.
    #[must_use]
    pub fn with_restricted<I, S>(mut self, object_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.restricted
            .extend(object_types.into_iter().map(|t| t.as_ref().to_lowercase()));
        self
    }

    /// Add a record.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::ConfigError`] if the record has no string `Id`, no
    /// `attributes.type`, or an id already in the store.
    pub fn insert(&mut self, record: JsonRecord) -> Result<(), MergeError> {
        let id = match record.get(ID_FIELD) {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            _ => {
                return Err(MergeError::ConfigError {
                    message: format!("Record without a string '{ID_FIELD}' field"),
                });
            }
        };

        if record.object_type().is_none() {
            return Err(MergeError::ConfigError {
                message: format!("Record {id} has no '{ATTRIBUTES_KEY}.type'"),
            });
        }

        if self.records.contains_key(&id) {
            return Err(MergeError::ConfigError {
                message: format!("Duplicate record id {id}"),
            });
        }

        self.records.insert(id, record);
        Ok(())
    }

    /// Parse records from a JSON array.
    ///
    /// # Errors
    ///
    /// Fails on invalid JSON or an invalid record.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let records: Vec<JsonRecord> = serde_json::from_str(content)?;
        let mut store = Self::new();
        for (index, record) in records.into_iter().enumerate() {
            store
                .insert(record)
                .with_context(|| format!("Invalid record at index {index}"))?;
        }
        Ok(store)
    }

    /// Load records from a JSON data file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or does not hold valid records.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read data file: {}", path.display()))?;
        let store = Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse data file: {}", path.display()))?;
        debug!("Loaded {} record(s) from {}", store.len(), path.display());
        Ok(store)
    }

    /// The stored record with this id, unprojected.
    pub fn get(&self, id: &str) -> Option<&JsonRecord> {
        self.records.get(id)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn check_access(&self, object_type: &str) -> Result<(), MergeError> {
        if self.restricted.contains(&object_type.to_lowercase()) {
            return Err(MergeError::AccessDenied {
                object_type: object_type.to_string(),
                reason: "object type is not readable".to_string(),
            });
        }
        Ok(())
    }

    /// Copy the requested paths of `record` into a new record.
    fn project(&self, record: &JsonRecord, paths: &[Vec<&str>]) -> Result<JsonRecord, MergeError> {
        let mut projected = JsonRecord::new();
        for key in [ATTRIBUTES_KEY, ID_FIELD] {
            if let Some(value) = record.get(key) {
                projected.insert(key.to_string(), value.clone());
            }
        }

        // Relationship hop (as first written) to the remainders of its paths
        let mut hops: Vec<(&str, Vec<Vec<&str>>)> = Vec::new();

        for path in paths {
            match path.as_slice() {
                [] => {}
                [field] => {
                    let existing = record.iter().find(|(k, _)| k.eq_ignore_ascii_case(field));
                    let (key, value) = match existing {
                        Some((k, v)) => (k.clone(), v.clone()),
                        None => ((*field).to_string(), Value::Null),
                    };
                    projected.insert(key, value);
                }
                [hop, rest @ ..] => {
                    match hops.iter_mut().find(|(name, _)| name.eq_ignore_ascii_case(hop)) {
                        Some((_, remainders)) => remainders.push(rest.to_vec()),
                        None => hops.push((*hop, vec![rest.to_vec()])),
                    }
                }
            }
        }

        for (hop, remainders) in hops {
            let reference_field = self.conventions.reference_field_for(hop);
            let related = match lookup(record, &reference_field) {
                Some(Value::String(id)) => self.records.get(id),
                _ => None,
            };

            let child = match related {
                Some(related) => {
                    if let Some(related_type) = related.object_type() {
                        self.check_access(related_type)?;
                    }
                    Value::Object(self.project(related, &remainders)?)
                }
                None => {
                    trace!("No related record through {} ({})", hop, reference_field);
                    Value::Null
                }
            };
            projected.insert(hop.to_string(), child);
        }

        Ok(projected)
    }
}

impl RecordFetcher for MemoryRecordStore {
    fn fetch(
        &self,
        object_type: &str,
        id: &str,
        fields: &FieldSet,
    ) -> Result<JsonRecord, MergeError> {
        self.check_access(object_type)?;

        let record = self.records.get(id).ok_or_else(|| MergeError::RecordNotFound {
            object_type: object_type.to_string(),
            id: id.to_string(),
        })?;

        let actual_type = record.object_type().unwrap_or_default();
        if !actual_type.eq_ignore_ascii_case(object_type) {
            return Err(MergeError::QueryError {
                reason: format!("record {id} is a {actual_type}, not a {object_type}"),
            });
        }

        let paths: Vec<Vec<&str>> = fields.iter().map(|f| f.split('.').collect()).collect();
        debug!("Fetching {} {} with fields [{}]", object_type, id, fields);
        self.project(record, &paths)
    }
}
