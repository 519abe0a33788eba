//! In-memory schema provider, loadable from a TOML schema file.
//!
//! ```toml
//! [objects.Contact]
//! key_prefix = "003"
//!
//! [objects.Contact.fields]
//! FirstName = "string"
//! AccountId = { reference = ["Account"] }
//!
//! [objects.Task.fields]
//! WhoId = { reference = ["Contact", "Lead"], polymorphic = true }
//! ```
//!
//! A field is either a type name (any string, the engine only cares that the
//! field is scalar) or a reference table. Every object implicitly has a scalar
//! `Id` field.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::config::{parse_config, parse_config_str};
use crate::constants::{ID_FIELD, KEY_PREFIX_LEN};
use crate::core::MergeError;
use crate::schema::{FieldDescriptor, FieldKind, ObjectDescriptor, SchemaProvider};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaFile {
    #[serde(default)]
    objects: BTreeMap<String, ObjectSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ObjectSpec {
    key_prefix: Option<String>,
    #[serde(default)]
    fields: BTreeMap<String, FieldSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FieldSpec {
    Scalar(String),
    Reference {
        reference: Vec<String>,
        #[serde(default)]
        polymorphic: bool,
    },
}

/// A [`SchemaProvider`] over a fixed set of object descriptors.
#[derive(Debug, Clone, Default)]
pub struct MemorySchemaProvider {
    /// Keyed by lowercase object type name
    objects: HashMap<String, ObjectDescriptor>,
    /// Key prefix to declared object type name
    prefixes: HashMap<String, String>,
}

impl MemorySchemaProvider {
    /// An empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object type, builder style.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::ConfigError`] if the object's key prefix is not
    /// three characters long or already belongs to another object type.
    pub fn with_object(mut self, descriptor: ObjectDescriptor) -> Result<Self, MergeError> {
        self.insert(descriptor)?;
        Ok(self)
    }

    /// Add an object type, replacing any object type with the same name.
    ///
    /// A replaced object's key prefix is released. An `Id` scalar field is
    /// added if the descriptor does not declare one.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::ConfigError`] if the object's key prefix is not
    /// three characters long or already belongs to another object type.
    pub fn insert(&mut self, mut descriptor: ObjectDescriptor) -> Result<(), MergeError> {
        if let Some(prefix) = descriptor.key_prefix() {
            if prefix.chars().count() != KEY_PREFIX_LEN {
                return Err(MergeError::ConfigError {
                    message: format!(
                        "Key prefix '{prefix}' of {} must be {KEY_PREFIX_LEN} characters",
                        descriptor.name()
                    ),
                });
            }
            match self.prefixes.get(prefix) {
                Some(owner) if !owner.eq_ignore_ascii_case(descriptor.name()) => {
                    return Err(MergeError::ConfigError {
                        message: format!(
                            "Key prefix '{prefix}' is used by both {owner} and {}",
                            descriptor.name()
                        ),
                    });
                }
                _ => {}
            }
        }

        let key = descriptor.name().to_lowercase();
        if let Some(previous) = self.objects.get(&key).and_then(ObjectDescriptor::key_prefix) {
            self.prefixes.remove(previous);
        }
        if let Some(prefix) = descriptor.key_prefix() {
            self.prefixes.insert(prefix.to_string(), descriptor.name().to_string());
        }

        if !descriptor.has_field(ID_FIELD) {
            descriptor.insert_field(FieldDescriptor::scalar(ID_FIELD));
        }

        self.objects.insert(key, descriptor);
        Ok(())
    }

    /// Parse a schema from TOML text.
    ///
    /// # Errors
    ///
    /// Fails on invalid TOML, an unexpected field shape, or a bad key prefix.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: SchemaFile = parse_config_str(content)?;
        Self::from_schema_file(file)
    }

    /// Load a schema file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a valid schema.
    pub fn load(path: &Path) -> Result<Self> {
        let file: SchemaFile = parse_config(path)?;
        let provider = Self::from_schema_file(file)
            .with_context(|| format!("Invalid schema file: {}", path.display()))?;
        debug!("Loaded {} object type(s) from {}", provider.len(), path.display());
        Ok(provider)
    }

    fn from_schema_file(file: SchemaFile) -> Result<Self> {
        let mut provider = Self::new();

        for (name, spec) in file.objects {
            let mut descriptor = ObjectDescriptor::new(name.as_str());
            if let Some(prefix) = spec.key_prefix {
                descriptor = descriptor.with_key_prefix(prefix);
            }

            for (field_name, field_spec) in spec.fields {
                let kind = match field_spec {
                    FieldSpec::Scalar(_) => FieldKind::Scalar,
                    FieldSpec::Reference {
                        reference,
                        polymorphic,
                    } => FieldKind::Reference {
                        targets: reference,
                        polymorphic,
                    },
                };
                descriptor.insert_field(FieldDescriptor::new(field_name, kind));
            }

            provider.insert(descriptor)?;
        }

        Ok(provider)
    }

    /// Names of all object types, sorted.
    pub fn object_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.objects.values().map(ObjectDescriptor::name).collect();
        names.sort_unstable();
        names
    }

    /// Number of object types.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether no object type is defined.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl SchemaProvider for MemorySchemaProvider {
    fn describe(&self, object_type: &str) -> Result<ObjectDescriptor, MergeError> {
        self.objects.get(&object_type.to_lowercase()).cloned().ok_or_else(|| {
            MergeError::UnknownObjectType {
                name: object_type.to_string(),
            }
        })
    }

    fn object_type_for_id(&self, id: &str) -> Result<String, MergeError> {
        let prefix: String = id.chars().take(KEY_PREFIX_LEN).collect();
        if prefix.chars().count() < KEY_PREFIX_LEN {
            return Err(MergeError::UnknownObjectType {
                name: id.to_string(),
            });
        }

        self.prefixes
            .get(&prefix)
            .cloned()
            .ok_or(MergeError::UnknownObjectType { name: prefix })
    }
}
