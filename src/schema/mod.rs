//! Schema metadata for merge-field resolution.
//!
//! The engine never reads record data to decide whether a placeholder is
//! resolvable. It asks the schema instead: an [`ObjectDescriptor`] lists the
//! fields of one object type, and reference fields name the object type(s)
//! they point at.
//!
//! # Components
//!
//! - [`SchemaProvider`] - External collaborator that describes object types
//! - [`SchemaCatalog`] - Memoizing, concurrency-safe cache in front of a provider
//! - [`PathValidator`] - Static check of a dotted path against the catalog
//! - [`RelationshipConventions`] - How relationship names map to reference fields
//!
//! # Case Sensitivity
//!
//! Object type and field names are case-insensitive identifiers, matching how
//! the schema catalogs this engine is modeled on compare their keys. Descriptors
//! keep the declared spelling for display and compare on a lowercase key.

pub mod catalog;
pub mod conventions;
pub mod path;

pub use catalog::{CatalogStats, SchemaCatalog};
pub use conventions::RelationshipConventions;
pub use path::PathValidator;

use std::collections::HashMap;

use crate::core::MergeError;

/// What kind of value a field holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// A plain value (text, number, boolean, date...).
    Scalar,
    /// A link to another record.
    Reference {
        /// Object types this field may point at, in declaration order.
        targets: Vec<String>,
        /// Name-pointing reference: the target type varies per record and
        /// cannot be resolved statically.
        polymorphic: bool,
    },
}

/// Describe metadata for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    kind: FieldKind,
}

impl FieldDescriptor {
    /// A scalar field.
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Scalar,
        }
    }

    /// A single-target (or fixed multi-target) reference field.
    pub fn reference(name: impl Into<String>, targets: &[&str]) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Reference {
                targets: targets.iter().map(|t| (*t).to_string()).collect(),
                polymorphic: false,
            },
        }
    }

    /// A name-pointing reference whose target type is only known per record.
    pub fn polymorphic(name: impl Into<String>, targets: &[&str]) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Reference {
                targets: targets.iter().map(|t| (*t).to_string()).collect(),
                polymorphic: true,
            },
        }
    }

    /// Build a descriptor from its parts.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// The field name as declared.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field kind.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Whether this is a reference field.
    pub fn is_reference(&self) -> bool {
        matches!(self.kind, FieldKind::Reference { .. })
    }

    /// Whether this is a name-pointing (polymorphic) reference.
    pub fn is_polymorphic(&self) -> bool {
        matches!(self.kind, FieldKind::Reference { polymorphic: true, .. })
    }

    /// The first declared reference target, if any.
    pub fn reference_target(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Reference { targets, .. } => targets.first().map(String::as_str),
            FieldKind::Scalar => None,
        }
    }
}

/// Schema metadata for one object type: its fields and id key prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDescriptor {
    name: String,
    key_prefix: Option<String>,
    /// Keyed by lowercase field name
    fields: HashMap<String, FieldDescriptor>,
}

impl ObjectDescriptor {
    /// An object type with no fields yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key_prefix: None,
            fields: HashMap::new(),
        }
    }

    /// Set the three-character id key prefix of this object type.
    #[must_use]
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Add a field, replacing any field with the same (case-insensitive) name.
    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.insert_field(field);
        self
    }

    /// Add a field in place.
    pub fn insert_field(&mut self, field: FieldDescriptor) {
        self.fields.insert(field.name.to_lowercase(), field);
    }

    /// The object type name as declared.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The id key prefix, if the object type has one.
    pub fn key_prefix(&self) -> Option<&str> {
        self.key_prefix.as_deref()
    }

    /// Look up a field by name, ignoring case.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(&name.to_lowercase())
    }

    /// Whether the object type has a field with this name, ignoring case.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(&name.to_lowercase())
    }

    /// Iterate over declared field names (unordered).
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.values().map(FieldDescriptor::name)
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the object type declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// External collaborator that knows the schema.
///
/// Implementations are expected to be deterministic: describing the same name
/// twice yields equivalent descriptors. [`SchemaCatalog`] relies on this when
/// two callers race to populate the same entry.
pub trait SchemaProvider: Send + Sync {
    /// Describe an object type.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::UnknownObjectType`] if the name is not known.
    fn describe(&self, object_type: &str) -> Result<ObjectDescriptor, MergeError>;

    /// Resolve the object type of a record id from its key prefix.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::UnknownObjectType`] if no object type owns the prefix.
    fn object_type_for_id(&self, id: &str) -> Result<String, MergeError>;
}
