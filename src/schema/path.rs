//! Static validation of dotted field paths.
//!
//! A dotted path such as `Account.Owner.Name` is checked against the schema
//! alone, before any record is fetched. Every segment but the last is a
//! relationship hop; the last is the terminal field.
//!
//! # Trust policy for polymorphic references
//!
//! A hop through a name-pointing (polymorphic) reference cannot be checked
//! statically because its target type is only known per record. Such a path is
//! reported valid as soon as the polymorphic hop is reached. Resolution at
//! substitution time degrades to an empty value if the remainder turns out to
//! be wrong.

use std::sync::Arc;

use tracing::{debug, trace};

use super::{FieldKind, RelationshipConventions, SchemaCatalog};

/// Checks dotted paths against a [`SchemaCatalog`].
///
/// The validator never fails: unknown object types and catalog errors turn
/// into an invalid verdict and are logged at debug level.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use mergefield_cli::schema::{PathValidator, RelationshipConventions, SchemaCatalog};
/// use mergefield_cli::store::MemorySchemaProvider;
///
/// # fn example() -> anyhow::Result<()> {
/// let provider = MemorySchemaProvider::load("schema.toml".as_ref())?;
/// let catalog = Arc::new(SchemaCatalog::new(Arc::new(provider)));
/// let validator = PathValidator::new(catalog, RelationshipConventions::default());
///
/// assert!(validator.is_valid("Contact", "Account.Name"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PathValidator {
    catalog: Arc<SchemaCatalog>,
    conventions: RelationshipConventions,
}

impl PathValidator {
    /// Create a validator over a shared catalog.
    pub fn new(catalog: Arc<SchemaCatalog>, conventions: RelationshipConventions) -> Self {
        Self {
            catalog,
            conventions,
        }
    }

    /// The catalog this validator reads from.
    pub fn catalog(&self) -> &Arc<SchemaCatalog> {
        &self.catalog
    }

    /// The relationship naming conventions in use.
    pub fn conventions(&self) -> &RelationshipConventions {
        &self.conventions
    }

    /// Whether `path` resolves to a field starting from `object_type`.
    ///
    /// - A single segment is valid if `object_type` has that field.
    /// - Each hop is mapped to its reference field (`Account` to `AccountId`,
    ///   `Partner__r` to `Partner__c`) which must exist on the current type.
    /// - A polymorphic hop makes the whole path valid.
    /// - Otherwise the hop's first reference target becomes the current type.
    /// - The terminal segment must exist on the final type.
    pub fn is_valid(&self, object_type: &str, path: &str) -> bool {
        let segments: Vec<&str> = path.split('.').collect();
        let Some((terminal, hops)) = segments.split_last() else {
            return false;
        };

        let mut current_type = object_type.to_string();

        for hop in hops {
            let descriptor = match self.catalog.descriptors_for(&current_type) {
                Ok(descriptor) => descriptor,
                Err(e) => {
                    debug!("Path '{}' on {} is invalid: {}", path, object_type, e);
                    return false;
                }
            };

            let reference_field = self.conventions.reference_field_for(hop);
            let Some(field) = descriptor.field(&reference_field) else {
                trace!(
                    "Path '{}' on {} is invalid: {} has no field {}",
                    path, object_type, current_type, reference_field
                );
                return false;
            };

            match field.kind() {
                FieldKind::Reference {
                    polymorphic: true, ..
                } => {
                    trace!(
                        "Path '{}' on {} crosses polymorphic field {}, trusting remainder",
                        path, object_type, reference_field
                    );
                    return true;
                }
                FieldKind::Reference { targets, .. } => match targets.first() {
                    Some(target) => current_type.clone_from(target),
                    None => {
                        debug!(
                            "Reference field {} on {} has no target",
                            reference_field, current_type
                        );
                        return false;
                    }
                },
                FieldKind::Scalar => {
                    trace!(
                        "Path '{}' on {} is invalid: {} is not a reference",
                        path, object_type, reference_field
                    );
                    return false;
                }
            }
        }

        match self.catalog.descriptors_for(&current_type) {
            Ok(descriptor) => {
                let valid = descriptor.has_field(terminal);
                trace!("Path '{}' on {}: valid={}", path, object_type, valid);
                valid
            }
            Err(e) => {
                debug!("Path '{}' on {} is invalid: {}", path, object_type, e);
                false
            }
        }
    }
}
