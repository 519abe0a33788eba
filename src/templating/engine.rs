//! The merge engine: the public entry points tying the pieces together.
//!
//! [`MergeEngine`] owns the compiled default delimiters and a [`PathValidator`]
//! over a shared [`SchemaCatalog`], and borrows a [`RecordFetcher`] for
//! id-based merges.

use std::borrow::Cow;
use std::sync::Arc;

use tracing::debug;

use super::{
    DelimiterPair, FieldSet, PlaceholderMatcher, SubstitutionReport, collect_fields,
    substitute_with_report,
};
use crate::core::MergeError;
use crate::record::{Record, RecordFetcher};
use crate::schema::{PathValidator, RelationshipConventions, SchemaCatalog};

/// Merge-field engine.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use mergefield_cli::schema::SchemaCatalog;
/// use mergefield_cli::store::{MemoryRecordStore, MemorySchemaProvider};
/// use mergefield_cli::templating::MergeEngine;
///
/// # fn example() -> anyhow::Result<()> {
/// let schema = MemorySchemaProvider::load("schema.toml".as_ref())?;
/// let store = MemoryRecordStore::load("records.json".as_ref())?;
/// let catalog = Arc::new(SchemaCatalog::new(Arc::new(schema)));
///
/// let engine = MergeEngine::new(catalog, Arc::new(store))?;
/// let text = engine.substitute_by_id(None, "Hello {! FirstName }", "003000000000001")?;
/// println!("{text}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MergeEngine {
    validator: PathValidator,
    fetcher: Arc<dyn RecordFetcher>,
    default_matcher: PlaceholderMatcher,
}

impl MergeEngine {
    /// Engine with the default delimiters and relationship conventions.
    ///
    /// # Errors
    ///
    /// Fails only if the default delimiters cannot be compiled.
    pub fn new(
        catalog: Arc<SchemaCatalog>,
        fetcher: Arc<dyn RecordFetcher>,
    ) -> Result<Self, MergeError> {
        Self::with_options(
            catalog,
            fetcher,
            &DelimiterPair::default(),
            RelationshipConventions::default(),
        )
    }

    /// Engine with explicit default delimiters and conventions.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::InvalidDelimiters`] if `delimiters` is blank.
    pub fn with_options(
        catalog: Arc<SchemaCatalog>,
        fetcher: Arc<dyn RecordFetcher>,
        delimiters: &DelimiterPair,
        conventions: RelationshipConventions,
    ) -> Result<Self, MergeError> {
        Ok(Self {
            validator: PathValidator::new(catalog, conventions),
            fetcher,
            default_matcher: PlaceholderMatcher::compile(delimiters)?,
        })
    }

    /// The shared schema catalog.
    pub fn catalog(&self) -> &Arc<SchemaCatalog> {
        self.validator.catalog()
    }

    /// The delimiters used when a call passes `None`.
    pub fn default_delimiters(&self) -> &DelimiterPair {
        self.default_matcher.delimiters()
    }

    /// Fetch the record behind `id` and merge it into `template`.
    ///
    /// The object type comes from the id's key prefix. Only fields of valid
    /// placeholders are requested from the fetcher.
    ///
    /// # Errors
    ///
    /// - [`MergeError::InvalidDelimiters`] for a blank delimiter pair
    /// - [`MergeError::UnknownObjectType`] if the id maps to no object type
    /// - Any fetch failure, unchanged
    pub fn substitute_by_id(
        &self,
        delimiters: Option<&DelimiterPair>,
        template: &str,
        id: &str,
    ) -> Result<String, MergeError> {
        Ok(self.substitute_by_id_with_report(delimiters, template, id)?.output)
    }

    /// [`substitute_by_id`](Self::substitute_by_id), keeping the list of
    /// placeholders that rendered empty.
    pub fn substitute_by_id_with_report(
        &self,
        delimiters: Option<&DelimiterPair>,
        template: &str,
        id: &str,
    ) -> Result<SubstitutionReport, MergeError> {
        let matcher = self.matcher_for(delimiters)?;
        if template.trim().is_empty() {
            return Ok(SubstitutionReport {
                output: template.to_string(),
                unresolved: Vec::new(),
            });
        }

        let object_type = self.catalog().object_type_for_id(id)?;
        let fields = collect_fields(&matcher, template, &object_type, &self.validator);
        debug!("Fetching {} {} with {} field(s)", object_type, id, fields.len());

        let record = self.fetcher.fetch(&object_type, id, &fields)?;
        Ok(substitute_with_report(&matcher, template, &record))
    }

    /// Merge an already-fetched record into `template`.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::InvalidDelimiters`] for a blank delimiter pair.
    pub fn substitute_with_record(
        &self,
        delimiters: Option<&DelimiterPair>,
        template: &str,
        record: &dyn Record,
    ) -> Result<String, MergeError> {
        Ok(self.substitute_with_record_report(delimiters, template, record)?.output)
    }

    /// [`substitute_with_record`](Self::substitute_with_record), keeping the
    /// list of placeholders that rendered empty.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::InvalidDelimiters`] for a blank delimiter pair.
    pub fn substitute_with_record_report(
        &self,
        delimiters: Option<&DelimiterPair>,
        template: &str,
        record: &dyn Record,
    ) -> Result<SubstitutionReport, MergeError> {
        let matcher = self.matcher_for(delimiters)?;
        Ok(substitute_with_report(&matcher, template, record))
    }

    /// The fields a fetch of `object_type` needs to satisfy `template`.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::InvalidDelimiters`] for a blank delimiter pair.
    pub fn build_field_set(
        &self,
        delimiters: Option<&DelimiterPair>,
        template: &str,
        object_type: &str,
    ) -> Result<FieldSet, MergeError> {
        let matcher = self.matcher_for(delimiters)?;
        Ok(collect_fields(&matcher, template, object_type, &self.validator))
    }

    /// Whether `path` is statically valid on `object_type`.
    pub fn is_path_valid(&self, object_type: &str, path: &str) -> bool {
        self.validator.is_valid(object_type, path)
    }

    fn matcher_for(
        &self,
        delimiters: Option<&DelimiterPair>,
    ) -> Result<Cow<'_, PlaceholderMatcher>, MergeError> {
        match delimiters {
            None => Ok(Cow::Borrowed(&self.default_matcher)),
            Some(pair) if pair == self.default_matcher.delimiters() => {
                Ok(Cow::Borrowed(&self.default_matcher))
            }
            Some(pair) => PlaceholderMatcher::compile(pair).map(Cow::Owned),
        }
    }
}

impl std::fmt::Debug for MergeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MergeEngine")
            .field("validator", &self.validator)
            .field("default_delimiters", self.default_delimiters())
            .finish_non_exhaustive()
    }
}
