//! Global constants used throughout the mergefield codebase.
//!
//! Default delimiters and the relationship naming conventions live here so
//! configuration defaults, the path validator and the record store agree on
//! them.

/// Default placeholder start delimiter.
pub const DEFAULT_START_DELIMITER: &str = "{!";

/// Default placeholder end delimiter.
pub const DEFAULT_END_DELIMITER: &str = "}";

/// Suffix that marks a custom relationship name (`Partner__r`).
pub const CUSTOM_RELATIONSHIP_SUFFIX: &str = "__r";

/// Suffix of the custom reference field behind a custom relationship (`Partner__c`).
pub const CUSTOM_FIELD_SUFFIX: &str = "__c";

/// Suffix appended to a standard relationship name to get its reference field
/// (`Account` -> `AccountId`).
pub const STANDARD_REFERENCE_SUFFIX: &str = "Id";

/// Name of the record identifier field.
pub const ID_FIELD: &str = "Id";

/// Key under which JSON records carry their metadata (`{"type": "Contact"}`).
pub const ATTRIBUTES_KEY: &str = "attributes";

/// Length of the object-type key prefix at the start of every record id.
pub const KEY_PREFIX_LEN: usize = 3;

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "mergefield.toml";

/// Environment variable that overrides the configuration file location.
pub const CONFIG_ENV_VAR: &str = "MERGEFIELD_CONFIG";
