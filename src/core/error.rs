//! Typed error handling for sieve
//!
//! Compilers and evaluators never fail: a bad filter narrows results or is
//! skipped. Errors only exist at the configuration boundary, when a
//! [`FilterConfig`](crate::config::FilterConfig) is loaded or checked, or when
//! an operator/type name is parsed from text.
//!
//! # Error Categories
//!
//! - [`ConfigError`]: loading and validating filter schemas
//! - [`ParseError`]: parsing operator, field type and sort direction names
//!
//! # Example
//!
//! ```rust,ignore
//! match FilterConfig::from_yaml_str(yaml).and_then(|c| c.validate().map(|_| c)) {
//!     Ok(config) => use_config(config),
//!     Err(SieveError::Config(ConfigError::DuplicateField { key })) => {
//!         eprintln!("field {} declared twice", key);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for sieve
#[derive(Debug, Error)]
pub enum SieveError {
    /// Schema loading or validation errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Name parsing errors
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SieveError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            SieveError::Config(e) => e.error_code(),
            SieveError::Parse(e) => e.error_code(),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to filter schemas
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a schema file
    #[error("Failed to read filter config: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid YAML document
    #[error("Invalid YAML filter config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid JSON document
    #[error("Invalid JSON filter config: {0}")]
    Json(#[from] serde_json::Error),

    /// Two filter fields share a key
    #[error("Filter field '{key}' is declared more than once")]
    DuplicateField { key: String },

    /// A sort option value is not `field[:asc|desc]`
    #[error("Invalid sort option '{value}': expected 'field:asc' or 'field:desc'")]
    InvalidSortOption { value: String },

    /// Operator cannot apply to the declared field type
    #[error("Operator '{operator}' is not compatible with {field_type} field '{key}'")]
    IncompatibleOperator {
        key: String,
        operator: String,
        field_type: String,
    },

    /// A date range refers to a field missing from `dateRangeFields`
    #[error("Date range field '{field}' is not declared in dateRangeFields")]
    UnknownDateRangeField { field: String },
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::Io(_) => "CONFIG_IO_ERROR",
            ConfigError::Yaml(_) | ConfigError::Json(_) => "CONFIG_FORMAT_ERROR",
            ConfigError::DuplicateField { .. } => "DUPLICATE_FIELD",
            ConfigError::InvalidSortOption { .. } => "INVALID_SORT_OPTION",
            ConfigError::IncompatibleOperator { .. } => "INCOMPATIBLE_OPERATOR",
            ConfigError::UnknownDateRangeField { .. } => "UNKNOWN_DATE_RANGE_FIELD",
        }
    }
}

// =============================================================================
// Parse Errors
// =============================================================================

/// Errors raised when parsing names from text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Unknown field type: {0}")]
    UnknownFieldType(String),

    #[error("Unknown sort direction: {0}")]
    InvalidSortDirection(String),
}

impl ParseError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ParseError::UnknownOperator(_) => "UNKNOWN_OPERATOR",
            ParseError::UnknownFieldType(_) => "UNKNOWN_FIELD_TYPE",
            ParseError::InvalidSortDirection(_) => "INVALID_SORT_DIRECTION",
        }
    }
}

/// Result alias used across the crate
pub type Result<T, E = SieveError> = std::result::Result<T, E>;
