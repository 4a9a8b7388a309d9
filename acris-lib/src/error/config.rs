//! Configuration and caller-input error types

use crate::dataset::Dataset;

/// Errors that indicate a programming, configuration or caller mistake.
///
/// These are raised immediately, before any request is issued, and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The dataset name does not match any known dataset.
    #[error("Unknown dataset: {name}")]
    UnknownDataset { name: String },

    /// No endpoint URL could be resolved for the dataset.
    #[error("No endpoint registered for {dataset}")]
    UnresolvedEndpoint { dataset: Dataset },

    /// The registry base URL is not a valid absolute URL.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Batch size must be at least one.
    #[error("Invalid batch size: {0}")]
    InvalidBatchSize(usize),

    /// Page size must be at least one.
    #[error("Invalid page size: {0}")]
    InvalidPageSize(usize),

    /// A filter field the query requires was not supplied.
    #[error("Missing required filter field '{field}'")]
    MissingRequiredField { field: String },

    /// A filter value cannot be rendered for its attribute.
    #[error("Invalid value '{value}' for filter '{key}': {reason}")]
    InvalidFilterValue {
        key: String,
        value: String,
        reason: &'static str,
    },

    /// Filter criteria were not a key/value object.
    #[error("Invalid filter criteria: {0}")]
    InvalidCriteria(String),

    /// An environment variable holds an unusable value.
    #[error("Invalid value for {var}: {message}")]
    Env { var: String, message: String },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl ConfigError {
    /// Creates a missing required field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            field: field.into(),
        }
    }

    /// Creates an invalid filter value error.
    pub fn invalid_value(key: impl Into<String>, value: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidFilterValue {
            key: key.into(),
            value: value.into(),
            reason,
        }
    }
}
