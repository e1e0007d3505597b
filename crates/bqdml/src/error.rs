//! Error types for bqdml

use thiserror::Error;

/// Result type alias for bqdml operations
pub type DmlResult<T> = Result<T, DmlError>;

/// Error types for statement composition and execution
#[derive(Debug, Error)]
pub enum DmlError {
    /// Caller supplied input that cannot produce a statement
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A record in a batch does not match the batch column list
    #[error("Schema inconsistency in record {index}: {message}")]
    SchemaInconsistency { index: usize, message: String },

    /// Statement execution error reported by an executor
    #[error("Execution error: {0}")]
    Execution(String),

    /// Statement execution timeout
    #[error("Statement timeout after {0:?}")]
    Timeout(std::time::Duration),

    /// A hook refused to let the statement run
    #[error("Statement aborted: {0}")]
    Aborted(String),

    /// Configuration load/parse error
    #[error("Config error: {0}")]
    Config(String),
}

impl DmlError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a schema inconsistency error for the record at `index`
    pub fn schema_inconsistency(index: usize, message: impl Into<String>) -> Self {
        Self::SchemaInconsistency {
            index,
            message: message.into(),
        }
    }

    /// Create an execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is a schema inconsistency error
    pub fn is_schema_inconsistency(&self) -> bool {
        matches!(self, Self::SchemaInconsistency { .. })
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

impl From<toml::de::Error> for DmlError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
