use crate::validator::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the library. Each variant names the stage that failed.
#[derive(Debug, Error)]
pub enum Error {
    /// The API definition has unresolvable references or conflicting routes
    #[error("failed validating API definition: {0}")]
    GraphValidation(#[from] ValidationError),

    /// The document tree could not be turned into bytes
    #[error("marshaling issue occurred: {0}")]
    Serialization(String),

    /// The output destination could not be created, written or flushed
    #[error("failed {action} output file {}: {source}", .path.display())]
    Output {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A definition file could not be read or parsed
    #[error("failed loading API definition from {}: {message}", .path.display())]
    Definition { path: PathBuf, message: String },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(format!("JSON serialization error: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Serialization(format!("YAML serialization error: {}", err))
    }
}
