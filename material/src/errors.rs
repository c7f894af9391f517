use thiserror::Error;

/// Result type alias for material adapter operations
pub type Result<T, E = MaterialError> = std::result::Result<T, E>;

/// Errors that cross the plugin boundary as faults.
///
/// Connectivity and validation failures are not listed here: those are
/// ordinary results delivered in the response body.
#[derive(Error, Debug)]
pub enum MaterialError {
    #[error("Unsupported request: {0}")]
    UnsupportedRequest(String),

    #[error("Malformed request body: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    #[error("Response serialization error: {0}")]
    ResponseSerializationError(String),
}
