use thiserror::Error;

/// Result type for settings construction.
pub type Result<T> = std::result::Result<T, TunerError>;

/// Errors surfaced by the settings API.
///
/// Out-of-range table ids and versions are not errors here; they are stored
/// verbatim and left to the consumer (see the lint crate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TunerError {
    #[error("permission denied: caller does not hold {capability}")]
    PermissionDenied { capability: String },

    #[error("invalid filter main type: {0}")]
    InvalidMainType(String),

    #[error("invalid JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for TunerError {
    fn from(e: serde_json::Error) -> Self {
        TunerError::Json(e.to_string())
    }
}
