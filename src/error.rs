use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildkiteError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("GraphQL {operation} failed: {errors}")]
    GraphQL { operation: String, errors: String },

    #[error("GraphQL response contained no data")]
    NoResponseData,

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Expected {expected} {what}, found {found}")]
    Cardinality {
        what: String,
        expected: usize,
        found: usize,
    },

    #[error("Illegal entry - must be in the form of {expected}: {entry}")]
    Format {
        entry: String,
        expected: &'static str,
    },

    #[error("Backend contract violation: {0}")]
    Contract(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl BuildkiteError {
    /// Whether the backend reported the object as absent.
    ///
    /// Callers implementing idempotent deletes use this to treat a vanished
    /// resource as already removed.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Api { status: 404, .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BuildkiteError>;
