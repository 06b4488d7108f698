//! SentimentSync error types

use crate::types::Method;

/// SentimentSync error types
#[derive(Debug, thiserror::Error)]
pub enum SentimentSyncError {
    // Run validation errors
    #[error("validation error: {0}")]
    Validation(String),

    // Collaborator setup errors
    #[error("{method} setup error: {message}")]
    Setup { method: Method, message: String },

    #[error("missing API key for {0}")]
    MissingCredential(Method),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("'{model}' is not a valid model. Available models: {}", available.join(", "))]
    ModelNotFound {
        model: String,
        available: Vec<String>,
    },

    // Collaborator call errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("empty response from model")]
    EmptyResponse,

    #[error("parse error: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Configuration errors
    #[error("lexicon error: {0}")]
    Lexicon(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("unknown method: {0}")]
    UnknownMethod(String),

    #[error("no scorer registered for {0}")]
    NoScorer(Method),
}

impl SentimentSyncError {
    /// Whether this error means the collaborator's credential or model was
    /// rejected, as opposed to a single call going wrong.
    ///
    /// Any error from `validate` drops the method. During scoring the
    /// failed cell is marked ERROR either way; this only changes how the
    /// failure is logged.
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            SentimentSyncError::Setup { .. }
                | SentimentSyncError::MissingCredential(_)
                | SentimentSyncError::AuthenticationFailed
                | SentimentSyncError::ModelNotFound { .. }
                | SentimentSyncError::NoScorer(_)
        ) || matches!(self, SentimentSyncError::Api { status, .. } if *status == 401 || *status == 403)
    }
}

/// Result type alias for SentimentSync operations
pub type Result<T> = std::result::Result<T, SentimentSyncError>;
