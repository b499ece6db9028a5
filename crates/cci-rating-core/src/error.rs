use thiserror::Error;

#[derive(Debug, Error)]
pub enum RatingError {
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    #[error("Incomplete scorecard: {0}")]
    IncompleteScorecard(String),

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RatingError {
    fn from(e: serde_json::Error) -> Self {
        RatingError::SerializationError(e.to_string())
    }
}
