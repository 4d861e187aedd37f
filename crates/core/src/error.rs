use crate::validation::rules::ValidationFailure;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationFailure),

    #[error("Invalid rule for field {field}: {reason}")]
    InvalidRule { field: String, reason: String },

    #[error("Invalid rule table: {0}")]
    Definition(#[from] serde_json::Error),
}
