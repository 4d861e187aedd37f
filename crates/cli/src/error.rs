use regform_core::error::CoreError;

/// Errors from loading input, configuration, or running a submission.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A domain-level error from `regform_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to read {source_name}: {error}")]
    Io {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    #[error("Record is not a JSON object of strings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Whether this error is a rejected record rather than a broken run.
    pub fn is_validation(&self) -> bool {
        matches!(self, CliError::Core(CoreError::Validation(_)))
    }
}
