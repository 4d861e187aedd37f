use std::path::PathBuf;
use std::str::FromStr;

use crate::error::CliError;

/// Record source meaning "read standard input".
pub const STDIN_SOURCE: &str = "-";

/// Output format of the tracing layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(CliError::Config(format!(
                "REGFORM_LOG_FORMAT must be `text` or `json`, got `{other}`"
            ))),
        }
    }
}

/// Submission settings loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Record source used when no path argument is given (default: `-`).
    pub input: String,
    /// Rule table replacing the built-in registration schema.
    pub schema_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default |
    /// |-----------------------|---------|
    /// | `REGFORM_INPUT`       | `-`     |
    /// | `REGFORM_SCHEMA_PATH` | unset   |
    /// | `REGFORM_LOG_FORMAT`  | `text`  |
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`CliConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let input = non_empty("REGFORM_INPUT").unwrap_or_else(|| STDIN_SOURCE.into());
        let schema_path = non_empty("REGFORM_SCHEMA_PATH").map(PathBuf::from);
        let log_format = match non_empty("REGFORM_LOG_FORMAT") {
            Some(v) => v.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            input,
            schema_path,
            log_format,
        })
    }
}
