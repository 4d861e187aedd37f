//! Submission handler: load a record, validate it, log the outcome.
//!
//! A rejected record is logged message by message and nothing else happens.
//! An accepted record is logged as the submitted payload. No data leaves the
//! process.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use regform_core::error::CoreError;
use regform_core::{Record, Schema, ValidationFailure};

use crate::config::{CliConfig, STDIN_SOURCE};
use crate::error::CliError;

/// Parse a record from a flat JSON object of strings.
pub fn read_record<R: Read>(reader: R) -> Result<Record, CliError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load a record from a file path, or from stdin when `source` is `-`.
pub fn load_record(source: &str) -> Result<Record, CliError> {
    if source == STDIN_SOURCE {
        return read_record(io::stdin().lock());
    }

    let file = File::open(source).map_err(|error| CliError::Io {
        source_name: source.to_string(),
        error,
    })?;
    read_record(BufReader::new(file))
}

/// Load a rule table from a JSON file.
pub fn load_schema(path: &Path) -> Result<Schema, CliError> {
    let json = std::fs::read_to_string(path).map_err(|error| CliError::Io {
        source_name: path.display().to_string(),
        error,
    })?;
    Ok(Schema::from_json(&json)?)
}

/// Validate a record and log the outcome.
///
/// Every violation is logged at DEBUG, in check order, and the submit is
/// aborted. On success the payload is logged and the record returned as is.
pub fn submit(schema: &Schema, record: &Record) -> Result<Record, ValidationFailure> {
    match schema.validate(record) {
        Ok(accepted) => {
            tracing::debug!(payload = ?accepted, "Registration submitted");
            Ok(accepted)
        }
        Err(failure) => {
            for error in failure.errors() {
                tracing::debug!(field = %error.field, "{}", error.message);
            }
            tracing::info!(
                violations = failure.errors().len(),
                "Registration rejected",
            );
            Err(failure)
        }
    }
}

/// Load the configured schema and record, then submit.
///
/// `source` overrides `config.input` when given.
pub fn run(config: &CliConfig, source: Option<&str>) -> Result<Record, CliError> {
    let custom = config
        .schema_path
        .as_deref()
        .map(load_schema)
        .transpose()?;
    let schema = custom.as_ref().unwrap_or(Schema::registration());

    let source = source.unwrap_or(config.input.as_str());
    tracing::info!(
        source = %source,
        custom_schema = custom.is_some(),
        "Loading registration record",
    );

    let record = load_record(source)?;
    submit(schema, &record).map_err(|failure| CliError::Core(CoreError::Validation(failure)))
}
