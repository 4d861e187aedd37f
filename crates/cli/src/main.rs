//! `regform` -- submit a registration record from the command line.
//!
//! Reads one record as a JSON object of strings, validates it, and logs
//! either each violation or the accepted payload.
//!
//! ```text
//! regform [PATH]      # PATH defaults to $REGFORM_INPUT, then `-` (stdin)
//! ```
//!
//! # Environment variables
//!
//! | Variable              | Required | Default | Description                           |
//! |-----------------------|----------|---------|---------------------------------------|
//! | `REGFORM_INPUT`       | no       | `-`     | Record source when no path is given   |
//! | `REGFORM_SCHEMA_PATH` | no       | --      | JSON rule table replacing the built-in one |
//! | `REGFORM_LOG_FORMAT`  | no       | `text`  | `text` or `json`                      |
//!
//! Exit codes: `0` accepted, `1` rejected, `2` input or configuration error.

use std::process::ExitCode;

use regform_cli::config::CliConfig;
use regform_cli::{logging, submit};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    logging::init(config.log_format);

    let source = std::env::args().nth(1);

    match submit::run(&config, source.as_deref()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) if err.is_validation() => ExitCode::from(1),
        Err(err) => {
            tracing::error!(error = %err, "Submission failed");
            ExitCode::from(2)
        }
    }
}
