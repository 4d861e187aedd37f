//! `regform-cli` library crate.
//!
//! The submission handler for registration records: loads a record, runs the
//! validator, and logs the outcome. The binary entrypoint lives in `main.rs`.

pub mod config;
pub mod error;
pub mod logging;
pub mod submit;
