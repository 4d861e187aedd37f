//! Integration tests for the submission handler.
//!
//! Exercises record loading, schema loading, and the submit flow end to end
//! against files on disk.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use regform_cli::config::{CliConfig, LogFormat};
use regform_cli::error::CliError;
use regform_cli::submit::{load_record, load_schema, read_record, run, submit};
use regform_core::error::CoreError;
use regform_core::{validate, Record, Schema};
use serde_json::json;
use tempfile::NamedTempFile;
use tracing_subscriber::fmt::MakeWriter;

fn valid_json() -> serde_json::Value {
    json!({
        "name": "Ana",
        "email": "a@b.com",
        "cpf": "123.456.789-00",
        "cellphone": "(11) 91234-5678",
        "sex": "Outro",
        "birthDate": "01/01/2000",
    })
}

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file should be created");
    file.write_all(contents.as_bytes())
        .expect("temp file should be writable");
    file
}

fn config_for(schema_path: Option<PathBuf>) -> CliConfig {
    CliConfig {
        input: "-".to_string(),
        schema_path,
        log_format: LogFormat::Text,
    }
}

/// In-memory log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().expect("log buffer lock");
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer lock")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` under a DEBUG-level plain-text subscriber and return its log lines.
fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .finish();

    let output = tracing::subscriber::with_default(subscriber, f);
    (output, logs.lines())
}

// ---------------------------------------------------------------------------
// Test: loading records
// ---------------------------------------------------------------------------

#[test]
fn load_record_reads_flat_object() {
    let file = write_temp(&valid_json().to_string());
    let record = load_record(file.path().to_str().unwrap()).expect("record should load");

    assert_eq!(record.len(), 6);
    assert_eq!(record.get("cellphone"), Some("(11) 91234-5678"));
}

#[test]
fn load_record_rejects_non_string_values() {
    let file = write_temp(r#"{ "name": "Ana", "cpf": 12345678900 }"#);
    assert_matches!(
        load_record(file.path().to_str().unwrap()),
        Err(CliError::Json(_))
    );
}

#[test]
fn load_record_reports_missing_file() {
    let err = load_record("/nonexistent/regform/record.json").unwrap_err();
    assert_matches!(err, CliError::Io { ref source_name, .. } if source_name.ends_with("record.json"));
}

#[test]
fn read_record_ignores_key_order() {
    let a = read_record(r#"{ "name": "Ana", "sex": "Outro" }"#.as_bytes()).unwrap();
    let b = read_record(r#"{ "sex": "Outro", "name": "Ana" }"#.as_bytes()).unwrap();
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// Test: submit
// ---------------------------------------------------------------------------

/// An accepted record comes back exactly as it was submitted.
#[test]
fn submit_returns_record_unchanged() {
    let record: Record = serde_json::from_value(valid_json()).unwrap();
    let accepted = submit(Schema::registration(), &record).expect("record should be accepted");
    assert_eq!(accepted, record);
}

/// A rejected record yields the same violations as calling the validator.
#[test]
fn submit_failure_matches_validator() {
    let mut value = valid_json();
    value["name"] = json!("");
    value["cellphone"] = json!("11991234567");
    let record: Record = serde_json::from_value(value).unwrap();

    let failure = submit(Schema::registration(), &record).unwrap_err();
    assert_eq!(Err(failure.clone()), validate(&record));
    assert_eq!(failure.fields().collect::<Vec<_>>(), ["name", "cellphone"]);
}

/// Each violation is logged at DEBUG, one line per message, in check order.
#[test]
fn submit_logs_each_violation_in_check_order() {
    let mut value = valid_json();
    value["name"] = json!("");
    value["cpf"] = json!("123456789");
    value["cellphone"] = json!("11991234567");
    let record: Record = serde_json::from_value(value).unwrap();

    let (result, lines) = with_captured_logs(|| submit(Schema::registration(), &record));
    assert!(result.is_err());

    let debug: Vec<_> = lines.iter().filter(|l| l.contains("DEBUG")).collect();
    assert_eq!(debug.len(), 3, "unexpected debug lines: {debug:?}");

    let expected = [
        ("name", "name not provided"),
        ("cpf", "invalid format"),
        ("cellphone", "invalid format"),
    ];
    for (line, (field, message)) in debug.iter().zip(expected) {
        assert!(line.contains(message), "{line} should contain {message}");
        assert!(
            line.contains(&format!("field={field}")),
            "{line} should name field {field}"
        );
    }
}

/// An accepted record is logged once at DEBUG with its payload.
#[test]
fn submit_logs_accepted_payload() {
    let record: Record = serde_json::from_value(valid_json()).unwrap();

    let (result, lines) = with_captured_logs(|| submit(Schema::registration(), &record));
    assert_eq!(result, Ok(record));

    let debug: Vec<_> = lines.iter().filter(|l| l.contains("DEBUG")).collect();
    assert_eq!(debug.len(), 1, "unexpected debug lines: {debug:?}");
    assert!(debug[0].contains("Registration submitted"));
    assert!(debug[0].contains("123.456.789-00"));
}

// ---------------------------------------------------------------------------
// Test: run
// ---------------------------------------------------------------------------

#[test]
fn run_accepts_valid_file() {
    let file = write_temp(&valid_json().to_string());
    let record = run(&config_for(None), file.path().to_str()).expect("run should succeed");
    assert_eq!(record.get("name"), Some("Ana"));
}

#[test]
fn run_flags_rejected_record_as_validation() {
    let mut value = valid_json();
    value["cpf"] = json!("123456789");
    let file = write_temp(&value.to_string());

    let err = run(&config_for(None), file.path().to_str()).unwrap_err();
    assert!(err.is_validation());
    assert_matches!(err, CliError::Core(CoreError::Validation(f)) if f.messages_for("cpf").count() == 1);
}

#[test]
fn run_uses_custom_schema() {
    let schema_file = write_temp(
        r#"[{ "name": "nickname", "required": true, "missingMessage": "nickname not provided" }]"#,
    );
    let record_file = write_temp(r#"{ "nickname": "" }"#);

    let err = run(
        &config_for(Some(schema_file.path().to_path_buf())),
        record_file.path().to_str(),
    )
    .unwrap_err();

    let failure = match err {
        CliError::Core(CoreError::Validation(failure)) => failure,
        other => panic!("expected a validation failure, got {other:?}"),
    };
    assert_eq!(
        failure.messages_for("nickname").collect::<Vec<_>>(),
        ["nickname not provided"]
    );
}

#[test]
fn bad_schema_pattern_is_not_a_validation_failure() {
    let schema_file = write_temp(r#"[{ "name": "zip", "pattern": "([0-9" }]"#);

    let err = load_schema(schema_file.path()).unwrap_err();
    assert!(!err.is_validation());
    assert_matches!(err, CliError::Core(CoreError::InvalidRule { .. }));
}
