//! Validation rule and result types.

use std::borrow::Cow;
use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Message for a format mismatch on a rule that declares none of its own.
pub const INVALID_FORMAT_MESSAGE: &str = "invalid format";

/// Message for a record key that has no rule in the schema.
pub const UNEXPECTED_FIELD_MESSAGE: &str = "unexpected field";

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Semantic kind of a field, beyond its pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Plain,
    Email,
}

/// A rule as written in a rule table, with the pattern kept as source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDefinition {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_message: Option<String>,
}

/// A compiled, immutable rule for one named field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: String,
    pub required: bool,
    pub pattern: Option<Regex>,
    pub min_length: Option<usize>,
    pub kind: FieldKind,
    pub missing_message: Option<String>,
    pub format_message: Option<String>,
}

impl FieldRule {
    /// Message reported when a required value is empty.
    pub fn missing_message(&self) -> Cow<'_, str> {
        match &self.missing_message {
            Some(msg) => Cow::Borrowed(msg),
            None => Cow::Owned(format!("{} not provided", self.name)),
        }
    }

    /// Message reported when a non-empty value has the wrong shape.
    pub fn format_message(&self) -> &str {
        self.format_message
            .as_deref()
            .unwrap_or(INVALID_FORMAT_MESSAGE)
    }
}

impl TryFrom<RuleDefinition> for FieldRule {
    type Error = CoreError;

    fn try_from(def: RuleDefinition) -> Result<Self, Self::Error> {
        if def.name.is_empty() {
            return Err(CoreError::InvalidRule {
                field: def.name,
                reason: "field name must not be empty".to_string(),
            });
        }

        let pattern = match def.pattern.as_deref() {
            Some(src) => Some(Regex::new(src).map_err(|e| CoreError::InvalidRule {
                field: def.name.clone(),
                reason: format!("invalid pattern: {e}"),
            })?),
            None => None,
        };

        Ok(Self {
            name: def.name,
            required: def.required,
            pattern,
            min_length: def.min_length,
            kind: def.kind,
            missing_message: def.missing_message,
            format_message: def.format_message,
        })
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Flat mapping of field name to raw string value.
///
/// Keys are kept sorted, so the order in which values were inserted never
/// affects validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, String>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Set a value, returning the previous one for that field.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(field.into(), value.into())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violation found in one record, in field-check order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{}", join_violations(.errors))]
pub struct ValidationFailure {
    errors: Vec<FieldValidationError>,
}

fn join_violations(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationFailure {
    /// Wrap the collected violations, or `None` when there are none.
    pub(crate) fn from_errors(errors: Vec<FieldValidationError>) -> Option<Self> {
        (!errors.is_empty()).then_some(Self { errors })
    }

    pub fn errors(&self) -> &[FieldValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldValidationError> {
        self.errors
    }

    /// Field identifiers that failed, in check order. A field appears once per message.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.field.as_str())
    }

    /// Messages attached to one field.
    pub fn messages_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> {
        self.errors
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

/// Outcome of validating a record: the untouched record, or every violation.
pub type ValidationResult = Result<Record, ValidationFailure>;
