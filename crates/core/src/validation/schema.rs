//! Field schema registry.
//!
//! The registration form's rules are declared once as data and compiled on
//! first use. Other rule tables can be compiled from definitions or JSON.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::rules::{FieldKind, FieldRule, RuleDefinition};
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Field identifiers
// ---------------------------------------------------------------------------

pub const NAME: &str = "name";
pub const EMAIL: &str = "email";
pub const CPF: &str = "cpf";
pub const CELLPHONE: &str = "cellphone";
pub const SEX: &str = "sex";
pub const BIRTH_DATE: &str = "birthDate";

/// Registration fields in check order.
pub const REGISTRATION_FIELDS: [&str; 6] = [NAME, EMAIL, CPF, CELLPHONE, SEX, BIRTH_DATE];

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// National ID, `NNN.NNN.NNN-NN`.
pub const CPF_PATTERN: &str = r"^[0-9]{3}\.[0-9]{3}\.[0-9]{3}-[0-9]{2}$";

/// Mobile number, `(NN) NNNNN-NNNN`.
pub const CELLPHONE_PATTERN: &str = r"^\([0-9]{2}\) [0-9]{5}-[0-9]{4}$";

/// Birth date, `DD/MM/YYYY`. Shape only, never parsed as a date.
pub const BIRTH_DATE_PATTERN: &str = r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$";

/// Email shape: ASCII local part not ending in `.` or `'`, dotted domain,
/// alphabetic TLD of two or more letters.
///
/// A leading dot and consecutive dots are rejected by [`is_email`], since the
/// `regex` crate has no lookahead.
pub const EMAIL_PATTERN: &str =
    r"(?i-u)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Whether `value` has the shape of an email address.
pub fn is_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_RE.is_match(value)
}

static REGISTRATION: LazyLock<Schema> = LazyLock::new(|| {
    Schema::from_definitions(registration_definitions()).expect("valid registration rules")
});

/// The registration form's rule table.
pub fn registration_definitions() -> Vec<RuleDefinition> {
    vec![
        rule(NAME, true, None, FieldKind::Plain, Some("name not provided"), None),
        rule(
            EMAIL,
            true,
            None,
            FieldKind::Email,
            Some("email not provided"),
            Some("invalid email"),
        ),
        rule(CPF, true, Some(CPF_PATTERN), FieldKind::Plain, Some("id not provided"), None),
        rule(
            CELLPHONE,
            true,
            Some(CELLPHONE_PATTERN),
            FieldKind::Plain,
            Some("phone not provided"),
            None,
        ),
        rule(SEX, true, None, FieldKind::Plain, Some("sex not provided"), None),
        rule(BIRTH_DATE, false, Some(BIRTH_DATE_PATTERN), FieldKind::Plain, None, None),
    ]
}

fn rule(
    name: &str,
    required: bool,
    pattern: Option<&str>,
    kind: FieldKind,
    missing_message: Option<&str>,
    format_message: Option<&str>,
) -> RuleDefinition {
    RuleDefinition {
        name: name.to_string(),
        required,
        pattern: pattern.map(str::to_string),
        min_length: None,
        kind,
        missing_message: missing_message.map(str::to_string),
        format_message: format_message.map(str::to_string),
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Ordered, compiled set of field rules. Declaration order is check order.
#[derive(Debug, Clone)]
pub struct Schema {
    rules: Vec<FieldRule>,
}

impl Schema {
    /// Compile a rule table. Fails on a bad pattern or a repeated field name.
    pub fn from_definitions<I>(definitions: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = RuleDefinition>,
    {
        let mut seen = HashSet::new();
        let mut rules = Vec::new();

        for def in definitions {
            if !seen.insert(def.name.clone()) {
                return Err(CoreError::InvalidRule {
                    field: def.name,
                    reason: "field declared more than once".to_string(),
                });
            }
            rules.push(FieldRule::try_from(def)?);
        }

        Ok(Self { rules })
    }

    /// Compile a rule table from a JSON array of rule definitions.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let definitions: Vec<RuleDefinition> = serde_json::from_str(json)?;
        Self::from_definitions(definitions)
    }

    /// The registration form's schema, compiled once and shared.
    pub fn registration() -> &'static Schema {
        &REGISTRATION
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn rule(&self, field: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.name == field)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }
}
