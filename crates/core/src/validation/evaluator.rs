//! Record evaluator -- pure logic, no I/O.

use super::rules::{
    FieldKind, FieldRule, FieldValidationError, Record, ValidationFailure, ValidationResult,
    UNEXPECTED_FIELD_MESSAGE,
};
use super::schema::{self, Schema};

/// Validate a record against the registration schema.
pub fn validate(record: &Record) -> ValidationResult {
    Schema::registration().validate(record)
}

impl Schema {
    /// Check every declared field, then flag keys the schema does not know.
    ///
    /// A missing key reads as the empty string. On success the record is
    /// returned exactly as given.
    pub fn validate(&self, record: &Record) -> ValidationResult {
        let mut errors: Vec<FieldValidationError> = self
            .rules()
            .iter()
            .filter_map(|rule| evaluate_rule(rule, record.get(&rule.name).unwrap_or_default()))
            .collect();

        errors.extend(
            record
                .fields()
                .filter(|(field, _)| self.rule(field).is_none())
                .map(|(field, _)| FieldValidationError::new(field, UNEXPECTED_FIELD_MESSAGE)),
        );

        match ValidationFailure::from_errors(errors) {
            Some(failure) => Err(failure),
            None => Ok(record.clone()),
        }
    }
}

fn evaluate_rule(rule: &FieldRule, value: &str) -> Option<FieldValidationError> {
    // An empty required value reports only its missing message.
    if rule.required && value.is_empty() {
        return Some(FieldValidationError::new(
            &rule.name,
            rule.missing_message(),
        ));
    }

    let too_short = rule
        .min_length
        .is_some_and(|min| value.chars().count() < min);
    let bad_email = rule.kind == FieldKind::Email && !schema::is_email(value);
    let bad_pattern = rule.pattern.as_ref().is_some_and(|re| !re.is_match(value));

    if too_short || bad_email || bad_pattern {
        Some(FieldValidationError::new(&rule.name, rule.format_message()))
    } else {
        None
    }
}
