//! `regform-core` -- validation rules for the registration form.
//!
//! Pure logic with no I/O: a schema of field rules, an evaluator that checks
//! a flat record against it, and the form state that produces such records.

pub mod error;
pub mod form;
pub mod validation;

pub use validation::evaluator::validate;
pub use validation::rules::{FieldValidationError, Record, ValidationFailure, ValidationResult};
pub use validation::schema::Schema;
