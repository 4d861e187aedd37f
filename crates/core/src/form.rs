//! Registration form state.
//!
//! One struct holds every editable value. The validator never sees it
//! directly, only a [`Record`] snapshot taken at submit time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validation::evaluator;
use crate::validation::rules::{Record, ValidationResult};
use crate::validation::schema::{BIRTH_DATE, CELLPHONE, CPF, EMAIL, NAME, SEX};

/// Options offered by the form's sex selector.
///
/// The validator only checks that the snapshot value is non-empty, so any
/// string passes there; this enum is the form's own constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Masculino,
    Feminino,
    Outro,
    /// Placeholder before the user picks an option.
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl Sex {
    pub const OPTIONS: [Sex; 3] = [Sex::Masculino, Sex::Feminino, Sex::Outro];

    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Masculino => "Masculino",
            Sex::Feminino => "Feminino",
            Sex::Outro => "Outro",
            Sex::Unset => "",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sex option: {0:?}")]
pub struct ParseSexError(String);

impl FromStr for Sex {
    type Err = ParseSexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Masculino" => Ok(Sex::Masculino),
            "Feminino" => Ok(Sex::Feminino),
            "Outro" => Ok(Sex::Outro),
            "" => Ok(Sex::Unset),
            other => Err(ParseSexError(other.to_string())),
        }
    }
}

/// Editable values of one registration, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub cellphone: String,
    pub sex: Sex,
    pub birth_date: String,
}

impl RegistrationForm {
    /// Snapshot the current values under their field identifiers.
    pub fn to_record(&self) -> Record {
        Record::from([
            (NAME, self.name.as_str()),
            (EMAIL, self.email.as_str()),
            (CPF, self.cpf.as_str()),
            (CELLPHONE, self.cellphone.as_str()),
            (SEX, self.sex.as_str()),
            (BIRTH_DATE, self.birth_date.as_str()),
        ])
    }

    /// Snapshot and validate against the registration schema.
    pub fn validate(&self) -> ValidationResult {
        evaluator::validate(&self.to_record())
    }
}
