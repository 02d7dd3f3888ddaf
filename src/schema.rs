//! Canonical output schema and record validation.
//!
//! The schema maps every canonical field to its allowed value types and holds
//! the enumerated vocabularies for PARTY, GENDER, RACE and VALIDATION_STATUS.
//! A state may relax required fields to nullable and add party codes through
//! its [`StateFormat`].

use crate::config::StateFormat;
use crate::constants::fields::*;
use crate::constants::{gender, party, race, validation_status};
use crate::error::{Result, ViolationKind, VoterError};
use crate::extract::ExtractionRole;
use crate::models::{FieldValue, ValueType, VoterRecord};
use std::collections::BTreeMap;

/// Fields that must hold a non-blank string
const REQUIRED_STRINGS: &[&str] = &[
    FIRST_NAME,
    LAST_NAME,
    BIRTHDATE_IS_ESTIMATE,
    STATE_NAME,
    COUNTYCODE,
    STATE_VOTER_REF,
    REGISTRATION_STATUS,
    CONGRESSIONAL_DIST,
    PRECINCT,
    PRECINCT_SPLIT,
    RAW_ADDR1,
    RAW_CITY,
    RAW_ZIP,
    VALIDATION_STATUS,
];

/// Fields holding a date or null
const DATES: &[&str] = &[BIRTHDATE, REGISTRATION_DATE];

/// The canonical record contract
#[derive(Debug, Clone)]
pub struct OutputSchema {
    types: BTreeMap<&'static str, Vec<ValueType>>,
    vocabularies: BTreeMap<&'static str, Vec<&'static str>>,
}

impl Default for OutputSchema {
    fn default() -> Self {
        Self::canonical()
    }
}

impl OutputSchema {
    /// The base schema shared by every state
    pub fn canonical() -> Self {
        let types = ExtractionRole::ALL
            .iter()
            .flat_map(|role| role.fields().iter().copied())
            .map(|field| {
                let allowed = if REQUIRED_STRINGS.contains(&field) {
                    vec![ValueType::Str]
                } else if DATES.contains(&field) {
                    vec![ValueType::Date, ValueType::Null]
                } else {
                    vec![ValueType::Str, ValueType::Null]
                };
                (field, allowed)
            })
            .collect();

        let vocabularies = BTreeMap::from([
            (PARTY, party::VOCABULARY.to_vec()),
            (GENDER, gender::VOCABULARY.to_vec()),
            (RACE, race::VOCABULARY.to_vec()),
            (VALIDATION_STATUS, validation_status::VOCABULARY.to_vec()),
        ]);

        Self {
            types,
            vocabularies,
        }
    }

    /// Base schema with a state's overrides applied
    pub fn for_format(format: &StateFormat) -> Self {
        let mut schema = Self::canonical();
        for field in format.nullable_fields {
            schema.allow_null(field);
        }
        schema.extend_vocabulary(PARTY, format.extra_parties);
        schema
    }

    pub fn allow_null(&mut self, field: &str) {
        if let Some(allowed) = self.types.get_mut(field) {
            if !allowed.contains(&ValueType::Null) {
                allowed.push(ValueType::Null);
            }
        }
    }

    pub fn extend_vocabulary(&mut self, field: &str, values: &[&'static str]) {
        if let Some(vocabulary) = self.vocabularies.get_mut(field) {
            for value in values {
                if !vocabulary.contains(value) {
                    vocabulary.push(value);
                }
            }
        }
    }

    /// Field names in sorted order, as written in the CSV header
    pub fn field_names(&self) -> Vec<&'static str> {
        self.types.keys().copied().collect()
    }

    pub fn allows_null(&self, field: &str) -> bool {
        self.types
            .get(field)
            .is_some_and(|allowed| allowed.contains(&ValueType::Null))
    }

    pub fn vocabulary(&self, field: &str) -> Option<&[&'static str]> {
        self.vocabularies.get(field).map(Vec::as_slice)
    }

    /// Check a fully assembled record.
    ///
    /// String values are trimmed in place first. Key set, types and
    /// vocabularies are checked in that order; every violation of the first
    /// failing category is reported together.
    pub fn validate(&self, record: &mut VoterRecord) -> Result<()> {
        self.check_keys(record)?;

        for value in record.values_mut() {
            if let FieldValue::Str(text) = value {
                let trimmed = text.trim();
                if trimmed.len() != text.len() {
                    *text = trimmed.to_string();
                }
            }
        }

        self.check_types(record)?;
        self.check_vocabularies(record)
    }

    fn check_keys(&self, record: &VoterRecord) -> Result<()> {
        let missing: Vec<_> = self
            .types
            .keys()
            .filter(|field| !record.contains(field))
            .copied()
            .collect();
        let extra: Vec<_> = record
            .keys()
            .filter(|field| !self.types.contains_key(field))
            .collect();

        if missing.is_empty() && extra.is_empty() {
            return Ok(());
        }

        let mut lines = Vec::new();
        if !missing.is_empty() {
            lines.push(format!("Missing fields: {}", missing.join(", ")));
        }
        if !extra.is_empty() {
            lines.push(format!("Extra fields: {}", extra.join(", ")));
        }
        Err(VoterError::schema_violation(
            ViolationKind::KeySet,
            lines.join("\n"),
        ))
    }

    fn check_types(&self, record: &VoterRecord) -> Result<()> {
        let mut errors: Vec<String> = record
            .iter()
            .filter_map(|(field, value)| {
                let allowed = self.types.get(field)?;
                let actual = value.value_type();
                (!allowed.contains(&actual)).then(|| {
                    let expected: Vec<_> = allowed.iter().map(ValueType::to_string).collect();
                    format!(
                        "Column {} has type {}, expected {}",
                        field,
                        actual,
                        expected.join("|")
                    )
                })
            })
            .collect();

        if errors.is_empty() {
            return Ok(());
        }
        errors.sort();
        Err(VoterError::schema_violation(
            ViolationKind::Type,
            errors.join("\n"),
        ))
    }

    fn check_vocabularies(&self, record: &VoterRecord) -> Result<()> {
        let mut errors: Vec<String> = self
            .vocabularies
            .iter()
            .filter_map(|(field, vocabulary)| {
                let value = record.get(field)?;
                if value.is_null() {
                    return None;
                }
                // An emptied string is still checked
                let text = value.as_str().unwrap_or_default();
                (!vocabulary.contains(&text))
                    .then(|| format!("Column {} has invalid value '{}'", field, value))
            })
            .collect();

        if errors.is_empty() {
            return Ok(());
        }
        errors.sort();
        Err(VoterError::schema_violation(
            ViolationKind::Value,
            errors.join("\n"),
        ))
    }
}
