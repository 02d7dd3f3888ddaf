//! Shared building blocks for state extraction methods

use crate::address::{AddressComponents, AddressKind, AddressParser, Label, TagOutcome};
use crate::constants::fields::*;
use crate::constants::{DEFAULT_MAIL_COUNTRY, NOT_PROVIDED, estimate, fields};
use crate::error::{Result, VoterError};
use crate::models::{FieldValue, RawRow, ValidationStatus, VoterRecord};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::warn;

// =============================================================================
// Dates
// =============================================================================

/// Parse a date with a chrono format string
pub fn convert_date(value: &str, format: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), format).map_err(|source| VoterError::InvalidDate {
        value: value.to_string(),
        format: format.to_string(),
        source,
    })
}

/// Parse a date, treating a blank value as absent
pub fn convert_date_opt(value: &str, format: &str) -> Result<Option<NaiveDate>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    convert_date(value, format).map(Some)
}

/// Parse a date, treating blank and malformed values as absent
pub fn lenient_date(value: &str, format: &str) -> Option<NaiveDate> {
    convert_date(value, format).ok()
}

/// Birthdate fields for a source that only records the birth year
pub fn year_only_birthdate(year: &str) -> Result<VoterRecord> {
    let birthdate = if year.trim().is_empty() {
        None
    } else {
        Some(convert_date(&format!("{}-01-01", year.trim()), "%Y-%m-%d")?)
    };
    Ok(VoterRecord::new()
        .with(BIRTHDATE, birthdate)
        .with(BIRTHDATE_IS_ESTIMATE, estimate::ESTIMATED))
}

// =============================================================================
// Text assembly
// =============================================================================

/// Join the non-blank values of the given columns with single spaces
pub fn construct_val(row: &RawRow, columns: &[&str]) -> String {
    join_values(columns.iter().map(|column| row.get(column)))
}

/// Join non-blank values with single spaces
pub fn join_values<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    values
        .into_iter()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text after the first `count` characters, as in "Congressional 07" -> "07"
pub fn skip_chars(text: &str, count: usize) -> String {
    text.chars().skip(count).collect()
}

/// First run of digits not starting with zero, as in "Congressional 07" -> "7"
pub fn first_district_number(text: &str) -> Option<String> {
    static DISTRICT_NUMBER: OnceLock<Regex> = OnceLock::new();
    let regex = DISTRICT_NUMBER
        .get_or_init(|| Regex::new(r"[1-9]\d*").expect("district number regex compiles"));
    regex.find(text).map(|m| m.as_str().to_string())
}

// =============================================================================
// Residential address
// =============================================================================

/// All structured residential fields set to null
pub fn empty_residential_address() -> VoterRecord {
    fields::STRUCTURED_ADDRESS
        .iter()
        .map(|field| (*field, FieldValue::Null))
        .collect()
}

/// Structured residential fields from tagged components; absent labels are null
pub fn convert_components(components: &AddressComponents) -> VoterRecord {
    let mut record = empty_residential_address();
    for (label, value) in components.iter() {
        if let Some(field) = label.field() {
            record.insert(field, value);
        }
    }
    record
}

fn raw_or_placeholder(value: &str) -> FieldValue {
    if value.trim().is_empty() {
        NOT_PROVIDED.into()
    } else {
        value.trim().into()
    }
}

/// Builder for the residential address of one row.
///
/// The address text is tagged; on success the structured fields come from
/// the tagger and VALIDATION_STATUS is "2", otherwise the structured fields
/// are null and VALIDATION_STATUS is "1". The RAW_* fields are written in
/// both cases, with a placeholder for blank required values.
#[derive(Debug, Clone)]
pub struct ResidentialAddress {
    text: String,
    raw_addr1: String,
    raw_addr2: FieldValue,
    raw_city: String,
    raw_zip: String,
    place_name: Option<FieldValue>,
    state_name: Option<FieldValue>,
    zip_code: Option<FieldValue>,
}

impl ResidentialAddress {
    /// Start from the address text to tag, which is also the default RAW_ADDR1
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            raw_addr1: text.clone(),
            text,
            raw_addr2: FieldValue::Null,
            raw_city: String::new(),
            raw_zip: String::new(),
            place_name: None,
            state_name: None,
            zip_code: None,
        }
    }

    pub fn raw_addr1(mut self, value: impl Into<String>) -> Self {
        self.raw_addr1 = value.into();
        self
    }

    pub fn raw_addr2(mut self, value: impl Into<FieldValue>) -> Self {
        self.raw_addr2 = value.into();
        self
    }

    pub fn raw_city(mut self, value: impl Into<String>) -> Self {
        self.raw_city = value.into();
        self
    }

    pub fn raw_zip(mut self, value: impl Into<String>) -> Self {
        self.raw_zip = value.into();
        self
    }

    /// PLACE_NAME written over the tagger's value on success
    pub fn place_name(mut self, value: impl Into<FieldValue>) -> Self {
        self.place_name = Some(value.into());
        self
    }

    /// STATE_NAME, written on both tracks
    pub fn state_name(mut self, value: impl Into<FieldValue>) -> Self {
        self.state_name = Some(value.into());
        self
    }

    /// ZIP_CODE written over the tagger's value on success
    pub fn zip_code(mut self, value: impl Into<FieldValue>) -> Self {
        self.zip_code = Some(value.into());
        self
    }

    pub fn build(self, parser: &AddressParser) -> VoterRecord {
        let mut record = match parser.tag(&self.text) {
            TagOutcome::Parsed { components, .. } => {
                let mut record = convert_components(&components);
                for (field, value) in [
                    (PLACE_NAME, self.place_name),
                    (ZIP_CODE, self.zip_code),
                    (STATE_NAME, self.state_name),
                ] {
                    if let Some(value) = value {
                        record.insert(field, value);
                    }
                }
                record.insert(VALIDATION_STATUS, ValidationStatus::Parsed);
                record
            }
            TagOutcome::Unparsable => {
                let mut record = empty_residential_address();
                record.insert(STATE_NAME, self.state_name.unwrap_or(FieldValue::Null));
                record.insert(VALIDATION_STATUS, ValidationStatus::Unparsable);
                record
            }
        };

        record.insert(RAW_ADDR1, raw_or_placeholder(&self.raw_addr1));
        record.insert(RAW_ADDR2, self.raw_addr2);
        record.insert(RAW_CITY, raw_or_placeholder(&self.raw_city));
        record.insert(RAW_ZIP, raw_or_placeholder(&self.raw_zip));
        record
    }
}

// =============================================================================
// Mailing address
// =============================================================================

/// Mailing fields from free mailing text run through the tagger.
///
/// Blank text, a repeated label, an ambiguous result or no components give an
/// empty fragment, leaving the mailing address to the residential backfill.
pub fn tagged_mailing(parser: &AddressParser, text: &str, country: &str) -> VoterRecord {
    if text.trim().is_empty() {
        return VoterRecord::new();
    }
    let (components, kind) = match parser.tag_raw(text) {
        Ok(tagged) => tagged,
        Err(e) => {
            warn!("Mailing address not usable, using residence: {}", e);
            return VoterRecord::new();
        }
    };
    if components.is_empty() || kind == AddressKind::Ambiguous {
        warn!("Mailing address '{}' is ambiguous, using residence", text.trim());
        return VoterRecord::new();
    }

    let component = |label: Label| FieldValue::from(components.get(label));
    VoterRecord::new()
        .with(
            MAIL_ADDRESS_LINE1,
            AddressParser::construct_mail_address_1(&components, kind),
        )
        .with(
            MAIL_ADDRESS_LINE2,
            AddressParser::construct_mail_address_2(&components),
        )
        .with(MAIL_CITY, component(Label::PlaceName))
        .with(MAIL_STATE, component(Label::StateName))
        .with(MAIL_ZIP_CODE, component(Label::ZipCode))
        .with(MAIL_COUNTRY, country)
}

/// Mailing fields copied from pre-split source columns.
///
/// Line 1 and city are both required; without them the fragment is empty.
#[derive(Debug, Clone, Copy)]
pub struct MailingColumns {
    pub line1: &'static str,
    pub line2: &'static [&'static str],
    pub city: &'static str,
    pub state: &'static str,
    pub zip: &'static str,
    pub country: Option<&'static str>,
}

impl MailingColumns {
    pub fn extract(&self, row: &RawRow) -> VoterRecord {
        let (Some(line1), Some(city)) = (row.opt(self.line1), row.opt(self.city)) else {
            return VoterRecord::new();
        };
        let country = self
            .country
            .and_then(|column| row.opt(column))
            .unwrap_or(DEFAULT_MAIL_COUNTRY);

        VoterRecord::new()
            .with(MAIL_ADDRESS_LINE1, line1)
            .with(MAIL_ADDRESS_LINE2, construct_val(row, self.line2))
            .with(MAIL_CITY, city)
            .with(MAIL_STATE, row.get(self.state).trim())
            .with(MAIL_ZIP_CODE, row.get(self.zip).trim())
            .with(MAIL_COUNTRY, country)
    }
}

// =============================================================================
// Code tables
// =============================================================================

/// A named code translation table
#[derive(Debug, Clone)]
pub struct CodeTable {
    name: &'static str,
    entries: HashMap<&'static str, &'static str>,
}

impl CodeTable {
    pub fn new(name: &'static str, pairs: &[(&'static str, &'static str)]) -> Self {
        Self {
            name,
            entries: pairs.iter().copied().collect(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self, code: &str) -> Option<&'static str> {
        self.entries.get(code.trim()).copied()
    }

    /// Translate a code; an unknown code is an error
    pub fn lookup(&self, code: &str) -> Result<&'static str> {
        self.get(code)
            .ok_or_else(|| VoterError::unmapped_code(self.name, code.trim()))
    }

    /// Translate a code, falling back to a default
    pub fn lookup_or(&self, code: &str, default: &'static str) -> &'static str {
        self.get(code).unwrap_or(default)
    }

    /// Translate a code, keeping unknown codes as given
    pub fn passthrough(&self, code: &str) -> String {
        self.get(code)
            .map(str::to_string)
            .unwrap_or_else(|| code.trim().to_string())
    }

    /// Translate a code to a field value; unknown codes become null
    pub fn get_or_null(&self, code: &str) -> FieldValue {
        self.get(code).into()
    }
}
