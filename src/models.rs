//! Core data structures for voter record normalization.
//!
//! Defines the canonical record value model, the raw input row handed over by
//! a state preparer, the supported state codes and the address validation
//! status carried on every output record.

use crate::constants::validation_status;
use crate::error::{Result, VoterError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Runtime type of a canonical field value, as seen by the schema validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueType {
    Str,
    Date,
    Null,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValueType::Str => "str",
            ValueType::Date => "date",
            ValueType::Null => "null",
        };
        f.write_str(label)
    }
}

/// A single value in a canonical voter record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Str(String),
    Date(NaiveDate),
    Null,
}

impl FieldValue {
    /// String value, or null when the text is blank
    pub fn non_blank(text: &str) -> Self {
        if text.trim().is_empty() {
            FieldValue::Null
        } else {
            FieldValue::Str(text.to_string())
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// True for nulls and for strings holding only whitespace
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Str(s) => s.trim().is_empty(),
            FieldValue::Date(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Type used for schema checks; an all-whitespace string counts as null
    pub fn value_type(&self) -> ValueType {
        match self {
            FieldValue::Str(s) if s.trim().is_empty() => ValueType::Null,
            FieldValue::Str(_) => ValueType::Str,
            FieldValue::Date(_) => ValueType::Date,
            FieldValue::Null => ValueType::Null,
        }
    }

    /// Cell text written to CSV output
    pub fn to_csv_cell(&self) -> String {
        match self {
            FieldValue::Str(s) => s.clone(),
            FieldValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            FieldValue::Null => String::new(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("None"),
            other => f.write_str(&other.to_csv_cell()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// A canonical voter record, or a fragment of one produced by a single extraction.
///
/// Keys are canonical field names from [`crate::constants::fields`]. The map
/// is ordered so iteration follows the sorted CSV header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoterRecord {
    values: BTreeMap<&'static str, FieldValue>,
}

impl VoterRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any earlier value
    pub fn insert(&mut self, field: &'static str, value: impl Into<FieldValue>) {
        self.values.insert(field, value.into());
    }

    /// Builder form of [`VoterRecord::insert`]
    pub fn with(mut self, field: &'static str, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn set_null(&mut self, field: &'static str) {
        self.values.insert(field, FieldValue::Null);
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Trimmed string value of a field, if present and not blank
    pub fn text(&self, field: &str) -> Option<&str> {
        self.values
            .get(field)
            .and_then(FieldValue::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.values.remove(field)
    }

    /// Merge another fragment into this record; later values win
    pub fn extend(&mut self, other: VoterRecord) {
        self.values.extend(other.values);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut FieldValue> {
        self.values.values_mut()
    }
}

impl FromIterator<(&'static str, FieldValue)> for VoterRecord {
    fn from_iter<I: IntoIterator<Item = (&'static str, FieldValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// One raw input row, keyed by the state's native column names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    columns: HashMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from column/value pairs
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            columns: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.columns.insert(column.into(), value.into());
    }

    /// Raw value of a column; a column the source did not supply reads as empty
    pub fn get(&self, column: &str) -> &str {
        self.columns.get(column).map(String::as_str).unwrap_or("")
    }

    /// Trimmed value of a column, if present and not blank
    pub fn opt(&self, column: &str) -> Option<&str> {
        self.columns
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl fmt::Display for RawRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<_> = self.columns.iter().collect();
        pairs.sort();
        f.write_str("{")?;
        for (i, (k, v)) in pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{}': '{}'", k, v)?;
        }
        f.write_str("}")
    }
}

/// Data-quality marker for the residential address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValidationStatus {
    Unparsable,
    Parsed,
    ManualOverride,
    Validated,
    Rejected,
}

impl ValidationStatus {
    pub const ALL: [ValidationStatus; 5] = [
        ValidationStatus::Unparsable,
        ValidationStatus::Parsed,
        ValidationStatus::ManualOverride,
        ValidationStatus::Validated,
        ValidationStatus::Rejected,
    ];

    /// Code written to the VALIDATION_STATUS column
    pub fn code(&self) -> &'static str {
        match self {
            ValidationStatus::Unparsable => validation_status::UNPARSABLE,
            ValidationStatus::Parsed => validation_status::PARSED,
            ValidationStatus::ManualOverride => validation_status::MANUAL_OVERRIDE,
            ValidationStatus::Validated => validation_status::VALIDATED,
            ValidationStatus::Rejected => validation_status::REJECTED,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code.trim())
    }
}

impl From<ValidationStatus> for FieldValue {
    fn from(value: ValidationStatus) -> Self {
        FieldValue::Str(value.code().to_string())
    }
}

/// States with a transformer implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StateCode {
    Co,
    De,
    Fl,
    Mi,
    Nc,
    Nj,
    Ny,
    Oh,
    Ok,
    Pa,
    Ut,
    Vt,
    Wa,
}

impl StateCode {
    pub const ALL: [StateCode; 13] = [
        StateCode::Co,
        StateCode::De,
        StateCode::Fl,
        StateCode::Mi,
        StateCode::Nc,
        StateCode::Nj,
        StateCode::Ny,
        StateCode::Oh,
        StateCode::Ok,
        StateCode::Pa,
        StateCode::Ut,
        StateCode::Vt,
        StateCode::Wa,
    ];

    /// Postal abbreviation, upper case
    pub fn abbreviation(&self) -> &'static str {
        match self {
            StateCode::Co => "CO",
            StateCode::De => "DE",
            StateCode::Fl => "FL",
            StateCode::Mi => "MI",
            StateCode::Nc => "NC",
            StateCode::Nj => "NJ",
            StateCode::Ny => "NY",
            StateCode::Oh => "OH",
            StateCode::Ok => "OK",
            StateCode::Pa => "PA",
            StateCode::Ut => "UT",
            StateCode::Vt => "VT",
            StateCode::Wa => "WA",
        }
    }

    /// Directory name used under the data directory
    pub fn dir_name(&self) -> String {
        self.abbreviation().to_lowercase()
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            StateCode::Co => "Colorado",
            StateCode::De => "Delaware",
            StateCode::Fl => "Florida",
            StateCode::Mi => "Michigan",
            StateCode::Nc => "North Carolina",
            StateCode::Nj => "New Jersey",
            StateCode::Ny => "New York",
            StateCode::Oh => "Ohio",
            StateCode::Ok => "Oklahoma",
            StateCode::Pa => "Pennsylvania",
            StateCode::Ut => "Utah",
            StateCode::Vt => "Vermont",
            StateCode::Wa => "Washington",
        }
    }

    /// Parse a comma-separated state list such as `co,fl,pa`
    pub fn parse_list(list: &str) -> Result<Vec<StateCode>> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(StateCode::from_str)
            .collect()
    }
}

impl FromStr for StateCode {
    type Err = VoterError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_uppercase();
        StateCode::ALL
            .into_iter()
            .find(|state| state.abbreviation() == wanted)
            .ok_or_else(|| VoterError::UnknownState {
                code: s.trim().to_string(),
            })
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_string_counts_as_null() {
        assert_eq!(FieldValue::from("   ").value_type(), ValueType::Null);
        assert_eq!(FieldValue::from("X").value_type(), ValueType::Str);
        assert_eq!(FieldValue::non_blank(""), FieldValue::Null);

        let date = NaiveDate::from_ymd_opt(1980, 1, 1).unwrap();
        assert_eq!(FieldValue::from(date).value_type(), ValueType::Date);
        assert_eq!(FieldValue::from(date).to_csv_cell(), "1980-01-01");
        assert_eq!(FieldValue::from(None::<String>), FieldValue::Null);
    }

    #[test]
    fn test_record_extend_later_values_win() {
        let mut record = VoterRecord::new().with("PARTY", "DEM").with("GENDER", "F");
        record.extend(VoterRecord::new().with("PARTY", "REP"));

        assert_eq!(record.text("PARTY"), Some("REP"));
        assert_eq!(record.len(), 2);
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["GENDER", "PARTY"]);
    }

    #[test]
    fn test_raw_row_missing_column_reads_empty() {
        let row = RawRow::from_pairs([("VOTER_ID", " 123 "), ("BLANK", "  ")]);

        assert_eq!(row.get("VOTER_ID"), " 123 ");
        assert_eq!(row.opt("VOTER_ID"), Some("123"));
        assert_eq!(row.get("ABSENT"), "");
        assert_eq!(row.opt("BLANK"), None);
        assert_eq!(row.to_string(), "{'BLANK': '  ', 'VOTER_ID': ' 123 '}");
    }

    #[test]
    fn test_validation_status_codes() {
        assert_eq!(ValidationStatus::Unparsable.code(), "1");
        assert_eq!(ValidationStatus::from_code("2"), Some(ValidationStatus::Parsed));
        assert_eq!(ValidationStatus::from_code("9"), None);
    }

    #[test]
    fn test_state_code_parsing() {
        assert_eq!("co".parse::<StateCode>().unwrap(), StateCode::Co);
        assert_eq!(
            StateCode::parse_list("pa, WA,").unwrap(),
            vec![StateCode::Pa, StateCode::Wa]
        );
        assert!(matches!(
            "zz".parse::<StateCode>(),
            Err(VoterError::UnknownState { .. })
        ));
        assert_eq!(StateCode::Nc.dir_name(), "nc");
    }
}
