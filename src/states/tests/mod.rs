//! Tests for the state transformers
//!
//! Each state is exercised through the record assembler with small
//! hand-built rows in the state's native column layout.

pub mod nc_tests;
pub mod nj_tests;
pub mod ny_tests;
pub mod oh_tests;

// Test helper functions and fixtures
use crate::address::AddressParser;
use crate::assembler::RecordAssembler;
use crate::models::{FieldValue, RawRow, StateCode, VoterRecord};
use crate::states::{TransformerOptions, transformer_for};
use std::sync::Arc;

/// Parser backed by the built-in rule tagger
pub fn create_test_parser() -> Arc<AddressParser> {
    Arc::new(AddressParser::default())
}

/// Assembler for a state with no side data
pub fn create_test_assembler(state: StateCode) -> RecordAssembler {
    create_test_assembler_with(state, TransformerOptions::default())
}

pub fn create_test_assembler_with(state: StateCode, options: TransformerOptions) -> RecordAssembler {
    RecordAssembler::new(transformer_for(state, create_test_parser(), options))
}

/// Row from pairs, with later pairs replacing earlier ones
pub fn create_test_row(base: &[(&str, &str)], overrides: &[(&str, &str)]) -> RawRow {
    RawRow::from_pairs(base.iter().chain(overrides.iter()).copied())
}

/// Colorado row for JANE DOE at 100 MAIN ST, DENVER with no mailing address
pub fn create_test_co_row(overrides: &[(&str, &str)]) -> RawRow {
    create_test_row(
        &[
            ("VOTER_ID", "600123456"),
            ("COUNTY_CODE", "16"),
            ("FIRST_NAME", "JANE"),
            ("MIDDLE_NAME", ""),
            ("LAST_NAME", "DOE"),
            ("NAME_SUFFIX", ""),
            ("BIRTH_YEAR", "1980"),
            ("GENDER", "Female"),
            ("PARTY", "DEM"),
            ("HOUSE_NUM", "100"),
            ("HOUSE_SUFFIX", ""),
            ("PRE_DIR", ""),
            ("STREET_NAME", "MAIN"),
            ("STREET_TYPE", "ST"),
            ("POST_DIR", ""),
            ("UNIT_TYPE", ""),
            ("UNIT_NUM", ""),
            ("RESIDENTIAL_CITY", "DENVER"),
            ("RESIDENTIAL_STATE", "CO"),
            ("RESIDENTIAL_ZIP_CODE", "80202"),
            ("MAIL_ADDR1", ""),
            ("MAIL_ADDR2", ""),
            ("MAIL_ADDR3", ""),
            ("PHONE_NUM", ""),
            ("REGISTRATION_DATE", "03/15/2004"),
            ("STATUS_CODE", "Active"),
            ("CONGRESSIONAL", "Congressional 1"),
            ("STATE_SENATE", "State Senate 31"),
            ("STATE_HOUSE", "State House 6"),
            ("PRECINCT", "2163116"),
            ("SPLIT", "116"),
        ],
        overrides,
    )
}

/// Trimmed text of a field, failing the test when it is absent or blank
pub fn text<'a>(record: &'a VoterRecord, field: &str) -> &'a str {
    record
        .text(field)
        .unwrap_or_else(|| panic!("{} missing or blank in {:?}", field, record))
}

pub fn is_null(record: &VoterRecord, field: &str) -> bool {
    record.get(field) == Some(&FieldValue::Null)
}

/// Assert the record carries exactly the 65 canonical fields
pub fn assert_schema_fields(assembler: &RecordAssembler, record: &VoterRecord) {
    let keys: Vec<_> = record.keys().collect();
    assert_eq!(keys.len(), 65);
    assert_eq!(keys, assembler.schema().field_names());
}

/// Temporary input file holding the given content
pub fn create_test_file(content: &str) -> tempfile::NamedTempFile {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
