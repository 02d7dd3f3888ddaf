//! New Jersey row tests, read through the headerless pipe layout

use super::*;
use crate::constants::fields::*;
use crate::error::{Result, VoterError};
use crate::preparer::readers::delimited_rows;
use crate::states::nj;
use chrono::NaiveDate;

const NJ_VOTER: &[(&str, &str)] = &[
    ("COUNTY", "MERCER"),
    ("VOTER ID", "000111222"),
    ("LEGACY ID", ""),
    ("LAST NAME", "GARCIA"),
    ("FIRST NAME", "LUIS"),
    ("MIDDLE NAME", ""),
    ("SUFFIX", ""),
    ("STREET NUMBER", "100"),
    ("SUFF A", ""),
    ("SUFF B", ""),
    ("STREET NAME", "MAIN ST"),
    ("APT/UNIT NO", ""),
    ("CITY", "TRENTON"),
    ("MUNICIPALITY", "TRENTON CITY"),
    ("ZIP", "08608"),
    ("DOB", "05/06/1960"),
    ("PARTY CODE", "CNV"),
    ("WARD", "2"),
    ("DISTRICT", "7"),
    ("STATUS", "A"),
    ("CONGRESSIONAL", "12"),
    ("LEGISLATIVE", "15"),
    ("FREEHOLDER", "3"),
    ("SCHOOL", ""),
    ("REGIONAL SCHOOL", "MERCER REGIONAL"),
];

/// Assemble one pipe-separated New Jersey line with the overrides applied
fn assemble_nj_line(overrides: &[(&str, &str)]) -> Result<VoterRecord> {
    let values: Vec<&str> = NJ_VOTER
        .iter()
        .map(|(column, value)| {
            overrides
                .iter()
                .find(|(name, _)| name == column)
                .map_or(*value, |(_, value)| *value)
        })
        .collect();
    let file = create_test_file(&format!("{}\n", values.join("|")));

    let rows: Vec<_> = delimited_rows(&nj::FORMAT, file.path())
        .unwrap()
        .map(|row| row.unwrap())
        .collect();
    assert_eq!(rows.len(), 1);

    let mut assembler = create_test_assembler(StateCode::Nj);
    let record = assembler.assemble(&rows[0].row, rows[0].line)?;
    assert_schema_fields(&assembler, &record);
    Ok(record)
}

#[test]
fn test_nj_layout_covers_every_column() {
    let columns: Vec<_> = NJ_VOTER.iter().map(|(column, _)| *column).collect();
    assert_eq!(columns, nj::INPUT_FIELDS);
}

#[test]
fn test_nj_pipe_row_has_every_schema_field() {
    let record = assemble_nj_line(&[]).unwrap();

    assert_eq!(text(&record, STATE_VOTER_REF), "NJ000111222");
    assert_eq!(text(&record, FIRST_NAME), "LUIS");
    assert_eq!(text(&record, RAW_ADDR1), "100 MAIN ST");
    assert_eq!(text(&record, PLACE_NAME), "TRENTON");
    assert_eq!(text(&record, STATE_NAME), "NJ");
    assert_eq!(text(&record, MAIL_STATE), "NJ");
    assert_eq!(text(&record, MAIL_COUNTRY), "USA");
    assert_eq!(text(&record, CONGRESSIONAL_DIST), "12");
    assert_eq!(text(&record, PRECINCT), "2-7");
    assert_eq!(text(&record, PRECINCT_SPLIT), "2-7");
    assert!(is_null(&record, GENDER));
    assert!(is_null(&record, REGISTRATION_DATE));
    assert_eq!(
        record.get(BIRTHDATE).and_then(FieldValue::as_date),
        NaiveDate::from_ymd_opt(1960, 5, 6)
    );
}

#[test]
fn test_nj_county_and_party_tables() {
    let record = assemble_nj_line(&[]).unwrap();
    assert_eq!(text(&record, COUNTYCODE), "21");
    assert_eq!(text(&record, PARTY), "CON");

    let record = assemble_nj_line(&[("COUNTY", "CAPE MAY"), ("PARTY CODE", "CON")]).unwrap();
    assert_eq!(text(&record, COUNTYCODE), "9");
    assert_eq!(text(&record, PARTY), "CP");

    let record = assemble_nj_line(&[("PARTY CODE", "")]).unwrap();
    assert_eq!(text(&record, PARTY), "UN");

    let err = assemble_nj_line(&[("COUNTY", "GOTHAM")]).unwrap_err();
    assert!(matches!(err, VoterError::RowFailed { line: 1, .. }));
}

#[test]
fn test_nj_legislative_and_board_districts() {
    let record = assemble_nj_line(&[]).unwrap();
    assert_eq!(text(&record, UPPER_HOUSE_DIST), "15");
    assert_eq!(text(&record, LOWER_HOUSE_DIST), "15");
    assert_eq!(text(&record, COUNTY_BOARD_DIST), "3");
    assert_eq!(text(&record, SCHOOL_BOARD_DIST), "MERCER REGIONAL");

    let record = assemble_nj_line(&[("SCHOOL", "HAMILTON")]).unwrap();
    assert_eq!(text(&record, SCHOOL_BOARD_DIST), "HAMILTON");
}
