//! Ohio row tests

use super::*;
use crate::constants::fields::*;
use crate::error::VoterError;
use chrono::NaiveDate;

fn create_test_oh_row(overrides: &[(&str, &str)]) -> RawRow {
    create_test_row(
        &[
            ("SOS_VOTERID", "OH0012345678"),
            ("COUNTY_NUMBER", "25"),
            ("COUNTY_ID", "998877"),
            ("LAST_NAME", "OLSEN"),
            ("FIRST_NAME", "KIM"),
            ("MIDDLE_NAME", ""),
            ("SUFFIX", ""),
            ("DATE_OF_BIRTH", "09/30/1985"),
            ("REGISTRATION_DATE", "10/01/2003"),
            ("VOTER_STATUS", "ACTIVE"),
            ("PARTY_AFFILIATION", "D"),
            ("RESIDENTIAL_ADDRESS1", "100 MAIN ST"),
            ("RESIDENTIAL_SECONDARY_ADDR", ""),
            ("RESIDENTIAL_CITY", "COLUMBUS"),
            ("RESIDENTIAL_STATE", "OH"),
            ("RESIDENTIAL_ZIP", "43215"),
            ("MAILING_ADDRESS1", ""),
            ("MAILING_SECONDARY_ADDRESS", ""),
            ("MAILING_CITY", ""),
            ("MAILING_STATE", ""),
            ("MAILING_ZIP", ""),
            ("MAILING_COUNTRY", ""),
            ("PRECINCT_CODE", "25-ABC"),
            ("CONGRESSIONAL_DISTRICT", "03"),
            ("STATE_REPRESENTATIVE_DISTRICT", "18"),
            ("STATE_SENATE_DISTRICT", "15"),
            ("CITY_SCHOOL_DISTRICT", ""),
            ("EXEMPTED_VILL_SCHOOL_DISTRICT", ""),
            ("LOCAL_SCHOOL_DISTRICT", ""),
        ],
        overrides,
    )
}

#[test]
fn test_oh_row_has_every_schema_field() {
    let mut assembler = create_test_assembler(StateCode::Oh);
    let record = assembler.assemble(&create_test_oh_row(&[]), 2).unwrap();

    assert_schema_fields(&assembler, &record);
    assert_eq!(text(&record, STATE_VOTER_REF), "OH0012345678");
    assert_eq!(text(&record, COUNTY_VOTER_REF), "998877");
    assert_eq!(text(&record, COUNTYCODE), "25");
    assert_eq!(text(&record, REGISTRATION_STATUS), "ACTIVE");
    assert_eq!(text(&record, PARTY), "DEM");
    assert_eq!(text(&record, CONGRESSIONAL_DIST), "03");
    assert_eq!(text(&record, UPPER_HOUSE_DIST), "15");
    assert_eq!(text(&record, LOWER_HOUSE_DIST), "18");
    assert_eq!(text(&record, PRECINCT), "25-ABC");
    assert_eq!(text(&record, PRECINCT_SPLIT), "25-ABC");
    assert_eq!(text(&record, PLACE_NAME), "COLUMBUS");
    assert_eq!(text(&record, STATE_NAME), "OH");
    assert!(is_null(&record, GENDER));
    assert!(is_null(&record, COUNTY_BOARD_DIST));
    assert!(is_null(&record, SCHOOL_BOARD_DIST));
    assert_eq!(
        record.get(REGISTRATION_DATE).and_then(FieldValue::as_date),
        NaiveDate::from_ymd_opt(2003, 10, 1)
    );
    assert_eq!(text(&record, BIRTHDATE_IS_ESTIMATE), "N");
    assert_eq!(text(&record, MAIL_ADDRESS_LINE1), "100 MAIN ST");
}

#[test]
fn test_oh_school_district_precedence() {
    let mut assembler = create_test_assembler(StateCode::Oh);

    let row = create_test_oh_row(&[
        ("EXEMPTED_VILL_SCHOOL_DISTRICT", "WORTHINGTON EVSD"),
        ("LOCAL_SCHOOL_DISTRICT", "HAMILTON LSD"),
    ]);
    let record = assembler.assemble(&row, 2).unwrap();
    assert_eq!(text(&record, SCHOOL_BOARD_DIST), "WORTHINGTON EVSD");

    let row = create_test_oh_row(&[
        ("CITY_SCHOOL_DISTRICT", "COLUMBUS CSD"),
        ("LOCAL_SCHOOL_DISTRICT", "HAMILTON LSD"),
    ]);
    let record = assembler.assemble(&row, 3).unwrap();
    assert_eq!(text(&record, SCHOOL_BOARD_DIST), "COLUMBUS CSD");
}

#[test]
fn test_oh_mailing_columns_are_copied() {
    let mut assembler = create_test_assembler(StateCode::Oh);
    let row = create_test_oh_row(&[
        ("MAILING_ADDRESS1", "PO BOX 7"),
        ("MAILING_CITY", "DUBLIN"),
        ("MAILING_STATE", "OH"),
        ("MAILING_ZIP", "43017"),
    ]);

    let record = assembler.assemble(&row, 2).unwrap();

    assert_eq!(text(&record, MAIL_ADDRESS_LINE1), "PO BOX 7");
    assert_eq!(text(&record, MAIL_CITY), "DUBLIN");
    assert_eq!(text(&record, MAIL_ZIP_CODE), "43017");
    assert_eq!(text(&record, MAIL_COUNTRY), "USA");
}

#[test]
fn test_oh_party_codes() {
    let mut assembler = create_test_assembler(StateCode::Oh);

    let record = assembler
        .assemble(&create_test_oh_row(&[("PARTY_AFFILIATION", "")]), 2)
        .unwrap();
    assert_eq!(text(&record, PARTY), "UN");

    let err = assembler
        .assemble(&create_test_oh_row(&[("PARTY_AFFILIATION", "X")]), 3)
        .unwrap_err();
    assert!(matches!(err, VoterError::RowFailed { line: 3, .. }));
}
