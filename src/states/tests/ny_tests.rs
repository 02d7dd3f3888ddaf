//! New York row tests

use super::*;
use crate::constants::fields::*;
use crate::error::VoterError;

fn create_test_ny_row(overrides: &[(&str, &str)]) -> RawRow {
    create_test_row(
        &[
            ("LASTNAME", "GARCIA"),
            ("FIRSTNAME", "ANA"),
            ("MIDDLENAME", ""),
            ("NAMESUFFIX", ""),
            ("RADDNUMBER", "25"),
            ("RHALFCODE", ""),
            ("RAPARTMENT", "3B"),
            ("RPREDIRECTION", ""),
            ("RSTREETNAME", "ELM ST"),
            ("RPOSTDIRECTION", ""),
            ("RCITY", "ALBANY"),
            ("RZIP5", "12207"),
            ("MAILADD1", ""),
            ("DOB", "19700305"),
            ("GENDER", "F"),
            ("ENROLLMENT", "DEM"),
            ("OTHERPARTY", ""),
            ("COUNTYCODE", "01"),
            ("ED", "7"),
            ("CD", "20"),
            ("SD", "44"),
            ("AD", "65"),
            ("COUNTYVRNUMBER", "A123"),
            ("REGDATE", "20000101"),
            ("STATUS", "ACTIVE"),
            ("SBOEID", "NY000000000001"),
        ],
        overrides,
    )
}

#[test]
fn test_apartment_is_tagged_and_backfilled() {
    let mut assembler = create_test_assembler(StateCode::Ny);
    let record = assembler.assemble(&create_test_ny_row(&[]), 1).unwrap();

    assert_eq!(text(&record, VALIDATION_STATUS), "2");
    assert_eq!(text(&record, OCCUPANCY_IDENTIFIER), "3B");
    assert_eq!(text(&record, RAW_ADDR1), "25 ELM ST");
    assert_eq!(text(&record, RAW_ADDR2), "3B");
    assert_eq!(text(&record, STATE_NAME), "NY");
    assert_eq!(text(&record, MAIL_ADDRESS_LINE1), "25 ELM ST");
    assert_eq!(text(&record, MAIL_ADDRESS_LINE2), "Apt 3B");
    assert_eq!(text(&record, MAIL_CITY), "ALBANY");
}

#[test]
fn test_bare_apt_marker_is_dropped() {
    let mut assembler = create_test_assembler(StateCode::Ny);
    let row = create_test_ny_row(&[("RAPARTMENT", "APT")]);

    let record = assembler.assemble(&row, 1).unwrap();
    assert!(is_null(&record, OCCUPANCY_TYPE));
    assert_eq!(text(&record, STREET_NAME), "ELM");
}

#[test]
fn test_precinct_split_from_election_and_assembly_districts() {
    let mut assembler = create_test_assembler(StateCode::Ny);
    let record = assembler.assemble(&create_test_ny_row(&[]), 1).unwrap();

    assert_eq!(text(&record, PRECINCT), "7");
    assert_eq!(text(&record, PRECINCT_SPLIT), "007/65");
}

#[test]
fn test_other_party_enrollment() {
    let mut assembler = create_test_assembler(StateCode::Ny);

    let row = create_test_ny_row(&[("ENROLLMENT", "OTH"), ("OTHERPARTY", "LBT")]);
    let record = assembler.assemble(&row, 1).unwrap();
    assert_eq!(text(&record, PARTY), "LIB");

    let row = create_test_ny_row(&[("ENROLLMENT", "BLK")]);
    let record = assembler.assemble(&row, 1).unwrap();
    assert_eq!(text(&record, PARTY), "UN");

    let row = create_test_ny_row(&[("ENROLLMENT", "OTH"), ("OTHERPARTY", "PIRATE")]);
    let err = assembler.assemble(&row, 1).unwrap_err();
    assert!(!err.is_run_fatal());
    assert!(matches!(err, VoterError::RowFailed { .. }));
}
