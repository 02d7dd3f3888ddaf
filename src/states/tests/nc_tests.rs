//! North Carolina row tests

use super::*;
use crate::constants::fields::*;

fn create_test_nc_row(overrides: &[(&str, &str)]) -> RawRow {
    create_test_row(
        &[
            ("county_id", "92"),
            ("voter_reg_num", "000123456"),
            ("voter_status_desc", "ACTIVE"),
            ("name_prefx_cd", ""),
            ("last_name", "SMITH"),
            ("first_name", "JOHN"),
            ("middle_name", "Q"),
            ("name_suffix_lbl", "JR"),
            ("res_street_address", "12 OAK#RD"),
            ("res_city_desc", "RALEIGH"),
            ("state_cd", "NC"),
            ("zip_code", "27601"),
            ("mail_addr1", ""),
            ("mail_city", ""),
            ("full_phone_number", "9195550100"),
            ("race_code", "W"),
            ("gender_code", "M"),
            ("birth_state", "VA"),
            ("registr_dt", "01/02/2008"),
            ("party_cd", "UNA"),
            ("precinct_abbrv", "01-07"),
            ("cong_dist_abbrv", "4"),
            ("nc_senate_abbrv", "16"),
            ("nc_house_abbrv", "33"),
            ("school_dist_abbrv", ""),
        ],
        overrides,
    )
}

#[test]
fn test_hashtag_street_type_is_tagged() {
    let mut assembler = create_test_assembler(StateCode::Nc);
    let record = assembler.assemble(&create_test_nc_row(&[]), 2).unwrap();

    assert_eq!(text(&record, VALIDATION_STATUS), "2");
    assert_eq!(text(&record, STREET_NAME), "OAK");
    assert_eq!(text(&record, STREET_NAME_POST_TYPE), "RD");
    assert_eq!(text(&record, PLACE_NAME), "RALEIGH");
    assert_eq!(text(&record, RAW_ADDR1), "12 OAK RD");
}

#[test]
fn test_identity_party_and_precinct() {
    let mut assembler = create_test_assembler(StateCode::Nc);
    let record = assembler.assemble(&create_test_nc_row(&[]), 2).unwrap();

    assert_eq!(text(&record, STATE_VOTER_REF), "NC000123456");
    assert_eq!(text(&record, PARTY), "UN");
    assert_eq!(text(&record, PRECINCT), "01-07");
    assert_eq!(text(&record, PRECINCT_SPLIT), "01-07");
    assert!(is_null(&record, BIRTHDATE));
    assert_eq!(text(&record, BIRTHDATE_IS_ESTIMATE), "Y");
    assert_eq!(text(&record, MAIL_CITY), "RALEIGH");
}

#[test]
fn test_missing_values_use_placeholders() {
    let mut assembler = create_test_assembler(StateCode::Nc);
    let row = create_test_nc_row(&[
        ("first_name", ""),
        ("cong_dist_abbrv", ""),
        ("precinct_abbrv", ""),
        ("gender_code", ""),
        ("party_cd", ""),
    ]);

    let record = assembler.assemble(&row, 2).unwrap();

    assert_eq!(text(&record, FIRST_NAME), "none");
    assert_eq!(text(&record, CONGRESSIONAL_DIST), "none");
    assert_eq!(text(&record, PRECINCT), "none");
    assert_eq!(text(&record, GENDER), "U");
    assert_eq!(text(&record, PARTY), "UN");
}

#[test]
fn test_mailing_columns_copied_when_present() {
    let mut assembler = create_test_assembler(StateCode::Nc);
    let row = create_test_nc_row(&[
        ("mail_addr1", "PO BOX 9"),
        ("mail_addr2", "ATTN J SMITH"),
        ("mail_city", "CARY"),
        ("mail_state", "NC"),
        ("mail_zipcode", "27511"),
    ]);

    let record = assembler.assemble(&row, 2).unwrap();

    assert_eq!(text(&record, MAIL_ADDRESS_LINE1), "PO BOX 9");
    assert_eq!(text(&record, MAIL_ADDRESS_LINE2), "ATTN J SMITH");
    assert_eq!(text(&record, MAIL_CITY), "CARY");
    assert_eq!(text(&record, MAIL_COUNTRY), "USA");
}
