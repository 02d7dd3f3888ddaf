//! North Carolina voter file transformer

use crate::address::AddressParser;
use crate::config::StateFormat;
use crate::constants::fields::*;
use crate::constants::{estimate, gender};
use crate::error::Result;
use crate::extract::{
    CodeTable, ColumnMap, FieldExtractor, MailingColumns, ResidentialAddress, convert_date,
};
use crate::models::{FieldValue, RawRow, StateCode, VoterRecord};
use std::sync::Arc;

pub const FORMAT: StateFormat = StateFormat::delimited(StateCode::Nc, "%m/%d/%Y", b'\t')
    .with_default_file("ncvoter_StatewideSAMPLE.csv")
    .with_nullable(&[PRECINCT_SPLIT]);

/// Street types some counties key with a leading '#'
const HASHTAG_PATTERNS: &[&str] = &[
    "#RD", "#ROAD", "#DR", "#DRIVE", "#LN", "#LANE", "#WAY", "#CIRCLE", "#CIR", "#SLIP", "#BLVD",
    "#MAIN", "#HILL", "#HIGHWAY",
];

/// Placeholder for required values missing from the file
const NONE: &str = "none";

const MAILING: MailingColumns = MailingColumns {
    line1: "mail_addr1",
    line2: &["mail_addr2", "mail_addr3", "mail_addr4"],
    city: "mail_city",
    state: "mail_state",
    zip: "mail_zipcode",
    country: None,
};

/// Detach hashtag street types from the word before them, as in
/// "12 OAK#RD" -> "12 OAK RD"
fn strip_hashtags(address: &str) -> String {
    let cleaned = HASHTAG_PATTERNS
        .iter()
        .fold(address.to_string(), |text, pattern| {
            text.replace(pattern, &format!(" {}", &pattern[1..]))
        });
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub struct NorthCarolinaTransformer {
    parser: Arc<AddressParser>,
    columns: ColumnMap,
    party_map: CodeTable,
}

impl NorthCarolinaTransformer {
    pub fn new(parser: Arc<AddressParser>) -> Self {
        let columns = ColumnMap::new()
            .column(PHONE, "full_phone_number")
            .column(RACE, "race_code")
            .column(BIRTH_STATE, "birth_state")
            .column(COUNTYCODE, "county_id")
            .column(REGISTRATION_STATUS, "voter_status_desc")
            .column(UPPER_HOUSE_DIST, "nc_senate_abbrv")
            .column(LOWER_HOUSE_DIST, "nc_house_abbrv")
            .column(SCHOOL_BOARD_DIST, "school_dist_abbrv")
            .nulls(&[
                EMAIL,
                DO_NOT_CALL_STATUS,
                LANGUAGE_CHOICE,
                COUNTY_VOTER_REF,
                ABSENTEE_TYPE,
                COUNTY_BOARD_DIST,
            ]);

        Self {
            parser,
            columns,
            party_map: CodeTable::new(
                "NC party",
                &[
                    ("DEM", "DEM"),
                    ("REP", "REP"),
                    ("LIB", "LIB"),
                    ("UNA", "UN"),
                    ("", "UN"),
                ],
            ),
        }
    }
}

impl FieldExtractor for NorthCarolinaTransformer {
    fn state(&self) -> StateCode {
        StateCode::Nc
    }

    fn format(&self) -> &StateFormat {
        &FORMAT
    }

    fn column_map(&self) -> Option<&ColumnMap> {
        Some(&self.columns)
    }

    fn extract_name(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new()
            .with(TITLE, FieldValue::non_blank(row.get("name_prefx_cd").trim()))
            .with(FIRST_NAME, row.opt("first_name").unwrap_or(NONE))
            .with(MIDDLE_NAME, FieldValue::non_blank(row.get("middle_name").trim()))
            .with(LAST_NAME, row.get("last_name").trim())
            .with(
                NAME_SUFFIX,
                FieldValue::non_blank(row.get("name_suffix_lbl").trim()),
            ))
    }

    fn extract_gender(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            GENDER,
            row.opt("gender_code").unwrap_or(gender::UNKNOWN),
        ))
    }

    /// The public file carries age but no birthdate
    fn extract_birthdate(&mut self, _row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new()
            .with(BIRTHDATE, FieldValue::Null)
            .with(BIRTHDATE_IS_ESTIMATE, estimate::ESTIMATED))
    }

    fn extract_registration_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let address = strip_hashtags(row.get("res_street_address"));
        let state_name = row.opt("state_cd").unwrap_or("NC");

        Ok(ResidentialAddress::new(address)
            .raw_city(row.get("res_city_desc"))
            .raw_zip(row.get("zip_code"))
            .place_name(row.get("res_city_desc").trim())
            .zip_code(row.get("zip_code").trim())
            .state_name(state_name)
            .build(&self.parser))
    }

    fn extract_mailing_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(MAILING.extract(row))
    }

    fn extract_state_voter_ref(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            STATE_VOTER_REF,
            format!("NC{}", row.get("voter_reg_num").trim()),
        ))
    }

    fn extract_registration_date(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            REGISTRATION_DATE,
            convert_date(row.get("registr_dt"), FORMAT.date_format)?,
        ))
    }

    fn extract_party(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(PARTY, self.party_map.lookup(row.get("party_cd"))?))
    }

    fn extract_congressional_dist(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            CONGRESSIONAL_DIST,
            row.opt("cong_dist_abbrv").unwrap_or(NONE),
        ))
    }

    /// The file has no split; the precinct stands in for it
    fn extract_precinct(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let precinct = row.opt("precinct_abbrv").unwrap_or(NONE);
        Ok(VoterRecord::new()
            .with(PRECINCT, precinct)
            .with(PRECINCT_SPLIT, precinct))
    }
}
