//! Colorado voter file transformer.
//!
//! Colorado ships one comma-delimited file with a header row. Residential
//! addresses arrive pre-split and are re-joined for tagging; mailing
//! addresses are free text across three lines.

use crate::address::AddressParser;
use crate::config::StateFormat;
use crate::constants::fields::*;
use crate::constants::party;
use crate::error::Result;
use crate::extract::{
    CodeTable, ColumnMap, FieldExtractor, ResidentialAddress, construct_val, convert_date_opt,
    join_values, skip_chars, tagged_mailing, year_only_birthdate,
};
use crate::models::{RawRow, StateCode, VoterRecord};
use std::sync::Arc;

pub const FORMAT: StateFormat =
    StateFormat::delimited(StateCode::Co, "%m/%d/%Y", b',').with_default_file("co_sample.csv");

const ADDRESS_COLUMNS: &[&str] = &[
    "HOUSE_NUM",
    "HOUSE_SUFFIX",
    "PRE_DIR",
    "STREET_NAME",
    "STREET_TYPE",
    "POST_DIR",
    "UNIT_TYPE",
    "UNIT_NUM",
];

pub struct ColoradoTransformer {
    parser: Arc<AddressParser>,
    columns: ColumnMap,
    party_map: CodeTable,
    gender_map: CodeTable,
}

impl ColoradoTransformer {
    pub fn new(parser: Arc<AddressParser>) -> Self {
        let columns = ColumnMap::new()
            .null(TITLE)
            .column(FIRST_NAME, "FIRST_NAME")
            .column(MIDDLE_NAME, "MIDDLE_NAME")
            .column(LAST_NAME, "LAST_NAME")
            .column(NAME_SUFFIX, "NAME_SUFFIX")
            .column(PHONE, "PHONE_NUM")
            .nulls(&[
                EMAIL,
                DO_NOT_CALL_STATUS,
                RACE,
                BIRTH_STATE,
                LANGUAGE_CHOICE,
                COUNTY_VOTER_REF,
                ABSENTEE_TYPE,
                COUNTY_BOARD_DIST,
                SCHOOL_BOARD_DIST,
            ])
            .column(COUNTYCODE, "COUNTY_CODE")
            .column(STATE_VOTER_REF, "VOTER_ID")
            .column(REGISTRATION_STATUS, "STATUS_CODE")
            .column(PRECINCT, "PRECINCT")
            .column(PRECINCT_SPLIT, "SPLIT");

        Self {
            parser,
            columns,
            party_map: CodeTable::new(
                "CO party",
                &[
                    ("DEM", party::DEMOCRAT),
                    ("REP", party::REPUBLICAN),
                    ("LBR", "LIB"),
                    ("GRN", "GRN"),
                    ("ACN", "AMC"),
                    ("UNI", "UTY"),
                    ("UAF", party::UNAFFILIATED),
                ],
            ),
            gender_map: CodeTable::new("CO gender", &[("Female", "F"), ("Male", "M")]),
        }
    }
}

impl FieldExtractor for ColoradoTransformer {
    fn state(&self) -> StateCode {
        StateCode::Co
    }

    fn format(&self) -> &StateFormat {
        &FORMAT
    }

    fn column_map(&self) -> Option<&ColumnMap> {
        Some(&self.columns)
    }

    fn extract_gender(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(GENDER, self.gender_map.get_or_null(row.get("GENDER"))))
    }

    fn extract_birthdate(&mut self, row: &RawRow) -> Result<VoterRecord> {
        year_only_birthdate(row.get("BIRTH_YEAR"))
    }

    fn extract_registration_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let address = construct_val(row, ADDRESS_COLUMNS);
        Ok(ResidentialAddress::new(address.clone())
            .raw_addr2(address)
            .raw_city(row.get("RESIDENTIAL_CITY"))
            .raw_zip(row.get("RESIDENTIAL_ZIP_CODE"))
            .place_name(row.get("RESIDENTIAL_CITY").trim())
            .state_name(row.get("RESIDENTIAL_STATE").trim())
            .zip_code(row.get("RESIDENTIAL_ZIP_CODE").trim())
            .build(&self.parser))
    }

    fn extract_mailing_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        if row.opt("MAIL_ADDR1").is_none() {
            return Ok(VoterRecord::new());
        }
        let text = join_values([
            row.get("MAIL_ADDR1"),
            row.get("MAIL_ADDR2"),
            row.get("MAIL_ADDR3"),
        ]);
        Ok(tagged_mailing(&self.parser, &text, ""))
    }

    fn extract_registration_date(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let date = convert_date_opt(row.get("REGISTRATION_DATE"), FORMAT.date_format)?;
        Ok(VoterRecord::new().with(REGISTRATION_DATE, date))
    }

    fn extract_party(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(PARTY, self.party_map.lookup(row.get("PARTY"))?))
    }

    fn extract_congressional_dist(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            CONGRESSIONAL_DIST,
            skip_chars(row.get("CONGRESSIONAL"), "Congressional ".len()),
        ))
    }

    fn extract_upper_house_dist(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            UPPER_HOUSE_DIST,
            skip_chars(row.get("STATE_SENATE"), "State Senate ".len()),
        ))
    }

    fn extract_lower_house_dist(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            LOWER_HOUSE_DIST,
            skip_chars(row.get("STATE_HOUSE"), "State House ".len()),
        ))
    }
}
