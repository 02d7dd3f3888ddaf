//! Vermont voter file transformer

use crate::address::AddressParser;
use crate::config::StateFormat;
use crate::constants::fields::*;
use crate::constants::NOT_PROVIDED;
use crate::error::Result;
use crate::extract::{
    CodeTable, ColumnMap, FieldExtractor, ResidentialAddress, construct_val, convert_date,
    tagged_mailing, year_only_birthdate,
};
use crate::models::{RawRow, StateCode, VoterRecord};
use std::sync::Arc;

pub const FORMAT: StateFormat = StateFormat::delimited(StateCode::Vt, "%m/%d/%Y", b'|')
    .with_default_file("vt-voter-files--SAMPLE.txt")
    .with_nullable(&[PRECINCT_SPLIT, PRECINCT]);

const LEGAL_ADDRESS: &[&str] = &[
    "Legal Address Line 1",
    "Legal Address Line 2",
    "Legal Address City",
    "Legal Address State",
    "Legal Address Zip",
];

const MAILING_ADDRESS: &[&str] = &[
    "Mailing Address Line 1",
    "Mailing Address Line 2",
    "Mailing Address City",
    "Mailing Address State",
    "Mailing Address Zip",
];

/// Vermont elects its single representative at large
const AT_LARGE: &str = "AL";

pub struct VermontTransformer {
    parser: Arc<AddressParser>,
    columns: ColumnMap,
    county_map: CodeTable,
}

impl VermontTransformer {
    pub fn new(parser: Arc<AddressParser>) -> Self {
        let columns = ColumnMap::new()
            .null(TITLE)
            .column(FIRST_NAME, "First Name")
            .column(LAST_NAME, "Last Name")
            .column(MIDDLE_NAME, "Middle Name")
            .column(NAME_SUFFIX, "Suffix")
            .nulls(&[
                GENDER,
                PARTY,
                RACE,
                BIRTH_STATE,
                COUNTY_BOARD_DIST,
                LANGUAGE_CHOICE,
                EMAIL,
                DO_NOT_CALL_STATUS,
                COUNTY_VOTER_REF,
                ABSENTEE_TYPE,
                PRECINCT,
                PRECINCT_SPLIT,
            ])
            .column(PHONE, "Telephone")
            .column(REGISTRATION_STATUS, "Status")
            .column(SCHOOL_BOARD_DIST, "School District")
            .column(UPPER_HOUSE_DIST, "Senate District")
            .column(LOWER_HOUSE_DIST, "Voting District")
            .constant(CONGRESSIONAL_DIST, AT_LARGE);

        Self {
            parser,
            columns,
            county_map: CodeTable::new(
                "VT county",
                &[
                    ("ADDISON", "ADD"),
                    ("BENNINGTON", "BEN"),
                    ("CALEDONIA", "CAL"),
                    ("CHITTENDEN", "CHI"),
                    ("ESSEX", "ESX"),
                    ("FRANKLIN", "FRA"),
                    ("GRAND ISLE", "GI"),
                    ("LAMOILLE", "LAM"),
                    ("ORANGE", "ORA"),
                    ("ORLEANS", "ORL"),
                    ("RUTLAND", "RUT"),
                    ("WASHINGTON", "WAV"),
                    ("WINDHAM", "WDH"),
                    ("WINDSOR", "WDR"),
                ],
            ),
        }
    }
}

impl FieldExtractor for VermontTransformer {
    fn state(&self) -> StateCode {
        StateCode::Vt
    }

    fn format(&self) -> &StateFormat {
        &FORMAT
    }

    fn column_map(&self) -> Option<&ColumnMap> {
        Some(&self.columns)
    }

    fn extract_birthdate(&mut self, row: &RawRow) -> Result<VoterRecord> {
        year_only_birthdate(row.get("Year of Birth"))
    }

    /// The full legal address, city to ZIP, is tagged as one string
    fn extract_registration_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let line2 = row.opt("Legal Address Line 2").unwrap_or(NOT_PROVIDED);
        Ok(ResidentialAddress::new(construct_val(row, LEGAL_ADDRESS))
            .raw_addr1(row.get("Legal Address Line 1"))
            .raw_addr2(line2)
            .raw_city(row.get("Legal Address City"))
            .raw_zip(row.get("Legal Address Zip"))
            .state_name(row.opt("Legal Address State").unwrap_or("VT"))
            .build(&self.parser))
    }

    fn extract_county_code(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(COUNTYCODE, self.county_map.lookup(row.get("County"))?))
    }

    fn extract_mailing_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let text = construct_val(row, MAILING_ADDRESS);
        Ok(tagged_mailing(&self.parser, &text, "USA"))
    }

    fn extract_state_voter_ref(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            STATE_VOTER_REF,
            format!("VT{}", row.get("VoterID").trim()),
        ))
    }

    fn extract_registration_date(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            REGISTRATION_DATE,
            convert_date(row.get("Date of Registration"), FORMAT.date_format)?,
        ))
    }
}
