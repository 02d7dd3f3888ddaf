//! Ohio voter file transformer

use crate::address::AddressParser;
use crate::config::StateFormat;
use crate::constants::estimate;
use crate::constants::fields::*;
use crate::error::Result;
use crate::extract::{
    CodeTable, ColumnMap, FieldExtractor, MailingColumns, ResidentialAddress, convert_date,
};
use crate::models::{FieldValue, RawRow, StateCode, VoterRecord};
use std::sync::Arc;

pub const FORMAT: StateFormat = StateFormat::delimited(StateCode::Oh, "%m/%d/%Y", b',')
    .with_default_file("SWVF_1_44_SAMPLE.csv");

const MAILING: MailingColumns = MailingColumns {
    line1: "MAILING_ADDRESS1",
    line2: &["MAILING_SECONDARY_ADDRESS"],
    city: "MAILING_CITY",
    state: "MAILING_STATE",
    zip: "MAILING_ZIP",
    country: Some("MAILING_COUNTRY"),
};

/// School district columns, most specific first
const SCHOOL_DISTRICTS: &[&str] = &[
    "CITY_SCHOOL_DISTRICT",
    "EXEMPTED_VILL_SCHOOL_DISTRICT",
    "LOCAL_SCHOOL_DISTRICT",
];

pub struct OhioTransformer {
    parser: Arc<AddressParser>,
    columns: ColumnMap,
    party_map: CodeTable,
}

impl OhioTransformer {
    pub fn new(parser: Arc<AddressParser>) -> Self {
        let columns = ColumnMap::new()
            .null(TITLE)
            .column(FIRST_NAME, "FIRST_NAME")
            .column(MIDDLE_NAME, "MIDDLE_NAME")
            .column(LAST_NAME, "LAST_NAME")
            .column(NAME_SUFFIX, "SUFFIX")
            .nulls(&[
                EMAIL,
                PHONE,
                DO_NOT_CALL_STATUS,
                GENDER,
                RACE,
                BIRTH_STATE,
                LANGUAGE_CHOICE,
                ABSENTEE_TYPE,
                COUNTY_BOARD_DIST,
            ])
            .column(COUNTYCODE, "COUNTY_NUMBER")
            .column(STATE_VOTER_REF, "SOS_VOTERID")
            .column(COUNTY_VOTER_REF, "COUNTY_ID")
            .column(REGISTRATION_STATUS, "VOTER_STATUS")
            .column(CONGRESSIONAL_DIST, "CONGRESSIONAL_DISTRICT")
            .column(UPPER_HOUSE_DIST, "STATE_SENATE_DISTRICT")
            .column(LOWER_HOUSE_DIST, "STATE_REPRESENTATIVE_DISTRICT")
            .column(PRECINCT, "PRECINCT_CODE")
            .column(PRECINCT_SPLIT, "PRECINCT_CODE");

        Self {
            parser,
            columns,
            party_map: CodeTable::new(
                "OH party",
                &[
                    ("C", "AMC"),
                    ("D", "DEM"),
                    ("G", "GRN"),
                    ("L", "LIB"),
                    ("N", "NLP"),
                    ("R", "REP"),
                    ("S", "SP"),
                    ("", "UN"),
                ],
            ),
        }
    }
}

impl FieldExtractor for OhioTransformer {
    fn state(&self) -> StateCode {
        StateCode::Oh
    }

    fn format(&self) -> &StateFormat {
        &FORMAT
    }

    fn column_map(&self) -> Option<&ColumnMap> {
        Some(&self.columns)
    }

    fn extract_birthdate(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new()
            .with(
                BIRTHDATE,
                convert_date(row.get("DATE_OF_BIRTH"), FORMAT.date_format)?,
            )
            .with(BIRTHDATE_IS_ESTIMATE, estimate::EXACT))
    }

    fn extract_registration_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(ResidentialAddress::new(row.get("RESIDENTIAL_ADDRESS1").trim())
            .raw_addr2(FieldValue::non_blank(
                row.get("RESIDENTIAL_SECONDARY_ADDR").trim(),
            ))
            .raw_city(row.get("RESIDENTIAL_CITY"))
            .raw_zip(row.get("RESIDENTIAL_ZIP"))
            .place_name(row.get("RESIDENTIAL_CITY").trim())
            .state_name(row.get("RESIDENTIAL_STATE").trim())
            .zip_code(row.get("RESIDENTIAL_ZIP").trim())
            .build(&self.parser))
    }

    fn extract_mailing_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(MAILING.extract(row))
    }

    fn extract_registration_date(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            REGISTRATION_DATE,
            convert_date(row.get("REGISTRATION_DATE"), FORMAT.date_format)?,
        ))
    }

    fn extract_party(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            PARTY,
            self.party_map.lookup(row.get("PARTY_AFFILIATION"))?,
        ))
    }

    fn extract_school_board_dist(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let district = SCHOOL_DISTRICTS.iter().find_map(|column| row.opt(column));
        Ok(VoterRecord::new().with(SCHOOL_BOARD_DIST, FieldValue::from(district)))
    }
}
