//! Oklahoma voter file transformer

use crate::address::AddressParser;
use crate::config::StateFormat;
use crate::constants::fields::*;
use crate::constants::{estimate, gender, race};
use crate::error::Result;
use crate::extract::{
    CodeTable, ColumnMap, FieldExtractor, MailingColumns, ResidentialAddress, construct_val,
    convert_date_opt,
};
use crate::models::{FieldValue, RawRow, StateCode, VoterRecord};
use std::sync::Arc;

pub const FORMAT: StateFormat = StateFormat::delimited(StateCode::Ok, "%m/%d/%Y", b',')
    .with_default_file("OK_Sample.csv")
    .with_nullable(&[PRECINCT_SPLIT, CONGRESSIONAL_DIST]);

const ADDRESS_COLUMNS: &[&str] = &["StreetNum", "StreetDir", "StreetName", "StreetType", "BldgNum"];

const MAILING: MailingColumns = MailingColumns {
    line1: "MailStreet1",
    line2: &["MailStreet2"],
    city: "MailCity",
    state: "MailState",
    zip: "MailZip",
    country: None,
};

/// Characters of the precinct code that identify the county
const COUNTY_PREFIX_LEN: usize = 2;

pub struct OklahomaTransformer {
    parser: Arc<AddressParser>,
    columns: ColumnMap,
    party_map: CodeTable,
}

impl OklahomaTransformer {
    pub fn new(parser: Arc<AddressParser>) -> Self {
        let columns = ColumnMap::new()
            .null(TITLE)
            .column(FIRST_NAME, "FirstName")
            .column(MIDDLE_NAME, "MiddleName")
            .column(LAST_NAME, "LastName")
            .column(NAME_SUFFIX, "Suffix")
            .constant(PHONE, "")
            .constant(GENDER, gender::UNKNOWN)
            .constant(RACE, race::UNKNOWN)
            .nulls(&[
                EMAIL,
                DO_NOT_CALL_STATUS,
                BIRTH_STATE,
                LANGUAGE_CHOICE,
                COUNTY_VOTER_REF,
                ABSENTEE_TYPE,
                CONGRESSIONAL_DIST,
                UPPER_HOUSE_DIST,
                LOWER_HOUSE_DIST,
            ])
            .column(REGISTRATION_STATUS, "Status")
            .column(PRECINCT, "Precinct")
            .column(PRECINCT_SPLIT, "Precinct")
            .column(COUNTY_BOARD_DIST, "CountyComm")
            .column(SCHOOL_BOARD_DIST, "School");

        Self {
            parser,
            columns,
            party_map: CodeTable::new(
                "OK party",
                &[
                    ("DEM", "DEM"),
                    ("REP", "REP"),
                    ("IND", "UN"),
                    ("LIB", "LIB"),
                    ("AE", "AE"),
                ],
            ),
        }
    }
}

impl FieldExtractor for OklahomaTransformer {
    fn state(&self) -> StateCode {
        StateCode::Ok
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
                convert_date_opt(row.get("DateOfBirth"), FORMAT.date_format)?,
            )
            .with(BIRTHDATE_IS_ESTIMATE, estimate::EXACT))
    }

    /// The file carries no residence state
    fn extract_registration_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let address = construct_val(row, ADDRESS_COLUMNS);
        Ok(ResidentialAddress::new(address.clone())
            .raw_addr1(address)
            .raw_addr2(FieldValue::Null)
            .raw_city(row.get("City"))
            .raw_zip(row.get("Zip"))
            .place_name(row.get("City").trim())
            .zip_code(row.get("Zip").trim())
            .state_name("OK")
            .build(&self.parser))
    }

    fn extract_county_code(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let county: String = row
            .get("Precinct")
            .trim()
            .chars()
            .take(COUNTY_PREFIX_LEN)
            .collect();
        Ok(VoterRecord::new().with(COUNTYCODE, county))
    }

    fn extract_mailing_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(MAILING.extract(row))
    }

    fn extract_state_voter_ref(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            STATE_VOTER_REF,
            format!("OK{}", row.get("VoterID").trim()),
        ))
    }

    fn extract_registration_date(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            REGISTRATION_DATE,
            convert_date_opt(row.get("OriginalRegistration"), FORMAT.date_format)?,
        ))
    }

    fn extract_party(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(PARTY, self.party_map.lookup(row.get("PolitalAff"))?))
    }
}
