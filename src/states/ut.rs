//! Utah voter file transformer.
//!
//! The file is UTF-8 with a byte order mark. Dates are frequently malformed
//! and are read leniently.

use crate::address::AddressParser;
use crate::config::StateFormat;
use crate::constants::estimate;
use crate::constants::fields::*;
use crate::error::Result;
use crate::extract::{
    CodeTable, ColumnMap, FieldExtractor, ResidentialAddress, construct_val, lenient_date,
    tagged_mailing,
};
use crate::models::{RawRow, StateCode, VoterRecord};
use std::sync::Arc;

pub const FORMAT: StateFormat = StateFormat::delimited(StateCode::Ut, "%m/%d/%Y", b',')
    .with_default_file("voters.txt")
    .with_bom()
    .with_nullable(&[FIRST_NAME, PRECINCT_SPLIT])
    .with_extra_parties(&["PCP", "SWP", "UJP", "TAX", "IPU", "GPU"]);

const ADDRESS_COLUMNS: &[&str] = &[
    "House Number",
    "House Number Suffix",
    "Direction Prefix",
    "Street",
    "Direction Suffix",
    "Street Type",
    "Unit Type",
    "Unit Number",
];

/// Mailing country as the file records it
const MAIL_COUNTRY_US: &str = "US";

/// City, state and ZIP from a "CITY, ST  ZIP" column.
///
/// Without a comma nothing is recovered. A single token after the comma is
/// taken as the ZIP.
fn split_city_state_zip(text: &str) -> (Option<&str>, Option<&str>, Option<&str>) {
    let parts: Vec<&str> = text.split(',').collect();
    let [city, state_zip] = parts.as_slice() else {
        return (None, None, None);
    };
    let tokens: Vec<&str> = state_zip.split_whitespace().collect();
    let city = Some(city.trim()).filter(|c| !c.is_empty());
    match tokens.as_slice() {
        [] => (city, None, None),
        [state, zip] => (city, Some(*state), Some(*zip)),
        [.., zip] => (city, None, Some(*zip)),
    }
}

pub struct UtahTransformer {
    parser: Arc<AddressParser>,
    columns: ColumnMap,
    party_map: CodeTable,
}

impl UtahTransformer {
    pub fn new(parser: Arc<AddressParser>) -> Self {
        let columns = ColumnMap::new()
            .null(TITLE)
            .column(FIRST_NAME, "First Name")
            .column(MIDDLE_NAME, "Middle Name")
            .column(LAST_NAME, "Last Name")
            .column(NAME_SUFFIX, "Name Suffix")
            .nulls(&[
                GENDER,
                RACE,
                BIRTH_STATE,
                LANGUAGE_CHOICE,
                EMAIL,
                DO_NOT_CALL_STATUS,
                COUNTY_BOARD_DIST,
                COUNTY_VOTER_REF,
                PRECINCT_SPLIT,
            ])
            .column(PHONE, "Phone")
            .column(ABSENTEE_TYPE, "Absentee")
            .column(CONGRESSIONAL_DIST, "Congressional")
            .column(UPPER_HOUSE_DIST, "State Senate")
            .column(LOWER_HOUSE_DIST, "State House")
            .column(SCHOOL_BOARD_DIST, "State Schoolboard")
            .column(COUNTYCODE, "County ID")
            .column(PRECINCT, "Precinct")
            .column(REGISTRATION_STATUS, "Status");

        Self {
            parser,
            columns,
            party_map: CodeTable::new(
                "UT party",
                &[
                    ("Republican", "REP"),
                    ("Unaffiliated", "UN"),
                    ("Democratic", "DEM"),
                    ("Libertarian", "LIB"),
                    ("Independent American", "AI"),
                    ("Constitution", "AMC"),
                    ("Independent", "UN"),
                    ("Other", "UN"),
                    ("Green", "GRN"),
                    ("Personal Choice", "PCP"),
                    ("Americans Elect", "AE"),
                    ("Reform", "REF"),
                    ("Natural Law", "NLP"),
                    ("Socialist Workers", "SWP"),
                    ("Socialist", "SP"),
                    ("Utah Justice Party", "UJP"),
                    ("U.S. Taxpayers", "TAX"),
                    ("Peace and Freedom", "PF"),
                    ("Independent Patriot Party Of Utah", "IPU"),
                    ("Independent Patriot Party of Utah", "IPU"),
                    ("Desert Greens", "GPU"),
                ],
            ),
        }
    }
}

impl FieldExtractor for UtahTransformer {
    fn state(&self) -> StateCode {
        StateCode::Ut
    }

    fn format(&self) -> &StateFormat {
        &FORMAT
    }

    fn column_map(&self) -> Option<&ColumnMap> {
        Some(&self.columns)
    }

    fn extract_birthdate(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new()
            .with(BIRTHDATE, lenient_date(row.get("DOB"), FORMAT.date_format))
            .with(BIRTHDATE_IS_ESTIMATE, estimate::EXACT))
    }

    fn extract_registration_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let address = construct_val(row, ADDRESS_COLUMNS);
        Ok(ResidentialAddress::new(address.clone())
            .raw_addr2(address)
            .raw_city(row.get("City"))
            .raw_zip(row.get("Zip"))
            .state_name("UT")
            .build(&self.parser))
    }

    /// Street lines are tagged from "Mailing Address"; city, state and ZIP
    /// come from the separate "Mailing city, state  zip" column when it
    /// splits cleanly
    fn extract_mailing_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let mut record =
            tagged_mailing(&self.parser, row.get("Mailing Address"), MAIL_COUNTRY_US);
        if record.is_empty() {
            return Ok(record);
        }
        let (city, state, zip) = split_city_state_zip(row.get("Mailing city, state  zip"));
        for (field, value) in [(MAIL_CITY, city), (MAIL_STATE, state), (MAIL_ZIP_CODE, zip)] {
            if let Some(value) = value {
                record.insert(field, value);
            }
        }
        Ok(record)
    }

    fn extract_state_voter_ref(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            STATE_VOTER_REF,
            format!("UT{}", row.get("Voter ID").trim()),
        ))
    }

    fn extract_registration_date(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            REGISTRATION_DATE,
            lenient_date(row.get("Registration Date"), FORMAT.date_format),
        ))
    }

    /// Party names outside the table leave PARTY empty
    fn extract_party(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(PARTY, self.party_map.get_or_null(row.get("Party"))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_city_state_zip() {
        assert_eq!(
            split_city_state_zip("SALT LAKE CITY, UT  84101"),
            (Some("SALT LAKE CITY"), Some("UT"), Some("84101"))
        );
        assert_eq!(
            split_city_state_zip("PROVO, 84601"),
            (Some("PROVO"), None, Some("84601"))
        );
        assert_eq!(split_city_state_zip("OGDEN UT 84401"), (None, None, None));
        assert_eq!(split_city_state_zip("A, B, C"), (None, None, None));
    }
}
