//! Washington voter file transformer.
//!
//! The registration address arrives already split into its parts, so it is
//! mapped straight into the structured fields without tagging.

use crate::address::AddressParser;
use crate::config::StateFormat;
use crate::constants::fields::*;
use crate::constants::{NOT_PROVIDED, estimate};
use crate::error::Result;
use crate::extract::{
    ColumnMap, FieldExtractor, MailingColumns, construct_val, convert_date,
    empty_residential_address,
};
use crate::models::{FieldValue, RawRow, StateCode, ValidationStatus, VoterRecord};
use std::sync::Arc;

pub const FORMAT: StateFormat = StateFormat::delimited(StateCode::Wa, "%m/%d/%Y", b'\t')
    .with_default_file("201605_VRDB_ExtractSAMPLE.txt");

const MAILING: MailingColumns = MailingColumns {
    line1: "Mail1",
    line2: &["Mail2", "Mail3", "Mail4"],
    city: "MailCity",
    state: "MailState",
    zip: "MailZip",
    country: Some("MailCountry"),
};

const STREET_COLUMNS: &[&str] = &[
    "RegStNum",
    "RegStFrac",
    "RegStPreDirection",
    "RegStName",
    "RegStType",
    "RegStPostDirection",
];

const UNIT_COLUMNS: &[&str] = &["RegUnitType", "RegUnitNum"];

/// Structured address fields and the column each is read from
const ADDRESS_PARTS: &[(&str, &str)] = &[
    (ADDRESS_NUMBER, "RegStNum"),
    (ADDRESS_NUMBER_SUFFIX, "RegStFrac"),
    (OCCUPANCY_TYPE, "RegUnitType"),
    (OCCUPANCY_IDENTIFIER, "RegUnitNum"),
    (PLACE_NAME, "RegCity"),
    (STATE_NAME, "RegState"),
    (STREET_NAME, "RegStName"),
    (STREET_NAME_PRE_DIRECTIONAL, "RegStPreDirection"),
    (STREET_NAME_POST_DIRECTIONAL, "RegStPostDirection"),
    (STREET_NAME_POST_TYPE, "RegStType"),
    (ZIP_CODE, "RegZipCode"),
];

/// Precinct split as `PPPP/SS` from the precinct code and part.
/// Non-numeric values are kept as given.
fn precinct_split(code: &str, part: &str) -> String {
    let (code, part) = (code.trim(), part.trim());
    match (code.parse::<u32>(), part.parse::<u32>()) {
        (Ok(code), Ok(part)) => format!("{:04}/{:02}", code, part),
        _ => format!("{}/{}", code, part),
    }
}

fn text_or_placeholder(text: String) -> FieldValue {
    if text.is_empty() {
        NOT_PROVIDED.into()
    } else {
        text.into()
    }
}

pub struct WashingtonTransformer {
    columns: ColumnMap,
}

impl WashingtonTransformer {
    /// The parser is accepted for a uniform constructor; Washington never tags
    pub fn new(_parser: Arc<AddressParser>) -> Self {
        let columns = ColumnMap::new()
            .column(TITLE, "Title")
            .column(FIRST_NAME, "FName")
            .column(MIDDLE_NAME, "MName")
            .column(LAST_NAME, "LName")
            .column(NAME_SUFFIX, "NameSuffix")
            .column(GENDER, "Gender")
            .nulls(&[
                EMAIL,
                PHONE,
                DO_NOT_CALL_STATUS,
                RACE,
                BIRTH_STATE,
                LANGUAGE_CHOICE,
                PARTY,
                UPPER_HOUSE_DIST,
                COUNTY_BOARD_DIST,
                SCHOOL_BOARD_DIST,
            ])
            .column(COUNTYCODE, "CountyCode")
            .column(STATE_VOTER_REF, "StateVoterID")
            .column(COUNTY_VOTER_REF, "CountyVoterID")
            .column(REGISTRATION_STATUS, "StatusCode")
            .column(ABSENTEE_TYPE, "AbsenteeType")
            .column(CONGRESSIONAL_DIST, "CongressionalDistrict")
            .column(LOWER_HOUSE_DIST, "LegislativeDistrict");

        Self { columns }
    }
}

impl FieldExtractor for WashingtonTransformer {
    fn state(&self) -> StateCode {
        StateCode::Wa
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
                convert_date(row.get("Birthdate"), FORMAT.date_format)?,
            )
            .with(BIRTHDATE_IS_ESTIMATE, estimate::EXACT))
    }

    fn extract_registration_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let mut record = empty_residential_address();
        for (field, column) in ADDRESS_PARTS {
            record.insert(*field, FieldValue::non_blank(row.get(column)));
        }
        record.insert(RAW_ADDR1, text_or_placeholder(construct_val(row, STREET_COLUMNS)));
        record.insert(RAW_ADDR2, FieldValue::non_blank(&construct_val(row, UNIT_COLUMNS)));
        record.insert(RAW_CITY, text_or_placeholder(row.get("RegCity").trim().to_string()));
        record.insert(RAW_ZIP, text_or_placeholder(row.get("RegZipCode").trim().to_string()));
        record.insert(VALIDATION_STATUS, ValidationStatus::Parsed);
        Ok(record)
    }

    fn extract_mailing_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(MAILING.extract(row))
    }

    fn extract_registration_date(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            REGISTRATION_DATE,
            convert_date(row.get("Registrationdate"), FORMAT.date_format)?,
        ))
    }

    fn extract_precinct(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new()
            .with(PRECINCT, row.get("PrecinctCode").trim())
            .with(
                PRECINCT_SPLIT,
                precinct_split(row.get("PrecinctCode"), row.get("PrecinctPart")),
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precinct_split_padding() {
        assert_eq!(precinct_split("101", "2"), "0101/02");
        assert_eq!(precinct_split("A1", "2"), "A1/2");
    }
}
