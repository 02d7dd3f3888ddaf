//! Michigan voter file transformer.
//!
//! The statewide `.lst` extract is fixed width with no delimiters; the sample
//! CSV carries the same columns under a header row. Both layouts feed the
//! same transformer.

use crate::address::AddressParser;
use crate::config::StateFormat;
use crate::constants::fields::*;
use crate::error::Result;
use crate::extract::{
    CodeTable, ColumnMap, FieldExtractor, ResidentialAddress, construct_val, convert_date,
    tagged_mailing, year_only_birthdate,
};
use crate::models::{RawRow, StateCode, VoterRecord};
use std::sync::Arc;

pub const INPUT_FIELDS: &[&str] = &[
    "LAST_NAME",
    "FIRST_NAME",
    "MIDDLE_NAME",
    "NAME_SUFFIX",
    "BIRTH_YEAR",
    "GENDER",
    "DATE_OF_REGISTRATION",
    "HOUSE_NUM_CHARACTER",
    "RESIDENCE_STREET_NUMBER",
    "HOUSE_SUFFIX",
    "PRE_DIRECTION",
    "STREET_NAME",
    "STREET_TYPE",
    "SUFFIX_DIRECTION",
    "RESIDENCE_EXTENSION",
    "CITY",
    "STATE",
    "ZIP",
    "MAIL_ADDR_1",
    "MAIL_ADDR_2",
    "MAIL_ADDR_3",
    "MAIL_ADDR_4",
    "MAIL_ADDR_5",
    "STATE_VOTER_REF",
    "COUNTYCODE",
    "JURISDICTION",
    "WARD_PRECINCT",
    "SCHOOL_CODE",
    "LOWER_HOUSE_DIST",
    "UPPER_HOUSE_DIST",
    "CONGRESSIONAL_DIST",
    "COUNTY_BOARD_DIST",
    "VILLAGE_CODE",
    "VILLAGE_PRECINCT",
    "SCHOOL_PRECINCT",
    "PERMANENT_ABSENTEE_IND",
    "REGISTRATION_STATUS",
    "UOCAVA_STATUS",
];

/// Byte ranges of [`INPUT_FIELDS`] in a `.lst` line. The street extension
/// and city ranges overlap by one byte in the published layout.
pub const FIXED_WIDTH: &[(usize, usize)] = &[
    (0, 35),
    (35, 55),
    (55, 75),
    (75, 78),
    (78, 82),
    (82, 83),
    (83, 91),
    (91, 92),
    (92, 99),
    (99, 103),
    (103, 105),
    (105, 135),
    (135, 141),
    (141, 143),
    (143, 156),
    (155, 191),
    (191, 193),
    (193, 198),
    (198, 248),
    (248, 298),
    (298, 348),
    (348, 398),
    (398, 448),
    (448, 461),
    (461, 463),
    (463, 468),
    (468, 474),
    (474, 479),
    (479, 484),
    (484, 489),
    (489, 494),
    (494, 499),
    (499, 504),
    (504, 510),
    (510, 516),
    (516, 517),
    (517, 519),
    (519, 520),
];

pub const FORMAT: StateFormat = StateFormat::delimited(StateCode::Mi, "%m%d%Y", b',')
    .with_fixed_width(INPUT_FIELDS, FIXED_WIDTH)
    .with_default_file("mi_sample.csv")
    .with_nullable(&[RACE, PRECINCT_SPLIT, COUNTY_VOTER_REF]);

const ADDRESS_COLUMNS: &[&str] = &[
    "HOUSE_NUM_CHARACTER",
    "RESIDENCE_STREET_NUMBER",
    "HOUSE_SUFFIX",
    "PRE_DIRECTION",
    "STREET_NAME",
    "STREET_TYPE",
    "SUFFIX_DIRECTION",
    "RESIDENCE_EXTENSION",
];

const MAILING_COLUMNS: &[&str] = &[
    "MAIL_ADDR_1",
    "MAIL_ADDR_2",
    "MAIL_ADDR_3",
    "MAIL_ADDR_4",
    "MAIL_ADDR_5",
];

pub struct MichiganTransformer {
    parser: Arc<AddressParser>,
    columns: ColumnMap,
    gender_map: CodeTable,
}

impl MichiganTransformer {
    pub fn new(parser: Arc<AddressParser>) -> Self {
        let columns = ColumnMap::new()
            .null(TITLE)
            .column(FIRST_NAME, "FIRST_NAME")
            .column(MIDDLE_NAME, "MIDDLE_NAME")
            .column(LAST_NAME, "LAST_NAME")
            .column(NAME_SUFFIX, "NAME_SUFFIX")
            .nulls(&[
                RACE,
                BIRTH_STATE,
                LANGUAGE_CHOICE,
                EMAIL,
                PHONE,
                DO_NOT_CALL_STATUS,
                COUNTY_VOTER_REF,
                PARTY,
                PRECINCT_SPLIT,
            ])
            .column(COUNTYCODE, "COUNTYCODE")
            .column(CONGRESSIONAL_DIST, "CONGRESSIONAL_DIST")
            .column(UPPER_HOUSE_DIST, "UPPER_HOUSE_DIST")
            .column(LOWER_HOUSE_DIST, "LOWER_HOUSE_DIST")
            .column(PRECINCT, "WARD_PRECINCT")
            .column(COUNTY_BOARD_DIST, "COUNTY_BOARD_DIST")
            .column(SCHOOL_BOARD_DIST, "SCHOOL_CODE")
            .column(ABSENTEE_TYPE, "PERMANENT_ABSENTEE_IND")
            .column(REGISTRATION_STATUS, "REGISTRATION_STATUS");

        Self {
            parser,
            columns,
            gender_map: CodeTable::new(
                "MI gender",
                &[("F", "F"), ("M", "M"), ("2", "F"), ("1", "M"), ("", "U")],
            ),
        }
    }
}

impl FieldExtractor for MichiganTransformer {
    fn state(&self) -> StateCode {
        StateCode::Mi
    }

    fn format(&self) -> &StateFormat {
        &FORMAT
    }

    fn column_map(&self) -> Option<&ColumnMap> {
        Some(&self.columns)
    }

    fn extract_gender(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(GENDER, self.gender_map.lookup(row.get("GENDER"))?))
    }

    fn extract_birthdate(&mut self, row: &RawRow) -> Result<VoterRecord> {
        year_only_birthdate(row.get("BIRTH_YEAR"))
    }

    fn extract_registration_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let address = construct_val(row, ADDRESS_COLUMNS);
        Ok(ResidentialAddress::new(address.clone())
            .raw_addr2(address)
            .raw_city(row.get("CITY"))
            .raw_zip(row.get("ZIP"))
            .place_name(row.get("CITY").trim())
            .state_name(row.get("STATE").trim())
            .zip_code(row.get("ZIP").trim())
            .build(&self.parser))
    }

    fn extract_mailing_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let text = construct_val(row, MAILING_COLUMNS);
        Ok(tagged_mailing(&self.parser, &text, "USA"))
    }

    fn extract_state_voter_ref(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            STATE_VOTER_REF,
            format!("MI{}", row.get("STATE_VOTER_REF").trim()),
        ))
    }

    fn extract_registration_date(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            REGISTRATION_DATE,
            convert_date(row.get("DATE_OF_REGISTRATION"), FORMAT.date_format)?,
        ))
    }
}
