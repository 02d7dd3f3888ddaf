//! Delaware voter file transformer

use crate::address::AddressParser;
use crate::config::StateFormat;
use crate::constants::fields::*;
use crate::error::Result;
use crate::extract::{
    CodeTable, ColumnMap, FieldExtractor, ResidentialAddress, construct_val, convert_date,
    tagged_mailing, year_only_birthdate,
};
use crate::models::{FieldValue, RawRow, StateCode, VoterRecord};
use std::sync::Arc;

pub const FORMAT: StateFormat = StateFormat::delimited(StateCode::De, "%Y%m%d", b',')
    .with_default_file("DE_Sample.csv")
    .with_nullable(&[PRECINCT_SPLIT, PRECINCT, STATE_NAME])
    .with_extra_parties(&[
        "FED", "CIT", "NEW", "DEL", "ALI", "TAX", "STS", "UNI", "IND", "ROL", "BLU",
    ]);

const ADDRESS_COLUMNS: &[&str] = &["HOME-NO", "HOME-STREET", "HOME-APT", "HOME-DEV"];

const MAILING_COLUMNS: &[&str] = &[
    "MAIL-NO",
    "MAIL-APT",
    "MAIL-STR",
    "MAIL-CITY",
    "MAIL-STATE",
    "MAIL-ZIP",
];

pub struct DelawareTransformer {
    parser: Arc<AddressParser>,
    columns: ColumnMap,
    party_map: CodeTable,
}

impl DelawareTransformer {
    pub fn new(parser: Arc<AddressParser>) -> Self {
        let columns = ColumnMap::new()
            .nulls(&[TITLE, MIDDLE_NAME])
            .column(FIRST_NAME, "FIRST-NAME")
            .column(LAST_NAME, "LAST-NAME")
            .column(NAME_SUFFIX, "SUFFIX")
            .nulls(&[
                GENDER,
                RACE,
                BIRTH_STATE,
                LANGUAGE_CHOICE,
                EMAIL,
                PHONE,
                DO_NOT_CALL_STATUS,
                COUNTY_VOTER_REF,
                ABSENTEE_TYPE,
                PRECINCT,
                PRECINCT_SPLIT,
            ])
            .column(COUNTYCODE, "COUNTY")
            .column(STATE_VOTER_REF, "UNIQUE-ID")
            .column(REGISTRATION_STATUS, "STATUS")
            .column(SCHOOL_BOARD_DIST, "SCH-DIST")
            .column(COUNTY_BOARD_DIST, "CNLEVY")
            .column(UPPER_HOUSE_DIST, "SD")
            .column(LOWER_HOUSE_DIST, "RD")
            .column(CONGRESSIONAL_DIST, "ED");

        Self {
            parser,
            columns,
            party_map: CodeTable::new(
                "DE party",
                &[
                    ("D", "DEM"),
                    ("R", "REP"),
                    ("I", "UN"),
                    ("L", "LIB"),
                    ("A", "AI"),
                    ("B", "FED"),
                    ("C", "CIT"),
                    ("E", "LIB"),
                    ("F", "NEW"),
                    ("K", "DEL"),
                    ("N", "ALI"),
                    ("O", "OTH"),
                    ("P", "TAX"),
                    ("S", "STS"),
                    ("U", "UNI"),
                    ("W", "IND"),
                    ("X", "ROL"),
                    ("Y", "BLU"),
                    ("Q", "AMC"),
                    ("V", "NLP"),
                    ("M", "REF"),
                    ("H", "GRN"),
                    ("J", "WOR"),
                    ("T", "CON"),
                    ("Z", "SP"),
                ],
            ),
        }
    }
}

impl FieldExtractor for DelawareTransformer {
    fn state(&self) -> StateCode {
        StateCode::De
    }

    fn format(&self) -> &StateFormat {
        &FORMAT
    }

    fn column_map(&self) -> Option<&ColumnMap> {
        Some(&self.columns)
    }

    fn extract_birthdate(&mut self, row: &RawRow) -> Result<VoterRecord> {
        year_only_birthdate(row.get("YEAR-OF-BIRTH"))
    }

    fn extract_registration_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let address = construct_val(row, ADDRESS_COLUMNS);
        Ok(ResidentialAddress::new(address.clone())
            .raw_addr2(address)
            .raw_city(row.get("HOME-CITY"))
            .raw_zip(row.get("HOME-ZIPCODE"))
            .place_name(row.get("HOME-CITY").trim())
            .zip_code(row.get("HOME-ZIPCODE").trim())
            .state_name(row.get("STATE").trim())
            .build(&self.parser))
    }

    fn extract_mailing_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let text = construct_val(row, MAILING_COLUMNS);
        Ok(tagged_mailing(&self.parser, &text, "USA"))
    }

    /// Registration dates with an unknown day are recorded as `YYYYMM00`
    fn extract_registration_date(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let value = row.get("DATE-REG").trim();
        let date = match convert_date(value, FORMAT.date_format) {
            Ok(date) => date,
            Err(e) => match value.strip_suffix("00") {
                Some(month) if month.len() == 6 => {
                    convert_date(&format!("{}01", month), FORMAT.date_format)?
                }
                _ => return Err(e),
            },
        };
        Ok(VoterRecord::new().with(REGISTRATION_DATE, date))
    }

    /// Unknown codes pass through for the vocabulary check; a blank code is null
    fn extract_party(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let code = self.party_map.passthrough(row.get("PARTY"));
        Ok(VoterRecord::new().with(PARTY, FieldValue::non_blank(&code)))
    }
}
