//! Florida voter file transformer.
//!
//! Florida extracts are tab-delimited with no header row; the column order
//! is fixed by [`INPUT_FIELDS`].

use crate::address::AddressParser;
use crate::config::StateFormat;
use crate::constants::fields::*;
use crate::constants::{estimate, gender};
use crate::error::Result;
use crate::extract::{
    CodeTable, ColumnMap, FieldExtractor, MailingColumns, ResidentialAddress, construct_val,
    convert_date, convert_date_opt,
};
use crate::models::{FieldValue, RawRow, StateCode, VoterRecord};
use std::sync::Arc;

pub const INPUT_FIELDS: &[&str] = &[
    "County Code",
    "Voter ID",
    "Name Last",
    "Name Suffix",
    "Name First",
    "Name Middle",
    "Requested public records exemption",
    "Residence Address Line 1",
    "Residence Address Line 2",
    "Residence City (USPS)",
    "Residence State",
    "Residence Zipcode",
    "Mailing Address Line 1",
    "Mailing Address Line 2",
    "Mailing Address Line 3",
    "Mailing City",
    "Mailing State",
    "Mailing Zipcode",
    "Mailing Country",
    "Gender",
    "Race",
    "Birth Date",
    "Registration Date",
    "Party Affiliation",
    "Precinct",
    "Precinct Group",
    "Precinct Split",
    "Precinct Suffix",
    "Voter Status",
    "Congressional District",
    "House District",
    "Senate District",
    "County Commission District",
    "School Board District",
    "Daytime Area Code",
    "Daytime Phone Number",
    "Daytime Phone Extension",
    "Email address",
];

pub const FORMAT: StateFormat = StateFormat::delimited(StateCode::Fl, "%m/%d/%Y", b'\t')
    .headerless(INPUT_FIELDS)
    .with_default_file("AllFLSample20160908.txt")
    .with_extra_parties(&["IPF"]);

const MAILING: MailingColumns = MailingColumns {
    line1: "Mailing Address Line 1",
    line2: &["Mailing Address Line 2", "Mailing Address Line 3"],
    city: "Mailing City",
    state: "Mailing State",
    zip: "Mailing Zipcode",
    country: Some("Mailing Country"),
};

pub struct FloridaTransformer {
    parser: Arc<AddressParser>,
    columns: ColumnMap,
    party_map: CodeTable,
    race_map: CodeTable,
}

impl FloridaTransformer {
    pub fn new(parser: Arc<AddressParser>) -> Self {
        let columns = ColumnMap::new()
            .null(TITLE)
            .column(FIRST_NAME, "Name First")
            .column(MIDDLE_NAME, "Name Middle")
            .column(LAST_NAME, "Name Last")
            .column(NAME_SUFFIX, "Name Suffix")
            .column(EMAIL, "Email address")
            .column(COUNTYCODE, "County Code")
            .column(REGISTRATION_STATUS, "Voter Status")
            .column(CONGRESSIONAL_DIST, "Congressional District")
            .column(UPPER_HOUSE_DIST, "Senate District")
            .column(LOWER_HOUSE_DIST, "House District")
            .nulls(&[
                DO_NOT_CALL_STATUS,
                BIRTH_STATE,
                LANGUAGE_CHOICE,
                COUNTY_VOTER_REF,
                ABSENTEE_TYPE,
                COUNTY_BOARD_DIST,
                SCHOOL_BOARD_DIST,
            ]);

        Self {
            parser,
            columns,
            party_map: CodeTable::new(
                "FL party",
                &[
                    ("AIP", "AI"),
                    ("AMP", "AMP"),
                    ("CPF", "AMC"),
                    ("DEM", "DEM"),
                    ("ECO", "ECO"),
                    ("GRE", "GRN"),
                    ("IDP", "IDP"),
                    ("INT", "AI"),
                    ("LPF", "LIB"),
                    ("NPA", "UN"),
                    ("PSL", "PSL"),
                    ("REF", "REF"),
                    ("REP", "REP"),
                    ("IND", "IPF"),
                    ("", "UN"),
                ],
            ),
            race_map: CodeTable::new(
                "FL race",
                &[
                    ("1", "I"),
                    ("2", "A"),
                    ("3", "B"),
                    ("4", "H"),
                    ("5", "W"),
                    ("6", "O"),
                    ("7", "M"),
                    ("9", "U"),
                ],
            ),
        }
    }
}

impl FieldExtractor for FloridaTransformer {
    fn state(&self) -> StateCode {
        StateCode::Fl
    }

    fn format(&self) -> &StateFormat {
        &FORMAT
    }

    fn column_map(&self) -> Option<&ColumnMap> {
        Some(&self.columns)
    }

    /// `(AAA) NNN-NNNN x EXT`, or blank when no number is on file
    fn extract_phone_number(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let phone = match row.opt("Daytime Phone Number") {
            Some(number) => {
                let mut phone = format!("({}) {}", row.get("Daytime Area Code").trim(), number);
                if let Some(extension) = row.opt("Daytime Phone Extension") {
                    phone.push_str(" x ");
                    phone.push_str(extension);
                }
                phone
            }
            None => String::new(),
        };
        Ok(VoterRecord::new().with(PHONE, phone))
    }

    fn extract_gender(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(GENDER, row.opt("Gender").unwrap_or(gender::UNKNOWN)))
    }

    fn extract_race(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(RACE, self.race_map.lookup(row.get("Race"))?))
    }

    fn extract_birthdate(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new()
            .with(
                BIRTHDATE,
                convert_date_opt(row.get("Birth Date"), FORMAT.date_format)?,
            )
            .with(BIRTHDATE_IS_ESTIMATE, estimate::EXACT))
    }

    fn extract_registration_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let address = construct_val(
            row,
            &["Residence Address Line 1", "Residence Address Line 2"],
        );
        let state_name = row.opt("Residence State").unwrap_or("FL");

        Ok(ResidentialAddress::new(address)
            .raw_addr1(row.get("Residence Address Line 1"))
            .raw_addr2(FieldValue::non_blank(row.get("Residence Address Line 2").trim()))
            .raw_city(row.get("Residence City (USPS)"))
            .raw_zip(row.get("Residence Zipcode"))
            .place_name(row.get("Residence City (USPS)").trim())
            .zip_code(row.get("Residence Zipcode").trim())
            .state_name(state_name)
            .build(&self.parser))
    }

    fn extract_mailing_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(MAILING.extract(row))
    }

    fn extract_state_voter_ref(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            STATE_VOTER_REF,
            format!("FL{}", row.get("Voter ID").trim()),
        ))
    }

    fn extract_registration_date(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            REGISTRATION_DATE,
            convert_date(row.get("Registration Date"), FORMAT.date_format)?,
        ))
    }

    fn extract_party(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            PARTY,
            self.party_map.lookup(row.get("Party Affiliation"))?,
        ))
    }

    /// A blank split falls back to the precinct itself
    fn extract_precinct(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let precinct = row.get("Precinct").trim();
        let split = row.opt("Precinct Split").unwrap_or(precinct);
        Ok(VoterRecord::new()
            .with(PRECINCT, precinct)
            .with(PRECINCT_SPLIT, split))
    }
}
