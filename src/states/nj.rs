//! New Jersey voter file transformer.
//!
//! The file carries no mailing address, so the residence text is tagged a
//! second time for the mailing fields.

use crate::address::AddressParser;
use crate::config::StateFormat;
use crate::constants::estimate;
use crate::constants::fields::*;
use crate::error::Result;
use crate::extract::{
    CodeTable, ColumnMap, FieldExtractor, ResidentialAddress, construct_val, convert_date_opt,
    tagged_mailing,
};
use crate::models::{FieldValue, RawRow, StateCode, VoterRecord};
use std::sync::Arc;

pub const INPUT_FIELDS: &[&str] = &[
    "COUNTY",
    "VOTER ID",
    "LEGACY ID",
    "LAST NAME",
    "FIRST NAME",
    "MIDDLE NAME",
    "SUFFIX",
    "STREET NUMBER",
    "SUFF A",
    "SUFF B",
    "STREET NAME",
    "APT/UNIT NO",
    "CITY",
    "MUNICIPALITY",
    "ZIP",
    "DOB",
    "PARTY CODE",
    "WARD",
    "DISTRICT",
    "STATUS",
    "CONGRESSIONAL",
    "LEGISLATIVE",
    "FREEHOLDER",
    "SCHOOL",
    "REGIONAL SCHOOL",
];

pub const FORMAT: StateFormat = StateFormat::delimited(StateCode::Nj, "%m/%d/%Y", b'|')
    .headerless(INPUT_FIELDS)
    .with_default_file("nj.csv")
    .with_extra_parties(&["CP"]);

const ADDRESS_COLUMNS: &[&str] = &[
    "STREET NUMBER",
    "SUFF A",
    "SUFF B",
    "STREET NAME",
    "APT/UNIT NO",
];

pub struct NewJerseyTransformer {
    parser: Arc<AddressParser>,
    columns: ColumnMap,
    county_map: CodeTable,
    party_map: CodeTable,
}

impl NewJerseyTransformer {
    pub fn new(parser: Arc<AddressParser>) -> Self {
        let columns = ColumnMap::new()
            .null(TITLE)
            .column(FIRST_NAME, "FIRST NAME")
            .column(MIDDLE_NAME, "MIDDLE NAME")
            .column(LAST_NAME, "LAST NAME")
            .column(NAME_SUFFIX, "SUFFIX")
            .nulls(&[
                RACE,
                GENDER,
                BIRTH_STATE,
                LANGUAGE_CHOICE,
                EMAIL,
                PHONE,
                DO_NOT_CALL_STATUS,
                COUNTY_VOTER_REF,
                ABSENTEE_TYPE,
                REGISTRATION_DATE,
            ])
            .column(CONGRESSIONAL_DIST, "CONGRESSIONAL")
            .column(UPPER_HOUSE_DIST, "LEGISLATIVE")
            .column(LOWER_HOUSE_DIST, "LEGISLATIVE")
            .column(COUNTY_BOARD_DIST, "FREEHOLDER")
            .column(REGISTRATION_STATUS, "STATUS");

        Self {
            parser,
            columns,
            county_map: CodeTable::new(
                "NJ county",
                &[
                    ("ATLANTIC", "1"),
                    ("BERGEN", "3"),
                    ("BURLINGTON", "5"),
                    ("CAMDEN", "7"),
                    ("CAPE MAY", "9"),
                    ("CUMBERLAND", "11"),
                    ("ESSEX", "13"),
                    ("GLOUCESTER", "15"),
                    ("HUDSON", "17"),
                    ("HUNTERDON", "19"),
                    ("MERCER", "21"),
                    ("MIDDLESEX", "23"),
                    ("MONMOUTH", "25"),
                    ("MORRIS", "27"),
                    ("OCEAN", "29"),
                    ("PASSAIC", "31"),
                    ("SALEM", "33"),
                    ("SOMERSET", "35"),
                    ("SUSSEX", "37"),
                    ("UNION", "39"),
                    ("WARREN", "41"),
                ],
            ),
            party_map: CodeTable::new(
                "NJ party",
                &[
                    ("DEM", "DEM"),
                    ("CNV", "CON"),
                    ("CON", "CP"),
                    ("GRE", "GRN"),
                    ("REP", "REP"),
                    ("NAT", "NLP"),
                    ("LIB", "LIB"),
                    ("RFP", "REF"),
                    ("SSP", "SP"),
                    ("UNA", "UN"),
                    ("", "UN"),
                ],
            ),
        }
    }
}

impl FieldExtractor for NewJerseyTransformer {
    fn state(&self) -> StateCode {
        StateCode::Nj
    }

    fn format(&self) -> &StateFormat {
        &FORMAT
    }

    fn column_map(&self) -> Option<&ColumnMap> {
        Some(&self.columns)
    }

    fn extract_birthdate(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new()
            .with(BIRTHDATE, convert_date_opt(row.get("DOB"), FORMAT.date_format)?)
            .with(BIRTHDATE_IS_ESTIMATE, estimate::EXACT))
    }

    fn extract_registration_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let address = construct_val(row, ADDRESS_COLUMNS);
        Ok(ResidentialAddress::new(address.clone())
            .raw_addr2(address)
            .raw_city(row.get("CITY"))
            .raw_zip(row.get("ZIP"))
            .place_name(row.get("CITY").trim())
            .zip_code(row.get("ZIP").trim())
            .state_name("NJ")
            .build(&self.parser))
    }

    fn extract_mailing_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let mut record = tagged_mailing(&self.parser, &construct_val(row, ADDRESS_COLUMNS), "USA");
        if !record.is_empty() {
            record.insert(MAIL_STATE, "NJ");
        }
        Ok(record)
    }

    fn extract_county_code(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(COUNTYCODE, self.county_map.lookup(row.get("COUNTY"))?))
    }

    fn extract_state_voter_ref(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            STATE_VOTER_REF,
            format!("NJ{}", row.get("VOTER ID").trim()),
        ))
    }

    fn extract_party(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(PARTY, self.party_map.lookup(row.get("PARTY CODE"))?))
    }

    /// Precinct is `WARD-DISTRICT`; the file has no finer split
    fn extract_precinct(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let precinct = format!("{}-{}", row.get("WARD").trim(), row.get("DISTRICT").trim());
        Ok(VoterRecord::new()
            .with(PRECINCT, precinct.clone())
            .with(PRECINCT_SPLIT, precinct))
    }

    fn extract_school_board_dist(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let school = row.opt("SCHOOL").or_else(|| row.opt("REGIONAL SCHOOL"));
        Ok(VoterRecord::new().with(SCHOOL_BOARD_DIST, FieldValue::from(school)))
    }
}
