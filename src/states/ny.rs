//! New York voter file transformer

use crate::address::AddressParser;
use crate::config::StateFormat;
use crate::constants::fields::*;
use crate::constants::{estimate, party};
use crate::error::Result;
use crate::extract::{
    CodeTable, ColumnMap, FieldExtractor, ResidentialAddress, construct_val, convert_date,
    join_values, tagged_mailing,
};
use crate::models::{RawRow, StateCode, VoterRecord};
use std::sync::Arc;

pub const INPUT_FIELDS: &[&str] = &[
    "LASTNAME",
    "FIRSTNAME",
    "MIDDLENAME",
    "NAMESUFFIX",
    "RADDNUMBER",
    "RHALFCODE",
    "RAPARTMENT",
    "RPREDIRECTION",
    "RSTREETNAME",
    "RPOSTDIRECTION",
    "RCITY",
    "RZIP5",
    "RZIP4",
    "MAILADD1",
    "MAILADD2",
    "MAILADD3",
    "MAILADD4",
    "DOB",
    "GENDER",
    "ENROLLMENT",
    "OTHERPARTY",
    "COUNTYCODE",
    "ED",
    "LD",
    "TOWNCITY",
    "WARD",
    "CD",
    "SD",
    "AD",
    "LASTVOTEDDATE",
    "PREVYEARVOTED",
    "PREVCOUNTY",
    "PREVADDRESS",
    "PREVNAME",
    "COUNTYVRNUMBER",
    "REGDATE",
    "VRSOURCE",
    "IDREQUIRED",
    "IDMET",
    "STATUS",
    "REASONCODE",
    "INACT_DATE",
    "PURGE_DATE",
    "SBOEID",
    "VoterHistory",
];

pub const FORMAT: StateFormat = StateFormat::delimited(StateCode::Ny, "%Y%m%d", b',')
    .headerless(INPUT_FIELDS)
    .with_default_file("AllNYSVoters20160831SAMPLE.txt");

const STREET_COLUMNS: &[&str] = &[
    "RADDNUMBER",
    "RHALFCODE",
    "RPREDIRECTION",
    "RSTREETNAME",
    "RPOSTDIRECTION",
];

/// Precinct split as `EEE/AA` from the election and assembly districts.
/// Non-numeric districts are kept as given.
fn precinct_split(election_district: &str, assembly_district: &str) -> String {
    let (ed, ad) = (election_district.trim(), assembly_district.trim());
    match (ed.parse::<u32>(), ad.parse::<u32>()) {
        (Ok(ed), Ok(ad)) => format!("{:03}/{:02}", ed, ad),
        _ => format!("{}/{}", ed, ad),
    }
}

pub struct NewYorkTransformer {
    parser: Arc<AddressParser>,
    columns: ColumnMap,
    party_map: CodeTable,
    other_party_map: CodeTable,
}

impl NewYorkTransformer {
    pub fn new(parser: Arc<AddressParser>) -> Self {
        let columns = ColumnMap::new()
            .null(TITLE)
            .column(FIRST_NAME, "FIRSTNAME")
            .column(MIDDLE_NAME, "MIDDLENAME")
            .column(LAST_NAME, "LASTNAME")
            .column(NAME_SUFFIX, "NAMESUFFIX")
            .column(GENDER, "GENDER")
            .column(COUNTYCODE, "COUNTYCODE")
            .column(STATE_VOTER_REF, "SBOEID")
            .column(COUNTY_VOTER_REF, "COUNTYVRNUMBER")
            .column(REGISTRATION_STATUS, "STATUS")
            .column(CONGRESSIONAL_DIST, "CD")
            .column(UPPER_HOUSE_DIST, "SD")
            .column(LOWER_HOUSE_DIST, "AD")
            .nulls(&[
                EMAIL,
                PHONE,
                DO_NOT_CALL_STATUS,
                RACE,
                BIRTH_STATE,
                LANGUAGE_CHOICE,
                ABSENTEE_TYPE,
                COUNTY_BOARD_DIST,
                SCHOOL_BOARD_DIST,
            ]);

        Self {
            parser,
            columns,
            party_map: CodeTable::new(
                "NY party",
                &[
                    ("DEM", "DEM"),
                    ("REP", "REP"),
                    ("CON", "CON"),
                    ("GRE", "GRN"),
                    ("WOR", "WOR"),
                    ("IND", "IDP"),
                    ("WEP", "WEP"),
                    ("SCC", "SCC"),
                    ("BLK", "UN"),
                    ("", "UN"),
                ],
            ),
            other_party_map: CodeTable::new("NY other party", &[("LBT", "LIB"), ("SAP", "SAP")]),
        }
    }
}

impl FieldExtractor for NewYorkTransformer {
    fn state(&self) -> StateCode {
        StateCode::Ny
    }

    fn format(&self) -> &StateFormat {
        &FORMAT
    }

    fn column_map(&self) -> Option<&ColumnMap> {
        Some(&self.columns)
    }

    fn extract_birthdate(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new()
            .with(BIRTHDATE, convert_date(row.get("DOB"), FORMAT.date_format)?)
            .with(BIRTHDATE_IS_ESTIMATE, estimate::EXACT))
    }

    /// The apartment is tagged with an `Apt` marker unless the file only
    /// carries the bare word
    fn extract_registration_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let apartment = row.get("RAPARTMENT").trim();
        let unit = match apartment {
            "" | "APT" => String::new(),
            apt => format!("Apt {}", apt),
        };
        let address = join_values([
            row.get("RADDNUMBER"),
            row.get("RHALFCODE"),
            row.get("RPREDIRECTION"),
            row.get("RSTREETNAME"),
            row.get("RPOSTDIRECTION"),
            unit.as_str(),
        ]);

        Ok(ResidentialAddress::new(address)
            .raw_addr1(construct_val(row, STREET_COLUMNS))
            .raw_addr2(apartment)
            .raw_city(row.get("RCITY"))
            .raw_zip(row.get("RZIP5"))
            .place_name(row.get("RCITY").trim())
            .zip_code(row.get("RZIP5").trim())
            .state_name("NY")
            .build(&self.parser))
    }

    fn extract_mailing_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        if row.opt("MAILADD1").is_none() {
            return Ok(VoterRecord::new());
        }
        let text = construct_val(row, &["MAILADD1", "MAILADD2", "MAILADD3", "MAILADD4"]);
        Ok(tagged_mailing(&self.parser, &text, ""))
    }

    fn extract_registration_date(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            REGISTRATION_DATE,
            convert_date(row.get("REGDATE"), FORMAT.date_format)?,
        ))
    }

    /// Enrollment `OTH` names the actual party in OTHERPARTY
    fn extract_party(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let enrollment = row.get("ENROLLMENT").trim();
        let code = if enrollment == party::OTHER {
            self.other_party_map.lookup(row.get("OTHERPARTY"))?
        } else {
            self.party_map.lookup(enrollment)?
        };
        Ok(VoterRecord::new().with(PARTY, code))
    }

    fn extract_precinct(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new()
            .with(PRECINCT, row.get("ED").trim())
            .with(PRECINCT_SPLIT, precinct_split(row.get("ED"), row.get("AD"))))
    }
}
