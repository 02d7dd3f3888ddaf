//! Pennsylvania voter file transformer.
//!
//! Pennsylvania ships one tab-delimited `FVE` file per county with forty
//! generic `_DISTRICTn` columns. Which column holds the precinct, split and
//! board districts varies by county and is described by the county's
//! `Zone Types` file, loaded into [`ZoneColumns`] before any rows are read.

use crate::address::AddressParser;
use crate::config::StateFormat;
use crate::constants::fields::*;
use crate::constants::{estimate, race};
use crate::error::Result;
use crate::extract::{
    CodeTable, ColumnMap, FieldExtractor, ResidentialAddress, construct_val, convert_date_opt,
    first_district_number,
};
use crate::models::{FieldValue, RawRow, StateCode, VoterRecord};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::debug;

pub const INPUT_FIELDS: &[&str] = &[
    "STATE_VOTER_REF",
    "TITLE",
    "LAST_NAME",
    "FIRST_NAME",
    "MIDDLE_NAME",
    "NAME_SUFFIX",
    "GENDER",
    "BIRTHDATE",
    "REGISTRATION_DATE",
    "REGISTRATION_STATUS",
    "_STATUS_CHANGE_DATE",
    "_PARTY_CODE",
    "ADDRESS_NUMBER",
    "ADDRESS_NUMBER_SUFFIX",
    "STREET_NAME",
    "_ADDRESS_APARTMENT_NUM",
    "_ADDRESS_LINE2",
    "_REGISTRATION_CITY",
    "STATE_NAME",
    "ZIP_CODE",
    "MAIL_ADDRESS_LINE1",
    "MAIL_ADDRESS_LINE2",
    "MAIL_CITY",
    "MAIL_STATE",
    "MAIL_ZIP_CODE",
    "_LASTVOTE",
    "_PRECINCT_CODE",
    "PRECINCT_SPLIT",
    "_LAST_CHANGE_DATE",
    "_LEGACY_SYSTEM_ID",
    "_DISTRICT1", "_DISTRICT2", "_DISTRICT3", "_DISTRICT4", "_DISTRICT5", "_DISTRICT6",
    "_DISTRICT7", "_DISTRICT8", "_DISTRICT9", "_DISTRICT10", "_DISTRICT11", "_DISTRICT12",
    "_DISTRICT13", "_DISTRICT14", "_DISTRICT15", "_DISTRICT16", "_DISTRICT17", "_DISTRICT18",
    "_DISTRICT19", "_DISTRICT20", "_DISTRICT21", "_DISTRICT22", "_DISTRICT23", "_DISTRICT24",
    "_DISTRICT25", "_DISTRICT26", "_DISTRICT27", "_DISTRICT28", "_DISTRICT29", "_DISTRICT30",
    "_DISTRICT31", "_DISTRICT32", "_DISTRICT33", "_DISTRICT34", "_DISTRICT35", "_DISTRICT36",
    "_DISTRICT37", "_DISTRICT38", "_DISTRICT39", "_DISTRICT40",
    "_VOTEHISTORY_1", "_VOTEHISTORY_2", "_VOTEHISTORY_3", "_VOTEHISTORY_4", "_VOTEHISTORY_5",
    "_VOTEHISTORY_6", "_VOTEHISTORY_7", "_VOTEHISTORY_8", "_VOTEHISTORY_9", "_VOTEHISTORY_10",
    "_VOTEHISTORY_11", "_VOTEHISTORY_12", "_VOTEHISTORY_13", "_VOTEHISTORY_14", "_VOTEHISTORY_15",
    "_VOTEHISTORY_16", "_VOTEHISTORY_17", "_VOTEHISTORY_18", "_VOTEHISTORY_19", "_VOTEHISTORY_20",
    "_VOTEHISTORY_21", "_VOTEHISTORY_22", "_VOTEHISTORY_23", "_VOTEHISTORY_24", "_VOTEHISTORY_25",
    "_VOTEHISTORY_26", "_VOTEHISTORY_27", "_VOTEHISTORY_28", "_VOTEHISTORY_29", "_VOTEHISTORY_30",
    "_VOTEHISTORY_31", "_VOTEHISTORY_32", "_VOTEHISTORY_33", "_VOTEHISTORY_34", "_VOTEHISTORY_35",
    "_VOTEHISTORY_36", "_VOTEHISTORY_37", "_VOTEHISTORY_38", "_VOTEHISTORY_39", "_VOTEHISTORY_40",
    "_VOTEHISTORY_41", "_VOTEHISTORY_42", "_VOTEHISTORY_43", "_VOTEHISTORY_44", "_VOTEHISTORY_45",
    "_VOTEHISTORY_46", "_VOTEHISTORY_47", "_VOTEHISTORY_48", "_VOTEHISTORY_49", "_VOTEHISTORY_50",
    "_VOTEHISTORY_51", "_VOTEHISTORY_52", "_VOTEHISTORY_53", "_VOTEHISTORY_54", "_VOTEHISTORY_55",
    "_VOTEHISTORY_56", "_VOTEHISTORY_57", "_VOTEHISTORY_58", "_VOTEHISTORY_59", "_VOTEHISTORY_60",
    "_VOTEHISTORY_61", "_VOTEHISTORY_62", "_VOTEHISTORY_63", "_VOTEHISTORY_64", "_VOTEHISTORY_65",
    "_VOTEHISTORY_66", "_VOTEHISTORY_67", "_VOTEHISTORY_68", "_VOTEHISTORY_69", "_VOTEHISTORY_70",
    "_VOTEHISTORY_71", "_VOTEHISTORY_72", "_VOTEHISTORY_73", "_VOTEHISTORY_74", "_VOTEHISTORY_75",
    "_VOTEHISTORY_76", "_VOTEHISTORY_77", "_VOTEHISTORY_78", "_VOTEHISTORY_79", "_VOTEHISTORY_80",
    "PHONE",
    "COUNTYCODE",
    "MAIL_COUNTRY",
];

pub const FORMAT: StateFormat = StateFormat::delimited(StateCode::Pa, "%m/%d/%Y", b'\t')
    .headerless(INPUT_FIELDS)
    .with_default_file("Statewide");

/// District kinds whose `_DISTRICTn` column is chosen per county
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Precinct,
    PrecinctSplit,
    CountyBoard,
    SchoolBoard,
}

impl Zone {
    /// Column used when the county's zone types do not name one
    pub fn default_column(&self) -> usize {
        match self {
            Zone::Precinct => 1,
            Zone::PrecinctSplit => 13,
            Zone::CountyBoard => 9,
            Zone::SchoolBoard => 3,
        }
    }

    /// Classify a zone type description such as "School District"
    pub fn classify(zone_type: &str) -> Option<Zone> {
        let lower = zone_type.trim().to_lowercase();

        if lower.contains("school") {
            Some(Zone::SchoolBoard)
        } else if lower.contains("precinct split") {
            Some(Zone::PrecinctSplit)
        } else if lower.contains("precinct") {
            Some(Zone::Precinct)
        } else if lower == "county" {
            Some(Zone::CountyBoard)
        } else {
            None
        }
    }
}

/// Per-county district column assignments from the Zone Types files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneColumns {
    by_county: HashMap<String, HashMap<Zone, usize>>,
}

impl ZoneColumns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one zone type line. Lines with an unrecognised zone type or a
    /// non-numeric column are ignored.
    pub fn record(&mut self, county: &str, column: &str, zone_type: &str) {
        let (Some(zone), Ok(column)) = (Zone::classify(zone_type), column.trim().parse()) else {
            return;
        };
        self.by_county
            .entry(county.trim().to_string())
            .or_default()
            .insert(zone, column);
    }

    /// District column for a county, falling back to the zone's default
    pub fn column(&self, county: &str, zone: Zone) -> usize {
        self.by_county
            .get(county.trim())
            .and_then(|zones| zones.get(&zone))
            .copied()
            .unwrap_or_else(|| zone.default_column())
    }

    pub fn county_count(&self) -> usize {
        self.by_county.len()
    }
}

fn district(row: &RawRow, column: usize) -> FieldValue {
    FieldValue::non_blank(row.get(&format!("_DISTRICT{}", column)).trim())
}

/// First district number in the code, or the code itself when it has none
fn district_number(row: &RawRow, column: usize) -> FieldValue {
    let code = row.get(&format!("_DISTRICT{}", column)).trim();
    match first_district_number(code) {
        Some(number) => number.into(),
        None => FieldValue::non_blank(code),
    }
}

pub struct PennsylvaniaTransformer {
    parser: Arc<AddressParser>,
    columns: ColumnMap,
    party_map: CodeTable,
    zones: ZoneColumns,
    /// ZIP codes seen per registration city, for rows that omit the ZIP
    zip_cache: HashMap<String, BTreeSet<String>>,
}

impl PennsylvaniaTransformer {
    pub fn new(parser: Arc<AddressParser>, zones: ZoneColumns) -> Self {
        debug!("PA zone columns loaded for {} counties", zones.county_count());
        let columns = ColumnMap::new()
            .column(TITLE, "TITLE")
            .column_or(FIRST_NAME, "FIRST_NAME", "_")
            .column(MIDDLE_NAME, "MIDDLE_NAME")
            .column_or(LAST_NAME, "LAST_NAME", "_")
            .column(NAME_SUFFIX, "NAME_SUFFIX")
            .column(PHONE, "PHONE")
            .column_or(GENDER, "GENDER", "U")
            .constant(RACE, race::UNKNOWN)
            .nulls(&[EMAIL, DO_NOT_CALL_STATUS, BIRTH_STATE, LANGUAGE_CHOICE, ABSENTEE_TYPE])
            .column(COUNTYCODE, "COUNTYCODE")
            .column(STATE_VOTER_REF, "STATE_VOTER_REF")
            .column(COUNTY_VOTER_REF, "STATE_VOTER_REF")
            .column(REGISTRATION_STATUS, "REGISTRATION_STATUS")
            .column(MAIL_ADDRESS_LINE1, "MAIL_ADDRESS_LINE1")
            .column(MAIL_ADDRESS_LINE2, "MAIL_ADDRESS_LINE2")
            .column(MAIL_CITY, "MAIL_CITY")
            .column(MAIL_STATE, "MAIL_STATE")
            .column(MAIL_ZIP_CODE, "MAIL_ZIP_CODE")
            .column(MAIL_COUNTRY, "MAIL_COUNTRY");

        Self {
            parser,
            columns,
            party_map: CodeTable::new(
                "PA party",
                &[
                    ("D", "DEM"),
                    ("R", "REP"),
                    ("IND", "IDP"),
                    ("LN", "LIB"),
                    ("GR", "GRN"),
                    ("", "UN"),
                    ("I", "UN"),
                    ("INDE", "UN"),
                    ("NF", "UN"),
                    ("NON", "UN"),
                    ("NO", "UN"),
                    ("NOP", "UN"),
                    ("OTH", "OTH"),
                    ("WFP", "WOR"),
                    ("C", "CON"),
                ],
            ),
            zones,
            zip_cache: HashMap::new(),
        }
    }

    fn zone(&self, row: &RawRow, zone: Zone) -> FieldValue {
        district(row, self.zones.column(row.get("COUNTYCODE"), zone))
    }

    /// Remember the row's ZIP for its city, or recover a ZIP the city
    /// unambiguously had on earlier rows
    fn resolve_zip(&mut self, city: &str, zip: &str) -> Option<String> {
        if !zip.is_empty() {
            self.zip_cache
                .entry(city.to_string())
                .or_default()
                .insert(zip.to_string());
            return Some(zip.to_string());
        }
        match self.zip_cache.get(city) {
            Some(zips) if zips.len() == 1 => zips.iter().next().cloned(),
            _ => None,
        }
    }
}

impl FieldExtractor for PennsylvaniaTransformer {
    fn state(&self) -> StateCode {
        StateCode::Pa
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
                convert_date_opt(row.get("BIRTHDATE"), FORMAT.date_format)?,
            )
            .with(BIRTHDATE_IS_ESTIMATE, estimate::EXACT))
    }

    fn extract_registration_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let mut address = construct_val(
            row,
            &["ADDRESS_NUMBER", "ADDRESS_NUMBER_SUFFIX", "STREET_NAME"],
        );
        if let Some(apartment) = row.opt("_ADDRESS_APARTMENT_NUM") {
            address = format!("{} Apt {}", address, apartment);
        }
        let line2 = row.opt("_ADDRESS_LINE2");
        if let Some(line2) = line2 {
            address = format!("{}, {}", address, line2);
        }

        let city = row.get("_REGISTRATION_CITY").trim();
        let zip = self.resolve_zip(city, row.get("ZIP_CODE").trim());

        Ok(ResidentialAddress::new(address)
            .raw_addr2(FieldValue::from(line2))
            .raw_city(city)
            .raw_zip(row.get("ZIP_CODE"))
            .place_name(city)
            .state_name(row.opt("STATE_NAME").unwrap_or("PA"))
            .zip_code(zip)
            .build(&self.parser))
    }

    fn extract_registration_date(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(
            REGISTRATION_DATE,
            convert_date_opt(row.get("REGISTRATION_DATE"), FORMAT.date_format)?,
        ))
    }

    /// Party codes outside the table leave PARTY null
    fn extract_party(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(PARTY, self.party_map.get_or_null(row.get("_PARTY_CODE"))))
    }

    /// Codes look like "CG14", "CON18TH", "CN04" or "6USCD"
    fn extract_congressional_dist(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(CONGRESSIONAL_DIST, district_number(row, 8)))
    }

    /// Codes look like "S47", "SENT35" or "48SSGA"
    fn extract_upper_house_dist(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(UPPER_HOUSE_DIST, district_number(row, 7)))
    }

    fn extract_lower_house_dist(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(LOWER_HOUSE_DIST, district_number(row, 6)))
    }

    fn extract_precinct(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new()
            .with(PRECINCT, self.zone(row, Zone::Precinct))
            .with(PRECINCT_SPLIT, self.zone(row, Zone::PrecinctSplit)))
    }

    fn extract_county_board_dist(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(COUNTY_BOARD_DIST, self.zone(row, Zone::CountyBoard)))
    }

    fn extract_school_board_dist(&mut self, row: &RawRow) -> Result<VoterRecord> {
        Ok(VoterRecord::new().with(SCHOOL_BOARD_DIST, self.zone(row, Zone::SchoolBoard)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_classification() {
        assert_eq!(Zone::classify("School District"), Some(Zone::SchoolBoard));
        assert_eq!(Zone::classify("Precinct Split"), Some(Zone::PrecinctSplit));
        assert_eq!(Zone::classify("PRECINCT"), Some(Zone::Precinct));
        assert_eq!(Zone::classify("County"), Some(Zone::CountyBoard));
        assert_eq!(Zone::classify("County Commissioner"), None);
    }

    #[test]
    fn test_zone_columns_fall_back_to_defaults() {
        let mut zones = ZoneColumns::new();
        zones.record("ADAMS", "4", "School District");
        zones.record("ADAMS", "x", "Precinct");

        assert_eq!(zones.column("ADAMS", Zone::SchoolBoard), 4);
        assert_eq!(zones.column("ADAMS", Zone::Precinct), 1);
        assert_eq!(zones.column("BUCKS", Zone::PrecinctSplit), 13);
    }

    #[test]
    fn test_input_field_count() {
        assert_eq!(INPUT_FIELDS.len(), 153);
        assert_eq!(INPUT_FIELDS[30], "_DISTRICT1");
        assert_eq!(INPUT_FIELDS[152], "MAIL_COUNTRY");
    }
}
