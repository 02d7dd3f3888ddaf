//! Field extraction contract shared by all state transformers.
//!
//! Every canonical field belongs to exactly one [`ExtractionRole`]. A state
//! transformer implements [`FieldExtractor`], overriding the role methods it
//! handles in code and resolving the rest through its [`ColumnMap`]. A role
//! that is neither overridden nor mapped fails with
//! [`VoterError::NotImplemented`].

pub mod column_map;
pub mod helpers;

pub use column_map::{ColumnMap, ColumnSource};
pub use helpers::{
    CodeTable, MailingColumns, ResidentialAddress, construct_val, convert_components,
    convert_date, convert_date_opt, empty_residential_address, first_district_number,
    join_values, lenient_date, skip_chars, tagged_mailing, year_only_birthdate,
};

use crate::config::StateFormat;
use crate::constants::fields::{self, *};
use crate::error::{Result, VoterError};
use crate::models::{RawRow, StateCode, VoterRecord};
use std::fmt;

/// Named extraction operations, one per group of canonical fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExtractionRole {
    Name,
    Email,
    PhoneNumber,
    DoNotCallStatus,
    Gender,
    Race,
    BirthState,
    Birthdate,
    LanguageChoice,
    RegistrationAddress,
    CountyCode,
    MailingAddress,
    StateVoterRef,
    CountyVoterRef,
    RegistrationDate,
    RegistrationStatus,
    AbsenteeType,
    Party,
    CongressionalDist,
    UpperHouseDist,
    LowerHouseDist,
    Precinct,
    CountyBoardDist,
    SchoolBoardDist,
}

const REGISTRATION_ADDRESS_FIELDS: &[&str] = &[
    ADDRESS_NUMBER,
    ADDRESS_NUMBER_PREFIX,
    ADDRESS_NUMBER_SUFFIX,
    BUILDING_NAME,
    CORNER_OF,
    INTERSECTION_SEPARATOR,
    LANDMARK_NAME,
    NOT_ADDRESS,
    OCCUPANCY_TYPE,
    OCCUPANCY_IDENTIFIER,
    PLACE_NAME,
    STATE_NAME,
    STREET_NAME,
    STREET_NAME_PRE_DIRECTIONAL,
    STREET_NAME_PRE_MODIFIER,
    STREET_NAME_PRE_TYPE,
    STREET_NAME_POST_DIRECTIONAL,
    STREET_NAME_POST_MODIFIER,
    STREET_NAME_POST_TYPE,
    SUBADDRESS_IDENTIFIER,
    SUBADDRESS_TYPE,
    USPS_BOX_GROUP_ID,
    USPS_BOX_GROUP_TYPE,
    USPS_BOX_ID,
    USPS_BOX_TYPE,
    ZIP_CODE,
    RAW_ADDR1,
    RAW_ADDR2,
    RAW_CITY,
    RAW_ZIP,
    VALIDATION_STATUS,
];

impl ExtractionRole {
    pub const ALL: [ExtractionRole; 24] = [
        ExtractionRole::Name,
        ExtractionRole::Email,
        ExtractionRole::PhoneNumber,
        ExtractionRole::DoNotCallStatus,
        ExtractionRole::Gender,
        ExtractionRole::Race,
        ExtractionRole::BirthState,
        ExtractionRole::Birthdate,
        ExtractionRole::LanguageChoice,
        ExtractionRole::RegistrationAddress,
        ExtractionRole::CountyCode,
        ExtractionRole::MailingAddress,
        ExtractionRole::StateVoterRef,
        ExtractionRole::CountyVoterRef,
        ExtractionRole::RegistrationDate,
        ExtractionRole::RegistrationStatus,
        ExtractionRole::AbsenteeType,
        ExtractionRole::Party,
        ExtractionRole::CongressionalDist,
        ExtractionRole::UpperHouseDist,
        ExtractionRole::LowerHouseDist,
        ExtractionRole::Precinct,
        ExtractionRole::CountyBoardDist,
        ExtractionRole::SchoolBoardDist,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ExtractionRole::Name => "name",
            ExtractionRole::Email => "email",
            ExtractionRole::PhoneNumber => "phone_number",
            ExtractionRole::DoNotCallStatus => "do_not_call_status",
            ExtractionRole::Gender => "gender",
            ExtractionRole::Race => "race",
            ExtractionRole::BirthState => "birth_state",
            ExtractionRole::Birthdate => "birthdate",
            ExtractionRole::LanguageChoice => "language_choice",
            ExtractionRole::RegistrationAddress => "registration_address",
            ExtractionRole::CountyCode => "county_code",
            ExtractionRole::MailingAddress => "mailing_address",
            ExtractionRole::StateVoterRef => "state_voter_ref",
            ExtractionRole::CountyVoterRef => "county_voter_ref",
            ExtractionRole::RegistrationDate => "registration_date",
            ExtractionRole::RegistrationStatus => "registration_status",
            ExtractionRole::AbsenteeType => "absentee_type",
            ExtractionRole::Party => "party",
            ExtractionRole::CongressionalDist => "congressional_dist",
            ExtractionRole::UpperHouseDist => "upper_house_dist",
            ExtractionRole::LowerHouseDist => "lower_house_dist",
            ExtractionRole::Precinct => "precinct",
            ExtractionRole::CountyBoardDist => "county_board_dist",
            ExtractionRole::SchoolBoardDist => "school_board_dist",
        }
    }

    /// Canonical fields this role contributes
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            ExtractionRole::Name => &[TITLE, FIRST_NAME, MIDDLE_NAME, LAST_NAME, NAME_SUFFIX],
            ExtractionRole::Email => &[EMAIL],
            ExtractionRole::PhoneNumber => &[PHONE],
            ExtractionRole::DoNotCallStatus => &[DO_NOT_CALL_STATUS],
            ExtractionRole::Gender => &[GENDER],
            ExtractionRole::Race => &[RACE],
            ExtractionRole::BirthState => &[BIRTH_STATE],
            ExtractionRole::Birthdate => &[BIRTHDATE, BIRTHDATE_IS_ESTIMATE],
            ExtractionRole::LanguageChoice => &[LANGUAGE_CHOICE],
            ExtractionRole::RegistrationAddress => REGISTRATION_ADDRESS_FIELDS,
            ExtractionRole::CountyCode => &[COUNTYCODE],
            ExtractionRole::MailingAddress => fields::MAILING_ADDRESS,
            ExtractionRole::StateVoterRef => &[STATE_VOTER_REF],
            ExtractionRole::CountyVoterRef => &[COUNTY_VOTER_REF],
            ExtractionRole::RegistrationDate => &[REGISTRATION_DATE],
            ExtractionRole::RegistrationStatus => &[REGISTRATION_STATUS],
            ExtractionRole::AbsenteeType => &[ABSENTEE_TYPE],
            ExtractionRole::Party => &[PARTY],
            ExtractionRole::CongressionalDist => &[CONGRESSIONAL_DIST],
            ExtractionRole::UpperHouseDist => &[UPPER_HOUSE_DIST],
            ExtractionRole::LowerHouseDist => &[LOWER_HOUSE_DIST],
            ExtractionRole::Precinct => &[PRECINCT, PRECINCT_SPLIT],
            ExtractionRole::CountyBoardDist => &[COUNTY_BOARD_DIST],
            ExtractionRole::SchoolBoardDist => &[SCHOOL_BOARD_DIST],
        }
    }

    /// Role that owns a canonical field
    pub fn for_field(field: &str) -> Option<ExtractionRole> {
        Self::ALL
            .into_iter()
            .find(|role| role.fields().contains(&field))
    }
}

impl fmt::Display for ExtractionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The per-state extraction interface.
///
/// Each role method returns the record fragment for that role. The default
/// bodies resolve through [`FieldExtractor::column_map`].
pub trait FieldExtractor {
    fn state(&self) -> StateCode;

    fn format(&self) -> &StateFormat;

    /// Declarative column mappings for roles the state does not handle in code
    fn column_map(&self) -> Option<&ColumnMap> {
        None
    }

    /// Resolve a role through the column map
    fn mapped(&self, role: ExtractionRole, row: &RawRow) -> Result<VoterRecord> {
        match self.column_map() {
            Some(map) if map.covers(role) => Ok(map.resolve(role, row)),
            _ => Err(VoterError::NotImplemented {
                state: self.state().to_string(),
                role,
            }),
        }
    }

    fn extract_name(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::Name, row)
    }

    fn extract_email(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::Email, row)
    }

    fn extract_phone_number(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::PhoneNumber, row)
    }

    fn extract_do_not_call_status(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::DoNotCallStatus, row)
    }

    fn extract_gender(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::Gender, row)
    }

    fn extract_race(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::Race, row)
    }

    fn extract_birth_state(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::BirthState, row)
    }

    fn extract_birthdate(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::Birthdate, row)
    }

    fn extract_language_choice(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::LanguageChoice, row)
    }

    fn extract_registration_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::RegistrationAddress, row)
    }

    fn extract_county_code(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::CountyCode, row)
    }

    fn extract_mailing_address(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::MailingAddress, row)
    }

    fn extract_state_voter_ref(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::StateVoterRef, row)
    }

    fn extract_county_voter_ref(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::CountyVoterRef, row)
    }

    fn extract_registration_date(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::RegistrationDate, row)
    }

    fn extract_registration_status(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::RegistrationStatus, row)
    }

    fn extract_absentee_type(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::AbsenteeType, row)
    }

    fn extract_party(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::Party, row)
    }

    fn extract_congressional_dist(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::CongressionalDist, row)
    }

    fn extract_upper_house_dist(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::UpperHouseDist, row)
    }

    fn extract_lower_house_dist(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::LowerHouseDist, row)
    }

    fn extract_precinct(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::Precinct, row)
    }

    fn extract_county_board_dist(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::CountyBoardDist, row)
    }

    fn extract_school_board_dist(&mut self, row: &RawRow) -> Result<VoterRecord> {
        self.mapped(ExtractionRole::SchoolBoardDist, row)
    }

    /// Run one role against a row
    fn extract(&mut self, role: ExtractionRole, row: &RawRow) -> Result<VoterRecord> {
        match role {
            ExtractionRole::Name => self.extract_name(row),
            ExtractionRole::Email => self.extract_email(row),
            ExtractionRole::PhoneNumber => self.extract_phone_number(row),
            ExtractionRole::DoNotCallStatus => self.extract_do_not_call_status(row),
            ExtractionRole::Gender => self.extract_gender(row),
            ExtractionRole::Race => self.extract_race(row),
            ExtractionRole::BirthState => self.extract_birth_state(row),
            ExtractionRole::Birthdate => self.extract_birthdate(row),
            ExtractionRole::LanguageChoice => self.extract_language_choice(row),
            ExtractionRole::RegistrationAddress => self.extract_registration_address(row),
            ExtractionRole::CountyCode => self.extract_county_code(row),
            ExtractionRole::MailingAddress => self.extract_mailing_address(row),
            ExtractionRole::StateVoterRef => self.extract_state_voter_ref(row),
            ExtractionRole::CountyVoterRef => self.extract_county_voter_ref(row),
            ExtractionRole::RegistrationDate => self.extract_registration_date(row),
            ExtractionRole::RegistrationStatus => self.extract_registration_status(row),
            ExtractionRole::AbsenteeType => self.extract_absentee_type(row),
            ExtractionRole::Party => self.extract_party(row),
            ExtractionRole::CongressionalDist => self.extract_congressional_dist(row),
            ExtractionRole::UpperHouseDist => self.extract_upper_house_dist(row),
            ExtractionRole::LowerHouseDist => self.extract_lower_house_dist(row),
            ExtractionRole::Precinct => self.extract_precinct(row),
            ExtractionRole::CountyBoardDist => self.extract_county_board_dist(row),
            ExtractionRole::SchoolBoardDist => self.extract_school_board_dist(row),
        }
    }
}
