//! Application constants for the voter normalizer
//!
//! Canonical field names, enumerated vocabularies, placeholders and the
//! default state selection used throughout the normalization pipeline.

// =============================================================================
// Canonical Field Names
// =============================================================================

/// Field names of the canonical voter record
pub mod fields {
    // Name
    pub const TITLE: &str = "TITLE";
    pub const FIRST_NAME: &str = "FIRST_NAME";
    pub const MIDDLE_NAME: &str = "MIDDLE_NAME";
    pub const LAST_NAME: &str = "LAST_NAME";
    pub const NAME_SUFFIX: &str = "NAME_SUFFIX";

    // Demographics
    pub const GENDER: &str = "GENDER";
    pub const RACE: &str = "RACE";
    pub const BIRTHDATE: &str = "BIRTHDATE";
    pub const BIRTHDATE_IS_ESTIMATE: &str = "BIRTHDATE_IS_ESTIMATE";
    pub const BIRTH_STATE: &str = "BIRTH_STATE";
    pub const LANGUAGE_CHOICE: &str = "LANGUAGE_CHOICE";

    // Contact
    pub const EMAIL: &str = "EMAIL";
    pub const PHONE: &str = "PHONE";
    pub const DO_NOT_CALL_STATUS: &str = "DO_NOT_CALL_STATUS";

    // Structured residential address
    pub const ADDRESS_NUMBER: &str = "ADDRESS_NUMBER";
    pub const ADDRESS_NUMBER_PREFIX: &str = "ADDRESS_NUMBER_PREFIX";
    pub const ADDRESS_NUMBER_SUFFIX: &str = "ADDRESS_NUMBER_SUFFIX";
    pub const BUILDING_NAME: &str = "BUILDING_NAME";
    pub const CORNER_OF: &str = "CORNER_OF";
    pub const INTERSECTION_SEPARATOR: &str = "INTERSECTION_SEPARATOR";
    pub const LANDMARK_NAME: &str = "LANDMARK_NAME";
    pub const NOT_ADDRESS: &str = "NOT_ADDRESS";
    pub const OCCUPANCY_TYPE: &str = "OCCUPANCY_TYPE";
    pub const OCCUPANCY_IDENTIFIER: &str = "OCCUPANCY_IDENTIFIER";
    pub const PLACE_NAME: &str = "PLACE_NAME";
    pub const STATE_NAME: &str = "STATE_NAME";
    pub const STREET_NAME: &str = "STREET_NAME";
    pub const STREET_NAME_PRE_DIRECTIONAL: &str = "STREET_NAME_PRE_DIRECTIONAL";
    pub const STREET_NAME_PRE_MODIFIER: &str = "STREET_NAME_PRE_MODIFIER";
    pub const STREET_NAME_PRE_TYPE: &str = "STREET_NAME_PRE_TYPE";
    pub const STREET_NAME_POST_DIRECTIONAL: &str = "STREET_NAME_POST_DIRECTIONAL";
    pub const STREET_NAME_POST_MODIFIER: &str = "STREET_NAME_POST_MODIFIER";
    pub const STREET_NAME_POST_TYPE: &str = "STREET_NAME_POST_TYPE";
    pub const SUBADDRESS_IDENTIFIER: &str = "SUBADDRESS_IDENTIFIER";
    pub const SUBADDRESS_TYPE: &str = "SUBADDRESS_TYPE";
    pub const USPS_BOX_GROUP_ID: &str = "USPS_BOX_GROUP_ID";
    pub const USPS_BOX_GROUP_TYPE: &str = "USPS_BOX_GROUP_TYPE";
    pub const USPS_BOX_ID: &str = "USPS_BOX_ID";
    pub const USPS_BOX_TYPE: &str = "USPS_BOX_TYPE";
    pub const ZIP_CODE: &str = "ZIP_CODE";

    // Raw residential fallback
    pub const RAW_ADDR1: &str = "RAW_ADDR1";
    pub const RAW_ADDR2: &str = "RAW_ADDR2";
    pub const RAW_CITY: &str = "RAW_CITY";
    pub const RAW_ZIP: &str = "RAW_ZIP";
    pub const VALIDATION_STATUS: &str = "VALIDATION_STATUS";

    // Mailing address
    pub const MAIL_ADDRESS_LINE1: &str = "MAIL_ADDRESS_LINE1";
    pub const MAIL_ADDRESS_LINE2: &str = "MAIL_ADDRESS_LINE2";
    pub const MAIL_CITY: &str = "MAIL_CITY";
    pub const MAIL_STATE: &str = "MAIL_STATE";
    pub const MAIL_ZIP_CODE: &str = "MAIL_ZIP_CODE";
    pub const MAIL_COUNTRY: &str = "MAIL_COUNTRY";

    // Political and jurisdictional
    pub const COUNTYCODE: &str = "COUNTYCODE";
    pub const STATE_VOTER_REF: &str = "STATE_VOTER_REF";
    pub const COUNTY_VOTER_REF: &str = "COUNTY_VOTER_REF";
    pub const REGISTRATION_DATE: &str = "REGISTRATION_DATE";
    pub const REGISTRATION_STATUS: &str = "REGISTRATION_STATUS";
    pub const ABSENTEE_TYPE: &str = "ABSENTEE_TYPE";
    pub const PARTY: &str = "PARTY";
    pub const CONGRESSIONAL_DIST: &str = "CONGRESSIONAL_DIST";
    pub const UPPER_HOUSE_DIST: &str = "UPPER_HOUSE_DIST";
    pub const LOWER_HOUSE_DIST: &str = "LOWER_HOUSE_DIST";
    pub const PRECINCT: &str = "PRECINCT";
    pub const PRECINCT_SPLIT: &str = "PRECINCT_SPLIT";
    pub const COUNTY_BOARD_DIST: &str = "COUNTY_BOARD_DIST";
    pub const SCHOOL_BOARD_DIST: &str = "SCHOOL_BOARD_DIST";

    /// The 26 structured residential fields produced from a tagged address
    pub const STRUCTURED_ADDRESS: &[&str] = &[
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
    ];

    /// Mailing fields, in the order they are written by mailing extractions
    pub const MAILING_ADDRESS: &[&str] = &[
        MAIL_ADDRESS_LINE1,
        MAIL_ADDRESS_LINE2,
        MAIL_CITY,
        MAIL_STATE,
        MAIL_ZIP_CODE,
        MAIL_COUNTRY,
    ];

    /// Street components used to rebuild a single address line, in street order
    pub const STREET_LINE: &[&str] = &[
        ADDRESS_NUMBER_PREFIX,
        ADDRESS_NUMBER,
        ADDRESS_NUMBER_SUFFIX,
        STREET_NAME_PRE_DIRECTIONAL,
        STREET_NAME_PRE_MODIFIER,
        STREET_NAME_PRE_TYPE,
        STREET_NAME,
        STREET_NAME_POST_TYPE,
        STREET_NAME_POST_MODIFIER,
        STREET_NAME_POST_DIRECTIONAL,
    ];

    /// Occupancy components used to rebuild a second address line
    pub const OCCUPANCY_LINE: &[&str] = &[OCCUPANCY_TYPE, OCCUPANCY_IDENTIFIER];
}

// =============================================================================
// Enumerated Vocabularies
// =============================================================================

/// Party codes accepted in every state
pub mod party {
    pub const DEMOCRAT: &str = "DEM";
    pub const REPUBLICAN: &str = "REP";
    pub const UNAFFILIATED: &str = "UN";
    pub const OTHER: &str = "OTH";

    pub const VOCABULARY: &[&str] = &[
        "DEM", // Democrat
        "REP", // Republican
        "AI",  // American Independent
        "PF",  // Peace and Freedom
        "AMC", // American Constitution
        "GRN", // Green
        "LIB", // Libertarian
        "ECO", // Ecology
        "IDP", // Independence Party
        "PSL", // Party for Socialism and Liberation
        "REF", // Reform Party
        "SAP", // Sapient
        "CON", // Conservative
        "WOR", // Working Families
        "WEP", // Women's Equality
        "SCC", // Stop Common Core
        "NLP", // Natural Law
        "SP",  // Socialist
        "UTY", // Unity
        "AE",  // Americans Elect
        "AMP", // American Patriot Party
        "OTH", // otherwise
        "UN",  // Unaffiliated
    ];
}

pub mod gender {
    pub const MALE: &str = "M";
    pub const FEMALE: &str = "F";
    pub const UNKNOWN: &str = "U";

    pub const VOCABULARY: &[&str] = &[MALE, FEMALE, UNKNOWN];
}

pub mod race {
    pub const UNKNOWN: &str = "U";

    pub const VOCABULARY: &[&str] = &[
        "I", // American Indian or Alaskan Native
        "A", // Asian or Pacific Islander
        "B", // Black, not Hispanic
        "H", // Hispanic
        "W", // White, not Hispanic
        "O", // Other
        "M", // Multi-racial
        "U", // Unknown
    ];
}

/// VALIDATION_STATUS codes; see [`crate::models::ValidationStatus`]
pub mod validation_status {
    pub const UNPARSABLE: &str = "1";
    pub const PARSED: &str = "2";
    pub const MANUAL_OVERRIDE: &str = "3";
    pub const VALIDATED: &str = "4";
    pub const REJECTED: &str = "5";

    pub const VOCABULARY: &[&str] = &[UNPARSABLE, PARSED, MANUAL_OVERRIDE, VALIDATED, REJECTED];
}

// =============================================================================
// Placeholders and Defaults
// =============================================================================

/// Stand-in for a required raw address field the source left blank
pub const NOT_PROVIDED: &str = "--Not provided--";

/// Single-space placeholder for a mailing line with no usable components
pub const EMPTY_LINE: &str = " ";

/// Country written when the mailing address is copied from the residence
pub const DEFAULT_MAIL_COUNTRY: &str = "USA";

/// Estimate flags written alongside BIRTHDATE
pub mod estimate {
    pub const ESTIMATED: &str = "Y";
    pub const EXACT: &str = "N";
}

/// States processed when `all` is requested on the command line
pub const DEFAULT_STATES: &[&str] = &["co", "fl", "mi", "nc", "ny", "ok", "pa", "wa"];

/// Default data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "data";
