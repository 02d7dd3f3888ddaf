//! Word lists used by the rule tagger. All entries are upper case with
//! periods removed.

pub const STATE_ABBREVIATIONS: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH",
    "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY", "PR", "VI", "GU", "AS", "MP", "AA", "AE", "AP",
];

pub const DIRECTIONALS: &[&str] = &[
    "N", "S", "E", "W", "NE", "NW", "SE", "SW", "NORTH", "SOUTH", "EAST", "WEST", "NORTHEAST",
    "NORTHWEST", "SOUTHEAST", "SOUTHWEST",
];

pub const STREET_TYPES: &[&str] = &[
    "ALY", "ALLEY", "AVE", "AV", "AVENUE", "BLVD", "BOULEVARD", "BND", "BEND", "BR", "BRANCH",
    "CIR", "CIRCLE", "CT", "COURT", "CTS", "CV", "COVE", "CRES", "CRESCENT", "CRK", "CREEK",
    "CSWY", "CAUSEWAY", "DR", "DRIVE", "EXPY", "EXPRESSWAY", "FWY", "FREEWAY", "GRV", "GROVE",
    "HTS", "HEIGHTS", "HWY", "HIGHWAY", "HOLW", "HOLLOW", "LN", "LANE", "LOOP", "MALL", "PASS",
    "PATH", "PIKE", "PKWY", "PARKWAY", "PL", "PLACE", "PLZ", "PLAZA", "PT", "POINT", "RD", "ROAD",
    "RDG", "RIDGE", "ROW", "RUN", "SQ", "SQUARE", "ST", "STREET", "TER", "TERRACE", "TRCE",
    "TRACE", "TRL", "TRAIL", "TPKE", "TURNPIKE", "VW", "VIEW", "WALK", "WAY", "XING", "CROSSING",
];

/// Types written before the street name, as in "HWY 9"
pub const PRE_TYPES: &[&str] = &[
    "HWY", "HIGHWAY", "ROUTE", "RT", "RTE", "SR", "CR", "FM", "AVENUE", "CAMINO", "CALLE",
];

/// Modifiers that may precede a pre-type, as in "OLD HWY 9"
pub const PRE_MODIFIERS: &[&str] = &["OLD", "US", "STATE", "COUNTY"];

pub const POST_MODIFIERS: &[&str] = &["EXT", "EXTENSION"];

pub const OCCUPANCY_TYPES: &[&str] = &[
    "APT", "APARTMENT", "UNIT", "STE", "SUITE", "RM", "ROOM", "FL", "FLOOR", "LOT", "SPC",
    "SPACE", "TRLR", "DEPT",
];

pub const SUBADDRESS_TYPES: &[&str] = &["BLDG", "BUILDING", "WING"];

pub const INTERSECTION_SEPARATORS: &[&str] = &["&", "AND", "@"];

/// Box markers, longest first
pub const BOX_MARKERS: &[&[&str]] = &[
    &["POST", "OFFICE", "BOX"],
    &["P", "O", "BOX"],
    &["PO", "BOX"],
    &["POB"],
    &["BOX"],
];

/// Rural and highway contract route markers, longest first
pub const BOX_GROUP_MARKERS: &[&[&str]] = &[
    &["RURAL", "ROUTE"],
    &["RR"],
    &["HC"],
    &["HCR"],
];

pub fn is_one_of(word: &str, list: &[&str]) -> bool {
    list.contains(&word)
}
