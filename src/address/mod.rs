//! Free-text address tagging and mailing-line reconstruction.
//!
//! A [`Tagger`] splits an address string into labelled components. The
//! [`AddressParser`] wraps any tagger, absorbs its repeated-label failures,
//! reclassifies the result as a street address or PO box and rebuilds the
//! two single-line mailing representations from the components.

pub mod lexicon;
pub mod rules;

#[cfg(test)]
pub mod tests;

pub use rules::RuleTagger;

use crate::constants::{EMPTY_LINE, fields};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Component labels assigned by a tagger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    AddressNumberPrefix,
    AddressNumber,
    AddressNumberSuffix,
    BuildingName,
    CornerOf,
    IntersectionSeparator,
    LandmarkName,
    NotAddress,
    OccupancyType,
    OccupancyIdentifier,
    PlaceName,
    StateName,
    StreetNamePreModifier,
    StreetNamePreDirectional,
    StreetNamePreType,
    StreetName,
    StreetNamePostType,
    StreetNamePostModifier,
    StreetNamePostDirectional,
    SubaddressType,
    SubaddressIdentifier,
    USPSBoxGroupType,
    USPSBoxGroupID,
    USPSBoxType,
    USPSBoxID,
    ZipCode,
    SecondStreetNamePreDirectional,
    SecondStreetName,
    SecondStreetNamePostType,
    SecondStreetNamePostDirectional,
}

impl Label {
    /// Tagger label name
    pub fn name(&self) -> &'static str {
        match self {
            Label::AddressNumberPrefix => "AddressNumberPrefix",
            Label::AddressNumber => "AddressNumber",
            Label::AddressNumberSuffix => "AddressNumberSuffix",
            Label::BuildingName => "BuildingName",
            Label::CornerOf => "CornerOf",
            Label::IntersectionSeparator => "IntersectionSeparator",
            Label::LandmarkName => "LandmarkName",
            Label::NotAddress => "NotAddress",
            Label::OccupancyType => "OccupancyType",
            Label::OccupancyIdentifier => "OccupancyIdentifier",
            Label::PlaceName => "PlaceName",
            Label::StateName => "StateName",
            Label::StreetNamePreModifier => "StreetNamePreModifier",
            Label::StreetNamePreDirectional => "StreetNamePreDirectional",
            Label::StreetNamePreType => "StreetNamePreType",
            Label::StreetName => "StreetName",
            Label::StreetNamePostType => "StreetNamePostType",
            Label::StreetNamePostModifier => "StreetNamePostModifier",
            Label::StreetNamePostDirectional => "StreetNamePostDirectional",
            Label::SubaddressType => "SubaddressType",
            Label::SubaddressIdentifier => "SubaddressIdentifier",
            Label::USPSBoxGroupType => "USPSBoxGroupType",
            Label::USPSBoxGroupID => "USPSBoxGroupID",
            Label::USPSBoxType => "USPSBoxType",
            Label::USPSBoxID => "USPSBoxID",
            Label::ZipCode => "ZipCode",
            Label::SecondStreetNamePreDirectional => "SecondStreetNamePreDirectional",
            Label::SecondStreetName => "SecondStreetName",
            Label::SecondStreetNamePostType => "SecondStreetNamePostType",
            Label::SecondStreetNamePostDirectional => "SecondStreetNamePostDirectional",
        }
    }

    /// Canonical record field for this label. Second-street labels of an
    /// intersection have no canonical field.
    pub fn field(&self) -> Option<&'static str> {
        let field = match self {
            Label::AddressNumberPrefix => fields::ADDRESS_NUMBER_PREFIX,
            Label::AddressNumber => fields::ADDRESS_NUMBER,
            Label::AddressNumberSuffix => fields::ADDRESS_NUMBER_SUFFIX,
            Label::BuildingName => fields::BUILDING_NAME,
            Label::CornerOf => fields::CORNER_OF,
            Label::IntersectionSeparator => fields::INTERSECTION_SEPARATOR,
            Label::LandmarkName => fields::LANDMARK_NAME,
            Label::NotAddress => fields::NOT_ADDRESS,
            Label::OccupancyType => fields::OCCUPANCY_TYPE,
            Label::OccupancyIdentifier => fields::OCCUPANCY_IDENTIFIER,
            Label::PlaceName => fields::PLACE_NAME,
            Label::StateName => fields::STATE_NAME,
            Label::StreetNamePreModifier => fields::STREET_NAME_PRE_MODIFIER,
            Label::StreetNamePreDirectional => fields::STREET_NAME_PRE_DIRECTIONAL,
            Label::StreetNamePreType => fields::STREET_NAME_PRE_TYPE,
            Label::StreetName => fields::STREET_NAME,
            Label::StreetNamePostType => fields::STREET_NAME_POST_TYPE,
            Label::StreetNamePostModifier => fields::STREET_NAME_POST_MODIFIER,
            Label::StreetNamePostDirectional => fields::STREET_NAME_POST_DIRECTIONAL,
            Label::SubaddressType => fields::SUBADDRESS_TYPE,
            Label::SubaddressIdentifier => fields::SUBADDRESS_IDENTIFIER,
            Label::USPSBoxGroupType => fields::USPS_BOX_GROUP_TYPE,
            Label::USPSBoxGroupID => fields::USPS_BOX_GROUP_ID,
            Label::USPSBoxType => fields::USPS_BOX_TYPE,
            Label::USPSBoxID => fields::USPS_BOX_ID,
            Label::ZipCode => fields::ZIP_CODE,
            Label::SecondStreetNamePreDirectional
            | Label::SecondStreetName
            | Label::SecondStreetNamePostType
            | Label::SecondStreetNamePostDirectional => return None,
        };
        Some(field)
    }

    /// Labels making up the first mailing line of a street address, in output order
    pub const STREET_LINE: [Label; 10] = [
        Label::AddressNumberPrefix,
        Label::AddressNumber,
        Label::AddressNumberSuffix,
        Label::StreetNamePreDirectional,
        Label::StreetNamePreModifier,
        Label::StreetNamePreType,
        Label::StreetName,
        Label::StreetNamePostType,
        Label::StreetNamePostModifier,
        Label::StreetNamePostDirectional,
    ];

    /// Labels making up the first mailing line of a PO box
    pub const PO_BOX_LINE: [Label; 2] = [Label::USPSBoxType, Label::USPSBoxID];

    /// Labels making up the second mailing line
    pub const OCCUPANCY_LINE: [Label; 2] = [Label::OccupancyType, Label::OccupancyIdentifier];
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classification of a tagged address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    Street,
    PoBox,
    Ambiguous,
    Intersection,
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AddressKind::Street => "Street Address",
            AddressKind::PoBox => "PO Box",
            AddressKind::Ambiguous => "Ambiguous",
            AddressKind::Intersection => "Intersection",
        };
        f.write_str(label)
    }
}

/// Labelled components of one address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressComponents {
    parts: BTreeMap<Label, String>,
}

impl AddressComponents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: Label, value: impl Into<String>) {
        self.parts.insert(label, value.into());
    }

    /// Append text to a label, space separated
    pub fn push(&mut self, label: Label, value: &str) {
        self.parts
            .entry(label)
            .and_modify(|existing| {
                existing.push(' ');
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    pub fn get(&self, label: Label) -> Option<&str> {
        self.parts.get(&label).map(String::as_str)
    }

    pub fn contains(&self, label: Label) -> bool {
        self.parts.contains_key(&label)
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Label, &str)> {
        self.parts.iter().map(|(label, value)| (*label, value.as_str()))
    }

    /// Join the values of the given labels, skipping absent ones
    pub fn join(&self, labels: &[Label]) -> String {
        labels
            .iter()
            .filter_map(|label| self.get(*label))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FromIterator<(Label, String)> for AddressComponents {
    fn from_iter<I: IntoIterator<Item = (Label, String)>>(iter: I) -> Self {
        Self {
            parts: iter.into_iter().collect(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaggerError {
    #[error("Label {label} is assigned to more than one part of '{text}'")]
    RepeatedLabel { label: Label, text: String },
}

/// A free-text address tagger
pub trait Tagger: Send + Sync {
    fn tag(&self, text: &str) -> std::result::Result<(AddressComponents, AddressKind), TaggerError>;
}

/// Result of tagging a registration address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
    Parsed {
        components: AddressComponents,
        kind: AddressKind,
    },
    Unparsable,
}

/// Address parser layered over a [`Tagger`]
pub struct AddressParser {
    tagger: Box<dyn Tagger>,
}

impl fmt::Debug for AddressParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressParser").finish_non_exhaustive()
    }
}

impl Default for AddressParser {
    fn default() -> Self {
        Self::new(RuleTagger::new())
    }
}

impl AddressParser {
    pub fn new(tagger: impl Tagger + 'static) -> Self {
        Self {
            tagger: Box::new(tagger),
        }
    }

    /// Tag an address for the residential two-track pattern.
    ///
    /// A repeated label or an empty component set yields
    /// [`TagOutcome::Unparsable`]. The kind of a parsed address is PO box when
    /// a box id is present and street address otherwise, regardless of what
    /// the tagger proposed.
    pub fn tag(&self, text: &str) -> TagOutcome {
        match self.tagger.tag(text) {
            Ok((components, _)) if components.is_empty() => TagOutcome::Unparsable,
            Ok((components, _)) => {
                let kind = if components.contains(Label::USPSBoxID) {
                    AddressKind::PoBox
                } else {
                    AddressKind::Street
                };
                TagOutcome::Parsed { components, kind }
            }
            Err(e) => {
                debug!("Address tagging failed: {}", e);
                TagOutcome::Unparsable
            }
        }
    }

    /// Tag an address and keep the tagger's own classification
    pub fn tag_raw(
        &self,
        text: &str,
    ) -> std::result::Result<(AddressComponents, AddressKind), TaggerError> {
        self.tagger.tag(text)
    }

    /// First mailing line from tagged components
    pub fn construct_mail_address_1(components: &AddressComponents, kind: AddressKind) -> String {
        let line = match kind {
            AddressKind::Ambiguous | AddressKind::Intersection => return EMPTY_LINE.to_string(),
            AddressKind::Street => components.join(&Label::STREET_LINE),
            AddressKind::PoBox => components.join(&Label::PO_BOX_LINE),
        };
        non_empty_line(line)
    }

    /// Second mailing line from tagged components
    pub fn construct_mail_address_2(components: &AddressComponents) -> String {
        non_empty_line(components.join(&Label::OCCUPANCY_LINE))
    }
}

fn non_empty_line(line: String) -> String {
    if line.trim().is_empty() {
        EMPTY_LINE.to_string()
    } else {
        line
    }
}
