//! Declarative field mappings for the common "copy column X" case

use super::ExtractionRole;
use crate::models::{FieldValue, RawRow, VoterRecord};

/// Where a mapped canonical field takes its value from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSource {
    /// Trimmed column value, null when blank
    Column(&'static str),
    /// Trimmed column value, or the default when blank
    ColumnOr(&'static str, &'static str),
    Constant(&'static str),
    Null,
}

impl ColumnSource {
    fn resolve(&self, row: &RawRow) -> FieldValue {
        match self {
            ColumnSource::Column(column) => FieldValue::non_blank(row.get(column).trim()),
            ColumnSource::ColumnOr(column, default) => row.opt(column).unwrap_or(default).into(),
            ColumnSource::Constant(value) => (*value).into(),
            ColumnSource::Null => FieldValue::Null,
        }
    }
}

/// Canonical field to source mappings for one state
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    entries: Vec<(&'static str, ColumnSource)>,
}

impl ColumnMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(self, field: &'static str, column: &'static str) -> Self {
        self.with(field, ColumnSource::Column(column))
    }

    pub fn column_or(self, field: &'static str, column: &'static str, default: &'static str) -> Self {
        self.with(field, ColumnSource::ColumnOr(column, default))
    }

    pub fn constant(self, field: &'static str, value: &'static str) -> Self {
        self.with(field, ColumnSource::Constant(value))
    }

    pub fn null(self, field: &'static str) -> Self {
        self.with(field, ColumnSource::Null)
    }

    pub fn nulls(self, fields: &[&'static str]) -> Self {
        fields.iter().fold(self, |map, field| map.null(*field))
    }

    fn with(mut self, field: &'static str, source: ColumnSource) -> Self {
        self.entries.retain(|(existing, _)| *existing != field);
        self.entries.push((field, source));
        self
    }

    pub fn source(&self, field: &str) -> Option<&ColumnSource> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == field)
            .map(|(_, source)| source)
    }

    /// Whether any mapped field belongs to the role
    pub fn covers(&self, role: ExtractionRole) -> bool {
        self.entries
            .iter()
            .any(|(field, _)| role.fields().contains(field))
    }

    /// Record fragment for every mapped field of the role
    pub fn resolve(&self, role: ExtractionRole, row: &RawRow) -> VoterRecord {
        self.entries
            .iter()
            .filter(|(field, _)| role.fields().contains(field))
            .map(|(field, source)| (*field, source.resolve(row)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::fields::*;

    #[test]
    fn test_resolve_only_fields_of_role() {
        let map = ColumnMap::new()
            .column(FIRST_NAME, "First")
            .column_or(LAST_NAME, "Last", "_")
            .null(TITLE)
            .constant(GENDER, "U");
        let row = RawRow::from_pairs([("First", " ANN "), ("Last", "")]);

        let name = map.resolve(ExtractionRole::Name, &row);
        assert_eq!(name.len(), 3);
        assert_eq!(name.text(FIRST_NAME), Some("ANN"));
        assert_eq!(name.text(LAST_NAME), Some("_"));
        assert_eq!(name.get(TITLE), Some(&FieldValue::Null));

        assert!(map.covers(ExtractionRole::Gender));
        assert!(!map.covers(ExtractionRole::Race));
    }

    #[test]
    fn test_later_mapping_replaces_earlier() {
        let map = ColumnMap::new()
            .column(STATE_VOTER_REF, "VoterID")
            .null(STATE_VOTER_REF);

        assert_eq!(map.len(), 1);
        assert_eq!(map.source(STATE_VOTER_REF), Some(&ColumnSource::Null));
    }
}
