//! Tests for address tagging and mailing-line reconstruction

mod parser_tests;

use super::{AddressComponents, AddressKind, AddressParser, Label, RuleTagger, Tagger};

/// Tag with the rule tagger, failing the test on a tagger error
pub fn create_test_tagging(text: &str) -> (AddressComponents, AddressKind) {
    RuleTagger::new()
        .tag(text)
        .unwrap_or_else(|e| panic!("'{}' failed to tag: {}", text, e))
}

pub fn create_test_parser() -> AddressParser {
    AddressParser::default()
}

/// Components built from label/value pairs
pub fn create_test_components(parts: &[(Label, &str)]) -> AddressComponents {
    parts
        .iter()
        .map(|(label, value)| (*label, value.to_string()))
        .collect()
}
