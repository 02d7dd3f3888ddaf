use super::*;
use crate::address::TagOutcome;
use crate::constants::{EMPTY_LINE, fields};

#[test]
fn test_parser_reclassifies_tagged_addresses() {
    let parser = create_test_parser();

    match parser.tag("DOVER DE 19901") {
        TagOutcome::Parsed { kind, .. } => assert_eq!(kind, AddressKind::Street),
        other => panic!("Expected parsed outcome, got {:?}", other),
    }
    match parser.tag("PO BOX 9") {
        TagOutcome::Parsed { kind, .. } => assert_eq!(kind, AddressKind::PoBox),
        other => panic!("Expected parsed outcome, got {:?}", other),
    }
}

#[test]
fn test_parser_absorbs_tagger_failures() {
    let parser = create_test_parser();

    assert_eq!(parser.tag("100 MAIN ST APT 1 APT 2"), TagOutcome::Unparsable);
    assert_eq!(parser.tag("--- ..."), TagOutcome::Unparsable);
    assert!(parser.tag_raw("100 MAIN ST APT 1 APT 2").is_err());
}

#[test]
fn test_mail_lines_by_kind() {
    let components = create_test_components(&[
        (Label::AddressNumber, "7"),
        (Label::StreetNamePreDirectional, "W"),
        (Label::StreetName, "LAKE"),
        (Label::StreetNamePostType, "DR"),
        (Label::OccupancyType, "UNIT"),
        (Label::OccupancyIdentifier, "9"),
        (Label::USPSBoxType, "PO BOX"),
        (Label::USPSBoxID, "3"),
    ]);

    assert_eq!(
        AddressParser::construct_mail_address_1(&components, AddressKind::Street),
        "7 W LAKE DR"
    );
    assert_eq!(
        AddressParser::construct_mail_address_1(&components, AddressKind::PoBox),
        "PO BOX 3"
    );
    assert_eq!(
        AddressParser::construct_mail_address_1(&components, AddressKind::Ambiguous),
        EMPTY_LINE
    );
    assert_eq!(AddressParser::construct_mail_address_2(&components), "UNIT 9");
}

#[test]
fn test_empty_mail_lines_are_a_single_space() {
    let components = create_test_components(&[(Label::USPSBoxID, "3")]);

    assert_eq!(
        AddressParser::construct_mail_address_1(&components, AddressKind::Street),
        EMPTY_LINE
    );
    assert_eq!(AddressParser::construct_mail_address_2(&components), EMPTY_LINE);
}

#[test]
fn test_label_fields() {
    assert_eq!(Label::AddressNumber.field(), Some(fields::ADDRESS_NUMBER));
    assert_eq!(Label::USPSBoxGroupID.field(), Some(fields::USPS_BOX_GROUP_ID));
    assert_eq!(Label::SecondStreetName.field(), None);
    assert_eq!(Label::StreetNamePostType.to_string(), "StreetNamePostType");
}

#[test]
fn test_component_push_joins_words() {
    let mut components = AddressComponents::new();
    components.push(Label::PlaceName, "SALT");
    components.push(Label::PlaceName, "LAKE");
    components.push(Label::PlaceName, "CITY");

    assert_eq!(components.get(Label::PlaceName), Some("SALT LAKE CITY"));
    assert_eq!(components.len(), 1);
}
