use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::sync::Arc;
use voter_normalizer::address::{AddressParser, RuleTagger, Tagger};
use voter_normalizer::models::{RawRow, StateCode};
use voter_normalizer::states::{TransformerOptions, transformer_for};
use voter_normalizer::RecordAssembler;

const ADDRESSES: &[&str] = &[
    "123 N OAK AVE APT 4B, SPRINGFIELD, IL 62701",
    "PO BOX 1432 DOVER DE 19903",
    "RR 2 BOX 14",
    "12 1/2 ELM ST",
    "MAIN ST & 2ND AVE",
    "4400 STATE HWY 121 STE 300 PLANO TX 75024",
];

fn bench_rule_tagger(c: &mut Criterion) {
    let tagger = RuleTagger::default();
    c.bench_function("address.rule_tagger.mixed", |b| {
        b.iter(|| {
            for address in ADDRESSES {
                let _ = black_box(tagger.tag(black_box(address)));
            }
        });
    });
}

fn bench_parser_outcome(c: &mut Criterion) {
    let parser = AddressParser::default();
    c.bench_function("address.parser.tag", |b| {
        b.iter(|| {
            for address in ADDRESSES {
                black_box(parser.tag(black_box(address)));
            }
        });
    });
}

fn bench_record_assembly(c: &mut Criterion) {
    let mut assembler = RecordAssembler::new(transformer_for(
        StateCode::Co,
        Arc::new(AddressParser::default()),
        TransformerOptions::default(),
    ));
    let row = RawRow::from_pairs([
        ("VOTER_ID", "600123456"),
        ("COUNTY_CODE", "16"),
        ("FIRST_NAME", "JANE"),
        ("LAST_NAME", "DOE"),
        ("BIRTH_YEAR", "1980"),
        ("GENDER", "Female"),
        ("PARTY", "DEM"),
        ("HOUSE_NUM", "100"),
        ("PRE_DIR", "N"),
        ("STREET_NAME", "MAIN"),
        ("STREET_TYPE", "ST"),
        ("UNIT_TYPE", "APT"),
        ("UNIT_NUM", "4"),
        ("RESIDENTIAL_CITY", "DENVER"),
        ("RESIDENTIAL_ZIP_CODE", "80202"),
        ("MAIL_ADDR1", "PO BOX 55"),
        ("MAIL_ADDR2", "AURORA CO 80010"),
        ("REGISTRATION_DATE", "03/15/2004"),
        ("STATUS_CODE", "Active"),
        ("CONGRESSIONAL", "Congressional 1"),
        ("STATE_SENATE", "State Senate 31"),
        ("STATE_HOUSE", "State House 6"),
        ("PRECINCT", "2163116"),
        ("SPLIT", "116"),
    ]);

    c.bench_function("record.assemble.co", |b| {
        b.iter(|| black_box(assembler.assemble(black_box(&row), 2)));
    });
}

criterion_group!(
    benches,
    bench_rule_tagger,
    bench_parser_outcome,
    bench_record_assembly
);
criterion_main!(benches);
