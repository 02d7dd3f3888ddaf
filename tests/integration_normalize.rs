//! End-to-end normalization runs over temporary data directories
//!
//! Each test writes a small native-layout input file, runs the processor and
//! reads the `{state}_output.csv` back.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use voter_normalizer::states::pa::INPUT_FIELDS as PA_FIELDS;
use voter_normalizer::{NormalizerConfig, Processor, RowErrorPolicy, StateCode, VoterError};

const CO_HEADER: &str = "VOTER_ID,COUNTY_CODE,FIRST_NAME,MIDDLE_NAME,LAST_NAME,NAME_SUFFIX,BIRTH_YEAR,GENDER,PARTY,HOUSE_NUM,HOUSE_SUFFIX,PRE_DIR,STREET_NAME,STREET_TYPE,POST_DIR,UNIT_TYPE,UNIT_NUM,RESIDENTIAL_CITY,RESIDENTIAL_STATE,RESIDENTIAL_ZIP_CODE,MAIL_ADDR1,MAIL_ADDR2,MAIL_ADDR3,PHONE_NUM,REGISTRATION_DATE,STATUS_CODE,CONGRESSIONAL,STATE_SENATE,STATE_HOUSE,PRECINCT,SPLIT";

const WA_HEADER: &str = "StateVoterID\tCountyVoterID\tTitle\tFName\tMName\tLName\tNameSuffix\tBirthdate\tGender\tRegStNum\tRegStFrac\tRegStName\tRegStType\tRegUnitType\tRegStPreDirection\tRegStPostDirection\tRegUnitNum\tRegCity\tRegState\tRegZipCode\tCountyCode\tPrecinctCode\tPrecinctPart\tLegislativeDistrict\tCongressionalDistrict\tMail1\tRegistrationdate\tAbsenteeType\tStatusCode";

fn create_test_config(dir: &Path, states: Vec<StateCode>) -> NormalizerConfig {
    NormalizerConfig::default()
        .with_data_dir(dir)
        .with_output_dir(dir.join("out"))
        .with_states(states)
        .without_progress()
}

fn create_test_co_file(dir: &Path, lines: &[String]) -> PathBuf {
    let path = dir.join("co").join("co_sample.csv");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, format!("{}\n{}\n", CO_HEADER, lines.join("\n"))).unwrap();
    path
}

fn create_test_co_line(voter_id: &str, party: &str, mail1: &str, mail2: &str) -> String {
    format!(
        "{},16,JANE,,DOE,,1980,Female,{},100,,N,MAIN,ST,,APT,4,DENVER,CO,80202,{},{},,,03/15/2004,Active,Congressional 1,State Senate 31,State House 6,2163116,116",
        voter_id, party, mail1, mail2
    )
}

/// Output rows keyed by header name
fn read_output(path: &Path) -> (Vec<String>, Vec<HashMap<String, String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|record| {
            let record = record.unwrap();
            header
                .iter()
                .cloned()
                .zip(record.iter().map(String::from))
                .collect()
        })
        .collect();
    (header, rows)
}

#[tokio::test]
async fn test_colorado_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    create_test_co_file(
        temp_dir.path(),
        &[
            create_test_co_line("600001", "DEM", "", ""),
            create_test_co_line("600002", "UAF", "PO BOX 55", "AURORA CO 80010"),
        ],
    );

    let processor =
        Processor::new(create_test_config(temp_dir.path(), vec![StateCode::Co])).unwrap();
    let summary = processor.run().await.unwrap();
    assert!(summary.all_succeeded());

    let (header, rows) = read_output(&temp_dir.path().join("out").join("co_output.csv"));
    let mut sorted = header.clone();
    sorted.sort();
    assert_eq!(header, sorted);
    assert_eq!(rows.len(), 2);

    let first = &rows[0];
    assert_eq!(first["STATE_VOTER_REF"], "600001");
    assert_eq!(first["BIRTHDATE"], "1980-01-01");
    assert_eq!(first["BIRTHDATE_IS_ESTIMATE"], "Y");
    assert_eq!(first["REGISTRATION_DATE"], "2004-03-15");
    assert_eq!(first["VALIDATION_STATUS"], "2");
    assert_eq!(first["STREET_NAME"], "MAIN");
    assert_eq!(first["OCCUPANCY_IDENTIFIER"], "4");
    assert_eq!(first["MAIL_CITY"], "DENVER");
    assert_eq!(first["MAIL_COUNTRY"], "USA");

    let second = &rows[1];
    assert_eq!(second["MAIL_ADDRESS_LINE1"], "PO BOX 55");
    assert_eq!(second["MAIL_CITY"], "AURORA");
    assert_eq!(second["MAIL_ZIP_CODE"], "80010");
}

#[tokio::test]
async fn test_washington_tab_separated_input() {
    let temp_dir = TempDir::new().unwrap();
    let line = [
        "WA000123456", "55501", "", "LEE", "", "PARK", "", "07/14/1975", "M", "1420", "",
        "PINE", "AVE", "APT", "N", "", "12", "SEATTLE", "WA", "98101", "KI", "1834", "3",
        "43", "7", "", "11/02/1999", "P", "A",
    ]
    .join("\t");
    let wa_dir = temp_dir.path().join("wa");
    fs::create_dir_all(&wa_dir).unwrap();
    fs::write(
        wa_dir.join("201605_VRDB_ExtractSAMPLE.txt"),
        format!("{}\n{}\n", WA_HEADER, line),
    )
    .unwrap();

    let processor =
        Processor::new(create_test_config(temp_dir.path(), vec![StateCode::Wa])).unwrap();
    let summary = processor.run().await.unwrap();
    assert!(summary.all_succeeded());

    let (_, rows) = read_output(&temp_dir.path().join("out").join("wa_output.csv"));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["RAW_ADDR1"], "1420 N PINE AVE");
    assert_eq!(rows[0]["RAW_ADDR2"], "APT 12");
    assert_eq!(rows[0]["BIRTHDATE"], "1975-07-14");
    assert_eq!(rows[0]["MAIL_CITY"], "SEATTLE");
}

fn create_test_pa_line(values: &[(&str, &str)]) -> String {
    let values: HashMap<&str, &str> = values.iter().copied().collect();
    PA_FIELDS
        .iter()
        .map(|field| values.get(field).copied().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\t")
}

#[tokio::test]
async fn test_pennsylvania_county_directory_with_zone_types() {
    let temp_dir = TempDir::new().unwrap();
    let statewide = temp_dir.path().join("pa").join("Statewide");
    fs::create_dir_all(&statewide).unwrap();

    let line = create_test_pa_line(&[
        ("STATE_VOTER_REF", "012345678"),
        ("LAST_NAME", "MILLER"),
        ("FIRST_NAME", "ROSE"),
        ("GENDER", "F"),
        ("BIRTHDATE", "04/01/1965"),
        ("REGISTRATION_DATE", "10/10/1990"),
        ("REGISTRATION_STATUS", "A"),
        ("_PARTY_CODE", "D"),
        ("ADDRESS_NUMBER", "12"),
        ("STREET_NAME", "BALTIMORE ST"),
        ("_REGISTRATION_CITY", "GETTYSBURG"),
        ("STATE_NAME", "PA"),
        ("ZIP_CODE", "17325"),
        ("_DISTRICT1", "0010"),
        ("_DISTRICT2", "W1"),
        ("_DISTRICT3", "GASD"),
        ("_DISTRICT6", "HD-091"),
        ("_DISTRICT7", "S33"),
        ("_DISTRICT8", "CG14"),
        ("_DISTRICT9", "ADCO"),
        ("_DISTRICT13", "0010-1"),
        ("COUNTYCODE", "ADAMS"),
    ]);
    fs::write(statewide.join("ADAMS FVE 20170102.txt"), format!("{}\n", line)).unwrap();
    fs::write(
        statewide.join("ADAMS Zone Types 20170102.txt"),
        "ADAMS\t2\tW\tPrecinct\n",
    )
    .unwrap();

    let processor =
        Processor::new(create_test_config(temp_dir.path(), vec![StateCode::Pa])).unwrap();
    let summary = processor.run().await.unwrap();
    assert!(summary.all_succeeded());

    let (_, rows) = read_output(&temp_dir.path().join("out").join("pa_output.csv"));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["PRECINCT"], "W1");
    assert_eq!(rows[0]["CONGRESSIONAL_DIST"], "14");
    assert_eq!(rows[0]["LOWER_HOUSE_DIST"], "91");
    assert_eq!(rows[0]["PARTY"], "DEM");
}

#[tokio::test]
async fn test_skip_policy_keeps_good_rows_and_abort_stops() {
    let temp_dir = TempDir::new().unwrap();
    create_test_co_file(
        temp_dir.path(),
        &[
            create_test_co_line("600001", "DEM", "", ""),
            create_test_co_line("600002", "NOPE", "", ""),
            create_test_co_line("600003", "REP", "", ""),
        ],
    );

    let config = create_test_config(temp_dir.path(), vec![StateCode::Co]);
    let summary = Processor::new(config.clone()).unwrap().run().await.unwrap();
    match &summary.runs[0].outcome {
        Err(VoterError::RowFailed { line, row, .. }) => {
            assert_eq!(*line, 3);
            assert!(row.contains("'VOTER_ID': '600002'"));
        }
        other => panic!("Expected RowFailed, got {:?}", other),
    }

    let config = config.with_row_error_policy(RowErrorPolicy::SkipAndLog);
    let summary = Processor::new(config).unwrap().run().await.unwrap();
    let stats = summary.stats_for(StateCode::Co).unwrap();
    assert_eq!(stats.rows_written, 2);
    assert_eq!(stats.rows_skipped, 1);

    let (_, rows) = read_output(&stats.output_path);
    let refs: Vec<_> = rows.iter().map(|row| row["STATE_VOTER_REF"].as_str()).collect();
    assert_eq!(refs, vec!["600001", "600003"]);
}

#[test]
fn test_unknown_state_on_the_command_line() {
    assert!(matches!(
        StateCode::parse_list("co,xx"),
        Err(VoterError::UnknownState { .. })
    ));
}
