//! Processor tests over temporary data directories


use crate::config::NormalizerConfig;
use crate::models::StateCode;
use std::fs;
use std::path::Path;

pub const CO_HEADER: &str = "VOTER_ID,COUNTY_CODE,FIRST_NAME,MIDDLE_NAME,LAST_NAME,NAME_SUFFIX,BIRTH_YEAR,GENDER,PARTY,HOUSE_NUM,HOUSE_SUFFIX,PRE_DIR,STREET_NAME,STREET_TYPE,POST_DIR,UNIT_TYPE,UNIT_NUM,RESIDENTIAL_CITY,RESIDENTIAL_STATE,RESIDENTIAL_ZIP_CODE,MAIL_ADDR1,MAIL_ADDR2,MAIL_ADDR3,PHONE_NUM,REGISTRATION_DATE,STATUS_CODE,CONGRESSIONAL,STATE_SENATE,STATE_HOUSE,PRECINCT,SPLIT";

/// Colorado voter line with the given id and party
pub fn create_test_co_line(voter_id: &str, party: &str) -> String {
    format!(
        "{},16,JANE,,DOE,,1980,Female,{},100,,,MAIN,ST,,,,DENVER,CO,80202,,,,,03/15/2004,Active,Congressional 1,State Senate 31,State House 6,2163116,116",
        voter_id, party
    )
}

/// Write `co_sample.csv` with one line per party into a state directory
pub fn create_test_co_input(data_dir: &Path, parties: &[&str]) {
    let state_dir = data_dir.join("co");
    fs::create_dir_all(&state_dir).unwrap();
    let mut content = format!("{}\n", CO_HEADER);
    for (i, party) in parties.iter().enumerate() {
        content.push_str(&create_test_co_line(&format!("60000{}", i), party));
        content.push('\n');
    }
    fs::write(state_dir.join("co_sample.csv"), content).unwrap();
}

/// Configuration reading and writing under one directory, without spinners
pub fn create_test_config(dir: &Path, states: Vec<StateCode>) -> NormalizerConfig {
    NormalizerConfig::default()
        .with_data_dir(dir)
        .with_output_dir(dir.join("out"))
        .with_states(states)
        .with_max_concurrent_states(2)
        .without_progress()
}
