//! Per-row record assembly.
//!
//! Runs every extraction role of a state transformer against one raw row,
//! merges the fragments, backfills the mailing address from the residence
//! when the source supplied none, and validates the result against the
//! state's output schema.

use crate::constants::fields::{self, *};
use crate::constants::{DEFAULT_MAIL_COUNTRY, EMPTY_LINE};
use crate::error::{Result, VoterError};
use crate::extract::{ExtractionRole, FieldExtractor};
use crate::models::{FieldValue, RawRow, VoterRecord};
use crate::schema::OutputSchema;
use std::fmt;
use tracing::debug;

/// Progress of one row through the assembler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStage {
    Extracting,
    Backfilling,
    Validating,
    Done,
    Failed,
}

impl fmt::Display for RowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RowStage::Extracting => "extracting",
            RowStage::Backfilling => "backfilling",
            RowStage::Validating => "validating",
            RowStage::Done => "done",
            RowStage::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Turns raw rows of one state into validated canonical records
pub struct RecordAssembler {
    transformer: Box<dyn FieldExtractor + Send>,
    schema: OutputSchema,
}

impl RecordAssembler {
    pub fn new(transformer: Box<dyn FieldExtractor + Send>) -> Self {
        let schema = OutputSchema::for_format(transformer.format());
        Self {
            transformer,
            schema,
        }
    }

    pub fn schema(&self) -> &OutputSchema {
        &self.schema
    }

    pub fn transformer(&self) -> &dyn FieldExtractor {
        self.transformer.as_ref()
    }

    /// Run every extraction role against the row and merge the fragments
    pub fn process_row(&mut self, row: &RawRow) -> Result<VoterRecord> {
        let mut record = VoterRecord::new();
        for role in ExtractionRole::ALL {
            record.extend(self.transformer.extract(role, row)?);
        }
        Ok(record)
    }

    /// Fill the mailing fields from the residential address when the row
    /// carried no mailing city. Records that already have one are returned
    /// unchanged.
    pub fn fix_missing_mailing_addr(mut record: VoterRecord) -> VoterRecord {
        if record.text(MAIL_CITY).is_some() {
            return record;
        }

        let field = |record: &VoterRecord, name: &str| -> FieldValue {
            record.get(name).cloned().unwrap_or(FieldValue::Null)
        };
        let state = field(&record, STATE_NAME);

        let (line1, line2, city, zip) = if record.text(STREET_NAME).is_some() {
            (
                FieldValue::from(rebuild_line(&record, fields::STREET_LINE)),
                FieldValue::from(rebuild_line(&record, fields::OCCUPANCY_LINE)),
                field(&record, PLACE_NAME),
                field(&record, ZIP_CODE),
            )
        } else {
            (
                field(&record, RAW_ADDR1),
                field(&record, RAW_ADDR2),
                field(&record, RAW_CITY),
                field(&record, RAW_ZIP),
            )
        };

        record.insert(MAIL_ADDRESS_LINE1, line1);
        record.insert(MAIL_ADDRESS_LINE2, line2);
        record.insert(MAIL_CITY, city);
        record.insert(MAIL_STATE, state);
        record.insert(MAIL_ZIP_CODE, zip);
        record.insert(MAIL_COUNTRY, DEFAULT_MAIL_COUNTRY);
        record
    }

    /// Extract, backfill and validate one row.
    ///
    /// `line` is the 1-based input line used in the error when the row fails.
    pub fn assemble(&mut self, row: &RawRow, line: usize) -> Result<VoterRecord> {
        let mut stage = RowStage::Extracting;
        let result = self.run_stages(row, &mut stage);

        match result {
            Ok(record) => {
                debug!("Row {} {}", line, RowStage::Done);
                Ok(record)
            }
            Err(source) => {
                debug!("Row {} {} while {}", line, RowStage::Failed, stage);
                Err(VoterError::RowFailed {
                    line,
                    stage,
                    row: row.to_string(),
                    source: Box::new(source),
                })
            }
        }
    }

    fn run_stages(&mut self, row: &RawRow, stage: &mut RowStage) -> Result<VoterRecord> {
        let record = self.process_row(row)?;

        *stage = RowStage::Backfilling;
        let mut record = Self::fix_missing_mailing_addr(record);

        *stage = RowStage::Validating;
        self.schema.validate(&mut record)?;

        *stage = RowStage::Done;
        Ok(record)
    }
}

/// Space-joined non-blank values of the given fields, or a single space
fn rebuild_line(record: &VoterRecord, line_fields: &[&str]) -> String {
    let line = line_fields
        .iter()
        .filter_map(|field| record.text(field))
        .collect::<Vec<_>>()
        .join(" ");
    if line.is_empty() {
        EMPTY_LINE.to_string()
    } else {
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::empty_residential_address;

    fn create_parsed_residence() -> VoterRecord {
        let mut record = empty_residential_address();
        record.insert(ADDRESS_NUMBER, "100");
        record.insert(STREET_NAME, "MAIN");
        record.insert(STREET_NAME_POST_TYPE, "ST");
        record.insert(PLACE_NAME, "DENVER");
        record.insert(STATE_NAME, "CO");
        record.insert(ZIP_CODE, "80202");
        record.insert(RAW_ADDR1, "100 MAIN ST");
        record.insert(RAW_ADDR2, FieldValue::Null);
        record.insert(RAW_CITY, "DENVER");
        record.insert(RAW_ZIP, "80202");
        record
    }

    #[test]
    fn test_backfill_from_structured_components() {
        let record = RecordAssembler::fix_missing_mailing_addr(create_parsed_residence());

        assert_eq!(record.text(MAIL_ADDRESS_LINE1), Some("100 MAIN ST"));
        assert_eq!(record.get(MAIL_ADDRESS_LINE2), Some(&FieldValue::from(" ")));
        assert_eq!(record.text(MAIL_CITY), Some("DENVER"));
        assert_eq!(record.text(MAIL_STATE), Some("CO"));
        assert_eq!(record.text(MAIL_ZIP_CODE), Some("80202"));
        assert_eq!(record.text(MAIL_COUNTRY), Some("USA"));
    }

    #[test]
    fn test_backfill_from_raw_fields_without_street_name() {
        let mut record = empty_residential_address();
        record.insert(STATE_NAME, "CO");
        record.insert(RAW_ADDR1, "--Not provided--");
        record.insert(RAW_ADDR2, "UNIT 4");
        record.insert(RAW_CITY, "BOULDER");
        record.insert(RAW_ZIP, "80301");

        let record = RecordAssembler::fix_missing_mailing_addr(record);

        assert_eq!(record.text(MAIL_ADDRESS_LINE1), Some("--Not provided--"));
        assert_eq!(record.text(MAIL_ADDRESS_LINE2), Some("UNIT 4"));
        assert_eq!(record.text(MAIL_CITY), Some("BOULDER"));
        assert_eq!(record.text(MAIL_ZIP_CODE), Some("80301"));
    }

    #[test]
    fn test_backfill_is_idempotent() {
        let mut record = create_parsed_residence();
        record.insert(MAIL_ADDRESS_LINE1, "PO BOX 9");
        record.insert(MAIL_CITY, "AURORA");

        let once = RecordAssembler::fix_missing_mailing_addr(record.clone());
        assert_eq!(once, record);

        let twice = RecordAssembler::fix_missing_mailing_addr(once.clone());
        assert_eq!(twice, once);
    }

    #[test]
    fn test_row_stage_display() {
        assert_eq!(RowStage::Extracting.to_string(), "extracting");
        assert_eq!(RowStage::Validating.to_string(), "validating");
    }
}
