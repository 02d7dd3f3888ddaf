//! Voter Normalizer Library
//!
//! Normalizes state voter registration file dumps into one canonical voter
//! record schema.
//!
//! This library provides tools for:
//! - Reading each state's native layout (delimited, header-less, fixed width,
//!   per-county directories)
//! - Extracting canonical fields through one transformer per state
//! - Tagging free-text addresses into structured components
//! - Validating every record against the output schema before it is written
//! - Writing one `{state}_output.csv` per state, several states at once

pub mod address;
pub mod assembler;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod models;
pub mod output;
pub mod preparer;
pub mod processor;
pub mod schema;
pub mod states;

// Re-export commonly used types
pub use address::{AddressComponents, AddressKind, AddressParser, Label, RuleTagger, TagOutcome, Tagger};
pub use assembler::{RecordAssembler, RowStage};
pub use config::{NormalizerConfig, RowErrorPolicy, StateFormat};
pub use error::{Result, VoterError};
pub use extract::{ExtractionRole, FieldExtractor};
pub use models::{FieldValue, RawRow, StateCode, ValidationStatus, VoterRecord};
pub use output::{CsvOutput, OutputStats};
pub use preparer::StatePreparer;
pub use processor::{Processor, RunSummary};
pub use schema::OutputSchema;
