//! Error handling for voter file normalization.
//!
//! Provides the error types raised while preparing input rows, extracting
//! canonical fields, validating assembled records and writing CSV output.

use crate::assembler::RowStage;
use crate::extract::ExtractionRole;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which part of the output schema a record violated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Missing or extra keys
    KeySet,
    /// A value's runtime type is outside the field's allowed set
    Type,
    /// An enumerated field holds a value outside its vocabulary
    Value,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ViolationKind::KeySet => "key set",
            ViolationKind::Type => "type",
            ViolationKind::Value => "value",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug)]
pub enum VoterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Schema violation ({kind}):\n{message}")]
    SchemaViolation { kind: ViolationKind, message: String },

    #[error("Unmapped code '{code}' in {table} table")]
    UnmappedCode { table: String, code: String },

    #[error("State module {state} must implement the {role} extraction")]
    NotImplemented {
        state: String,
        role: ExtractionRole,
    },

    #[error("Invalid date '{value}' for format '{format}'")]
    InvalidDate {
        value: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Input not found at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Unknown state code: {code}")]
    UnknownState { code: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Row {line} failed while {stage}: {source}\n  row: {row}")]
    RowFailed {
        line: usize,
        stage: RowStage,
        row: String,
        #[source]
        source: Box<VoterError>,
    },

    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl VoterError {
    /// Create a schema violation error
    pub fn schema_violation(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self::SchemaViolation {
            kind,
            message: message.into(),
        }
    }

    /// Create an unmapped code error
    pub fn unmapped_code(table: impl Into<String>, code: impl Into<String>) -> Self {
        Self::UnmappedCode {
            table: table.into(),
            code: code.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Errors that stop a state's run no matter which row-error policy is active.
    ///
    /// A missing extraction is a defect in the state module, and I/O or
    /// configuration failures leave nothing sensible to continue with.
    pub fn is_run_fatal(&self) -> bool {
        match self {
            VoterError::NotImplemented { .. }
            | VoterError::Io(_)
            | VoterError::Configuration { .. }
            | VoterError::InputNotFound { .. }
            | VoterError::UnknownState { .. }
            | VoterError::ProcessingInterrupted { .. } => true,
            VoterError::RowFailed { source, .. } => source.is_run_fatal(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, VoterError>;
