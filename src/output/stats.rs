//! Output statistics for one state's normalization run

use crate::models::ValidationStatus;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Counts and diagnostics from writing one state's output file
#[derive(Debug, Clone, PartialEq)]
pub struct OutputStats {
    /// Raw rows read from the input
    pub rows_read: usize,
    /// Canonical records written to the output
    pub rows_written: usize,
    /// Rows that failed and were skipped under the skip policy
    pub rows_skipped: usize,
    /// Written records per residential address validation status
    pub validation_counts: BTreeMap<ValidationStatus, usize>,
    /// Messages of the skipped rows, for debugging
    pub error_messages: Vec<String>,
    /// Where the records were written
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
}

impl OutputStats {
    pub fn new(output_path: PathBuf) -> Self {
        Self {
            rows_read: 0,
            rows_written: 0,
            rows_skipped: 0,
            validation_counts: BTreeMap::new(),
            error_messages: Vec::new(),
            output_path,
            processing_time_ms: 0,
        }
    }

    pub fn record_written(&mut self, status: Option<ValidationStatus>) {
        self.rows_written += 1;
        if let Some(status) = status {
            *self.validation_counts.entry(status).or_insert(0) += 1;
        }
    }

    pub fn record_skipped(&mut self, message: String) {
        self.rows_skipped += 1;
        self.error_messages.push(message);
    }

    pub fn validation_count(&self, status: ValidationStatus) -> usize {
        self.validation_counts.get(&status).copied().unwrap_or(0)
    }

    /// Written rows as a percentage of rows read
    pub fn success_rate(&self) -> f64 {
        if self.rows_read == 0 {
            100.0
        } else {
            (self.rows_written as f64 / self.rows_read as f64) * 100.0
        }
    }

    /// Share of written records whose residential address was unparsable
    pub fn unparsable_rate(&self) -> f64 {
        if self.rows_written == 0 {
            0.0
        } else {
            (self.validation_count(ValidationStatus::Unparsable) as f64
                / self.rows_written as f64)
                * 100.0
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} -> {} records ({:.1}% success) | Skipped: {} | Unparsable addresses: {:.1}%",
            self.rows_read,
            self.rows_written,
            self.success_rate(),
            self.rows_skipped,
            self.unparsable_rate()
        )
    }
}
