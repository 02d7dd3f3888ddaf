//! CSV output of canonical voter records.
//!
//! [`CsvOutput`] drives rows from a preparer through a [`RecordAssembler`]
//! and writes each validated record under the sorted schema header. A row
//! that fails is handled according to the configured [`RowErrorPolicy`].

pub mod stats;

pub use stats::OutputStats;

use crate::assembler::RecordAssembler;
use crate::config::RowErrorPolicy;
use crate::constants::fields::VALIDATION_STATUS;
use crate::error::{Result, VoterError};
use crate::models::{StateCode, ValidationStatus, VoterRecord};
use crate::preparer::NumberedRow;
use indicatif::ProgressBar;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, error, info};

/// How often the progress display is refreshed, in rows
const PROGRESS_INTERVAL: usize = 1000;

/// Output file for a state, `{state}_output.csv` in the output directory
pub fn output_path(output_dir: &Path, state: StateCode) -> PathBuf {
    output_dir.join(format!("{}_output.csv", state.dir_name()))
}

/// Writer for one state's canonical CSV
#[derive(Debug)]
pub struct CsvOutput {
    path: PathBuf,
    policy: RowErrorPolicy,
    cancelled: Option<Arc<AtomicBool>>,
    progress: Option<ProgressBar>,
}

impl CsvOutput {
    pub fn new(path: PathBuf, policy: RowErrorPolicy) -> Self {
        Self {
            path,
            policy,
            cancelled: None,
            progress: None,
        }
    }

    /// Stop between rows once the flag is set
    pub fn with_cancel_flag(mut self, cancelled: Arc<AtomicBool>) -> Self {
        self.cancelled = Some(cancelled);
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Assemble and write every row.
    ///
    /// Under [`RowErrorPolicy::Abort`] the first failing row ends the run with
    /// its error. Under [`RowErrorPolicy::SkipAndLog`] failing rows are logged
    /// and counted, except errors that are fatal to the whole run.
    pub fn write<I>(&self, assembler: &mut RecordAssembler, rows: I) -> Result<OutputStats>
    where
        I: IntoIterator<Item = Result<NumberedRow>>,
    {
        let start_time = Instant::now();
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let header = assembler.schema().field_names();
        let mut writer = csv::Writer::from_writer(BufWriter::new(File::create(&self.path)?));
        writer.write_record(&header)?;

        let mut stats = OutputStats::new(self.path.clone());
        for input in rows {
            if self.is_cancelled() {
                writer.flush()?;
                return Err(VoterError::processing_interrupted(format!(
                    "stopped after {} rows of {}",
                    stats.rows_read,
                    self.path.display()
                )));
            }

            let NumberedRow { line, row } = input?;
            stats.rows_read += 1;

            match assembler.assemble(&row, line) {
                Ok(record) => {
                    writer.write_record(record_cells(&record, &header))?;
                    stats.record_written(
                        record
                            .text(VALIDATION_STATUS)
                            .and_then(ValidationStatus::from_code),
                    );
                }
                Err(e) if self.policy == RowErrorPolicy::Abort || e.is_run_fatal() => {
                    writer.flush()?;
                    return Err(e);
                }
                Err(e) => {
                    error!("{}", e);
                    stats.record_skipped(e.to_string());
                }
            }

            if stats.rows_read % PROGRESS_INTERVAL == 0 {
                self.report_progress(&stats);
            }
        }

        writer.flush()?;
        self.report_progress(&stats);
        stats.processing_time_ms = start_time.elapsed().as_millis();
        info!("Wrote {}: {}", self.path.display(), stats.summary());
        Ok(stats)
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn report_progress(&self, stats: &OutputStats) {
        debug!("{} rows read", stats.rows_read);
        if let Some(progress) = &self.progress {
            progress.set_position(stats.rows_read as u64);
            progress.set_message(format!(
                "{} written, {} skipped",
                stats.rows_written, stats.rows_skipped
            ));
        }
    }
}

/// CSV cells of a record in header order; nulls are empty cells
fn record_cells(record: &VoterRecord, header: &[&str]) -> Vec<String> {
    header
        .iter()
        .map(|field| {
            record
                .get(field)
                .map(|value| value.to_csv_cell())
                .unwrap_or_default()
        })
        .collect()
}
