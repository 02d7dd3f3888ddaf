//! Multi-state normalization runs.
//!
//! Each requested state is prepared, transformed and written as one blocking
//! job on the tokio runtime. Jobs run concurrently up to the configured limit
//! and never share a transformer, so a state's caches stay local to its job.

#[cfg(test)]
pub mod tests;

use crate::address::AddressParser;
use crate::assembler::RecordAssembler;
use crate::config::NormalizerConfig;
use crate::error::{Result, VoterError};
use crate::models::StateCode;
use crate::output::{CsvOutput, OutputStats, output_path};
use crate::preparer::StatePreparer;
use crate::states::transformer_for;

use colored::*;
use futures::stream::{self, StreamExt};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task;
use tracing::{error, info};

/// Outcome of one state's run
#[derive(Debug)]
pub struct StateRun {
    pub state: StateCode,
    pub outcome: Result<OutputStats>,
}

/// Outcomes of every requested state, in request order
#[derive(Debug)]
pub struct RunSummary {
    pub runs: Vec<StateRun>,
    pub processing_time_ms: u128,
}

impl RunSummary {
    pub fn succeeded(&self) -> impl Iterator<Item = (StateCode, &OutputStats)> {
        self.runs
            .iter()
            .filter_map(|run| run.outcome.as_ref().ok().map(|stats| (run.state, stats)))
    }

    pub fn failed(&self) -> impl Iterator<Item = (StateCode, &VoterError)> {
        self.runs
            .iter()
            .filter_map(|run| run.outcome.as_ref().err().map(|e| (run.state, e)))
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed().next().is_none()
    }

    pub fn total_rows_written(&self) -> usize {
        self.succeeded().map(|(_, stats)| stats.rows_written).sum()
    }

    pub fn stats_for(&self, state: StateCode) -> Option<&OutputStats> {
        self.succeeded()
            .find(|(run_state, _)| *run_state == state)
            .map(|(_, stats)| stats)
    }
}

/// Runs the configured states
#[derive(Debug)]
pub struct Processor {
    config: NormalizerConfig,
    parser: Arc<AddressParser>,
    cancelled: Arc<AtomicBool>,
}

impl Processor {
    /// Validate the configuration and build a processor for it
    pub fn new(config: NormalizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            parser: Arc::new(AddressParser::default()),
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Use a specific address parser for every state
    pub fn with_parser(mut self, parser: Arc<AddressParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Flag that stops every running state at its next row once set
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize every configured state.
    ///
    /// A failing state does not stop the others; its error is reported in the
    /// returned summary.
    pub async fn run(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let states = self.config.states.clone();
        println!("{}", "Starting voter file normalization".bright_green().bold());
        println!(
            "  {} {}",
            "States:".bright_cyan(),
            states
                .iter()
                .map(StateCode::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("  {} {}", "Input:".bright_cyan(), self.config.data_dir.display());
        println!("  {} {}", "Output:".bright_cyan(), self.config.output_dir.display());

        let multi = self.config.show_progress.then(MultiProgress::new);
        let limit = self.config.max_concurrent_states.max(1);
        let semaphore = Arc::new(Semaphore::new(limit));

        let mut runs = stream::iter(states.into_iter().enumerate())
            .map(|(index, state)| {
                let semaphore = Arc::clone(&semaphore);
                let config = self.config.clone();
                let parser = Arc::clone(&self.parser);
                let cancelled = Arc::clone(&self.cancelled);
                let progress = multi.as_ref().map(|multi| multi.add(state_spinner(state)));
                async move {
                    let outcome = match semaphore.acquire_owned().await {
                        Ok(_permit) => {
                            let spinner = progress.clone();
                            task::spawn_blocking(move || {
                                normalize_state(state, &config, parser, cancelled, spinner)
                            })
                            .await
                            .unwrap_or_else(|e| {
                                Err(VoterError::processing_interrupted(format!(
                                    "{} job stopped: {}",
                                    state, e
                                )))
                            })
                        }
                        Err(e) => Err(VoterError::processing_interrupted(e.to_string())),
                    };
                    if let Some(progress) = progress {
                        finish_spinner(&progress, &outcome);
                    }
                    (index, StateRun { state, outcome })
                }
            })
            .buffer_unordered(limit)
            .collect::<Vec<_>>()
            .await;

        runs.sort_by_key(|(index, _)| *index);
        let summary = RunSummary {
            runs: runs.into_iter().map(|(_, run)| run).collect(),
            processing_time_ms: start_time.elapsed().as_millis(),
        };
        print_summary(&summary);
        Ok(summary)
    }
}

/// Prepare, transform and write one state. Runs on a blocking thread.
pub fn normalize_state(
    state: StateCode,
    config: &NormalizerConfig,
    parser: Arc<AddressParser>,
    cancelled: Arc<AtomicBool>,
    progress: Option<ProgressBar>,
) -> Result<OutputStats> {
    if cancelled.load(Ordering::Relaxed) {
        return Err(VoterError::processing_interrupted(format!(
            "{} not started",
            state
        )));
    }

    let preparer = StatePreparer::new(
        state,
        &config.data_dir,
        config.input_files.get(&state).map(|path| path.as_path()),
    )?;
    let transformer = transformer_for(state, parser, preparer.options().clone());
    let mut assembler = RecordAssembler::new(transformer);

    let mut output = CsvOutput::new(
        output_path(&config.output_dir, state),
        config.row_error_policy,
    )
    .with_cancel_flag(cancelled);
    if let Some(progress) = progress {
        output = output.with_progress(progress);
    }

    info!("{}: writing {}", state, output.path().display());
    let result = output.write(&mut assembler, preparer.rows());
    if let Err(e) = &result {
        error!("{}: {}", state, e);
    }
    result
}

fn state_spinner(state: StateCode) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} [{elapsed_precise}] {pos} rows {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_prefix(state.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

fn finish_spinner(spinner: &ProgressBar, outcome: &Result<OutputStats>) {
    match outcome {
        Ok(stats) => spinner.finish_with_message(format!(
            "done: {} written, {} skipped",
            stats.rows_written, stats.rows_skipped
        )),
        Err(_) => spinner.abandon_with_message("failed"),
    }
}

fn print_summary(summary: &RunSummary) {
    println!("\n{}", "Normalization Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        summary.processing_time_ms.to_string().bright_white()
    );
    for (state, stats) in summary.succeeded() {
        println!(
            "  {} {}",
            format!("{}:", state).bright_cyan(),
            stats.summary()
        );
        println!("      {} {}", "->".bright_cyan(), stats.output_path.display());
    }
    for (state, e) in summary.failed() {
        println!(
            "  {} {}",
            format!("{} failed:", state).bright_red(),
            e.to_string().bright_red()
        );
    }
    println!(
        "  {} {}",
        "Total records:".bright_cyan(),
        summary.total_rows_written().to_string().bright_white().bold()
    );
}
