//! Configuration management and validation.
//!
//! Provides the run configuration for a normalization job and the per-state
//! input format descriptions the preparer and validator work from.

use crate::constants::{DEFAULT_DATA_DIR, DEFAULT_STATES};
use crate::error::{Result, VoterError};
use crate::models::StateCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

/// What to do when a single row fails to normalize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RowErrorPolicy {
    /// Stop the state's run at the first failing row
    #[default]
    Abort,
    /// Log the failing row, count it and continue
    SkipAndLog,
}

impl FromStr for RowErrorPolicy {
    type Err = VoterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "abort" => Ok(RowErrorPolicy::Abort),
            "skip" | "skip-and-log" => Ok(RowErrorPolicy::SkipAndLog),
            other => Err(VoterError::configuration(format!(
                "Unknown row error policy '{}', expected 'abort' or 'skip'",
                other
            ))),
        }
    }
}

/// Native input format of one state's voter file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateFormat {
    pub state: StateCode,

    /// chrono format string for the state's dates
    pub date_format: &'static str,

    /// Field delimiter
    pub sep: u8,

    /// Whether delimited input carries a header row
    pub has_header: bool,

    /// Column names for header-less and fixed-width input
    pub input_fields: Option<&'static [&'static str]>,

    /// Byte ranges of each input field in fixed-width input
    pub fixed_width: Option<&'static [(usize, usize)]>,

    /// Input file name looked up under the data directory
    pub default_file: &'static str,

    /// Strip a UTF-8 byte order mark from the first header
    pub strip_bom: bool,

    /// Required canonical fields this state may leave null
    pub nullable_fields: &'static [&'static str],

    /// Party codes this state adds to the base vocabulary
    pub extra_parties: &'static [&'static str],
}

impl StateFormat {
    /// Delimited input with a header row
    pub const fn delimited(state: StateCode, date_format: &'static str, sep: u8) -> Self {
        Self {
            state,
            date_format,
            sep,
            has_header: true,
            input_fields: None,
            fixed_width: None,
            default_file: "",
            strip_bom: false,
            nullable_fields: &[],
            extra_parties: &[],
        }
    }

    /// Delimited input whose columns are named by the state rather than a header row
    pub const fn headerless(mut self, input_fields: &'static [&'static str]) -> Self {
        self.has_header = false;
        self.input_fields = Some(input_fields);
        self
    }

    /// Fixed-width layout used when the input file has the given column names and slices
    pub const fn with_fixed_width(
        mut self,
        input_fields: &'static [&'static str],
        slices: &'static [(usize, usize)],
    ) -> Self {
        self.input_fields = Some(input_fields);
        self.fixed_width = Some(slices);
        self
    }

    pub const fn with_default_file(mut self, file: &'static str) -> Self {
        self.default_file = file;
        self
    }

    pub const fn with_bom(mut self) -> Self {
        self.strip_bom = true;
        self
    }

    pub const fn with_nullable(mut self, fields: &'static [&'static str]) -> Self {
        self.nullable_fields = fields;
        self
    }

    pub const fn with_extra_parties(mut self, parties: &'static [&'static str]) -> Self {
        self.extra_parties = parties;
        self
    }
}

/// Global configuration for a normalization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Directory holding the state input files
    pub data_dir: PathBuf,

    /// Directory the `{state}_output.csv` files are written to
    pub output_dir: PathBuf,

    /// States to process
    pub states: Vec<StateCode>,

    /// Explicit input path per state, overriding the data directory lookup
    pub input_files: HashMap<StateCode, PathBuf>,

    /// Behaviour on a failing row
    pub row_error_policy: RowErrorPolicy,

    /// Maximum number of states processed at once
    pub max_concurrent_states: usize,

    /// Show per-state progress spinners
    pub show_progress: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output_dir: PathBuf::from(DEFAULT_DATA_DIR),
            states: DEFAULT_STATES
                .iter()
                .filter_map(|code| code.parse().ok())
                .collect(),
            input_files: HashMap::new(),
            row_error_policy: RowErrorPolicy::default(),
            max_concurrent_states: num_cpus::get(),
            show_progress: true,
        }
    }
}

impl NormalizerConfig {
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_states(mut self, states: Vec<StateCode>) -> Self {
        self.states = states;
        self
    }

    pub fn with_input_file(mut self, state: StateCode, path: impl Into<PathBuf>) -> Self {
        self.input_files.insert(state, path.into());
        self
    }

    pub fn with_row_error_policy(mut self, policy: RowErrorPolicy) -> Self {
        self.row_error_policy = policy;
        self
    }

    pub fn with_max_concurrent_states(mut self, max_states: usize) -> Self {
        self.max_concurrent_states = max_states.max(1);
        self
    }

    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Check the configuration before any input is opened
    pub fn validate(&self) -> Result<()> {
        if self.states.is_empty() {
            return Err(VoterError::configuration("No states selected"));
        }
        if !self.data_dir.is_dir() && self.input_files.len() < self.states.len() {
            return Err(VoterError::configuration(format!(
                "Data directory {} does not exist",
                self.data_dir.display()
            )));
        }
        if self.max_concurrent_states == 0 {
            return Err(VoterError::configuration(
                "max_concurrent_states must be at least 1",
            ));
        }
        debug!(
            "Configuration valid: {} states, policy {:?}",
            self.states.len(),
            self.row_error_policy
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_selects_default_states() {
        let config = NormalizerConfig::default();

        assert_eq!(config.states.len(), DEFAULT_STATES.len());
        assert!(config.states.contains(&StateCode::Pa));
        assert_eq!(config.row_error_policy, RowErrorPolicy::Abort);
        assert!(config.max_concurrent_states >= 1);
    }

    #[test]
    fn test_row_error_policy_parsing() {
        assert_eq!("abort".parse::<RowErrorPolicy>().unwrap(), RowErrorPolicy::Abort);
        assert_eq!("SKIP".parse::<RowErrorPolicy>().unwrap(), RowErrorPolicy::SkipAndLog);
        assert!("retry".parse::<RowErrorPolicy>().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = NormalizerConfig::default()
            .with_data_dir(temp_dir.path().join("missing"))
            .with_states(vec![StateCode::Co]);

        assert!(matches!(
            config.validate(),
            Err(VoterError::Configuration { .. })
        ));

        let config = config.with_data_dir(temp_dir.path());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_state_list() {
        let config = NormalizerConfig::default().with_states(Vec::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_state_format_builders() {
        const FIELDS: &[&str] = &["A", "B"];
        let format = StateFormat::delimited(StateCode::Fl, "%m/%d/%Y", b'\t')
            .headerless(FIELDS)
            .with_default_file("fl.txt");

        assert!(!format.has_header);
        assert_eq!(format.input_fields, Some(FIELDS));
        assert_eq!(format.default_file, "fl.txt");
        assert!(format.fixed_width.is_none());
    }
}
