//! Command-line interface components.

use crate::config::{NormalizerConfig, RowErrorPolicy};
use crate::constants::DEFAULT_STATES;
use crate::models::StateCode;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "voter_normalizer")]
#[command(about = "Normalize state voter registration files into canonical voter record CSV")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Comma separated state codes to process, or `all` for the default set
    #[arg(short, long, required = true)]
    pub states: String,

    /// Directory holding the state input files
    #[arg(short = 'd', long = "datadir", default_value = "./data")]
    pub data_dir: PathBuf,

    /// Directory the `{state}_output.csv` files are written to
    #[arg(short = 'o', long = "outputdir", default_value = "./data")]
    pub output_dir: PathBuf,

    /// Explicit input for one state as STATE=PATH (repeatable)
    #[arg(short, long = "input", value_name = "STATE=PATH")]
    pub inputs: Vec<String>,

    /// What to do with a row that fails: abort or skip
    #[arg(long, default_value = "abort")]
    pub on_row_error: String,

    /// Maximum number of states processed at once
    #[arg(long)]
    pub max_concurrent: Option<usize>,

    /// Disable the per-state progress spinners
    #[arg(long)]
    pub no_progress: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// States named on the command line
    pub fn selected_states(&self) -> Result<Vec<StateCode>> {
        let list = if self.states.trim().eq_ignore_ascii_case("all") {
            DEFAULT_STATES.join(",")
        } else {
            self.states.clone()
        };
        let states = StateCode::parse_list(&list)
            .with_context(|| format!("Invalid --states value '{}'", self.states))?;
        if states.is_empty() {
            anyhow::bail!("No states given in --states");
        }
        Ok(states)
    }

    /// Build the run configuration
    pub fn into_config(self) -> Result<NormalizerConfig> {
        let states = self.selected_states()?;
        let policy: RowErrorPolicy = self
            .on_row_error
            .parse()
            .context("Invalid --on-row-error value")?;

        let mut config = NormalizerConfig::default()
            .with_data_dir(self.data_dir)
            .with_output_dir(self.output_dir)
            .with_states(states)
            .with_row_error_policy(policy);

        for input in &self.inputs {
            let (state, path) = input
                .split_once('=')
                .with_context(|| format!("Expected STATE=PATH, got '{}'", input))?;
            let state: StateCode = state
                .parse()
                .with_context(|| format!("Invalid state in --input '{}'", input))?;
            config = config.with_input_file(state, path.trim());
        }
        if let Some(max) = self.max_concurrent {
            config = config.with_max_concurrent_states(max);
        }
        if self.no_progress {
            config = config.without_progress();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("voter_normalizer").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_all_selects_default_states() {
        let args = parse(&["-s", "all"]);
        let states = args.selected_states().unwrap();

        assert_eq!(states.len(), DEFAULT_STATES.len());
        assert_eq!(states[0], StateCode::Co);
        assert!(!states.contains(&StateCode::Ut));
    }

    #[test]
    fn test_into_config() {
        let args = parse(&[
            "--states",
            "co, pa",
            "-d",
            "/srv/voters",
            "--on-row-error",
            "skip",
            "--input",
            "pa=/srv/voters/Statewide",
            "--max-concurrent",
            "1",
            "--no-progress",
        ]);
        let config = args.into_config().unwrap();

        assert_eq!(config.states, vec![StateCode::Co, StateCode::Pa]);
        assert_eq!(config.data_dir, PathBuf::from("/srv/voters"));
        assert_eq!(config.output_dir, PathBuf::from("./data"));
        assert_eq!(config.row_error_policy, RowErrorPolicy::SkipAndLog);
        assert_eq!(
            config.input_files.get(&StateCode::Pa),
            Some(&PathBuf::from("/srv/voters/Statewide"))
        );
        assert_eq!(config.max_concurrent_states, 1);
        assert!(!config.show_progress);
    }

    #[test]
    fn test_bad_values_are_rejected() {
        assert!(parse(&["-s", "co,zz"]).into_config().is_err());
        assert!(parse(&["-s", "co", "--on-row-error", "retry"]).into_config().is_err());
        assert!(parse(&["-s", "co", "-i", "co"]).into_config().is_err());
        assert!(Args::try_parse_from(["voter_normalizer"]).is_err());
    }
}
