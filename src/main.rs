use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use std::sync::atomic::Ordering;
use tracing_subscriber::EnvFilter;
use voter_normalizer::cli::Args;
use voter_normalizer::processor::Processor;

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(run(args)) {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Run the requested states; `false` when any state failed
async fn run(args: Args) -> Result<bool> {
    let config = args.into_config()?;
    let processor = Processor::new(config).context("Invalid configuration")?;

    let cancelled = processor.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nReceived CTRL+C, stopping after the current rows...");
            cancelled.store(true, Ordering::Relaxed);
        }
    });

    let summary = processor.run().await.context("Normalization run failed")?;
    Ok(summary.all_succeeded())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
