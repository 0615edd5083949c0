mod cli;
mod config;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use report_engine::{run_report_blocking, ReqwestFetcher, RunError, RunSummary};
use report_logging::report_error;
use thiserror::Error;

use crate::cli::Args;
use crate::config::ConfigError;

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Run(#[from] RunError),
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::initialize(args.log_destination());

    match run(&args) {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(err) => {
            report_error!("{err}");
            eprintln!("ERROR: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<RunSummary, AppError> {
    let config = config::load(args)?;
    let fetcher = ReqwestFetcher::new(config.fetch.clone());
    Ok(run_report_blocking(&config, &fetcher)?)
}

fn print_summary(summary: &RunSummary) {
    if !summary.missing.is_empty() {
        println!("\nWARNING: Not found (check spelling/encoding):");
        for title in &summary.missing {
            println!(" - {title}");
        }
    }

    println!("\nWrote:");
    for path in &summary.written {
        println!(" - {}", path.display());
    }
}
