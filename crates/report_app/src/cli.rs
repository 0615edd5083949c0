use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::logging::LogDestination;

/// Command line surface of the report generator.
#[derive(Debug, Parser)]
#[command(name = "title_report")]
#[command(about = "Fetch the BG-wiki title table and filter it against a wanted list")]
#[command(version)]
pub struct Args {
    /// File with one wanted title per line.
    #[arg(long, default_value = "wanted_titles.txt")]
    pub wanted: PathBuf,

    /// Optional RON config file; flags override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Page to fetch instead of the default titles page.
    #[arg(long)]
    pub url: Option<String>,

    /// Origin that relative links resolve against.
    #[arg(long)]
    pub base: Option<String>,

    /// Directory the report files are written to.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// CSV output filename.
    #[arg(long)]
    pub csv: Option<String>,

    /// HTML output filename.
    #[arg(long)]
    pub html: Option<String>,

    /// Also write a JSON manifest with this filename.
    #[arg(long)]
    pub manifest: Option<String>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value = "terminal")]
    pub log: LogChoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogChoice {
    Terminal,
    File,
    Both,
}

impl Args {
    pub fn log_destination(&self) -> LogDestination {
        match self.log {
            LogChoice::Terminal => LogDestination::Terminal,
            LogChoice::File => LogDestination::File,
            LogChoice::Both => LogDestination::Both,
        }
    }
}
