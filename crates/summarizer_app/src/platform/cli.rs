use std::path::PathBuf;

use clap::Parser;
use summarizer_core::SummaryLength;

use super::logging::{LogDestination, LogOptions, DEFAULT_LOG_FILE};
use super::settings::DEFAULT_SETTINGS_FILE;

#[derive(Debug, Parser)]
#[command(
    name = "summarizer",
    version,
    about = "Send documents to the summarization service and render the summaries"
)]
pub struct Cli {
    /// Files to pick and submit once. Without files the interactive console starts.
    pub files: Vec<PathBuf>,

    /// Summary length: short, medium or long.
    #[arg(long, default_value = "short")]
    pub length: SummaryLength,

    /// Base URL of the summarization service.
    #[arg(long)]
    pub api_base: Option<String>,

    /// Persist --api-base to the settings file for later runs.
    #[arg(long, requires = "api_base")]
    pub save_api_base: bool,

    /// Settings file (RON).
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,

    /// Where the rendered HTML results are written.
    #[arg(long, default_value = "summaries.html")]
    pub results: PathBuf,

    /// Log destination.
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Log file used by the `file` and `both` destinations.
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Include debug records in the log.
    #[arg(short, long)]
    pub verbose: bool,

    /// Check the service health endpoint and exit.
    #[arg(long)]
    pub check: bool,
}

impl Cli {
    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            destination: self.log,
            file: self.log_file.clone(),
            verbose: self.verbose,
        }
    }
}
