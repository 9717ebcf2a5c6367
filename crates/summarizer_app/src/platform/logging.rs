//! Logger setup for the `summarizer` binary.
//!
//! The interactive console owns stdout, so the default destination is a log
//! file next to the working directory.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use engine_logging::workspace_config;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

pub const DEFAULT_LOG_FILE: &str = "./summarizer.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogDestination {
    /// Log file only.
    File,
    /// stderr/stdout only (warnings and errors on stderr).
    Terminal,
    /// Log file and terminal.
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOptions {
    pub destination: LogDestination,
    pub file: PathBuf,
    pub verbose: bool,
}

impl LogOptions {
    fn level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

pub fn initialize(options: &LogOptions) -> anyhow::Result<()> {
    let loggers = build_loggers(options)?;
    // A logger may already be installed when embedded in tests.
    let _ = CombinedLogger::init(loggers);
    Ok(())
}

fn build_loggers(options: &LogOptions) -> anyhow::Result<Vec<Box<dyn SharedLogger>>> {
    let level = options.level();
    let config = build_config();
    let terminal = || -> Box<dyn SharedLogger> {
        TermLogger::new(level, config.clone(), TerminalMode::Mixed, ColorChoice::Auto)
    };

    let loggers = match options.destination {
        LogDestination::Terminal => vec![terminal()],
        LogDestination::File => vec![file_logger(&options.file, level, config.clone())?],
        LogDestination::Both => vec![terminal(), file_logger(&options.file, level, config.clone())?],
    };
    Ok(loggers)
}

fn build_config() -> Config {
    workspace_config()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> anyhow::Result<Box<dyn SharedLogger>> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    Ok(WriteLogger::new(level, config, file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(destination: LogDestination, file: PathBuf) -> LogOptions {
        LogOptions {
            destination,
            file,
            verbose: false,
        }
    }

    #[test]
    fn both_builds_terminal_and_file_loggers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        let loggers = build_loggers(&options(LogDestination::Both, path.clone())).unwrap();
        assert_eq!(loggers.len(), 2);
        assert!(path.exists());
    }

    #[test]
    fn terminal_does_not_touch_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unused.log");
        let loggers = build_loggers(&options(LogDestination::Terminal, path.clone())).unwrap();
        assert_eq!(loggers.len(), 1);
        assert!(!path.exists());
    }

    #[test]
    fn unwritable_log_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("run.log");
        let err = build_loggers(&options(LogDestination::File, path)).err().unwrap();
        assert!(err.to_string().starts_with("cannot create log file"));
    }

    #[test]
    fn verbose_lowers_the_level() {
        let mut opts = options(LogDestination::Terminal, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(opts.level(), LevelFilter::Info);
        opts.verbose = true;
        assert_eq!(opts.level(), LevelFilter::Debug);
    }
}
