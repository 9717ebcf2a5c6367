#![deny(missing_docs)]
//! `engine_*` macros over the `log` facade, shared by every summarizer crate.
//!
//! Log targets are module paths, so every record from the workspace starts
//! with [`TARGET_PREFIX`]. Dependency records (hyper, reqwest, rustls) are
//! filtered out by [`workspace_config`].

use simplelog::ConfigBuilder;

/// Common prefix of the workspace crates' log targets.
pub const TARGET_PREFIX: &str = "summarizer";

/// Trace-level record.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Request lifecycle milestones: submitted, rendered, service in use.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Debug-level record.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Recoverable problems: failed requests, stale completions, bad settings.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Error-level record.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// `simplelog` config builder that only lets workspace records through.
pub fn workspace_config() -> ConfigBuilder {
    let mut builder = ConfigBuilder::new();
    builder.add_filter_allow_str(TARGET_PREFIX);
    builder
}

/// Terminal logger for tests; later calls are no-ops.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, TermLogger, TerminalMode};

    let _ = TermLogger::init(
        log::LevelFilter::Debug,
        workspace_config().build(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}
