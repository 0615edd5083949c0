//! Logging initialization for report_app.
//!
//! Writes logs to `./report.log` in the current working directory.

use std::fs::File;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Log file created in the working directory when file logging is on.
const LOG_FILE: &str = "./report.log";

/// Destination for log output.
pub enum LogDestination {
    /// Write to ./report.log in current directory.
    File,
    /// Write to terminal (stdout).
    Terminal,
    /// Write to both file and terminal.
    Both,
}

/// Initialize the logger with the specified destination.
///
/// For `LogDestination::File` or `Both`, creates `./report.log` in the
/// current working directory. A file that cannot be created drops the file
/// half with a warning instead of failing the run.
pub fn initialize(destination: LogDestination) {
    // Debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let (terminal, file) = match destination {
        LogDestination::File => (false, true),
        LogDestination::Terminal => (true, false),
        LogDestination::Both => (true, true),
    };

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if terminal {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if file {
        match File::create(LOG_FILE) {
            Ok(handle) => loggers.push(WriteLogger::new(level, config, handle)),
            Err(err) => eprintln!("Warning: Could not create log file at {LOG_FILE}: {err}"),
        }
    }
    if loggers.is_empty() {
        return;
    }

    let _ = CombinedLogger::init(loggers);
}
