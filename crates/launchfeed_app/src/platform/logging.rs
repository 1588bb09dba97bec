//! Logging initialization for the terminal front-end.
//!
//! The terminal is owned by the UI, so log output always goes to a file.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{Config, ConfigBuilder, WriteLogger};

/// Initialize the file logger at `path`.
///
/// Logging is best effort: if the file cannot be created the app runs without it.
pub fn initialize(path: &Path, level: LevelFilter) {
    let file = match File::create(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            return;
        }
    };
    let _ = WriteLogger::init(level, build_config(), file);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        // Keep HTTP stack chatter out of the log.
        .add_filter_allow_str("launchfeed")
        .build()
}
