use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use launchfeed_engine::{FetchSettings, DEFAULT_ENDPOINT};
use log::LevelFilter;

#[derive(Debug, Clone, Parser)]
#[command(name = "launchfeed", version, about = "Browse rocket launches in the terminal")]
pub struct Config {
    /// Launches collection URL.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Quiet period before the search filter is applied, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    pub debounce_ms: u64,

    #[arg(long, default_value_t = 10)]
    pub connect_timeout_secs: u64,

    #[arg(long, default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Where to write the log; the terminal itself is used by the UI.
    #[arg(long, default_value = "launchfeed.log")]
    pub log_file: PathBuf,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..FetchSettings::default()
        }
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}
