use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::time::Duration;

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "0.0.0.0")]
    pub interface: String,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 8080)]
    pub port: u16,

    /// Pause in milliseconds between empty drain cycles on an open event stream
    #[arg(long, env, default_value_t = 500)]
    poll_interval_ms: u64,

    /// Open the notification page in the local default browser after startup
    #[arg(long, env, default_value_t = false)]
    pub open_browser: bool,

    /// Maximum number of result links fetched per search
    #[arg(long, env, default_value_t = 5)]
    pub search_result_limit: usize,

    /// Timeout in seconds for outbound search requests
    #[arg(long, env, default_value_t = 5)]
    pub search_timeout_secs: u64,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    /// Configuration with every flag at its default, ignoring the process
    /// arguments. Used by tests and embedding callers.
    pub fn with_defaults() -> Self {
        Config::parse_from([env!("CARGO_PKG_NAME")])
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn set_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }
}
