//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use clap::{Parser, ValueEnum};

use crate::config::constants::DEFAULT_TIMEOUT;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options for the `docfetch` binary.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "docfetch",
    about = "Fetch a page, normalize its encoding, and print what was parsed"
)]
pub struct Opt {
    /// URL to fetch
    pub url: String,

    /// HTTP method
    #[arg(short = 'X', long, default_value = "GET")]
    pub method: String,

    /// Request parameter as key=value (query string for GET, form body otherwise)
    #[arg(short = 'd', long = "param", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Charset of the page (auto-detected when omitted)
    #[arg(short, long)]
    pub encoding: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_seconds: u64,

    /// Browser identity to present (ie, edge, chrome, firefox, safari, opera, googlebot)
    #[arg(long)]
    pub browser: Option<String>,

    /// Do not request gzip/deflate transfer
    #[arg(long)]
    pub no_gzip: bool,

    /// Do not send the previous page as Referer
    #[arg(long)]
    pub no_referer: bool,

    /// Print the response as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

/// Parses a `key=value` pair. A missing `=` yields an empty value.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw.split_once('=').unwrap_or((raw, ""));
    if key.is_empty() {
        return Err(format!("parameter name missing in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
