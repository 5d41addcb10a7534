//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, etc.)
//! - Browser identity presets
//! - Client-wide settings shared by every fetch
//! - CLI option types and parsing

mod browser;
mod constants;
mod settings;
mod types;

// Re-export all constants
pub use browser::Browser;
pub use constants::*;
pub use settings::{ClientSettings, SharedSettings};
pub use types::{parse_key_value, LogFormat, LogLevel, Opt};
