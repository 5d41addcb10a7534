//! Error handling and fetch statistics.
//!
//! This module provides:
//! - The fetch error taxonomy (`FetchErrorKind`) and the caller-facing `FetchError`
//! - Failure categories and informational event types
//! - Thread-safe statistics per client
//!
//! Failures are categorized into:
//! - **Transport**: network/DNS/timeout failures and redirect-limit overruns
//! - **Content**: empty bodies and oversized `Content-Length`
//! - **Decode**: charset conversion failures
//! - **Status**: a non-200 final status after an otherwise successful fetch
//! - **Decompression**: gzip/deflate inflate failures

mod categorization;
mod stats;
mod types;

// Re-export public API
pub(crate) use categorization::update_error_stats;
pub use stats::FetchStats;
pub use types::{
    ErrorCategory, FetchError, FetchErrorKind, InfoType, InitializationError, SettingsError,
};
