//! Error categorization.
//!
//! Transport failures all land in `ErrorCategory::Transport`; this module
//! refines them into a short label for log lines.

use super::stats::FetchStats;
use super::types::FetchError;

/// Describes what kind of transport failure a `reqwest::Error` is.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> &'static str {
    if error.is_builder() {
        "request builder error"
    } else if error.is_redirect() {
        "redirect error"
    } else if error.is_timeout() {
        "timeout"
    } else if error.is_connect() {
        "connect error"
    } else if error.is_request() {
        "request error"
    } else if error.is_body() {
        "body error"
    } else if error.is_decode() {
        "decode error"
    } else {
        "other error"
    }
}

/// Records a failed fetch in `stats` and logs it.
pub fn update_error_stats(stats: &FetchStats, error: &FetchError) {
    stats.increment_error(error.category());

    let url = error.url().unwrap_or("<unknown>");
    match error.kind() {
        super::FetchErrorKind::Transport(e) => log::warn!(
            "Fetch of {} failed ({}): {} (is_timeout: {}, is_connect: {})",
            url,
            categorize_reqwest_error(e),
            e,
            e.is_timeout(),
            e.is_connect()
        ),
        kind => log::warn!("Fetch of {} failed: {} [{}]", url, kind, error.category()),
    }
}
