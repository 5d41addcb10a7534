//! Configuration constants.
//!
//! This module defines the limits and defaults used throughout the fetch pipeline.

use std::time::Duration;

// Redirect handling
/// Maximum number of redirect hops to follow manually.
///
/// The original request plus this many redirects gives at most six dispatches
/// for one logical fetch. A redirect response arriving after the last allowed
/// hop fails the call instead of issuing another request.
pub const MAX_REDIRECT_HOPS: usize = 5;

// Response and body size limits
/// Maximum accepted `Content-Length` value in bytes (5MB).
/// Larger responses are rejected before charset conversion and parsing.
pub const MAX_CONTENT_LENGTH: u64 = 5_000_000;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `Accept-Encoding` value sent when gzip transfer is enabled.
pub const ACCEPT_ENCODING_VALUE: &str = "gzip, deflate";

/// Number of leading body bytes scanned for an in-document charset declaration.
pub const CHARSET_SNIFF_BYTES: usize = 8192;

/// Maximum HTML preview length in characters for debugging (500 chars)
pub const MAX_HTML_PREVIEW_CHARS: usize = 500;
