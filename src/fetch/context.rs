//! Fetch context.
//!
//! This module defines the `FetchContext` struct that groups the shared
//! resources every fetch needs: the HTTP client, the settings, and the
//! cookie, charset, and parsing collaborators.

use std::sync::Arc;

use crate::charset::CharsetCodec;
use crate::config::SharedSettings;
use crate::cookies::CookieJar;
use crate::document::DocumentParser;
use crate::error_handling::FetchStats;

/// Context containing all shared resources needed for a fetch.
#[derive(Clone)]
pub struct FetchContext {
    /// HTTP client with automatic redirects and body decoding disabled
    pub client: Arc<reqwest::Client>,
    /// Default headers, timeout, gzip and referer switches
    pub settings: SharedSettings,
    /// Cookie store the client writes into
    pub cookie_jar: Arc<dyn CookieJar>,
    /// Charset detector/converter
    pub charset: Arc<dyn CharsetCodec>,
    /// HTML parser
    pub parser: Arc<dyn DocumentParser>,
    /// Failure and event counters
    pub stats: Arc<FetchStats>,
}

impl FetchContext {
    /// Creates a new `FetchContext` with the given resources.
    pub fn new(
        client: Arc<reqwest::Client>,
        settings: SharedSettings,
        cookie_jar: Arc<dyn CookieJar>,
        charset: Arc<dyn CharsetCodec>,
        parser: Arc<dyn DocumentParser>,
        stats: Arc<FetchStats>,
    ) -> Self {
        Self {
            client,
            settings,
            cookie_jar,
            charset,
            parser,
            stats,
        }
    }
}
