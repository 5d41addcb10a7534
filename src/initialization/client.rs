//! HTTP client initialization.
//!
//! This module builds the reqwest client used for every dispatch.

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::ClientBuilder;

/// Initializes the HTTP client shared by all fetches.
///
/// Creates a `reqwest::Client` configured with:
/// - Redirects disabled, so redirects can be re-issued manually as GET
/// - `jar` as cookie store, updated from every response including redirects
/// - No automatic body decompression (bodies arrive as raw bytes)
///
/// Timeouts and headers are applied per request from the client settings.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(jar: Arc<Jar>) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_provider(jar)
        .build()?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_client() {
        let jar = Arc::new(Jar::default());
        assert!(init_client(jar).is_ok());
    }
}
