//! Cookie jar access.
//!
//! The jar is shared by every request a client makes. reqwest stores cookies
//! from each `Set-Cookie` header into it; the fetch pipeline only reads from it
//! to snapshot the cookies that apply to a URL.

use reqwest::cookie::{CookieStore, Jar};
use url::Url;

/// Read access to a process-wide cookie store.
pub trait CookieJar: Send + Sync {
    /// Returns the `(name, value)` pairs that would be sent to `url`, in order.
    fn cookies(&self, url: &Url) -> Vec<(String, String)>;
}

impl CookieJar for Jar {
    fn cookies(&self, url: &Url) -> Vec<(String, String)> {
        let Some(header) = CookieStore::cookies(self, url) else {
            return Vec::new();
        };
        let Ok(header) = header.to_str() else {
            log::debug!("Cookie header for {url} is not valid UTF-8");
            return Vec::new();
        };
        parse_cookie_header(header)
    }
}

/// Splits a `Cookie` request header (`a=1; b=2`) into pairs.
pub(crate) fn parse_cookie_header(header: &str) -> Vec<(String, String)> {
    header
        .split(';')
        .filter_map(|pair| {
            let pair = pair.trim();
            if pair.is_empty() {
                return None;
            }
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            Some((name.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}
