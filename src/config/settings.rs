//! Client-wide settings shared by every fetch.
//!
//! `ClientSettings` holds the default request headers, the per-request timeout,
//! and the gzip/referer switches. A `Client` keeps it behind an
//! `Arc<RwLock<_>>` so header changes (including the automatic `Referer`
//! update after a successful fetch) are seen by subsequent calls.

use std::str::FromStr;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, REFERER, USER_AGENT};

use crate::config::browser::Browser;
use crate::config::constants::DEFAULT_TIMEOUT;
use crate::error_handling::SettingsError;

/// Settings handle shared between a `Client` and its callers.
pub type SharedSettings = Arc<RwLock<ClientSettings>>;

/// Default headers and transport switches applied to every request.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Headers sent with every request (the `Host` header is added per request).
    pub headers: HeaderMap,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Advertise gzip/deflate transfer and inflate compressed bodies.
    pub gzip: bool,
    /// After a successful fetch, send its URL as `Referer` on the next request.
    pub referer: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            headers: HeaderMap::new(),
            timeout: DEFAULT_TIMEOUT,
            gzip: true,
            referer: true,
        }
    }
}

impl ClientSettings {
    /// Wraps the settings in a shareable handle.
    pub fn into_shared(self) -> SharedSettings {
        Arc::new(RwLock::new(self))
    }

    /// Installs the `User-Agent` of a named browser identity.
    ///
    /// Returns `false` and leaves the headers untouched when `name` is unknown.
    pub fn set_browser(&mut self, name: &str) -> bool {
        match Browser::from_str(name) {
            Ok(browser) => {
                self.apply_browser(browser);
                true
            }
            Err(_) => {
                log::warn!("Unknown browser identity: {name}");
                false
            }
        }
    }

    /// Installs the `User-Agent` of `browser`.
    pub fn apply_browser(&mut self, browser: Browser) {
        self.headers
            .insert(USER_AGENT, HeaderValue::from_static(browser.user_agent()));
        log::debug!("Browser identity set to {browser}");
    }

    /// Returns the preset matching the current `User-Agent`, if there is one.
    pub fn browser(&self) -> Option<Browser> {
        self.headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .and_then(Browser::from_user_agent)
    }

    /// Installs the default identity if no `User-Agent` has been set.
    ///
    /// Called before every header snapshot, so the first request of a fresh
    /// client presents the default identity.
    pub fn ensure_default_identity(&mut self) {
        if !self.headers.contains_key(USER_AGENT) {
            self.apply_browser(Browser::DEFAULT);
        }
    }

    /// Sets a default header, replacing any previous value.
    pub fn set_header(&mut self, name: &str, value: &str) -> Result<(), SettingsError> {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| SettingsError::InvalidHeaderName(name.to_string()))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| SettingsError::InvalidHeaderValue(name.to_string()))?;
        self.headers.insert(header_name, header_value);
        Ok(())
    }

    /// Removes a default header. Returns whether it was present.
    pub fn remove_header(&mut self, name: &str) -> bool {
        self.headers.remove(name).is_some()
    }

    /// Records `url` as the `Referer` for the next request.
    pub(crate) fn set_referer(&mut self, url: &str) {
        match HeaderValue::from_str(url) {
            Ok(value) => {
                self.headers.insert(REFERER, value);
            }
            Err(_) => log::debug!("Not using {url} as Referer: invalid header value"),
        }
    }
}
