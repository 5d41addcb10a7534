//! Browser identity presets.
//!
//! A browser identity is the `User-Agent` value the client presents. Internet
//! Explorer is installed lazily when no identity has been chosen yet.

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Named browser identities accepted by [`ClientSettings::set_browser`](super::ClientSettings::set_browser).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter, EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Browser {
    Ie,
    Edge,
    Chrome,
    Firefox,
    Safari,
    Opera,
    Googlebot,
}

impl Browser {
    /// Identity installed when the caller has not picked one.
    pub const DEFAULT: Browser = Browser::Ie;

    /// Returns the `User-Agent` string presented for this identity.
    pub fn user_agent(&self) -> &'static str {
        match self {
            Browser::Ie => "Mozilla/5.0 (Windows NT 10.0; WOW64; Trident/7.0; rv:11.0) like Gecko",
            Browser::Edge => "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36 Edg/131.0.0.0",
            Browser::Chrome => "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
            Browser::Firefox => "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
            Browser::Safari => "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_7_1) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.1 Safari/605.1.15",
            Browser::Opera => "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36 OPR/115.0.0.0",
            Browser::Googlebot => "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
        }
    }

    /// Finds the identity whose `User-Agent` equals `user_agent`, if any.
    pub fn from_user_agent(user_agent: &str) -> Option<Browser> {
        use strum::IntoEnumIterator;
        Browser::iter().find(|b| b.user_agent() == user_agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_browser_parse_case_insensitive() {
        assert_eq!(Browser::from_str("chrome").unwrap(), Browser::Chrome);
        assert_eq!(Browser::from_str("Firefox").unwrap(), Browser::Firefox);
        assert_eq!(Browser::from_str("IE").unwrap(), Browser::Ie);
        assert!(Browser::from_str("netscape").is_err());
    }

    #[test]
    fn test_browser_display_round_trips_name() {
        assert_eq!(Browser::Googlebot.to_string(), "googlebot");
        assert_eq!(Browser::Ie.as_ref(), "ie");
    }

    #[test]
    fn test_user_agents_are_distinct() {
        let agents: std::collections::HashSet<_> =
            Browser::iter().map(|b| b.user_agent()).collect();
        assert_eq!(agents.len(), Browser::iter().count());
    }

    #[test]
    fn test_from_user_agent() {
        assert_eq!(
            Browser::from_user_agent(Browser::Safari.user_agent()),
            Some(Browser::Safari)
        );
        assert_eq!(Browser::from_user_agent("curl/8.0"), None);
    }
}
