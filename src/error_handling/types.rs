//! Error type definitions.
//!
//! This module defines the error taxonomy of the fetch pipeline plus the
//! error types used by initialization and settings.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::charset::CharsetError;
use crate::document::Document;
use crate::fetch::{Params, PartialResult, ResponseMeta};

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors raised while editing client settings.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid header name: {0}")]
    InvalidHeaderName(String),

    #[error("invalid value for header {0}")]
    InvalidHeaderValue(String),
}

/// What went wrong during a fetch, one variant per failure site.
///
/// Each variant carries only the diagnostics relevant to it.
#[derive(Error, Debug)]
pub enum FetchErrorKind {
    /// Network, DNS, timeout, or request-building failure.
    #[error("{0}")]
    Transport(#[from] ReqwestError),

    /// A redirect pointed at a location that cannot be resolved to a URL.
    #[error("invalid redirect location: {location}")]
    InvalidRedirect {
        location: String,
        #[source]
        source: url::ParseError,
    },

    /// More redirects than `MAX_REDIRECT_HOPS` were returned.
    #[error("redirect limit over")]
    RedirectLimit { hops: usize },

    /// The response body was empty.
    #[error("no content")]
    NoContent { status_code: u16 },

    /// The declared `Content-Length` exceeded `MAX_CONTENT_LENGTH`.
    #[error("content-length is too large")]
    ContentTooLarge { content_length: u64 },

    /// The body could not be converted from its charset.
    #[error("{source}")]
    Decode {
        charset: String,
        #[source]
        source: CharsetError,
    },

    /// A compressed body could not be inflated.
    #[error("failed to decompress response body: {0}")]
    Decompression(#[source] std::io::Error),

    /// The final response status was not 200.
    #[error("server status")]
    Status { status_code: u16 },
}

/// Coarse failure categories used for statistics and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorCategory {
    Transport,
    Content,
    Decode,
    Status,
    Decompression,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "Transport error",
            ErrorCategory::Content => "Content error",
            ErrorCategory::Decode => "Decode error",
            ErrorCategory::Status => "Status error",
            ErrorCategory::Decompression => "Decompression error",
        }
    }
}

/// Notable events during a fetch that are not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    HttpRedirect,      // A redirect hop was followed manually
    DecompressedBody,  // A gzip/deflate body was inflated
    CharsetConverted,  // Body bytes were converted to UTF-8
    RefererUpdated,    // The Referer for the next request was recorded
}

impl InfoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::HttpRedirect => "HTTP redirect",
            InfoType::DecompressedBody => "Decompressed body",
            InfoType::CharsetConverted => "Charset converted",
            InfoType::RefererUpdated => "Referer updated",
        }
    }
}

impl FetchErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FetchErrorKind::Transport(_)
            | FetchErrorKind::InvalidRedirect { .. }
            | FetchErrorKind::RedirectLimit { .. } => ErrorCategory::Transport,
            FetchErrorKind::NoContent { .. } | FetchErrorKind::ContentTooLarge { .. } => {
                ErrorCategory::Content
            }
            FetchErrorKind::Decode { .. } => ErrorCategory::Decode,
            FetchErrorKind::Status { .. } => ErrorCategory::Status,
            FetchErrorKind::Decompression(_) => ErrorCategory::Decompression,
        }
    }
}

/// A failed fetch as delivered to the caller.
///
/// Carries the failure kind, the requested URL, and the outbound parameters.
/// When the result was awaited (no callback), whatever had been assembled
/// before the failure is attached as well: the response metadata, the decoded
/// body, and the parsed document. In callback mode those travel as callback
/// arguments instead and the accessors return `None`.
#[derive(Debug)]
pub struct FetchError {
    kind: FetchErrorKind,
    url: Option<String>,
    param: Option<Params>,
    partial: PartialResult,
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

impl From<FetchErrorKind> for FetchError {
    fn from(kind: FetchErrorKind) -> Self {
        Self::new(kind)
    }
}

impl FetchError {
    pub fn new(kind: FetchErrorKind) -> Self {
        Self {
            kind,
            url: None,
            param: None,
            partial: PartialResult::default(),
        }
    }

    pub(crate) fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub(crate) fn with_param(mut self, param: Option<Params>) -> Self {
        self.param = param;
        self
    }

    pub(crate) fn with_partial(mut self, partial: PartialResult) -> Self {
        self.partial = partial;
        self
    }

    pub fn kind(&self) -> &FetchErrorKind {
        &self.kind
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// The URL the caller asked for.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// The outbound query or form parameters.
    pub fn param(&self) -> Option<&Params> {
        self.param.as_ref()
    }

    /// Response status attached to "no content" and "server status" failures.
    pub fn status_code(&self) -> Option<u16> {
        match self.kind {
            FetchErrorKind::NoContent { status_code } | FetchErrorKind::Status { status_code } => {
                Some(status_code)
            }
            _ => None,
        }
    }

    /// Charset that failed to convert.
    pub fn charset(&self) -> Option<&str> {
        match &self.kind {
            FetchErrorKind::Decode { charset, .. } => Some(charset),
            _ => None,
        }
    }

    /// Declared length of an oversized response.
    pub fn content_length(&self) -> Option<u64> {
        match self.kind {
            FetchErrorKind::ContentTooLarge { content_length } => Some(content_length),
            _ => None,
        }
    }

    pub fn response(&self) -> Option<&ResponseMeta> {
        self.partial.response.as_ref()
    }

    pub fn body(&self) -> Option<&str> {
        self.partial.body.as_deref()
    }

    pub fn document(&self) -> Option<&Document> {
        self.partial.document.as_ref()
    }

    /// Splits off the partial result, leaving the error without it.
    pub fn take_partial(&mut self) -> PartialResult {
        std::mem::take(&mut self.partial)
    }

    pub fn into_kind(self) -> FetchErrorKind {
        self.kind
    }
}
