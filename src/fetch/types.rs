//! Request and response data structures.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use url::Url;

use crate::document::Document;

/// Request parameters: the query string for GET, the form body otherwise.
pub type Params = Vec<(String, String)>;

/// Everything needed to dispatch one logical fetch.
///
/// Built once per call by [`prepare`](super::prepare). Redirect handling
/// works on a copy, rewriting its URL, method, and parameters.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub url: String,
    /// Query parameters (GET only).
    pub query: Option<Params>,
    /// Form body parameters (every method except GET).
    pub form: Option<Params>,
    pub headers: HeaderMap,
    pub timeout: Duration,
    pub gzip: bool,
    pub follow_redirects: bool,
    /// Caller-supplied charset, used instead of detection.
    pub encoding: Option<String>,
    /// Record this fetch's URL as the next request's `Referer`.
    pub referer: bool,
}

impl RequestSpec {
    /// The outbound parameters, whichever slot they were routed to.
    pub fn params(&self) -> Option<&Params> {
        self.form.as_ref().or(self.query.as_ref())
    }
}

/// Status line and headers of a response, before the body is read.
#[derive(Debug, Clone)]
pub(crate) struct ResponseHead {
    pub(crate) status: StatusCode,
    pub(crate) headers: HeaderMap,
    pub(crate) url: Url,
}

impl From<&reqwest::Response> for ResponseHead {
    fn from(response: &reqwest::Response) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().clone(),
            url: response.url().clone(),
        }
    }
}

/// Response metadata handed back to the caller.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// URL of the final (post-redirect) response.
    pub url: Url,
    /// Cookies that apply to `url` after this response, keyed by name.
    pub cookies: HashMap<String, String>,
}

impl ResponseMeta {
    pub(crate) fn new(head: ResponseHead, cookies: Vec<(String, String)>) -> Self {
        Self {
            status: head.status,
            headers: head.headers,
            url: head.url,
            cookies: cookies.into_iter().collect(),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A successful fetch.
#[derive(Debug)]
pub struct FetchResult {
    pub response: ResponseMeta,
    /// Body converted to UTF-8.
    pub body: String,
    pub document: Document,
}

impl FetchResult {
    pub fn cookies(&self) -> &HashMap<String, String> {
        &self.response.cookies
    }

    pub fn into_parts(self) -> (Document, ResponseMeta, String) {
        (self.document, self.response, self.body)
    }
}

/// Whatever had been assembled when a fetch failed.
#[derive(Debug, Default)]
pub struct PartialResult {
    pub response: Option<ResponseMeta>,
    pub body: Option<String>,
    pub document: Option<Document>,
}

impl PartialResult {
    pub fn is_empty(&self) -> bool {
        self.response.is_none() && self.body.is_none() && self.document.is_none()
    }
}
