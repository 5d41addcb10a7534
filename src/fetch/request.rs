//! Request option building.
//!
//! This module turns caller arguments plus the client-wide settings into a
//! [`RequestSpec`] for one fetch.

use reqwest::header::{HeaderMap, HeaderValue, HOST};
use reqwest::Method;
use url::Url;

use crate::config::SharedSettings;
use crate::fetch::types::{Params, RequestSpec};

/// Builds the request spec for one fetch.
///
/// - Installs the default browser identity if none is set, then snapshots the
///   default headers with a `Host` header derived from `url` in front of them.
/// - Routes `params` to the query string for `GET` and to the form body for
///   every other method.
/// - Treats an empty or `"auto"` encoding hint as no hint.
///
/// Malformed URLs are not rejected here; they fail at dispatch.
pub fn prepare(
    settings: &SharedSettings,
    method: Method,
    url: &str,
    params: Option<Params>,
    encoding: Option<&str>,
) -> RequestSpec {
    let (headers, timeout, gzip, referer) = {
        let mut guard = settings.write().unwrap_or_else(|e| e.into_inner());
        guard.ensure_default_identity();
        (
            request_headers(url, &guard.headers),
            guard.timeout,
            guard.gzip,
            guard.referer,
        )
    };

    let (query, form) = if method == Method::GET {
        (params, None)
    } else {
        (None, params)
    };

    let encoding = encoding
        .map(str::trim)
        .filter(|e| !e.is_empty() && !e.eq_ignore_ascii_case("auto"))
        .map(str::to_string);

    RequestSpec {
        method,
        url: url.to_string(),
        query,
        form,
        headers,
        timeout,
        gzip,
        follow_redirects: true,
        encoding,
        referer,
    }
}

/// `Host` for `url` followed by the default headers. A `Host` among the
/// defaults takes precedence.
pub(crate) fn request_headers(url: &str, defaults: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(defaults.len() + 1);
    if let Some(host) = host_header(url) {
        headers.insert(HOST, host);
    }
    for (name, value) in defaults {
        headers.insert(name.clone(), value.clone());
    }
    headers
}

/// `host[:port]` of `url`, or `None` if it cannot be parsed.
pub(crate) fn host_header(url: &str) -> Option<HeaderValue> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let value = match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    HeaderValue::from_str(&value).ok()
}
