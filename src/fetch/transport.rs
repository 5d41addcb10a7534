//! HTTP dispatch with manual redirect following.
//!
//! The reqwest client is built with `redirect::Policy::none()`. Redirects are
//! re-issued here as plain GETs without parameters, because some servers do
//! not handle a POST that is redirected by the client library.

use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::header::{ACCEPT_ENCODING, HOST, LOCATION};
use reqwest::Method;
use url::Url;

use crate::config::{ACCEPT_ENCODING_VALUE, MAX_REDIRECT_HOPS};
use crate::error_handling::FetchErrorKind;
use crate::fetch::decompress::decompress_body;
use crate::fetch::request::host_header;
use crate::fetch::types::{RequestSpec, ResponseHead};

/// Body and metadata of the final response of a redirect chain.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub(crate) head: ResponseHead,
    pub(crate) body: Vec<u8>,
    /// Number of redirects followed to reach this response.
    pub(crate) redirects: usize,
    /// Whether `body` was inflated from a compressed transfer.
    pub(crate) decompressed: bool,
}

/// A failed dispatch, with the response that caused it when there was one.
#[derive(Debug)]
pub(crate) struct TransportFailure {
    pub(crate) kind: FetchErrorKind,
    pub(crate) response: Option<ResponseHead>,
}

impl TransportFailure {
    fn new(kind: impl Into<FetchErrorKind>, response: Option<ResponseHead>) -> Self {
        Self {
            kind: kind.into(),
            response,
        }
    }
}

/// Dispatches `spec`, following redirects until a non-redirect response.
///
/// `redirect_count` is the number of hops already taken; callers start at 0.
/// A redirect arriving after `MAX_REDIRECT_HOPS` hops fails with
/// `FetchErrorKind::RedirectLimit` and nothing more is sent. Transport errors
/// are returned as-is, without retry.
pub(crate) fn request(
    client: &reqwest::Client,
    mut spec: RequestSpec,
    allow_gzip: bool,
    redirect_count: usize,
) -> BoxFuture<'_, Result<RawResponse, TransportFailure>> {
    async move {
        if allow_gzip {
            spec.headers.insert(
                ACCEPT_ENCODING,
                reqwest::header::HeaderValue::from_static(ACCEPT_ENCODING_VALUE),
            );
        }

        log::debug!("Dispatching {} {} (hop {})", spec.method, spec.url, redirect_count);

        let mut builder = client
            .request(spec.method.clone(), spec.url.as_str())
            .headers(spec.headers.clone())
            .timeout(spec.timeout);
        if let Some(query) = &spec.query {
            builder = builder.query(query);
        }
        if let Some(form) = &spec.form {
            builder = builder.form(form);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportFailure::new(e, None))?;
        let head = ResponseHead::from(&response);

        let location = head
            .headers
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        if spec.follow_redirects && head.status.is_redirection() {
            if let Some(location) = location {
                let next_count = redirect_count + 1;
                if next_count > MAX_REDIRECT_HOPS {
                    log::warn!(
                        "Redirect limit of {} exceeded at {} (Location: {})",
                        MAX_REDIRECT_HOPS,
                        head.url,
                        location
                    );
                    return Err(TransportFailure::new(
                        FetchErrorKind::RedirectLimit { hops: next_count },
                        Some(head),
                    ));
                }

                let next_url = match resolve_location(&head.url, &location) {
                    Ok(url) => url,
                    Err(source) => {
                        return Err(TransportFailure::new(
                            FetchErrorKind::InvalidRedirect { location, source },
                            Some(head),
                        ))
                    }
                };
                log::debug!(
                    "{} {} redirected to {}",
                    head.status.as_u16(),
                    head.url,
                    next_url
                );

                drop(response);
                redirect_as_get(&mut spec, next_url);
                return request(client, spec, allow_gzip, next_count).await;
            }
        }

        let raw = response
            .bytes()
            .await
            .map_err(|e| TransportFailure::new(e, Some(head.clone())))?;

        match decompress_body(&head.headers, &raw) {
            Ok(Some(body)) => Ok(RawResponse {
                head,
                body,
                redirects: redirect_count,
                decompressed: true,
            }),
            Ok(None) => Ok(RawResponse {
                head,
                body: raw.to_vec(),
                redirects: redirect_count,
                decompressed: false,
            }),
            Err(e) => Err(TransportFailure::new(
                FetchErrorKind::Decompression(e),
                Some(head),
            )),
        }
    }
    .boxed()
}

/// Resolves a `Location` value against the URL that returned it.
fn resolve_location(base: &Url, location: &str) -> Result<Url, url::ParseError> {
    Url::parse(location).or_else(|_| base.join(location))
}

/// Rewrites `spec` to fetch `url` with a parameterless GET.
fn redirect_as_get(spec: &mut RequestSpec, url: Url) {
    spec.url = url.to_string();
    spec.method = Method::GET;
    spec.query = None;
    spec.form = None;
    match host_header(&spec.url) {
        Some(host) => {
            spec.headers.insert(HOST, host);
        }
        None => {
            spec.headers.remove(HOST);
        }
    }
}
