//! The public fetch client.

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::Method;

use crate::charset::{CharsetCodec, EncodingRsCodec};
use crate::config::{ClientSettings, SharedSettings};
use crate::document::{Document, DocumentParser, ScraperParser};
use crate::error_handling::{FetchError, FetchStats, InitializationError};
use crate::fetch::{
    execute, prepare, CallbackCompletion, Deferred, FetchContext, FetchResult, Params,
    ResponseMeta,
};
use crate::initialization::{init_client, init_cookie_jar};

/// Fetches pages and returns them decoded and parsed.
///
/// A client owns one cookie jar and one set of [`ClientSettings`]; both are
/// shared by every call made through it (and by its clones).
#[derive(Clone)]
pub struct Client {
    ctx: FetchContext,
    jar: Arc<Jar>,
}

impl Client {
    /// Creates a client with default settings.
    pub fn new() -> Result<Self, InitializationError> {
        Self::with_settings(ClientSettings::default())
    }

    pub fn with_settings(settings: ClientSettings) -> Result<Self, InitializationError> {
        let jar = init_cookie_jar();
        let http = init_client(jar.clone())?;
        let ctx = FetchContext::new(
            http,
            settings.into_shared(),
            jar.clone(),
            Arc::new(EncodingRsCodec),
            Arc::new(ScraperParser),
            Arc::new(FetchStats::new()),
        );
        Ok(Self { ctx, jar })
    }

    /// Replaces the charset detector/converter.
    pub fn with_charset_codec(mut self, codec: impl CharsetCodec + 'static) -> Self {
        self.ctx.charset = Arc::new(codec);
        self
    }

    /// Replaces the HTML parser.
    pub fn with_parser(mut self, parser: impl DocumentParser + 'static) -> Self {
        self.ctx.parser = Arc::new(parser);
        self
    }

    /// Shared settings: default headers, timeout, gzip and referer switches.
    pub fn settings(&self) -> &SharedSettings {
        &self.ctx.settings
    }

    /// Installs a named browser identity. Returns `false` for unknown names.
    pub fn set_browser(&self, name: &str) -> bool {
        self.ctx
            .settings
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .set_browser(name)
    }

    pub fn cookie_jar(&self) -> &Arc<Jar> {
        &self.jar
    }

    pub fn stats(&self) -> &FetchStats {
        &self.ctx.stats
    }

    /// Fetches `url` and resolves to the parsed result.
    ///
    /// `params` become the query string for `GET` and the form body otherwise.
    /// `encoding` names the page charset; `None` (or `"auto"`) detects it.
    ///
    /// On failure the returned error carries the response, body, and document
    /// that had been assembled before the failure.
    pub async fn run(
        &self,
        method: Method,
        url: &str,
        params: Option<Params>,
        encoding: Option<&str>,
    ) -> Result<FetchResult, FetchError> {
        let spec = prepare(&self.ctx.settings, method, url, params, encoding);
        execute(&self.ctx, spec, Deferred).await
    }

    /// Fetches `url` and reports the outcome to `callback`.
    ///
    /// The callback receives `(error, document, response, body)`: on success
    /// `error` is `None`; on failure the other three hold whatever had been
    /// assembled, and the error itself carries no partial result.
    pub async fn run_with_callback<F>(
        &self,
        method: Method,
        url: &str,
        params: Option<Params>,
        encoding: Option<&str>,
        callback: F,
    ) where
        F: FnOnce(Option<FetchError>, Option<Document>, Option<ResponseMeta>, Option<String>),
    {
        let spec = prepare(&self.ctx.settings, method, url, params, encoding);
        execute(&self.ctx, spec, CallbackCompletion(callback)).await
    }

    /// `GET` shorthand for [`run`](Self::run).
    pub async fn fetch(
        &self,
        url: &str,
        params: Option<Params>,
        encoding: Option<&str>,
    ) -> Result<FetchResult, FetchError> {
        self.run(Method::GET, url, params, encoding).await
    }

    /// `POST` shorthand for [`run`](Self::run).
    pub async fn post(
        &self,
        url: &str,
        params: Option<Params>,
        encoding: Option<&str>,
    ) -> Result<FetchResult, FetchError> {
        self.run(Method::POST, url, params, encoding).await
    }
}
