//! Fetch orchestration.
//!
//! Drives one logical fetch: dispatch (with redirects), cookie snapshot,
//! content validation, charset conversion, parsing, status check, Referer
//! bookkeeping, and finally delivery through a [`Completion`].

use reqwest::header::CONTENT_LENGTH;
use reqwest::StatusCode;

use crate::config::{MAX_CONTENT_LENGTH, MAX_HTML_PREVIEW_CHARS};
use crate::document::{Document, DocumentInfo};
use crate::error_handling::{update_error_stats, FetchError, FetchErrorKind, InfoType};
use crate::fetch::completion::Completion;
use crate::fetch::context::FetchContext;
use crate::fetch::transport;
use crate::fetch::types::{FetchResult, PartialResult, RequestSpec, ResponseHead, ResponseMeta};

/// Runs `spec` to completion and delivers the outcome through `completion`.
///
/// Failures never escape as panics or early returns to the caller; every
/// outcome goes through `completion`.
pub async fn execute<C: Completion>(
    ctx: &FetchContext,
    spec: RequestSpec,
    completion: C,
) -> C::Output {
    let outcome = transport::request(&ctx.client, spec.clone(), spec.gzip, 0).await;

    let raw = match outcome {
        Ok(raw) => raw,
        Err(failure) => {
            let partial = PartialResult {
                response: failure.response.map(|head| snapshot(ctx, head)),
                ..Default::default()
            };
            return fail(ctx, &spec, failure.kind, partial, completion);
        }
    };

    for _ in 0..raw.redirects {
        ctx.stats.increment_info(InfoType::HttpRedirect);
    }
    if raw.decompressed {
        ctx.stats.increment_info(InfoType::DecompressedBody);
    }

    let response = snapshot(ctx, raw.head);
    let status_code = response.status_code();
    let body = raw.body;

    if body.is_empty() {
        return fail(
            ctx,
            &spec,
            FetchErrorKind::NoContent { status_code },
            PartialResult {
                response: Some(response),
                ..Default::default()
            },
            completion,
        );
    }

    if let Some(content_length) = declared_content_length(&response) {
        if content_length > MAX_CONTENT_LENGTH {
            return fail(
                ctx,
                &spec,
                FetchErrorKind::ContentTooLarge { content_length },
                PartialResult {
                    response: Some(response),
                    ..Default::default()
                },
                completion,
            );
        }
    }

    let encoding = spec
        .encoding
        .clone()
        .or_else(|| ctx.charset.detect(&body))
        .map(|e| e.to_lowercase());

    let bytes = match &encoding {
        Some(charset) => match ctx.charset.convert(charset, &body) {
            Ok(converted) => {
                log::debug!("Converted body of {} from {}", response.url, charset);
                ctx.stats.increment_info(InfoType::CharsetConverted);
                converted
            }
            Err(source) => {
                return fail(
                    ctx,
                    &spec,
                    FetchErrorKind::Decode {
                        charset: charset.clone(),
                        source,
                    },
                    PartialResult {
                        response: Some(response),
                        ..Default::default()
                    },
                    completion,
                );
            }
        },
        None => {
            log::debug!("No charset resolved for {}, decoding as UTF-8", response.url);
            body
        }
    };

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };
    log::trace!(
        "Body preview for {}: {}",
        response.url,
        text.chars().take(MAX_HTML_PREVIEW_CHARS).collect::<String>()
    );

    let info = DocumentInfo {
        url: response.url.clone(),
        encoding,
    };
    let document = Document::load(ctx.parser.as_ref(), &text, info);

    if response.status != StatusCode::OK {
        return fail(
            ctx,
            &spec,
            FetchErrorKind::Status { status_code },
            PartialResult {
                response: Some(response),
                body: Some(text),
                document: Some(document),
            },
            completion,
        );
    }

    if spec.referer {
        let mut settings = ctx.settings.write().unwrap_or_else(|e| e.into_inner());
        settings.set_referer(document.url().as_str());
        ctx.stats.increment_info(InfoType::RefererUpdated);
    }

    log::debug!(
        "Fetched {} ({} bytes, charset {:?})",
        document.url(),
        text.len(),
        document.encoding()
    );
    ctx.stats.increment_success();
    completion.succeed(FetchResult {
        response,
        body: text,
        document,
    })
}

/// Attaches the cookies that now apply to the response URL.
fn snapshot(ctx: &FetchContext, head: ResponseHead) -> ResponseMeta {
    let cookies = ctx.cookie_jar.cookies(&head.url);
    ResponseMeta::new(head, cookies)
}

fn declared_content_length(response: &ResponseMeta) -> Option<u64> {
    response
        .headers
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// Single failure path: tags the error with the request URL and parameters,
/// records it, and hands it to `completion`.
fn fail<C: Completion>(
    ctx: &FetchContext,
    spec: &RequestSpec,
    kind: FetchErrorKind,
    partial: PartialResult,
    completion: C,
) -> C::Output {
    let error = FetchError::new(kind)
        .with_url(spec.url.clone())
        .with_param(spec.params().cloned());
    update_error_stats(&ctx.stats, &error);
    completion.fail(error, partial)
}
