//! Result delivery.
//!
//! A fetch ends either by handing its outcome to a caller-supplied callback or
//! by resolving the awaited future. Both go through [`Completion`], chosen once
//! per call, so the pipeline has a single success path and a single failure
//! path regardless of how the caller wants the result.

use crate::document::Document;
use crate::error_handling::FetchError;
use crate::fetch::types::{FetchResult, PartialResult, ResponseMeta};

/// Delivers the outcome of one fetch.
pub trait Completion {
    type Output;

    fn succeed(self, result: FetchResult) -> Self::Output;

    /// `partial` holds whatever had been assembled before the failure.
    fn fail(self, error: FetchError, partial: PartialResult) -> Self::Output;
}

/// Resolves to `Result<FetchResult, FetchError>`.
///
/// On failure the partial result is attached to the error, so callers can
/// still inspect e.g. the parsed body of a soft 404.
#[derive(Debug, Default, Clone, Copy)]
pub struct Deferred;

impl Completion for Deferred {
    type Output = Result<FetchResult, FetchError>;

    fn succeed(self, result: FetchResult) -> Self::Output {
        Ok(result)
    }

    fn fail(self, error: FetchError, partial: PartialResult) -> Self::Output {
        Err(error.with_partial(partial))
    }
}

/// Invokes `callback(error, document, response, body)`.
///
/// On success `error` is `None` and the rest are `Some`. On failure the last
/// three are whatever had been assembled; the error itself carries no partial
/// result.
pub struct CallbackCompletion<F>(pub F);

impl<F> Completion for CallbackCompletion<F>
where
    F: FnOnce(Option<FetchError>, Option<Document>, Option<ResponseMeta>, Option<String>),
{
    type Output = ();

    fn succeed(self, result: FetchResult) {
        let (document, response, body) = result.into_parts();
        (self.0)(None, Some(document), Some(response), Some(body));
    }

    fn fail(self, error: FetchError, partial: PartialResult) {
        (self.0)(Some(error), partial.document, partial.response, partial.body);
    }
}
