//! The fetch pipeline.
//!
//! - [`request`]: builds a [`RequestSpec`] from caller arguments and settings
//! - [`transport`]: dispatches it, following redirects and inflating bodies
//! - [`execute`]: validates, decodes and parses the response
//! - [`completion`]: delivers the outcome via callback or as a `Result`

mod completion;
mod context;
mod decompress;
mod execute;
mod request;
mod transport;
mod types;


pub use completion::{CallbackCompletion, Completion, Deferred};
pub use context::FetchContext;
pub use execute::execute;
pub use request::prepare;
pub use types::{FetchResult, Params, PartialResult, RequestSpec, ResponseMeta};
