//! docfetch library: fetch a page and hand it back as a parsed document
//!
//! A single call issues an HTTP request (GET or form POST), follows redirects
//! as GETs, inflates compressed bodies, converts the body from its declared or
//! detected charset to UTF-8, and parses it into an HTML [`Document`]. Cookies
//! persist across calls, and each successful fetch becomes the `Referer` of the
//! next one.
//!
//! # Example
//!
//! ```no_run
//! use docfetch::Client;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new()?;
//! let params = vec![("q".to_string(), "rust".to_string())];
//!
//! match client.fetch("http://example.com/search", Some(params), None).await {
//!     Ok(result) => {
//!         println!("{} ({:?})", result.document.url(), result.document.encoding());
//!         println!("title: {:?}", result.document.title());
//!     }
//!     Err(e) => {
//!         // A non-200 page is still parsed and attached to the error.
//!         eprintln!("{} (status {:?})", e, e.status_code());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod charset;
mod client;
pub mod config;
mod cookies;
mod document;
mod error_handling;
mod fetch;
pub mod initialization;

// Re-export public API
pub use charset::{CharsetCodec, CharsetError, EncodingRsCodec};
pub use client::Client;
pub use config::{Browser, ClientSettings, LogFormat, LogLevel, Opt, SharedSettings};
pub use cookies::CookieJar;
pub use document::{Document, DocumentInfo, DocumentParser, ScraperParser};
pub use error_handling::{
    ErrorCategory, FetchError, FetchErrorKind, FetchStats, InfoType, InitializationError,
    SettingsError,
};
pub use fetch::{
    execute, prepare, CallbackCompletion, Completion, Deferred, FetchContext, FetchResult,
    Params, PartialResult, RequestSpec, ResponseMeta,
};
pub use reqwest::Method;
