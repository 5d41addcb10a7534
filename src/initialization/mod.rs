//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - The HTTP client (manual redirects, shared cookie jar, raw bodies)
//! - The logger

mod client;
mod logger;

use std::sync::Arc;

use reqwest::cookie::Jar;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;

/// Initializes an empty cookie jar to be shared by every request of a client.
pub fn init_cookie_jar() -> Arc<Jar> {
    Arc::new(Jar::default())
}
