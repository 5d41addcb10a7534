// Shared test helpers for building mock pages and clients.

use std::io::Write;

use docfetch::Client;
use flate2::write::GzEncoder;
use flate2::Compression;

/// Creates a client with default settings.
#[allow(dead_code)] // Used by other test files
pub fn test_client() -> Client {
    Client::new().expect("Failed to create client")
}

/// Wraps `title` and `body` in a minimal HTML page.
#[allow(dead_code)]
pub fn page(title: &str, body: &str) -> String {
    format!("<html><head><title>{title}</title></head><body>{body}</body></html>")
}

/// Gzip-compresses `data`.
#[allow(dead_code)]
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("Failed to write gzip data");
    encoder.finish().expect("Failed to finish gzip stream")
}
