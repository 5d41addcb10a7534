//! Character set detection and conversion.
//!
//! The fetch pipeline only depends on the [`CharsetCodec`] trait. The default
//! implementation, [`EncodingRsCodec`], is backed by `encoding_rs`.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;
use thiserror::Error;

use crate::config::CHARSET_SNIFF_BYTES;

/// Errors raised by a [`CharsetCodec`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CharsetError {
    #[error("unsupported charset: {0}")]
    Unsupported(String),

    #[error("malformed {0} byte sequence")]
    Malformed(String),
}

/// Detects the charset of raw bytes and converts them to UTF-8.
pub trait CharsetCodec: Send + Sync {
    /// Guesses the charset label of `bytes`, or `None` if nothing conclusive was found.
    fn detect(&self, bytes: &[u8]) -> Option<String>;

    /// Converts `bytes` from `charset` to UTF-8.
    fn convert(&self, charset: &str, bytes: &[u8]) -> Result<Vec<u8>, CharsetError>;
}

// Matches both `<meta charset="x">` and the http-equiv `content="text/html; charset=x"` form.
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\b[^>]*?charset\s*=\s*["']?\s*([A-Za-z0-9._:\-]+)"#)
        .expect("meta charset pattern is valid")
});

/// `encoding_rs`-backed codec.
///
/// Detection order: byte order mark, then a charset declared in a `<meta>`
/// tag near the top of the document, then plain UTF-8 validity.
#[derive(Debug, Default, Clone, Copy)]
pub struct EncodingRsCodec;

impl EncodingRsCodec {
    fn sniff_meta(bytes: &[u8]) -> Option<String> {
        let prefix = &bytes[..bytes.len().min(CHARSET_SNIFF_BYTES)];
        META_CHARSET
            .captures(prefix)
            .and_then(|caps| caps.get(1))
            .and_then(|m| Encoding::for_label(m.as_bytes()))
            // UTF-16 labels resolve to UTF-8, x-user-defined to windows-1252.
            .map(|encoding| encoding.output_encoding().name().to_string())
    }
}

impl CharsetCodec for EncodingRsCodec {
    fn detect(&self, bytes: &[u8]) -> Option<String> {
        if let Some((encoding, _)) = Encoding::for_bom(bytes) {
            return Some(encoding.name().to_string());
        }
        if let Some(label) = Self::sniff_meta(bytes) {
            return Some(label);
        }
        if std::str::from_utf8(bytes).is_ok() {
            return Some(UTF_8.name().to_string());
        }
        None
    }

    fn convert(&self, charset: &str, bytes: &[u8]) -> Result<Vec<u8>, CharsetError> {
        let encoding = Encoding::for_label(charset.trim().as_bytes())
            .ok_or_else(|| CharsetError::Unsupported(charset.to_string()))?;
        let (text, used, had_errors) = encoding.decode(bytes);
        if had_errors {
            return Err(CharsetError::Malformed(used.name().to_string()));
        }
        Ok(text.into_owned().into_bytes())
    }
}
