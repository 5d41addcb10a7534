//! Transfer decompression.
//!
//! reqwest is built without automatic decompression so bodies arrive exactly as
//! sent. This module inflates them according to `Content-Encoding`.

use std::io::Read;

use flate2::read::{DeflateDecoder, MultiGzDecoder, ZlibDecoder};
use reqwest::header::{HeaderMap, CONTENT_ENCODING};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Transfer codings this module can undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContentCoding {
    Gzip,
    Deflate,
}

impl ContentCoding {
    /// Reads `Content-Encoding`, ignoring case. Unknown codings yield `None`.
    pub(crate) fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(CONTENT_ENCODING)?.to_str().ok()?.trim();
        if value.eq_ignore_ascii_case("gzip") || value.eq_ignore_ascii_case("x-gzip") {
            Some(ContentCoding::Gzip)
        } else if value.eq_ignore_ascii_case("deflate") {
            Some(ContentCoding::Deflate)
        } else {
            None
        }
    }
}

/// Inflates `body` if the headers declare gzip or deflate.
///
/// Returns `Ok(None)` when the body is not compressed. A gzip-labelled body
/// without the gzip magic bytes is read as a zlib stream; a deflate body that
/// is not a zlib stream is read as raw deflate.
pub(crate) fn decompress_body(
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Option<Vec<u8>>, std::io::Error> {
    let Some(coding) = ContentCoding::from_headers(headers) else {
        return Ok(None);
    };

    let inflated = match coding {
        ContentCoding::Gzip if body.starts_with(&GZIP_MAGIC) => read_all(MultiGzDecoder::new(body))?,
        ContentCoding::Gzip => read_all(ZlibDecoder::new(body))?,
        ContentCoding::Deflate => {
            read_all(ZlibDecoder::new(body)).or_else(|_| read_all(DeflateDecoder::new(body)))?
        }
    };

    log::debug!(
        "Inflated {:?} body from {} to {} bytes",
        coding,
        body.len(),
        inflated.len()
    );
    Ok(Some(inflated))
}

fn read_all(mut reader: impl Read) -> Result<Vec<u8>, std::io::Error> {
    let mut out = Vec::new();
    reader.read_to_end(&mut out)?;
    Ok(out)
}
