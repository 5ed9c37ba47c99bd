//! Response finalization: checksum, cache headers, compression, length
//!
//! Every response the dispatcher produces passes through here exactly once,
//! on its way out. The ETag is a SHA-1 over the uncompressed body - a
//! change-detection token, not a security boundary.

use crate::config::CompressionMethod;
use crate::http::response::PageResponse;
use brotli::CompressorWriter as BrotliCompressor;
use bytes::Bytes;
use flate2::{write::GzEncoder, Compression};
use hyper::header::{HeaderValue, CACHE_CONTROL, CONTENT_ENCODING, CONTENT_LENGTH, ETAG};
use sha1::{Digest, Sha1};
use std::io::Write;

const DEFAULT_CACHE_CONTROL: &str = "public, max-age=3600";

/// Finalize a response: set `ETag`, default `Cache-Control`, negotiate and
/// apply compression, then set `Content-Length` from the final body.
pub fn finalize(
    mut response: PageResponse,
    accept_encoding: &str,
    method: CompressionMethod,
) -> PageResponse {
    let etag = {
        let mut hasher = Sha1::new();
        hasher.update(&response.body);
        format!("\"{}\"", hex::encode(hasher.finalize()))
    };
    if let Ok(value) = etag.parse() {
        response.headers.insert(ETAG, value);
    }

    if !response.headers.contains_key(CACHE_CONTROL) {
        response.headers.insert(CACHE_CONTROL, HeaderValue::from_static(DEFAULT_CACHE_CONTROL));
    }

    // At most one method applies: the configured one, and only when the
    // client accepts it
    match method {
        CompressionMethod::Gzip if accept_encoding.contains("gzip") => {
            if let Some(compressed) = gzip(&response.body) {
                response.headers.insert(CONTENT_ENCODING, HeaderValue::from_static("gzip"));
                response.body = compressed;
            }
        }
        CompressionMethod::Br if accept_encoding.contains("br") => {
            if let Some(compressed) = brotli_compress(&response.body) {
                response.headers.insert(CONTENT_ENCODING, HeaderValue::from_static("br"));
                response.body = compressed;
            }
        }
        _ => {}
    }

    // Content-Length last, so it reflects the post-compression size
    response.headers.insert(CONTENT_LENGTH, HeaderValue::from(response.body.len()));

    response
}

fn gzip(body: &[u8]) -> Option<Bytes> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(body).ok()?;
    encoder.finish().ok().map(Bytes::from)
}

fn brotli_compress(body: &[u8]) -> Option<Bytes> {
    let mut encoder = BrotliCompressor::new(Vec::new(), 4096, 5, 22);
    encoder.write_all(body).ok()?;
    encoder.flush().ok()?;
    Some(Bytes::from(encoder.into_inner()))
}
