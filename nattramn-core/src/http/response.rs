//! Internal response type shared by every pipeline path

use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{HeaderMap, Response, StatusCode};
use std::convert::Infallible;

/// Common HTTP type aliases used across the crate
pub type RespBody = BoxBody<Bytes, Infallible>;
pub type Req = hyper::Request<hyper::body::Incoming>;
pub type Resp = Response<RespBody>;

/// Create a response body from any data that can be converted to Bytes
#[inline]
pub fn body_from<T: Into<Bytes>>(data: T) -> RespBody {
    Full::new(data.into()).boxed()
}

/// The pipeline's universal internal result: every dispatch path produces
/// one of these and the finalizer consumes it uniformly.
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl PageResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self { status, headers, body: body.into() }
    }

    /// 200 response with the given content type
    pub fn ok(content_type: &'static str, body: impl Into<Bytes>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        Self::new(StatusCode::OK, headers, body)
    }

    /// The uniform 404 outcome: fixed plain-text body
    pub fn not_found() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        Self::new(StatusCode::NOT_FOUND, headers, "Not found.")
    }

    /// Convert into a hyper response
    pub fn into_hyper(self) -> Resp {
        let mut response = Response::builder().status(self.status);
        if let Some(headers) = response.headers_mut() {
            *headers = self.headers;
        }
        response.body(body_from(self.body)).expect("valid HTTP response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_sets_content_type() {
        let resp = PageResponse::ok("text/html", "<p>hi</p>");
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.headers.get(CONTENT_TYPE).unwrap(), "text/html");
    }

    #[test]
    fn test_not_found_is_plain_text() {
        let resp = PageResponse::not_found();
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert_eq!(resp.headers.get(CONTENT_TYPE).unwrap(), "text/plain");
        assert_eq!(resp.body.as_ref(), b"Not found.");
    }

    #[test]
    fn test_into_hyper_preserves_headers() {
        let resp = PageResponse::ok("text/html", "x").into_hyper();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(CONTENT_TYPE).unwrap(), "text/html");
    }
}
