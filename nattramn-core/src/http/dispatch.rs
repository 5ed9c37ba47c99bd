//! Per-request control flow
//!
//! Extensioned paths are asset requests: the client bundle's literal path is
//! special-cased, everything else goes through static resolution.
//! Extensionless paths are page routes, matched in registration order. Any
//! failure collapses into the uniform 404, and every outcome - pages,
//! assets, bundle, 404 - leaves through the finalizer.

use crate::assets;
use crate::bundle;
use crate::config::NattramnConfig;
use crate::http::error::PageError;
use crate::http::finalize::finalize;
use crate::http::response::{PageResponse, Resp};
use crate::pages::PageRequest;
use crate::render;
use hyper::header::{ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_LENGTH};
use hyper::Request;
use std::net::SocketAddr;
use std::time::Instant;

/// Handle one request end to end, producing the response to send
pub async fn handle_request<B>(
    config: &NattramnConfig,
    req: &Request<B>,
    remote: Option<SocketAddr>,
) -> Resp {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let accept_encoding = req
        .headers()
        .get(ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_lowercase();

    let page_response = match dispatch(config, req).await {
        Ok(response) => response,
        Err(err) => {
            err.log();
            PageResponse::not_found()
        }
    };

    let response =
        finalize(page_response, &accept_encoding, config.server.compression).into_hyper();

    if config.server.access_log {
        access_log(remote, method.as_str(), &path, &response, start);
    }

    response
}

/// The branch sequence: extension check, bundle, static, route match, 404
async fn dispatch<B>(config: &NattramnConfig, req: &Request<B>) -> Result<PageResponse, PageError> {
    let path = req.uri().path();

    if assets::extension(path).is_some() {
        if path == bundle::CLIENT_BUNDLE_PATH {
            return bundle::fetch_client_bundle().await;
        }

        let resolved =
            assets::resolve(path, &config.server).ok_or_else(|| PageError::AssetNotFound {
                path: path.to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "static serving not configured",
                ),
            })?;
        return assets::serve_file(".", &resolved).await;
    }

    let partial = is_partial(req);
    for page in &config.router.pages {
        if let Some(params) = page.route.capture(path) {
            let request = PageRequest {
                path: path.to_string(),
                query: req.uri().query().map(str::to_string),
                params,
            };
            let data = page.handler.handle(request).await.map_err(|source| {
                PageError::HandlerFailed { route: page.route.raw().to_string(), source }
            })?;
            return Ok(render::assemble(page, &data, partial));
        }
    }

    Err(PageError::RouteNotFound { path: path.to_string() })
}

/// Partial-content mode: `x-partial-content` header (any truthy value) or
/// the `partialContent` query parameter
fn is_partial<B>(req: &Request<B>) -> bool {
    let header_set = req
        .headers()
        .get("x-partial-content")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| !v.is_empty());
    if header_set {
        return true;
    }

    query_param(req.uri().query(), "partialContent").is_some_and(|v| !v.is_empty())
}

/// Value of a query parameter, treating a bare key as an empty value
fn query_param<'a>(query: Option<&'a str>, key: &str) -> Option<&'a str> {
    query?.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        (k == key).then_some(v)
    })
}

/// Structured JSON access-log line, one per response
fn access_log(
    remote: Option<SocketAddr>,
    method: &str,
    path: &str,
    response: &Resp,
    start: Instant,
) {
    let headers = response.headers();
    let len = headers.get(CONTENT_LENGTH).and_then(|v| v.to_str().ok()).unwrap_or("-");
    let enc = headers.get(CONTENT_ENCODING).and_then(|v| v.to_str().ok()).unwrap_or("-");
    let line = serde_json::json!({
        "remote": remote.map(|r| r.ip().to_string()).unwrap_or_else(|| "-".into()),
        "method": method,
        "path": path,
        "status": response.status().as_u16(),
        "len": len,
        "enc": enc,
        "dur_ms": start.elapsed().as_millis() as u64,
    });
    log::info!("{}", line);
}
