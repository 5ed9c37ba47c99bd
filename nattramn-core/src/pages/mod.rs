//! Page handlers and the data they produce
//!
//! A page handler is the application-side callback behind a route: it
//! receives the request's captured parameters and returns the dynamic head
//! and body fragments to splice into the page template.

use crate::router::RouteParams;
use async_trait::async_trait;
use hyper::HeaderMap;
use std::future::Future;

/// Dynamic fragments produced by a page handler for one request
#[derive(Debug, Clone, Default)]
pub struct PageData {
    /// Markup injected into the template's `<head>` element
    pub head: Option<String>,
    /// Markup rendered into the router slot
    pub body: String,
    /// Extra response headers; `Content-Type` is always overridden downstream
    pub headers: HeaderMap,
}

impl PageData {
    pub fn new(body: impl Into<String>) -> Self {
        Self { head: None, body: body.into(), headers: HeaderMap::new() }
    }

    pub fn with_head(mut self, head: impl Into<String>) -> Self {
        self.head = Some(head.into());
        self
    }

    pub fn with_header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = value.parse() {
            self.headers.insert(name, value);
        }
        self
    }
}

/// Request view handed to a page handler; freshly allocated per request
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// URL path as received
    pub path: String,
    /// Raw query string, without the leading `?`
    pub query: Option<String>,
    /// Values captured by the route's placeholder segments
    pub params: RouteParams,
}

/// Application callback producing [`PageData`] for a matched route
///
/// A handler error aborts the request; the dispatcher reports it as a 404.
#[async_trait]
pub trait PageHandler: Send + Sync {
    async fn handle(&self, request: PageRequest) -> anyhow::Result<PageData>;
}

/// Adapt an async function or closure into a [`PageHandler`]
///
/// # Example
///
/// ```rust,ignore
/// let handler = page_fn(|req: PageRequest| async move {
///     Ok(PageData::new(format!("<p>{}</p>", req.params["id"])))
/// });
/// ```
pub fn page_fn<F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(PageRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<PageData>> + Send + 'static,
{
    FnHandler(f)
}

/// [`PageHandler`] backed by a plain async function, see [`page_fn`]
pub struct FnHandler<F>(F);

#[async_trait]
impl<F, Fut> PageHandler for FnHandler<F>
where
    F: Fn(PageRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<PageData>> + Send + 'static,
{
    async fn handle(&self, request: PageRequest) -> anyhow::Result<PageData> {
        (self.0)(request).await
    }
}
