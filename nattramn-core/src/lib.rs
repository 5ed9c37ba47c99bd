//! Nattramn - Core
//!
//! A server-side rendered page server: each route splices a static HTML
//! template with head/body fragments produced by an application handler.
//! Clients running the companion navigation runtime can request
//! partial-content responses - the rendered fragment alone, with title
//! changes carried out of band in a header - while plain clients always get
//! full documents. Extensioned paths fall back to static asset serving.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use nattramn_core::prelude::*;
//!
//! const TEMPLATE: &str =
//!     "<html><head></head><body><nattramn-router></nattramn-router></body></html>";
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let router = RouterConfig::builder()
//!         .page("/users/:id", TEMPLATE, page_fn(|req: PageRequest| async move {
//!             Ok(PageData::new(format!("<p>{}</p>", req.params["id"]))
//!                 .with_head("<title>User</title>"))
//!         }))
//!         .build()?;
//!
//!     start_server(NattramnConfig::load(router)?).await
//! }
//! ```
//!
//! # Architecture
//!
//! - [`config`] - frozen server + router configuration
//! - [`router`] - route patterns and positional segment matching
//! - [`template`] - marker-based template splitting
//! - [`render`] - response assembly (full and partial)
//! - [`assets`] - static asset resolution and serving
//! - [`bundle`] - the client bundle special case
//! - [`http`] - hyper server, dispatcher and response finalizer

pub mod assets;
pub mod bundle;
pub mod config;
pub mod http;
pub mod pages;
pub mod render;
pub mod router;
pub mod template;

// Prelude module for convenient imports
pub mod prelude;

// Re-exports of main types
pub use config::{CompressionMethod, NattramnConfig, Page, RouterConfig, ServerConfig};
pub use http::{start_server, PageError, PageResponse, Server};
pub use pages::{page_fn, PageData, PageHandler, PageRequest};
pub use router::{RouteParams, RoutePattern};
pub use template::Template;
