//! HTTP server: accept loop and connection serving
//!
//! One logical request loop: connections are accepted one at a time, each
//! spawned onto the runtime and served independently. The only state shared
//! between in-flight requests is the frozen `Arc<NattramnConfig>`; there is
//! no queueing, rate limiting, backpressure or per-request timeout.

use crate::config::NattramnConfig;
use crate::http::dispatch::handle_request;
use crate::http::response::Req;
use anyhow::{Context, Result};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as AutoBuilder;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// The page server, ready to accept connections
pub struct Server {
    config: Arc<NattramnConfig>,
}

impl Server {
    pub fn new(config: NattramnConfig) -> Self {
        Self { config: Arc::new(config) }
    }

    /// Bind the listener and run the request loop indefinitely
    pub async fn serve(self) -> Result<()> {
        // Initialize default logger if the application has not already
        let _ = env_logger::Builder::from_default_env()
            .format_timestamp_millis()
            .format_module_path(false)
            .try_init();

        let addr: SocketAddr = format!("{}:{}", self.config.server.host, self.config.server.port)
            .parse()
            .with_context(|| {
                format!(
                    "Invalid listen address {}:{}",
                    self.config.server.host, self.config.server.port
                )
            })?;

        let listener = TcpListener::bind(addr).await?;
        log::info!(
            "Nattramn page server listening on http://{} ({} pages, compression: {})",
            addr,
            self.config.router.pages.len(),
            self.config.server.compression
        );

        loop {
            let (stream, remote_addr) = listener.accept().await?;
            let config = Arc::clone(&self.config);

            tokio::spawn(async move {
                let service = service_fn(move |req: Req| {
                    let config = Arc::clone(&config);
                    async move {
                        Ok::<_, Infallible>(handle_request(&config, &req, Some(remote_addr)).await)
                    }
                });

                let builder = AutoBuilder::new(TokioExecutor::new());
                if let Err(e) = builder.serve_connection(TokioIo::new(stream), service).await {
                    log::error!("connection error from {}: {}", remote_addr, e);
                }
            });
        }
    }
}

/// Convenience entry point: wrap the config and serve
pub async fn start_server(config: NattramnConfig) -> Result<()> {
    Server::new(config).serve().await
}
