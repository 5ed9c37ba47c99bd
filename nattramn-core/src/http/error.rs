//! The dispatcher's closed error taxonomy
//!
//! Every failure in the request pipeline collapses to a uniform 404 at the
//! dispatcher boundary; the variants exist so the diagnostic log line can
//! say what actually went wrong.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    /// No registered page matches the request path
    #[error("no route matches {path}")]
    RouteNotFound { path: String },

    /// A matched page's handler returned no data
    #[error("page handler failed for {route}")]
    HandlerFailed {
        route: String,
        #[source]
        source: anyhow::Error,
    },

    /// Static file missing or unreadable
    #[error("static asset {path} is missing or unreadable")]
    AssetNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Client bundle could not be fetched from its CDN
    #[error("client bundle fetch failed")]
    BundleFetch {
        #[source]
        source: reqwest::Error,
    },
}

impl PageError {
    /// Log the diagnostic for this failure; "route missing" and
    /// "file missing" are distinguished for operators, the client sees a
    /// uniform 404 either way.
    pub fn log(&self) {
        match self {
            PageError::RouteNotFound { path } => {
                log::warn!("route missing: no page matches {}", path);
            }
            PageError::HandlerFailed { route, source } => {
                log::warn!("route missing: handler for {} failed: {:#}", route, source);
            }
            PageError::AssetNotFound { path, source } => {
                log::warn!("file missing: {} ({})", path, source);
            }
            PageError::BundleFetch { source } => {
                log::warn!("file missing: client bundle fetch failed: {}", source);
            }
        }
    }
}
