//! Convenient single-import surface for applications
//!
//! ```rust,ignore
//! use nattramn_core::prelude::*;
//! ```

pub use crate::config::{CompressionMethod, NattramnConfig, RouterConfig, ServerConfig};
pub use crate::http::{start_server, Server};
pub use crate::pages::{page_fn, PageData, PageHandler, PageRequest};
pub use crate::router::{RouteParams, RoutePattern};
pub use crate::template::Template;
