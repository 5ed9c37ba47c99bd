//! HTTP serving built on hyper
//!
//! - [`server`] - TCP accept loop and connection serving
//! - [`dispatch`] - per-request control flow
//! - [`finalize`] - checksum, cache headers, compression, length
//! - [`response`] - the pipeline's internal response type
//! - [`error`] - the dispatcher's failure taxonomy

pub mod dispatch;
pub mod error;
pub mod finalize;
pub mod response;
pub mod server;

pub use dispatch::handle_request;
pub use error::PageError;
pub use finalize::finalize;
pub use response::{body_from, PageResponse, Req, Resp, RespBody};
pub use server::{start_server, Server};
