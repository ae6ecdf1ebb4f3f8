//! HTTP server: plain HTTP listener with graceful shutdown.
//!
//! TLS is expected to be terminated in front of the page (ingress or load
//! balancer), so the server only speaks plain HTTP.

mod listen;
mod shutdown;

pub use listen::{start_server, ServerError};
