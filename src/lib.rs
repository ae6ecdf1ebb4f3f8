//! Pipeline page: status page of a DevSecOps delivery pipeline.
//!
//! The page's client-side behavior runs against an explicit page model
//! ([`page`]) so it can be exercised without a browser. [`script`] holds the
//! behavior itself; the remaining modules host the page over HTTP.

pub mod config;
pub mod error;
pub mod markup;
pub mod middleware;
pub mod page;
pub mod routes;
pub mod script;
pub mod server;
pub mod state;
pub mod templates;

pub use config::{AppConfig, BuildInfo};
pub use error::AppError;
pub use page::Page;
pub use script::PageScript;
