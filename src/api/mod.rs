//! HTTP surface of the records service.
//!
//! `records_router()` returns a composable `Router` with every endpoint;
//! `server` owns binding, serving and graceful shutdown.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::records_router;
pub use server::{start_server, HttpServer, ServerError};
pub use types::ApiContext;
