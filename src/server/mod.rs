//! Connection dispatcher for the wirehttp engine.
//!
//! Owns the listening socket, hands each accepted connection to its own
//! tokio task, and drives the per-connection read → dispatch → write cycle
//! using the wire codec and the router.

mod config;
mod error;
mod handler;
mod http_server;
mod tests;

// Re-export public items
pub use config::ServerConfig;
pub use error::Error;
pub use handler::{HandlerFn, HandlerFuture, PathParams};
pub use http_server::HttpServer;
