//! HTTP server module.
//!
//! The server includes:
//! - Explicit two-step startup (bind, then serve) so bind failures are fatal up front
//! - Graceful shutdown on SIGTERM/SIGINT

mod server;
mod shutdown;

pub use server::{start_server, HealthServer, ListeningServer, ServerError};
