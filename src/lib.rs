//! health-service: a liveness endpoint.
//!
//! Serves `GET /health` with `{"status":"ok","service":"<name>"}`. The
//! service name, listen address and log format come from an explicit
//! [`config::AppConfig`] built at startup.

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::StartupError;
pub use routes::create_router;
pub use state::AppState;
