//! Startup error taxonomy.
//!
//! The request path has no failure mode; everything that can go wrong happens
//! before the listener starts accepting connections.

use crate::config::ConfigError;
use crate::http::ServerError;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Server(#[from] ServerError),
}
