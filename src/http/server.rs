//! HTTP server startup logic.
//!
//! Startup happens in two steps so a bind failure surfaces before anything
//! is served: `HealthServer::bind` acquires the listener, then
//! `ListeningServer::serve` runs until the handle is shut down.

use std::net::{SocketAddr, TcpListener};

use axum::Router;
use axum_server::Handle;

use crate::config::AppConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address {0:?}")]
    InvalidAddress(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// A configured server that has not acquired its listener yet.
#[derive(Debug, Clone)]
pub struct HealthServer {
    host: String,
    port: u16,
    service: String,
}

/// A server holding a bound listener, ready to serve.
#[derive(Debug)]
pub struct ListeningServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    handle: Handle,
}

impl HealthServer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            host: config.http.host.clone(),
            port: config.http.port,
            service: config.service.name.clone(),
        }
    }

    fn addr(&self) -> Result<SocketAddr, ServerError> {
        // Bracket bare IPv6 literals so "::1" and "[::1]" both work
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        let text = format!("{}:{}", host, self.port);
        text.parse().map_err(|_| ServerError::InvalidAddress(text))
    }

    /// Acquire the listener. Fails if the address is in use or not permitted.
    pub fn bind(self) -> Result<ListeningServer, ServerError> {
        let addr = self.addr()?;
        let bind_err = |source| ServerError::Bind { addr, source };

        let listener = TcpListener::bind(addr).map_err(bind_err)?;
        listener.set_nonblocking(true).map_err(bind_err)?;
        let local_addr = listener.local_addr().map_err(bind_err)?;

        tracing::info!(
            service = %self.service,
            %local_addr,
            "[{}] service listening on :{}",
            self.service,
            local_addr.port()
        );

        Ok(ListeningServer {
            listener,
            local_addr,
            handle: Handle::new(),
        })
    }
}

impl ListeningServer {
    /// The address actually bound, which differs from the configured one when port 0 was requested.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Handle for triggering shutdown from outside the serve future.
    pub fn handle(&self) -> Handle {
        self.handle.clone()
    }

    /// Serve until the handle is shut down.
    pub async fn serve(self, app: Router) -> Result<(), ServerError> {
        axum_server::from_tcp(self.listener)
            .handle(self.handle)
            .serve(app.into_make_service())
            .await?;

        tracing::info!(addr = %self.local_addr, "Server stopped");
        Ok(())
    }
}

/// Bind, install signal handlers, and serve.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let server = HealthServer::new(config).bind()?;
    shutdown::setup_shutdown_handler(server.handle());
    server.serve(app).await
}
