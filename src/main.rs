//! health-service: a liveness endpoint.
//!
//! This is the application entry point. It loads configuration, initializes
//! tracing, builds the router and serves it until a shutdown signal arrives.

use std::process::ExitCode;

use clap::Parser;

use health_service::config::{AppConfig, Overrides, DEFAULT_CONFIG_PATH, PORT_ENV_VAR};
use health_service::{create_router, http, logging, AppState, StartupError};

/// health-service: answers GET /health with a JSON liveness payload
#[derive(Parser, Debug)]
#[command(name = "health-service", version, about)]
struct Args {
    /// Path to configuration file (optional when left at the default)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "health_service=debug")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Listen address, overrides http.host
    #[arg(long)]
    host: Option<String>,

    /// Listen port, overrides PORT and http.port
    #[arg(short, long)]
    port: Option<u16>,

    /// Name reported in the health payload, overrides service.name
    #[arg(long)]
    service_name: Option<String>,
}

fn load_config(args: &Args) -> Result<AppConfig, StartupError> {
    let (path, explicit) = match &args.config {
        Some(path) => (path.as_str(), true),
        None => (DEFAULT_CONFIG_PATH, false),
    };

    let mut config = AppConfig::load_or_default(path, explicit)?;
    config.apply_overrides(Overrides {
        host: args.host.clone(),
        port: args.port,
        env_port: std::env::var(PORT_ENV_VAR).ok(),
        service_name: args.service_name.clone(),
    })?;
    Ok(config)
}

async fn run(config: AppConfig) -> Result<(), StartupError> {
    let state = AppState::new(config.clone());
    let app = create_router(state);

    http::start_server(app, &config).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Tracing needs the configured format, so config errors go to stderr directly
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("health-service: {e}");
            return ExitCode::FAILURE;
        }
    };

    let log_filter = logging::resolve_filter(args.log_level, std::env::var("RUST_LOG").ok());
    logging::init_tracing(&log_filter, config.logging.format);

    tracing::info!(
        service = %config.service.name,
        host = %config.http.host,
        port = config.http.port,
        "Loaded configuration"
    );

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            eprintln!("health-service: {e}");
            ExitCode::FAILURE
        }
    }
}
