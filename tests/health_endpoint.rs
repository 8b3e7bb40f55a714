//! End-to-end tests against a real listener on an ephemeral port.
//!
//! Run with: cargo test --test health_endpoint
use std::net::SocketAddr;
use std::time::Duration;

use axum_server::Handle;
use health_service::config::AppConfig;
use health_service::http::{HealthServer, ServerError};
use health_service::{create_router, AppState};
use tokio::task::JoinHandle;

struct RunningServer {
    addr: SocketAddr,
    handle: Handle,
    task: JoinHandle<Result<(), ServerError>>,
}

impl RunningServer {
    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

fn local_config(port: u16) -> AppConfig {
    let mut config = AppConfig::default();
    config.http.host = "127.0.0.1".to_string();
    config.http.port = port;
    config
}

fn start(config: AppConfig) -> RunningServer {
    let server = HealthServer::new(&config).bind().expect("bind ephemeral port");
    let addr = server.local_addr();
    let handle = server.handle();
    let app = create_router(AppState::new(config));
    let task = tokio::spawn(server.serve(app));
    RunningServer { addr, handle, task }
}

#[tokio::test]
async fn get_health_returns_default_payload() {
    let server = start(local_config(0));

    let response = reqwest::get(server.url("/health")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({"status": "ok", "service": "spring-boot"})
    );
}

#[tokio::test]
async fn configured_service_name_is_reported() {
    let mut config = local_config(0);
    config.service.name = "payments".to_string();
    let server = start(config);

    let body: serde_json::Value = reqwest::get(server.url("/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "payments");
}

#[tokio::test]
async fn post_health_does_not_return_payload() {
    let server = start(local_config(0));

    let response = reqwest::Client::new()
        .post(server.url("/health"))
        .send()
        .await
        .unwrap();
    assert_ne!(response.status(), reqwest::StatusCode::OK);

    let text = response.text().await.unwrap();
    assert!(!text.contains("spring-boot"));
}

#[tokio::test]
async fn other_paths_do_not_return_payload() {
    let server = start(local_config(0));
    let client = reqwest::Client::new();

    for path in ["/", "/health/", "/actuator/health"] {
        let response = client.get(server.url(path)).send().await.unwrap();
        assert_ne!(response.status(), reqwest::StatusCode::OK, "path {path}");
        let text = response.text().await.unwrap();
        assert!(!text.contains("spring-boot"), "path {path}");
    }
}

#[tokio::test]
async fn concurrent_requests_get_identical_bodies() {
    let server = start(local_config(0));
    let client = reqwest::Client::new();

    let requests = (0..16).map(|_| {
        let client = client.clone();
        let url = server.url("/health");
        tokio::spawn(async move { client.get(url).send().await?.bytes().await })
    });

    let mut bodies = Vec::new();
    for request in requests {
        bodies.push(request.await.unwrap().unwrap());
    }
    assert!(bodies.iter().all(|b| b == &bodies[0]));
    assert_eq!(&bodies[0][..], br#"{"status":"ok","service":"spring-boot"}"#);
}

#[tokio::test]
async fn second_instance_on_same_port_fails_to_bind() {
    let first = start(local_config(0));

    let err = HealthServer::new(&local_config(first.addr.port()))
        .bind()
        .unwrap_err();
    assert!(matches!(err, ServerError::Bind { .. }), "got {err:?}");

    // The first instance keeps serving
    let response = reqwest::get(first.url("/health")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
}

#[tokio::test]
async fn graceful_shutdown_stops_serving() {
    let mut server = start(local_config(0));
    reqwest::get(server.url("/health")).await.unwrap();

    server
        .handle
        .graceful_shutdown(Some(Duration::from_secs(1)));

    let result = tokio::time::timeout(Duration::from_secs(5), &mut server.task)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());

    assert!(reqwest::get(server.url("/health")).await.is_err());
}
