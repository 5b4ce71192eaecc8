//! Integration tests for `PortalClient` against a mock portal.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use onboard_cli::api::{DeploymentRequest, DeploymentResult, PortalApi, PortalClient};
use onboard_cli::config::PortalConfig;

fn client_for(server: &MockServer) -> PortalClient {
    let config = PortalConfig {
        base_url: server.uri(),
        request_timeout: Duration::from_secs(5),
    };
    PortalClient::new(&config).expect("client should build")
}

fn sample_request() -> DeploymentRequest {
    DeploymentRequest {
        app_name: "my-app".into(),
        description: "desc".into(),
        team_email: "a@b.com".into(),
        framework: "express".into(),
        port: 3000,
        replicas: 3,
        memory_request: "256Mi".into(),
        memory_limit: "512Mi".into(),
        cpu_request: "100m".into(),
        cpu_limit: "500m".into(),
    }
}

#[tokio::test]
async fn fetches_csrf_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/csrf-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"csrf_token": "tok-123"})))
        .expect(1)
        .mount(&server)
        .await;

    let token = client_for(&server).fetch_csrf_token().await.unwrap();
    assert_eq!(token, "tok-123");
}

#[tokio::test]
async fn csrf_failure_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/csrf-token"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(client_for(&server).fetch_csrf_token().await.is_err());
}

#[tokio::test]
async fn fetches_ordered_templates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/templates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "nodejs",
                "name": "Node.js Application",
                "description": "JavaScript runtime for server-side applications",
                "icon": "fab fa-node-js",
                "color": "green",
                "default_port": 3000,
                "languages": ["JavaScript", "TypeScript"],
                "frameworks": ["Express", "Koa", "NestJS", "React (SSR)"]
            },
            {
                "id": "python",
                "name": "Python Application",
                "description": "Python-based backend service or API",
                "icon": "fab fa-python",
                "color": "blue",
                "default_port": 8000,
                "languages": ["Python"],
                "frameworks": ["FastAPI", "Flask", "Django"]
            }
        ])))
        .mount(&server)
        .await;

    let templates = client_for(&server).fetch_templates().await.unwrap();
    assert_eq!(templates.len(), 2);
    assert_eq!(templates[0].id, "nodejs");
    assert_eq!(templates[0].default_port, 3000);
    assert_eq!(templates[1].frameworks, vec!["FastAPI", "Flask", "Django"]);
}

#[tokio::test]
async fn onboard_sends_csrf_header_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/onboard"))
        .and(header("X-CSRF-Token", "tok-123"))
        .and(body_json(json!({
            "app_name": "my-app",
            "description": "desc",
            "team_email": "a@b.com",
            "framework": "express",
            "port": 3000,
            "replicas": 3,
            "memory_request": "256Mi",
            "memory_limit": "512Mi",
            "cpu_request": "100m",
            "cpu_limit": "500m"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "project_url": "https://git.example.com/my-app",
            "dev_url": "https://my-app-dev.example.com",
            "prod_url": "https://my-app.example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .onboard(&sample_request(), "tok-123")
        .await
        .unwrap();

    let result = DeploymentResult::from_response(response);
    assert_eq!(
        result,
        DeploymentResult::Success {
            project_url: "https://git.example.com/my-app".into(),
            dev_url: "https://my-app-dev.example.com".into(),
            prod_url: "https://my-app.example.com".into(),
        }
    );
}

#[tokio::test]
async fn onboard_rejection_body_is_decoded_despite_http_500() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/onboard"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"status": "error", "message": "quota exceeded"})),
        )
        .mount(&server)
        .await;

    let response = client_for(&server)
        .onboard(&sample_request(), "tok-123")
        .await
        .unwrap();

    assert_eq!(response.status, "error");
    assert_eq!(response.message.as_deref(), Some("quota exceeded"));
}

#[tokio::test]
async fn onboard_transport_failure_is_an_error() {
    // Point at a server that is gone.
    let server = MockServer::start().await;
    let config = PortalConfig {
        base_url: server.uri(),
        request_timeout: Duration::from_secs(1),
    };
    drop(server);

    let client = PortalClient::new(&config).unwrap();
    assert!(client.onboard(&sample_request(), "tok-123").await.is_err());
}

#[tokio::test]
async fn status_lookup_hits_per_app_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/my-app"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "app_name": "my-app",
            "environments": {
                "dev": {
                    "status": "available",
                    "last_deployment": "2024-03-02T09:30:00Z",
                    "url": "https://my-app-dev.example.com"
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).app_status("my-app").await.unwrap();
    assert_eq!(response.status, "success");
    assert_eq!(response.app_name.as_deref(), Some("my-app"));
    assert!(response.environments["dev"].is_available());
}

#[tokio::test]
async fn status_not_found_body_is_decoded_despite_http_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/nope"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"status": "error", "message": "Application nope not found"})),
        )
        .mount(&server)
        .await;

    let response = client_for(&server).app_status("nope").await.unwrap();
    assert_eq!(response.status, "error");
    assert_eq!(
        response.message.as_deref(),
        Some("Application nope not found")
    );
}
