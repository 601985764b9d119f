//! HTTP server for the ask service

pub mod routes;
pub mod state;

use axum::{extract::State, http::StatusCode, routing::get, Router};
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::RagConfig;
use crate::error::{Error, Result};
use crate::retrieval::index_exists;
use state::AppState;

/// Ask HTTP Server
pub struct RagServer {
    config: RagConfig,
    state: AppState,
}

impl RagServer {
    /// Create a new server with the OpenAI-backed pipeline
    pub fn new(config: RagConfig) -> Result<Self> {
        let state = AppState::new(config.clone())?;
        Ok(Self { config, state })
    }

    /// Create a server around existing state
    pub fn with_state(state: AppState) -> Self {
        Self {
            config: state.config().clone(),
            state,
        }
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let mut router = Router::new()
            .route("/health", get(health_check))
            .route("/ready", get(readiness))
            .merge(routes::app_routes())
            .with_state(self.state.clone())
            // Middleware layers (order matters - applied bottom to top)
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new());

        if self.config.server.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            router = router.layer(cors);
        }

        router
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self
            .address()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid address: {}", e)))?;

        let router = self.build_router();

        tracing::info!("Starting ask server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Config(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| Error::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Readiness check endpoint, ready once the index directory exists
async fn readiness(State(state): State<AppState>) -> Result<StatusCode> {
    if index_exists(state.pipeline().index_config()).await? {
        Ok(StatusCode::OK)
    } else {
        Ok(StatusCode::SERVICE_UNAVAILABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use std::path::Path;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::config::IndexConfig;
    use crate::testing::{chunk_at, pipeline, write_index, FakeEmbedder, RecordingLlm};

    struct Harness {
        router: Router,
        embedder: Arc<FakeEmbedder>,
        llm: Arc<RecordingLlm>,
        _dir: tempfile::TempDir,
    }

    fn harness(build_index: impl FnOnce(&Path) -> IndexConfig) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let index = build_index(dir.path());
        let embedder = FakeEmbedder::new(vec![0.0, 0.0]);
        let llm = RecordingLlm::new("X is a thing.");
        let state = AppState::with_pipeline(
            RagConfig::default(),
            pipeline(index, embedder.clone(), llm.clone()),
        );

        Harness {
            router: RagServer::with_state(state).build_router(),
            embedder,
            llm,
            _dir: dir,
        }
    }

    fn doc_a_index(root: &Path) -> IndexConfig {
        write_index(
            root,
            2,
            vec![chunk_at(0.0, "Doc A", "http://example/doc-a", "X is a thing")],
        )
    }

    fn missing_index(root: &Path) -> IndexConfig {
        IndexConfig {
            path: root.join("vectorstore"),
            ..Default::default()
        }
    }

    fn unreadable_index(root: &Path) -> IndexConfig {
        let blocker = root.join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();
        IndexConfig {
            path: blocker.join("vectorstore"),
            ..Default::default()
        }
    }

    fn ask_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/ask")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_ask_returns_answer_and_sources() {
        let h = harness(doc_a_index);

        let (status, body) = send(h.router, ask_request(r#"{"question": "What is X?"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["sources"],
            json!([{"title": "Doc A", "url": "http://example/doc-a"}])
        );
        assert_eq!(body["answer"], "X is a thing.");
    }

    #[tokio::test]
    async fn test_missing_or_empty_question_is_rejected() {
        for payload in [r#"{}"#, r#"{"question": ""}"#, r#"{"question": null}"#, r#"{"question": "   "}"#] {
            let h = harness(doc_a_index);

            let (status, body) = send(h.router, ask_request(payload)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
            assert_eq!(body, json!({"error": "question missing"}));
            assert_eq!(h.embedder.calls(), 0);
            assert!(h.llm.prompts().is_empty());
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let h = harness(doc_a_index);

        let (status, body) = send(h.router, ask_request("{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
        assert_eq!(h.embedder.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_index_is_server_error() {
        let h = harness(missing_index);

        let (status, body) = send(h.router, ask_request(r#"{"question": "What is X?"}"#)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let error = body["error"].as_str().unwrap();
        assert!(error.contains("vectorstore"));
        assert!(body.get("answer").is_none());
    }

    #[tokio::test]
    async fn test_empty_index_answers_without_sources() {
        let h = harness(|root| write_index(root, 2, Vec::new()));

        let (status, body) = send(h.router, ask_request(r#"{"question": "What is X?"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sources"], json!([]));
        assert!(body["answer"].is_string());
    }

    #[tokio::test]
    async fn test_index_page() {
        let h = harness(doc_a_index);
        let response = h
            .router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("/ask"));
    }

    #[tokio::test]
    async fn test_health_and_readiness() {
        let ready = harness(doc_a_index);
        let response = ready
            .router
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = ready
            .router
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let not_ready = harness(missing_index);
        let response = not_ready
            .router
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_readiness_reports_io_failure() {
        let h = harness(unreadable_index);

        let (status, body) = send(
            h.router,
            Request::builder().uri("/ready").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("not-a-dir"));
    }
}
