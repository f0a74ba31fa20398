use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use quiz_service::config::QuizConfig;
use quiz_service::services::providers::TextProvider;
use quiz_service::startup::{build_router, AppState};
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }
}

pub fn router_with(provider: Arc<dyn TextProvider>) -> Router {
    router_with_cap(provider, 10)
}

pub fn router_with_cap(provider: Arc<dyn TextProvider>, max_instances: usize) -> Router {
    let mut config = QuizConfig::for_mock(0);
    config.host.max_instances = max_instances;
    build_router(AppState::new(config, provider))
}

pub async fn send(router: Router, method: Method, uri: &str) -> TestResponse {
    let response = router
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("Router failed");

    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body")
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}
