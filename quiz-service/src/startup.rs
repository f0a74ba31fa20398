//! Application startup and lifecycle management.
//!
//! Builds the HTTP host around the quiz handler: routing, the instance cap,
//! panic recovery, request ids, tracing and metrics.

use crate::config::{ProviderKind, QuizConfig};
use crate::handlers::health::{health_check, metrics_endpoint, readiness_check};
use crate::handlers::quiz::{generate_quiz, handle_panic};
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::mock::{MockReply, MockTextProvider};
use crate::services::providers::TextProvider;
use crate::services::QuizGenerator;
use axum::{
    middleware::from_fn,
    routing::{any, get},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    tracing::{request_id_middleware, request_id_of},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: QuizConfig,
    pub generator: QuizGenerator,
}

impl AppState {
    pub fn new(config: QuizConfig, provider: Arc<dyn TextProvider>) -> Self {
        Self {
            config,
            generator: QuizGenerator::new(provider),
        }
    }
}

/// Create the generation provider selected by configuration.
pub fn build_provider(config: &QuizConfig) -> Result<Arc<dyn TextProvider>, AppError> {
    let provider: Arc<dyn TextProvider> = match config.model.provider {
        ProviderKind::Gemini => {
            let gemini_config = GeminiConfig {
                api_key: config.google.api_key.clone(),
                model: config.model.quiz_model.clone(),
                api_base: config.google.api_base.clone(),
                timeout: Duration::from_secs(config.model.timeout_secs),
            };
            Arc::new(
                GeminiTextProvider::new(gemini_config)
                    .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?,
            )
        }
        ProviderKind::Mock => {
            tracing::warn!("Mock provider selected, quizzes are placeholders");
            Arc::new(MockTextProvider::new(MockReply::Quiz))
        }
    };

    tracing::info!(
        provider = provider.name(),
        model = %provider.model(),
        "Initialized text provider"
    );

    Ok(provider)
}

/// Build the router for the given state.
pub fn build_router(state: AppState) -> Router {
    let quiz_routes = Router::new()
        .route("/", any(generate_quiz))
        .route("/quiz", any(generate_quiz))
        .fallback(generate_quiz)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(GlobalConcurrencyLimitLayer::new(
            state.config.host.max_instances,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_endpoint))
        .merge(quiz_routes)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    request_id = %request_id_of(request),
                    method = %request.method(),
                    uri = %request.uri().path(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    http_port: u16,
    http_listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: QuizConfig) -> Result<Self, AppError> {
        let provider = build_provider(&config)?;
        Self::build_with_provider(config, provider).await
    }

    /// Build the application around an already constructed provider.
    pub async fn build_with_provider(
        config: QuizConfig,
        provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        // Port 0 = random port for testing
        let http_addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let http_listener = TcpListener::bind(http_addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", http_addr, e);
            AppError::from(e)
        })?;
        let http_port = http_listener.local_addr()?.port();

        tracing::info!(
            max_instances = config.host.max_instances,
            "Quiz service: HTTP on port {}",
            http_port
        );

        let router = build_router(AppState::new(config, provider));

        Ok(Self {
            http_port,
            http_listener,
            router,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.http_listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}
