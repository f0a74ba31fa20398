use axum::{
    extract::{RawQuery, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;

use super::cors;
use crate::error::QuizError;
use crate::models::QuizQuery;
use crate::services::metrics;
use crate::startup::AppState;

/// Quiz endpoint. Answers preflights, otherwise generates a quiz from the
/// `topic` and `no_of_questions` query parameters.
#[tracing::instrument(skip(state, query))]
pub async fn generate_quiz(
    State(state): State<AppState>,
    method: Method,
    RawQuery(query): RawQuery,
) -> Response {
    if method == Method::OPTIONS {
        return cors::preflight_response();
    }

    let result = match QuizQuery::parse(query.as_deref()).into_request() {
        Ok(request) => state.generator.generate(&request).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(quiz) => {
            metrics::record_generation("success");
            let mut response = (StatusCode::OK, Json(quiz)).into_response();
            cors::allow_any_origin(response.headers_mut());
            response
        }
        Err(e) => {
            metrics::record_generation(e.kind());
            if e.status().is_server_error() {
                tracing::error!(error = %e, "Quiz generation failed");
            }
            e.into_response()
        }
    }
}

/// Turn a handler panic into the regular internal error response.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };

    tracing::error!(panic = %message, "Quiz handler panicked");
    metrics::record_generation("unexpected");
    QuizError::Unexpected(message).into_response()
}
