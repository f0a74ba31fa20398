//! Quiz operation errors and their single translation to HTTP.

use crate::handlers::cors;
use crate::models::ErrorPayload;
use crate::services::providers::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

pub const MISSING_TOPIC_MESSAGE: &str = "No topic or no_of_questions parameters provided";

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("{}", MISSING_TOPIC_MESSAGE)]
    MissingTopic,

    #[error("Model returned empty response")]
    EmptyResponse,

    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("{0}")]
    Provider(#[from] ProviderError),

    #[error("{0}")]
    Unexpected(String),
}

impl QuizError {
    pub fn status(&self) -> StatusCode {
        match self {
            QuizError::MissingTopic => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            QuizError::MissingTopic => "missing_topic",
            QuizError::EmptyResponse => "empty_response",
            QuizError::InvalidJson(_) => "invalid_json",
            QuizError::Provider(_) => "provider_error",
            QuizError::Unexpected(_) => "unexpected",
        }
    }

    fn payload(&self) -> ErrorPayload {
        match self {
            QuizError::MissingTopic => ErrorPayload::Error(self.to_string()),
            _ => ErrorPayload::InternalError(self.to_string()),
        }
    }
}

impl IntoResponse for QuizError {
    fn into_response(self) -> Response {
        let mut response = (self.status(), Json(self.payload())).into_response();
        cors::allow_any_origin(response.headers_mut());
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn missing_topic_is_bad_request_with_error_key() {
        let err = QuizError::MissingTopic;
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.payload(), ErrorPayload::Error(MISSING_TOPIC_MESSAGE.to_string()));
    }

    #[test]
    fn generation_failures_are_internal_errors() {
        let err = QuizError::EmptyResponse;
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.payload(),
            ErrorPayload::InternalError("Model returned empty response".to_string())
        );

        let err = QuizError::Provider(ProviderError::RateLimited);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.payload(), ErrorPayload::InternalError("Rate limited".to_string()));
    }

    #[test]
    fn invalid_json_carries_parser_message() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let expected = parse_err.to_string();
        let err = QuizError::from(parse_err);
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn error_responses_carry_cors_and_json_headers() {
        for err in [QuizError::MissingTopic, QuizError::EmptyResponse] {
            let response = err.into_response();
            assert_eq!(
                response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
                "*"
            );
            assert_eq!(
                response.headers().get(header::CONTENT_TYPE).unwrap(),
                "application/json"
            );
        }
    }
}
