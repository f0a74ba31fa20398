//! The quiz generation operation: prompt, one provider call, cleanup, parse.

use super::cleaner::clean_model_output;
use super::metrics;
use super::prompt::render_prompt;
use super::providers::TextProvider;
use crate::error::QuizError;
use crate::models::QuizRequest;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct QuizGenerator {
    provider: Arc<dyn TextProvider>,
}

impl QuizGenerator {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn TextProvider> {
        &self.provider
    }

    /// Generate a quiz for a validated request.
    ///
    /// The parsed JSON is returned as-is; its shape is not checked against
    /// the requested count or the question layout.
    #[tracing::instrument(
        skip(self, request),
        fields(topic_len = request.topic.len(), count = request.question_count.get())
    )]
    pub async fn generate(&self, request: &QuizRequest) -> Result<Value, QuizError> {
        let prompt = render_prompt(request);

        let start = Instant::now();
        let result = self.provider.generate(&prompt).await;
        metrics::record_provider_latency(
            self.provider.name(),
            self.provider.model(),
            start.elapsed().as_secs_f64(),
        );

        let raw = result.map_err(|e| {
            tracing::error!(
                provider = self.provider.name(),
                error_type = e.kind(),
                error = %e,
                "Generation provider call failed"
            );
            e
        })?;

        let cleaned = clean_model_output(&raw);
        if cleaned.is_empty() {
            tracing::warn!(raw_len = raw.len(), "Model returned empty response");
            return Err(QuizError::EmptyResponse);
        }

        serde_json::from_str(&cleaned).map_err(|e| {
            tracing::warn!(error = %e, raw_len = raw.len(), "Model output is not valid JSON");
            QuizError::InvalidJson(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuestionCount, QuizQuestion};
    use crate::services::providers::mock::{MockReply, MockTextProvider};
    use crate::services::providers::ProviderError;

    fn request(count: QuestionCount) -> QuizRequest {
        QuizRequest {
            topic: "astronomy".to_string(),
            question_count: count,
        }
    }

    #[tokio::test]
    async fn returns_parsed_quiz() {
        let generator = QuizGenerator::new(Arc::new(MockTextProvider::new(MockReply::Quiz)));
        let quiz = generator.generate(&request(QuestionCount::Five)).await.unwrap();

        let questions: Vec<QuizQuestion> = serde_json::from_value(quiz).unwrap();
        assert_eq!(questions.len(), 5);
    }

    #[tokio::test]
    async fn sends_rendered_prompt_once() {
        let provider = Arc::new(MockTextProvider::text("[]"));
        let generator = QuizGenerator::new(provider.clone());
        let req = request(QuestionCount::Ten);

        generator.generate(&req).await.unwrap();

        assert_eq!(provider.prompts(), vec![render_prompt(&req)]);
    }

    #[tokio::test]
    async fn fenced_reply_is_cleaned() {
        let raw = "```json\n[{\"question\":\"Q\",\"choices\":[\"A\",\"B\",\"C\",\"D\"],\"correct_answer\":\"A\"}]\n```";
        let generator = QuizGenerator::new(Arc::new(MockTextProvider::text(raw)));

        let quiz = generator.generate(&request(QuestionCount::Five)).await.unwrap();
        assert_eq!(quiz[0]["correct_answer"], "A");
    }

    #[tokio::test]
    async fn empty_reply_is_an_error() {
        for raw in ["", "   \n", "```json\n```"] {
            let generator = QuizGenerator::new(Arc::new(MockTextProvider::text(raw)));
            let err = generator.generate(&request(QuestionCount::Five)).await.unwrap_err();
            assert!(matches!(err, QuizError::EmptyResponse), "{:?}", raw);
        }
    }

    #[tokio::test]
    async fn invalid_json_is_an_error() {
        let generator =
            QuizGenerator::new(Arc::new(MockTextProvider::text("Here is your quiz!")));
        let err = generator.generate(&request(QuestionCount::Five)).await.unwrap_err();
        assert!(matches!(err, QuizError::InvalidJson(_)));
    }

    #[tokio::test]
    async fn provider_failure_is_propagated() {
        let generator = QuizGenerator::new(Arc::new(MockTextProvider::failing(
            ProviderError::NetworkError("connection reset".to_string()),
        )));
        let err = generator.generate(&request(QuestionCount::Five)).await.unwrap_err();
        assert_eq!(err.to_string(), "Network error: connection reset");
    }

    #[tokio::test]
    async fn shape_is_not_validated() {
        let generator = QuizGenerator::new(Arc::new(MockTextProvider::text(r#"{"not":"a list"}"#)));
        let quiz = generator.generate(&request(QuestionCount::Ten)).await.unwrap();
        assert_eq!(quiz, serde_json::json!({ "not": "a list" }));
    }
}
