//! Mock provider implementation for tests and offline runs.

use super::{ProviderError, TextProvider};
use crate::models::QuizQuestion;
use async_trait::async_trait;
use std::sync::Mutex;

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// A well-formed quiz sized from the count in the prompt.
    Quiz,
    /// Fixed raw text, returned verbatim.
    Text(String),
    /// Fixed failure.
    Error(ProviderError),
}

/// Mock text provider that records every prompt it receives.
pub struct MockTextProvider {
    reply: MockReply,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(MockReply::Text(text.into()))
    }

    pub fn failing(error: ProviderError) -> Self {
        Self::new(MockReply::Error(error))
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }

    /// Build `count` placeholder questions about `topic`.
    pub fn sample_quiz(topic: &str, count: usize) -> Vec<QuizQuestion> {
        (1..=count)
            .map(|n| {
                let choices: Vec<String> = ["first", "second", "third", "fourth"]
                    .iter()
                    .map(|c| format!("{} answer {}", c, n))
                    .collect();
                QuizQuestion {
                    question: format!("Question {} about {}?", n, topic),
                    correct_answer: choices[0].clone(),
                    choices,
                }
            })
            .collect()
    }
}

/// Read the count and topic back out of a rendered prompt.
fn quiz_params(prompt: &str) -> (usize, String) {
    let first_line = prompt.lines().next().unwrap_or_default();
    let count = first_line
        .split_whitespace()
        .nth(1)
        .and_then(|n| n.parse().ok())
        .unwrap_or(5);
    let topic = first_line
        .split_once(" about ")
        .map(|(_, t)| t.strip_suffix('.').unwrap_or(t).to_string())
        .unwrap_or_default();
    (count, topic)
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.reply {
            MockReply::Quiz => {
                let (count, topic) = quiz_params(prompt);
                serde_json::to_string(&Self::sample_quiz(&topic, count))
                    .map_err(|e| ProviderError::ApiError(e.to_string()))
            }
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Error(err) => Err(err.clone()),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match &self.reply {
            MockReply::Error(err) => Err(err.clone()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuestionCount, QuizRequest};
    use crate::services::prompt::render_prompt;

    #[tokio::test]
    async fn quiz_reply_follows_prompt_count() {
        let provider = MockTextProvider::new(MockReply::Quiz);
        let prompt = render_prompt(&QuizRequest {
            topic: "volcanoes".to_string(),
            question_count: QuestionCount::Ten,
        });

        let text = provider.generate(&prompt).await.unwrap();
        let quiz: Vec<QuizQuestion> = serde_json::from_str(&text).unwrap();

        assert_eq!(quiz.len(), 10);
        assert!(quiz[0].question.contains("volcanoes"));
        assert!(quiz.iter().all(|q| q.choices.len() == 4));
        assert!(quiz.iter().all(|q| q.choices.contains(&q.correct_answer)));
    }

    #[tokio::test]
    async fn quiz_reply_keeps_dots_in_topic() {
        let provider = MockTextProvider::new(MockReply::Quiz);
        let prompt = render_prompt(&QuizRequest {
            topic: "the U.S.".to_string(),
            question_count: QuestionCount::Five,
        });

        let text = provider.generate(&prompt).await.unwrap();
        let quiz: Vec<QuizQuestion> = serde_json::from_str(&text).unwrap();

        assert_eq!(quiz[0].question, "Question 1 about the U.S.?");
    }

    #[tokio::test]
    async fn records_prompts() {
        let provider = MockTextProvider::text("[]");
        provider.generate("one").await.unwrap();
        provider.generate("two").await.unwrap();
        assert_eq!(provider.prompts(), vec!["one".to_string(), "two".to_string()]);
    }

    #[tokio::test]
    async fn failing_reply_fails_health_check() {
        let provider = MockTextProvider::failing(ProviderError::RateLimited);
        assert_eq!(provider.generate("p").await, Err(ProviderError::RateLimited));
        assert!(provider.health_check().await.is_err());
    }
}
