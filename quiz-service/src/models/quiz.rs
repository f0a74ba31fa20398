//! Request and response shapes for quiz generation.

use crate::error::QuizError;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Number of questions a quiz may contain.
///
/// Only five and ten are offered; every other input resolves to five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionCount {
    #[default]
    Five,
    Ten,
}

impl QuestionCount {
    /// Resolve the raw `no_of_questions` parameter. Never fails.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.and_then(|v| v.trim().parse::<i64>().ok()) {
            Some(10) => QuestionCount::Ten,
            _ => QuestionCount::Five,
        }
    }

    pub fn get(self) -> usize {
        match self {
            QuestionCount::Five => 5,
            QuestionCount::Ten => 10,
        }
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Query parameters as received, before validation.
#[derive(Debug, Default, Validate)]
pub struct QuizQuery {
    #[validate(required, length(min = 1))]
    pub topic: Option<String>,
    pub no_of_questions: Option<String>,
}

impl QuizQuery {
    /// Parse a raw query string. The first occurrence of a key wins and
    /// unknown keys are ignored.
    pub fn parse(raw: Option<&str>) -> Self {
        let pairs: Vec<(String, String)> = raw
            .and_then(|q| serde_urlencoded::from_str(q).ok())
            .unwrap_or_default();

        let mut query = QuizQuery::default();
        for (key, value) in pairs {
            match key.as_str() {
                "topic" if query.topic.is_none() => query.topic = Some(value),
                "no_of_questions" if query.no_of_questions.is_none() => {
                    query.no_of_questions = Some(value)
                }
                _ => {}
            }
        }
        query
    }

    /// Validate the topic and normalize the question count.
    pub fn into_request(self) -> Result<QuizRequest, QuizError> {
        self.validate().map_err(|_| QuizError::MissingTopic)?;

        let question_count = QuestionCount::from_param(self.no_of_questions.as_deref());
        let topic = self.topic.ok_or(QuizError::MissingTopic)?;

        Ok(QuizRequest {
            topic,
            question_count,
        })
    }
}

/// A validated quiz request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    pub topic: String,
    pub question_count: QuestionCount,
}

/// One multiple-choice question in the shape the model is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub choices: Vec<String>,
    pub correct_answer: String,
}

/// Error body: `{"error": ..}` or `{"internal_error": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPayload {
    Error(String),
    InternalError(String),
}
