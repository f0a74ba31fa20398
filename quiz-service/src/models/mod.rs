pub mod quiz;

pub use quiz::{ErrorPayload, QuestionCount, QuizQuery, QuizQuestion, QuizRequest};
