//! Prompt sent to the generation provider.

use crate::models::QuizRequest;

const COUNT_PLACEHOLDER: &str = "{no_of_questions}";
const TOPIC_PLACEHOLDER: &str = "{topic}";

/// Quiz instructions with exactly two substitution points.
pub const QUIZ_PROMPT: &str = r#"Generate {no_of_questions} multiple choice questions about {topic}.
Return the result strictly as a JSON array of objects.
Each object must use the following structure:
{
  "question": "string",
  "choices": ["string", "string", "string", "string"],
  "correct_answer": "string"
}
The "choices" array must contain exactly 4 possible answers.
The "correct_answer" must exactly match one of the entries in "choices".
Do NOT include explanations, prose, or anything outside the JSON array.
Do NOT include letter demarcation (such as "A.", "B)", "C:") in the choices.
Do NOT include letter demarcation in the correct_answer.
Return ONLY valid JSON."#;

/// Render the prompt for a validated request.
///
/// The count is substituted before the topic so that placeholder text inside
/// a topic is never expanded.
pub fn render_prompt(request: &QuizRequest) -> String {
    QUIZ_PROMPT
        .replacen(COUNT_PLACEHOLDER, &request.question_count.to_string(), 1)
        .replacen(TOPIC_PLACEHOLDER, &request.topic, 1)
}
