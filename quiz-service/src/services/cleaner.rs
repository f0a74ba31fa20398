//! Cleanup of raw model output before JSON parsing.

const FENCE: &str = "```";
const LANGUAGE_TAG: &str = "json";

/// Strip Markdown fencing from a model reply.
///
/// When the trimmed text opens with a fence, every backtick is removed along
/// with the first `json` in the text. A `json` or backtick inside the quiz
/// content itself is removed too; callers needing exact fidelity should
/// replace this function with a real fenced-block extractor.
pub fn clean_model_output(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.starts_with(FENCE) {
        return trimmed.to_string();
    }

    let unfenced: String = trimmed.chars().filter(|c| *c != '`').collect();
    unfenced.replacen(LANGUAGE_TAG, "", 1).trim().to_string()
}
