use std::sync::OnceLock;

use regex::Regex;
use serde_json::{json, Value};

use crate::error::{ConvoError, Result};

/// Three-character marker separating generated questions.
pub const QUESTION_DELIMITER: &str = "%%%";

static DELIMITER_RE: OnceLock<Regex> = OnceLock::new();

fn delimiter_re() -> &'static Regex {
    DELIMITER_RE.get_or_init(|| Regex::new(r"%{3}").expect("delimiter pattern is valid"))
}

/// Schema declared on the stateless generation request: the questions come
/// back as one delimited string, with the requested count and word limit
/// echoed as auxiliary numeric fields that nothing reads downstream.
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "n": {
                "type": "number",
                "description": "The number of questions generated"
            },
            "m": {
                "type": "number",
                "description": "The maximum word count allowed for each question"
            },
            "questions": {
                "type": "string",
                "description": "A string containing questions separated by '%%%' with no numbering"
            }
        },
        "required": ["questions"]
    })
}

/// Instruction sent on the stateless generation path, where the schema does
/// the formatting work.
pub fn schema_instruction(count: u32, max_words: u32) -> String {
    format!(
        "Please provide {} sample questions. Ensure the maximum length of each question is {} words long.",
        count, max_words
    )
}

/// Instruction sent on the assistant path, where no response-format schema is
/// available and the delimiter has to be requested in prose.
pub fn delimited_instruction(count: u32, max_words: u32) -> String {
    format!(
        "Please provide {} sample questions with '{}' as the delimiter between questions \
         and omit any numbering of questions. Provide nothing else but your sample questions. \
         Ensure the maximum length of each question is {} words long.",
        count, QUESTION_DELIMITER, max_words
    )
}

/// Parse a structured-output payload and split its `questions` field.
///
/// Malformed JSON and a missing or non-string `questions` field both fail
/// with `SchemaParse`; neither is ever defaulted to an empty list.
pub fn parse_question_payload(payload: &str) -> Result<Vec<String>> {
    let root: Value = serde_json::from_str(payload)
        .map_err(|e| ConvoError::SchemaParse(format!("malformed JSON: {}", e)))?;

    if !jsonschema::is_valid(&response_schema(), &root) {
        return Err(ConvoError::SchemaParse(
            "payload does not match the sample_questions schema".to_string(),
        ));
    }

    let questions = root
        .get("questions")
        .and_then(Value::as_str)
        .ok_or_else(|| ConvoError::SchemaParse("missing 'questions' string field".to_string()))?;

    Ok(split_questions(questions))
}

/// Split on the three-percent marker and trim each piece.
///
/// Split order is generation order; nothing is reordered, deduplicated or
/// dropped. Empty pieces are preserved: a trailing delimiter yields a
/// trailing empty string, and a count mismatch is the caller's concern.
pub fn split_questions(raw: &str) -> Vec<String> {
    delimiter_re()
        .split(raw)
        .map(|piece| piece.trim().to_string())
        .collect()
}
