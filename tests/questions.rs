use convo::conversation::{parse_question_payload, split_questions, QUESTION_DELIMITER};
use convo::ConvoError;

#[test]
fn parses_and_splits_a_structured_payload() {
    let payload =
        r#"{"questions":"What is noir?%%%Who directed Psycho?%%%Pick one actress.","n":3,"m":10}"#;

    let questions = parse_question_payload(payload).unwrap();
    assert_eq!(
        questions,
        vec![
            "What is noir?".to_string(),
            "Who directed Psycho?".to_string(),
            "Pick one actress.".to_string(),
        ]
    );
    assert!(questions.iter().all(|q| !q.ends_with('%')));
}

#[test]
fn auxiliary_count_fields_are_optional() {
    let payload = r#"{"questions":"Only one question"}"#;
    let questions = parse_question_payload(payload).unwrap();
    assert_eq!(questions, vec!["Only one question".to_string()]);
}

#[test]
fn malformed_json_fails_with_schema_parse() {
    let err = parse_question_payload("not json at all").unwrap_err();
    assert!(matches!(err, ConvoError::SchemaParse(_)));
}

#[test]
fn missing_questions_field_fails_with_schema_parse() {
    let err = parse_question_payload(r#"{"n":3,"m":10}"#).unwrap_err();
    assert!(matches!(err, ConvoError::SchemaParse(_)));
}

#[test]
fn non_string_questions_field_fails_with_schema_parse() {
    let err = parse_question_payload(r#"{"questions":["a","b"]}"#).unwrap_err();
    assert!(matches!(err, ConvoError::SchemaParse(_)));
}

#[test]
fn fewer_delimiters_than_requested_still_split() {
    // The parser enforces no count; whatever pieces exist come back.
    let questions = split_questions("Q1%%%Q2");
    assert_eq!(questions, vec!["Q1".to_string(), "Q2".to_string()]);
}

#[test]
fn trailing_delimiter_yields_a_trailing_empty_piece() {
    let questions = split_questions("A%%%B%%%");
    assert_eq!(
        questions,
        vec!["A".to_string(), "B".to_string(), String::new()]
    );
}

#[test]
fn pieces_are_trimmed() {
    let questions = split_questions("  What is noir?  %%%   Who directed Psycho? ");
    assert_eq!(
        questions,
        vec![
            "What is noir?".to_string(),
            "Who directed Psycho?".to_string(),
        ]
    );
}

#[test]
fn split_order_is_preserved_and_nothing_is_deduplicated() {
    let questions = split_questions("same%%%same%%%same");
    assert_eq!(questions, vec!["same"; 3]);
}

#[test]
fn delimiter_is_exactly_three_percent_signs() {
    assert_eq!(QUESTION_DELIMITER, "%%%");
    // Fewer than three percent signs do not split.
    let questions = split_questions("50% off%%half price");
    assert_eq!(questions, vec!["50% off%%half price".to_string()]);
}
