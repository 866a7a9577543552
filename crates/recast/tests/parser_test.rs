//! Integration tests for the response layout: prompt and parser together.

use recast::contract::{ANSWER_MARKER, CITATIONS_MARKER, OPTIONS_MARKER, QUESTION_MARKER};
use recast::{Candidate, EditBuffer, PromptBuilder, Row, parse_response};

fn garhwal_reply() -> &'static str {
    "CORRECTED_QUESTION: Which region...?\n\
     CORRECTED_OPTIONS:\n\
     1. Garhwal\n\
     2. Punjab\n\
     3. Kerala\n\
     4. Assam\n\
     CORRECT_ANSWER: 1\n\
     EXPLANATION: Because X.\n\
     CITATIONS: Wikipedia."
}

// =============================================================================
// Recovery Tests
// =============================================================================

#[test]
fn test_garhwal_reply_recovered_exactly() {
    let candidate = parse_response(garhwal_reply());

    assert_eq!(candidate.question, "Which region...?");
    assert_eq!(
        candidate.options,
        vec!["1. Garhwal", "2. Punjab", "3. Kerala", "4. Assam"]
    );
    assert_eq!(candidate.answer_selector, "1");
    assert_eq!(candidate.explanation, "Because X.");
    assert_eq!(candidate.citations, "Wikipedia.");
    assert_eq!(candidate.resolve_answer(), "Garhwal");
}

#[test]
fn test_reply_without_options_marker() {
    let raw = garhwal_reply().replace("CORRECTED_OPTIONS:\n", "");
    let candidate = parse_response(&raw);

    assert!(candidate.options.is_empty());
    assert_eq!(candidate.question, "Which region...?");
    assert_eq!(candidate.answer_selector, "1");
    assert_eq!(candidate.explanation, "Because X.");
    assert_eq!(candidate.citations, "Wikipedia.");

    // No options: the selector cannot resolve and the editor starts blank.
    let buffer = EditBuffer::from_candidate(&candidate);
    assert_eq!(buffer.answer, "");
    assert!(buffer.options.iter().all(String::is_empty));
}

#[test]
fn test_reply_missing_every_marker() {
    let candidate = parse_response("I'm sorry, I can't help with that.");
    assert!(candidate.is_empty());
    assert_eq!(candidate, Candidate::default());
}

#[test]
fn test_reply_wrapped_in_chatter() {
    let raw = format!(
        "Here is an improved version of the question:\n\n{}\n\nLet me know if you need more.",
        garhwal_reply()
    );
    let candidate = parse_response(&raw);

    // Trailing chatter lands in the citations section.
    assert_eq!(candidate.citations, "Wikipedia. Let me know if you need more.");
    assert_eq!(candidate.options.len(), 4);
}

#[test]
fn test_parsing_is_idempotent() {
    let first = parse_response(garhwal_reply());
    let second = parse_response(garhwal_reply());
    assert_eq!(first, second);
}

// =============================================================================
// Prompt Contract Tests
// =============================================================================

#[test]
fn test_prompt_layout_parses_as_placeholders() {
    let row = Row::new(
        "Uttarakhand",
        "Language",
        "Which language is spoken here?",
        ["Garhwali", "Tamil", "Marathi", "Odia"],
    );
    let prompt = PromptBuilder::new().build(&row);

    for marker in [QUESTION_MARKER, OPTIONS_MARKER, ANSWER_MARKER, CITATIONS_MARKER] {
        assert_eq!(prompt.matches(marker).count(), 1, "{marker} appears once");
    }

    // The layout block at the end of the prompt is itself parseable.
    let echo = parse_response(&prompt);
    assert_eq!(echo.question, "[Your modified question]");
    assert_eq!(echo.options.len(), 4);
    assert_eq!(echo.answer_selector, "[Number of correct option]");
}
