//! Line-oriented parser for model completions.
//!
//! The completion is scanned line by line with a cursor naming the section
//! currently being filled. Marker lines move the cursor; every other line is
//! interpreted according to the cursor:
//!
//! | cursor        | non-blank line                                  |
//! |---------------|-------------------------------------------------|
//! | none          | ignored                                         |
//! | question      | ignored (value is the marker line's remainder)  |
//! | options       | kept if it starts with `1.`-`4.`, else ignored  |
//! | answer        | ignored (value is the marker line's remainder)  |
//! | explanation   | appended, joined with a single space            |
//! | citations     | appended, joined with a single space            |
//!
//! Parsing is total: any input produces a [`Candidate`], with empty fields for
//! sections that never appeared.

use tracing::debug;

use crate::contract::{
    ANSWER_MARKER, CITATIONS_MARKER, EXPLANATION_MARKER, OPTIONS_MARKER, QUESTION_MARKER,
    option_numeral,
};
use crate::dataset::OPTION_COUNT;

use super::candidate::Candidate;

/// Sections of the response layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Question,
    Options,
    Answer,
    Explanation,
    Citations,
}

impl Section {
    const ALL: [Section; 5] = [
        Section::Question,
        Section::Options,
        Section::Answer,
        Section::Explanation,
        Section::Citations,
    ];

    fn marker(self) -> &'static str {
        match self {
            Section::Question => QUESTION_MARKER,
            Section::Options => OPTIONS_MARKER,
            Section::Answer => ANSWER_MARKER,
            Section::Explanation => EXPLANATION_MARKER,
            Section::Citations => CITATIONS_MARKER,
        }
    }

    /// Match a marker at the start of `line`, returning the section and the
    /// remainder of the line after the marker.
    fn detect(line: &str) -> Option<(Section, &str)> {
        let line = line.trim_start();
        Section::ALL
            .iter()
            .find_map(|&s| line.strip_prefix(s.marker()).map(|rest| (s, rest)))
    }
}

/// Parser state: the cursor and the fields collected so far.
#[derive(Debug, Default)]
struct ParseState {
    cursor: Option<Section>,
    candidate: Candidate,
}

impl ParseState {
    fn feed(&mut self, line: &str) {
        if let Some((section, rest)) = Section::detect(line) {
            self.enter(section, rest.trim());
            return;
        }

        let text = line.trim();
        if text.is_empty() {
            return;
        }

        match self.cursor {
            Some(Section::Options) => {
                if option_numeral(text).is_some() && self.candidate.options.len() < OPTION_COUNT {
                    self.candidate.options.push(text.to_string());
                }
            }
            Some(Section::Explanation) => append_line(&mut self.candidate.explanation, text),
            Some(Section::Citations) => append_line(&mut self.candidate.citations, text),
            Some(Section::Question) | Some(Section::Answer) | None => {}
        }
    }

    fn enter(&mut self, section: Section, rest: &str) {
        self.cursor = Some(section);
        let value = rest.to_string();
        match section {
            Section::Question => self.candidate.question = value,
            Section::Answer => self.candidate.answer_selector = value,
            Section::Explanation => self.candidate.explanation = value,
            Section::Citations => self.candidate.citations = value,
            // Options are collected from the lines that follow.
            Section::Options => {}
        }
    }
}

fn append_line(value: &mut String, line: &str) {
    if !value.is_empty() {
        value.push(' ');
    }
    value.push_str(line);
}

/// Parse one raw completion into a [`Candidate`].
pub fn parse_response(raw: &str) -> Candidate {
    let mut state = ParseState::default();
    for line in raw.lines() {
        state.feed(line);
    }

    debug!(
        options = state.candidate.options.len(),
        has_question = !state.candidate.question.is_empty(),
        has_answer = !state.candidate.answer_selector.is_empty(),
        "parsed completion"
    );
    state.candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "CORRECTED_QUESTION: Which region...?\nCORRECTED_OPTIONS:\n1. Garhwal\n2. Punjab\n3. Kerala\n4. Assam\nCORRECT_ANSWER: 1\nEXPLANATION: Because X.\nCITATIONS: Wikipedia.";

    #[test]
    fn test_well_formed_response() {
        let c = parse_response(WELL_FORMED);

        assert_eq!(c.question, "Which region...?");
        assert_eq!(c.options, vec!["1. Garhwal", "2. Punjab", "3. Kerala", "4. Assam"]);
        assert_eq!(c.answer_selector, "1");
        assert_eq!(c.explanation, "Because X.");
        assert_eq!(c.citations, "Wikipedia.");
    }

    #[test]
    fn test_missing_options_marker() {
        let raw = "CORRECTED_QUESTION: Q?\n1. Garhwal\n2. Punjab\nCORRECT_ANSWER: 2\nEXPLANATION: E.\nCITATIONS: C.";
        let c = parse_response(raw);

        assert!(c.options.is_empty());
        assert_eq!(c.question, "Q?");
        assert_eq!(c.answer_selector, "2");
        assert_eq!(c.explanation, "E.");
        assert_eq!(c.citations, "C.");
    }

    #[test]
    fn test_multiline_explanation_and_citations() {
        let raw = "EXPLANATION: First line.\n   second line  \n\nthird line.\nCITATIONS:\nhttps://en.wikipedia.org/wiki/Garhwal\n  Census of India 2011";
        let c = parse_response(raw);

        assert_eq!(c.explanation, "First line. second line third line.");
        assert_eq!(
            c.citations,
            "https://en.wikipedia.org/wiki/Garhwal Census of India 2011"
        );
    }

    #[test]
    fn test_noise_is_ignored() {
        let raw = "Sure! Here is the rewrite.\n\nCORRECTED_QUESTION: Q?\nthis wraps but is dropped\nCORRECTED_OPTIONS:\n- bullet\n1. A\nA. letter\n2. B\n5. E\nCORRECT_ANSWER: 2\n(the second one)";
        let c = parse_response(raw);

        assert_eq!(c.question, "Q?");
        assert_eq!(c.options, vec!["1. A", "2. B"]);
        assert_eq!(c.answer_selector, "2");
    }

    #[test]
    fn test_options_capped_at_four() {
        let raw = "CORRECTED_OPTIONS:\n1. A\n2. B\n3. C\n4. D\n1. E";
        let c = parse_response(raw);
        assert_eq!(c.options.len(), 4);
        assert_eq!(c.options[3], "4. D");
    }

    #[test]
    fn test_crlf_and_indented_markers() {
        let raw = "  CORRECTED_QUESTION: Q?\r\nCORRECTED_OPTIONS:\r\n  1. A  \r\nCORRECT_ANSWER:  3 \r\n";
        let c = parse_response(raw);

        assert_eq!(c.question, "Q?");
        assert_eq!(c.options, vec!["1. A"]);
        assert_eq!(c.answer_selector, "3");
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        let c = parse_response("corrected_question: Q?\nExplanation: nope");
        assert!(c.is_empty());
    }

    #[test]
    fn test_repeated_marker_overwrites() {
        let c = parse_response("CORRECTED_QUESTION: first\nCORRECTED_QUESTION: second");
        assert_eq!(c.question, "second");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_response("").is_empty());
        assert!(parse_response("\n\n   \n").is_empty());
    }
}
