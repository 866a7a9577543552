//! A parsed model rewrite and answer resolution.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::contract::strip_numeral;
use crate::dataset::OPTION_COUNT;

/// Selectors such as `2`, `2.`, `(2)`, `Option 2` or `2. Punjab`.
static INDEX_SELECTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:option\s*)?\(?\s*([0-9]+)\s*\)?[.):]?(?:\s|$)")
        .unwrap()
});

/// One parsed model response.
///
/// Options keep the model's order and their `N.` prefixes. The answer
/// selector is stored exactly as the model wrote it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub question: String,
    pub options: Vec<String>,
    pub answer_selector: String,
    pub explanation: String,
    pub citations: String,
}

impl Candidate {
    /// Parse a raw completion. Never fails.
    pub fn parse(raw: &str) -> Self {
        super::parser::parse_response(raw)
    }

    /// True when no field was recovered.
    pub fn is_empty(&self) -> bool {
        self.question.is_empty()
            && self.options.is_empty()
            && self.answer_selector.is_empty()
            && self.explanation.is_empty()
            && self.citations.is_empty()
    }

    /// The four option slots without numeral prefixes; missing slots are blank.
    pub fn option_texts(&self) -> [String; OPTION_COUNT] {
        std::array::from_fn(|i| {
            self.options
                .get(i)
                .map(|o| strip_numeral(o).to_string())
                .unwrap_or_default()
        })
    }

    /// Resolve the answer selector to option text.
    ///
    /// A selector naming an option's text wins; otherwise a 1-based index is
    /// looked up. Anything unresolvable yields an empty string.
    pub fn resolve_answer(&self) -> String {
        let selector = self.answer_selector.trim();
        if selector.is_empty() {
            return String::new();
        }

        let texts = self.option_texts();
        let available = &texts[..self.options.len().min(OPTION_COUNT)];

        if let Some(text) = available
            .iter()
            .find(|t| !t.is_empty() && t.eq_ignore_ascii_case(selector))
        {
            return text.clone();
        }

        INDEX_SELECTOR
            .captures(selector)
            .and_then(|caps| caps[1].parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| available.get(i))
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(options: &[&str], selector: &str) -> Candidate {
        Candidate {
            question: "Which region...?".to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            answer_selector: selector.to_string(),
            ..Default::default()
        }
    }

    const OPTIONS: [&str; 4] = ["1. Garhwal", "2. Punjab", "3. Kerala", "4. Assam"];

    #[test]
    fn test_resolve_numeric_selectors() {
        assert_eq!(candidate(&OPTIONS, "1").resolve_answer(), "Garhwal");
        assert_eq!(candidate(&OPTIONS, " 3. ").resolve_answer(), "Kerala");
        assert_eq!(candidate(&OPTIONS, "(4)").resolve_answer(), "Assam");
        assert_eq!(candidate(&OPTIONS, "Option 2").resolve_answer(), "Punjab");
        assert_eq!(candidate(&OPTIONS, "2. Punjab").resolve_answer(), "Punjab");
    }

    #[test]
    fn test_resolve_text_selector() {
        assert_eq!(candidate(&OPTIONS, "kerala").resolve_answer(), "Kerala");
    }

    #[test]
    fn test_unresolvable_selectors_are_empty() {
        assert_eq!(candidate(&OPTIONS, "").resolve_answer(), "");
        assert_eq!(candidate(&OPTIONS, "5").resolve_answer(), "");
        assert_eq!(candidate(&OPTIONS, "0").resolve_answer(), "");
        assert_eq!(candidate(&OPTIONS, "Goa").resolve_answer(), "");
        assert_eq!(candidate(&OPTIONS[..2], "3").resolve_answer(), "");
        assert_eq!(candidate(&[], "1").resolve_answer(), "");
    }

    #[test]
    fn test_option_texts_pad_short_lists() {
        let c = candidate(&OPTIONS[..2], "1");
        assert_eq!(c.option_texts(), ["Garhwal", "Punjab", "", ""].map(String::from));
    }

    #[test]
    fn test_is_empty() {
        assert!(Candidate::default().is_empty());
        assert!(!candidate(&[], "").is_empty());
    }
}
