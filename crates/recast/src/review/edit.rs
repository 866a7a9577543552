//! The editable copy of a candidate.

use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;
use crate::dataset::OPTION_COUNT;

/// Working copy of a candidate while the reviewer edits it.
///
/// Options are held without numeral prefixes. `answer` holds option text, not
/// a number; it is checked against the options when the buffer is saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditBuffer {
    pub question: String,
    pub options: [String; OPTION_COUNT],
    pub answer: String,
    pub explanation: String,
    pub citations: String,
}

impl EditBuffer {
    /// Seed a buffer from a candidate, resolving its answer selector.
    pub fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            question: candidate.question.clone(),
            options: candidate.option_texts(),
            answer: candidate.resolve_answer(),
            explanation: candidate.explanation.clone(),
            citations: candidate.citations.clone(),
        }
    }

    /// Replace option `slot`. If the answer was that option's text it follows
    /// the new text. Returns false for a slot outside the four options.
    pub fn set_option(&mut self, slot: usize, text: impl Into<String>) -> bool {
        let Some(option) = self.options.get_mut(slot) else {
            return false;
        };
        let text = text.into();
        if !self.answer.is_empty() && self.answer == *option {
            self.answer = text.clone();
        }
        *option = text;
        true
    }

    /// Mark option `slot` as the answer. Returns false for an unknown slot.
    pub fn select_answer(&mut self, slot: usize) -> bool {
        match self.options.get(slot) {
            Some(option) => {
                self.answer = option.clone();
                true
            }
            None => false,
        }
    }

    /// Set free-form answer text. It must match an option when saved.
    pub fn set_answer(&mut self, text: impl Into<String>) {
        self.answer = text.into();
    }

    /// Slot whose text equals the answer.
    pub fn answer_slot(&self) -> Option<usize> {
        if self.answer.is_empty() {
            return None;
        }
        self.options.iter().position(|o| *o == self.answer)
    }

    /// Whether the answer is empty or names one of the options.
    pub fn is_consistent(&self) -> bool {
        self.answer.trim().is_empty() || self.answer_slot().is_some()
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            question: self.question.trim().to_string(),
            options: self.options.each_ref().map(|o| o.trim().to_string()),
            answer: self.answer.trim().to_string(),
            explanation: self.explanation.trim().to_string(),
            citations: self.citations.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_matches_padded_answer() {
        let buffer = EditBuffer {
            question: "  Which region? ".to_string(),
            options: [" Garhwal ", "Kumaon", "Jaunsar ", "Terai"].map(String::from),
            answer: "Garhwal  ".to_string(),
            explanation: String::new(),
            citations: " ".to_string(),
        };
        assert!(!buffer.is_consistent());

        let trimmed = buffer.trimmed();
        assert_eq!(trimmed.question, "Which region?");
        assert_eq!(trimmed.options[0], "Garhwal");
        assert_eq!(trimmed.options[2], "Jaunsar");
        assert_eq!(trimmed.answer_slot(), Some(0));
        assert!(trimmed.citations.is_empty());
    }

    fn buffer() -> EditBuffer {
        EditBuffer::from_candidate(&Candidate::parse(
            "CORRECTED_QUESTION: Which region...?\nCORRECTED_OPTIONS:\n1. Garhwal\n2. Punjab\n3. Kerala\n4. Assam\nCORRECT_ANSWER: 1\nEXPLANATION: Because X.\nCITATIONS: Wikipedia.",
        ))
    }

    #[test]
    fn test_from_candidate() {
        let b = buffer();
        assert_eq!(b.question, "Which region...?");
        assert_eq!(b.options, ["Garhwal", "Punjab", "Kerala", "Assam"].map(String::from));
        assert_eq!(b.answer, "Garhwal");
        assert_eq!(b.answer_slot(), Some(0));
    }

    #[test]
    fn test_answer_follows_renamed_option() {
        let mut b = buffer();
        assert!(b.set_option(0, "Garhwal division"));
        assert_eq!(b.answer, "Garhwal division");
        assert!(b.is_consistent());

        assert!(b.set_option(1, "Haryana"));
        assert_eq!(b.answer, "Garhwal division");
        assert!(!b.set_option(4, "Goa"));
    }

    #[test]
    fn test_select_and_free_answer() {
        let mut b = buffer();
        assert!(b.select_answer(2));
        assert_eq!(b.answer, "Kerala");
        assert!(!b.select_answer(7));

        b.set_answer("Goa");
        assert!(!b.is_consistent());
        b.set_answer("");
        assert!(b.is_consistent());
    }
}
