//! The response layout shared by the prompt builder and the response parser.
//!
//! The prompt asks the model to answer in exactly this labeled layout and the
//! parser recognizes the same labels, so both sides read these constants.

/// Starts the rewritten question (value on the same line).
pub const QUESTION_MARKER: &str = "CORRECTED_QUESTION:";

/// Starts the numbered option list (values on the following lines).
pub const OPTIONS_MARKER: &str = "CORRECTED_OPTIONS:";

/// Starts the model's designation of the correct option.
pub const ANSWER_MARKER: &str = "CORRECT_ANSWER:";

/// Starts the explanation, which may wrap across lines.
pub const EXPLANATION_MARKER: &str = "EXPLANATION:";

/// Starts the citations, which may wrap across lines.
pub const CITATIONS_MARKER: &str = "CITATIONS:";

/// Render the layout block embedded in every prompt.
pub fn response_layout() -> String {
    format!(
        "{QUESTION_MARKER} [Your modified question]\n\
         {OPTIONS_MARKER}\n\
         1. [Modified option 1]\n\
         2. [Modified option 2]\n\
         3. [Modified option 3]\n\
         4. [Modified option 4]\n\
         {ANSWER_MARKER} [Number of correct option]\n\
         {EXPLANATION_MARKER} [Detailed explanation]\n\
         {CITATIONS_MARKER} [Relevant sources]"
    )
}

/// The option number (1-4) a line starts with, if it is written as `N.`.
pub fn option_numeral(line: &str) -> Option<usize> {
    let mut chars = line.chars();
    let digit = chars.next()?.to_digit(10)? as usize;
    if (1..=4).contains(&digit) && chars.next() == Some('.') {
        Some(digit)
    } else {
        None
    }
}

/// Remove a leading `N.` numeral and the whitespace after it.
pub fn strip_numeral(option: &str) -> &str {
    let trimmed = option.trim();
    match option_numeral(trimmed) {
        Some(_) => trimmed[2..].trim_start(),
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_lines_start_with_markers() {
        let layout = response_layout();
        let lines: Vec<&str> = layout.lines().collect();

        assert_eq!(lines.len(), 9);
        assert!(lines[0].starts_with(QUESTION_MARKER));
        assert_eq!(lines[1], OPTIONS_MARKER);
        assert_eq!(lines[2], "1. [Modified option 1]");
        assert_eq!(lines[5], "4. [Modified option 4]");
        assert!(lines[6].starts_with(ANSWER_MARKER));
        assert!(lines[7].starts_with(EXPLANATION_MARKER));
        assert!(lines[8].starts_with(CITATIONS_MARKER));
    }

    #[test]
    fn test_option_numeral() {
        assert_eq!(option_numeral("1. Garhwal"), Some(1));
        assert_eq!(option_numeral("4.Assam"), Some(4));
        assert_eq!(option_numeral("5. Goa"), None);
        assert_eq!(option_numeral("1) Garhwal"), None);
        assert_eq!(option_numeral("Garhwal"), None);
        assert_eq!(option_numeral(""), None);
    }

    #[test]
    fn test_strip_numeral() {
        assert_eq!(strip_numeral("1. Garhwal"), "Garhwal");
        assert_eq!(strip_numeral("  3.   Kerala "), "Kerala");
        assert_eq!(strip_numeral("2. St. Thomas Mount"), "St. Thomas Mount");
        assert_eq!(strip_numeral("Punjab"), "Punjab");
    }
}
