//! A single quiz item and its column mapping.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Number of answer options every row carries.
pub const OPTION_COUNT: usize = 4;

pub const STATE_COLUMN: &str = "State";
pub const ATTRIBUTE_COLUMN: &str = "Attribute";
pub const QUESTION_COLUMN: &str = "Question";
pub const ANSWER_COLUMN: &str = "Answer";
pub const FULL_ANSWER_COLUMN: &str = "Full Answer";
pub const ANSWER_SOURCE_COLUMN: &str = "Answer Source";

/// Columns an input table must provide.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    STATE_COLUMN,
    ATTRIBUTE_COLUMN,
    QUESTION_COLUMN,
    "Option1",
    "Option2",
    "Option3",
    "Option4",
];

/// Columns written back by a commit, appended on export when the source lacked them.
pub const RESULT_COLUMNS: [&str; 3] = [ANSWER_COLUMN, FULL_ANSWER_COLUMN, ANSWER_SOURCE_COLUMN];

/// Which row field a table column maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    State,
    Attribute,
    Question,
    /// Zero-based option slot.
    Option(usize),
    Answer,
    FullAnswer,
    AnswerSource,
}

impl Field {
    /// Map a (trimmed) column header to a field. Unknown headers return `None`
    /// and are carried as extra columns.
    pub fn from_header(header: &str) -> Option<Self> {
        match header.trim() {
            STATE_COLUMN => Some(Field::State),
            ATTRIBUTE_COLUMN => Some(Field::Attribute),
            QUESTION_COLUMN => Some(Field::Question),
            "Option1" => Some(Field::Option(0)),
            "Option2" => Some(Field::Option(1)),
            "Option3" => Some(Field::Option(2)),
            "Option4" => Some(Field::Option(3)),
            ANSWER_COLUMN => Some(Field::Answer),
            FULL_ANSWER_COLUMN | "FullAnswer" => Some(Field::FullAnswer),
            ANSWER_SOURCE_COLUMN | "AnswerSource" => Some(Field::AnswerSource),
            _ => None,
        }
    }
}

/// One quiz item in the working dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Row {
    pub state: String,
    pub attribute: String,
    pub question: String,
    /// Option texts, without any numeral prefix.
    pub options: [String; OPTION_COUNT],
    /// Text of the correct option, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// Explanation of the answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_answer: Option<String>,
    /// Citation text backing the answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_source: Option<String>,
    /// Columns with no row field, in source order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, String>,
}

impl Row {
    /// Create a row from its required fields.
    pub fn new(
        state: impl Into<String>,
        attribute: impl Into<String>,
        question: impl Into<String>,
        options: [&str; OPTION_COUNT],
    ) -> Self {
        Self {
            state: state.into(),
            attribute: attribute.into(),
            question: question.into(),
            options: options.map(str::to_string),
            ..Default::default()
        }
    }

    /// Set the answer text.
    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = Some(answer.into());
        self
    }

    /// Build a row from one table record. `headers` and `values` are aligned
    /// by position; missing trailing values are treated as empty.
    pub fn from_record(headers: &[String], values: &[String]) -> Self {
        let mut row = Row::default();

        for (i, header) in headers.iter().enumerate() {
            let value = values.get(i).map(|v| v.trim()).unwrap_or("").to_string();
            match Field::from_header(header) {
                Some(field) => row.set_field(field, value),
                None => {
                    row.extra.insert(header.trim().to_string(), value);
                }
            }
        }

        row
    }

    fn set_field(&mut self, field: Field, value: String) {
        let optional = |v: String| if v.is_empty() { None } else { Some(v) };
        match field {
            Field::State => self.state = value,
            Field::Attribute => self.attribute = value,
            Field::Question => self.question = value,
            Field::Option(i) => self.options[i] = value,
            Field::Answer => self.answer = optional(value),
            Field::FullAnswer => self.full_answer = optional(value),
            Field::AnswerSource => self.answer_source = optional(value),
        }
    }

    /// Value of the named column for export. Unknown columns yield an empty string.
    pub fn value(&self, column: &str) -> &str {
        match Field::from_header(column) {
            Some(Field::State) => &self.state,
            Some(Field::Attribute) => &self.attribute,
            Some(Field::Question) => &self.question,
            Some(Field::Option(i)) => &self.options[i],
            Some(Field::Answer) => self.answer.as_deref().unwrap_or(""),
            Some(Field::FullAnswer) => self.full_answer.as_deref().unwrap_or(""),
            Some(Field::AnswerSource) => self.answer_source.as_deref().unwrap_or(""),
            None => self.extra.get(column).map(String::as_str).unwrap_or(""),
        }
    }

    /// Required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|column| self.value(column).trim().is_empty())
            .copied()
            .collect()
    }

    /// Whether every field the prompt needs is present.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Zero-based slot of the answer among the options, if it matches one.
    pub fn answer_position(&self) -> Option<usize> {
        let answer = self.answer.as_deref()?;
        self.options.iter().position(|o| o == answer)
    }
}
