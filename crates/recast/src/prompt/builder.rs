//! Prompt construction for one row.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::contract::response_layout;
use crate::dataset::Row;
use crate::error::{RecastError, Result};

use super::knowledge::KnowledgeBase;

/// Which option the model must make correct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerPolicy {
    /// The row's own State is the correct option.
    #[default]
    RowState,

    /// Exactly one of a fixed label set is the correct option.
    FixedLabels { labels: Vec<String> },
}

impl AnswerPolicy {
    fn instruction(&self, row: &Row) -> String {
        match self {
            AnswerPolicy::RowState => format!(
                "Modified options that reflect this context. {} must be the only correct \
                 option; use other states of India as the remaining options so the choices \
                 are not confusing.",
                row.state
            ),
            AnswerPolicy::FixedLabels { labels } => format!(
                "Modified options that reflect this context. The correct answer must be \
                 exactly one of: {}. Use only one of those labels among the options so the \
                 choices are not confusing.",
                labels.join(", ")
            ),
        }
    }
}

/// Builds the rewrite prompt for a row.
///
/// Output is a pure function of the row and the builder's configuration.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    answer_policy: AnswerPolicy,
    knowledge: Option<KnowledgeBase>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answer_policy(mut self, policy: AnswerPolicy) -> Self {
        self.answer_policy = policy;
        self
    }

    pub fn with_knowledge(mut self, knowledge: KnowledgeBase) -> Self {
        self.knowledge = Some(knowledge);
        self
    }

    pub fn answer_policy(&self) -> &AnswerPolicy {
        &self.answer_policy
    }

    /// Build the prompt, refusing rows that lack a required field.
    pub fn build_checked(&self, index: usize, row: &Row) -> Result<String> {
        let missing = row.missing_fields();
        if !missing.is_empty() {
            return Err(RecastError::IncompleteRow {
                index,
                fields: missing.into_iter().map(String::from).collect(),
            });
        }
        Ok(self.build(row))
    }

    /// Build the prompt for `row`.
    ///
    /// The row is expected to be complete; see [`PromptBuilder::build_checked`].
    pub fn build(&self, row: &Row) -> String {
        let options = row
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| format!("{}. {}", i + 1, option))
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            r#"Please modify the following question and its options to include specific context about {state} and the attribute: {attribute}

Original Question: {question}

Original Options:
{options}

Please provide:
1. A corrected version of the question with {state} and {attribute} context. Include a cultural or regional artifact in the question.
2. {policy}
3. The correct answer with explanation
4. Relevant citations or sources. Do not invent information; quote sources word for word and prefer Wikipedia.

{knowledge}Format your response as follows:
{layout}"#,
            state = row.state,
            attribute = row.attribute,
            question = row.question,
            options = options,
            policy = self.answer_policy.instruction(row),
            knowledge = self.knowledge_block(row),
            layout = response_layout(),
        );

        debug!(chars = prompt.len(), state = %row.state, "built prompt");
        prompt
    }

    /// Background facts for the row, followed by a blank line; empty when
    /// nothing is known.
    fn knowledge_block(&self, row: &Row) -> String {
        let Some(kb) = &self.knowledge else {
            return String::new();
        };
        let entries = kb.lookup(&row.state, &row.attribute);
        if entries.is_empty() {
            return String::new();
        }

        let lines = entries
            .iter()
            .map(|(topic, text)| format!("- {}: {}", topic, text))
            .collect::<Vec<_>>()
            .join("\n");
        format!("Background knowledge about {}:\n{}\n\n", row.state, lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{ANSWER_MARKER, CITATIONS_MARKER, OPTIONS_MARKER, QUESTION_MARKER};

    fn row() -> Row {
        Row::new(
            "Uttarakhand",
            "Culture",
            "Which dance is popular here?",
            ["Chanchari", "Bhangra", "Garba", "Bihu"],
        )
    }

    #[test]
    fn test_prompt_embeds_row_verbatim() {
        let prompt = PromptBuilder::new().build(&row());

        assert!(prompt.contains("Uttarakhand"));
        assert!(prompt.contains("the attribute: Culture"));
        assert!(prompt.contains("Original Question: Which dance is popular here?"));
        assert!(prompt.contains("1. Chanchari\n2. Bhangra\n3. Garba\n4. Bihu\n"));
    }

    #[test]
    fn test_prompt_ends_with_layout() {
        let prompt = PromptBuilder::new().build(&row());
        for marker in [QUESTION_MARKER, OPTIONS_MARKER, ANSWER_MARKER, CITATIONS_MARKER] {
            assert!(prompt.contains(marker), "missing {marker}");
        }
        assert!(prompt.ends_with(&response_layout()));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let builder = PromptBuilder::new();
        assert_eq!(builder.build(&row()), builder.build(&row()));
    }

    #[test]
    fn test_answer_policies() {
        let row_state = PromptBuilder::new().build(&row());
        assert!(row_state.contains("Uttarakhand must be the only correct option"));

        let labels = ["Uttarakhand", "Garhwali", "Kumaoni", "Jaunsari"]
            .map(String::from)
            .to_vec();
        let fixed = PromptBuilder::new()
            .with_answer_policy(AnswerPolicy::FixedLabels { labels })
            .build(&row());
        assert!(fixed.contains("exactly one of: Uttarakhand, Garhwali, Kumaoni, Jaunsari"));
    }

    #[test]
    fn test_answer_policy_serde() {
        let policy: AnswerPolicy =
            serde_json::from_str(r#"{"kind": "fixed_labels", "labels": ["A", "B"]}"#).unwrap();
        assert_eq!(
            policy,
            AnswerPolicy::FixedLabels {
                labels: vec!["A".to_string(), "B".to_string()]
            }
        );

        let policy: AnswerPolicy = serde_json::from_str(r#"{"kind": "row_state"}"#).unwrap();
        assert_eq!(policy, AnswerPolicy::RowState);
    }

    #[test]
    fn test_knowledge_block() {
        let mut kb = KnowledgeBase::default();
        kb.insert("Uttarakhand", "Culture", "Chanchari is a folk dance.");
        kb.insert("Kerala", "Culture", "Kathakali.");

        let prompt = PromptBuilder::new().with_knowledge(kb).build(&row());
        assert!(prompt.contains("Background knowledge about Uttarakhand:"));
        assert!(prompt.contains("- Culture: Chanchari is a folk dance."));
        assert!(!prompt.contains("Kathakali"));
    }

    #[test]
    fn test_build_checked_rejects_incomplete_row() {
        let mut incomplete = row();
        incomplete.options[2].clear();
        incomplete.attribute.clear();

        let err = PromptBuilder::new()
            .build_checked(4, &incomplete)
            .unwrap_err();
        match err {
            RecastError::IncompleteRow { index, fields } => {
                assert_eq!(index, 4);
                assert_eq!(fields, vec!["Attribute", "Option3"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
