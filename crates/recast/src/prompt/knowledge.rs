//! Background facts embedded in prompts.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RecastError, Result};

/// Reference text keyed by State, then by topic.
///
/// Loaded from a JSON document shaped like
/// `{"Uttarakhand": {"Language": "...", "Dance": "..."}}`. Insertion order
/// is kept so prompts list topics in the order the file does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnowledgeBase(IndexMap<String, IndexMap<String, String>>);

impl KnowledgeBase {
    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| RecastError::io(path, e))?;
        let kb = Self::from_json(&text)?;
        debug!(path = %path.display(), states = kb.len(), "loaded knowledge base");
        Ok(kb)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Add or replace one entry.
    pub fn insert(
        &mut self,
        state: impl Into<String>,
        topic: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.0
            .entry(state.into())
            .or_default()
            .insert(topic.into(), text.into());
    }

    /// Number of States covered.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries relevant to a row.
    ///
    /// State and topic are matched case-insensitively. When the State is
    /// known but no topic matches the attribute, every topic for the State is
    /// returned.
    pub fn lookup(&self, state: &str, attribute: &str) -> Vec<(&str, &str)> {
        let state = state.trim();
        let attribute = attribute.trim();

        let Some(topics) = self
            .0
            .iter()
            .find(|(name, _)| name.trim().eq_ignore_ascii_case(state))
            .map(|(_, topics)| topics)
        else {
            return Vec::new();
        };

        let matching: Vec<(&str, &str)> = topics
            .iter()
            .filter(|(topic, _)| topic.trim().eq_ignore_ascii_case(attribute))
            .map(|(topic, text)| (topic.as_str(), text.as_str()))
            .collect();

        if matching.is_empty() {
            topics
                .iter()
                .map(|(topic, text)| (topic.as_str(), text.as_str()))
                .collect()
        } else {
            matching
        }
    }
}
