use serde::{Deserialize, Serialize};

use super::{Actor, Classification, Utterance};

/// Which step of a fallback chain filled a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionSource {
    Interrogative,
    PhoneNumber,
    Email,
    Dependency,
    NamedEntity,
    RootSubtree,
}

/// Subject and object phrases for one utterance; both may be empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub subject: String,
    pub object: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_source: Option<ExtractionSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_source: Option<ExtractionSource>,
}

/// Dominant labels from the two sentiment oracles, side by side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentLabels {
    pub primary: String,
    pub secondary: String,
}

/// One analyzed transcript line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedRecord {
    /// 1-based line number in the transcript
    pub line_number: usize,
    pub utterance: Utterance,
    pub classification: Classification,
    pub subject: String,
    pub object: String,
    /// Number of sentences the provider found in the utterance
    #[serde(default = "default_sentence_count")]
    pub sentence_count: usize,
    pub sentiment_primary: Option<String>,
    pub sentiment_secondary: Option<String>,
}

fn default_sentence_count() -> usize {
    1
}

impl AnalyzedRecord {
    pub fn actor(&self) -> Actor {
        self.utterance.actor
    }

    pub fn sentence(&self) -> &str {
        &self.utterance.cleaned_text
    }

    pub fn set_sentiment(&mut self, labels: SentimentLabels) {
        self.sentiment_primary = Some(labels.primary);
        self.sentiment_secondary = Some(labels.secondary);
    }

    pub fn has_sentiment(&self) -> bool {
        self.sentiment_primary.is_some() && self.sentiment_secondary.is_some()
    }
}

/// A line that could not become a record because annotation failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineFailure {
    pub line_number: usize,
    pub text: String,
    pub error: String,
}
