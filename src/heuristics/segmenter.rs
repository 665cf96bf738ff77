use regex::Regex;

use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{Actor, Utterance};

use super::Vocabulary;

/// Splits transcript lines into speaker and utterance
#[derive(Debug, Clone)]
pub struct LineSegmenter {
    pattern: Regex,
    interviewer_label: String,
    respondent_label: String,
}

impl LineSegmenter {
    pub fn new(vocabulary: &Vocabulary) -> AnalysisResult<Self> {
        let pattern = format!(
            r"^({}|{}):\s*(.*)",
            regex::escape(&vocabulary.interviewer_label),
            regex::escape(&vocabulary.respondent_label)
        );

        let pattern = Regex::new(&pattern)
            .map_err(|e| AnalysisError::invalid_vocabulary(format!("speaker labels: {}", e)))?;

        Ok(Self {
            pattern,
            interviewer_label: vocabulary.interviewer_label.clone(),
            respondent_label: vocabulary.respondent_label.clone(),
        })
    }

    /// Segment one line. Never fails: unmatched lines get `Actor::Unknown`.
    pub fn segment(&self, line: &str) -> Utterance {
        let trimmed = line.trim();

        let (actor, speaker, sentence) = match self.pattern.captures(trimmed) {
            Some(caps) => {
                let label = caps.get(1).map_or("", |m| m.as_str());
                let body = caps.get(2).map_or("", |m| m.as_str()).trim();
                let actor = if label == self.interviewer_label {
                    Actor::Interviewer
                } else if label == self.respondent_label {
                    Actor::Respondent
                } else {
                    Actor::Unknown
                };
                (actor, label.to_string(), body)
            }
            None => (Actor::Unknown, "Unknown".to_string(), trimmed),
        };

        Utterance {
            actor,
            speaker,
            raw_text: line.to_string(),
            cleaned_text: collapse_whitespace(sentence),
        }
    }
}

/// Collapse whitespace runs to single spaces and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
