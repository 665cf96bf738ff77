pub mod classifier;
pub mod entities;
pub mod extractor;
pub mod segmenter;

pub use classifier::*;
pub use entities::*;
pub use extractor::*;
pub use segmenter::*;

use serde::{Deserialize, Serialize};

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Fixed closed vocabularies used by the rule engine
///
/// Nothing here is learned. The defaults are the Portuguese interview set;
/// any field can be overridden from a JSON file, the rest keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Speaker prefix for the interviewer
    pub interviewer_label: String,
    /// Speaker prefix for the respondent
    pub respondent_label: String,
    /// Interrogative words, lower case
    pub interrogative_words: Vec<String>,
    /// Imperative verb forms that open a command, lower case
    pub command_verbs: Vec<String>,
    /// Copulas, articles and possessives skipped in question subjects
    pub question_ignore_tokens: Vec<String>,
    /// Parts of speech collected into a question subject
    pub question_subject_pos: Vec<String>,
    /// Parts of speech whose `*subj*` subtree becomes a statement subject
    pub dependency_subject_pos: Vec<String>,
    /// Domain nouns the provider wrongly flags as stop words
    pub stop_word_exceptions: Vec<String>,
    /// Entity labels accepted by the subject fallback
    pub subject_entity_labels: Vec<String>,
    /// Entity labels accepted by the object fallback
    pub object_entity_labels: Vec<String>,
    /// Symbols dropped from the root-subtree object
    pub root_excluded_symbols: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            interviewer_label: "Entrevistador".to_string(),
            respondent_label: "Pessoa".to_string(),
            interrogative_words: strings(&[
                "quem", "qual", "quais", "quando", "onde", "como", "por que", "para que",
            ]),
            command_verbs: strings(&["faça", "venha", "use", "leia", "escreva", "envie", "fale"]),
            question_ignore_tokens: strings(&[
                "é", "são", "será", "seriam", "o", "a", "os", "as", "seu", "sua", "seus", "suas",
            ]),
            question_subject_pos: strings(&["NOUN", "PROPN", "ADJ"]),
            dependency_subject_pos: strings(&["NOUN"]),
            stop_word_exceptions: strings(&["local", "serviço"]),
            // NORP is accepted for subjects only
            subject_entity_labels: strings(&["PERSON", "NORP", "ORG", "GPE", "LOC"]),
            object_entity_labels: strings(&["ORG", "PERSON", "GPE", "LOC"]),
            root_excluded_symbols: strings(&["=", "-"]),
        }
    }
}

impl Vocabulary {
    pub fn is_interrogative(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.interrogative_words.iter().any(|w| *w == lower)
    }

    pub fn is_question_ignored(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.question_ignore_tokens.iter().any(|w| *w == lower)
    }

    pub fn is_stop_word_exception(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.stop_word_exceptions.iter().any(|w| *w == lower)
    }
}

fn contains(list: &[String], value: &str) -> bool {
    list.iter().any(|item| item == value)
}
