use std::fmt;

use serde::{Deserialize, Serialize};

/// Who spoke a transcript line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    Interviewer,
    Respondent,
    Unknown,
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Actor::Interviewer => "Interviewer",
            Actor::Respondent => "Respondent",
            Actor::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// One speaker turn, taken from one transcript line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub actor: Actor,
    /// Speaker label as written in the transcript, or "Unknown"
    pub speaker: String,
    /// The line exactly as read
    pub raw_text: String,
    /// Utterance body, trimmed with whitespace runs collapsed
    pub cleaned_text: String,
}

/// Speech-act type of an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Classification {
    Question,
    Statement,
    Command,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Classification::Question => "Question",
            Classification::Statement => "Statement",
            Classification::Command => "Command",
        };
        f.write_str(name)
    }
}
