use crate::models::Classification;

use super::{Vocabulary, collapse_whitespace};

/// Assign a speech-act type to an utterance
///
/// Rules are tried in order against the lower-cased, whitespace-collapsed
/// text and the first match wins:
/// 1. ends with `?` -> Question
/// 2. starts with an interrogative word -> Question
/// 3. contains `<interrogative>,` anywhere -> Question
/// 4. starts with a command verb -> Command
/// 5. otherwise -> Statement
///
/// "Starts with" is a plain prefix test, not a word-boundary match.
pub fn classify_utterance(text: &str, vocabulary: &Vocabulary) -> Classification {
    let cleaned = collapse_whitespace(text).to_lowercase();

    if cleaned.ends_with('?') {
        return Classification::Question;
    }

    if vocabulary
        .interrogative_words
        .iter()
        .any(|word| cleaned.starts_with(word.as_str()))
    {
        return Classification::Question;
    }

    if vocabulary
        .interrogative_words
        .iter()
        .any(|word| cleaned.contains(&format!("{},", word)))
    {
        return Classification::Question;
    }

    if vocabulary
        .command_verbs
        .iter()
        .any(|verb| cleaned.starts_with(verb.as_str()))
    {
        return Classification::Command;
    }

    Classification::Statement
}
