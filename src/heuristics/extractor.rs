use crate::models::{Annotation, Classification, ExtractionResult, ExtractionSource};

use super::{Vocabulary, contains, find_email, joined_phone_numbers};

/// Extract subject/object for an utterance according to its classification
///
/// Questions get a subject only, statements get both, commands get nothing.
pub fn extract(
    classification: Classification,
    text: &str,
    annotation: &Annotation,
    vocabulary: &Vocabulary,
) -> ExtractionResult {
    match classification {
        Classification::Question => {
            let subject = extract_question_subject(annotation, vocabulary);
            let subject_source = (!subject.is_empty()).then_some(ExtractionSource::Interrogative);
            ExtractionResult {
                subject,
                subject_source,
                ..Default::default()
            }
        }
        Classification::Statement => extract_statement(text, annotation, vocabulary),
        Classification::Command => ExtractionResult::default(),
    }
}

/// Subject of a question: the contiguous run of content words after the
/// first interrogative word
///
/// Tokens before the interrogative are ignored. Once collecting, tokens on
/// the ignore-list or with a non-content POS are skipped until the first
/// word is collected; after that, the first non-content token ends the run.
pub fn extract_question_subject(annotation: &Annotation, vocabulary: &Vocabulary) -> String {
    let mut collecting = false;
    let mut collected: Vec<&str> = Vec::new();

    for token in annotation.tokens() {
        if vocabulary.is_interrogative(&token.text) {
            collecting = true;
            continue;
        }

        if !collecting {
            continue;
        }

        let content_pos = contains(&vocabulary.question_subject_pos, &token.pos);
        if content_pos && !vocabulary.is_question_ignored(&token.text) {
            collected.push(&token.text);
        } else if !content_pos && !collected.is_empty() {
            break;
        }
    }

    collected.join(" ")
}

/// Candidates found by walking the dependency labels once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyCandidates {
    /// Subtree of the last `*subj*` token with a subject POS
    pub subject: String,
    /// First non-empty subtree of an `*obj*` token
    pub object: String,
}

/// Walk every token's dependency label for subject and object subtrees
///
/// A later subject token replaces an earlier one, even when its filtered
/// subtree is empty. The object keeps the first non-empty subtree.
pub fn dependency_candidates(annotation: &Annotation, vocabulary: &Vocabulary) -> DependencyCandidates {
    let mut candidates = DependencyCandidates::default();

    for (index, token) in annotation.tokens().iter().enumerate() {
        if token.dep.contains("subj") && contains(&vocabulary.dependency_subject_pos, &token.pos) {
            candidates.subject = annotation
                .subtree_tokens(index)
                .filter(|t| !t.is_stop || vocabulary.is_stop_word_exception(&t.text))
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
        } else if token.dep.contains("obj") && candidates.object.is_empty() {
            candidates.object = annotation
                .subtree_tokens(index)
                .filter(|t| !t.is_stop)
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
        }
    }

    candidates
}

/// First entity whose label is in `labels`
pub fn first_entity_with_label(annotation: &Annotation, labels: &[String]) -> Option<String> {
    annotation
        .entities()
        .iter()
        .find(|e| contains(labels, &e.label))
        .map(|e| e.text.clone())
}

/// Root subtree with punctuation and excluded symbols removed
pub fn root_subtree_phrase(annotation: &Annotation, vocabulary: &Vocabulary) -> String {
    let Some(root) = annotation.root() else {
        return String::new();
    };

    annotation
        .subtree_tokens(root)
        .filter(|t| !t.is_punct() && !contains(&vocabulary.root_excluded_symbols, &t.text))
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Everything a statement stage may look at
pub struct StatementContext<'a> {
    pub text: &'a str,
    pub annotation: &'a Annotation,
    pub vocabulary: &'a Vocabulary,
    pub dependency: DependencyCandidates,
}

impl<'a> StatementContext<'a> {
    pub fn new(text: &'a str, annotation: &'a Annotation, vocabulary: &'a Vocabulary) -> Self {
        Self {
            text,
            annotation,
            vocabulary,
            dependency: dependency_candidates(annotation, vocabulary),
        }
    }
}

/// Subject stages of a statement, highest priority first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectStage {
    Dependency,
    NamedEntity,
}

pub const SUBJECT_CHAIN: [SubjectStage; 2] = [SubjectStage::Dependency, SubjectStage::NamedEntity];

impl SubjectStage {
    pub fn source(self) -> ExtractionSource {
        match self {
            SubjectStage::Dependency => ExtractionSource::Dependency,
            SubjectStage::NamedEntity => ExtractionSource::NamedEntity,
        }
    }

    /// The stage's candidate, or `None` when it has nothing
    pub fn produce(self, ctx: &StatementContext<'_>) -> Option<String> {
        let candidate = match self {
            SubjectStage::Dependency => ctx.dependency.subject.clone(),
            SubjectStage::NamedEntity => {
                first_entity_with_label(ctx.annotation, &ctx.vocabulary.subject_entity_labels)
                    .unwrap_or_default()
            }
        };
        non_empty(candidate)
    }
}

/// Object stages of a statement, highest priority first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectStage {
    PhoneNumber,
    Email,
    Dependency,
    NamedEntity,
    RootSubtree,
}

pub const OBJECT_CHAIN: [ObjectStage; 5] = [
    ObjectStage::PhoneNumber,
    ObjectStage::Email,
    ObjectStage::Dependency,
    ObjectStage::NamedEntity,
    ObjectStage::RootSubtree,
];

impl ObjectStage {
    pub fn source(self) -> ExtractionSource {
        match self {
            ObjectStage::PhoneNumber => ExtractionSource::PhoneNumber,
            ObjectStage::Email => ExtractionSource::Email,
            ObjectStage::Dependency => ExtractionSource::Dependency,
            ObjectStage::NamedEntity => ExtractionSource::NamedEntity,
            ObjectStage::RootSubtree => ExtractionSource::RootSubtree,
        }
    }

    /// The stage's candidate, or `None` when it has nothing
    pub fn produce(self, ctx: &StatementContext<'_>) -> Option<String> {
        let candidate = match self {
            ObjectStage::PhoneNumber => joined_phone_numbers(ctx.text),
            ObjectStage::Email => find_email(ctx.annotation).unwrap_or_default(),
            ObjectStage::Dependency => ctx.dependency.object.clone(),
            ObjectStage::NamedEntity => {
                first_entity_with_label(ctx.annotation, &ctx.vocabulary.object_entity_labels)
                    .unwrap_or_default()
            }
            ObjectStage::RootSubtree => root_subtree_phrase(ctx.annotation, ctx.vocabulary),
        };
        non_empty(candidate)
    }
}

fn non_empty(candidate: String) -> Option<String> {
    (!candidate.is_empty()).then_some(candidate)
}

/// Subject and object of a statement through the two fallback chains
///
/// Each chain stops at the first stage with a non-empty result; a filled
/// slot is never revisited.
pub fn extract_statement(
    text: &str,
    annotation: &Annotation,
    vocabulary: &Vocabulary,
) -> ExtractionResult {
    let ctx = StatementContext::new(text, annotation, vocabulary);

    let subject = SUBJECT_CHAIN
        .iter()
        .find_map(|stage| stage.produce(&ctx).map(|s| (s, stage.source())));
    let object = OBJECT_CHAIN
        .iter()
        .find_map(|stage| stage.produce(&ctx).map(|o| (o, stage.source())));

    let (subject, subject_source) = split(subject);
    let (object, object_source) = split(object);

    ExtractionResult {
        subject,
        object,
        subject_source,
        object_source,
    }
}

fn split(found: Option<(String, ExtractionSource)>) -> (String, Option<ExtractionSource>) {
    match found {
        Some((value, source)) => (value, Some(source)),
        None => (String::new(), None),
    }
}
