use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// A single token as produced by the annotation provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedToken {
    /// Surface form
    pub text: String,
    #[serde(default)]
    pub lemma: String,
    /// Coarse part-of-speech (NOUN, PROPN, ADJ, PUNCT, ...)
    pub pos: String,
    /// Fine-grained tag
    #[serde(default)]
    pub tag: String,
    /// Dependency label (nsubj, obj, ROOT, ...)
    pub dep: String,
    /// Index of the governing token; a root points at itself
    pub head: usize,
    #[serde(default)]
    pub is_stop: bool,
    /// Provider's "looks like an e-mail address" flag
    #[serde(default)]
    pub like_email: bool,
}

impl AnnotatedToken {
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    pub fn looks_like_email(&self) -> bool {
        self.like_email
    }

    pub fn is_punct(&self) -> bool {
        self.pos == "PUNCT"
    }
}

/// Named-entity span over the token range `[start, end)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: String,
    pub start: usize,
    pub end: usize,
}

/// Sentence boundary over the token range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceSpan {
    pub start: usize,
    pub end: usize,
}

/// Provider output exactly as serialized, before validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationDocument {
    pub text: String,
    pub tokens: Vec<AnnotatedToken>,
    #[serde(default)]
    pub ents: Vec<EntitySpan>,
    #[serde(default)]
    pub sents: Vec<SentenceSpan>,
}

/// Validated, read-only view over one utterance's annotation
///
/// Token relationships are held as an explicit tree: every token has a
/// parent index and the children of each token are precomputed, so the
/// subtree of a token is a plain graph query.
#[derive(Debug, Clone)]
pub struct Annotation {
    text: String,
    tokens: Vec<AnnotatedToken>,
    entities: Vec<EntitySpan>,
    sentences: Vec<SentenceSpan>,
    children: Vec<Vec<usize>>,
}

impl Annotation {
    /// Validate a provider document and build the dependency tree
    pub fn from_document(document: AnnotationDocument) -> AnalysisResult<Self> {
        let AnnotationDocument {
            text,
            tokens,
            mut ents,
            sents,
        } = document;

        if tokens.is_empty() {
            return Err(AnalysisError::annotation_failure(format!(
                "no tokens for {:?}",
                text
            )));
        }

        let len = tokens.len();
        if let Some((i, token)) = tokens.iter().enumerate().find(|(_, t)| t.head >= len) {
            return Err(AnalysisError::invalid_annotation(format!(
                "token {} ({:?}) has head {} outside 0..{}",
                i, token.text, token.head, len
            )));
        }

        // Every chain of heads must end in a self-headed root
        for start in 0..len {
            let mut current = start;
            let mut steps = 0;
            while tokens[current].head != current {
                current = tokens[current].head;
                steps += 1;
                if steps > len {
                    return Err(AnalysisError::invalid_annotation(format!(
                        "dependency cycle through token {}",
                        start
                    )));
                }
            }
        }

        if let Some(ent) = ents.iter().find(|e| e.start >= e.end || e.end > len) {
            return Err(AnalysisError::invalid_annotation(format!(
                "entity {:?} spans {}..{} outside 0..{}",
                ent.text, ent.start, ent.end, len
            )));
        }
        ents.sort_by_key(|e| e.start);

        let sentences = if sents.is_empty() {
            vec![SentenceSpan { start: 0, end: len }]
        } else {
            sents
        };

        let mut children = vec![Vec::new(); len];
        for (i, token) in tokens.iter().enumerate() {
            if token.head != i {
                children[token.head].push(i);
            }
        }

        Ok(Self {
            text,
            tokens,
            entities: ents,
            sentences,
            children,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[AnnotatedToken] {
        &self.tokens
    }

    /// Entity spans in token order
    pub fn entities(&self) -> &[EntitySpan] {
        &self.entities
    }

    pub fn sentences(&self) -> &[SentenceSpan] {
        &self.sentences
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Index of the first token labelled `ROOT`
    pub fn root(&self) -> Option<usize> {
        self.tokens.iter().position(|t| t.dep == "ROOT")
    }

    /// Indices of `index` and all of its descendants, in token order
    pub fn subtree(&self, index: usize) -> Vec<usize> {
        if index >= self.tokens.len() {
            return Vec::new();
        }

        let mut collected = Vec::new();
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            collected.push(current);
            stack.extend(self.children[current].iter().copied());
        }
        collected.sort_unstable();
        collected
    }

    pub fn subtree_tokens(&self, index: usize) -> impl Iterator<Item = &AnnotatedToken> {
        self.subtree(index).into_iter().map(move |i| &self.tokens[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnnotationDocument {
        // "O serviço local funciona bem ."
        let json = r#"{
            "text": "O serviço local funciona bem .",
            "tokens": [
                {"text": "O", "pos": "DET", "dep": "det", "head": 1, "is_stop": true},
                {"text": "serviço", "pos": "NOUN", "dep": "nsubj", "head": 3, "is_stop": true},
                {"text": "local", "pos": "ADJ", "dep": "amod", "head": 1, "is_stop": true},
                {"text": "funciona", "pos": "VERB", "dep": "ROOT", "head": 3},
                {"text": "bem", "pos": "ADV", "dep": "advmod", "head": 3},
                {"text": ".", "pos": "PUNCT", "dep": "punct", "head": 3}
            ],
            "ents": []
        }"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_subtree_in_token_order() {
        let annotation = Annotation::from_document(sample()).unwrap();

        assert_eq!(annotation.subtree(1), vec![0, 1, 2]);
        assert_eq!(annotation.subtree(3), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(annotation.subtree(4), vec![4]);
        assert!(annotation.subtree(99).is_empty());
        assert_eq!(annotation.root(), Some(3));
    }

    #[test]
    fn test_missing_sentences_default_to_whole_text() {
        let annotation = Annotation::from_document(sample()).unwrap();
        assert_eq!(annotation.sentences(), &[SentenceSpan { start: 0, end: 6 }]);
        assert_eq!(annotation.sentence_count(), 1);
    }

    #[test]
    fn test_rejects_head_out_of_range() {
        let mut doc = sample();
        doc.tokens[0].head = 42;
        let err = Annotation::from_document(doc).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidAnnotation { .. }));
    }

    #[test]
    fn test_rejects_cycle() {
        let mut doc = sample();
        doc.tokens[0].head = 1;
        doc.tokens[1].head = 0;
        let err = Annotation::from_document(doc).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidAnnotation { .. }));
    }

    #[test]
    fn test_rejects_empty_document() {
        let doc = AnnotationDocument {
            text: String::new(),
            tokens: vec![],
            ents: vec![],
            sents: vec![],
        };
        let err = Annotation::from_document(doc).unwrap_err();
        assert!(matches!(err, AnalysisError::AnnotationFailure { .. }));
    }

    #[test]
    fn test_entities_sorted_by_start() {
        let mut doc = sample();
        doc.ents = vec![
            EntitySpan {
                text: "funciona".to_string(),
                label: "MISC".to_string(),
                start: 3,
                end: 4,
            },
            EntitySpan {
                text: "serviço".to_string(),
                label: "ORG".to_string(),
                start: 1,
                end: 2,
            },
        ];
        let annotation = Annotation::from_document(doc).unwrap();
        assert_eq!(annotation.entities()[0].label, "ORG");
    }
}
