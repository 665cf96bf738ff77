use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::error::{AnalysisError, AnalysisResult};
use crate::heuristics::collapse_whitespace;
use crate::models::{Annotation, AnnotationDocument};

use super::AnnotationProvider;

/// Annotation provider backed by pre-computed documents
///
/// Documents are looked up by their whitespace-collapsed text, so the store
/// can be produced by any external tagger ahead of time.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    documents: HashMap<String, AnnotationDocument>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from documents; a later document replaces an earlier
    /// one with the same text
    pub fn from_documents(documents: impl IntoIterator<Item = AnnotationDocument>) -> Self {
        let mut store = Self::new();
        for document in documents {
            store.insert(document);
        }
        store
    }

    pub fn insert(&mut self, document: AnnotationDocument) {
        let key = collapse_whitespace(&document.text);
        self.documents.insert(key, document);
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Load a JSON array of documents, or one document per line (JSONL)
    pub fn from_json(content: &str) -> Result<Self> {
        let trimmed = content.trim_start();
        let documents: Vec<AnnotationDocument> = if trimmed.starts_with('[') {
            serde_json::from_str(trimmed).context("Failed to parse annotation JSON array")?
        } else {
            trimmed
                .lines()
                .enumerate()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(i, line)| {
                    serde_json::from_str::<AnnotationDocument>(line)
                        .with_context(|| format!("Failed to parse annotation on line {}", i + 1))
                })
                .collect::<Result<_>>()?
        };

        debug!("Loaded {} annotation documents", documents.len());
        Ok(Self::from_documents(documents))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read annotations: {:?}", path))?;
        Self::from_json(&content)
    }
}

impl AnnotationProvider for AnnotationStore {
    fn annotate(&self, text: &str) -> AnalysisResult<Annotation> {
        let key = collapse_whitespace(text);
        if key.is_empty() {
            return Err(AnalysisError::annotation_failure("empty text"));
        }

        let document = self.documents.get(&key).ok_or_else(|| {
            AnalysisError::annotation_failure(format!("no annotation for {:?}", key))
        })?;

        Annotation::from_document(document.clone())
    }
}
