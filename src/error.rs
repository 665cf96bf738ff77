use thiserror::Error;

/// Errors raised by the analysis core
///
/// An empty subject or object is not an error: it is the normal outcome of a
/// fallback chain that found nothing.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalysisError {
    /// The annotation provider or a sentiment oracle cannot process the text
    #[error("annotation failure: {reason}")]
    AnnotationFailure { reason: String },

    /// A provider document that cannot be used as a parse (bad head index,
    /// cyclic tree, entity span out of range)
    #[error("invalid annotation: {reason}")]
    InvalidAnnotation { reason: String },

    /// Vocabulary that cannot be turned into matchers
    #[error("invalid vocabulary: {reason}")]
    InvalidVocabulary { reason: String },

    /// Transport or decoding failure talking to a sentiment service
    #[error("sentiment oracle error: {reason}")]
    Oracle { reason: String },
}

impl AnalysisError {
    pub fn annotation_failure(reason: impl Into<String>) -> Self {
        Self::AnnotationFailure {
            reason: reason.into(),
        }
    }

    pub fn invalid_annotation(reason: impl Into<String>) -> Self {
        Self::InvalidAnnotation {
            reason: reason.into(),
        }
    }

    pub fn invalid_vocabulary(reason: impl Into<String>) -> Self {
        Self::InvalidVocabulary {
            reason: reason.into(),
        }
    }

    pub fn oracle(reason: impl Into<String>) -> Self {
        Self::Oracle {
            reason: reason.into(),
        }
    }
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
