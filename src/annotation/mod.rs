pub mod store;

pub use store::*;

use crate::error::AnalysisResult;
use crate::models::Annotation;

/// Source of linguistic annotations (tokens, POS, dependencies, entities,
/// sentence boundaries) for a piece of text
///
/// Providers are treated as stateless: the same text always yields the same
/// annotation.
pub trait AnnotationProvider {
    /// Annotate `text`, failing with `AnnotationFailure` when it cannot be
    /// processed at all
    fn annotate(&self, text: &str) -> AnalysisResult<Annotation>;
}

impl<P: AnnotationProvider + ?Sized> AnnotationProvider for &P {
    fn annotate(&self, text: &str) -> AnalysisResult<Annotation> {
        (**self).annotate(text)
    }
}
