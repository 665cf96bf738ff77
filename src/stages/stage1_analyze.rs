use tracing::{debug, info, warn};

use crate::annotation::AnnotationProvider;
use crate::error::AnalysisResult;
use crate::heuristics::{Vocabulary, classify_utterance, extract};
use crate::models::{AnalyzedRecord, LineFailure};

use super::SegmentedLine;

/// Result of Stage 1 analysis
#[derive(Debug, Clone, Default)]
pub struct Stage1Result {
    /// One record per successfully annotated line, in transcript order
    pub records: Vec<AnalyzedRecord>,
    /// Lines the annotation provider could not process
    pub failures: Vec<LineFailure>,
}

/// Annotate, classify and extract subject/object for one line
pub fn analyze_line<P: AnnotationProvider>(
    line: &SegmentedLine,
    provider: &P,
    vocabulary: &Vocabulary,
) -> AnalysisResult<AnalyzedRecord> {
    let text = &line.utterance.cleaned_text;
    let annotation = provider.annotate(text)?;

    let classification = classify_utterance(text, vocabulary);
    let extraction = extract(classification, text, &annotation, vocabulary);

    debug!(
        "Line {}: {} subject={:?} ({:?}) object={:?} ({:?})",
        line.line_number,
        classification,
        extraction.subject,
        extraction.subject_source,
        extraction.object,
        extraction.object_source
    );

    Ok(AnalyzedRecord {
        line_number: line.line_number,
        utterance: line.utterance.clone(),
        classification,
        subject: extraction.subject,
        object: extraction.object,
        sentence_count: annotation.sentence_count(),
        sentiment_primary: None,
        sentiment_secondary: None,
    })
}

/// Execute Stage 1: classification and subject/object extraction
///
/// A provider failure drops that line's record only; the rest of the
/// transcript is still processed.
pub fn execute_stage1<P: AnnotationProvider>(
    lines: &[SegmentedLine],
    provider: &P,
    vocabulary: &Vocabulary,
) -> Stage1Result {
    let mut result = Stage1Result::default();

    for line in lines {
        match analyze_line(line, provider, vocabulary) {
            Ok(record) => result.records.push(record),
            Err(e) => {
                warn!("Line {} not analyzed: {}", line.line_number, e);
                result.failures.push(LineFailure {
                    line_number: line.line_number,
                    text: line.utterance.cleaned_text.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        "Stage 1: {} records, {} failures",
        result.records.len(),
        result.failures.len()
    );

    result
}
