pub mod stage0_segment;
pub mod stage1_analyze;
pub mod stage2_sentiment;
pub mod stage3_render;

pub use stage0_segment::*;
pub use stage1_analyze::*;
pub use stage2_sentiment::*;
pub use stage3_render::*;

use tracing::info;

use crate::annotation::AnnotationProvider;
use crate::error::AnalysisResult;
use crate::heuristics::{LineSegmenter, Vocabulary};
use crate::io::AnalysisReport;
use crate::sentiment::{DistributionOracle, LabelOracle, SentimentAnnotator};

/// Run stages 0 and 1 over a transcript
///
/// Fails only when the vocabulary cannot be compiled; per-line annotation
/// failures end up in the report's `failures`.
pub fn run_pipeline<P: AnnotationProvider>(
    transcript: &str,
    provider: &P,
    vocabulary: &Vocabulary,
) -> AnalysisResult<AnalysisReport> {
    let segmenter = LineSegmenter::new(vocabulary)?;

    let segmented = segment_transcript(transcript, &segmenter);
    info!(
        "Stage 0: {} lines, {} utterances, {} empty",
        segmented.total_lines,
        segmented.lines.len(),
        segmented.skipped_empty
    );

    let analyzed = execute_stage1(&segmented.lines, provider, vocabulary);

    Ok(AnalysisReport::new(
        analyzed.records,
        analyzed.failures,
        segmented.total_lines,
        segmented.skipped_empty,
    ))
}

/// Run stages 0 through 2: the full analysis without rendering
///
/// Records come back in transcript order. Sentiment failures leave the
/// affected record's sentiment fields empty.
pub async fn analyze_transcript<P, A, B>(
    transcript: &str,
    provider: &P,
    vocabulary: &Vocabulary,
    annotator: &SentimentAnnotator<A, B>,
) -> AnalysisResult<AnalysisReport>
where
    P: AnnotationProvider,
    A: DistributionOracle + Sync,
    B: LabelOracle + Sync,
{
    let mut report = run_pipeline(transcript, provider, vocabulary)?;
    let scored = execute_stage2(&mut report.records, annotator).await;
    report.metadata.sentiment_scored = scored.scored;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::AnnotationStore;
    use crate::models::{Actor, Classification};
    use crate::sentiment::tests::KeywordOracle;

    const ANNOTATIONS: &str = r#"
{"text": "Qual o seu nome?", "tokens": [{"text": "Qual", "pos": "PRON", "dep": "ROOT", "head": 0}, {"text": "o", "pos": "DET", "dep": "det", "head": 3, "is_stop": true}, {"text": "seu", "pos": "DET", "dep": "det", "head": 3, "is_stop": true}, {"text": "nome", "pos": "NOUN", "dep": "nsubj", "head": 0}, {"text": "?", "pos": "PUNCT", "dep": "punct", "head": 0}]}
{"text": "Meu telefone é (11) 98765-4321", "tokens": [{"text": "Meu", "pos": "DET", "dep": "det", "head": 1, "is_stop": true}, {"text": "telefone", "pos": "NOUN", "dep": "nsubj", "head": 3}, {"text": "é", "pos": "AUX", "dep": "cop", "head": 3, "is_stop": true}, {"text": "(11)", "pos": "NUM", "dep": "ROOT", "head": 3}, {"text": "98765-4321", "pos": "NUM", "dep": "obj", "head": 3}], "ents": [{"text": "98765-4321", "label": "ORG", "start": 4, "end": 5}]}
{"text": "Isso é importante.", "tokens": [{"text": "Isso", "pos": "PRON", "dep": "nsubj", "head": 2, "is_stop": true}, {"text": "é", "pos": "AUX", "dep": "cop", "head": 2, "is_stop": true}, {"text": "importante", "pos": "ADJ", "dep": "ROOT", "head": 2}, {"text": ".", "pos": "PUNCT", "dep": "punct", "head": 2}]}
{"text": "Fale mais sobre a falha.", "tokens": [{"text": "Fale", "pos": "VERB", "dep": "ROOT", "head": 0}, {"text": "mais", "pos": "ADV", "dep": "advmod", "head": 0, "is_stop": true}, {"text": "sobre", "pos": "ADP", "dep": "case", "head": 4, "is_stop": true}, {"text": "a", "pos": "DET", "dep": "det", "head": 4, "is_stop": true}, {"text": "falha", "pos": "NOUN", "dep": "obl", "head": 0}, {"text": ".", "pos": "PUNCT", "dep": "punct", "head": 0}]}
{"text": "O atendimento foi bom.", "tokens": [{"text": "O", "pos": "DET", "dep": "det", "head": 1, "is_stop": true}, {"text": "atendimento", "pos": "NOUN", "dep": "nsubj", "head": 3}, {"text": "foi", "pos": "AUX", "dep": "cop", "head": 3, "is_stop": true}, {"text": "bom", "pos": "ADJ", "dep": "ROOT", "head": 3}, {"text": ".", "pos": "PUNCT", "dep": "punct", "head": 3}]}
"#;

    const TRANSCRIPT: &str = "Entrevistador: Qual o seu nome?\n\nPessoa: Meu telefone é (11) 98765-4321\nIsso é importante.\n   \nEntrevistador: Fale mais sobre a falha.\nPessoa: O atendimento foi bom.\nPessoa: Frase sem anotação.\n";

    fn store() -> AnnotationStore {
        AnnotationStore::from_json(ANNOTATIONS).unwrap()
    }

    #[test]
    fn test_pipeline_scenarios() {
        let report = run_pipeline(TRANSCRIPT, &store(), &Vocabulary::default()).unwrap();
        let records = &report.records;

        assert_eq!(records.len(), 5);

        assert_eq!(records[0].actor(), Actor::Interviewer);
        assert_eq!(records[0].utterance.speaker, "Entrevistador");
        assert_eq!(records[0].sentence(), "Qual o seu nome?");
        assert_eq!(records[0].classification, Classification::Question);
        assert_eq!(records[0].subject, "nome");
        assert_eq!(records[0].object, "");

        assert_eq!(records[1].classification, Classification::Statement);
        assert_eq!(records[1].object, "(11) 98765-4321");

        assert_eq!(records[2].actor(), Actor::Unknown);
        assert_eq!(records[2].sentence(), "Isso é importante.");
        assert_eq!(records[2].classification, Classification::Statement);

        assert_eq!(records[3].classification, Classification::Command);
        assert_eq!(records[3].subject, "");
        assert_eq!(records[3].object, "");
    }

    #[test]
    fn test_records_keep_transcript_order() {
        let report = run_pipeline(TRANSCRIPT, &store(), &Vocabulary::default()).unwrap();
        let numbers: Vec<usize> = report.records.iter().map(|r| r.line_number).collect();
        assert_eq!(numbers, vec![1, 3, 4, 6, 7]);
    }

    #[test]
    fn test_annotation_failure_drops_only_that_line() {
        let report = run_pipeline(TRANSCRIPT, &store(), &Vocabulary::default()).unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].line_number, 8);
        assert_eq!(report.failures[0].text, "Frase sem anotação.");
        assert_eq!(report.metadata.total_lines, 8);
        assert_eq!(report.metadata.skipped_empty, 2);
        // Every non-empty line is either a record or a failure
        assert_eq!(
            report.records.len() + report.failures.len(),
            report.metadata.total_lines - report.metadata.skipped_empty
        );
    }

    #[test]
    fn test_empty_line_produces_no_record() {
        let report = run_pipeline("", &store(), &Vocabulary::default()).unwrap();
        assert!(report.records.is_empty());
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn test_sentiment_failure_leaves_fields_empty() {
        let annotator = SentimentAnnotator::new(KeywordOracle, KeywordOracle);
        let report = analyze_transcript(TRANSCRIPT, &store(), &Vocabulary::default(), &annotator)
            .await
            .unwrap();

        // "Fale mais sobre a falha." cannot be scored by the keyword oracle
        let command = &report.records[3];
        assert_eq!(command.sentiment_primary, None);
        assert_eq!(command.sentiment_secondary, None);

        let praise = &report.records[4];
        assert_eq!(praise.sentiment_primary.as_deref(), Some("positive"));
        assert_eq!(praise.sentiment_secondary.as_deref(), Some("Positive"));

        assert_eq!(report.records.len(), 5);
        assert_eq!(report.metadata.sentiment_scored, 4);
    }
}
