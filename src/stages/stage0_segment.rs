use tracing::debug;

use crate::heuristics::LineSegmenter;
use crate::models::Utterance;

/// A non-empty transcript line with its position
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedLine {
    /// 1-based line number in the transcript
    pub line_number: usize,
    pub utterance: Utterance,
}

/// Result of Stage 0 segmentation
#[derive(Debug, Clone)]
pub struct SegmentationResult {
    /// Lines with a non-empty sentence, in transcript order
    pub lines: Vec<SegmentedLine>,
    /// Number of lines read
    pub total_lines: usize,
    /// Number of lines dropped because their sentence was empty
    pub skipped_empty: usize,
}

/// Stage 0: split a transcript into speaker-attributed utterances
pub fn segment_transcript(text: &str, segmenter: &LineSegmenter) -> SegmentationResult {
    let mut lines = Vec::new();
    let mut total_lines = 0;

    for (index, raw) in text.lines().enumerate() {
        total_lines += 1;
        let utterance = segmenter.segment(raw);
        if utterance.cleaned_text.is_empty() {
            debug!("Line {}: empty, skipped", index + 1);
            continue;
        }
        lines.push(SegmentedLine {
            line_number: index + 1,
            utterance,
        });
    }

    SegmentationResult {
        skipped_empty: total_lines - lines.len(),
        lines,
        total_lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::Vocabulary;
    use crate::models::Actor;

    #[test]
    fn test_empty_lines_dropped() {
        let segmenter = LineSegmenter::new(&Vocabulary::default()).unwrap();
        let text = "Entrevistador: Qual o seu nome?\n\n   \nPessoa:\nPessoa: Ana\nObrigado.";
        let result = segment_transcript(text, &segmenter);

        assert_eq!(result.total_lines, 6);
        assert_eq!(result.skipped_empty, 3);
        let numbers: Vec<usize> = result.lines.iter().map(|l| l.line_number).collect();
        assert_eq!(numbers, vec![1, 5, 6]);
        assert_eq!(result.lines[2].utterance.actor, Actor::Unknown);
    }

    #[test]
    fn test_empty_transcript() {
        let segmenter = LineSegmenter::new(&Vocabulary::default()).unwrap();
        let result = segment_transcript("", &segmenter);
        assert!(result.lines.is_empty());
        assert_eq!(result.total_lines, 0);
    }
}
