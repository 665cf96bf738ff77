pub mod annotation;
pub mod error;
pub mod heuristics;
pub mod io;
pub mod models;
pub mod sentiment;
pub mod stages;

pub use annotation::{AnnotationProvider, AnnotationStore};
pub use error::{AnalysisError, AnalysisResult};
pub use heuristics::{LineSegmenter, Vocabulary, classify_utterance, extract};
pub use io::{AnalysisReport, HumanSummary, load_vocabulary, read_transcript_file};
pub use models::{
    Actor, AnalyzedRecord, Annotation, AnnotationDocument, Classification, ExtractionResult,
    SentimentLabels, Utterance,
};
pub use sentiment::{SentimentAnnotator, SentimentConfig, build_sentiment_annotator};
pub use stages::{Stage3Config, analyze_transcript, execute_stage3, run_pipeline};
