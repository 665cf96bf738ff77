use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AnalyzedRecord, Classification, LineFailure};

/// Machine-readable analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Analyzed lines in transcript order
    pub records: Vec<AnalyzedRecord>,
    /// Lines dropped because annotation failed
    pub failures: Vec<LineFailure>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub total_lines: usize,
    pub skipped_empty: usize,
    pub records: usize,
    pub failures: usize,
    pub sentiment_scored: usize,
    pub generated_at: DateTime<Utc>,
}

/// Flat CSV row for one record
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    line_number: usize,
    actor: String,
    speaker: &'a str,
    sentence: &'a str,
    #[serde(rename = "type")]
    classification: String,
    subject: &'a str,
    object: &'a str,
    sentiment_primary: Option<&'a str>,
    sentiment_secondary: Option<&'a str>,
}

impl<'a> From<&'a AnalyzedRecord> for CsvRow<'a> {
    fn from(record: &'a AnalyzedRecord) -> Self {
        Self {
            line_number: record.line_number,
            actor: record.actor().to_string(),
            speaker: &record.utterance.speaker,
            sentence: record.sentence(),
            classification: record.classification.to_string(),
            subject: &record.subject,
            object: &record.object,
            sentiment_primary: record.sentiment_primary.as_deref(),
            sentiment_secondary: record.sentiment_secondary.as_deref(),
        }
    }
}

impl AnalysisReport {
    pub fn new(
        records: Vec<AnalyzedRecord>,
        failures: Vec<LineFailure>,
        total_lines: usize,
        skipped_empty: usize,
    ) -> Self {
        let metadata = ReportMetadata {
            total_lines,
            skipped_empty,
            records: records.len(),
            failures: failures.len(),
            sentiment_scored: records.iter().filter(|r| r.has_sentiment()).count(),
            generated_at: Utc::now(),
        };
        Self {
            records,
            failures,
            metadata,
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }

    /// Read a report previously written with `write_json`
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;
        serde_json::from_str(&content).context("Failed to parse analysis report")
    }

    /// Write records as CSV, one row per record
    pub async fn write_csv(&self, path: &Path) -> Result<()> {
        let file = tokio::fs::File::create(path)
            .await
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        let mut writer = csv_async::AsyncSerializer::from_writer(file);

        for record in &self.records {
            writer
                .serialize(CsvRow::from(record))
                .await
                .with_context(|| format!("Failed to write CSV row for line {}", record.line_number))?;
        }

        writer.flush().await.context("Failed to flush CSV")?;
        Ok(())
    }
}

/// Human-readable summary: record table plus label counts
pub struct HumanSummary<'a> {
    report: &'a AnalysisReport,
    actor: Option<String>,
}

impl<'a> HumanSummary<'a> {
    pub fn new(report: &'a AnalysisReport) -> Self {
        Self {
            report,
            actor: None,
        }
    }

    /// Only show records whose speaker label or actor matches `actor`
    pub fn with_actor_filter(report: &'a AnalysisReport, actor: &str) -> Self {
        Self {
            report,
            actor: Some(actor.to_lowercase()),
        }
    }

    fn selected(&self) -> Vec<&'a AnalyzedRecord> {
        self.report
            .records
            .iter()
            .filter(|r| match &self.actor {
                Some(actor) => {
                    r.utterance.speaker.to_lowercase() == *actor
                        || r.actor().to_string().to_lowercase() == *actor
                }
                None => true,
            })
            .collect()
    }

    /// Format the summary as text
    pub fn format(&self) -> String {
        let records = self.selected();
        let mut output = String::new();

        output.push_str("Conversation Analysis\n");
        output.push_str("=====================\n");
        if let Some(actor) = &self.actor {
            output.push_str(&format!("Actor filter: {}\n", actor));
        }
        output.push_str(&format!(
            "{} records, {} failed lines, {} empty lines skipped\n\n",
            records.len(),
            self.report.failures.len(),
            self.report.metadata.skipped_empty
        ));

        output.push_str(&format!(
            "{:>4}  {:<13}  {:<9}  {:<20}  {:<20}  {:<10}  {:<10}  {}\n",
            "Line", "Speaker", "Type", "Subject", "Object", "Sent. A", "Sent. B", "Sentence"
        ));
        for record in &records {
            output.push_str(&format!(
                "{:>4}  {:<13}  {:<9}  {:<20}  {:<20}  {:<10}  {:<10}  {}\n",
                record.line_number,
                truncate(&record.utterance.speaker, 13),
                record.classification.to_string(),
                truncate(&record.subject, 20),
                truncate(&record.object, 20),
                truncate(record.sentiment_primary.as_deref().unwrap_or("-"), 10),
                truncate(record.sentiment_secondary.as_deref().unwrap_or("-"), 10),
                record.sentence()
            ));
        }

        output.push_str("\nClassification Counts\n");
        output.push_str("---------------------\n");
        for (classification, count) in classification_counts(&records) {
            output.push_str(&format!("{}: {}\n", classification, count));
        }

        output.push_str("\nSentiment Counts (primary)\n");
        output.push_str("--------------------------\n");
        push_counts(
            &mut output,
            &label_counts(&records, |r| r.sentiment_primary.as_deref()),
        );

        output.push_str("\nSentiment Counts (secondary)\n");
        output.push_str("----------------------------\n");
        push_counts(
            &mut output,
            &label_counts(&records, |r| r.sentiment_secondary.as_deref()),
        );

        let multi_sentence = records.iter().filter(|r| r.sentence_count > 1).count();
        output.push_str(&format!("\nMulti-sentence utterances: {}\n", multi_sentence));

        if !self.report.failures.is_empty() {
            output.push_str("\nFailed Lines\n");
            output.push_str("------------\n");
            for failure in &self.report.failures {
                output.push_str(&format!(
                    "{:>4}  {}  ({})\n",
                    failure.line_number, failure.text, failure.error
                ));
            }
        }

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

/// Record count per classification
pub fn classification_counts(records: &[&AnalyzedRecord]) -> BTreeMap<Classification, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.classification).or_insert(0) += 1;
    }
    counts
}

/// Record count per sentiment label; unscored records are not counted
pub fn label_counts<'r>(
    records: &[&'r AnalyzedRecord],
    label: impl Fn(&'r AnalyzedRecord) -> Option<&'r str>,
) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for &record in records {
        if let Some(value) = label(record) {
            *counts.entry(value.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

fn push_counts(output: &mut String, counts: &BTreeMap<String, usize>) {
    if counts.is_empty() {
        output.push_str("(none)\n");
    }
    for (label, count) in counts {
        output.push_str(&format!("{}: {}\n", label, count));
    }
}

/// Cut text to at most `width` characters, marking the cut with `~`
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('~');
    cut
}
