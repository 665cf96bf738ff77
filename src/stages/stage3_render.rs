use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use crate::io::{AnalysisReport, HumanSummary};

/// Configuration for Stage 3 rendering
#[derive(Debug, Clone)]
pub struct Stage3Config {
    /// Whether to generate the JSON report
    pub generate_json: bool,
    /// Whether to generate the CSV export
    pub generate_csv: bool,
    /// Whether to generate the human-readable summary
    pub generate_human: bool,
    /// Restrict the human summary to one actor or speaker label
    pub actor_filter: Option<String>,
}

impl Default for Stage3Config {
    fn default() -> Self {
        Self {
            generate_json: true,
            generate_csv: true,
            generate_human: true,
            actor_filter: None,
        }
    }
}

/// Result of Stage 3 rendering
#[derive(Debug, Default)]
pub struct Stage3Result {
    pub json_path: Option<PathBuf>,
    pub csv_path: Option<PathBuf>,
    pub human_path: Option<PathBuf>,
}

/// Execute Stage 3: Rendering
///
/// Produces up to three views of the same report:
/// 1. JSON report with records, failures and metadata
/// 2. CSV export, one row per record
/// 3. Text summary with the record table and label counts
pub async fn execute_stage3(
    report: &AnalysisReport,
    json_output: Option<&Path>,
    csv_output: Option<&Path>,
    human_output: Option<&Path>,
    config: &Stage3Config,
) -> Result<Stage3Result> {
    let mut result = Stage3Result::default();

    if config.generate_json {
        if let Some(path) = json_output {
            info!("Writing JSON report to {:?}", path);
            report.write_json(path)?;
            result.json_path = Some(path.to_path_buf());
        }
    }

    if config.generate_csv {
        if let Some(path) = csv_output {
            info!("Writing CSV export to {:?}", path);
            report.write_csv(path).await?;
            result.csv_path = Some(path.to_path_buf());
        }
    }

    if config.generate_human {
        if let Some(path) = human_output {
            info!("Writing summary to {:?}", path);
            let summary = match &config.actor_filter {
                Some(actor) => HumanSummary::with_actor_filter(report, actor),
                None => HumanSummary::new(report),
            };
            summary.write_file(path)?;
            result.human_path = Some(path.to_path_buf());
        }
    }

    Ok(result)
}
