use std::path::Path;

use anyhow::{Context, Result};

use crate::heuristics::Vocabulary;

/// Read a transcript file as text
pub fn read_transcript_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
}

/// Parse a vocabulary override; fields left out keep their defaults
pub fn parse_vocabulary_json(json: &str) -> Result<Vocabulary> {
    serde_json::from_str(json).context("Failed to parse vocabulary JSON")
}

/// Load a vocabulary override from a JSON file
pub fn load_vocabulary(path: &Path) -> Result<Vocabulary> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read vocabulary: {:?}", path))?;
    parse_vocabulary_json(&content)
}
