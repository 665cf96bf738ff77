use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AnalysisError, AnalysisResult};

use super::{DistributionOracle, LabelOracle, LabelScore, SentimentAnnotator, dominant_label};

const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co/models";
const DEFAULT_PRIMARY_MODEL: &str = "lxyuan/distilbert-base-multilingual-cased-sentiments-student";
const DEFAULT_SECONDARY_MODEL: &str = "cardiffnlp/twitter-xlm-roberta-base-sentiment";

/// Configuration for the hosted sentiment models
#[derive(Debug, Clone)]
pub struct SentimentConfig {
    /// API token (from HF_API_TOKEN env var)
    pub api_token: String,
    /// Base URL; the model id is appended
    pub endpoint: String,
    /// Model scored as a full distribution
    pub primary_model: String,
    /// Model read for its best label only
    pub secondary_model: String,
}

impl SentimentConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let api_token =
            std::env::var("HF_API_TOKEN").context("HF_API_TOKEN environment variable not set")?;
        let endpoint = std::env::var("COLLOQUY_SENTIMENT_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        Ok(Self {
            api_token,
            endpoint,
            primary_model: DEFAULT_PRIMARY_MODEL.to_string(),
            secondary_model: DEFAULT_SECONDARY_MODEL.to_string(),
        })
    }

    pub fn new(api_token: String) -> Self {
        Self {
            api_token,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            primary_model: DEFAULT_PRIMARY_MODEL.to_string(),
            secondary_model: DEFAULT_SECONDARY_MODEL.to_string(),
        }
    }
}

/// Client for one text-classification model on an inference endpoint
#[derive(Debug, Clone)]
pub struct InferenceClient {
    client: Client,
    url: String,
    api_token: String,
}

impl InferenceClient {
    pub fn new(client: Client, endpoint: &str, model: &str, api_token: &str) -> Self {
        Self {
            client,
            url: format!("{}/{}", endpoint.trim_end_matches('/'), model),
            api_token: api_token.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Score `text` and return every label with its score
    pub async fn classify(&self, text: &str) -> AnalysisResult<Vec<LabelScore>> {
        if text.trim().is_empty() {
            return Err(AnalysisError::annotation_failure("cannot score empty text"));
        }

        let request = InferenceRequest {
            inputs: text.to_string(),
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalysisError::oracle(format!("request to {} failed: {}", self.url, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::oracle(format!(
                "{} returned {} - {}",
                self.url, status, body
            )));
        }

        let response: InferenceResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::oracle(format!("failed to parse response: {}", e)))?;

        let scores = response.into_scores();
        debug!("{}: {} labels", self.url, scores.len());
        Ok(scores)
    }
}

impl DistributionOracle for InferenceClient {
    async fn score_distribution(&self, text: &str) -> AnalysisResult<Vec<LabelScore>> {
        self.classify(text).await
    }
}

impl LabelOracle for InferenceClient {
    async fn best_label(&self, text: &str) -> AnalysisResult<String> {
        let scores = self.classify(text).await?;
        dominant_label(&scores)
            .map(str::to_string)
            .ok_or_else(|| AnalysisError::annotation_failure("no label returned"))
    }
}

/// Annotator over the two configured hosted models, sharing one HTTP client
pub fn build_sentiment_annotator(
    config: &SentimentConfig,
) -> SentimentAnnotator<InferenceClient, InferenceClient> {
    let client = Client::new();
    let primary = InferenceClient::new(
        client.clone(),
        &config.endpoint,
        &config.primary_model,
        &config.api_token,
    );
    let secondary = InferenceClient::new(
        client,
        &config.endpoint,
        &config.secondary_model,
        &config.api_token,
    );
    SentimentAnnotator::new(primary, secondary)
}

#[derive(Debug, Serialize)]
struct InferenceRequest {
    inputs: String,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

/// Endpoints answer with one list per input, or a flat list for one input
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batched(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl InferenceResponse {
    fn into_scores(self) -> Vec<LabelScore> {
        match self {
            InferenceResponse::Batched(batches) => batches.into_iter().next().unwrap_or_default(),
            InferenceResponse::Flat(scores) => scores,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_batched_response() {
        let json = r#"[[{"label": "positive", "score": 0.8}, {"label": "negative", "score": 0.2}]]"#;
        let response: InferenceResponse = serde_json::from_str(json).unwrap();
        let scores = response.into_scores();
        assert_eq!(scores.len(), 2);
        assert_eq!(dominant_label(&scores), Some("positive"));
    }

    #[test]
    fn test_parse_flat_response() {
        let json = r#"[{"label": "Neutral", "score": 0.6}]"#;
        let response: InferenceResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_scores()[0].label, "Neutral");
    }

    #[test]
    fn test_client_url_joins_model() {
        let client = InferenceClient::new(Client::new(), "https://example.test/models/", "org/model", "t");
        assert_eq!(client.url(), "https://example.test/models/org/model");
    }

    #[tokio::test]
    async fn test_empty_text_fails_before_request() {
        let client = InferenceClient::new(Client::new(), "http://127.0.0.1:9", "m", "t");
        let err = client.classify("").await.unwrap_err();
        assert!(matches!(err, AnalysisError::AnnotationFailure { .. }));
    }

    #[test]
    fn test_config_defaults() {
        let config = SentimentConfig::new("token".to_string());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.primary_model.contains("distilbert"));
        assert!(config.secondary_model.contains("roberta"));
    }
}
