//! HTTP client for the remote sentiment scoring API.
//!
//! This module provides the production `Analyzer` implementation: it POSTs
//! review text to an external scoring endpoint and normalizes the response
//! into the analyzer types. It performs no retries; the job worker owns the
//! retry policy.

use crate::error::Error;
use async_trait::async_trait;
use log::*;
use sentiment_ai::{Analysis, Analyzer, Label};
use serde::{Deserialize, Serialize};

/// Request to score a batch of review texts
#[derive(Debug, Serialize)]
pub struct ScoreReviewsRequest {
    pub reviews: Vec<String>,
}

/// Response from the scoring API
#[derive(Debug, Deserialize)]
pub struct ScoreReviewsResponse {
    #[serde(default)]
    pub positive_reviews: Option<Vec<ScoredReview>>,
    #[serde(default)]
    pub negative_reviews: Option<Vec<ScoredReview>>,
    #[serde(default)]
    pub negative_summary: Option<String>,
}

/// One scored review inside a response
#[derive(Debug, Deserialize, Clone)]
pub struct ScoredReview {
    /// Raw label string; normalized through `Label::parse_remote`
    pub label: String,
    pub confidence: f64,
    #[serde(default)]
    pub text: Option<String>,
}

/// Sentiment scoring API client
#[derive(Debug)]
pub struct SentimentApiClient {
    client: reqwest::Client,
    api_url: reqwest::Url,
}

impl SentimentApiClient {
    /// Create a new client for the given scoring endpoint URL.
    /// The URL is validated up front so a misconfiguration fails at startup
    /// rather than on the first job.
    pub fn new(api_url: &str) -> Result<Self, Error> {
        let api_url = reqwest::Url::parse(api_url).map_err(|e| {
            Error::from(sentiment_ai::Error::Configuration(format!(
                "invalid sentiment API URL '{api_url}': {e}"
            )))
        })?;

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self { client, api_url })
    }
}

#[async_trait]
impl Analyzer for SentimentApiClient {
    async fn analyze(&self, text: &str) -> Result<Analysis, sentiment_ai::Error> {
        if text.trim().is_empty() {
            return Err(sentiment_ai::Error::EmptyInput);
        }

        debug!(
            "Scoring review text ({} chars) via {}",
            text.len(),
            self.api_url
        );

        let response = self
            .client
            .post(self.api_url.clone())
            .json(&ScoreReviewsRequest {
                reviews: vec![text.to_string()],
            })
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to call sentiment API: {:?}", e);
                sentiment_ai::Error::Network(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Sentiment API: {} {}", status, error_text);
            return Err(sentiment_ai::Error::Provider(format!(
                "{} {}",
                status, error_text
            )));
        }

        let body: ScoreReviewsResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse sentiment API response: {:?}", e);
            sentiment_ai::Error::InvalidResponse(e.to_string())
        })?;

        let negative_summary = body.negative_summary.clone();

        // The API buckets results; a single-text request yields exactly one
        // scored entry in one of the two arrays.
        let scored = body
            .positive_reviews
            .as_ref()
            .and_then(|reviews| reviews.first())
            .or_else(|| {
                body.negative_reviews
                    .as_ref()
                    .and_then(|reviews| reviews.first())
            })
            .ok_or_else(|| {
                sentiment_ai::Error::InvalidResponse(
                    "no sentiment results in response".to_string(),
                )
            })?;

        let label = Label::parse_remote(&scored.label).ok_or_else(|| {
            sentiment_ai::Error::InvalidResponse(format!(
                "unrecognized label '{}'",
                scored.label
            ))
        })?;

        Ok(Analysis::new(label, scored.confidence, negative_summary))
    }

    fn analyzer_id(&self) -> &str {
        "remote"
    }
}
