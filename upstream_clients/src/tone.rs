use std::{sync::Arc, time::Duration};

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde::{Deserialize, Serialize};
use tas_common::Secret;
use trader_account_engine::traits::{ToneAnalysis, ToneAnalysisError};

use crate::{config::UpstreamConfig, error::UpstreamClientError};

/// Request body for the tone analyzer: just the raw feedback text.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ToneQuery<'a> {
    pub text: &'a str,
}

/// Response body from the tone analyzer. The sentiment is free text ("Anger", "Satisfied", ...); the engine
/// attaches meaning to it, not this client.
#[derive(Debug, Clone, Deserialize)]
pub struct ToneScore {
    pub sentiment: String,
}

/// Client for the tone analysis service.
#[derive(Clone)]
pub struct ToneClient {
    url: String,
    user: String,
    password: Secret<String>,
    client: Arc<Client>,
}

impl ToneClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamClientError> {
        let mut headers = HeaderMap::with_capacity(2);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UpstreamClientError::Initialization(e.to_string()))?;
        Ok(Self {
            url: config.tone_url.clone(),
            user: config.tone_user.clone(),
            password: config.tone_password.clone(),
            client: Arc::new(client),
        })
    }
}

impl ToneAnalysis for ToneClient {
    async fn analyze(&self, text: &str) -> Result<String, ToneAnalysisError> {
        let query = ToneQuery { text };
        trace!("🎭️ Sending {} characters of feedback to {}", text.len(), self.url);
        let mut req = self.client.post(&self.url).json(&query);
        if !self.user.is_empty() {
            req = req.basic_auth(&self.user, Some(self.password.reveal()));
        }
        let response = req.send().await.map_err(|e| ToneAnalysisError::Unavailable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ToneAnalysisError::Unavailable(format!("The tone analyzer returned {}", response.status())));
        }
        let score = response.json::<ToneScore>().await.map_err(|e| ToneAnalysisError::InvalidResponse(e.to_string()))?;
        trace!("🎭️ The feedback came across as {}", score.sentiment);
        Ok(score.sentiment)
    }
}
