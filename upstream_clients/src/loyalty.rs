use std::{sync::Arc, time::Duration};

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde::{Deserialize, Serialize};
use tas_common::{Money, Secret};
use trader_account_engine::{
    db_types::LoyaltyTier,
    traits::{LoyaltyRuleError, LoyaltyRules},
};

use crate::{config::UpstreamConfig, error::UpstreamClientError};

/// Request body for the loyalty rule service. The determination is keyed off the total value of the owner's
/// portfolio, sent in dollars.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LoyaltyQuery {
    #[serde(rename = "tradeTotal")]
    pub trade_total: f64,
}

/// Response body from the loyalty rule service. The level arrives as free text and is folded into a
/// [`LoyaltyTier`] case-insensitively.
#[derive(Debug, Clone, Deserialize)]
pub struct LoyaltyLevel {
    pub loyalty: String,
}

/// Client for the loyalty rule service.
#[derive(Clone)]
pub struct LoyaltyRuleClient {
    url: String,
    user: String,
    password: Secret<String>,
    client: Arc<Client>,
}

impl LoyaltyRuleClient {
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
            url: config.loyalty_url.clone(),
            user: config.loyalty_user.clone(),
            password: config.loyalty_password.clone(),
            client: Arc::new(client),
        })
    }
}

impl LoyaltyRules for LoyaltyRuleClient {
    async fn evaluate(&self, portfolio_total: Money) -> Result<LoyaltyTier, LoyaltyRuleError> {
        let query = LoyaltyQuery { trade_total: portfolio_total.as_dollars() };
        trace!("🏅️ Asking {} for the level matching {portfolio_total}", self.url);
        let mut req = self.client.post(&self.url).json(&query);
        if !self.user.is_empty() {
            req = req.basic_auth(&self.user, Some(self.password.reveal()));
        }
        let response = req.send().await.map_err(|e| LoyaltyRuleError::Unavailable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(LoyaltyRuleError::Unavailable(format!(
                "The loyalty rule service returned {}",
                response.status()
            )));
        }
        let level =
            response.json::<LoyaltyLevel>().await.map_err(|e| LoyaltyRuleError::InvalidResponse(e.to_string()))?;
        let tier = LoyaltyTier::from(level.loyalty.as_str());
        trace!("🏅️ A portfolio of {portfolio_total} maps to {tier}");
        Ok(tier)
    }
}
