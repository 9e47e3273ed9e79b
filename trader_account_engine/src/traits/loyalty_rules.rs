use tas_common::Money;
use thiserror::Error;

use crate::db_types::LoyaltyTier;

#[derive(Debug, Clone, Error)]
pub enum LoyaltyRuleError {
    #[error("Could not reach the loyalty rule service: {0}")]
    Unavailable(String),
    #[error("The loyalty rule service returned an unusable response: {0}")]
    InvalidResponse(String),
}

/// The port to the external rule service that decides loyalty tiers.
///
/// Implementations must not apply any fallback of their own: when the service cannot be reached or answers
/// garbage, return the error and let the settlement flow keep the account's last-known-good tier.
#[allow(async_fn_in_trait)]
pub trait LoyaltyRules {
    /// Determines the loyalty tier for the given total portfolio value.
    async fn evaluate(&self, portfolio_total: Money) -> Result<LoyaltyTier, LoyaltyRuleError>;
}
