use serde::{Deserialize, Serialize};

use crate::db_types::LoyaltyTier;

/// Announcement that the rule service moved an account to a different loyalty tier.
///
/// The JSON shape (`owner` / `old` / `new` / `id`) is the message the downstream change notifier has always
/// consumed, so the field names are pinned here rather than left to the struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyChangeEvent {
    pub owner: String,
    #[serde(rename = "old")]
    pub old_tier: LoyaltyTier,
    #[serde(rename = "new")]
    pub new_tier: LoyaltyTier,
    /// Who triggered the settlement, when the caller knows. Serialized as `id` for the notifier.
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub initiated_by: Option<String>,
}

impl LoyaltyChangeEvent {
    pub fn new(owner: impl Into<String>, old_tier: LoyaltyTier, new_tier: LoyaltyTier, initiated_by: Option<String>) -> Self {
        Self { owner: owner.into(), old_tier, new_tier, initiated_by }
    }
}
