//! Data objects for the account engine.
//!
//! These are the types that cross the storage port and the REST boundary. Monetary fields use [`Money`] (integer
//! cents) so settlement arithmetic is exact; the serde impls render them as dollar numbers on the wire.
use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use tas_common::Money;

/// Opening balance granted to every new account.
pub const DEFAULT_OPENING_BALANCE: Money = Money::from_cents(5_000);
/// Commission projected for a brand-new account (the Basic rate).
pub const DEFAULT_NEXT_COMMISSION: Money = LoyaltyTier::Basic.commission_rate();
/// Sentiment recorded before any feedback has been analyzed, and when the tone service is unreachable.
pub const UNKNOWN_SENTIMENT: &str = "Unknown";

//--------------------------------------      LoyaltyTier      -------------------------------------------------------

/// The loyalty tiers the rule service can assign to an account.
///
/// The rule service answers with free-form labels (often in all caps), so parsing is case-insensitive and anything
/// that is not a known tier collapses to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
pub enum LoyaltyTier {
    Basic,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Unknown,
}

impl LoyaltyTier {
    /// The commission charged per trade at this tier. Tiers we do not recognise are charged the top rate.
    pub const fn commission_rate(self) -> Money {
        match self {
            LoyaltyTier::Bronze => Money::from_cents(899),
            LoyaltyTier::Silver => Money::from_cents(799),
            LoyaltyTier::Gold => Money::from_cents(699),
            LoyaltyTier::Platinum => Money::from_cents(599),
            LoyaltyTier::Basic | LoyaltyTier::Unknown => Money::from_cents(999),
        }
    }
}

impl Default for LoyaltyTier {
    fn default() -> Self {
        Self::Basic
    }
}

impl Display for LoyaltyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoyaltyTier::Basic => write!(f, "Basic"),
            LoyaltyTier::Bronze => write!(f, "Bronze"),
            LoyaltyTier::Silver => write!(f, "Silver"),
            LoyaltyTier::Gold => write!(f, "Gold"),
            LoyaltyTier::Platinum => write!(f, "Platinum"),
            LoyaltyTier::Unknown => write!(f, "Unknown"),
        }
    }
}

impl From<&str> for LoyaltyTier {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "basic" => Self::Basic,
            "bronze" => Self::Bronze,
            "silver" => Self::Silver,
            "gold" => Self::Gold,
            "platinum" => Self::Platinum,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for LoyaltyTier {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

//--------------------------------------       AccountId       -------------------------------------------------------

/// The opaque identifier the store assigns to an account document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct AccountId(pub String);

impl FromStr for AccountId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------        Account        -------------------------------------------------------

/// An account document.
///
/// `rev` is the store's revision counter and is deliberately excluded from the JSON representation; clients never
/// see or supply it. `next_commission` must equal `$0.00` whenever `free > 0` and the tier's rate otherwise --
/// call [`Account::recompute_next_commission`] after changing either input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    #[serde(skip)]
    pub rev: i64,
    pub owner: String,
    pub loyalty: LoyaltyTier,
    pub balance: Money,
    pub commissions: Money,
    pub free: i64,
    pub sentiment: String,
    pub next_commission: Money,
}

impl Account {
    pub fn recompute_next_commission(&mut self) {
        self.next_commission = if self.free > 0 { Money::ZERO } else { self.loyalty.commission_rate() };
    }
}

//--------------------------------------       NewAccount      -------------------------------------------------------

/// A request to open an account. Everything except the owner is set to the standard opening values by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    pub owner: String,
}

impl NewAccount {
    pub fn new<S: Into<String>>(owner: S) -> Self {
        Self { owner: owner.into() }
    }
}

//--------------------------------------        Feedback       -------------------------------------------------------

/// The outcome of a feedback submission: a message for the client and the number of free trades awarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub message: String,
    pub free: i64,
}

impl Feedback {
    /// Maps a detected sentiment onto the free-trade award policy. `Unknown` covers tone-service failures, so it
    /// awards nothing; an angry customer gets the most generous consolation.
    pub fn from_sentiment(sentiment: &str) -> Self {
        match sentiment {
            "Anger" => Self { message: "We're sorry you are upset.  Have three free trades on us!".to_string(), free: 3 },
            "Unknown" => Self { message: "Error communicating with the tone analyzer".to_string(), free: 0 },
            _ => Self { message: "Thanks for providing feedback.  Have a free trade on us!".to_string(), free: 1 },
        }
    }
}
