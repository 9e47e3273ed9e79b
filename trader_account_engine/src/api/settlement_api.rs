//! Trade settlement API.

use std::{
    fmt::Debug,
    sync::atomic::{AtomicBool, Ordering},
};

use log::*;
use tas_common::Money;

use crate::{
    api::errors::AccountApiError,
    db_types::{Account, AccountId, LoyaltyTier},
    events::{EventProducers, LoyaltyChangeEvent},
    traits::{AccountStore, AccountStoreError, LoyaltyRules},
};

/// The outcome of pricing a single trade: the loyalty level the account settles at, and whether the trade consumed
/// a banked free trade or incurred a commission.
///
/// A settlement is computed once per trade and can be applied to any revision of the account document. The free
/// trade decrement saturates at zero, so replaying the same settlement against a fresher revision after a write
/// conflict never pushes the free trade count negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub tier: LoyaltyTier,
    pub used_free_trade: bool,
    pub commission: Money,
}

impl Settlement {
    /// Prices one trade for an account at the given loyalty level with `free_trades` banked. A banked free trade
    /// always wins over a commission charge.
    pub fn charge(tier: LoyaltyTier, free_trades: i64) -> Self {
        if free_trades > 0 {
            Self { tier, used_free_trade: true, commission: Money::ZERO }
        } else {
            Self { tier, used_free_trade: false, commission: tier.commission_rate() }
        }
    }

    /// Applies this settlement to an account document. The loyalty level is stamped on, the charge (or free trade
    /// consumption) is booked, and the advertised next commission is brought back in line.
    pub fn apply(&self, account: &mut Account) {
        account.loyalty = self.tier;
        if self.used_free_trade {
            account.free = (account.free - 1).max(0);
        } else {
            account.commissions += self.commission;
            account.balance -= self.commission;
        }
        account.recompute_next_commission();
    }
}

/// The `SettlementApi` settles trades against accounts. Settling a trade re-evaluates the account's loyalty level
/// against the new portfolio total, books the commission for the trade (or consumes a banked free trade), and
/// keeps the advertised next commission consistent with the result.
///
/// The loyalty rule service is treated as an optional collaborator. When it cannot be reached the account keeps
/// its current loyalty level and the trade still settles. The outage is logged once at WARN and thereafter at
/// DEBUG, so a flapping upstream does not flood the logs.
pub struct SettlementApi<B, R> {
    db: B,
    rules: R,
    producers: EventProducers,
    rules_degraded: AtomicBool,
}

impl<B, R> Debug for SettlementApi<B, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SettlementApi")
    }
}

impl<B, R> SettlementApi<B, R> {
    pub fn new(db: B, rules: R, producers: EventProducers) -> Self {
        Self { db, rules, producers, rules_degraded: AtomicBool::new(false) }
    }
}

impl<B, R> SettlementApi<B, R>
where
    B: AccountStore,
    R: LoyaltyRules,
{
    /// Settles one trade against the account with the given id.
    ///
    /// `portfolio_total` is the total value of the owner's portfolio after the trade, and drives the loyalty
    /// re-evaluation. `initiated_by` tags the loyalty change notification with the caller's identity, if known.
    ///
    /// The update is optimistic. If another writer bumps the document revision between our read and our write, the
    /// account is reloaded and the same settlement is applied to the fresh revision, once. A second conflict
    /// surfaces as [`AccountApiError::UnresolvedConflict`] and the caller can decide whether to resubmit.
    pub async fn update_account(
        &self,
        id: &AccountId,
        portfolio_total: Money,
        initiated_by: Option<String>,
    ) -> Result<Account, AccountApiError> {
        let account = self.db.get(id).await?.ok_or_else(|| AccountApiError::NotFound(id.clone()))?;
        let tier = self.determine_loyalty(&account, portfolio_total, initiated_by).await;
        let settlement = Settlement::charge(tier, account.free);
        trace!("📈️ Settling a trade on account {id}: {settlement:?}");
        let mut updated = account;
        settlement.apply(&mut updated);
        let stored = match self.db.put(&updated).await {
            Ok(stored) => stored,
            Err(AccountStoreError::RevisionConflict(_)) => {
                debug!("📈️ Account {id} changed under us. Reloading and settling against the fresh revision.");
                let mut retry = self.db.get(id).await?.ok_or_else(|| AccountApiError::NotFound(id.clone()))?;
                settlement.apply(&mut retry);
                self.db.put(&retry).await?
            },
            Err(e) => return Err(e.into()),
        };
        debug!(
            "📈️ Trade settled on account {id}. {} stands at {} with {} free trades in the bank.",
            stored.owner, stored.balance, stored.free
        );
        Ok(stored)
    }

    /// Asks the loyalty rule service for the level matching `portfolio_total`. On a level change, subscribers to
    /// the loyalty change hook are notified. If the service is unreachable the account's current level stands.
    async fn determine_loyalty(
        &self,
        account: &Account,
        portfolio_total: Money,
        initiated_by: Option<String>,
    ) -> LoyaltyTier {
        match self.rules.evaluate(portfolio_total).await {
            Ok(tier) => {
                if tier != account.loyalty {
                    info!("📈️ Account {} for {} moves from {} to {tier}", account.id, account.owner, account.loyalty);
                    let event = LoyaltyChangeEvent::new(account.owner.clone(), account.loyalty, tier, initiated_by);
                    self.call_loyalty_change_hook(event).await;
                }
                tier
            },
            Err(e) => {
                if !self.rules_degraded.swap(true, Ordering::Relaxed) {
                    warn!(
                        "📈️ The loyalty rule service is unavailable ({e}). Accounts keep their current loyalty \
                         levels until it returns."
                    );
                } else {
                    debug!("📈️ The loyalty rule service is still unavailable. {e}");
                }
                account.loyalty
            },
        }
    }

    async fn call_loyalty_change_hook(&self, event: LoyaltyChangeEvent) {
        for emitter in &self.producers.loyalty_change_producer {
            debug!("📈️ Notifying loyalty change hook subscribers");
            emitter.publish_event(event.clone()).await;
        }
    }
}
