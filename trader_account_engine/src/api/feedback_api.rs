//! Feedback and tone analysis API.

use std::{
    fmt::Debug,
    sync::atomic::{AtomicBool, Ordering},
};

use log::*;

use crate::{
    api::errors::AccountApiError,
    db_types::{AccountId, Feedback, UNKNOWN_SENTIMENT},
    traits::{AccountStore, ToneAnalysis},
};

/// The `FeedbackApi` takes free-text feedback from account owners, runs it through tone analysis, and awards free
/// trades based on the detected tone. Angry customers get a more generous award, the idea being that a free trade
/// or three is cheaper than a churned customer.
///
/// Like the loyalty rule service, the tone analyzer is an optional collaborator. When it cannot be reached the
/// feedback is still recorded, with the sentiment marked as unknown and no free trades awarded. The outage is
/// logged once at WARN and thereafter at DEBUG.
pub struct FeedbackApi<B, S> {
    db: B,
    tones: S,
    tone_degraded: AtomicBool,
}

impl<B, S> Debug for FeedbackApi<B, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FeedbackApi")
    }
}

impl<B, S> FeedbackApi<B, S> {
    pub fn new(db: B, tones: S) -> Self {
        Self { db, tones, tone_degraded: AtomicBool::new(false) }
    }
}

impl<B, S> FeedbackApi<B, S>
where
    B: AccountStore,
    S: ToneAnalysis,
{
    /// Submits feedback text on behalf of the account with the given id.
    ///
    /// The text is scored by the tone analyzer, the award for the resulting sentiment is banked on the account,
    /// and the sentiment is stored as the account's most recent one. The returned [`Feedback`] carries the message
    /// to show the customer and the number of free trades awarded.
    pub async fn submit_feedback(&self, id: &AccountId, text: &str) -> Result<Feedback, AccountApiError> {
        let mut account = self.db.get(id).await?.ok_or_else(|| AccountApiError::NotFound(id.clone()))?;
        let sentiment = match self.tones.analyze(text).await {
            Ok(sentiment) => sentiment,
            Err(e) => {
                if !self.tone_degraded.swap(true, Ordering::Relaxed) {
                    warn!("💬️ The tone analyzer is unavailable ({e}). Feedback is recorded without a sentiment.");
                } else {
                    debug!("💬️ The tone analyzer is still unavailable. {e}");
                }
                UNKNOWN_SENTIMENT.to_string()
            },
        };
        let feedback = Feedback::from_sentiment(&sentiment);
        account.free += feedback.free;
        account.sentiment = sentiment;
        account.recompute_next_commission();
        let stored = self.db.put(&account).await?;
        debug!(
            "💬️ Feedback from {} came across as {}. {} free trade(s) awarded.",
            stored.owner, stored.sentiment, feedback.free
        );
        Ok(feedback)
    }
}
