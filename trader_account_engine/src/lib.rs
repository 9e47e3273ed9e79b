//! Trader Account Engine
//!
//! The trader account engine holds the core logic for a trading app's account service: account documents and the
//! bookkeeping rules for settling trades against them. It is front-end agnostic; the REST server is a thin layer
//! over the APIs in this crate.
//!
//! The library is divided into two main sections:
//! 1. Storage ([`mod@sqlite`] and the [`traits::AccountStore`] port). Accounts are kept as whole documents with a
//!    revision counter, and any store that can honor the revision check on replacement can act as a backend.
//!    You should never need to access the database directly. The data types that cross the storage boundary live
//!    in the `db_types` module and are public.
//! 2. The engine public API ([`AccountApi`], [`SettlementApi`] and [`FeedbackApi`]). These cover the account
//!    lifecycle, trade settlement with its loyalty and commission rules, and feedback scoring. The settlement and
//!    feedback APIs lean on two further ports, [`traits::LoyaltyRules`] and [`traits::ToneAnalysis`], for the
//!    upstream services they consult.
//!
//! The engine also emits events that can be subscribed to. When a trade settlement moves an account to a different
//! loyalty level, a `LoyaltyChangeEvent` is published. A simple actor framework is used so that you can easily
//! hook into these events and perform custom actions.
mod api;

pub mod db_types;
pub mod events;
pub mod helpers;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;

pub use api::{
    account_objects,
    accounts_api::AccountApi,
    errors::AccountApiError,
    feedback_api::FeedbackApi,
    settlement_api::{Settlement, SettlementApi},
};
