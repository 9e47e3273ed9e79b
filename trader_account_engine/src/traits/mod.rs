//! Interface contracts for the account engine's collaborators.
//!
//! The engine treats everything beyond its own process as a port:
//!
//! * [`AccountStore`] is the storage port. It has document-store semantics: opaque ids, full-document writes, and
//!   revision-checked updates. The bundled SQLite backend implements it, and anything else that can honour the
//!   revision contract can be swapped in.
//! * [`LoyaltyRules`] asks the external rule service which loyalty tier a portfolio total deserves.
//! * [`ToneAnalysis`] asks the external tone service for the dominant sentiment of a piece of feedback text.
//!
//! Each port carries its own error enum so callers can tell a broken dependency from a broken request.
mod account_store;
mod loyalty_rules;
mod tone_analysis;

pub use account_store::{AccountStore, AccountStoreError};
pub use loyalty_rules::{LoyaltyRuleError, LoyaltyRules};
pub use tone_analysis::{ToneAnalysis, ToneAnalysisError};
