//! # Account engine public API
//!
//! The `api` module exposes the programmatic API for the account engine. It is modular, so that clients of the API
//! can pick and choose the functionality they want -- a reporting tool might only construct an [`AccountApi`],
//! while the full server wires up all three.
//!
//! * [`accounts_api`] provides the account lifecycle: creation (with the owner guards), lookups, listing and
//!   deletion.
//! * [`settlement_api`] handles trade settlement: loyalty re-determination, commission charging and the single
//!   conflict retry.
//! * [`feedback_api`] runs feedback text through tone analysis and awards free trades.
//!
//! The pattern for using the APIs is the same throughout: an API instance is created by supplying backends that
//! implement the traits the API needs.
//!
//! ```rust,ignore
//! use trader_account_engine::{AccountApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/accounts.db", 5).await?;
//! // SqliteDatabase implements AccountStore
//! let api = AccountApi::new(db);
//! let account = api.account_by_owner("alice").await?;
//! ```

pub mod account_objects;
pub mod accounts_api;
pub mod errors;
pub mod feedback_api;
pub mod settlement_api;
