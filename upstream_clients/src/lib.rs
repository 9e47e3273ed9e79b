//! HTTP clients for the account engine's upstream collaborators.
//!
//! Two small services sit behind the engine's ports: the loyalty rule service, which maps a portfolio total to a
//! loyalty level, and the tone analyzer, which scores feedback text. This crate provides reqwest-backed
//! implementations of both ports ([`LoyaltyRuleClient`] and [`ToneClient`]), plus the environment-driven
//! configuration for reaching them.
//!
//! Both services are best-effort collaborators. The clients map transport failures and non-2xx responses into the
//! engine's `Unavailable` errors, and leave the fail-soft policy (keep the current loyalty level, record feedback
//! without a sentiment) to the engine.

mod config;
mod error;
mod loyalty;
mod tone;

pub use config::UpstreamConfig;
pub use error::UpstreamClientError;
pub use loyalty::LoyaltyRuleClient;
pub use tone::ToneClient;
