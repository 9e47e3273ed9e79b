//! # Trader account server
//! This module hosts the REST front end for the trader account service. It is responsible for:
//! Listening for incoming account requests from the trading front end.
//! Translating paths, query strings and JSON bodies into account engine calls.
//! Mapping engine errors onto HTTP status codes with a JSON error body.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/accounts` and friends: account lifecycle, trade settlement and feedback. See [routes] for the full set.

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
