//! # SQLite Database methods
//!
//! This module contains "low-level" SQLite database interactions.
//!
//! All these interactions are maintained by simple functions (rather than stateful structs) that accept a
//! `&mut SqliteConnection` argument. Callers can obtain a connection from a pool,
//! or create an atomic transaction as the need arises and call through to the functions without any other changes.
use std::env;

use log::info;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Error as SqlxError, Sqlite, SqlitePool};

pub mod accounts;

const SQLITE_DB_URL: &str = "sqlite://data/trader_accounts.db";

pub fn db_url() -> String {
    let result = env::var("TAS_DATABASE_URL").unwrap_or_else(|_| {
        info!("TAS_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("Using database URL: {result}");
    result
}

/// Opens a connection pool against `url`. At least one connection is held open for the life of the pool, so that
/// in-memory databases keep their contents.
pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let pool =
        SqlitePoolOptions::new().min_connections(1).max_connections(max_connections).connect(url).await?;
    Ok(pool)
}

/// Creates the database at `url` if it does not exist yet. Existing databases are left alone.
pub async fn create_database(url: &str) -> Result<(), SqlxError> {
    if Sqlite::database_exists(url).await? {
        return Ok(());
    }
    Sqlite::create_database(url).await?;
    info!("Created Sqlite database {url}");
    Ok(())
}
