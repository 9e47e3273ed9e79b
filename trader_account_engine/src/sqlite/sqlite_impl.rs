//! `SqliteDatabase` is a concrete implementation of the account store backend.
//!
//! Unsurprisingly, it uses SQLite as the backend. Every account lives in a single row that carries its own
//! revision counter, which is what [`AccountStore::put`] uses to detect concurrent writers.
use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::db::{accounts, db_url, new_pool};
use crate::{
    api::account_objects::AccountSelection,
    db_types::{Account, AccountId, NewAccount},
    traits::{AccountStore, AccountStoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Brings the schema up to date, running any migrations that have not been applied yet.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🚀️ Migrations complete");
        Ok(())
    }
}

impl AccountStore for SqliteDatabase {
    async fn get(&self, id: &AccountId) -> Result<Option<Account>, AccountStoreError> {
        let mut conn = self.pool.acquire().await?;
        let account = accounts::fetch_account_by_id(id, &mut conn).await?;
        Ok(account)
    }

    async fn get_by_owner(&self, owner: &str) -> Result<Option<Account>, AccountStoreError> {
        let mut conn = self.pool.acquire().await?;
        let account = accounts::fetch_account_by_owner(owner, &mut conn).await?;
        Ok(account)
    }

    async fn list(&self, selection: &AccountSelection) -> Result<Vec<Account>, AccountStoreError> {
        let mut conn = self.pool.acquire().await?;
        let accounts = accounts::fetch_accounts(selection, &mut conn).await?;
        Ok(accounts)
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, AccountStoreError> {
        let mut conn = self.pool.acquire().await?;
        let account = accounts::insert_account(account, &mut conn).await?;
        debug!("🗃️ Account {} has been saved in the DB for {}", account.id, account.owner);
        Ok(account)
    }

    async fn put(&self, account: &Account) -> Result<Account, AccountStoreError> {
        let mut conn = self.pool.acquire().await?;
        let stored = accounts::update_account(account, &mut conn).await?;
        Ok(stored)
    }

    async fn delete(&self, id: &AccountId) -> Result<Option<Account>, AccountStoreError> {
        let mut conn = self.pool.acquire().await?;
        let deleted = accounts::delete_account(id, &mut conn).await?;
        Ok(deleted)
    }
}
