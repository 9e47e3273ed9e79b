use thiserror::Error;

use crate::{
    api::account_objects::AccountSelection,
    db_types::{Account, AccountId, NewAccount},
};

#[derive(Debug, Clone, Error)]
pub enum AccountStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("No account exists with id {0}")]
    AccountNotFound(AccountId),
    #[error("Stale revision writing account {0}")]
    RevisionConflict(AccountId),
    #[error("User error constructing query: {0}")]
    QueryError(String),
}

impl From<sqlx::Error> for AccountStoreError {
    fn from(e: sqlx::Error) -> Self {
        AccountStoreError::DatabaseError(e.to_string())
    }
}

/// The storage port for account documents.
///
/// The contract is that of a document store:
/// * [`AccountStore::insert`] assigns the id and the first revision, and applies the standard opening values.
/// * [`AccountStore::put`] replaces the whole document, but only if the caller presents the revision it read.
///   A stale revision yields [`AccountStoreError::RevisionConflict`]; it is the caller's job to decide whether to
///   reload and retry.
/// * Owners are *not* unique at this level. Duplicate detection is a read-before-insert concern of the API layer,
///   exactly as it would be against a document database without unique secondary indexes.
#[allow(async_fn_in_trait)]
pub trait AccountStore {
    /// Fetches the account with the given id, or `None` if it does not exist.
    async fn get(&self, id: &AccountId) -> Result<Option<Account>, AccountStoreError>;

    /// Fetches the first account owned by `owner` (ordered by id, so repeat calls agree), or `None`.
    async fn get_by_owner(&self, owner: &str) -> Result<Option<Account>, AccountStoreError>;

    /// Fetches the accounts matching `selection`. See [`AccountSelection`] for the paging and filter rules.
    async fn list(&self, selection: &AccountSelection) -> Result<Vec<Account>, AccountStoreError>;

    /// Creates a new account document and returns it, with the store-assigned id and revision filled in.
    async fn insert(&self, account: NewAccount) -> Result<Account, AccountStoreError>;

    /// Replaces the stored document, enforcing the revision check. Returns the stored account with its new
    /// revision.
    async fn put(&self, account: &Account) -> Result<Account, AccountStoreError>;

    /// Deletes the account with the given id, returning the deleted document, or `None` if there was nothing to
    /// delete.
    async fn delete(&self, id: &AccountId) -> Result<Option<Account>, AccountStoreError>;
}
