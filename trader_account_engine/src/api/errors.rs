use thiserror::Error;

use crate::{db_types::AccountId, traits::AccountStoreError};

#[derive(Debug, Clone, Error)]
pub enum AccountApiError {
    #[error("'{0}' is not a valid account owner")]
    InvalidOwner(String),
    #[error("An account for owner '{0}' already exists")]
    DuplicateOwner(String),
    #[error("No account exists with id {0}")]
    NotFound(AccountId),
    #[error("Could not settle the trade against account {0}. Another writer kept getting there first.")]
    UnresolvedConflict(AccountId),
    #[error(transparent)]
    Store(AccountStoreError),
}

impl From<AccountStoreError> for AccountApiError {
    fn from(e: AccountStoreError) -> Self {
        match e {
            AccountStoreError::AccountNotFound(id) => AccountApiError::NotFound(id),
            AccountStoreError::RevisionConflict(id) => AccountApiError::UnresolvedConflict(id),
            e => AccountApiError::Store(e),
        }
    }
}
