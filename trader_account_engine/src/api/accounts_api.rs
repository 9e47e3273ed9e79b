//! Account lifecycle API.

use std::fmt::Debug;

use log::*;

use crate::{
    api::{account_objects::AccountSelection, errors::AccountApiError},
    db_types::{Account, AccountId, NewAccount},
    traits::AccountStore,
};

/// The `AccountApi` covers the account lifecycle: opening accounts, looking them up, listing and closing them.
/// Trade settlement and feedback have their own APIs.
pub struct AccountApi<B> {
    db: B,
}

impl<B: Debug> Debug for AccountApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccountApi ({:?})", self.db)
    }
}

impl<B> AccountApi<B>
where B: AccountStore
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Opens a new account for `owner` with the standard opening balance and loyalty level.
    ///
    /// The owner name is trimmed first. A blank owner, or the reserved name `FAIL` (any casing), is rejected
    /// without touching the store. Owners hold at most one account, so if a lookup finds an existing account for
    /// this owner the call fails with [`AccountApiError::DuplicateOwner`].
    pub async fn create_account(&self, owner: &str) -> Result<Account, AccountApiError> {
        let owner = owner.trim();
        if owner.is_empty() || owner.eq_ignore_ascii_case("fail") {
            return Err(AccountApiError::InvalidOwner(owner.to_string()));
        }
        if let Some(existing) = self.db.get_by_owner(owner).await? {
            debug!("🧾️ Refusing to open a second account for {owner}. They already hold {}.", existing.id);
            return Err(AccountApiError::DuplicateOwner(owner.to_string()));
        }
        let account = self.db.insert(NewAccount::new(owner)).await?;
        debug!("🧾️ Opened account {} for {owner}", account.id);
        Ok(account)
    }

    /// Fetches the account with the given id. If no account exists, `None` is returned.
    pub async fn account_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountApiError> {
        let account = self.db.get(id).await?;
        Ok(account)
    }

    /// Fetches the account held by `owner`. If no account exists, `None` is returned.
    pub async fn account_by_owner(&self, owner: &str) -> Result<Option<Account>, AccountApiError> {
        let account = self.db.get_by_owner(owner).await?;
        Ok(account)
    }

    /// Fetches the accounts matching `selection`. See [`AccountSelection`] for the filter and paging rules.
    pub async fn fetch_accounts(&self, selection: &AccountSelection) -> Result<Vec<Account>, AccountApiError> {
        trace!("🧾️ Fetching accounts. {selection}");
        let accounts = self.db.list(selection).await?;
        Ok(accounts)
    }

    /// Closes the account with the given id, returning the final state of the deleted document.
    pub async fn delete_account(&self, id: &AccountId) -> Result<Account, AccountApiError> {
        let deleted = self.db.delete(id).await?.ok_or_else(|| AccountApiError::NotFound(id.clone()))?;
        info!("🧾️ Closed account {} for {}", deleted.id, deleted.owner);
        Ok(deleted)
    }
}
