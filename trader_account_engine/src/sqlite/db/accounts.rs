//! Low-level queries over the `accounts` table.
//!
//! Each account is one row, carrying its own revision counter. Writes that replace a document must present the
//! revision they read; the `WHERE rev = ?` guard is what turns a lost update into a visible conflict.

use log::trace;
use sqlx::{QueryBuilder, SqliteConnection};
use tas_common::Money;

use crate::{
    api::account_objects::AccountSelection,
    db_types::{Account, AccountId, LoyaltyTier, NewAccount, DEFAULT_OPENING_BALANCE, UNKNOWN_SENTIMENT},
    helpers::new_account_id,
    traits::AccountStoreError,
};

/// Inserts a brand-new account document for the given owner, with the standard opening values, and returns the
/// stored document. The id is assigned here.
pub async fn insert_account(account: NewAccount, conn: &mut SqliteConnection) -> Result<Account, AccountStoreError> {
    let id = new_account_id();
    let tier = LoyaltyTier::default();
    let account = sqlx::query_as::<_, Account>(
        r#"INSERT INTO accounts (id, owner, loyalty, balance, commissions, free, sentiment, next_commission)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *"#,
    )
    .bind(id.to_string())
    .bind(account.owner)
    .bind(tier.to_string())
    .bind(DEFAULT_OPENING_BALANCE.value())
    .bind(Money::ZERO.value())
    .bind(0i64)
    .bind(UNKNOWN_SENTIMENT)
    .bind(tier.commission_rate().value())
    .fetch_one(conn)
    .await?;
    trace!("📝️ Account {} created for {}", account.id, account.owner);
    Ok(account)
}

pub async fn fetch_account_by_id(
    id: &AccountId,
    conn: &mut SqliteConnection,
) -> Result<Option<Account>, AccountStoreError> {
    let account = sqlx::query_as("SELECT * FROM accounts WHERE id = $1")
        .bind(id.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(account)
}

/// Fetches the account held by `owner`. Owners are not unique at the schema level, so if duplicates have crept in,
/// the one with the smallest id wins and repeat calls agree.
pub async fn fetch_account_by_owner(
    owner: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Account>, AccountStoreError> {
    let account = sqlx::query_as("SELECT * FROM accounts WHERE owner = $1 ORDER BY id LIMIT 1")
        .bind(owner)
        .fetch_optional(conn)
        .await?;
    Ok(account)
}

/// Fetches accounts according to the criteria specified in the `AccountSelection`.
///
/// With an owner filter the results are ordered by owner name; without one, by id. Paging applies on top of
/// whichever ordering is in play.
pub async fn fetch_accounts(
    selection: &AccountSelection,
    conn: &mut SqliteConnection,
) -> Result<Vec<Account>, AccountStoreError> {
    if let Some(page) = selection.page {
        if page < 1 {
            return Err(AccountStoreError::QueryError(format!("page must be 1 or greater, not {page}")));
        }
    }
    if let Some(page_size) = selection.page_size {
        if page_size < 1 {
            return Err(AccountStoreError::QueryError(format!("page_size must be 1 or greater, not {page_size}")));
        }
    }
    if selection.owners.as_ref().map(|owners| owners.is_empty()).unwrap_or(false) {
        return Ok(Vec::new());
    }
    let mut builder = QueryBuilder::new("SELECT * FROM accounts");
    if let Some(owners) = &selection.owners {
        builder.push(" WHERE owner IN (");
        let mut owner_list = builder.separated(", ");
        for owner in owners {
            owner_list.push_bind(owner.as_str());
        }
        builder.push(") ORDER BY owner ASC");
    } else {
        builder.push(" ORDER BY id ASC");
    }
    if let Some(page_size) = selection.page_size {
        let page = selection.page.unwrap_or(1);
        builder.push(" LIMIT ");
        builder.push_bind(page_size);
        builder.push(" OFFSET ");
        builder.push_bind((page - 1) * page_size);
    }
    trace!("🗃️ Executing query: {}", builder.sql());
    let query = builder.build_query_as::<Account>();
    let accounts = query.fetch_all(conn).await?;
    trace!("🗃️ Result of fetch_accounts: {}", accounts.len());
    Ok(accounts)
}

/// Replaces the stored account document, guarded by the revision check.
///
/// The write only lands if the stored revision still matches the one the caller read; on success the revision is
/// bumped and the fresh document is returned. A miss is disambiguated with a follow-up read: either the document
/// is gone, or another writer got in first.
pub async fn update_account(account: &Account, conn: &mut SqliteConnection) -> Result<Account, AccountStoreError> {
    let updated = sqlx::query_as::<_, Account>(
        r#"UPDATE accounts SET
            rev = rev + 1,
            owner = $1,
            loyalty = $2,
            balance = $3,
            commissions = $4,
            free = $5,
            sentiment = $6,
            next_commission = $7,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = $8 AND rev = $9 RETURNING *"#,
    )
    .bind(account.owner.as_str())
    .bind(account.loyalty.to_string())
    .bind(account.balance.value())
    .bind(account.commissions.value())
    .bind(account.free)
    .bind(account.sentiment.as_str())
    .bind(account.next_commission.value())
    .bind(account.id.as_str())
    .bind(account.rev)
    .fetch_optional(&mut *conn)
    .await?;
    match updated {
        Some(stored) => {
            trace!("📝️ Account {} now at rev {}", stored.id, stored.rev);
            Ok(stored)
        },
        None => match fetch_account_by_id(&account.id, conn).await? {
            Some(_) => Err(AccountStoreError::RevisionConflict(account.id.clone())),
            None => Err(AccountStoreError::AccountNotFound(account.id.clone())),
        },
    }
}

pub async fn delete_account(
    id: &AccountId,
    conn: &mut SqliteConnection,
) -> Result<Option<Account>, AccountStoreError> {
    let deleted = sqlx::query_as::<_, Account>("DELETE FROM accounts WHERE id = $1 RETURNING *")
        .bind(id.as_str())
        .fetch_optional(conn)
        .await?;
    if let Some(account) = &deleted {
        trace!("📝️ Account {} for {} deleted", account.id, account.owner);
    }
    Ok(deleted)
}
