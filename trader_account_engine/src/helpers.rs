//! Helper functions for the account engine.

use rand::Rng;

use crate::db_types::AccountId;

/// Generates a fresh account id: 32 lowercase hex characters of randomness, in the style of a document store's
/// auto-assigned keys.
pub fn new_account_id() -> AccountId {
    let id: u128 = rand::thread_rng().gen();
    AccountId(format!("{id:032x}"))
}
