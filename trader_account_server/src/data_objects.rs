use serde::{Deserialize, Serialize};
use trader_account_engine::account_objects::AccountSelection;

/// Query parameters for the trade settlement endpoint. `total` is the portfolio total after the trade, in dollars.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UpdateAccountParams {
    pub total: f64,
}

/// Body of a feedback submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub text: String,
}

/// Query parameters for the account listing endpoint. `owners` is a comma-separated list of owner names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub owners: Option<String>,
}

impl AccountListParams {
    /// Converts the raw query parameters into an [`AccountSelection`].
    ///
    /// Owner names are trimmed and blank entries are dropped, so `owners=alice,,bob` filters on two owners while
    /// `owners=` (present but blank) asks for an empty owner set, which matches nothing.
    pub fn to_selection(&self) -> AccountSelection {
        let mut selection = AccountSelection::default();
        if let Some(page) = self.page {
            selection = selection.with_page(page);
        }
        if let Some(page_size) = self.page_size {
            selection = selection.with_page_size(page_size);
        }
        if let Some(owners) = &self.owners {
            let owners = owners.split(',').map(str::trim).filter(|s| !s.is_empty());
            selection = selection.for_owners(owners);
        }
        selection
    }
}
