use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A selection over stored accounts: an optional owner filter and an optional paging window.
///
/// The rules, which the storage backends must all follow:
/// * With `owners` set, only accounts whose owner is in the list are returned, ordered by owner name. An empty
///   owner list selects nothing.
/// * Without `owners`, every account is eligible and results are ordered by id.
/// * Paging only kicks in when `page_size` is set. `page` is 1-based and defaults to the first page. Values below
///   1 for either field are a caller error and are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountSelection {
    pub owners: Option<Vec<String>>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl AccountSelection {
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn for_owners<I: IntoIterator<Item = S>, S: Into<String>>(mut self, owners: I) -> Self {
        self.owners = Some(owners.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_none() && self.page.is_none() && self.page_size.is_none()
    }
}

impl Display for AccountSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "All accounts.")?;
            return Ok(());
        }
        if let Some(owners) = &self.owners {
            write!(f, "owners: [{}]. ", owners.join(","))?;
        }
        if let Some(page) = &self.page {
            write!(f, "page: {page}. ")?;
        }
        if let Some(page_size) = &self.page_size {
            write!(f, "page_size: {page_size}. ")?;
        }
        Ok(())
    }
}
