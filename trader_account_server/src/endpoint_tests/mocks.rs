use mockall::mock;
use tas_common::Money;
use trader_account_engine::{
    account_objects::AccountSelection,
    db_types::{Account, AccountId, LoyaltyTier, NewAccount},
    traits::{AccountStore, AccountStoreError, LoyaltyRuleError, LoyaltyRules, ToneAnalysis, ToneAnalysisError},
};

mock! {
    pub AccountBackend {}
    impl AccountStore for AccountBackend {
        async fn get(&self, id: &AccountId) -> Result<Option<Account>, AccountStoreError>;
        async fn get_by_owner(&self, owner: &str) -> Result<Option<Account>, AccountStoreError>;
        async fn list(&self, selection: &AccountSelection) -> Result<Vec<Account>, AccountStoreError>;
        async fn insert(&self, account: NewAccount) -> Result<Account, AccountStoreError>;
        async fn put(&self, account: &Account) -> Result<Account, AccountStoreError>;
        async fn delete(&self, id: &AccountId) -> Result<Option<Account>, AccountStoreError>;
    }
}

mock! {
    pub LoyaltyEngine {}
    impl LoyaltyRules for LoyaltyEngine {
        async fn evaluate(&self, portfolio_total: Money) -> Result<LoyaltyTier, LoyaltyRuleError>;
    }
}

mock! {
    pub ToneAnalyzer {}
    impl ToneAnalysis for ToneAnalyzer {
        async fn analyze(&self, text: &str) -> Result<String, ToneAnalysisError>;
    }
}
