use actix_web::{http::StatusCode, web, web::ServiceConfig};
use tas_common::Money;
use trader_account_engine::{
    db_types::{Account, AccountId, LoyaltyTier, UNKNOWN_SENTIMENT},
    events::EventProducers,
    traits::{AccountStoreError, LoyaltyRuleError},
    AccountApi,
    SettlementApi,
};

use super::{
    helpers::{delete_request, get_request, post_request, put_request},
    mocks::{MockAccountBackend, MockLoyaltyEngine},
};
use crate::routes::{
    AccountByIdRoute,
    AccountByOwnerRoute,
    CreateAccountRoute,
    DeleteAccountRoute,
    ListAccountsRoute,
    UpdateAccountRoute,
};

const ALICE_ID: &str = "c0ffee00c0ffee00c0ffee00c0ffee00";

#[actix_web::test]
async fn fetch_account_by_id() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request(&format!("/accounts/{ALICE_ID}"), configure_alice).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    let account: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(account["id"], ALICE_ID);
    assert_eq!(account["owner"], "alice");
    assert_eq!(account["loyalty"], "Basic");
    assert_eq!(account["balance"], 50.0);
    assert_eq!(account["nextCommission"], 9.99);
    // The revision counter is the store's business and never goes over the wire
    assert!(account.get("rev").is_none());
}

#[actix_web::test]
async fn fetch_account_by_owner() {
    let (status, body) = get_request("/accounts/owner/alice", configure_alice).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    let account: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(account["id"], ALICE_ID);
    assert_eq!(account["owner"], "alice");
}

#[actix_web::test]
async fn fetch_missing_account_is_a_404() {
    let (status, body) = get_request(&format!("/accounts/{ALICE_ID}"), configure_missing_account).await.unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("The data was not found"));
    let (status, _) = get_request("/accounts/owner/nobody", configure_missing_account).await.unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn create_account() {
    let (status, body) = post_request("/accounts/alice", None, configure_create).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    let account: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(account["owner"], "alice");
    assert_eq!(account["loyalty"], "Basic");
    assert_eq!(account["balance"], 50.0);
    assert_eq!(account["free"], 0);
    assert_eq!(account["sentiment"], "Unknown");
}

#[actix_web::test]
async fn create_account_for_fail_never_reaches_the_store() {
    let (status, body) = post_request("/accounts/FAIL", None, configure_create_rejected).await.unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("not a valid account owner"));
}

#[actix_web::test]
async fn create_account_for_an_existing_owner_is_a_409() {
    let (status, body) = post_request("/accounts/alice", None, configure_create_duplicate).await.unwrap();
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("already exists"));
}

#[actix_web::test]
async fn list_accounts_forwards_the_selection() {
    let (status, body) =
        get_request("/accounts?page=2&page_size=10&owners=alice,bob", configure_listing).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    let accounts: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0]["owner"], "alice");
    assert_eq!(accounts[1]["owner"], "bob");
}

#[actix_web::test]
async fn list_accounts_with_bad_paging_is_a_400() {
    let (status, body) = get_request("/accounts?page=0", configure_listing_rejected).await.unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid query parameters"));
}

#[actix_web::test]
async fn settling_a_trade_charges_the_gold_commission() {
    let (status, body) =
        put_request(&format!("/accounts/{ALICE_ID}?total=110000"), configure_settlement).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    let account: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(account["loyalty"], "Gold");
    assert_eq!(account["balance"], 43.01);
    assert_eq!(account["commissions"], 6.99);
    assert_eq!(account["nextCommission"], 6.99);
}

#[actix_web::test]
async fn trades_still_settle_when_the_rule_service_is_down() {
    let (status, body) =
        put_request(&format!("/accounts/{ALICE_ID}?total=110000"), configure_settlement_rules_down).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    let account: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(account["loyalty"], "Basic");
    assert_eq!(account["balance"], 40.01);
    assert_eq!(account["commissions"], 9.99);
}

#[actix_web::test]
async fn settling_a_trade_on_a_missing_account_is_a_404() {
    let (status, _) =
        put_request(&format!("/accounts/{ALICE_ID}?total=110000"), configure_settlement_missing).await.unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn a_trade_that_keeps_conflicting_is_a_409() {
    let (status, body) =
        put_request(&format!("/accounts/{ALICE_ID}?total=110000"), configure_settlement_conflict).await.unwrap();
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("Write conflict"));
}

#[actix_web::test]
async fn closing_an_account_returns_the_final_document() {
    let (status, body) = delete_request(&format!("/accounts/{ALICE_ID}"), configure_delete).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    let account: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(account["owner"], "alice");
}

#[actix_web::test]
async fn closing_a_missing_account_is_a_404() {
    let (status, _) = delete_request(&format!("/accounts/{ALICE_ID}"), configure_missing_account).await.unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

//--------------------------------------   Fixtures and configurations  -----------------------------------------

fn alice() -> Account {
    Account {
        id: AccountId::from(ALICE_ID),
        rev: 1,
        owner: "alice".to_string(),
        loyalty: LoyaltyTier::Basic,
        balance: Money::from_cents(5_000),
        commissions: Money::ZERO,
        free: 0,
        sentiment: UNKNOWN_SENTIMENT.to_string(),
        next_commission: Money::from_cents(999),
    }
}

fn bob() -> Account {
    Account {
        id: AccountId::from("deadbeefdeadbeefdeadbeefdeadbeef"),
        owner: "bob".to_string(),
        ..alice()
    }
}

fn configure_alice(cfg: &mut ServiceConfig) {
    let mut backend = MockAccountBackend::new();
    backend.expect_get().returning(|_| Ok(Some(alice())));
    backend.expect_get_by_owner().withf(|owner| owner == "alice").returning(|_| Ok(Some(alice())));
    let api = AccountApi::new(backend);
    cfg.service(AccountByIdRoute::<MockAccountBackend>::new())
        .service(AccountByOwnerRoute::<MockAccountBackend>::new())
        .app_data(web::Data::new(api));
}

fn configure_missing_account(cfg: &mut ServiceConfig) {
    let mut backend = MockAccountBackend::new();
    backend.expect_get().returning(|_| Ok(None));
    backend.expect_get_by_owner().returning(|_| Ok(None));
    backend.expect_delete().returning(|_| Ok(None));
    let api = AccountApi::new(backend);
    cfg.service(AccountByIdRoute::<MockAccountBackend>::new())
        .service(AccountByOwnerRoute::<MockAccountBackend>::new())
        .service(DeleteAccountRoute::<MockAccountBackend>::new())
        .app_data(web::Data::new(api));
}

fn configure_create(cfg: &mut ServiceConfig) {
    let mut backend = MockAccountBackend::new();
    backend.expect_get_by_owner().withf(|owner| owner == "alice").returning(|_| Ok(None));
    backend.expect_insert().withf(|new_account| new_account.owner == "alice").returning(|new_account| {
        let mut account = alice();
        account.owner = new_account.owner;
        Ok(account)
    });
    let api = AccountApi::new(backend);
    cfg.service(CreateAccountRoute::<MockAccountBackend>::new()).app_data(web::Data::new(api));
}

fn configure_create_rejected(cfg: &mut ServiceConfig) {
    let mut backend = MockAccountBackend::new();
    backend.expect_get_by_owner().times(0);
    backend.expect_insert().times(0);
    let api = AccountApi::new(backend);
    cfg.service(CreateAccountRoute::<MockAccountBackend>::new()).app_data(web::Data::new(api));
}

fn configure_create_duplicate(cfg: &mut ServiceConfig) {
    let mut backend = MockAccountBackend::new();
    backend.expect_get_by_owner().returning(|_| Ok(Some(alice())));
    backend.expect_insert().times(0);
    let api = AccountApi::new(backend);
    cfg.service(CreateAccountRoute::<MockAccountBackend>::new()).app_data(web::Data::new(api));
}

fn configure_listing(cfg: &mut ServiceConfig) {
    let mut backend = MockAccountBackend::new();
    backend
        .expect_list()
        .withf(|selection| {
            selection.page == Some(2) &&
                selection.page_size == Some(10) &&
                selection.owners == Some(vec!["alice".to_string(), "bob".to_string()])
        })
        .returning(|_| Ok(vec![alice(), bob()]));
    let api = AccountApi::new(backend);
    cfg.service(ListAccountsRoute::<MockAccountBackend>::new()).app_data(web::Data::new(api));
}

fn configure_listing_rejected(cfg: &mut ServiceConfig) {
    let mut backend = MockAccountBackend::new();
    backend
        .expect_list()
        .returning(|_| Err(AccountStoreError::QueryError("page must be at least 1, not 0".to_string())));
    let api = AccountApi::new(backend);
    cfg.service(ListAccountsRoute::<MockAccountBackend>::new()).app_data(web::Data::new(api));
}

fn configure_settlement(cfg: &mut ServiceConfig) {
    let mut backend = MockAccountBackend::new();
    backend.expect_get().returning(|_| Ok(Some(alice())));
    backend
        .expect_put()
        .withf(|account| {
            account.loyalty == LoyaltyTier::Gold &&
                account.balance == Money::from_cents(4_301) &&
                account.commissions == Money::from_cents(699) &&
                account.next_commission == Money::from_cents(699) &&
                account.free == 0
        })
        .returning(|account| {
            let mut stored = account.clone();
            stored.rev += 1;
            Ok(stored)
        });
    let mut rules = MockLoyaltyEngine::new();
    rules.expect_evaluate().withf(|total| *total == Money::from_dollars(110_000.0)).returning(|_| Ok(LoyaltyTier::Gold));
    let api = SettlementApi::new(backend, rules, EventProducers::default());
    cfg.service(UpdateAccountRoute::<MockAccountBackend, MockLoyaltyEngine>::new()).app_data(web::Data::new(api));
}

fn configure_settlement_rules_down(cfg: &mut ServiceConfig) {
    let mut backend = MockAccountBackend::new();
    backend.expect_get().returning(|_| Ok(Some(alice())));
    backend
        .expect_put()
        .withf(|account| {
            account.loyalty == LoyaltyTier::Basic &&
                account.balance == Money::from_cents(4_001) &&
                account.commissions == Money::from_cents(999)
        })
        .returning(|account| {
            let mut stored = account.clone();
            stored.rev += 1;
            Ok(stored)
        });
    let mut rules = MockLoyaltyEngine::new();
    rules.expect_evaluate().returning(|_| Err(LoyaltyRuleError::Unavailable("connection refused".to_string())));
    let api = SettlementApi::new(backend, rules, EventProducers::default());
    cfg.service(UpdateAccountRoute::<MockAccountBackend, MockLoyaltyEngine>::new()).app_data(web::Data::new(api));
}

fn configure_settlement_missing(cfg: &mut ServiceConfig) {
    let mut backend = MockAccountBackend::new();
    backend.expect_get().returning(|_| Ok(None));
    let mut rules = MockLoyaltyEngine::new();
    rules.expect_evaluate().times(0);
    let api = SettlementApi::new(backend, rules, EventProducers::default());
    cfg.service(UpdateAccountRoute::<MockAccountBackend, MockLoyaltyEngine>::new()).app_data(web::Data::new(api));
}

fn configure_settlement_conflict(cfg: &mut ServiceConfig) {
    let mut backend = MockAccountBackend::new();
    backend.expect_get().times(2).returning(|_| Ok(Some(alice())));
    backend
        .expect_put()
        .times(2)
        .returning(|account| Err(AccountStoreError::RevisionConflict(account.id.clone())));
    let mut rules = MockLoyaltyEngine::new();
    rules.expect_evaluate().returning(|_| Ok(LoyaltyTier::Gold));
    let api = SettlementApi::new(backend, rules, EventProducers::default());
    cfg.service(UpdateAccountRoute::<MockAccountBackend, MockLoyaltyEngine>::new()).app_data(web::Data::new(api));
}

fn configure_delete(cfg: &mut ServiceConfig) {
    let mut backend = MockAccountBackend::new();
    backend.expect_delete().withf(|id| id.as_str() == ALICE_ID).returning(|_| Ok(Some(alice())));
    let api = AccountApi::new(backend);
    cfg.service(DeleteAccountRoute::<MockAccountBackend>::new()).app_data(web::Data::new(api));
}
