use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use trader_account_engine::{
    events::{EventHandlers, EventHooks, EventProducers},
    sqlite::db::create_database,
    AccountApi,
    FeedbackApi,
    SettlementApi,
    SqliteDatabase,
};
use upstream_clients::{LoyaltyRuleClient, ToneClient};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    routes::{
        health,
        AccountByIdRoute,
        AccountByOwnerRoute,
        CreateAccountRoute,
        DeleteAccountRoute,
        ListAccountsRoute,
        SubmitFeedbackRoute,
        UpdateAccountRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    create_database(&config.database_url).await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.migrate().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let mut hooks = EventHooks::default();
    hooks.on_loyalty_change(|event| {
        Box::pin(async move {
            match serde_json::to_string(&event) {
                Ok(json) => info!("📬️ Loyalty level changed: {json}"),
                Err(e) => warn!("📬️ Could not serialize loyalty change event. {e}"),
            }
        })
    });
    let handlers = EventHandlers::new(config.event_buffer_size, hooks);
    let producers = handlers.producers();
    handlers.start_handlers().await;
    let srv = create_server_instance(config, db, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let loyalty =
        LoyaltyRuleClient::new(&config.upstream).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let tones = ToneClient::new(&config.upstream).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    // One API value each, shared across all workers, so the upstream outage warnings fire once per process.
    let accounts_api = web::Data::new(AccountApi::new(db.clone()));
    let settlement_api = web::Data::new(SettlementApi::new(db.clone(), loyalty, producers));
    let feedback_api = web::Data::new(FeedbackApi::new(db, tones));
    let srv = HttpServer::new(move || {
        let json_config = web::JsonConfig::default()
            .error_handler(|err, _req| ServerError::InvalidRequestBody(err.to_string()).into());
        let query_config = web::QueryConfig::default()
            .error_handler(|err, _req| ServerError::InvalidQueryParams(err.to_string()).into());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("tas::access_log"))
            .app_data(accounts_api.clone())
            .app_data(settlement_api.clone())
            .app_data(feedback_api.clone())
            .app_data(json_config)
            .app_data(query_config)
            .service(health)
            .service(ListAccountsRoute::<SqliteDatabase>::new())
            .service(CreateAccountRoute::<SqliteDatabase>::new())
            .service(AccountByOwnerRoute::<SqliteDatabase>::new())
            .service(AccountByIdRoute::<SqliteDatabase>::new())
            .service(UpdateAccountRoute::<SqliteDatabase, LoyaltyRuleClient>::new())
            .service(DeleteAccountRoute::<SqliteDatabase>::new())
            .service(SubmitFeedbackRoute::<SqliteDatabase, ToneClient>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
