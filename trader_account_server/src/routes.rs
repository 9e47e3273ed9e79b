//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests:
//! ```nocompile
//!     fn my_handler() -> impl Responder {
//!         std::thread::sleep(Duration::from_secs(5)); // <-- Bad practice! Will cause the current worker thread to
//! hang!
//!     }
//! ```
//! For this reason, any long, non-cpu-bound operation (e.g. I/O, database operations, etc.) should be expressed as
//! futures or asynchronous functions. Async handlers get executed concurrently by worker threads and thus don’t block
//! execution:
//!
//! ```nocompile
//!     async fn my_handler() -> impl Responder {
//!         tokio::time::sleep(Duration::from_secs(5)).await; // <-- Ok. Worker thread will handle other requests here
//!     }
//! ```
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use tas_common::Money;
use trader_account_engine::{
    db_types::AccountId,
    traits::{AccountStore, LoyaltyRules, ToneAnalysis},
    AccountApi,
    FeedbackApi,
    SettlementApi,
};

use crate::{
    data_objects::{AccountListParams, FeedbackRequest, UpdateAccountParams},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Accounts  ----------------------------------------------------

route!(list_accounts => Get "/accounts" impl AccountStore);
/// Route handler for the account listing endpoint
///
/// Supports paging via the `page` (1-based) and `page_size` query parameters, and an owner filter via `owners`, a
/// comma-separated list of owner names. Filtered listings come back ordered by owner name; unfiltered listings by
/// account id.
pub async fn list_accounts<B: AccountStore>(
    query: web::Query<AccountListParams>,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let selection = query.into_inner().to_selection();
    debug!("💻️ GET accounts. {selection}");
    let accounts = api.fetch_accounts(&selection).await?;
    Ok(HttpResponse::Ok().json(accounts))
}

route!(create_account => Post "/accounts/{owner}" impl AccountStore);
/// Route handler for opening an account
///
/// The new account starts with the standard opening balance and the Basic loyalty level. Each owner may hold one
/// account; a second request for the same owner is a 409.
pub async fn create_account<B: AccountStore>(
    path: web::Path<String>,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let owner = path.into_inner();
    debug!("💻️ POST account for {owner}");
    let account = api.create_account(&owner).await?;
    Ok(HttpResponse::Ok().json(account))
}

route!(account_by_id => Get "/accounts/{id}" impl AccountStore);
/// Route handler for fetching a single account by its id
pub async fn account_by_id<B: AccountStore>(
    path: web::Path<AccountId>,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ GET account {id}");
    let account =
        api.account_by_id(&id).await?.ok_or_else(|| ServerError::NoRecordFound(format!("Account id {id}")))?;
    Ok(HttpResponse::Ok().json(account))
}

route!(account_by_owner => Get "/accounts/owner/{owner}" impl AccountStore);
/// Route handler for fetching a single account by its owner's name
pub async fn account_by_owner<B: AccountStore>(
    path: web::Path<String>,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let owner = path.into_inner();
    debug!("💻️ GET account for owner {owner}");
    let account =
        api.account_by_owner(&owner).await?.ok_or_else(|| ServerError::NoRecordFound(format!("Owner {owner}")))?;
    Ok(HttpResponse::Ok().json(account))
}

//----------------------------------------------   Settlement  ----------------------------------------------------

route!(update_account => Put "/accounts/{id}" impl AccountStore, LoyaltyRules);
/// Route handler for trade settlement
///
/// The trading service calls this after each trade. The `total` query parameter carries the new portfolio total in
/// dollars; the loyalty rule service decides the tier for that total, and the commission (or a banked free trade)
/// is applied to the account. The updated account document is returned.
pub async fn update_account<B: AccountStore, R: LoyaltyRules>(
    path: web::Path<AccountId>,
    params: web::Query<UpdateAccountParams>,
    api: web::Data<SettlementApi<B, R>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    let total = Money::from_dollars(params.total);
    debug!("💻️ PUT account {id}. Portfolio total {total}");
    let account = api.update_account(&id, total, None).await?;
    Ok(HttpResponse::Ok().json(account))
}

route!(delete_account => Delete "/accounts/{id}" impl AccountStore);
/// Route handler for closing an account
///
/// The deleted account document is returned, giving the caller a last look at it.
pub async fn delete_account<B: AccountStore>(
    path: web::Path<AccountId>,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ DELETE account {id}");
    let account = api.delete_account(&id).await?;
    Ok(HttpResponse::Ok().json(account))
}

//----------------------------------------------   Feedback  ----------------------------------------------------

route!(submit_feedback => Post "/accounts/{id}/feedback" impl AccountStore, ToneAnalysis);
/// Route handler for the feedback endpoint
///
/// The request body carries free-form text, which is run through the tone analyzer. Unhappy customers get free
/// trades as a consolation; the response says how many were awarded.
pub async fn submit_feedback<B: AccountStore, S: ToneAnalysis>(
    path: web::Path<AccountId>,
    body: web::Json<FeedbackRequest>,
    api: web::Data<FeedbackApi<B, S>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ POST feedback for account {id}");
    let feedback = api.submit_feedback(&id, &body.text).await?;
    Ok(HttpResponse::Ok().json(feedback))
}
