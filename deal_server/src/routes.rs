//! Route handlers
//!
//! Handlers stay thin: they pull the request apart, hand it to [`DealsApi`] or [`UnlockApi`] and turn the result into
//! a response. Anything longer belongs in the deal engine.
//!
//! Every handler is async. The deal source and the payment provider are both I/O, and a handler that blocks its worker
//! thread stalls every other request queued on that worker.
use actix_web::{get, web, HttpResponse, Responder};
use deal_engine::{
    api_objects::{CreateOrderRequest, DealsQuery, DealsResponse, HealthStatus, PlatformDealsResponse, VerifyPaymentRequest},
    deal_types::Platform,
    DealSource,
    DealsApi,
    PaymentGateway,
    UnlockApi,
};
use log::*;

use crate::errors::ServerError;

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
    HttpResponse::Ok().json(HealthStatus::healthy())
}

//----------------------------------------------   Deals  ----------------------------------------------------
route!(deals => Get "/deals" impl DealSource);
/// All current deals, biggest discount first. `?refresh=true` bypasses the cache.
pub async fn deals<S: DealSource>(
    query: web::Query<DealsQuery>,
    api: web::Data<DealsApi<S>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received deals request (refresh: {})", query.refresh);
    let deals = api.all_deals(query.refresh).await;
    Ok(HttpResponse::Ok().json(DealsResponse::new(deals)))
}

route!(platform_deals => Get "/deals/{platform}" impl DealSource);
pub async fn platform_deals<S: DealSource>(
    path: web::Path<String>,
    query: web::Query<DealsQuery>,
    api: web::Data<DealsApi<S>>,
) -> Result<HttpResponse, ServerError> {
    let platform = path.parse::<Platform>().map_err(|e| {
        debug!("💻️ Deals requested for an unsupported platform. {e}");
        ServerError::from(e)
    })?;
    trace!("💻️ Received deals request for {platform}");
    let deals = api.platform_deals(platform, query.refresh).await.map_err(|e| {
        error!("💻️ Could not fetch deals for {platform}. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(PlatformDealsResponse { platform, deals }))
}

//----------------------------------------------   Unlock  ----------------------------------------------------
route!(create_order => Post "/create_order" impl PaymentGateway);
/// Creates a payment order for unlocking a deal. The response carries everything the checkout widget needs to open.
pub async fn create_order<G: PaymentGateway>(
    body: web::Json<CreateOrderRequest>,
    api: web::Data<UnlockApi<G>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received order request for deal {} on {}", body.deal_id, body.platform);
    let order = api.create_order(&body).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(verify_payment => Post "/verify_payment" impl PaymentGateway, DealSource);
/// Verifies a completed payment and, if it checks out, returns the deal's affiliate link.
///
/// * 400 if the payment signature is invalid.
/// * 404 if the deal is no longer known.
pub async fn verify_payment<G: PaymentGateway, S: DealSource>(
    body: web::Json<VerifyPaymentRequest>,
    unlock_api: web::Data<UnlockApi<G>>,
    deals_api: web::Data<DealsApi<S>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received payment verification for order {}", body.order_id);
    let result = unlock_api.verify_payment(&body, &deals_api).await?;
    Ok(HttpResponse::Ok().json(result))
}
