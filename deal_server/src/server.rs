use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use deal_engine::{cache::DealCache, sources::JsonFileDealSource, DealSource, DealsApi, PaymentGateway, UnlockApi};
use log::*;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::razorpay::RazorpayGateway,
    routes::{health, CreateOrderRoute, DealsRoute, PlatformDealsRoute, VerifyPaymentRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("💻️ Reading deals from {}", config.deals_file.display());
    let source = JsonFileDealSource::new(&config.deals_file);
    let gateway = RazorpayGateway::new(config.razorpay.clone())?;
    let srv = create_server_instance(config, source, gateway)?;
    srv.await.map_err(|e| ServerError::BackendError(e.to_string()))
}

/// Builds the server. All workers share the one deal cache, so a refresh on one worker is seen by every other.
pub fn create_server_instance<S, G>(config: ServerConfig, source: S, gateway: G) -> Result<Server, ServerError>
where
    S: DealSource + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    let deals_api = DealsApi::new(source, DealCache::new(config.cache_ttl));
    let unlock_api =
        UnlockApi::new(gateway, config.unlock_price, config.currency.as_str(), config.affiliate_ids.clone());
    let srv = HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("dealstream::access_log"))
            .app_data(web::Data::new(deals_api.clone()))
            .app_data(web::Data::new(unlock_api.clone()))
            .configure(configure_routes::<S, G>)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Registers every route, along with the extractor configuration that turns malformed requests into JSON errors.
pub fn configure_routes<S, G>(cfg: &mut web::ServiceConfig)
where
    S: DealSource + 'static,
    G: PaymentGateway + 'static,
{
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        debug!("💻️ Rejecting request body. {err}");
        ServerError::InvalidRequestBody(err.to_string()).into()
    });
    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        debug!("💻️ Rejecting request query. {err}");
        ServerError::InvalidQuery(err.to_string()).into()
    });
    cfg.app_data(json_config)
        .app_data(query_config)
        .service(health)
        .service(DealsRoute::<S>::new())
        .service(PlatformDealsRoute::<S>::new())
        .service(CreateOrderRoute::<G>::new())
        .service(VerifyPaymentRoute::<G, S>::new());
}
