use actix_web::{http::StatusCode, web, web::ServiceConfig};
use deal_engine::{
    api_objects::DealsResponse,
    cache::DealCache,
    deal_types::Platform,
    helpers::AffiliateIds,
    DealSourceError,
    DealsApi,
    UnlockApi,
};
use ds_common::Paise;

use super::{
    helpers::{catalogue_for, get_request},
    mocks::{MockCatalogue, MockGateway},
};
use crate::server::configure_routes;

const FLIPKART_JSON: &str = r#"{"platform":"flipkart","deals":[{"id":"flipkart_1","title":"Wireless Headphones","platform":"flipkart","current_price":"₹1,299","original_price":"₹2,999","discount_percentage":56.69}]}"#;

#[actix_web::test]
async fn health() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/health", configure).await;
    assert_eq!(status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[actix_web::test]
async fn all_deals_biggest_discount_first() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/deals", configure).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("amazon.in"), "product urls must not leak to clients");
    let res: DealsResponse = serde_json::from_str(&body).unwrap();
    let ids = res.deals.iter().map(|d| d.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["flipkart_1", "amazon_1", "amazon_2"]);
    assert_eq!(res.total_count, Some(3));
}

#[actix_web::test]
async fn refresh_flag() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/deals?refresh=true", configure).await;
    assert_eq!(status, StatusCode::OK);
    let res: DealsResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(res.deals.len(), 3);
    let (status, body) = get_request("/deals?refresh=maybe", configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with(r#"{"error":"Could not read request query"#));
}

#[actix_web::test]
async fn failing_platform_is_left_out() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/deals", configure_flipkart_down).await;
    assert_eq!(status, StatusCode::OK);
    let res: DealsResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(res.total_count, Some(2));
    assert!(res.deals.iter().all(|d| d.platform == Platform::Amazon));
}

#[actix_web::test]
async fn platform_deals() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/deals/flipkart", configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, FLIPKART_JSON);
    let (status, body) = get_request("/deals/swiggy", configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"platform":"swiggy","deals":[]}"#);
}

#[actix_web::test]
async fn unsupported_platform() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/deals/walmart", configure).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"Platform not supported: walmart"}"#);
}

#[actix_web::test]
async fn platform_fetch_failure() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/deals/flipkart", configure_flipkart_down).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Could not read deals for flipkart"));
}

fn register(cfg: &mut ServiceConfig, catalogue: MockCatalogue) {
    let deals_api = DealsApi::new(catalogue, DealCache::default());
    let unlock_api = UnlockApi::new(MockGateway::new(), Paise::from(89), "INR", AffiliateIds::new());
    cfg.app_data(web::Data::new(deals_api)).app_data(web::Data::new(unlock_api));
    configure_routes::<MockCatalogue, MockGateway>(cfg);
}

fn configure(cfg: &mut ServiceConfig) {
    let mut catalogue = MockCatalogue::new();
    catalogue.expect_fetch_deals().returning(|p| Ok(catalogue_for(p)));
    register(cfg, catalogue);
}

fn configure_flipkart_down(cfg: &mut ServiceConfig) {
    let mut catalogue = MockCatalogue::new();
    catalogue.expect_fetch_deals().returning(|p| match p {
        Platform::Flipkart => {
            Err(DealSourceError::Unavailable { platform: p, reason: "connection reset".into() })
        },
        _ => Ok(catalogue_for(p)),
    });
    register(cfg, catalogue);
}
