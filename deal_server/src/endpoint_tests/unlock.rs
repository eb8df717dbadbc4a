use actix_web::{http::StatusCode, web, web::ServiceConfig};
use deal_engine::{
    cache::DealCache,
    deal_types::Platform,
    helpers::{AffiliateIds, PaymentSignatureError},
    traits::{PaymentGatewayError, PaymentOrder},
    DealsApi,
    UnlockApi,
};
use ds_common::Paise;

use super::{
    helpers::{catalogue_for, post_request},
    mocks::{MockCatalogue, MockGateway},
};
use crate::server::configure_routes;

const ORDER_REQUEST: &str = r#"{"deal_id":"amazon_1","platform":"amazon"}"#;
const GOOD_PAYMENT: &str = r#"{"payment_id":"pay_1","order_id":"order_1","signature":"good","deal_id":"amazon_1","platform":"amazon"}"#;

#[actix_web::test]
async fn create_order() {
    let _ = env_logger::try_init().ok();
    let (status, body) = post_request("/create_order", ORDER_REQUEST, configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"key":"rzp_test_key","amount":89,"currency":"INR","order_id":"order_1"}"#);
}

#[actix_web::test]
async fn create_order_missing_fields() {
    let _ = env_logger::try_init().ok();
    let (status, body) = post_request("/create_order", r#"{"deal_id":"amazon_1"}"#, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with(r#"{"error":"Could not read request body"#));
    let (status, _) = post_request("/create_order", r#"{"deal_id":"","platform":"amazon"}"#, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn create_order_provider_down() {
    let _ = env_logger::try_init().ok();
    let (status, body) = post_request("/create_order", ORDER_REQUEST, configure_provider_down).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"Failed to create payment order"}"#);
}

#[actix_web::test]
async fn verify_good_payment() {
    let _ = env_logger::try_init().ok();
    let (status, body) = post_request("/verify_payment", GOOD_PAYMENT, configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"{"success":true,"affiliate_link":"https://www.amazon.in/dp/B0ABC12345?tag=deals-21","deal_title":"Electric Kettle"}"#
    );
}

#[actix_web::test]
async fn verify_bad_signature() {
    let _ = env_logger::try_init().ok();
    let body = GOOD_PAYMENT.replace("good", "forged");
    let (status, body) = post_request("/verify_payment", &body, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Invalid payment signature"}"#);
}

#[actix_web::test]
async fn verify_unknown_deal() {
    let _ = env_logger::try_init().ok();
    let body = GOOD_PAYMENT.replace("amazon_1", "amazon_9");
    let (status, body) = post_request("/verify_payment", &body, configure).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Deal amazon_9 not found on amazon"));
}

fn register(cfg: &mut ServiceConfig, gateway: MockGateway) {
    let mut catalogue = MockCatalogue::new();
    catalogue.expect_fetch_deals().returning(|p| Ok(catalogue_for(p)));
    let deals_api = DealsApi::new(catalogue, DealCache::default());
    let ids = AffiliateIds::new().with_id(Platform::Amazon, "deals-21");
    let unlock_api = UnlockApi::new(gateway, Paise::from(89), "INR", ids);
    cfg.app_data(web::Data::new(deals_api)).app_data(web::Data::new(unlock_api));
    configure_routes::<MockCatalogue, MockGateway>(cfg);
}

fn configure(cfg: &mut ServiceConfig) {
    let mut gateway = MockGateway::new();
    gateway.expect_key_id().returning(|| "rzp_test_key".to_string());
    gateway.expect_create_order().returning(|order| {
        assert_eq!(order.notes.get("deal_id").map(String::as_str), Some("amazon_1"));
        Ok(PaymentOrder { id: "order_1".into(), amount: order.amount, currency: order.currency })
    });
    gateway.expect_verify_signature().returning(|order_id, payment_id, signature| {
        match (order_id, payment_id, signature) {
            ("order_1", "pay_1", "good") => Ok(()),
            _ => Err(PaymentSignatureError::Mismatch),
        }
    });
    register(cfg, gateway);
}

fn configure_provider_down(cfg: &mut ServiceConfig) {
    let mut gateway = MockGateway::new();
    gateway.expect_key_id().returning(|| "rzp_test_key".to_string());
    gateway
        .expect_create_order()
        .returning(|_| Err(PaymentGatewayError::Unreachable("connection refused".into())));
    register(cfg, gateway);
}
