//! Request and response bodies shared by the DealStream server and its clients.
use chrono::{DateTime, Utc};
use ds_common::Paise;
use serde::{Deserialize, Serialize};

use crate::deal_types::{Deal, DealId, Platform};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DealsQuery {
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealsResponse {
    #[serde(default)]
    pub deals: Vec<Deal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<usize>,
}

impl DealsResponse {
    pub fn new(deals: Vec<Deal>) -> Self {
        let total_count = Some(deals.len());
        Self { deals, total_count }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformDealsResponse {
    pub platform: Platform,
    pub deals: Vec<Deal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub deal_id: DealId,
    pub platform: Platform,
}

impl CreateOrderRequest {
    pub fn new(deal_id: DealId, platform: Platform) -> Self {
        Self { deal_id, platform }
    }
}

/// An order issued by the payment provider. It is handed straight to the checkout widget and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetails {
    /// The provider's public key id. The checkout widget needs it to open.
    pub key: String,
    pub amount: Paise,
    pub currency: String,
    pub order_id: String,
}

/// What the checkout widget hands back once the customer has paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub payment_id: String,
    pub order_id: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyPaymentRequest {
    pub payment_id: String,
    pub order_id: String,
    pub signature: String,
    pub deal_id: DealId,
    pub platform: Platform,
}

impl VerifyPaymentRequest {
    pub fn new(confirmation: PaymentConfirmation, deal_id: DealId, platform: Platform) -> Self {
        let PaymentConfirmation { payment_id, order_id, signature } = confirmation;
        Self { payment_id, order_id, signature, deal_id, platform }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deal_title: Option<String>,
}

impl VerificationResult {
    pub fn unlocked<S1: Into<String>, S2: Into<String>>(affiliate_link: S1, deal_title: S2) -> Self {
        Self { success: true, affiliate_link: Some(affiliate_link.into()), deal_title: Some(deal_title.into()) }
    }

    pub fn declined() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self { status: "healthy".into(), timestamp: Utc::now() }
    }
}
