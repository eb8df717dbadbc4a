use std::collections::HashMap;

use ds_common::Paise;
use serde::{Deserialize, Serialize};

/// The body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRazorpayOrder {
    pub amount: Paise,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
    /// `1` captures the payment automatically once it is authorised.
    pub payment_capture: u8,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub notes: HashMap<String, String>,
}

impl NewRazorpayOrder {
    pub fn new<S: Into<String>>(amount: Paise, currency: S) -> Self {
        Self { amount, currency: currency.into(), receipt: None, payment_capture: 1, notes: HashMap::new() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RazorpayOrderStatus {
    Created,
    Attempted,
    Paid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RazorpayOrder {
    pub id: String,
    pub amount: Paise,
    #[serde(default)]
    pub amount_paid: Paise,
    #[serde(default)]
    pub amount_due: Paise,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    pub status: RazorpayOrderStatus,
    #[serde(default)]
    pub attempts: u32,
    /// Razorpay sends an empty array rather than an empty object when an order has no notes.
    #[serde(default, deserialize_with = "notes_or_empty")]
    pub notes: HashMap<String, String>,
    pub created_at: i64,
}

fn notes_or_empty<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<HashMap<String, String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Notes {
        Map(HashMap<String, String>),
        List(Vec<serde_json::Value>),
    }
    match Notes::deserialize(deserializer)? {
        Notes::Map(m) => Ok(m),
        Notes::List(_) => Ok(HashMap::new()),
    }
}
