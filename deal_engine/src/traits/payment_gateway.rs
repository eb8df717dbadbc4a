use std::collections::HashMap;

use ds_common::Paise;
use thiserror::Error;

use crate::helpers::PaymentSignatureError;

#[derive(Debug, Clone, Error)]
pub enum PaymentGatewayError {
    #[error("The payment provider rejected the request: {0}")]
    Rejected(String),
    #[error("Could not reach the payment provider: {0}")]
    Unreachable(String),
    #[error("The payment provider sent an unexpected response: {0}")]
    InvalidResponse(String),
}

/// The order we ask the payment provider to create. Amounts are always in the minor unit of `currency`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaymentOrder {
    pub amount: Paise,
    pub currency: String,
    /// Capture the payment as soon as it is authorised, rather than waiting for a separate capture call.
    pub auto_capture: bool,
    pub notes: HashMap<String, String>,
}

impl NewPaymentOrder {
    pub fn new<S: Into<String>>(amount: Paise, currency: S) -> Self {
        Self { amount, currency: currency.into(), auto_capture: true, notes: HashMap::new() }
    }

    pub fn with_note<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.notes.insert(key.into(), value.into());
        self
    }
}

/// An order as issued by the payment provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOrder {
    pub id: String,
    pub amount: Paise,
    pub currency: String,
}

#[allow(async_fn_in_trait)]
pub trait PaymentGateway {
    /// The public key id that the hosted checkout widget is opened with. This is not a secret.
    fn key_id(&self) -> String;

    async fn create_order(&self, order: NewPaymentOrder) -> Result<PaymentOrder, PaymentGatewayError>;

    /// Checks that `signature` was issued by the provider for this order and payment.
    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> Result<(), PaymentSignatureError>;
}
