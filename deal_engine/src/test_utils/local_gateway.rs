use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
    Mutex,
};

use crate::{
    api_objects::PaymentConfirmation,
    helpers::{sign_payment, verify_payment_signature, PaymentSignatureError},
    traits::{NewPaymentOrder, PaymentGateway, PaymentGatewayError, PaymentOrder},
};

/// A payment gateway that never leaves the process. Orders are numbered sequentially, and [`Self::complete_payment`]
/// plays the part of the hosted checkout by signing a payment with the gateway's key secret.
#[derive(Debug, Clone)]
pub struct LocalGateway {
    key_id: String,
    key_secret: String,
    next_id: Arc<AtomicU64>,
    failing: Arc<AtomicBool>,
    orders: Arc<Mutex<Vec<NewPaymentOrder>>>,
}

impl LocalGateway {
    pub fn new<S1: Into<String>, S2: Into<String>>(key_id: S1, key_secret: S2) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
            next_id: Arc::new(AtomicU64::new(1)),
            failing: Arc::new(AtomicBool::new(false)),
            orders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// While failing, every order request is rejected.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Every order request received so far, in order.
    pub fn orders(&self) -> Vec<NewPaymentOrder> {
        self.orders.lock().map(|o| o.clone()).unwrap_or_default()
    }

    pub fn complete_payment(&self, order_id: &str, payment_id: &str) -> PaymentConfirmation {
        PaymentConfirmation {
            payment_id: payment_id.to_string(),
            order_id: order_id.to_string(),
            signature: sign_payment(&self.key_secret, order_id, payment_id),
        }
    }
}

impl PaymentGateway for LocalGateway {
    fn key_id(&self) -> String {
        self.key_id.clone()
    }

    async fn create_order(&self, order: NewPaymentOrder) -> Result<PaymentOrder, PaymentGatewayError> {
        if let Ok(mut orders) = self.orders.lock() {
            orders.push(order.clone());
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(PaymentGatewayError::Rejected("The gateway is configured to fail".into()));
        }
        let id = format!("order_local{:06}", self.next_id.fetch_add(1, Ordering::SeqCst));
        Ok(PaymentOrder { id, amount: order.amount, currency: order.currency })
    }

    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> Result<(), PaymentSignatureError> {
        verify_payment_signature(&self.key_secret, order_id, payment_id, signature)
    }
}
