use std::sync::{
    atomic::{AtomicU64, Ordering},
    Mutex,
};

use deal_client::{PaymentWidget, WidgetOutcome};
use deal_engine::{
    api_objects::{OrderDetails, PaymentConfirmation},
    helpers::sign_payment,
};
use log::*;

use crate::fake_razorpay::FakeRazorpay;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutBehaviour {
    /// Pay, and hand back the signature the provider would issue.
    Pay,
    Dismiss,
    /// Pay, but hand back a signature made with the wrong key.
    Tamper,
}

/// A hosted checkout that completes payments against [`FakeRazorpay`] and signs them with the merchant's key secret,
/// exactly as the real provider does.
pub struct SigningCheckout {
    key_secret: String,
    provider: FakeRazorpay,
    behaviour: Mutex<CheckoutBehaviour>,
    opened: Mutex<Vec<OrderDetails>>,
    payments: AtomicU64,
}

impl SigningCheckout {
    pub fn new<S: Into<String>>(key_secret: S, provider: FakeRazorpay) -> Self {
        Self {
            key_secret: key_secret.into(),
            provider,
            behaviour: Mutex::new(CheckoutBehaviour::Pay),
            opened: Mutex::new(Vec::new()),
            payments: AtomicU64::new(0),
        }
    }

    pub fn set_behaviour(&self, behaviour: CheckoutBehaviour) {
        *self.behaviour.lock().unwrap_or_else(|e| e.into_inner()) = behaviour;
    }

    pub fn opened(&self) -> Vec<OrderDetails> {
        self.opened.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl PaymentWidget for SigningCheckout {
    async fn open(&self, order: &OrderDetails) -> WidgetOutcome {
        self.opened.lock().unwrap_or_else(|e| e.into_inner()).push(order.clone());
        let behaviour = *self.behaviour.lock().unwrap_or_else(|e| e.into_inner());
        debug!("🌍️ Checkout opened for {} ({behaviour:?})", order.order_id);
        if behaviour == CheckoutBehaviour::Dismiss {
            return WidgetOutcome::Dismissed;
        }
        let n = self.payments.fetch_add(1, Ordering::SeqCst) + 1;
        let payment_id = format!("pay_e2e{n:06}");
        self.provider.mark_paid(&order.order_id);
        let secret = match behaviour {
            CheckoutBehaviour::Tamper => "not-the-key-secret",
            _ => self.key_secret.as_str(),
        };
        let signature = sign_payment(secret, &order.order_id, &payment_id);
        WidgetOutcome::Completed(PaymentConfirmation { payment_id, order_id: order.order_id.clone(), signature })
    }
}
