//! Razorpay as the [`PaymentGateway`] behind the unlock flow.
use deal_engine::{
    helpers::{verify_payment_signature, PaymentSignatureError},
    traits::{NewPaymentOrder, PaymentGateway, PaymentGatewayError, PaymentOrder},
};
use log::*;
use razorpay_tools::{NewRazorpayOrder, RazorpayApi, RazorpayApiError, RazorpayConfig};

#[derive(Clone)]
pub struct RazorpayGateway {
    api: RazorpayApi,
}

impl RazorpayGateway {
    pub fn new(config: RazorpayConfig) -> Result<Self, RazorpayApiError> {
        if config.key_id.is_empty() || config.key_secret.is_empty() {
            warn!("💳️ The Razorpay key id or secret is empty. Every order request will be refused by Razorpay.");
        }
        let api = RazorpayApi::new(config)?;
        Ok(Self { api })
    }

    pub fn api(&self) -> &RazorpayApi {
        &self.api
    }
}

pub fn order_request(order: NewPaymentOrder) -> NewRazorpayOrder {
    let mut request = NewRazorpayOrder::new(order.amount, order.currency);
    request.payment_capture = u8::from(order.auto_capture);
    request.notes = order.notes;
    request
}

fn gateway_error(e: RazorpayApiError) -> PaymentGatewayError {
    match e {
        RazorpayApiError::QueryError { .. } if e.is_rejection() => PaymentGatewayError::Rejected(e.to_string()),
        RazorpayApiError::JsonError(_) => PaymentGatewayError::InvalidResponse(e.to_string()),
        _ => PaymentGatewayError::Unreachable(e.to_string()),
    }
}

impl PaymentGateway for RazorpayGateway {
    fn key_id(&self) -> String {
        self.api.key_id().to_string()
    }

    async fn create_order(&self, order: NewPaymentOrder) -> Result<PaymentOrder, PaymentGatewayError> {
        let order = self.api.create_order(&order_request(order)).await.map_err(gateway_error)?;
        Ok(PaymentOrder { id: order.id, amount: order.amount, currency: order.currency })
    }

    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> Result<(), PaymentSignatureError> {
        verify_payment_signature(self.api.key_secret(), order_id, payment_id, signature)
    }
}
