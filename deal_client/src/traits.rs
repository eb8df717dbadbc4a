//! The three collaborators of the [`DealController`](crate::DealController).
//!
//! * [`DealBackend`] is the DealStream server: it lists deals, creates orders and verifies payments.
//! * [`PaymentWidget`] is the payment provider's hosted checkout. It is opened with an order and eventually reports
//!   that the customer either paid or walked away.
//! * [`Presenter`] is whatever the view is drawn on. Every call is a fire-and-forget instruction; the presenter never
//!   calls back into the controller.
use deal_engine::{
    api_objects::{CreateOrderRequest, OrderDetails, PaymentConfirmation, VerificationResult, VerifyPaymentRequest},
    deal_types::Deal,
};

use crate::{
    errors::ClientError,
    unlock::ButtonView,
    view::{CardKey, DealCard, EmptyState},
};

#[allow(async_fn_in_trait)]
pub trait DealBackend {
    async fn fetch_deals(&self, force_refresh: bool) -> Result<Vec<Deal>, ClientError>;
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<OrderDetails, ClientError>;
    async fn verify_payment(&self, request: &VerifyPaymentRequest) -> Result<VerificationResult, ClientError>;
}

/// How a checkout session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetOutcome {
    Completed(PaymentConfirmation),
    /// The customer closed the checkout without paying. This is not an error.
    Dismissed,
}

#[allow(async_fn_in_trait)]
pub trait PaymentWidget {
    /// Opens the hosted checkout for `order` and waits, for as long as it takes, for the customer to finish with it.
    async fn open(&self, order: &OrderDetails) -> WidgetOutcome;
}

pub trait Presenter {
    fn show_loading(&self, visible: bool);
    fn show_error(&self, message: &str);
    fn hide_error(&self);
    fn show_success(&self, message: &str);
    fn hide_success(&self);
    fn render_cards(&self, cards: &[DealCard]);
    fn render_empty_state(&self, empty: &EmptyState);
    fn update_deal_count(&self, text: &str);
    fn render_button(&self, key: &CardKey, button: &ButtonView);
    fn reveal_card(&self, key: &CardKey);
    /// Opens `url` in a new browsing context.
    fn open_link(&self, url: &str);
}
