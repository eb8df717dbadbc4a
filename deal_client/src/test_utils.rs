//! Fakes for the controller's three collaborators.
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard},
};

use deal_engine::{
    api_objects::{
        CreateOrderRequest,
        OrderDetails,
        PaymentConfirmation,
        VerificationResult,
        VerifyPaymentRequest,
    },
    deal_types::Deal,
};
use ds_common::{Paise, INR_CURRENCY_CODE};
use tokio::sync::Notify;

use crate::{
    errors::ClientError,
    traits::{DealBackend, PaymentWidget, Presenter, WidgetOutcome},
    unlock::ButtonView,
    view::{CardKey, DealCard, EmptyState},
};

pub const TEST_AFFILIATE_LINK: &str = "https://www.amazon.in/dp/B0TEST?tag=dealstream-21";

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

//--------------------------------------     FakeBackend     ---------------------------------------------------------
enum Verification {
    Unlock,
    Decline,
    Fail(ClientError),
}

/// A scripted DealStream server. Every call is recorded.
pub struct FakeBackend {
    deals: Mutex<Result<Vec<Deal>, ClientError>>,
    order_error: Mutex<Option<ClientError>>,
    verification: Mutex<Verification>,
    fetch_gate: Option<Arc<Notify>>,
    fetches: Mutex<Vec<bool>>,
    orders: Mutex<Vec<CreateOrderRequest>>,
    verifications: Mutex<Vec<VerifyPaymentRequest>>,
}

impl FakeBackend {
    pub fn new(deals: Vec<Deal>) -> Self {
        Self {
            deals: Mutex::new(Ok(deals)),
            order_error: Mutex::new(None),
            verification: Mutex::new(Verification::Unlock),
            fetch_gate: None,
            fetches: Mutex::new(Vec::new()),
            orders: Mutex::new(Vec::new()),
            verifications: Mutex::new(Vec::new()),
        }
    }

    /// Every fetch waits for a notification on `gate` before returning.
    pub fn with_fetch_gate(mut self, gate: Arc<Notify>) -> Self {
        self.fetch_gate = Some(gate);
        self
    }

    pub fn set_deals(&self, deals: Vec<Deal>) {
        *lock(&self.deals) = Ok(deals);
    }

    pub fn fail_deals(&self, error: ClientError) {
        *lock(&self.deals) = Err(error);
    }

    pub fn fail_orders(&self, error: ClientError) {
        *lock(&self.order_error) = Some(error);
    }

    pub fn decline_payments(&self) {
        *lock(&self.verification) = Verification::Decline;
    }

    pub fn fail_verification(&self, error: ClientError) {
        *lock(&self.verification) = Verification::Fail(error);
    }

    /// The `force_refresh` flag of every fetch, in order.
    pub fn fetches(&self) -> Vec<bool> {
        lock(&self.fetches).clone()
    }

    pub fn orders(&self) -> Vec<CreateOrderRequest> {
        lock(&self.orders).clone()
    }

    pub fn verifications(&self) -> Vec<VerifyPaymentRequest> {
        lock(&self.verifications).clone()
    }
}

impl DealBackend for FakeBackend {
    async fn fetch_deals(&self, force_refresh: bool) -> Result<Vec<Deal>, ClientError> {
        lock(&self.fetches).push(force_refresh);
        if let Some(gate) = &self.fetch_gate {
            gate.notified().await;
        }
        lock(&self.deals).clone()
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> Result<OrderDetails, ClientError> {
        let count = {
            let mut orders = lock(&self.orders);
            orders.push(request.clone());
            orders.len()
        };
        if let Some(e) = lock(&self.order_error).clone() {
            return Err(e);
        }
        Ok(OrderDetails {
            key: "rzp_test_key".into(),
            amount: Paise::from(89),
            currency: INR_CURRENCY_CODE.into(),
            order_id: format!("order_test_{count}"),
        })
    }

    async fn verify_payment(&self, request: &VerifyPaymentRequest) -> Result<VerificationResult, ClientError> {
        lock(&self.verifications).push(request.clone());
        match &*lock(&self.verification) {
            Verification::Unlock => {
                let title = lock(&self.deals).as_ref().ok().and_then(|deals| {
                    deals
                        .iter()
                        .find(|d| d.id == request.deal_id && d.platform == request.platform)
                        .map(|d| d.title.clone())
                });
                Ok(VerificationResult { success: true, affiliate_link: Some(TEST_AFFILIATE_LINK.into()), deal_title: title })
            },
            Verification::Decline => Ok(VerificationResult::declined()),
            Verification::Fail(e) => Err(e.clone()),
        }
    }
}

//--------------------------------------   ScriptedWidget    ---------------------------------------------------------
/// A checkout that either pays for, or walks away from, every order it is shown.
pub struct ScriptedWidget {
    pay: bool,
    gate: Option<Arc<Notify>>,
    queued: Mutex<VecDeque<WidgetOutcome>>,
    opened: Mutex<Vec<OrderDetails>>,
}

impl ScriptedWidget {
    fn new(pay: bool) -> Self {
        Self { pay, gate: None, queued: Mutex::new(VecDeque::new()), opened: Mutex::new(Vec::new()) }
    }

    pub fn paying() -> Self {
        Self::new(true)
    }

    pub fn dismissing() -> Self {
        Self::new(false)
    }

    /// The checkout stays open until `gate` is notified.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Queues a specific outcome for the next checkout, overriding the default behaviour once.
    pub fn push(&self, outcome: WidgetOutcome) {
        lock(&self.queued).push_back(outcome);
    }

    pub fn opened(&self) -> Vec<OrderDetails> {
        lock(&self.opened).clone()
    }
}

impl PaymentWidget for ScriptedWidget {
    async fn open(&self, order: &OrderDetails) -> WidgetOutcome {
        lock(&self.opened).push(order.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(outcome) = lock(&self.queued).pop_front() {
            return outcome;
        }
        if self.pay {
            WidgetOutcome::Completed(PaymentConfirmation {
                payment_id: format!("pay_for_{}", order.order_id),
                order_id: order.order_id.clone(),
                signature: "test_signature".into(),
            })
        } else {
            WidgetOutcome::Dismissed
        }
    }
}

//--------------------------------------  RecordingPresenter ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterEvent {
    Loading(bool),
    ShowError(String),
    HideError,
    ShowSuccess(String),
    HideSuccess,
    Cards(Vec<DealCard>),
    Empty,
    Count(String),
    Button(CardKey, ButtonView),
    Reveal(CardKey),
    OpenLink(String),
}

/// Records every instruction it receives, in order.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    events: Mutex<Vec<PresenterEvent>>,
}

impl RecordingPresenter {
    fn record(&self, event: PresenterEvent) {
        lock(&self.events).push(event);
    }

    pub fn events(&self) -> Vec<PresenterEvent> {
        lock(&self.events).clone()
    }

    pub fn clear(&self) {
        lock(&self.events).clear();
    }

    pub fn error_banners(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PresenterEvent::ShowError(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn success_banners(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PresenterEvent::ShowSuccess(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    /// True if the error banner is currently showing.
    pub fn error_visible(&self) -> bool {
        self.events()
            .iter()
            .rev()
            .find_map(|e| match e {
                PresenterEvent::ShowError(_) => Some(true),
                PresenterEvent::HideError => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn opened_links(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PresenterEvent::OpenLink(l) => Some(l),
                _ => None,
            })
            .collect()
    }

    pub fn revealed(&self) -> Vec<CardKey> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PresenterEvent::Reveal(k) => Some(k),
                _ => None,
            })
            .collect()
    }

    /// Every button update for `key`, oldest first. Buttons drawn as part of a full render are not included.
    pub fn button_history(&self, key: &CardKey) -> Vec<ButtonView> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PresenterEvent::Button(k, b) if &k == key => Some(b),
                _ => None,
            })
            .collect()
    }

    pub fn last_cards(&self) -> Option<Vec<DealCard>> {
        self.events().into_iter().rev().find_map(|e| match e {
            PresenterEvent::Cards(cards) => Some(cards),
            _ => None,
        })
    }

    pub fn last_count(&self) -> Option<String> {
        self.events().into_iter().rev().find_map(|e| match e {
            PresenterEvent::Count(c) => Some(c),
            _ => None,
        })
    }
}

impl Presenter for RecordingPresenter {
    fn show_loading(&self, visible: bool) {
        self.record(PresenterEvent::Loading(visible));
    }

    fn show_error(&self, message: &str) {
        self.record(PresenterEvent::ShowError(message.to_string()));
    }

    fn hide_error(&self) {
        self.record(PresenterEvent::HideError);
    }

    fn show_success(&self, message: &str) {
        self.record(PresenterEvent::ShowSuccess(message.to_string()));
    }

    fn hide_success(&self) {
        self.record(PresenterEvent::HideSuccess);
    }

    fn render_cards(&self, cards: &[DealCard]) {
        self.record(PresenterEvent::Cards(cards.to_vec()));
    }

    fn render_empty_state(&self, _empty: &EmptyState) {
        self.record(PresenterEvent::Empty);
    }

    fn update_deal_count(&self, text: &str) {
        self.record(PresenterEvent::Count(text.to_string()));
    }

    fn render_button(&self, key: &CardKey, button: &ButtonView) {
        self.record(PresenterEvent::Button(key.clone(), button.clone()));
    }

    fn reveal_card(&self, key: &CardKey) {
        self.record(PresenterEvent::Reveal(key.clone()));
    }

    fn open_link(&self, url: &str) {
        self.record(PresenterEvent::OpenLink(url.to_string()));
    }
}
