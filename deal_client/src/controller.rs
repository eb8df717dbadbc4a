//! The deal list view-controller.
//!
//! [`DealController`] owns the master deal list, the platform filter and one [`UnlockState`] per card. It talks to the
//! server through a [`DealBackend`], to the hosted checkout through a [`PaymentWidget`] and draws everything through a
//! [`Presenter`]. None of the three needs to know about the others, so the whole flow can be exercised with fakes.
//!
//! Transient UI (banners, the post-purchase redirect, the staggered card reveal) is driven by timers spawned on the
//! Tokio runtime, so the controller must be used from within one.
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use deal_engine::{
    api_objects::{CreateOrderRequest, VerificationResult, VerifyPaymentRequest},
    deal_types::Deal,
    filter::PlatformFilter,
};
use ds_common::Paise;
use log::*;
use tokio::time::{sleep, sleep_until, Instant};

use crate::{
    config::{ClientConfig, UiTimings},
    traits::{DealBackend, PaymentWidget, Presenter, WidgetOutcome},
    unlock::{Activation, UnlockEvent, UnlockState},
    view::{deal_count_text, CardKey, DealCard, ScrollReveal, EMPTY_STATE},
};

pub const LOAD_ERROR_MESSAGE: &str = "Failed to load deals. Please check your internet connection and try again.";
pub const ORDER_ERROR_MESSAGE: &str = "Failed to process payment. Please try again.";
pub const VERIFICATION_ERROR_MESSAGE: &str =
    "Payment verification failed. Please contact support if amount was deducted.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(usize),
    /// The fetch failed. The previous list is still shown.
    Failed,
    /// Another load was already in flight.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockOutcome {
    /// The button was already processing an unlock, or its redirect had not happened yet.
    Ignored,
    /// The deal had been unlocked before and its affiliate link was opened again.
    Reopened,
    Failed,
    Cancelled,
    Unlocked { link: String },
}

#[derive(Debug, Default)]
struct ViewState {
    deals: Vec<Deal>,
    filter: PlatformFilter,
    loading: bool,
    unlocks: HashMap<CardKey, UnlockState>,
    reveal: ScrollReveal,
    error_generation: u64,
    success_generation: u64,
    render_generation: u64,
}

/// The part of the controller that timers need. It is shared with every spawned task.
struct View<P> {
    presenter: P,
    state: Mutex<ViewState>,
    timings: UiTimings,
    unlock_price: Paise,
}

impl<P> View<P>
where P: Presenter + Send + Sync + 'static
{
    fn lock(&self) -> MutexGuard<'_, ViewState> {
        // A panicking presenter must not take the whole view down with it.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn render(self: &Arc<Self>) {
        let (cards, generation) = {
            let mut guard = self.lock();
            let state = &mut *guard;
            let cards = state
                .filter
                .apply(&state.deals)
                .iter()
                .map(|deal| {
                    let unlock = state.unlocks.get(&CardKey::for_deal(deal)).cloned().unwrap_or_default();
                    DealCard::new(deal, &unlock, self.unlock_price)
                })
                .collect::<Vec<_>>();
            state.reveal.reset();
            state.render_generation += 1;
            (cards, state.render_generation)
        };
        if cards.is_empty() {
            self.presenter.render_empty_state(&EMPTY_STATE);
        } else {
            self.presenter.render_cards(&cards);
            self.stagger_reveal(cards.iter().map(|c| c.key.clone()).collect(), generation);
        }
        self.presenter.update_deal_count(&deal_count_text(cards.len()));
    }

    fn stagger_reveal(self: &Arc<Self>, keys: Vec<CardKey>, generation: u64) {
        let view = Arc::clone(self);
        let stagger = self.timings.reveal_stagger;
        tokio::spawn(async move {
            let start = Instant::now();
            for (i, key) in keys.into_iter().enumerate() {
                sleep_until(start + stagger * (i as u32 + 1)).await;
                let newly_revealed = {
                    let mut state = view.lock();
                    if state.render_generation != generation {
                        return;
                    }
                    state.reveal.mark_revealed(key.clone())
                };
                if newly_revealed {
                    view.presenter.reveal_card(&key);
                }
            }
        });
    }

    fn transition(&self, key: &CardKey, event: UnlockEvent) -> Option<UnlockState> {
        let next = {
            let mut state = self.lock();
            let current = state.unlocks.get(key).cloned().unwrap_or_default();
            match current.apply(event) {
                Ok(next) => {
                    state.unlocks.insert(key.clone(), next.clone());
                    Some(next)
                },
                Err(e) => {
                    warn!("💳️ {e}");
                    None
                },
            }
        };
        if let Some(state) = &next {
            self.presenter.render_button(key, &state.view(self.unlock_price));
        }
        next
    }

    fn show_error(self: &Arc<Self>, message: &str) {
        let generation = {
            let mut state = self.lock();
            state.error_generation += 1;
            state.error_generation
        };
        self.presenter.show_error(message);
        let view = Arc::clone(self);
        let delay = self.timings.error_banner;
        tokio::spawn(async move {
            sleep(delay).await;
            if view.lock().error_generation == generation {
                view.presenter.hide_error();
            }
        });
    }

    fn show_success(self: &Arc<Self>, message: &str) {
        let generation = {
            let mut state = self.lock();
            state.success_generation += 1;
            state.success_generation
        };
        self.presenter.show_success(message);
        let view = Arc::clone(self);
        let delay = self.timings.success_banner;
        tokio::spawn(async move {
            sleep(delay).await;
            if view.lock().success_generation == generation {
                view.presenter.hide_success();
            }
        });
    }

    /// Opens the affiliate link after the redirect delay, then relabels the button once the relabel delay (counted from
    /// the same moment) has passed.
    fn schedule_redirect(self: &Arc<Self>, key: CardKey, link: String) {
        let view = Arc::clone(self);
        let UiTimings { redirect_delay, relabel_delay, .. } = self.timings;
        tokio::spawn(async move {
            let start = Instant::now();
            sleep_until(start + redirect_delay).await;
            info!("💳️ Opening {link}");
            view.presenter.open_link(&link);
            sleep_until(start + relabel_delay).await;
            view.transition(&key, UnlockEvent::Settled);
        });
    }
}

pub struct DealController<B, W, P> {
    backend: B,
    widget: W,
    view: Arc<View<P>>,
}

impl<B, W, P> DealController<B, W, P>
where
    B: DealBackend,
    W: PaymentWidget,
    P: Presenter + Send + Sync + 'static,
{
    pub fn new(backend: B, widget: W, presenter: P, unlock_price: Paise, timings: UiTimings) -> Self {
        let view = View { presenter, state: Mutex::new(ViewState::default()), timings, unlock_price };
        Self { backend, widget, view: Arc::new(view) }
    }

    /// Starts the controller with `filter` selected, without rendering anything.
    pub fn with_filter(self, filter: PlatformFilter) -> Self {
        self.view.lock().filter = filter;
        self
    }

    pub fn from_config(backend: B, widget: W, presenter: P, config: &ClientConfig) -> Self {
        Self::new(backend, widget, presenter, config.unlock_price, config.timings)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn presenter(&self) -> &P {
        &self.view.presenter
    }

    pub fn timings(&self) -> &UiTimings {
        &self.view.timings
    }

    /// The complete list from the last successful load, regardless of the filter.
    pub fn deals(&self) -> Vec<Deal> {
        self.view.lock().deals.clone()
    }

    pub fn visible_deals(&self) -> Vec<Deal> {
        let state = self.view.lock();
        state.filter.apply(&state.deals)
    }

    pub fn filter(&self) -> PlatformFilter {
        self.view.lock().filter
    }

    pub fn is_loading(&self) -> bool {
        self.view.lock().loading
    }

    pub fn button_state(&self, key: &CardKey) -> UnlockState {
        self.view.lock().unlocks.get(key).cloned().unwrap_or_default()
    }

    /// Fetches the deal list and renders it under the current filter.
    ///
    /// Only one load runs at a time; calling this while a load is in flight does nothing. If the fetch fails, the
    /// previously loaded deals stay in place and the load error banner is shown.
    pub async fn load_deals(&self, force_refresh: bool) -> LoadOutcome {
        {
            let mut state = self.view.lock();
            if state.loading {
                debug!("🗂️ A load is already in progress. Ignoring this one.");
                return LoadOutcome::Skipped;
            }
            state.loading = true;
        }
        self.view.presenter.show_loading(true);
        self.view.presenter.hide_error();
        let outcome = match self.backend.fetch_deals(force_refresh).await {
            Ok(deals) => {
                info!("🗂️ Loaded {} deals", deals.len());
                let count = deals.len();
                self.view.lock().deals = deals;
                LoadOutcome::Loaded(count)
            },
            Err(e) => {
                error!("🗂️ Could not load deals. {e}");
                LoadOutcome::Failed
            },
        };
        self.view.lock().loading = false;
        self.view.presenter.show_loading(false);
        self.view.render();
        if outcome == LoadOutcome::Failed {
            self.view.show_error(LOAD_ERROR_MESSAGE);
        }
        outcome
    }

    /// The empty state's retry action.
    pub async fn retry(&self) -> LoadOutcome {
        self.load_deals(true).await
    }

    pub fn filter_deals(&self, filter: PlatformFilter) {
        debug!("🗂️ Filtering deals by {filter}");
        self.view.lock().filter = filter;
        self.view.render();
    }

    pub fn render(&self) {
        self.view.render();
    }

    /// Reveals every card whose top edge (relative to the viewport) has scrolled into view. Returns the cards that
    /// were revealed by this call.
    pub fn on_scroll(&self, viewport_height: f64, card_tops: &[(CardKey, f64)]) -> Vec<CardKey> {
        let revealed = self.view.lock().reveal.reveal(viewport_height, card_tops);
        for key in &revealed {
            self.view.presenter.reveal_card(key);
        }
        revealed
    }

    /// When the view becomes visible again, the deals are reloaded after a short pause.
    pub async fn on_visibility_change(&self, visible: bool) -> Option<LoadOutcome> {
        if !visible {
            return None;
        }
        sleep(self.view.timings.visibility_refresh).await;
        Some(self.load_deals(false).await)
    }

    pub fn dismiss_error(&self) {
        self.view.lock().error_generation += 1;
        self.view.presenter.hide_error();
    }

    /// Runs the unlock flow for one card: create an order, let the customer pay in the hosted checkout and have the
    /// server verify the payment.
    ///
    /// The future resolves once the outcome is known. On success the redirect and relabel happen later, on timers.
    pub async fn unlock(&self, key: &CardKey) -> UnlockOutcome {
        let activation = {
            let mut state = self.view.lock();
            let current = state.unlocks.get(key).cloned().unwrap_or_default();
            let activation = current.activation();
            if activation == Activation::Begin {
                if let Ok(next) = current.apply(UnlockEvent::Activate) {
                    state.unlocks.insert(key.clone(), next);
                }
            }
            activation
        };
        match activation {
            Activation::AlreadyProcessing => {
                debug!("💳️ Unlock of {} on {} is already in progress", key.deal_id, key.platform);
                return UnlockOutcome::Ignored;
            },
            Activation::Reopen(link) => {
                info!("💳️ {} on {} is already unlocked. Reopening {link}", key.deal_id, key.platform);
                self.view.presenter.open_link(&link);
                return UnlockOutcome::Reopened;
            },
            Activation::Begin => {
                self.view.presenter.render_button(key, &UnlockState::Processing.view(self.view.unlock_price));
            },
        }

        let request = CreateOrderRequest::new(key.deal_id.clone(), key.platform);
        let order = match self.backend.create_order(&request).await {
            Ok(order) => order,
            Err(e) => {
                error!("💳️ Could not create an order for {} on {}. {e}", key.deal_id, key.platform);
                self.view.transition(key, UnlockEvent::OrderFailed);
                self.view.show_error(ORDER_ERROR_MESSAGE);
                return UnlockOutcome::Failed;
            },
        };
        info!("💳️ Order {} for {} created. Opening checkout.", order.order_id, order.amount);

        let confirmation = match self.widget.open(&order).await {
            WidgetOutcome::Completed(confirmation) => confirmation,
            WidgetOutcome::Dismissed => {
                info!("💳️ Checkout for order {} was dismissed", order.order_id);
                self.view.transition(key, UnlockEvent::WidgetDismissed);
                return UnlockOutcome::Cancelled;
            },
        };

        let request = VerifyPaymentRequest::new(confirmation, key.deal_id.clone(), key.platform);
        let (link, title) = match self.backend.verify_payment(&request).await {
            Ok(VerificationResult { success: true, affiliate_link: Some(link), deal_title }) => (link, deal_title),
            Ok(_) => {
                warn!("💳️ Payment {} for order {} was not verified", request.payment_id, request.order_id);
                self.fail_verification(key);
                return UnlockOutcome::Failed;
            },
            Err(e) => {
                error!("💳️ Could not verify payment {} for order {}. {e}", request.payment_id, request.order_id);
                self.fail_verification(key);
                return UnlockOutcome::Failed;
            },
        };
        info!("💳️ Payment {} verified. {} on {} is unlocked.", request.payment_id, key.deal_id, key.platform);
        let title = title.unwrap_or_else(|| self.deal_title(key));
        self.view.transition(key, UnlockEvent::PaymentVerified { link: link.clone() });
        self.view.show_success(&format!("Deal unlocked successfully! Opening {title}..."));
        self.view.schedule_redirect(key.clone(), link.clone());
        UnlockOutcome::Unlocked { link }
    }

    fn fail_verification(&self, key: &CardKey) {
        self.view.transition(key, UnlockEvent::VerificationFailed);
        self.view.show_error(VERIFICATION_ERROR_MESSAGE);
    }

    fn deal_title(&self, key: &CardKey) -> String {
        let state = self.view.lock();
        state
            .deals
            .iter()
            .find(|d| d.id == key.deal_id && d.platform == key.platform)
            .map(|d| d.title.clone())
            .unwrap_or_else(|| "your deal".to_string())
    }
}

/// Waits long enough for every timer started by a successful unlock to have fired.
pub fn settle_time(timings: &UiTimings) -> Duration {
    timings.redirect_delay.max(timings.relabel_delay).max(timings.success_banner) + Duration::from_millis(50)
}
