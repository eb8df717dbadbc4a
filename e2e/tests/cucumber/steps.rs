use cucumber::{gherkin::Step, given, then, when};
use deal_client::{
    controller::{settle_time, LOAD_ERROR_MESSAGE, ORDER_ERROR_MESSAGE, VERIFICATION_ERROR_MESSAGE},
    test_utils::PresenterEvent,
    unlock::UnlockState,
    view::CardKey,
    LoadOutcome,
    UnlockOutcome,
};
use deal_engine::{
    deal_types::{DealId, Platform},
    filter::PlatformFilter,
    helpers::sign_payment,
};
use e2e::{helpers::json_is_subset_of, CheckoutBehaviour};
use log::*;
use razorpay_tools::RazorpayOrderStatus;

use crate::cucumber::{
    world::{KEY_ID, KEY_SECRET},
    DealWorld,
};

fn card(deal_id: &str, platform: &str) -> CardKey {
    let platform = platform.parse::<Platform>().expect("Unknown platform in feature file");
    CardKey::new(DealId::new(deal_id), platform)
}

//--------------------------------------        Setup        ---------------------------------------------------------
#[given("a deal catalogue:")]
fn deal_catalogue(world: &mut DealWorld, step: &Step) {
    let json = step.docstring().expect("No catalogue given");
    world.write_catalogue(json);
}

#[given("a running DealStream server")]
async fn running_server(world: &mut DealWorld) {
    world.start_server().await;
}

#[given("a customer has the deals page open")]
fn customer_page(world: &mut DealWorld) {
    world.open_client();
}

#[given("the payment provider refuses new orders")]
fn provider_refuses(world: &mut DealWorld) {
    world.provider().provider.refuse_orders(true);
}

#[given(expr = "the customer will {word} at checkout")]
fn checkout_behaviour(world: &mut DealWorld, behaviour: String) {
    let behaviour = match behaviour.as_str() {
        "pay" => CheckoutBehaviour::Pay,
        "dismiss" => CheckoutBehaviour::Dismiss,
        "tamper" => CheckoutBehaviour::Tamper,
        other => panic!("Unknown checkout behaviour: {other}"),
    };
    world.controller().widget().set_behaviour(behaviour);
}

#[when("the server goes down")]
async fn server_goes_down(world: &mut DealWorld) {
    world.stop_server().await;
}

//--------------------------------------    Raw requests     ---------------------------------------------------------
#[when(expr = "I GET {string}")]
async fn get_path(world: &mut DealWorld, path: String) {
    world.response = Some(world.get(&path).await);
}

#[when(expr = "I POST to {string} with:")]
async fn post_path(world: &mut DealWorld, path: String, step: &Step) {
    let body = step.docstring().expect("No request body given");
    world.response = Some(world.post_json(&path, body).await);
}

#[when(expr = "I verify payment {string} for order {string} on deal {string} on {word} with a valid signature")]
async fn verify_signed(world: &mut DealWorld, payment_id: String, order_id: String, deal_id: String, platform: String) {
    let signature = sign_payment(KEY_SECRET, &order_id, &payment_id);
    let body = serde_json::json!({
        "payment_id": payment_id, "order_id": order_id, "signature": signature, "deal_id": deal_id, "platform": platform
    });
    world.response = Some(world.post_json("/verify_payment", &body.to_string()).await);
}

#[then(regex = r#"^I receive a (\d+) ([\w ]+?) response with the message "([^"]*)"$"#)]
async fn receive_response(world: &mut DealWorld, status: u16, text: String, message: String) {
    let (res_status, res_msg) = world.response.take().expect("No response received");
    assert_eq!(res_status, status, "Expected {status} {text} response, got {res_status}");
    assert!(res_msg.contains(&message), "Expected response to contain '{message}', got '{res_msg}'");
}

#[then(regex = r"^I receive a (\d+) ([\w ]+?) response$")]
async fn receive_response_code(world: &mut DealWorld, status: u16, text: String) {
    let (res_status, _res_msg) = world.response.clone().expect("No response received");
    assert_eq!(res_status, status, "Expected {status} {text} response, got {res_status}");
}

#[then(expr = "I receive a partial JSON response:")]
async fn receive_json_response(world: &mut DealWorld, step: &Step) {
    let (_res_status, res_msg) = world.response.take().expect("No response received");
    let expected = step.docstring().expect("No expected response");
    assert!(json_is_subset_of(expected, res_msg.as_str()), "Expected response to contain '{expected}', got '{res_msg}'");
}

#[then(expr = "the response does not contain {string}")]
async fn response_excludes(world: &mut DealWorld, text: String) {
    let (_res_status, res_msg) = world.response.take().expect("No response received");
    assert!(!res_msg.contains(&text), "Expected the response not to contain '{text}', got '{res_msg}'");
}

//--------------------------------------     Deal list       ---------------------------------------------------------
#[when("the customer loads the deals")]
async fn load_deals(world: &mut DealWorld) {
    world.load_outcome = Some(world.controller().load_deals(false).await);
}

#[when("the customer refreshes the deals")]
async fn refresh_deals(world: &mut DealWorld) {
    world.load_outcome = Some(world.controller().retry().await);
}

#[when(expr = "the customer filters by {string}")]
fn filter_by(world: &mut DealWorld, filter: String) {
    let filter = filter.parse::<PlatformFilter>().expect("Invalid filter in feature file");
    world.controller().filter_deals(filter);
}

#[then(expr = "{int} deals are loaded")]
fn deals_loaded(world: &mut DealWorld, count: usize) {
    assert_eq!(world.load_outcome, Some(LoadOutcome::Loaded(count)));
}

#[then("loading the deals fails")]
fn load_failed(world: &mut DealWorld) {
    assert_eq!(world.load_outcome, Some(LoadOutcome::Failed));
}

#[then(expr = "the deal count reads {string}")]
fn deal_count(world: &mut DealWorld, text: String) {
    assert_eq!(world.controller().presenter().last_count(), Some(text));
}

#[then(expr = "the cards shown are {string}")]
fn cards_shown(world: &mut DealWorld, ids: String) {
    let expected = ids.split(',').map(|s| s.trim().to_string()).collect::<Vec<_>>();
    let cards = world.controller().presenter().last_cards().expect("No cards were rendered");
    let shown = cards.into_iter().map(|c| c.key.deal_id.to_string()).collect::<Vec<_>>();
    assert_eq!(shown, expected);
}

#[then("the empty state is shown")]
fn empty_state(world: &mut DealWorld) {
    let events = world.controller().presenter().events();
    let last_render =
        events.iter().rev().find(|e| matches!(e, PresenterEvent::Cards(_) | PresenterEvent::Empty)).cloned();
    assert_eq!(last_render, Some(PresenterEvent::Empty));
}

#[then(expr = "the card for {string} on {word} shows {string}")]
fn card_shows(world: &mut DealWorld, deal_id: String, platform: String, text: String) {
    let key = card(&deal_id, &platform);
    let cards = world.controller().presenter().last_cards().expect("No cards were rendered");
    let card = cards.into_iter().find(|c| c.key == key).expect("The card is not shown");
    let fields = [
        Some(card.title.clone()),
        Some(card.title_html.clone()),
        Some(card.platform_label.clone()),
        card.discount_badge.clone(),
        Some(card.current_price.clone()),
        card.original_price.clone(),
        Some(card.button.label.clone()),
    ];
    assert!(fields.iter().flatten().any(|f| f == &text), "'{text}' is not on the card: {card:?}");
}

//--------------------------------------       Banners       ---------------------------------------------------------
fn expected_banner(name: &str) -> &'static str {
    match name {
        "load" => LOAD_ERROR_MESSAGE,
        "order" => ORDER_ERROR_MESSAGE,
        "verification" => VERIFICATION_ERROR_MESSAGE,
        other => panic!("Unknown banner: {other}"),
    }
}

#[then(expr = "the {word} error banner is shown")]
fn error_banner_shown(world: &mut DealWorld, name: String) {
    let presenter = world.controller().presenter();
    assert_eq!(presenter.error_banners(), vec![expected_banner(&name).to_string()]);
    assert!(presenter.error_visible());
}

#[then("no error banner is shown")]
fn no_error_banner(world: &mut DealWorld) {
    assert!(world.controller().presenter().error_banners().is_empty());
}

#[then("the error banner disappears")]
async fn error_banner_disappears(world: &mut DealWorld) {
    let wait = world.controller().timings().error_banner + std::time::Duration::from_millis(100);
    tokio::time::sleep(wait).await;
    assert!(!world.controller().presenter().error_visible());
}

#[then(expr = "the success banner reads {string}")]
fn success_banner(world: &mut DealWorld, message: String) {
    assert_eq!(world.controller().presenter().success_banners(), vec![message]);
}

//--------------------------------------      Unlocking      ---------------------------------------------------------
#[when(expr = "the customer unlocks {string} on {word}")]
async fn unlock(world: &mut DealWorld, deal_id: String, platform: String) {
    let key = card(&deal_id, &platform);
    let outcome = world.controller().unlock(&key).await;
    debug!("🌍️ Unlock of {key:?} finished with {outcome:?}");
    world.unlock_outcome = Some(outcome);
}

#[when("the post-purchase delays have passed")]
async fn wait_for_timers(world: &mut DealWorld) {
    tokio::time::sleep(settle_time(world.controller().timings())).await;
}

fn unlock_outcome(world: &DealWorld) -> UnlockOutcome {
    world.unlock_outcome.clone().expect("No unlock was attempted")
}

#[then("the unlock succeeds")]
fn unlock_succeeds(world: &mut DealWorld) {
    let outcome = unlock_outcome(world);
    assert!(matches!(outcome, UnlockOutcome::Unlocked { .. }), "Got {outcome:?}");
}

#[then("the unlock fails")]
fn unlock_fails(world: &mut DealWorld) {
    assert_eq!(unlock_outcome(world), UnlockOutcome::Failed);
}

#[then("the unlock is cancelled")]
fn unlock_cancelled(world: &mut DealWorld) {
    assert_eq!(unlock_outcome(world), UnlockOutcome::Cancelled);
}

#[then("the unlocked deal is reopened")]
fn unlock_reopened(world: &mut DealWorld) {
    assert_eq!(unlock_outcome(world), UnlockOutcome::Reopened);
}

#[then(expr = "the button for {string} on {word} reads {string}")]
fn button_reads(world: &mut DealWorld, deal_id: String, platform: String, label: String) {
    let key = card(&deal_id, &platform);
    let state = world.controller().button_state(&key);
    let price = world.config.unlock_price;
    assert_eq!(state.view(price).label, label);
    if let Some(last) = world.controller().presenter().button_history(&key).pop() {
        assert_eq!(last.label, label);
    }
}

#[then(expr = "the button for {string} on {word} is idle")]
fn button_idle(world: &mut DealWorld, deal_id: String, platform: String) {
    assert_eq!(world.controller().button_state(&card(&deal_id, &platform)), UnlockState::Idle);
}

#[then(expr = "the browser opened {string}")]
fn browser_opened(world: &mut DealWorld, link: String) {
    assert_eq!(world.controller().presenter().opened_links(), vec![link]);
}

#[then(expr = "the browser opened {int} links")]
fn browser_opened_count(world: &mut DealWorld, count: usize) {
    assert_eq!(world.controller().presenter().opened_links().len(), count);
}

#[then(expr = "the checkout was opened {int} time(s)")]
fn checkout_opened(world: &mut DealWorld, count: usize) {
    assert_eq!(world.controller().widget().opened().len(), count);
}

#[then(expr = "the provider holds {int} order(s)")]
fn provider_orders(world: &mut DealWorld, count: usize) {
    assert_eq!(world.provider().provider.orders().len(), count);
}

#[then(expr = "the provider reports the last order as paid, for {int} paise, noting deal {string} on {word}")]
async fn provider_order_paid(world: &mut DealWorld, amount: i64, deal_id: String, platform: String) {
    let opened = world.controller().widget().opened();
    let order_id = opened.last().map(|o| o.order_id.clone()).expect("The checkout was never opened");
    let order = world.provider_api().fetch_order(&order_id).await.expect("Could not fetch the order");
    assert_eq!(order.status, RazorpayOrderStatus::Paid);
    assert_eq!(order.amount.value(), amount);
    assert_eq!(order.notes.get("deal_id"), Some(&deal_id));
    assert_eq!(order.notes.get("platform"), Some(&platform));
}

#[then(expr = "the order handed to the checkout is for {int} paise in {word}")]
fn order_details(world: &mut DealWorld, amount: i64, currency: String) {
    let opened = world.controller().widget().opened();
    let order = opened.last().expect("The checkout was never opened");
    assert_eq!(order.amount.value(), amount);
    assert_eq!(order.currency, currency);
    assert_eq!(order.key, KEY_ID);
}
