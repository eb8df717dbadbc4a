//! Just enough of the Razorpay orders API for the server to create orders against.
use std::{
    collections::HashMap,
    io,
    sync::{Arc, Mutex, MutexGuard},
    time::{SystemTime, UNIX_EPOCH},
};

use actix_web::{dev::ServerHandle, get, post, web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use ds_common::Paise;
use log::*;
use razorpay_tools::{NewRazorpayOrder, RazorpayOrder, RazorpayOrderStatus};
use serde_json::json;

#[derive(Debug, Default)]
struct ProviderState {
    orders: HashMap<String, RazorpayOrder>,
    next_id: u64,
    refusing: bool,
}

/// The provider's order book. Clones share it.
#[derive(Debug, Clone, Default)]
pub struct FakeRazorpay {
    state: Arc<Mutex<ProviderState>>,
}

impl FakeRazorpay {
    fn lock(&self) -> MutexGuard<'_, ProviderState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// While refusing, every new order is rejected as a bad request.
    pub fn refuse_orders(&self, refuse: bool) {
        self.lock().refusing = refuse;
    }

    pub fn orders(&self) -> Vec<RazorpayOrder> {
        let mut orders = self.lock().orders.values().cloned().collect::<Vec<_>>();
        orders.sort_by(|a, b| a.id.cmp(&b.id));
        orders
    }

    pub fn order(&self, order_id: &str) -> Option<RazorpayOrder> {
        self.lock().orders.get(order_id).cloned()
    }

    pub fn mark_paid(&self, order_id: &str) {
        if let Some(order) = self.lock().orders.get_mut(order_id) {
            order.attempts += 1;
            order.amount_paid = order.amount;
            order.amount_due = Paise::default();
            order.status = RazorpayOrderStatus::Paid;
        }
    }

    fn create(&self, request: NewRazorpayOrder) -> Option<RazorpayOrder> {
        let mut state = self.lock();
        if state.refusing {
            return None;
        }
        state.next_id += 1;
        let created_at = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs() as i64).unwrap_or_default();
        let order = RazorpayOrder {
            id: format!("order_e2e{:06}", state.next_id),
            amount: request.amount,
            amount_paid: Paise::default(),
            amount_due: request.amount,
            currency: request.currency,
            receipt: request.receipt,
            status: RazorpayOrderStatus::Created,
            attempts: 0,
            notes: request.notes,
            created_at,
        };
        state.orders.insert(order.id.clone(), order.clone());
        Some(order)
    }
}

fn provider_error(description: &str) -> serde_json::Value {
    json!({ "error": { "code": "BAD_REQUEST_ERROR", "description": description } })
}

fn is_authenticated(req: &HttpRequest) -> bool {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .is_some_and(|h| h.starts_with("Basic "))
}

#[post("/v1/orders")]
async fn create_order(
    req: HttpRequest,
    provider: web::Data<FakeRazorpay>,
    body: web::Json<NewRazorpayOrder>,
) -> impl Responder {
    if !is_authenticated(&req) {
        return HttpResponse::Unauthorized().json(provider_error("Authentication failed"));
    }
    match provider.create(body.into_inner()) {
        Some(order) => {
            debug!("🌍️ Fake Razorpay created {}", order.id);
            HttpResponse::Ok().json(order)
        },
        None => HttpResponse::BadRequest().json(provider_error("Order creation is disabled for this account")),
    }
}

#[get("/v1/orders/{order_id}")]
async fn fetch_order(req: HttpRequest, provider: web::Data<FakeRazorpay>, path: web::Path<String>) -> impl Responder {
    if !is_authenticated(&req) {
        return HttpResponse::Unauthorized().json(provider_error("Authentication failed"));
    }
    match provider.order(&path.into_inner()) {
        Some(order) => HttpResponse::Ok().json(order),
        None => HttpResponse::BadRequest().json(provider_error("The id provided does not exist")),
    }
}

pub struct FakeRazorpayServer {
    pub provider: FakeRazorpay,
    /// The base url to configure the Razorpay client with.
    pub api_url: String,
    handle: ServerHandle,
}

impl FakeRazorpayServer {
    /// Binds to a free local port and starts serving on the current Tokio runtime.
    pub fn start() -> io::Result<Self> {
        let provider = FakeRazorpay::default();
        let data = web::Data::new(provider.clone());
        let srv = HttpServer::new(move || App::new().app_data(data.clone()).service(create_order).service(fetch_order))
            .workers(1)
            .bind(("127.0.0.1", 0))?;
        let addr = srv
            .addrs()
            .first()
            .copied()
            .ok_or_else(|| io::Error::new(io::ErrorKind::AddrNotAvailable, "The fake provider did not bind"))?;
        let srv = srv.run();
        let handle = srv.handle();
        tokio::spawn(srv);
        info!("🌍️ Fake Razorpay listening on {addr}");
        Ok(Self { provider, api_url: format!("http://{addr}/v1"), handle })
    }

    pub async fn stop(&self) {
        self.handle.stop(true).await;
    }
}
