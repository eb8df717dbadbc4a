use std::{fmt::Debug, io::Write, sync::mpsc::channel, time::Duration};

use actix_web::dev::ServerHandle;
use cucumber::World;
use deal_client::{
    test_utils::RecordingPresenter,
    DealController,
    DealServerClient,
    LoadOutcome,
    UiTimings,
    UnlockOutcome,
};
use deal_engine::{
    deal_types::Platform,
    helpers::AffiliateIds,
    sources::JsonFileDealSource,
    test_utils::sample_catalogue,
};
use deal_server::{config::ServerConfig, integrations::razorpay::RazorpayGateway, server::create_server_instance};
use e2e::{FakeRazorpayServer, SigningCheckout};
use log::*;
use razorpay_tools::{RazorpayApi, RazorpayConfig};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use tempfile::NamedTempFile;

pub const KEY_ID: &str = "rzp_test_e2e";
pub const KEY_SECRET: &str = "e2e_key_secret";

pub type E2eController = DealController<DealServerClient, SigningCheckout, RecordingPresenter>;

/// Timings short enough that scenarios can wait them out.
pub fn fast_timings() -> UiTimings {
    UiTimings {
        error_banner: Duration::from_millis(400),
        success_banner: Duration::from_millis(300),
        redirect_delay: Duration::from_millis(100),
        relabel_delay: Duration::from_millis(300),
        visibility_refresh: Duration::from_millis(100),
        reveal_stagger: Duration::from_millis(10),
    }
}

#[derive(World)]
pub struct DealWorld {
    pub config: ServerConfig,
    pub catalogue: Option<NamedTempFile>,
    pub provider: Option<FakeRazorpayServer>,
    pub server_handle: Option<ServerHandle>,
    pub controller: Option<E2eController>,
    pub load_outcome: Option<LoadOutcome>,
    pub unlock_outcome: Option<UnlockOutcome>,
    pub response: Option<(StatusCode, String)>,
}

impl Debug for DealWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DealWorld")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("server_running", &self.server_handle.is_some())
            .field("load_outcome", &self.load_outcome)
            .field("unlock_outcome", &self.unlock_outcome)
            .field("response", &self.response)
            .finish()
    }
}

impl Default for DealWorld {
    fn default() -> Self {
        let _ = env_logger::try_init().ok();
        let mut config = ServerConfig::new("127.0.0.1", 20000 + rand::random::<u16>() % 10_000);
        config.affiliate_ids = AffiliateIds::new()
            .with_id(Platform::Amazon, "dealstream-21")
            .with_id(Platform::Flipkart, "dealstream")
            .with_id(Platform::Bigbasket, "ds_bb");
        Self {
            config,
            catalogue: None,
            provider: None,
            server_handle: None,
            controller: None,
            load_outcome: None,
            unlock_outcome: None,
            response: None,
        }
    }
}

impl DealWorld {
    pub fn write_catalogue(&mut self, json: &str) {
        let mut file = NamedTempFile::new().expect("Could not create the catalogue file");
        file.write_all(json.as_bytes()).expect("Could not write the catalogue");
        debug!("🌍️ Catalogue written to {}", file.path().display());
        self.config.deals_file = file.path().to_path_buf();
        self.catalogue = Some(file);
    }

    pub fn write_sample_catalogue(&mut self) {
        self.write_catalogue(&sample_catalogue());
    }

    pub fn start_provider(&mut self) {
        let provider = FakeRazorpayServer::start().expect("Could not start the fake payment provider");
        self.config.razorpay = RazorpayConfig::new(KEY_ID, KEY_SECRET).with_api_url(provider.api_url.as_str());
        self.provider = Some(provider);
    }

    pub fn provider(&self) -> &FakeRazorpayServer {
        self.provider.as_ref().expect("The payment provider has not been started")
    }

    pub fn provider_api(&self) -> RazorpayApi {
        RazorpayApi::new(self.config.razorpay.clone()).expect("Could not create the Razorpay client")
    }

    pub async fn start_server(&mut self) {
        if self.catalogue.is_none() {
            self.write_sample_catalogue();
        }
        if self.provider.is_none() {
            self.start_provider();
        }
        let config = self.config.clone();
        info!("🌍️ Starting server on {}:{}", config.host, config.port);
        let (tx, rx) = channel();
        tokio::spawn(async move {
            let source = JsonFileDealSource::new(&config.deals_file);
            let gateway = RazorpayGateway::new(config.razorpay.clone()).expect("Error creating the payment gateway");
            let srv = create_server_instance(config, source, gateway).expect("Error creating server instance");
            let _res = tx.send(srv.handle());
            match srv.await {
                Ok(_) => info!("🌍️ Server shut down"),
                Err(e) => warn!("🌍️ Server error: {e}"),
            }
        });
        let handle = rx.recv().expect("The server did not start");
        info!("🌍️ Server started");
        self.server_handle = Some(handle);
    }

    pub async fn stop_server(&mut self) {
        if let Some(h) = self.server_handle.take() {
            info!("🌍️ Stopping server");
            h.stop(true).await;
        }
    }

    pub async fn shut_down(&mut self) {
        self.stop_server().await;
        if let Some(provider) = self.provider.take() {
            provider.stop().await;
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.config.host, self.config.port)
    }

    pub fn open_client(&mut self) {
        let url = self.server_url().parse().expect("Invalid server url");
        let client = DealServerClient::new(url).expect("Could not create the client");
        let checkout = SigningCheckout::new(KEY_SECRET, self.provider().provider.clone());
        let controller = DealController::new(
            client,
            checkout,
            RecordingPresenter::default(),
            self.config.unlock_price,
            fast_timings(),
        );
        self.controller = Some(controller);
    }

    pub fn controller(&self) -> &E2eController {
        self.controller.as_ref().expect("The client has not been opened")
    }

    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        self.request(Method::GET, path, |req| req).await
    }

    pub async fn post_json(&self, path: &str, body: &str) -> (StatusCode, String) {
        let body = body.to_string();
        self.request(Method::POST, path, |req| req.header("Content-Type", "application/json").body(body)).await
    }

    pub async fn request<F>(&self, method: Method, path: &str, req: F) -> (StatusCode, String)
    where F: FnOnce(RequestBuilder) -> RequestBuilder {
        let url = format!("{}{path}", self.server_url());
        debug!("🌍️ Querying {url}");
        let client = Client::new();
        let request = req(client.request(method, url));
        let res = request.send().await.expect("Error getting response");
        let code = res.status();
        let body = res.text().await.expect("Error parsing response body");
        (code, body)
    }
}
