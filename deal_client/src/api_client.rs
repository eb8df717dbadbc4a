use std::fmt::Display;

use deal_engine::{
    api_objects::{
        CreateOrderRequest,
        DealsResponse,
        HealthStatus,
        OrderDetails,
        PlatformDealsResponse,
        VerificationResult,
        VerifyPaymentRequest,
    },
    deal_types::{Deal, Platform},
};
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    RequestBuilder,
};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{errors::ClientError, traits::DealBackend};

/// HTTP client for the DealStream server.
#[derive(Debug, Clone)]
pub struct DealServerClient {
    client: Client,
    server: Url,
}

impl DealServerClient {
    pub fn new(mut server: Url) -> Result<Self, ClientError> {
        // Endpoints are joined relative to the server url, so it has to read as a directory.
        if !server.path().ends_with('/') {
            let path = format!("{}/", server.path());
            server.set_path(&path);
        }
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .user_agent("DealStream Client")
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self { client, server })
    }

    pub fn server(&self) -> &str {
        self.server.as_str()
    }

    pub fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.server.join(path.trim_start_matches('/')).map_err(|e| ClientError::InvalidUrl(format!("{path}: {e}")))
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.send(self.client.get(self.url("/health")?)).await
    }

    pub async fn deals(&self, force_refresh: bool) -> Result<DealsResponse, ClientError> {
        let mut req = self.client.get(self.url("/deals")?);
        if force_refresh {
            req = req.query(&[("refresh", "true")]);
        }
        self.send(req).await
    }

    pub async fn platform_deals(&self, platform: Platform, force_refresh: bool) -> Result<PlatformDealsResponse, ClientError> {
        let mut req = self.client.get(self.url(&format!("/deals/{platform}"))?);
        if force_refresh {
            req = req.query(&[("refresh", "true")]);
        }
        self.send(req).await
    }

    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<OrderDetails, ClientError> {
        self.send(self.client.post(self.url("/create_order")?).json(request)).await
    }

    pub async fn verify_payment(&self, request: &VerifyPaymentRequest) -> Result<VerificationResult, ClientError> {
        self.send(self.client.post(self.url("/verify_payment")?).json(request)).await
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let res = req.send().await?;
        let status = res.status();
        if !status.is_success() {
            let message = res.text().await.unwrap_or_default();
            debug!("Request failed with {status}. {message}");
            return Err(ClientError::Status { status: status.as_u16(), message });
        }
        res.json::<T>().await.map_err(|e| ClientError::Decode(e.to_string()))
    }
}

impl Display for DealServerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DealStream @ {}", self.server)
    }
}

impl DealBackend for DealServerClient {
    async fn fetch_deals(&self, force_refresh: bool) -> Result<Vec<Deal>, ClientError> {
        self.deals(force_refresh).await.map(|r| r.deals)
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> Result<OrderDetails, ClientError> {
        DealServerClient::create_order(self, request).await
    }

    async fn verify_payment(&self, request: &VerifyPaymentRequest) -> Result<VerificationResult, ClientError> {
        DealServerClient::verify_payment(self, request).await
    }
}
