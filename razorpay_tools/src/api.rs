use std::sync::Arc;

use log::*;
use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::RazorpayConfig,
    data_objects::{NewRazorpayOrder, RazorpayOrder},
    RazorpayApiError,
};

#[derive(Clone)]
pub struct RazorpayApi {
    config: RazorpayConfig,
    client: Arc<Client>,
}

impl RazorpayApi {
    pub fn new(config: RazorpayConfig) -> Result<Self, RazorpayApiError> {
        let client = Client::builder().build().map_err(|e| RazorpayApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn key_id(&self) -> &str {
        self.config.key_id.as_str()
    }

    pub fn key_secret(&self) -> &str {
        self.config.key_secret.reveal().as_str()
    }

    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> Result<T, RazorpayApiError> {
        let url = self.url(path);
        trace!("💳️ Sending REST query: {method} {url}");
        let mut req = self.client.request(method, url).basic_auth(self.key_id(), Some(self.key_secret()));
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| RazorpayApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("💳️ REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| RazorpayApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| RazorpayApiError::RestResponseError(e.to_string()))?;
            Err(RazorpayApiError::QueryError { status, message })
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_url.trim_end_matches('/'))
    }

    pub async fn create_order(&self, order: &NewRazorpayOrder) -> Result<RazorpayOrder, RazorpayApiError> {
        debug!("💳️ Creating order for {} {}", order.amount, order.currency);
        let result = self.rest_query::<RazorpayOrder, _>(Method::POST, "/orders", Some(order)).await?;
        info!("💳️ Created order {}", result.id);
        Ok(result)
    }

    pub async fn fetch_order(&self, order_id: &str) -> Result<RazorpayOrder, RazorpayApiError> {
        let path = format!("/orders/{order_id}");
        debug!("💳️ Fetching order {order_id}");
        self.rest_query::<RazorpayOrder, ()>(Method::GET, &path, None).await
    }
}
