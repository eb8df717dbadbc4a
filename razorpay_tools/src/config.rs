use log::*;
use ds_common::Secret;

pub const DEFAULT_RAZORPAY_API_URL: &str = "https://api.razorpay.com/v1";

#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    /// The public key id, e.g. `rzp_test_1DP5mmOlF5G5ag`. The checkout widget is opened with this.
    pub key_id: String,
    pub key_secret: Secret<String>,
    pub api_url: String,
}

impl Default for RazorpayConfig {
    fn default() -> Self {
        Self { key_id: String::default(), key_secret: Secret::default(), api_url: DEFAULT_RAZORPAY_API_URL.into() }
    }
}

impl RazorpayConfig {
    pub fn new<S1: Into<String>, S2: Into<String>>(key_id: S1, key_secret: S2) -> Self {
        Self { key_id: key_id.into(), key_secret: Secret::new(key_secret.into()), ..Default::default() }
    }

    pub fn with_api_url<S: Into<String>>(mut self, api_url: S) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn new_from_env_or_default() -> Self {
        let key_id = std::env::var("DS_RAZORPAY_KEY_ID").unwrap_or_else(|_| {
            warn!("🪛️ DS_RAZORPAY_KEY_ID not set. Orders cannot be created until it is.");
            String::default()
        });
        let key_secret = Secret::new(std::env::var("DS_RAZORPAY_KEY_SECRET").unwrap_or_else(|_| {
            warn!("🪛️ DS_RAZORPAY_KEY_SECRET not set. Orders cannot be created or verified until it is.");
            String::default()
        }));
        let api_url = std::env::var("DS_RAZORPAY_API_URL").unwrap_or_else(|_| {
            info!("🪛️ DS_RAZORPAY_API_URL not set, using {DEFAULT_RAZORPAY_API_URL}");
            DEFAULT_RAZORPAY_API_URL.to_string()
        });
        Self { key_id, key_secret, api_url: api_url.trim_end_matches('/').to_string() }
    }
}
