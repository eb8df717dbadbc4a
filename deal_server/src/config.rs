use std::{env, path::PathBuf};

use chrono::Duration;
use deal_engine::{cache::DEFAULT_CACHE_TTL, helpers::AffiliateIds};
use ds_common::{helpers::env_value, Paise, INR_CURRENCY_CODE};
use log::*;
use razorpay_tools::RazorpayConfig;

const DEFAULT_DS_HOST: &str = "127.0.0.1";
const DEFAULT_DS_PORT: u16 = 8000;
const DEFAULT_DEALS_FILE: &str = "data/deals.json";
const DEFAULT_UNLOCK_PRICE: Paise = Paise::from_paise(89);

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// The JSON catalogue that deals are read from.
    pub deals_file: PathBuf,
    /// How long a platform's deals are served from the cache before they are fetched again.
    pub cache_ttl: Duration,
    /// The fee charged to unlock a deal.
    pub unlock_price: Paise,
    pub currency: String,
    pub affiliate_ids: AffiliateIds,
    pub razorpay: RazorpayConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_DS_HOST.to_string(),
            port: DEFAULT_DS_PORT,
            deals_file: PathBuf::from(DEFAULT_DEALS_FILE),
            cache_ttl: DEFAULT_CACHE_TTL,
            unlock_price: DEFAULT_UNLOCK_PRICE,
            currency: INR_CURRENCY_CODE.to_string(),
            affiliate_ids: AffiliateIds::default(),
            razorpay: RazorpayConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("DS_HOST").ok().unwrap_or_else(|| DEFAULT_DS_HOST.into());
        let port = match env_value::<u16>("DS_PORT") {
            Some(Ok(port)) => port,
            Some(Err(e)) => {
                error!("🪛️ {e} Using the default, {DEFAULT_DS_PORT}, instead.");
                DEFAULT_DS_PORT
            },
            None => DEFAULT_DS_PORT,
        };
        let deals_file = env::var("DS_DEALS_FILE").map(PathBuf::from).unwrap_or_else(|_| {
            warn!("🪛️ DS_DEALS_FILE is not set. Reading deals from {DEFAULT_DEALS_FILE}.");
            PathBuf::from(DEFAULT_DEALS_FILE)
        });
        let cache_ttl = match env_value::<i64>("DS_CACHE_TTL_SECS") {
            Some(Ok(secs)) if secs >= 0 => Duration::seconds(secs),
            Some(Ok(secs)) => {
                error!("🪛️ DS_CACHE_TTL_SECS cannot be negative ({secs}). Using the default of 5 minutes.");
                DEFAULT_CACHE_TTL
            },
            Some(Err(e)) => {
                error!("🪛️ {e} Using the default of 5 minutes.");
                DEFAULT_CACHE_TTL
            },
            None => DEFAULT_CACHE_TTL,
        };
        let unlock_price = match env_value::<Paise>("DS_UNLOCK_PRICE_PAISE") {
            Some(Ok(price)) if price.value() > 0 => price,
            Some(Ok(price)) => {
                error!("🪛️ DS_UNLOCK_PRICE_PAISE must be positive, not {price}. Using {DEFAULT_UNLOCK_PRICE}.");
                DEFAULT_UNLOCK_PRICE
            },
            Some(Err(e)) => {
                error!("🪛️ {e} Using {DEFAULT_UNLOCK_PRICE}.");
                DEFAULT_UNLOCK_PRICE
            },
            None => DEFAULT_UNLOCK_PRICE,
        };
        let currency = env::var("DS_CURRENCY").map(|s| s.trim().to_uppercase()).unwrap_or_else(|_| {
            info!("🪛️ DS_CURRENCY is not set. Using {INR_CURRENCY_CODE}.");
            INR_CURRENCY_CODE.to_string()
        });
        let affiliate_ids = AffiliateIds::from_env();
        let razorpay = RazorpayConfig::new_from_env_or_default();
        Self { host, port, deals_file, cache_ttl, unlock_price, currency, affiliate_ids, razorpay }
    }
}
