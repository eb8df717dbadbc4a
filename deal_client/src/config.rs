use std::{env, time::Duration};

use ds_common::{
    helpers::{env_millis, env_value},
    Paise,
};
use log::*;
use url::Url;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_UNLOCK_PRICE: Paise = Paise::from_paise(89);

/// How long the various transient parts of the view stay up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiTimings {
    /// An error banner hides itself after this long.
    pub error_banner: Duration,
    /// The "deal unlocked" banner is removed after this long.
    pub success_banner: Duration,
    /// Time from a verified payment to opening the affiliate link.
    pub redirect_delay: Duration,
    /// Time from a verified payment to relabelling the button "View Deal".
    pub relabel_delay: Duration,
    /// Time from the view becoming visible again to reloading the deals.
    pub visibility_refresh: Duration,
    /// Delay before the first card of a fresh render is revealed, and between each card after that.
    pub reveal_stagger: Duration,
}

impl Default for UiTimings {
    fn default() -> Self {
        Self {
            error_banner: Duration::from_millis(5000),
            success_banner: Duration::from_millis(3000),
            redirect_delay: Duration::from_millis(1000),
            relabel_delay: Duration::from_millis(3000),
            visibility_refresh: Duration::from_millis(1000),
            reveal_stagger: Duration::from_millis(100),
        }
    }
}

impl UiTimings {
    pub fn from_env_or_default() -> Self {
        let defaults = Self::default();
        Self {
            error_banner: millis_or("DS_ERROR_BANNER_MS", defaults.error_banner),
            success_banner: millis_or("DS_SUCCESS_BANNER_MS", defaults.success_banner),
            redirect_delay: millis_or("DS_REDIRECT_DELAY_MS", defaults.redirect_delay),
            relabel_delay: millis_or("DS_RELABEL_DELAY_MS", defaults.relabel_delay),
            visibility_refresh: millis_or("DS_VISIBILITY_REFRESH_MS", defaults.visibility_refresh),
            reveal_stagger: defaults.reveal_stagger,
        }
    }
}

fn millis_or(name: &str, default: Duration) -> Duration {
    match env_millis(name) {
        Some(Ok(d)) => d,
        Some(Err(e)) => {
            warn!("🪛️ {e} Using {}ms instead.", default.as_millis());
            default
        },
        None => default,
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: Url,
    /// The unlock fee, as shown on every unlock button. The server decides what is actually charged.
    pub unlock_price: Paise,
    pub timings: UiTimings,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            unlock_price: DEFAULT_UNLOCK_PRICE,
            timings: UiTimings::default(),
        }
    }
}

fn default_server_url() -> Url {
    Url::parse(DEFAULT_SERVER_URL).unwrap_or_else(|e| unreachable!("The default server url is valid. {e}"))
}

impl ClientConfig {
    pub fn new(server_url: Url) -> Self {
        Self { server_url, ..Default::default() }
    }

    pub fn with_timings(mut self, timings: UiTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn from_env_or_default() -> Self {
        let server_url = match env::var("DS_SERVER_URL") {
            Ok(s) => Url::parse(&s).unwrap_or_else(|e| {
                error!("🪛️ DS_SERVER_URL ({s}) is not a valid URL. {e}. Using {DEFAULT_SERVER_URL} instead.");
                default_server_url()
            }),
            Err(_) => {
                info!("🪛️ DS_SERVER_URL is not set. Using {DEFAULT_SERVER_URL}.");
                default_server_url()
            },
        };
        let unlock_price = match env_value::<Paise>("DS_UNLOCK_PRICE_PAISE") {
            Some(Ok(p)) => p,
            Some(Err(e)) => {
                warn!("🪛️ {e} Showing {DEFAULT_UNLOCK_PRICE} as the unlock price.");
                DEFAULT_UNLOCK_PRICE
            },
            None => DEFAULT_UNLOCK_PRICE,
        };
        Self { server_url, unlock_price, timings: UiTimings::from_env_or_default() }
    }
}
