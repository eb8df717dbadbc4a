//! Affiliate link generation.
//!
//! Every retailer has its own scheme for attributing a referral. Where the retailer supports a canonical short product
//! URL (Flipkart, Amazon) the product path is extracted from the scraped URL so that tracking parameters from the
//! original page are dropped. The other retailers either take a query parameter, or go through a third-party redirect
//! service.
use std::{collections::HashMap, env};

use log::*;

use crate::deal_types::Platform;

/// The affiliate id to use for each platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffiliateIds {
    ids: HashMap<Platform, String>,
}

impl AffiliateIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id<S: Into<String>>(mut self, platform: Platform, id: S) -> Self {
        self.ids.insert(platform, id.into());
        self
    }

    /// Reads `DS_AFFILIATE_<PLATFORM>` for every supported platform, e.g. `DS_AFFILIATE_AMAZON`.
    pub fn from_env() -> Self {
        let ids = Platform::ALL
            .iter()
            .filter_map(|p| {
                let name = format!("DS_AFFILIATE_{}", p.as_str().to_uppercase());
                match env::var(&name) {
                    Ok(id) => Some((*p, id)),
                    Err(_) => {
                        warn!("🪛️ {name} is not set. Links for {p} deals will not carry an affiliate id.");
                        None
                    },
                }
            })
            .collect();
        Self { ids }
    }

    pub fn id_for(&self, platform: Platform) -> &str {
        self.ids.get(&platform).map(String::as_str).unwrap_or_default()
    }
}

/// Builds the affiliate link for a product page on the given platform.
pub fn affiliate_link(original_url: &str, platform: Platform, ids: &AffiliateIds) -> String {
    let affiliate_id = ids.id_for(platform);
    match platform {
        Platform::Flipkart => match path_after(original_url, "/p/", &['?']) {
            Some(path) => format!("https://dl.flipkart.com/dl/p/{path}?affid={affiliate_id}"),
            None => with_query_param(original_url, "affid", affiliate_id),
        },
        Platform::Amazon => match path_after(original_url, "/dp/", &['/', '?']) {
            Some(asin) => format!("https://www.amazon.in/dp/{asin}?tag={affiliate_id}"),
            None => with_query_param(original_url, "tag", affiliate_id),
        },
        Platform::Jiomart => with_query_param(original_url, "affid", affiliate_id),
        Platform::Bigbasket => with_query_param(original_url, "affiliate", affiliate_id),
        Platform::Myntra => format!(
            "https://myntra.go2cloud.org/aff_c?offer_id=6&aff_id={affiliate_id}&url={}",
            urlencoding::encode(original_url)
        ),
        Platform::Swiggy => format!(
            "https://cuelinks.com/redirect?url={}&aff_id={affiliate_id}",
            urlencoding::encode(original_url)
        ),
    }
}

/// The part of `url` that follows `marker`, up to the first of `terminators`.
fn path_after<'a>(url: &'a str, marker: &str, terminators: &[char]) -> Option<&'a str> {
    let (_, rest) = url.split_once(marker)?;
    let end = rest.find(terminators).unwrap_or(rest.len());
    let path = &rest[..end];
    (!path.is_empty()).then_some(path)
}

fn with_query_param(url: &str, key: &str, value: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{key}={value}")
}
