use std::{cmp::Ordering, fmt::Debug, sync::Arc};

use futures_util::future::join_all;
use log::*;

use crate::{
    cache::DealCache,
    deal_types::{Deal, DealId, Platform},
    traits::{DealSource, DealSourceError},
};

/// `DealsApi` answers every "what's on offer" question. Deals are served from the cache while it is fresh and fetched
/// from the source otherwise.
pub struct DealsApi<S> {
    source: Arc<S>,
    cache: DealCache,
}

impl<S> Debug for DealsApi<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DealsApi")
    }
}

impl<S> Clone for DealsApi<S> {
    fn clone(&self) -> Self {
        Self { source: Arc::clone(&self.source), cache: self.cache.clone() }
    }
}

impl<S> DealsApi<S> {
    pub fn new(source: S, cache: DealCache) -> Self {
        Self { source: Arc::new(source), cache }
    }

    pub fn cache(&self) -> &DealCache {
        &self.cache
    }
}

impl<S> DealsApi<S>
where S: DealSource
{
    /// The deals for a single platform. With `force_refresh`, the cache is bypassed and the fresh result replaces
    /// whatever was cached.
    pub async fn platform_deals(&self, platform: Platform, force_refresh: bool) -> Result<Vec<Deal>, DealSourceError> {
        if !force_refresh {
            if let Some(deals) = self.cache.get_fresh(platform).await {
                return Ok(deals);
            }
        }
        debug!("🗂️ Fetching {platform} deals (forced: {force_refresh})");
        let deals = self.source.fetch_deals(platform).await?;
        self.cache.store(platform, deals.clone()).await;
        Ok(deals)
    }

    /// The deals of every platform, biggest discount first. Platforms are fetched concurrently; a platform that fails
    /// is logged and left out, so one broken retailer never empties the whole list.
    pub async fn all_deals(&self, force_refresh: bool) -> Vec<Deal> {
        let fetches = Platform::ALL.iter().map(|p| self.platform_deals(*p, force_refresh));
        let results = join_all(fetches).await;
        let mut deals = results
            .into_iter()
            .filter_map(|r| match r {
                Ok(deals) => Some(deals),
                Err(e) => {
                    warn!("🗂️ Leaving platform out of the deal list. {e}");
                    None
                },
            })
            .flatten()
            .collect::<Vec<_>>();
        deals.sort_by(|a, b| b.discount_percentage.partial_cmp(&a.discount_percentage).unwrap_or(Ordering::Equal));
        info!("🗂️ Serving {} deals", deals.len());
        deals
    }

    /// Looks up a deal the customer may have been shown. The cache is consulted first; if the platform has never been
    /// fetched, it is fetched now.
    pub async fn find_deal(&self, platform: Platform, deal_id: &DealId) -> Result<Option<Deal>, DealSourceError> {
        if let Some(deal) = self.cache.find_deal(platform, deal_id).await {
            return Ok(Some(deal));
        }
        let deals = self.platform_deals(platform, false).await?;
        Ok(deals.into_iter().find(|d| &d.id == deal_id))
    }
}
