//! A per-platform, time-limited store of the most recently fetched deals.
//!
//! Each platform is cached independently, so a slow or failing retailer does not invalidate the deals of the others.
//! Entries are never evicted; a stale entry is simply ignored by [`DealCache::get_fresh`] and replaced by the next
//! [`DealCache::store`].
use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use log::*;
use tokio::sync::RwLock;

use crate::deal_types::{Deal, DealId, Platform};

pub const DEFAULT_CACHE_TTL: Duration = Duration::minutes(5);

#[derive(Debug, Clone)]
struct CachedDeals {
    deals: Vec<Deal>,
    fetched_at: DateTime<Utc>,
}

/// Cloning a `DealCache` is cheap and every clone shares the same entries.
#[derive(Debug, Clone)]
pub struct DealCache {
    ttl: Duration,
    entries: Arc<RwLock<HashMap<Platform, CachedDeals>>>,
}

impl Default for DealCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

impl DealCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: Arc::new(RwLock::new(HashMap::new())) }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached deals for `platform` if they were stored less than one TTL before `now`.
    pub async fn get_fresh_at(&self, platform: Platform, now: DateTime<Utc>) -> Option<Vec<Deal>> {
        let entries = self.entries.read().await;
        let entry = entries.get(&platform)?;
        if now - entry.fetched_at < self.ttl {
            trace!("🗂️ Cache hit for {platform} ({} deals)", entry.deals.len());
            Some(entry.deals.clone())
        } else {
            trace!("🗂️ Cache entry for {platform} is stale");
            None
        }
    }

    pub async fn get_fresh(&self, platform: Platform) -> Option<Vec<Deal>> {
        self.get_fresh_at(platform, Utc::now()).await
    }

    pub async fn store_at(&self, platform: Platform, deals: Vec<Deal>, fetched_at: DateTime<Utc>) {
        debug!("🗂️ Caching {} deals for {platform}", deals.len());
        let mut entries = self.entries.write().await;
        entries.insert(platform, CachedDeals { deals, fetched_at });
    }

    pub async fn store(&self, platform: Platform, deals: Vec<Deal>) {
        self.store_at(platform, deals, Utc::now()).await
    }

    /// Looks up a deal among the cached deals for `platform`, whether or not the entry is still fresh. A customer who
    /// paid for a deal they saw a few minutes ago should still receive it.
    pub async fn find_deal(&self, platform: Platform, deal_id: &DealId) -> Option<Deal> {
        let entries = self.entries.read().await;
        entries.get(&platform).and_then(|e| e.deals.iter().find(|d| &d.id == deal_id).cloned())
    }
}
