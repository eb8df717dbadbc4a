use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
        RwLock,
    },
};

use crate::{
    deal_types::{Deal, Platform},
    traits::{DealSource, DealSourceError},
};

/// A deal source backed by a map in memory. Platforms can be marked as failing to exercise the degraded paths.
///
/// Clones share state, so a test can keep a handle to change the deals after the source has been handed to a server.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDealSource {
    deals: Arc<RwLock<HashMap<Platform, Vec<Deal>>>>,
    failing: Arc<RwLock<HashSet<Platform>>>,
    fetches: Arc<AtomicUsize>,
}

impl InMemoryDealSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a source from a flat list of deals, grouped by each deal's platform tag.
    pub fn with_deals(deals: Vec<Deal>) -> Self {
        let source = Self::default();
        for deal in deals {
            source.add_deal(deal);
        }
        source
    }

    pub fn add_deal(&self, deal: Deal) {
        let mut deals = self.deals.write().unwrap_or_else(|e| e.into_inner());
        deals.entry(deal.platform).or_default().push(deal);
    }

    pub fn set_deals(&self, platform: Platform, new_deals: Vec<Deal>) {
        let mut deals = self.deals.write().unwrap_or_else(|e| e.into_inner());
        deals.insert(platform, new_deals);
    }

    pub fn set_failing(&self, platform: Platform, failing: bool) {
        let mut set = self.failing.write().unwrap_or_else(|e| e.into_inner());
        if failing {
            set.insert(platform);
        } else {
            set.remove(&platform);
        }
    }

    /// The number of times `fetch_deals` has been called, across all platforms.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl DealSource for InMemoryDealSource {
    async fn fetch_deals(&self, platform: Platform) -> Result<Vec<Deal>, DealSourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let failing = self.failing.read().unwrap_or_else(|e| e.into_inner()).contains(&platform);
        if failing {
            return Err(DealSourceError::Unavailable { platform, reason: "marked as failing".into() });
        }
        let deals = self.deals.read().unwrap_or_else(|e| e.into_inner());
        Ok(deals.get(&platform).cloned().unwrap_or_default())
    }
}
