use thiserror::Error;

use crate::deal_types::{Deal, Platform};

#[derive(Debug, Clone, Error)]
pub enum DealSourceError {
    #[error("Could not read deals for {platform}: {reason}")]
    Unavailable { platform: Platform, reason: String },
    #[error("The deal data for {platform} is malformed: {reason}")]
    Malformed { platform: Platform, reason: String },
}

#[allow(async_fn_in_trait)]
pub trait DealSource {
    /// Fetch the deals currently on offer for `platform`. Every returned deal must carry `platform` as its platform
    /// tag. A platform with no deals returns an empty list rather than an error.
    async fn fetch_deals(&self, platform: Platform) -> Result<Vec<Deal>, DealSourceError>;
}
