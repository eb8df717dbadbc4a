use std::path::{Path, PathBuf};

use log::*;
use serde_json::{Map, Value};

use crate::{
    deal_types::{Deal, Platform},
    helpers::calculate_discount,
    traits::{DealSource, DealSourceError},
};

/// Reads deals from a JSON catalogue on disk, keyed by platform name:
///
/// ```json
/// {
///   "amazon": [ { "id": "amazon_1", "title": "Kettle", "current_price": "₹499", "original_price": "₹999",
///                 "url": "https://www.amazon.in/dp/B0ABC123" } ],
///   "flipkart": []
/// }
/// ```
///
/// The file is re-read on every fetch, so whatever keeps the catalogue up to date can simply overwrite it. Each deal is
/// tagged with the platform it is listed under, and deals without a discount have one calculated from their prices.
#[derive(Debug, Clone)]
pub struct JsonFileDealSource {
    path: PathBuf,
}

impl JsonFileDealSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_deals(platform: Platform, contents: &str) -> Result<Vec<Deal>, DealSourceError> {
        let malformed = |reason: String| DealSourceError::Malformed { platform, reason };
        let catalogue = serde_json::from_str::<Map<String, Value>>(contents).map_err(|e| malformed(e.to_string()))?;
        let entries = match catalogue.get(platform.as_str()) {
            Some(Value::Array(entries)) => entries,
            Some(_) => return Err(malformed("expected a list of deals".into())),
            None => {
                debug!("🗂️ The catalogue has no entry for {platform}");
                return Ok(Vec::new());
            },
        };
        entries
            .iter()
            .map(|entry| {
                let mut entry = match entry {
                    Value::Object(obj) => obj.clone(),
                    _ => return Err(malformed("expected each deal to be an object".into())),
                };
                entry.insert("platform".into(), Value::String(platform.as_str().into()));
                let mut deal = serde_json::from_value::<Deal>(Value::Object(entry)).map_err(|e| malformed(e.to_string()))?;
                if deal.discount_percentage == 0.0 {
                    if let Some(original) = &deal.original_price {
                        deal.discount_percentage = calculate_discount(deal.current_price.as_str(), original.as_str());
                    }
                }
                Ok(deal)
            })
            .collect()
    }
}

impl DealSource for JsonFileDealSource {
    async fn fetch_deals(&self, platform: Platform) -> Result<Vec<Deal>, DealSourceError> {
        trace!("🗂️ Reading {platform} deals from {}", self.path.display());
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| DealSourceError::Unavailable { platform, reason: format!("{}: {e}", self.path.display()) })?;
        Self::parse_deals(platform, &contents)
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;

    const CATALOGUE: &str = r#"{
        "amazon": [
            {"id": "amazon_1", "title": "Kettle", "current_price": "₹499", "original_price": "₹999",
             "url": "https://www.amazon.in/dp/B0ABC123"},
            {"id": 2, "title": "Mug", "platform": "flipkart", "current_price": 100, "discount_percentage": 10}
        ],
        "myntra": "not a list"
    }"#;

    #[tokio::test]
    async fn reads_and_tags_deals() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOGUE.as_bytes()).unwrap();
        let source = JsonFileDealSource::new(file.path());
        let deals = source.fetch_deals(Platform::Amazon).await.unwrap();
        assert_eq!(deals.len(), 2);
        assert!(deals.iter().all(|d| d.platform == Platform::Amazon));
        assert_eq!(deals[0].discount_percentage, 50.05);
        assert_eq!(deals[0].url.as_deref(), Some("https://www.amazon.in/dp/B0ABC123"));
        assert_eq!(deals[1].discount_percentage, 10.0);
        assert_eq!(deals[1].id.as_str(), "2");
    }

    #[tokio::test]
    async fn missing_platform_is_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOGUE.as_bytes()).unwrap();
        let source = JsonFileDealSource::new(file.path());
        assert!(source.fetch_deals(Platform::Swiggy).await.unwrap().is_empty());
        let err = source.fetch_deals(Platform::Myntra).await.unwrap_err();
        assert!(matches!(err, DealSourceError::Malformed { platform: Platform::Myntra, .. }));
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let source = JsonFileDealSource::new("/definitely/not/here.json");
        let err = source.fetch_deals(Platform::Amazon).await.unwrap_err();
        assert!(matches!(err, DealSourceError::Unavailable { platform: Platform::Amazon, .. }));
    }
}
