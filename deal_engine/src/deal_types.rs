use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

//--------------------------------------      Platform       ---------------------------------------------------------
/// The retailer a deal comes from. The vocabulary is fixed; the lowercase name is used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Flipkart,
    Amazon,
    Jiomart,
    Myntra,
    Swiggy,
    Bigbasket,
}

impl Platform {
    pub const ALL: [Platform; 6] =
        [Platform::Flipkart, Platform::Amazon, Platform::Jiomart, Platform::Myntra, Platform::Swiggy, Platform::Bigbasket];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Flipkart => "flipkart",
            Platform::Amazon => "amazon",
            Platform::Jiomart => "jiomart",
            Platform::Myntra => "myntra",
            Platform::Swiggy => "swiggy",
            Platform::Bigbasket => "bigbasket",
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Platform not supported: {0}")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//--------------------------------------       DealId        ---------------------------------------------------------
/// Deal identifiers are opaque strings. Some catalogues emit them as numbers, so both are accepted when
/// deserializing; they are always serialized as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DealId(pub String);

impl DealId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for DealId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DealId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for DealId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        string_or_number(deserializer).map(Self)
    }
}

//--------------------------------------    DisplayPrice     ---------------------------------------------------------
/// A price exactly as the retailer shows it, e.g. `"₹1,299"` or `100`. Prices are displayed, never computed on, apart
/// from the discount calculation in [`crate::helpers::calculate_discount`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DisplayPrice(pub String);

impl DisplayPrice {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for DisplayPrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S: Into<String>> From<S> for DisplayPrice {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

impl<'de> Deserialize<'de> for DisplayPrice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        string_or_number(deserializer).map(Self)
    }
}

//--------------------------------------        Deal         ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: DealId,
    #[serde(default)]
    pub title: String,
    pub platform: Platform,
    pub current_price: DisplayPrice,
    #[serde(default, deserialize_with = "empty_price_as_none", skip_serializing_if = "Option::is_none")]
    pub original_price: Option<DisplayPrice>,
    #[serde(default)]
    pub discount_percentage: f64,
    /// The retailer's product page. Only the server needs this (to build affiliate links), so it is never sent to
    /// clients.
    #[serde(default, skip_serializing)]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Deal {
    pub fn new<S: Into<String>>(id: S, platform: Platform, current_price: DisplayPrice) -> Self {
        Self {
            id: DealId::new(id),
            title: String::default(),
            platform,
            current_price,
            original_price: None,
            discount_percentage: 0.0,
            url: None,
            image_url: None,
        }
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_original_price(mut self, price: DisplayPrice) -> Self {
        self.original_price = Some(price);
        self
    }

    pub fn with_discount(mut self, discount_percentage: f64) -> Self {
        self.discount_percentage = discount_percentage;
        self
    }

    pub fn with_url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = Some(url.into());
        self
    }

    /// True if the original price is known and differs from the current price.
    pub fn is_reduced(&self) -> bool {
        self.original_price.as_ref().is_some_and(|p| p != &self.current_price)
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(serde_json::Number),
    }
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => Ok(s),
        StringOrNumber::Number(n) => Ok(n.to_string()),
    }
}

fn empty_price_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DisplayPrice>, D::Error> {
    let value = Option::<DisplayPrice>::deserialize(deserializer)?;
    match value {
        Some(p) if p.0.trim().is_empty() => Ok(None),
        Some(p) => Ok(Some(p)),
        None => Ok(None),
    }
}
