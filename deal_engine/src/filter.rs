use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::deal_types::{Deal, Platform, UnknownPlatform};

/// Which deals are in view. `All` is the unfiltered case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PlatformFilter {
    #[default]
    All,
    Only(Platform),
}

impl PlatformFilter {
    pub fn matches(&self, deal: &Deal) -> bool {
        match self {
            PlatformFilter::All => true,
            PlatformFilter::Only(p) => deal.platform == *p,
        }
    }

    /// Derives the view of `deals` under this filter. The master list is never modified and the relative order of
    /// deals is kept, so calling this repeatedly with the same inputs always yields the same view.
    pub fn apply(&self, deals: &[Deal]) -> Vec<Deal> {
        deals.iter().filter(|d| self.matches(d)).cloned().collect()
    }
}

impl From<Platform> for PlatformFilter {
    fn from(p: Platform) -> Self {
        Self::Only(p)
    }
}

impl FromStr for PlatformFilter {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse::<Platform>().map(Self::Only)
        }
    }
}

impl TryFrom<String> for PlatformFilter {
    type Error = UnknownPlatform;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PlatformFilter> for String {
    fn from(f: PlatformFilter) -> Self {
        f.to_string()
    }
}

impl Display for PlatformFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformFilter::All => f.write_str("all"),
            PlatformFilter::Only(p) => write!(f, "{p}"),
        }
    }
}
