use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MIN_PRICE: f64 = 0.0;
pub const DEFAULT_MAX_PRICE: f64 = 200.0;

/// Inclusive price window. Construction enforces `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    lo: f64,
    hi: f64,
}

impl PriceRange {
    pub fn new(lo: f64, hi: f64) -> Result<Self, CriteriaError> {
        if !lo.is_finite() || !hi.is_finite() || lo < 0.0 {
            return Err(CriteriaError::InvalidBound { lo, hi });
        }
        if lo > hi {
            return Err(CriteriaError::InvertedRange { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    pub const fn lo(&self) -> f64 {
        self.lo
    }

    pub const fn hi(&self) -> f64 {
        self.hi
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.lo && price <= self.hi
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            lo: DEFAULT_MIN_PRICE,
            hi: DEFAULT_MAX_PRICE,
        }
    }
}

impl<'de> Deserialize<'de> for PriceRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            lo: f64,
            hi: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        PriceRange::new(raw.lo, raw.hi).map_err(serde::de::Error::custom)
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Relevance,
    Rating,
    PriceLow,
    PriceHigh,
    Distance,
    Availability,
}

impl SortKey {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Relevance,
            Self::Rating,
            Self::PriceLow,
            Self::PriceHigh,
            Self::Distance,
            Self::Availability,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Rating => "rating",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Distance => "distance",
            Self::Availability => "availability",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Relevance => "Most Relevant",
            Self::Rating => "Highest Rated",
            Self::PriceLow => "Price: Low to High",
            Self::PriceHigh => "Price: High to Low",
            Self::Distance => "Distance",
            Self::Availability => "Availability",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CriteriaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| CriteriaError::UnknownSortKey(value.to_string()))
    }
}

/// Active search and sort parameters for the listing view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub query: String,
    pub price_range: PriceRange,
    pub available_now: bool,
    pub sort: SortKey,
}

impl FilterCriteria {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_price_range(mut self, price_range: PriceRange) -> Self {
        self.price_range = price_range;
        self
    }

    pub fn with_available_now(mut self, available_now: bool) -> Self {
        self.available_now = available_now;
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Lowercased query, or `None` when the query is empty.
    pub(crate) fn needle(&self) -> Option<String> {
        if self.query.is_empty() {
            None
        } else {
            Some(self.query.to_lowercase())
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CriteriaError {
    #[error("price range [{lo}, {hi}] is inverted")]
    InvertedRange { lo: f64, hi: f64 },
    #[error("price bounds [{lo}, {hi}] must be finite and non-negative")]
    InvalidBound { lo: f64, hi: f64 },
    #[error("unknown sort key '{0}'")]
    UnknownSortKey(String),
}
