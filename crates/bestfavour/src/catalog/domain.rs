use serde::{Deserialize, Serialize};
use std::fmt;

/// Substring that marks a listing as bookable today.
pub const AVAILABLE_TODAY: &str = "Available Today";
const NEXT_DAY: &str = "Next Day";

pub const MAX_RATING: f32 = 5.0;

/// Identifier wrapper for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub u32);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single offered service as shown to end users. Fixed once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub provider: String,
    pub rating: f32,
    pub reviews: u32,
    pub price: f64,
    pub price_unit: String,
    pub location: String,
    pub distance: f64,
    pub availability: String,
    pub tags: Vec<String>,
    pub description: String,
    pub image: String,
}

impl Listing {
    /// Checks the numeric invariants the engine relies on for ordering.
    pub fn validate(&self) -> Result<(), ListingDefect> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ListingDefect::Price(self.price));
        }
        if !self.rating.is_finite() || !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(ListingDefect::Rating(self.rating));
        }
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(ListingDefect::Distance(self.distance));
        }
        Ok(())
    }

    pub fn availability_rank(&self) -> AvailabilityRank {
        AvailabilityRank::from_label(&self.availability)
    }

    pub fn is_available_today(&self) -> bool {
        self.availability.contains(AVAILABLE_TODAY)
    }

    /// Case-insensitive match against title, description, or any tag.
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// Invariant violations that make a listing unusable for filtering.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ListingDefect {
    #[error("price {0} is negative or not a number")]
    Price(f64),
    #[error("rating {0} is outside 0..=5")]
    Rating(f32),
    #[error("distance {0} is negative or not a number")]
    Distance(f64),
}

/// Coarse ordering of availability labels, soonest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityRank {
    Today,
    NextDay,
    Later,
}

impl AvailabilityRank {
    pub fn from_label(label: &str) -> Self {
        if label.contains(AVAILABLE_TODAY) {
            Self::Today
        } else if label.contains(NEXT_DAY) {
            Self::NextDay
        } else {
            Self::Later
        }
    }
}

/// Two listings shipped with the marketplace so search works before any import.
pub fn seed_listings() -> Vec<Listing> {
    const IMAGE: &str = "https://images.unsplash.com/photo-1581578731548-c64695cc6952?auto=format&fit=crop&w=300&q=80";

    vec![
        Listing {
            id: ListingId(1),
            title: "Professional House Cleaning".to_string(),
            provider: "Clean & Shine Services".to_string(),
            rating: 4.8,
            reviews: 156,
            price: 80.0,
            price_unit: "per session".to_string(),
            location: "New York, NY".to_string(),
            distance: 2.5,
            availability: "Available Today".to_string(),
            tags: vec![
                "Deep Cleaning".to_string(),
                "Residential".to_string(),
                "Commercial".to_string(),
            ],
            description:
                "Professional cleaning service with eco-friendly products and experienced staff."
                    .to_string(),
            image: IMAGE.to_string(),
        },
        Listing {
            id: ListingId(2),
            title: "Expert Plumbing Services".to_string(),
            provider: "Quick Fix Plumbing".to_string(),
            rating: 4.9,
            reviews: 203,
            price: 95.0,
            price_unit: "per hour".to_string(),
            location: "Brooklyn, NY".to_string(),
            distance: 3.8,
            availability: "Next Day Available".to_string(),
            tags: vec![
                "Emergency".to_string(),
                "Repairs".to_string(),
                "Installation".to_string(),
            ],
            description:
                "24/7 emergency plumbing services with licensed and insured professionals."
                    .to_string(),
            image: IMAGE.to_string(),
        },
    ]
}
