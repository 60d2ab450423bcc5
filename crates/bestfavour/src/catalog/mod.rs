//! Listing search: domain records, filter criteria, the filter/sort engine,
//! and the page and HTTP surfaces built on top of it.

pub mod browser;
pub mod categories;
pub mod criteria;
pub mod domain;
pub mod engine;
pub mod import;
pub mod providers;
pub mod router;
pub mod service;
pub mod source;

pub use browser::{BrowserPhase, BrowserView, ListingBrowser};
pub use categories::{
    CategoryDirectory, CategoryError, CategorySlug, ServiceCategory, LISTING_CATEGORIES,
};
pub use criteria::{
    CriteriaError, FilterCriteria, PriceRange, SortKey, DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE,
};
pub use domain::{seed_listings, AvailabilityRank, Listing, ListingDefect, ListingId};
pub use engine::{filter_listings, sort_listings, FilterError};
pub use import::{CatalogImportError, CatalogImporter};
pub use providers::{ProviderDirectory, ProviderSummary};
pub use router::catalog_router;
pub use service::{CatalogService, CatalogServiceError, CategoryListings};
pub use source::CatalogSource;
