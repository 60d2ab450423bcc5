//! Page-level state wrapped around the filter engine.
//!
//! A [`ListingBrowser`] validates the category route parameter, waits out the
//! simulated fetch delay, and re-runs the engine on every criteria change.
//! Engine failures never escape: they are logged, the previous results stay
//! on screen, and a generic message is exposed instead.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use super::categories::{CategoryError, CategorySlug};
use super::criteria::{FilterCriteria, PriceRange, SortKey};
use super::domain::Listing;
use super::engine::filter_listings;
use super::source::CatalogSource;

pub const FILTER_FAILURE: &str = "Failed to filter services";
pub const LOAD_FAILURE: &str = "Failed to load services";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserPhase {
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone)]
pub struct ListingBrowser {
    category: Result<CategorySlug, CategoryError>,
    source: Vec<Listing>,
    criteria: FilterCriteria,
    results: Vec<Listing>,
    phase: BrowserPhase,
    error: Option<String>,
}

/// Serializable snapshot for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct BrowserView {
    pub category: Option<String>,
    pub title: Option<String>,
    pub phase: BrowserPhase,
    pub error: Option<String>,
    pub criteria: FilterCriteria,
    pub listings: Vec<Listing>,
}

impl ListingBrowser {
    /// Opens the listing page for a raw category route parameter.
    pub fn open(category: Option<&str>) -> Self {
        let category = CategorySlug::parse(category);
        let (phase, error) = match &category {
            Ok(_) => (BrowserPhase::Loading, None),
            Err(err) => {
                debug!(error = %err, "rejected category route parameter");
                (BrowserPhase::Failed, Some(err.to_string()))
            }
        };

        Self {
            category,
            source: Vec::new(),
            criteria: FilterCriteria::default(),
            results: Vec::new(),
            phase,
            error,
        }
    }

    /// Waits `delay`, then replaces the listing set and runs the first filter pass.
    pub async fn load(&mut self, source: &CatalogSource, delay: Duration) {
        if self.category.is_err() {
            return;
        }

        self.phase = BrowserPhase::Loading;
        self.error = None;
        tokio::time::sleep(delay).await;

        match source.fetch() {
            Ok(listings) => {
                self.source = listings;
                self.phase = BrowserPhase::Ready;
                self.refresh();
            }
            Err(err) => {
                warn!(error = %err, source = %source.describe(), "listing load failed");
                self.phase = BrowserPhase::Failed;
                self.error = Some(LOAD_FAILURE.to_string());
            }
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.criteria.query = query.into();
        self.refresh();
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        self.criteria.price_range = range;
        self.refresh();
    }

    pub fn set_available_now(&mut self, available_now: bool) {
        self.criteria.available_now = available_now;
        self.refresh();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.criteria.sort = sort;
        self.refresh();
    }

    pub fn phase(&self) -> BrowserPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Listings to display; empty while loading.
    pub fn results(&self) -> &[Listing] {
        match self.phase {
            BrowserPhase::Loading => &[],
            _ => &self.results,
        }
    }

    pub fn view(&self) -> BrowserView {
        let category = self.category.as_ref().ok();
        BrowserView {
            category: category.map(|slug| slug.as_str().to_string()),
            title: category.map(CategorySlug::title),
            phase: self.phase,
            error: self.error.clone(),
            criteria: self.criteria.clone(),
            listings: self.results().to_vec(),
        }
    }

    fn refresh(&mut self) {
        if self.phase != BrowserPhase::Ready {
            return;
        }

        match filter_listings(&self.source, &self.criteria) {
            Ok(results) => {
                self.results = results;
                self.error = None;
            }
            Err(err) => {
                warn!(error = %err, "error filtering services");
                self.error = Some(FILTER_FAILURE.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::domain::ListingId;
    use std::path::PathBuf;

    async fn ready_browser() -> ListingBrowser {
        let mut browser = ListingBrowser::open(Some("plumbing"));
        browser.load(&CatalogSource::Seed, Duration::ZERO).await;
        browser
    }

    #[tokio::test]
    async fn loads_seed_listings_after_delay() {
        let mut browser = ListingBrowser::open(Some("house-cleaning"));
        assert_eq!(browser.phase(), BrowserPhase::Loading);
        assert!(browser.results().is_empty());

        browser
            .load(&CatalogSource::Seed, Duration::from_millis(5))
            .await;

        assert_eq!(browser.phase(), BrowserPhase::Ready);
        assert_eq!(browser.results().len(), 2);
        assert_eq!(browser.view().title.as_deref(), Some("House Cleaning"));
    }

    #[tokio::test]
    async fn invalid_category_fails_inline_without_loading() {
        let mut browser = ListingBrowser::open(Some("astrology"));
        browser.load(&CatalogSource::Seed, Duration::ZERO).await;

        assert_eq!(browser.phase(), BrowserPhase::Failed);
        assert_eq!(browser.error(), Some("Invalid category"));
        assert!(browser.results().is_empty());

        let missing = ListingBrowser::open(None);
        assert_eq!(missing.error(), Some("Category is required"));
    }

    #[tokio::test]
    async fn unreadable_catalog_reports_load_failure() {
        let mut browser = ListingBrowser::open(Some("moving"));
        let source = CatalogSource::Csv(PathBuf::from("/nonexistent/listings.csv"));
        browser.load(&source, Duration::ZERO).await;

        assert_eq!(browser.phase(), BrowserPhase::Failed);
        assert_eq!(browser.error(), Some(LOAD_FAILURE));
    }

    #[tokio::test]
    async fn criteria_changes_rerun_the_engine() {
        let mut browser = ready_browser().await;

        browser.set_sort(SortKey::PriceHigh);
        let ids: Vec<_> = browser.results().iter().map(|listing| listing.id).collect();
        assert_eq!(ids, vec![ListingId(2), ListingId(1)]);

        browser.set_available_now(true);
        assert_eq!(browser.results().len(), 1);
        assert_eq!(browser.results()[0].id, ListingId(1));

        browser.set_available_now(false);
        browser.set_query("plumbing");
        assert_eq!(browser.results().len(), 1);
        assert_eq!(browser.results()[0].id, ListingId(2));

        browser.set_query("");
        browser.set_price_range(PriceRange::new(90.0, 100.0).expect("valid range"));
        assert_eq!(browser.results().len(), 1);
        assert_eq!(browser.criteria().price_range.lo(), 90.0);
    }

    #[tokio::test]
    async fn filter_failure_keeps_stale_results() {
        let mut browser = ready_browser().await;
        let before = browser.results().to_vec();

        browser.source[0].price = f64::NAN;
        browser.set_sort(SortKey::Rating);

        assert_eq!(browser.error(), Some(FILTER_FAILURE));
        assert_eq!(browser.phase(), BrowserPhase::Ready);
        assert_eq!(browser.results(), before.as_slice());
    }
}
