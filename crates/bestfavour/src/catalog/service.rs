use serde::Serialize;

use super::categories::{CategoryDirectory, CategoryError, CategorySlug, ServiceCategory};
use super::criteria::FilterCriteria;
use super::domain::Listing;
use super::engine::{filter_listings, FilterError};
use super::providers::{ProviderDirectory, ProviderSummary};

/// Read-only catalog shared by the HTTP handlers once the listing set is loaded.
#[derive(Debug, Clone)]
pub struct CatalogService {
    listings: Vec<Listing>,
    categories: CategoryDirectory,
    providers: ProviderDirectory,
}

/// Search result for a single category page.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryListings {
    pub category: String,
    pub title: String,
    pub total: usize,
    pub listings: Vec<Listing>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogServiceError {
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Filter(#[from] FilterError),
}

impl CatalogService {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            categories: CategoryDirectory::standard(),
            providers: ProviderDirectory::standard(),
        }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn search(
        &self,
        category: &str,
        criteria: &FilterCriteria,
    ) -> Result<CategoryListings, CatalogServiceError> {
        let slug = CategorySlug::parse(Some(category))?;
        let listings = filter_listings(&self.listings, criteria)?;

        Ok(CategoryListings {
            category: slug.as_str().to_string(),
            title: slug.title(),
            total: listings.len(),
            listings,
        })
    }

    pub fn categories(&self, query: &str) -> Vec<ServiceCategory> {
        self.categories.search(query).into_iter().cloned().collect()
    }

    pub fn popular_providers(&self, limit: usize) -> Vec<ProviderSummary> {
        self.providers.popular(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::criteria::SortKey;
    use crate::catalog::domain::seed_listings;

    #[test]
    fn search_validates_category_before_filtering() {
        let service = CatalogService::new(seed_listings());
        let err = service
            .search("astrology", &FilterCriteria::default())
            .expect_err("unknown category");
        assert!(matches!(
            err,
            CatalogServiceError::Category(CategoryError::Unknown(_))
        ));
    }

    #[test]
    fn search_returns_titled_results() {
        let service = CatalogService::new(seed_listings());
        let criteria = FilterCriteria::default().with_sort(SortKey::Rating);
        let result = service.search("plumbing", &criteria).expect("search runs");
        assert_eq!(result.title, "Plumbing");
        assert_eq!(result.total, 2);
        assert_eq!(result.listings[0].rating, 4.9);
    }
}
