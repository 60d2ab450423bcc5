//! Filtering and ordering of catalog listings.
//!
//! The engine is a pure function of the source listings and the active
//! [`FilterCriteria`]. Predicates are combined with AND semantics and the
//! sort is stable, so listings that compare equal keep their source order.

use std::cmp::Ordering;

use tracing::debug;

use super::criteria::{FilterCriteria, SortKey};
use super::domain::{Listing, ListingDefect, ListingId};

/// Raised when a listing cannot be evaluated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("listing {id} is malformed: {reason}")]
    MalformedListing { id: ListingId, reason: ListingDefect },
}

/// Returns every listing matching all active predicates, ordered by `criteria.sort`.
pub fn filter_listings(
    listings: &[Listing],
    criteria: &FilterCriteria,
) -> Result<Vec<Listing>, FilterError> {
    for listing in listings {
        listing
            .validate()
            .map_err(|reason| FilterError::MalformedListing {
                id: listing.id,
                reason,
            })?;
    }

    let needle = criteria.needle();
    let mut filtered: Vec<Listing> = listings
        .iter()
        .filter(|listing| matches(listing, needle.as_deref(), criteria))
        .cloned()
        .collect();

    sort_listings(&mut filtered, criteria.sort);

    debug!(
        source = listings.len(),
        matched = filtered.len(),
        sort = %criteria.sort,
        "filtered listings"
    );

    Ok(filtered)
}

fn matches(listing: &Listing, needle: Option<&str>, criteria: &FilterCriteria) -> bool {
    if let Some(needle) = needle {
        if !listing.matches_lowercase(needle) {
            return false;
        }
    }

    if !criteria.price_range.contains(listing.price) {
        return false;
    }

    !criteria.available_now || listing.is_available_today()
}

/// Stable in-place sort. Relevance keeps the source order untouched.
pub fn sort_listings(listings: &mut [Listing], key: SortKey) {
    match key {
        SortKey::Relevance => {}
        SortKey::Rating => listings.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::PriceLow => listings.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceHigh => listings.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::Distance => listings.sort_by(|a, b| a.distance.total_cmp(&b.distance)),
        SortKey::Availability => listings.sort_by(compare_availability),
    }
}

fn compare_availability(a: &Listing, b: &Listing) -> Ordering {
    a.availability_rank().cmp(&b.availability_rank())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::criteria::PriceRange;
    use crate::catalog::domain::seed_listings;

    fn listing(id: u32, price: f64, rating: f32, distance: f64, availability: &str) -> Listing {
        Listing {
            id: ListingId(id),
            title: format!("Service {id}"),
            provider: "Provider".to_string(),
            rating,
            reviews: 10,
            price,
            price_unit: "per hour".to_string(),
            location: "Cape Town".to_string(),
            distance,
            availability: availability.to_string(),
            tags: vec!["General".to_string()],
            description: "General help around the house".to_string(),
            image: String::new(),
        }
    }

    fn sample() -> Vec<Listing> {
        vec![
            listing(1, 120.0, 4.2, 7.0, "Next Day Available"),
            listing(2, 40.0, 4.9, 1.5, "Available Today"),
            listing(3, 80.0, 4.2, 3.0, "Booked this week"),
            listing(4, 80.0, 3.7, 0.5, "Available Today"),
            listing(5, 200.0, 5.0, 12.0, "Next Day Available"),
        ]
    }

    fn ids(listings: &[Listing]) -> Vec<u32> {
        listings.iter().map(|listing| listing.id.0).collect()
    }

    #[test]
    fn price_low_orders_seed_listings() {
        let criteria = FilterCriteria::default().with_sort(SortKey::PriceLow);
        let result = filter_listings(&seed_listings(), &criteria).expect("filters");
        let prices: Vec<f64> = result.iter().map(|listing| listing.price).collect();
        assert_eq!(prices, vec![80.0, 95.0]);
    }

    #[test]
    fn plumbing_query_matches_single_listing() {
        let criteria = FilterCriteria::default().with_query("plumbing");
        let result = filter_listings(&seed_listings(), &criteria).expect("filters");
        assert_eq!(result.len(), 1);
        assert!(result[0].tags.iter().any(|tag| tag == "Repairs"));
    }

    #[test]
    fn available_now_excludes_next_day_listings() {
        let criteria = FilterCriteria::default().with_available_now(true);
        let result = filter_listings(&seed_listings(), &criteria).expect("filters");
        assert!(result
            .iter()
            .all(|listing| listing.availability != "Next Day Available"));
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn query_is_case_insensitive_across_fields() {
        let listings = seed_listings();
        for query in ["HOUSE", "eco-friendly", "residential", "EmErGeNcY"] {
            let criteria = FilterCriteria::default().with_query(query);
            let result = filter_listings(&listings, &criteria).expect("filters");
            assert_eq!(result.len(), 1, "query {query} should match one listing");
        }

        let criteria = FilterCriteria::default().with_query("gardening");
        assert!(filter_listings(&listings, &criteria)
            .expect("filters")
            .is_empty());
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let range = PriceRange::new(80.0, 120.0).expect("valid range");
        let criteria = FilterCriteria::default().with_price_range(range);
        let result = filter_listings(&sample(), &criteria).expect("filters");
        assert_eq!(ids(&result), vec![1, 3, 4]);
        assert!(result.iter().all(|listing| range.contains(listing.price)));
    }

    #[test]
    fn relevance_preserves_source_order() {
        let criteria = FilterCriteria::default();
        let result = filter_listings(&sample(), &criteria).expect("filters");
        assert_eq!(ids(&result), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn rating_sort_is_descending_and_stable() {
        let criteria = FilterCriteria::default().with_sort(SortKey::Rating);
        let result = filter_listings(&sample(), &criteria).expect("filters");
        assert_eq!(ids(&result), vec![5, 2, 1, 3, 4]);
        assert!(result.windows(2).all(|pair| pair[0].rating >= pair[1].rating));
    }

    #[test]
    fn price_sorts_are_monotone() {
        let low = filter_listings(
            &sample(),
            &FilterCriteria::default().with_sort(SortKey::PriceLow),
        )
        .expect("filters");
        assert!(low.windows(2).all(|pair| pair[0].price <= pair[1].price));
        assert_eq!(ids(&low), vec![2, 3, 4, 1, 5]);

        let high = filter_listings(
            &sample(),
            &FilterCriteria::default().with_sort(SortKey::PriceHigh),
        )
        .expect("filters");
        assert!(high.windows(2).all(|pair| pair[0].price >= pair[1].price));
        assert_eq!(ids(&high), vec![5, 1, 3, 4, 2]);
    }

    #[test]
    fn distance_sort_is_ascending() {
        let criteria = FilterCriteria::default().with_sort(SortKey::Distance);
        let result = filter_listings(&sample(), &criteria).expect("filters");
        assert_eq!(ids(&result), vec![4, 2, 3, 1, 5]);
    }

    #[test]
    fn availability_sort_ranks_today_first() {
        let criteria = FilterCriteria::default().with_sort(SortKey::Availability);
        let result = filter_listings(&sample(), &criteria).expect("filters");
        assert_eq!(ids(&result), vec![2, 4, 1, 5, 3]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let criteria = FilterCriteria::default()
            .with_query("service")
            .with_sort(SortKey::Rating);
        let first = filter_listings(&sample(), &criteria).expect("filters");
        let second = filter_listings(&sample(), &criteria).expect("filters");
        assert_eq!(first, second);
    }

    #[test]
    fn malformed_listing_is_reported_instead_of_sorted() {
        let mut listings = sample();
        listings[2].rating = f32::NAN;
        let err = filter_listings(&listings, &FilterCriteria::default())
            .expect_err("nan rating is rejected");
        assert!(matches!(
            err,
            FilterError::MalformedListing {
                id: ListingId(3),
                reason: ListingDefect::Rating(_),
            }
        ));
    }
}
