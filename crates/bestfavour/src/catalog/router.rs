use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::browser::FILTER_FAILURE;
use super::criteria::{FilterCriteria, PriceRange, SortKey, DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE};
use super::service::{CatalogService, CatalogServiceError};

const DEFAULT_POPULAR_LIMIT: usize = 3;

/// Query string accepted by the listing search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListingSearchParams {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub available_now: Option<bool>,
    #[serde(default)]
    pub sort: Option<SortKey>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PopularQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Router builder exposing listing search and the browse directories.
pub fn catalog_router(service: Arc<CatalogService>) -> Router {
    Router::new()
        .route("/api/v1/categories", get(categories_handler))
        .route(
            "/api/v1/categories/:category/listings",
            get(listings_handler),
        )
        .route("/api/v1/providers/popular", get(popular_handler))
        .with_state(service)
}

pub(crate) async fn listings_handler(
    State(service): State<Arc<CatalogService>>,
    Path(category): Path<String>,
    Query(params): Query<ListingSearchParams>,
) -> Response {
    let range = PriceRange::new(
        params.min_price.unwrap_or(DEFAULT_MIN_PRICE),
        params.max_price.unwrap_or(DEFAULT_MAX_PRICE),
    );
    let range = match range {
        Ok(range) => range,
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    let criteria = FilterCriteria {
        query: params.query.unwrap_or_default(),
        price_range: range,
        available_now: params.available_now.unwrap_or(false),
        sort: params.sort.unwrap_or_default(),
    };

    match service.search(&category, &criteria) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(CatalogServiceError::Category(err)) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(CatalogServiceError::Filter(err)) => {
            warn!(error = %err, %category, "listing search failed");
            let payload = json!({ "error": FILTER_FAILURE });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn categories_handler(
    State(service): State<Arc<CatalogService>>,
    Query(params): Query<CategoryQuery>,
) -> Response {
    let categories = service.categories(params.query.as_deref().unwrap_or_default());
    (StatusCode::OK, axum::Json(categories)).into_response()
}

pub(crate) async fn popular_handler(
    State(service): State<Arc<CatalogService>>,
    Query(params): Query<PopularQuery>,
) -> Response {
    let providers = service.popular_providers(params.limit.unwrap_or(DEFAULT_POPULAR_LIMIT));
    (StatusCode::OK, axum::Json(providers)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::domain::seed_listings;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn router() -> Router {
        catalog_router(Arc::new(CatalogService::new(seed_listings())))
    }

    async fn read_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    async fn get(uri: &str) -> Response {
        router()
            .oneshot(Request::get(uri).body(Body::empty()).expect("request builds"))
            .await
            .expect("route executes")
    }

    #[tokio::test]
    async fn listing_search_applies_query_parameters() {
        let response =
            get("/api/v1/categories/plumbing/listings?sort=price-high&max_price=120").await;
        assert_eq!(response.status(), StatusCode::OK);

        let payload = read_json(response).await;
        assert_eq!(payload["title"], "Plumbing");
        assert_eq!(payload["total"], 2);
        assert_eq!(payload["listings"][0]["price"], 95.0);
    }

    #[tokio::test]
    async fn listing_search_filters_available_now() {
        let response =
            get("/api/v1/categories/house-cleaning/listings?available_now=true").await;
        let payload = read_json(response).await;
        assert_eq!(payload["total"], 1);
        assert_eq!(payload["listings"][0]["availability"], "Available Today");
    }

    #[tokio::test]
    async fn unknown_category_is_not_found() {
        let response = get("/api/v1/categories/astrology/listings").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let payload = read_json(response).await;
        assert_eq!(payload["error"], "Invalid category");
    }

    #[tokio::test]
    async fn inverted_price_range_is_bad_request() {
        let response = get("/api/v1/categories/plumbing/listings?min_price=150&max_price=20").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_catalog_returns_generic_failure() {
        let mut listings = seed_listings();
        listings[1].rating = 9.0;
        let router = catalog_router(Arc::new(CatalogService::new(listings)));

        let response = router
            .oneshot(
                Request::get("/api/v1/categories/plumbing/listings")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let payload = read_json(response).await;
        assert_eq!(payload["error"], FILTER_FAILURE);
    }

    #[tokio::test]
    async fn directory_endpoints_return_json_arrays() {
        let categories = read_json(get("/api/v1/categories?query=yoga").await).await;
        assert_eq!(categories.as_array().map(Vec::len), Some(1));

        let popular = read_json(get("/api/v1/providers/popular?limit=2").await).await;
        assert_eq!(popular.as_array().map(Vec::len), Some(2));
    }
}
