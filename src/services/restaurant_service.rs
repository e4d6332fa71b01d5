// src/services/restaurant_service.rs
// DOCUMENTATION: Business logic for restaurant discovery
// PURPOSE: Orchestrate geocoding, places search, ingestion and the
// filter/sort pipeline into a single search flow

use crate::db::{FavoriteRepository, RestaurantRepository, ReviewRepository};
use crate::errors::RestaurantsError;
use crate::models::{
    Restaurant, RestaurantDetailResponse, RestaurantResponse, SearchQuery, SearchResponse, SortBy,
};
use crate::services::search_pipeline::{self, SearchFilters};
use crate::services::{GeocodingClient, PlacesClient};
use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;
use validator::Validate;

pub struct RestaurantService;

impl RestaurantService {
    /// Run the full search flow for one request
    /// DOCUMENTATION: geocode -> nearby search -> upsert by place id ->
    /// resolve caller favorites -> filter/sort pipeline.
    /// Upstream lookup failures are recovered into an empty result list
    /// with a user-visible notice; persistence failures still propagate.
    pub async fn search(
        pool: &PgPool,
        geocoding: &GeocodingClient,
        places: &PlacesClient,
        query: SearchQuery,
        current_user: Option<Uuid>,
    ) -> Result<SearchResponse, RestaurantsError> {
        let address = query.address.as_deref().map(str::trim).unwrap_or("");
        if address.is_empty() {
            return Err(RestaurantsError::InvalidInput(
                "Address is required".to_string(),
            ));
        }

        let radius = query.radius.unwrap_or(1000.0);
        let max_results = query.max_results.unwrap_or(20);

        log::debug!(
            "Restaurant search: address={}, radius={}, max_results={}",
            address,
            radius,
            max_results
        );

        let location = match geocoding.geocode_address(address).await {
            Ok(location) => location,
            Err(RestaurantsError::AddressNotFound) => {
                return Ok(Self::empty_with_notice("Address not found"));
            }
            Err(err) => return Ok(Self::recover_upstream(err)),
        };

        let discovered = match places
            .search_nearby(location.lat, location.lng, radius, max_results)
            .await
        {
            Ok(discovered) => discovered,
            Err(err) => return Ok(Self::recover_upstream(err)),
        };

        if discovered.is_empty() {
            return Ok(Self::empty_with_notice(
                "No restaurants found near the specified location",
            ));
        }

        log::info!("Search ingested {} restaurants", discovered.len());

        let mut restaurants = Vec::with_capacity(discovered.len());
        for upsert in &discovered {
            // Provider records can arrive with a blank name or place id;
            // skip them instead of failing the whole search
            if let Err(e) = upsert.validate() {
                log::warn!("Skipping malformed place record: {}", e);
                continue;
            }
            restaurants.push(RestaurantRepository::upsert(pool, upsert).await?);
        }

        // Unauthenticated callers resolve to an empty favorite set, so a
        // favorites-only search silently yields nothing
        let favorite_ids = match current_user {
            Some(user_id) => FavoriteRepository::favorite_ids_for_user(pool, user_id).await?,
            None => HashSet::new(),
        };

        let filters = SearchFilters {
            cuisine: query.cuisine.clone(),
            show_favorites: query.show_favorites.unwrap_or(false),
            sort_by: query.sort_by.as_deref().and_then(SortBy::parse),
        };

        let results = search_pipeline::apply(restaurants, &filters, &favorite_ids);

        Ok(SearchResponse {
            restaurants: Self::to_responses(&results, current_user, &favorite_ids),
            notice: None,
        })
    }

    /// List persisted restaurants with the caller's favorite flags
    pub async fn list(
        pool: &PgPool,
        current_user: Option<Uuid>,
    ) -> Result<Vec<RestaurantResponse>, RestaurantsError> {
        let restaurants = RestaurantRepository::list_all(pool).await?;

        let favorite_ids = match current_user {
            Some(user_id) => FavoriteRepository::favorite_ids_for_user(pool, user_id).await?,
            None => HashSet::new(),
        };

        Ok(Self::to_responses(&restaurants, current_user, &favorite_ids))
    }

    /// Fetch one restaurant with its reviews
    pub async fn get(
        pool: &PgPool,
        id: Uuid,
        current_user: Option<Uuid>,
    ) -> Result<RestaurantDetailResponse, RestaurantsError> {
        let restaurant = RestaurantRepository::get_by_id(pool, id).await?;
        let reviews = ReviewRepository::list_for_restaurant(pool, id).await?;

        let is_favorite = match current_user {
            Some(user_id) => Some(
                FavoriteRepository::favorite_ids_for_user(pool, user_id)
                    .await?
                    .contains(&id),
            ),
            None => None,
        };

        Ok(RestaurantDetailResponse {
            restaurant: restaurant.to_response(is_favorite),
            reviews: reviews.iter().map(|review| review.to_response()).collect(),
        })
    }

    fn to_responses(
        restaurants: &[Restaurant],
        current_user: Option<Uuid>,
        favorite_ids: &HashSet<Uuid>,
    ) -> Vec<RestaurantResponse> {
        restaurants
            .iter()
            .map(|restaurant| {
                let is_favorite = current_user.map(|_| favorite_ids.contains(&restaurant.id));
                restaurant.to_response(is_favorite)
            })
            .collect()
    }

    fn empty_with_notice(notice: &str) -> SearchResponse {
        SearchResponse {
            restaurants: Vec::new(),
            notice: Some(notice.to_string()),
        }
    }

    /// Upstream failures never fail the search; the caller gets an empty
    /// list and a generic notice while the detail goes to the log
    fn recover_upstream(err: RestaurantsError) -> SearchResponse {
        log::error!("Restaurant search upstream failure: {}", err);
        Self::empty_with_notice("An error occurred while searching for restaurants")
    }
}
