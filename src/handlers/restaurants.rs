// src/handlers/restaurants.rs
// DOCUMENTATION: HTTP handlers for restaurant discovery
// PURPOSE: Parse requests, call services, return responses

use crate::config::Config;
use crate::errors::RestaurantsError;
use crate::handlers::auth::CurrentUser;
use crate::handlers::{favorites, reviews};
use crate::models::SearchQuery;
use crate::services::{GeocodingClient, PlacesClient, RestaurantService};
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;

/// GET /restaurants/search
/// Geocode the address, search nearby restaurants, ingest and return them
pub async fn search_restaurants(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    query: web::Query<SearchQuery>,
    current_user: Option<CurrentUser>,
) -> Result<impl Responder, RestaurantsError> {
    if config.google_api_key.is_empty() {
        return Err(RestaurantsError::InvalidInput(
            "Google API key not configured".to_string(),
        ));
    }

    let geocoding = GeocodingClient::new(config.google_api_key.clone());
    let places = PlacesClient::new(config.google_api_key.clone());

    let result = RestaurantService::search(
        pool.get_ref(),
        &geocoding,
        &places,
        query.into_inner(),
        current_user.map(|user| user.id),
    )
    .await?;

    Ok(HttpResponse::Ok().json(result))
}

/// GET /restaurants
/// List persisted restaurants
pub async fn list_restaurants(
    pool: web::Data<PgPool>,
    current_user: Option<CurrentUser>,
) -> Result<impl Responder, RestaurantsError> {
    let restaurants =
        RestaurantService::list(pool.get_ref(), current_user.map(|user| user.id)).await?;
    Ok(HttpResponse::Ok().json(restaurants))
}

/// GET /restaurants/{id}
/// Retrieve a restaurant with its reviews
pub async fn get_restaurant(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    current_user: Option<CurrentUser>,
) -> Result<impl Responder, RestaurantsError> {
    let restaurant = RestaurantService::get(
        pool.get_ref(),
        path.into_inner(),
        current_user.map(|user| user.id),
    )
    .await?;
    Ok(HttpResponse::Ok().json(restaurant))
}

/// Configuration for the whole /restaurants surface, nested resources
/// included (a scope captures its prefix, so everything under it is
/// mounted here)
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/restaurants")
            .route("/search", web::get().to(search_restaurants))
            .route("", web::get().to(list_restaurants))
            .route("/{id}", web::get().to(get_restaurant))
            .route(
                "/{restaurant_id}/toggle_favorite",
                web::post().to(favorites::toggle_favorite),
            )
            .route(
                "/{restaurant_id}/reviews",
                web::post().to(reviews::create_review),
            )
            .route(
                "/{restaurant_id}/reviews/{review_id}",
                web::put().to(reviews::update_review),
            )
            .route(
                "/{restaurant_id}/reviews/{review_id}",
                web::delete().to(reviews::destroy_review),
            ),
    );
}
