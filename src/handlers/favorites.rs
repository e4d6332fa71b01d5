// src/handlers/favorites.rs
// DOCUMENTATION: HTTP handler for the favorite toggle
// PURPOSE: Flip the caller's favorite relation for one restaurant

use crate::db::{FavoriteRepository, RestaurantRepository};
use crate::errors::RestaurantsError;
use crate::handlers::auth::CurrentUser;
use crate::models::ToggleFavoriteResponse;
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;

/// POST /restaurants/{restaurant_id}/toggle_favorite
/// Atomically favorite or unfavorite the restaurant for the caller
pub async fn toggle_favorite(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    current_user: CurrentUser,
) -> Result<impl Responder, RestaurantsError> {
    let restaurant_id = path.into_inner();

    // 404 before touching the favorites table
    RestaurantRepository::get_by_id(pool.get_ref(), restaurant_id).await?;

    let is_favorite =
        FavoriteRepository::toggle(pool.get_ref(), current_user.id, restaurant_id).await?;

    Ok(HttpResponse::Ok().json(ToggleFavoriteResponse::new(is_favorite)))
}
