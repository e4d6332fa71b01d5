// src/handlers/profile.rs
// DOCUMENTATION: HTTP handler for the caller's profile
// PURPOSE: Return the caller's reviews and favorited restaurants

use crate::db::{FavoriteRepository, ReviewRepository, UserRepository};
use crate::errors::RestaurantsError;
use crate::handlers::auth::CurrentUser;
use crate::models::ProfileResponse;
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;

/// GET /profile
pub async fn profile(
    pool: web::Data<PgPool>,
    current_user: CurrentUser,
) -> Result<impl Responder, RestaurantsError> {
    // A forwarded id without a matching row means the gateway and this
    // service disagree about who exists
    let user = UserRepository::get_by_id(pool.get_ref(), current_user.id)
        .await
        .map_err(|err| match err {
            RestaurantsError::NotFound(_) => RestaurantsError::Unauthorized,
            other => other,
        })?;

    let reviews = ReviewRepository::list_for_user(pool.get_ref(), current_user.id).await?;
    let favorites =
        FavoriteRepository::restaurants_for_user(pool.get_ref(), current_user.id).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        user: user.to_response(),
        reviews,
        favorites: favorites
            .iter()
            .map(|restaurant| restaurant.to_response(Some(true)))
            .collect(),
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/profile", web::get().to(profile));
}
