// src/handlers/reviews.rs
// DOCUMENTATION: HTTP handlers for review mutations
// PURPOSE: Parse requests, call the review service, return responses

use crate::errors::RestaurantsError;
use crate::handlers::auth::CurrentUser;
use crate::models::CreateReviewRequest;
use crate::services::ReviewService;
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;

/// POST /restaurants/{restaurant_id}/reviews
pub async fn create_review(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    current_user: CurrentUser,
    req: web::Json<CreateReviewRequest>,
) -> Result<impl Responder, RestaurantsError> {
    let result = ReviewService::create(
        pool.get_ref(),
        path.into_inner(),
        current_user.id,
        req.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Created().json(result))
}

/// PUT /restaurants/{restaurant_id}/reviews/{review_id}
pub async fn update_review(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
    current_user: CurrentUser,
    req: web::Json<CreateReviewRequest>,
) -> Result<impl Responder, RestaurantsError> {
    let (restaurant_id, review_id) = path.into_inner();
    let result = ReviewService::update(
        pool.get_ref(),
        restaurant_id,
        review_id,
        current_user.id,
        req.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(result))
}

/// DELETE /restaurants/{restaurant_id}/reviews/{review_id}
pub async fn destroy_review(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
    current_user: CurrentUser,
) -> Result<impl Responder, RestaurantsError> {
    let (restaurant_id, review_id) = path.into_inner();
    let result =
        ReviewService::destroy(pool.get_ref(), restaurant_id, review_id, current_user.id).await?;
    Ok(HttpResponse::Ok().json(result))
}
