// src/services/review_service.rs
// DOCUMENTATION: Business logic for review mutations
// PURPOSE: Validate review writes and keep the restaurant's rating
// aggregates in step with every mutation

use crate::db::review_repository::duplicate_review_error;
use crate::db::{RestaurantRepository, ReviewRepository};
use crate::errors::RestaurantsError;
use crate::models::{CreateReviewRequest, Review};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Response for review create/update/destroy
/// Carries the restaurant's refreshed aggregates so the caller can render
/// them without a second read
#[derive(Debug, Serialize)]
pub struct ReviewMutationResponse {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<Review>,

    pub average_rating: f64,
    pub reviews_count: i64,
}

pub struct ReviewService;

impl ReviewService {
    /// Create a review for a restaurant
    /// Validation failures and duplicate reviews reject the write with
    /// field-attributed errors; nothing is persisted on failure
    pub async fn create(
        pool: &PgPool,
        restaurant_id: Uuid,
        user_id: Uuid,
        req: CreateReviewRequest,
    ) -> Result<ReviewMutationResponse, RestaurantsError> {
        req.validate().map_err(RestaurantsError::FieldValidation)?;

        // 404 before validation errors for a restaurant that does not exist
        RestaurantRepository::get_by_id(pool, restaurant_id).await?;

        if ReviewRepository::exists_for(pool, user_id, restaurant_id).await? {
            return Err(duplicate_review_error());
        }

        let review = ReviewRepository::create(pool, user_id, restaurant_id, &req).await?;
        let (average_rating, reviews_count) =
            RestaurantRepository::refresh_rating_stats(pool, restaurant_id).await?;

        log::info!(
            "User {} reviewed restaurant {} with rating {}",
            user_id,
            restaurant_id,
            review.rating
        );

        Ok(ReviewMutationResponse {
            message: "Review was successfully created.".to_string(),
            review: Some(review),
            average_rating,
            reviews_count,
        })
    }

    /// Update the caller's review
    pub async fn update(
        pool: &PgPool,
        restaurant_id: Uuid,
        review_id: Uuid,
        user_id: Uuid,
        req: CreateReviewRequest,
    ) -> Result<ReviewMutationResponse, RestaurantsError> {
        req.validate().map_err(RestaurantsError::FieldValidation)?;

        let existing = ReviewRepository::get_owned(pool, review_id, user_id).await?;
        if existing.restaurant_id != restaurant_id {
            return Err(RestaurantsError::NotFound(review_id.to_string()));
        }

        let review = ReviewRepository::update(pool, review_id, &req).await?;
        let (average_rating, reviews_count) =
            RestaurantRepository::refresh_rating_stats(pool, restaurant_id).await?;

        Ok(ReviewMutationResponse {
            message: "Review was successfully updated.".to_string(),
            review: Some(review),
            average_rating,
            reviews_count,
        })
    }

    /// Destroy the caller's review
    pub async fn destroy(
        pool: &PgPool,
        restaurant_id: Uuid,
        review_id: Uuid,
        user_id: Uuid,
    ) -> Result<ReviewMutationResponse, RestaurantsError> {
        let existing = ReviewRepository::get_owned(pool, review_id, user_id).await?;
        if existing.restaurant_id != restaurant_id {
            return Err(RestaurantsError::NotFound(review_id.to_string()));
        }

        ReviewRepository::delete(pool, review_id).await?;
        let (average_rating, reviews_count) =
            RestaurantRepository::refresh_rating_stats(pool, restaurant_id).await?;

        Ok(ReviewMutationResponse {
            message: "Review was successfully deleted.".to_string(),
            review: None,
            average_rating,
            reviews_count,
        })
    }
}
