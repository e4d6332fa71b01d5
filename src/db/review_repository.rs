// src/db/review_repository.rs
// DOCUMENTATION: Review database operations
// PURPOSE: Handle CRUD operations for user reviews

use crate::errors::RestaurantsError;
use crate::models::{CreateReviewRequest, Review, ReviewWithAuthor, UserReviewSummary};
use sqlx::PgPool;
use std::borrow::Cow;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

/// Field-attributed error for a second review on the same restaurant
/// Used both by the pre-check and as the unique-index backstop
pub fn duplicate_review_error() -> RestaurantsError {
    let mut errors = ValidationErrors::new();
    let mut error = ValidationError::new("unique");
    error.message = Some(Cow::Borrowed("You have already reviewed this restaurant"));
    errors.add("user_id", error);
    RestaurantsError::FieldValidation(errors)
}

pub struct ReviewRepository;

impl ReviewRepository {
    /// Create a new review
    /// A concurrent duplicate insert trips the unique index on
    /// (user_id, restaurant_id) and surfaces as the duplicate error
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        restaurant_id: Uuid,
        req: &CreateReviewRequest,
    ) -> Result<Review, RestaurantsError> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (user_id, restaurant_id, rating, comment, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(restaurant_id)
        .bind(req.rating)
        .bind(&req.comment)
        .fetch_one(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                duplicate_review_error()
            }
            _ => {
                log::error!("Failed to create review: {}", e);
                RestaurantsError::DatabaseError(e.to_string())
            }
        })?;

        Ok(review)
    }

    /// Whether the user already reviewed the restaurant
    pub async fn exists_for(
        pool: &PgPool,
        user_id: Uuid,
        restaurant_id: Uuid,
    ) -> Result<bool, RestaurantsError> {
        let row: Option<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM reviews WHERE user_id = $1 AND restaurant_id = $2",
        )
        .bind(user_id)
        .bind(restaurant_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to check review existence: {}", e);
            RestaurantsError::DatabaseError(e.to_string())
        })?;

        Ok(row.is_some())
    }

    /// Fetch a review scoped to its owner
    /// Reviews belonging to another user are indistinguishable from
    /// missing ones, like looking up through the owner's association
    pub async fn get_owned(
        pool: &PgPool,
        review_id: Uuid,
        user_id: Uuid,
    ) -> Result<Review, RestaurantsError> {
        let review = sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE id = $1 AND user_id = $2",
        )
        .bind(review_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch review {}: {}", review_id, e);
            RestaurantsError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| RestaurantsError::NotFound(review_id.to_string()))?;

        Ok(review)
    }

    /// Update a review's rating and comment
    pub async fn update(
        pool: &PgPool,
        review_id: Uuid,
        req: &CreateReviewRequest,
    ) -> Result<Review, RestaurantsError> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews
            SET rating = $1, comment = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(req.rating)
        .bind(&req.comment)
        .bind(review_id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to update review {}: {}", review_id, e);
            RestaurantsError::DatabaseError(e.to_string())
        })?;

        Ok(review)
    }

    /// Delete a review
    pub async fn delete(pool: &PgPool, review_id: Uuid) -> Result<(), RestaurantsError> {
        sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(review_id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to delete review {}: {}", review_id, e);
                RestaurantsError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }

    /// Fetch a restaurant's reviews with their authors, newest first
    pub async fn list_for_restaurant(
        pool: &PgPool,
        restaurant_id: Uuid,
    ) -> Result<Vec<ReviewWithAuthor>, RestaurantsError> {
        let reviews = sqlx::query_as::<_, ReviewWithAuthor>(
            r#"
            SELECT r.id, r.rating, r.comment, r.created_at,
                   u.id AS user_id, u.email AS user_email
            FROM reviews r
            JOIN users u ON u.id = r.user_id
            WHERE r.restaurant_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!(
                "Failed to fetch reviews for restaurant {}: {}",
                restaurant_id,
                e
            );
            RestaurantsError::DatabaseError(e.to_string())
        })?;

        Ok(reviews)
    }

    /// Fetch a user's reviews with their restaurants, newest first
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<UserReviewSummary>, RestaurantsError> {
        let reviews = sqlx::query_as::<_, UserReviewSummary>(
            r#"
            SELECT r.id, r.rating, r.comment, r.created_at,
                   t.id AS restaurant_id, t.name AS restaurant_name
            FROM reviews r
            JOIN restaurants t ON t.id = r.restaurant_id
            WHERE r.user_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch reviews for user {}: {}", user_id, e);
            RestaurantsError::DatabaseError(e.to_string())
        })?;

        Ok(reviews)
    }
}
