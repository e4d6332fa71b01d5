// src/db/favorite_repository.rs
// DOCUMENTATION: Favorite database operations
// PURPOSE: Transactional favorite toggling and favorite resolution

use crate::db::restaurant_repository::RestaurantRow;
use crate::errors::RestaurantsError;
use crate::models::{Favorite, Restaurant};
use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;

pub struct FavoriteRepository;

impl FavoriteRepository {
    /// Flip the favorite relationship between a user and a restaurant
    /// DOCUMENTATION: Runs inside a single transaction. The existing row
    /// is locked before the delete/insert so two concurrent toggles for
    /// the same pair serialize; the unique index on
    /// (user_id, restaurant_id) is the backstop against a double insert.
    ///
    /// # Returns
    /// true when the restaurant is now favorited, false when unfavorited
    pub async fn toggle(
        pool: &PgPool,
        user_id: Uuid,
        restaurant_id: Uuid,
    ) -> Result<bool, RestaurantsError> {
        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to open favorite toggle transaction: {}", e);
            RestaurantsError::DatabaseError(e.to_string())
        })?;

        let existing = sqlx::query_as::<_, Favorite>(
            "SELECT * FROM favorites WHERE user_id = $1 AND restaurant_id = $2 FOR UPDATE",
        )
        .bind(user_id)
        .bind(restaurant_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            log::error!("Failed to look up favorite: {}", e);
            RestaurantsError::DatabaseError(e.to_string())
        })?;

        let is_favorite = match existing {
            Some(favorite) => {
                sqlx::query("DELETE FROM favorites WHERE id = $1")
                    .bind(favorite.id)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| {
                        log::error!("Failed to delete favorite {}: {}", favorite.id, e);
                        RestaurantsError::DatabaseError(e.to_string())
                    })?;
                false
            }
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO favorites (user_id, restaurant_id, user_likes_restaurant, created_at, updated_at)
                    VALUES ($1, $2, TRUE, NOW(), NOW())
                    "#,
                )
                .bind(user_id)
                .bind(restaurant_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| match &e {
                    sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                        RestaurantsError::ValidationError(
                            "Restaurant is already favorited".to_string(),
                        )
                    }
                    _ => {
                        log::error!("Failed to create favorite: {}", e);
                        RestaurantsError::DatabaseError(e.to_string())
                    }
                })?;
                true
            }
        };

        tx.commit().await.map_err(|e| {
            log::error!("Failed to commit favorite toggle: {}", e);
            RestaurantsError::DatabaseError(e.to_string())
        })?;

        Ok(is_favorite)
    }

    /// Resolve the set of restaurant ids the user has favorited
    /// The server-side set is the authoritative favorites state for
    /// filtering and is_favorite flags
    pub async fn favorite_ids_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<HashSet<Uuid>, RestaurantsError> {
        let rows: Vec<(Uuid,)> =
            sqlx::query_as("SELECT restaurant_id FROM favorites WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(pool)
                .await
                .map_err(|e| {
                    log::error!("Failed to fetch favorite ids for user {}: {}", user_id, e);
                    RestaurantsError::DatabaseError(e.to_string())
                })?;

        Ok(rows.into_iter().map(|row| row.0).collect())
    }

    /// Fetch the restaurants a user has favorited, newest favorite first
    pub async fn restaurants_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<Restaurant>, RestaurantsError> {
        let rows = sqlx::query_as::<_, RestaurantRow>(
            r#"
            SELECT r.id, r.place_id, r.name, r.address, r.latitude, r.longitude,
                   r.price_level, r.cuisine, r.photo_url, r.ratings, r.reviews_count,
                   r.created_at, r.updated_at
            FROM restaurants r
            JOIN favorites f ON f.restaurant_id = r.id
            WHERE f.user_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch favorites for user {}: {}", user_id, e);
                RestaurantsError::DatabaseError(e.to_string())
            })?;

        Ok(rows.into_iter().map(RestaurantRow::to_restaurant).collect())
    }
}
