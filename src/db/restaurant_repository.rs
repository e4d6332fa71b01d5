// src/db/restaurant_repository.rs
// DOCUMENTATION: Database access layer for restaurants
// PURPOSE: Abstract database operations from business logic

use crate::errors::RestaurantsError;
use crate::models::{aggregate_ratings, PriceTier, Restaurant, RestaurantUpsert};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Internal struct for mapping database rows to the Restaurant model
/// DOCUMENTATION: price_level is stored as its label text and converted
/// back into the closed tier enum here; a label outside the table maps to
/// an absent tier
#[derive(Debug, FromRow)]
pub(crate) struct RestaurantRow {
    pub id: Uuid,
    pub place_id: String,
    pub name: String,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub price_level: Option<String>,
    pub cuisine: Option<String>,
    pub photo_url: Option<String>,
    pub ratings: Option<f64>,
    pub reviews_count: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RestaurantRow {
    pub(crate) fn to_restaurant(self) -> Restaurant {
        Restaurant {
            id: self.id,
            place_id: self.place_id,
            name: self.name,
            address: self.address,
            latitude: self.latitude,
            longitude: self.longitude,
            price_level: self.price_level.as_deref().and_then(PriceTier::from_label),
            cuisine: self.cuisine,
            photo_url: self.photo_url,
            ratings: self.ratings,
            reviews_count: self.reviews_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Columns returned by every restaurant query
const RESTAURANT_COLUMNS: &str = "id, place_id, name, address, latitude, longitude, price_level, cuisine, photo_url, ratings, reviews_count, created_at, updated_at";

/// RestaurantRepository: All database operations for restaurants
pub struct RestaurantRepository;

impl RestaurantRepository {
    /// Upsert a restaurant identified by its external place id
    /// DOCUMENTATION: Each search ingestion refreshes provider-sourced
    /// fields. The ratings/reviews_count columns are deliberately left
    /// untouched - only the rating refresh writes them.
    pub async fn upsert(
        pool: &PgPool,
        req: &RestaurantUpsert,
    ) -> Result<Restaurant, RestaurantsError> {
        let sql = format!(
            r#"
            INSERT INTO restaurants (
                place_id, name, address, latitude, longitude,
                price_level, cuisine, photo_url,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
            ON CONFLICT (place_id) DO UPDATE
            SET name = EXCLUDED.name,
                address = EXCLUDED.address,
                latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude,
                price_level = EXCLUDED.price_level,
                cuisine = EXCLUDED.cuisine,
                photo_url = EXCLUDED.photo_url,
                updated_at = NOW()
            RETURNING {}
            "#,
            RESTAURANT_COLUMNS
        );

        let row = sqlx::query_as::<_, RestaurantRow>(&sql)
            .bind(&req.place_id)
            .bind(&req.name)
            .bind(&req.address)
            .bind(req.latitude)
            .bind(req.longitude)
            .bind(req.price_level.map(|tier| tier.label()))
            .bind(&req.cuisine)
            .bind(&req.photo_url)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to upsert restaurant {}: {}", req.place_id, e);
                RestaurantsError::DatabaseError(e.to_string())
            })?;

        Ok(row.to_restaurant())
    }

    /// Retrieve restaurant by ID
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Restaurant, RestaurantsError> {
        let sql = format!(
            "SELECT {} FROM restaurants WHERE id = $1",
            RESTAURANT_COLUMNS
        );

        let row = sqlx::query_as::<_, RestaurantRow>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching restaurant: {}", e);
                RestaurantsError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| {
                log::warn!("Restaurant not found: {}", id);
                RestaurantsError::NotFound(id.to_string())
            })?;

        Ok(row.to_restaurant())
    }

    /// List all persisted restaurants, newest first
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Restaurant>, RestaurantsError> {
        let sql = format!(
            "SELECT {} FROM restaurants ORDER BY created_at DESC",
            RESTAURANT_COLUMNS
        );

        let rows = sqlx::query_as::<_, RestaurantRow>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to list restaurants: {}", e);
                RestaurantsError::DatabaseError(e.to_string())
            })?;

        Ok(rows.into_iter().map(RestaurantRow::to_restaurant).collect())
    }

    /// Recompute and persist the review-derived rating aggregates
    /// DOCUMENTATION: Called after every review mutation commits, before
    /// the response is produced, so the next read reflects it. The cached
    /// fields are a materialized view over the reviews table, never a
    /// source of truth.
    pub async fn refresh_rating_stats(
        pool: &PgPool,
        restaurant_id: Uuid,
    ) -> Result<(f64, i64), RestaurantsError> {
        let rating_rows: Vec<(i32,)> =
            sqlx::query_as("SELECT rating FROM reviews WHERE restaurant_id = $1")
                .bind(restaurant_id)
                .fetch_all(pool)
                .await
                .map_err(|e| {
                    log::error!(
                        "Failed to fetch ratings for restaurant {}: {}",
                        restaurant_id,
                        e
                    );
                    RestaurantsError::DatabaseError(e.to_string())
                })?;

        let ratings: Vec<i32> = rating_rows.into_iter().map(|row| row.0).collect();
        let (average, count) = aggregate_ratings(&ratings);

        sqlx::query(
            "UPDATE restaurants SET ratings = $1, reviews_count = $2, updated_at = NOW() WHERE id = $3",
        )
        .bind(average)
        .bind(count as i32)
        .bind(restaurant_id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!(
                "Failed to refresh rating stats for restaurant {}: {}",
                restaurant_id,
                e
            );
            RestaurantsError::DatabaseError(e.to_string())
        })?;

        log::debug!(
            "Refreshed rating stats for restaurant {}: average={}, count={}",
            restaurant_id,
            average,
            count
        );

        Ok((average, count))
    }
}
