// src/db/user_repository.rs
// DOCUMENTATION: User database operations
// PURPOSE: Look up the identity rows reviews and favorites reference

use crate::errors::RestaurantsError;
use crate::models::User;
use sqlx::PgPool;
use uuid::Uuid;

pub struct UserRepository;

impl UserRepository {
    /// Retrieve user by ID
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<User, RestaurantsError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching user: {}", e);
                RestaurantsError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| {
                log::warn!("User not found: {}", id);
                RestaurantsError::NotFound(id.to_string())
            })?;

        Ok(user)
    }
}
