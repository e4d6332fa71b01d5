// src/models/favorite.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Join row between a user and a restaurant
/// Row presence denotes "favorited"; toggling creates or destroys it
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub restaurant_id: Uuid,
    pub user_likes_restaurant: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response for the toggle endpoint
#[derive(Debug, Serialize)]
pub struct ToggleFavoriteResponse {
    /// "favorited" or "unfavorited"
    pub status: &'static str,
    pub is_favorite: bool,
}

impl ToggleFavoriteResponse {
    pub fn new(is_favorite: bool) -> Self {
        ToggleFavoriteResponse {
            status: if is_favorite { "favorited" } else { "unfavorited" },
            is_favorite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_response_status() {
        assert_eq!(ToggleFavoriteResponse::new(true).status, "favorited");
        assert_eq!(ToggleFavoriteResponse::new(false).status, "unfavorited");
    }
}
