// src/models/user.rs
// DOCUMENTATION: User identity models
// PURPOSE: Authentication itself is delegated to the upstream gateway;
// this service only stores the identity rows reviews and favorites hang off

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{RestaurantResponse, UserReviewSummary};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response for GET /profile
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub reviews: Vec<UserReviewSummary>,
    pub favorites: Vec<RestaurantResponse>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
}

impl User {
    pub fn to_response(&self) -> UserResponse {
        UserResponse {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}
