// src/models/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A user's review of a restaurant
/// At most one review exists per (user, restaurant) pair
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub restaurant_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a review
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(min = 1, message = "can't be blank"))]
    pub comment: String,
}

/// Review joined with its author, as stored
#[derive(Debug, Clone, FromRow)]
pub struct ReviewWithAuthor {
    pub id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub user_email: String,
}

/// Review response DTO exposed via API
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub user: ReviewAuthor,
}

/// Author identity attached to a review
#[derive(Debug, Clone, Serialize)]
pub struct ReviewAuthor {
    pub id: Uuid,
    pub email: String,
}

/// A user's review with the restaurant it belongs to, for the profile view
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserReviewSummary {
    pub id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub restaurant_id: Uuid,
    pub restaurant_name: String,
}

impl ReviewWithAuthor {
    /// Convert joined row into API response
    pub fn to_response(&self) -> ReviewResponse {
        ReviewResponse {
            id: self.id,
            rating: self.rating,
            comment: self.comment.clone(),
            created_at: self.created_at,
            user: ReviewAuthor {
                id: self.user_id,
                email: self.user_email.clone(),
            },
        }
    }
}

/// Recompute the review-derived aggregates for a restaurant
/// Returns (average rating rounded to one decimal place, review count);
/// zero reviews yield an average of 0.0
pub fn aggregate_ratings(ratings: &[i32]) -> (f64, i64) {
    let count = ratings.len() as i64;
    if count == 0 {
        return (0.0, 0);
    }

    let sum: i64 = ratings.iter().map(|r| *r as i64).sum();
    let average = sum as f64 / count as f64;
    ((average * 10.0).round() / 10.0, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_ratings_averages_and_counts() {
        assert_eq!(aggregate_ratings(&[3, 5]), (4.0, 2));
        assert_eq!(aggregate_ratings(&[5]), (5.0, 1));
        // 1+2+5 = 8 / 3 = 2.666... rounds to one decimal place
        assert_eq!(aggregate_ratings(&[1, 2, 5]), (2.7, 3));
    }

    #[test]
    fn test_aggregate_ratings_empty_is_zero() {
        assert_eq!(aggregate_ratings(&[]), (0.0, 0));
    }

    #[test]
    fn test_review_request_rating_bounds() {
        let low = CreateReviewRequest {
            rating: 0,
            comment: "fine".to_string(),
        };
        assert!(low.validate().is_err());

        let high = CreateReviewRequest {
            rating: 6,
            comment: "fine".to_string(),
        };
        assert!(high.validate().is_err());

        let ok = CreateReviewRequest {
            rating: 5,
            comment: "fine".to_string(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_review_request_comment_required() {
        let blank = CreateReviewRequest {
            rating: 4,
            comment: String::new(),
        };
        let errors = blank.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("comment"));
    }
}
