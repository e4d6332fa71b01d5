// src/models/restaurant.rs
// DOCUMENTATION: Core data structures for restaurants
// PURPOSE: Defines all serialization/deserialization models for API and database

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::ReviewResponse;

/// Closed set of relative-cost labels for a restaurant
/// DOCUMENTATION: Mapped from the Google Places price level strings and
/// persisted as the label text. The declaration order is the sort ordinal
/// used by the price_asc/price_desc sort orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceTier {
    Free,
    Inexpensive,
    Moderate,
    Expensive,
    #[serde(rename = "Very Expensive")]
    VeryExpensive,
    Unknown,
}

impl PriceTier {
    /// Map a Google Places API price level string to a tier
    /// Unmapped values collapse to Unknown
    pub fn from_google(level: &str) -> Self {
        match level {
            "PRICE_LEVEL_FREE" => PriceTier::Free,
            "PRICE_LEVEL_INEXPENSIVE" => PriceTier::Inexpensive,
            "PRICE_LEVEL_MODERATE" => PriceTier::Moderate,
            "PRICE_LEVEL_EXPENSIVE" => PriceTier::Expensive,
            "PRICE_LEVEL_VERY_EXPENSIVE" => PriceTier::VeryExpensive,
            _ => PriceTier::Unknown,
        }
    }

    /// Human-readable label, also the persisted representation
    pub fn label(&self) -> &'static str {
        match self {
            PriceTier::Free => "Free",
            PriceTier::Inexpensive => "Inexpensive",
            PriceTier::Moderate => "Moderate",
            PriceTier::Expensive => "Expensive",
            PriceTier::VeryExpensive => "Very Expensive",
            PriceTier::Unknown => "Unknown",
        }
    }

    /// Parse a persisted label back into a tier
    /// A label outside the closed set yields None and is treated as an
    /// absent tier by the sort pipeline
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Free" => Some(PriceTier::Free),
            "Inexpensive" => Some(PriceTier::Inexpensive),
            "Moderate" => Some(PriceTier::Moderate),
            "Expensive" => Some(PriceTier::Expensive),
            "Very Expensive" => Some(PriceTier::VeryExpensive),
            "Unknown" => Some(PriceTier::Unknown),
            _ => None,
        }
    }

    /// Position in the fixed ordinal table
    /// [Free, Inexpensive, Moderate, Expensive, Very Expensive, Unknown]
    pub fn ordinal(&self) -> i32 {
        match self {
            PriceTier::Free => 0,
            PriceTier::Inexpensive => 1,
            PriceTier::Moderate => 2,
            PriceTier::Expensive => 3,
            PriceTier::VeryExpensive => 4,
            PriceTier::Unknown => 5,
        }
    }
}

/// Supported sort orders for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Rating,
    Reviews,
    PriceAsc,
    PriceDesc,
}

impl SortBy {
    /// Parse a query-string value
    /// Unrecognized values yield None, which preserves input order
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "rating" => Some(SortBy::Rating),
            "reviews" => Some(SortBy::Reviews),
            "price_asc" => Some(SortBy::PriceAsc),
            "price_desc" => Some(SortBy::PriceDesc),
            _ => None,
        }
    }
}

/// Represents a complete restaurant record from the database
/// DOCUMENTATION: Maps to the restaurants table; price_level is converted
/// from its stored label by the repository row types.
/// The ratings/reviews_count fields are a materialized view over the
/// reviews table and are written only by the rating refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    /// Unique identifier (UUID v4)
    pub id: Uuid,

    /// External place identifier (used for deduplication)
    pub place_id: String,

    /// Restaurant name
    pub name: String,

    /// Formatted street address
    pub address: Option<String>,

    /// Geographic coordinates
    pub latitude: f64,
    pub longitude: f64,

    /// Relative cost tier
    pub price_level: Option<PriceTier>,

    /// Normalized, comma-joined cuisine labels
    pub cuisine: Option<String>,

    /// Fetchable photo URL
    pub photo_url: Option<String>,

    /// Cached average review rating (one decimal place)
    pub ratings: Option<f64>,

    /// Cached number of reviews
    pub reviews_count: Option<i32>,

    /// When record was created
    pub created_at: DateTime<Utc>,

    /// When record was last modified
    pub updated_at: DateTime<Utc>,
}

/// Ingestion DTO for a restaurant discovered through the places API
/// DOCUMENTATION: Built by the places client from a raw provider record,
/// upserted by place_id. Deliberately omits ratings/reviews_count so the
/// ingestion path can never clobber the review-derived cache.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RestaurantUpsert {
    /// Restaurant name (required)
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// Formatted address
    pub address: Option<String>,

    /// Geographic coordinates
    pub latitude: f64,
    pub longitude: f64,

    /// External place identifier (required, upsert key)
    #[validate(length(min = 1))]
    pub place_id: String,

    /// Relative cost tier
    pub price_level: Option<PriceTier>,

    /// Normalized cuisine label string
    pub cuisine: Option<String>,

    /// Fetchable photo URL
    pub photo_url: Option<String>,
}

/// Search query parameters
/// DOCUMENTATION: DTO for parsing query string in /restaurants/search
/// Only address is required; the rest tune filtering and ordering
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Free-text address to geocode
    pub address: Option<String>,

    /// Search radius in meters (default 1000)
    pub radius: Option<f64>,

    /// Maximum number of results to request (default 20)
    pub max_results: Option<i32>,

    /// Case-insensitive cuisine substring filter
    pub cuisine: Option<String>,

    /// One of: rating, reviews, price_asc, price_desc
    pub sort_by: Option<String>,

    /// Keep only the caller's favorited restaurants
    pub show_favorites: Option<bool>,
}

/// Response DTO for API responses
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantResponse {
    pub id: Uuid,
    pub place_id: String,
    pub name: String,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub price_level: Option<PriceTier>,
    pub cuisine: Option<String>,
    pub photo_url: Option<String>,

    /// Review-derived aggregates (0.0 / 0 before the first review)
    pub average_rating: f64,
    pub reviews_count: i32,

    /// Present only when the caller is authenticated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Detailed response DTO
/// DOCUMENTATION: Extended response with the restaurant's reviews
/// Used for GET /restaurants/{id}
#[derive(Debug, Serialize)]
pub struct RestaurantDetailResponse {
    #[serde(flatten)]
    pub restaurant: RestaurantResponse,
    pub reviews: Vec<ReviewResponse>,
}

/// Search response wrapper
/// DOCUMENTATION: Upstream lookup failures are recovered into an empty
/// result list plus a user-visible notice instead of an error status
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub restaurants: Vec<RestaurantResponse>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl Restaurant {
    /// Convert Restaurant to RestaurantResponse for API
    /// is_favorite is None for unauthenticated callers so the field is
    /// omitted from the payload entirely
    pub fn to_response(&self, is_favorite: Option<bool>) -> RestaurantResponse {
        RestaurantResponse {
            id: self.id,
            place_id: self.place_id.clone(),
            name: self.name.clone(),
            address: self.address.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            price_level: self.price_level,
            cuisine: self.cuisine.clone(),
            photo_url: self.photo_url.clone(),
            average_rating: self.ratings.unwrap_or(0.0),
            reviews_count: self.reviews_count.unwrap_or(0),
            is_favorite,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_tier_google_mapping() {
        assert_eq!(PriceTier::from_google("PRICE_LEVEL_FREE"), PriceTier::Free);
        assert_eq!(
            PriceTier::from_google("PRICE_LEVEL_INEXPENSIVE"),
            PriceTier::Inexpensive
        );
        assert_eq!(
            PriceTier::from_google("PRICE_LEVEL_MODERATE"),
            PriceTier::Moderate
        );
        assert_eq!(
            PriceTier::from_google("PRICE_LEVEL_EXPENSIVE"),
            PriceTier::Expensive
        );
        assert_eq!(
            PriceTier::from_google("PRICE_LEVEL_VERY_EXPENSIVE"),
            PriceTier::VeryExpensive
        );
        // Anything outside the table collapses to Unknown
        assert_eq!(
            PriceTier::from_google("PRICE_LEVEL_UNSPECIFIED"),
            PriceTier::Unknown
        );
        assert_eq!(PriceTier::from_google(""), PriceTier::Unknown);
    }

    #[test]
    fn test_price_tier_label_round_trip() {
        for tier in [
            PriceTier::Free,
            PriceTier::Inexpensive,
            PriceTier::Moderate,
            PriceTier::Expensive,
            PriceTier::VeryExpensive,
            PriceTier::Unknown,
        ] {
            assert_eq!(PriceTier::from_label(tier.label()), Some(tier));
        }
    }

    #[test]
    fn test_price_tier_foreign_label_is_absent() {
        assert_eq!(PriceTier::from_label("Luxury"), None);
        assert_eq!(PriceTier::from_label(""), None);
    }

    #[test]
    fn test_price_tier_ordinals() {
        assert_eq!(PriceTier::Free.ordinal(), 0);
        assert_eq!(PriceTier::VeryExpensive.ordinal(), 4);
        assert_eq!(PriceTier::Unknown.ordinal(), 5);
    }

    #[test]
    fn test_sort_by_parse() {
        assert_eq!(SortBy::parse("rating"), Some(SortBy::Rating));
        assert_eq!(SortBy::parse("reviews"), Some(SortBy::Reviews));
        assert_eq!(SortBy::parse("price_asc"), Some(SortBy::PriceAsc));
        assert_eq!(SortBy::parse("price_desc"), Some(SortBy::PriceDesc));
        assert_eq!(SortBy::parse("distance"), None);
        assert_eq!(SortBy::parse(""), None);
    }
}
