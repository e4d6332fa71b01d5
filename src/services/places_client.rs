// src/services/places_client.rs
// DOCUMENTATION: Google Places API (v1) client
// PURPOSE: Search for restaurants near a point and map the raw place
// payloads into ingestion-ready restaurant records

use crate::errors::RestaurantsError;
use crate::models::{PriceTier, RestaurantUpsert};
use crate::services::cuisine::normalize_cuisine;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Fields requested from the searchNearby endpoint
const SEARCH_FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,places.location,places.photos,places.priceLevel,places.types";

/// Height cap applied to fetchable photo URLs
const PHOTO_MAX_HEIGHT_PX: u32 = 800;

/// Places API client
/// DOCUMENTATION: Handles authentication and API calls to Google Places v1
pub struct PlacesClient {
    /// HTTP client for making requests
    client: Client,
    /// Google API key
    api_key: String,
    /// Base URL for the Places API
    base_url: String,
}

/// Request body for the nearby search endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NearbySearchBody {
    included_types: Vec<&'static str>,
    max_result_count: i32,
    location_restriction: LocationRestriction,
}

#[derive(Debug, Serialize)]
struct LocationRestriction {
    circle: Circle,
}

#[derive(Debug, Serialize)]
struct Circle {
    center: Center,
    radius: f64,
}

#[derive(Debug, Serialize)]
struct Center {
    latitude: f64,
    longitude: f64,
}

/// Parsed response from the nearby search endpoint
/// An absent places array means zero results
#[derive(Debug, Default, Deserialize)]
pub struct NearbySearchResponse {
    #[serde(default)]
    pub places: Vec<GooglePlace>,
}

/// Individual place from the Places API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePlace {
    /// Google's unique place identifier
    pub id: String,
    /// Localized display name
    pub display_name: Option<DisplayName>,
    /// Formatted address
    pub formatted_address: Option<String>,
    /// Geographic location
    pub location: Option<GoogleLocation>,
    /// Photo references
    #[serde(default)]
    pub photos: Vec<GooglePhoto>,
    /// Price level string (e.g. "PRICE_LEVEL_MODERATE")
    pub price_level: Option<String>,
    /// Raw category tags (e.g. ["italian_restaurant", "restaurant"])
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayName {
    pub text: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GoogleLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// Photo reference; name is the resource path used to fetch media
#[derive(Debug, Clone, Deserialize)]
pub struct GooglePhoto {
    pub name: String,
}

impl PlacesClient {
    /// Create new Places API client
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://places.googleapis.com/v1".to_string(),
        }
    }

    /// Search for restaurants near a geographic point
    /// DOCUMENTATION: Issues a searchNearby request restricted to a circle
    ///
    /// # Arguments
    /// * `latitude` - Center point latitude
    /// * `longitude` - Center point longitude
    /// * `radius` - Search radius in meters
    /// * `max_results` - Result cap requested from the API
    ///
    /// # Returns
    /// Ingestion-ready restaurant records; places missing a name or
    /// location are skipped
    pub async fn search_nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius: f64,
        max_results: i32,
    ) -> Result<Vec<RestaurantUpsert>, RestaurantsError> {
        let url = format!("{}/places:searchNearby", self.base_url);

        let body = NearbySearchBody {
            included_types: vec!["restaurant"],
            max_result_count: max_results,
            location_restriction: LocationRestriction {
                circle: Circle {
                    center: Center {
                        latitude,
                        longitude,
                    },
                    radius,
                },
            },
        };

        log::debug!(
            "Places nearby search: lat={}, lng={}, radius={}",
            latitude,
            longitude,
            radius
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", SEARCH_FIELD_MASK)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                log::error!("Places API request failed: {}", e);
                RestaurantsError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Places API error {}: {}", status, body);
            return Err(RestaurantsError::ExternalApiError(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let api_response: NearbySearchResponse = response.json().await.map_err(|e| {
            log::error!("Failed to parse Places response: {}", e);
            RestaurantsError::ExternalApiError(format!("Parse error: {}", e))
        })?;

        log::info!(
            "Places search returned {} results",
            api_response.places.len()
        );

        Ok(api_response
            .places
            .iter()
            .filter_map(|place| self.to_upsert(place))
            .collect())
    }

    /// Convert a photo resource name into a fetchable URL
    /// DOCUMENTATION: Appends the API key and a max-height parameter
    pub fn photo_url(&self, photo_name: &str) -> String {
        format!(
            "{}/{}/media?key={}&maxHeightPx={}",
            self.base_url, photo_name, self.api_key, PHOTO_MAX_HEIGHT_PX
        )
    }

    /// Map a raw place payload into an ingestion record
    /// Price levels go through the fixed tier table; category tags are
    /// joined and normalized into the cuisine label string
    fn to_upsert(&self, place: &GooglePlace) -> Option<RestaurantUpsert> {
        let name = place.display_name.as_ref()?.text.clone();
        let location = place.location?;

        let photo_url = place.photos.first().map(|photo| self.photo_url(&photo.name));
        let price_level = place
            .price_level
            .as_deref()
            .map(PriceTier::from_google);
        let cuisine = normalize_cuisine(&place.types.join(", "));

        Some(RestaurantUpsert {
            name,
            address: place.formatted_address.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            place_id: place.id.clone(),
            price_level,
            cuisine,
            photo_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> PlacesClient {
        PlacesClient::new("test_key".to_string())
    }

    fn parsed_place(payload: &str) -> GooglePlace {
        serde_json::from_str(payload).unwrap()
    }

    #[test]
    fn test_to_upsert_maps_place_payload() {
        let place = parsed_place(
            r#"{
                "id": "ChIJ123",
                "displayName": {"text": "Trattoria Roma"},
                "formattedAddress": "123 Roxas Blvd, Manila",
                "location": {"latitude": 14.5995, "longitude": 120.9842},
                "photos": [{"name": "places/ChIJ123/photos/abc"}],
                "priceLevel": "PRICE_LEVEL_MODERATE",
                "types": ["italian_restaurant", "pizza_restaurant", "restaurant"]
            }"#,
        );

        let upsert = client().to_upsert(&place).unwrap();
        assert_eq!(upsert.name, "Trattoria Roma");
        assert_eq!(upsert.place_id, "ChIJ123");
        assert_eq!(upsert.address, Some("123 Roxas Blvd, Manila".to_string()));
        assert_eq!(upsert.latitude, 14.5995);
        assert_eq!(upsert.longitude, 120.9842);
        assert_eq!(upsert.price_level, Some(PriceTier::Moderate));
        assert_eq!(upsert.cuisine, Some("italian, pizza".to_string()));
        assert_eq!(
            upsert.photo_url,
            Some(
                "https://places.googleapis.com/v1/places/ChIJ123/photos/abc/media?key=test_key&maxHeightPx=800"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_to_upsert_skips_places_missing_name_or_location() {
        let no_name = parsed_place(
            r#"{"id": "x", "location": {"latitude": 1.0, "longitude": 2.0}}"#,
        );
        assert!(client().to_upsert(&no_name).is_none());

        let no_location = parsed_place(r#"{"id": "x", "displayName": {"text": "Somewhere"}}"#);
        assert!(client().to_upsert(&no_location).is_none());
    }

    #[test]
    fn test_unmapped_price_level_is_unknown_and_absent_stays_absent() {
        let unmapped = parsed_place(
            r#"{
                "id": "x",
                "displayName": {"text": "A"},
                "location": {"latitude": 1.0, "longitude": 2.0},
                "priceLevel": "PRICE_LEVEL_UNSPECIFIED"
            }"#,
        );
        assert_eq!(
            client().to_upsert(&unmapped).unwrap().price_level,
            Some(PriceTier::Unknown)
        );

        let absent = parsed_place(
            r#"{
                "id": "x",
                "displayName": {"text": "A"},
                "location": {"latitude": 1.0, "longitude": 2.0}
            }"#,
        );
        assert_eq!(client().to_upsert(&absent).unwrap().price_level, None);
    }

    #[test]
    fn test_zero_result_response_parses_to_empty() {
        let response: NearbySearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.places.is_empty());
    }
}
