// src/services/geocoding_client.rs
// DOCUMENTATION: Google Geocoding API client
// PURPOSE: Resolve a free-text address into geographic coordinates

use crate::errors::RestaurantsError;
use reqwest::Client;
use serde::Deserialize;

/// Geocoding API client
/// DOCUMENTATION: Handles authentication and API calls to Google Geocoding
pub struct GeocodingClient {
    /// HTTP client for making requests
    client: Client,
    /// Google API key
    api_key: String,
    /// Base URL for the Geocoding API
    base_url: String,
}

/// Parsed response from the Geocoding API
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    pub status: String,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub geometry: GeocodeGeometry,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeGeometry {
    pub location: GeocodeLocation,
}

/// Coordinates of the first geocoding result
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GeocodeLocation {
    pub lat: f64,
    pub lng: f64,
}

impl GeocodingClient {
    /// Create new Geocoding API client
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://maps.googleapis.com/maps/api/geocode".to_string(),
        }
    }

    /// Resolve an address into coordinates
    /// DOCUMENTATION: Issues a geocode lookup and returns the first result's
    /// location. An empty result set or a failed call both surface as
    /// AddressNotFound; only transport-level failures surface as an
    /// external API error.
    pub async fn geocode_address(&self, address: &str) -> Result<GeocodeLocation, RestaurantsError> {
        let url = format!("{}/json", self.base_url);
        let params = [("address", address), ("key", &self.api_key)];

        log::debug!("Geocoding address: {}", address);

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                log::error!("Geocoding API request failed: {}", e);
                RestaurantsError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Geocoding API error {}: {}", status, body);
            return Err(RestaurantsError::AddressNotFound);
        }

        let api_response: GeocodeResponse = response.json().await.map_err(|e| {
            log::error!("Failed to parse geocoding response: {}", e);
            RestaurantsError::ExternalApiError(format!("Parse error: {}", e))
        })?;

        Self::location_from_response(api_response)
    }

    /// Extract the first result's coordinates from a parsed response
    fn location_from_response(
        response: GeocodeResponse,
    ) -> Result<GeocodeLocation, RestaurantsError> {
        if let Some(message) = response.error_message {
            log::warn!(
                "Geocoding returned status {} with message: {}",
                response.status,
                message
            );
        }

        response
            .results
            .first()
            .map(|result| result.geometry.location)
            .ok_or(RestaurantsError::AddressNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_first_result() {
        let payload = r#"{
            "results": [
                {"geometry": {"location": {"lat": 14.5995, "lng": 120.9842}}},
                {"geometry": {"location": {"lat": 0.0, "lng": 0.0}}}
            ],
            "status": "OK"
        }"#;
        let response: GeocodeResponse = serde_json::from_str(payload).unwrap();

        let location = GeocodingClient::location_from_response(response).unwrap();
        assert_eq!(location.lat, 14.5995);
        assert_eq!(location.lng, 120.9842);
    }

    #[test]
    fn test_empty_results_is_address_not_found() {
        let payload = r#"{"results": [], "status": "ZERO_RESULTS"}"#;
        let response: GeocodeResponse = serde_json::from_str(payload).unwrap();

        assert!(matches!(
            GeocodingClient::location_from_response(response),
            Err(RestaurantsError::AddressNotFound)
        ));
    }
}
