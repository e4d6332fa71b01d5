// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

/// Application-specific error types
/// DOCUMENTATION: Comprehensive error enum for all possible failures
/// Each variant maps to appropriate HTTP status code and error response
#[derive(Error, Debug)]
pub enum RestaurantsError {
    #[error("Restaurant not found with id: {0}")]
    NotFound(String),

    #[error("Address not found")]
    AddressNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Field-attributed validation failures from request DTOs
    #[error("Validation failed")]
    FieldValidation(ValidationErrors),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Forbidden access")]
    #[allow(dead_code)]
    Forbidden,

    #[error("Internal server error")]
    #[allow(dead_code)]
    InternalError,

    #[error("External API error: {0}")]
    ExternalApiError(String),
}

/// Convert RestaurantsError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
/// Database and internal errors are logged in full but reported with a
/// generic message only.
impl ResponseError for RestaurantsError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_code) = match self {
            RestaurantsError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            RestaurantsError::AddressNotFound => (StatusCode::NOT_FOUND, "ADDRESS_NOT_FOUND"),
            RestaurantsError::DatabaseError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
            RestaurantsError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            RestaurantsError::ValidationError(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR")
            }
            RestaurantsError::FieldValidation(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR")
            }
            RestaurantsError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            RestaurantsError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            RestaurantsError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
            RestaurantsError::ExternalApiError(_) => (StatusCode::BAD_GATEWAY, "EXTERNAL_API_ERROR"),
        };

        let message = match self {
            RestaurantsError::DatabaseError(detail) => {
                log::error!("Database error surfaced at boundary: {}", detail);
                "An unexpected error occurred".to_string()
            }
            RestaurantsError::InternalError => "An unexpected error occurred".to_string(),
            other => other.to_string(),
        };

        let mut body = json!({
            "error": {
                "code": error_code,
                "message": message,
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        // Attach the field -> messages map for request validation failures
        if let RestaurantsError::FieldValidation(errors) = self {
            if let Ok(fields) = serde_json::to_value(errors) {
                body["error"]["fields"] = fields;
            }
        }

        HttpResponse::build(status).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            RestaurantsError::NotFound(_) => StatusCode::NOT_FOUND,
            RestaurantsError::AddressNotFound => StatusCode::NOT_FOUND,
            RestaurantsError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestaurantsError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            RestaurantsError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RestaurantsError::FieldValidation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RestaurantsError::Unauthorized => StatusCode::UNAUTHORIZED,
            RestaurantsError::Forbidden => StatusCode::FORBIDDEN,
            RestaurantsError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            RestaurantsError::ExternalApiError(_) => StatusCode::BAD_GATEWAY,
        }
    }
}
