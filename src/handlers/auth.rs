// src/handlers/auth.rs
// DOCUMENTATION: Caller identity extraction
// PURPOSE: Authentication is delegated to the upstream gateway, which
// forwards the authenticated user's id in the X-User-Id header. Handlers
// take CurrentUser where identity is required, Option<CurrentUser> where
// it only enriches the response.

use crate::errors::RestaurantsError;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

/// Header carrying the gateway-authenticated user id
const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: Uuid,
}

impl FromRequest for CurrentUser {
    type Error = RestaurantsError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user_id = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value.trim()).ok());

        ready(match user_id {
            Some(id) => Ok(CurrentUser { id }),
            None => Err(RestaurantsError::Unauthorized),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_extracts_user_id_from_header() {
        let id = Uuid::new_v4();
        let req = TestRequest::default()
            .insert_header(("x-user-id", id.to_string()))
            .to_http_request();

        let user = tokio_test::block_on(CurrentUser::extract(&req)).unwrap();
        assert_eq!(user.id, id);
    }

    #[test]
    fn test_missing_or_malformed_header_is_unauthorized() {
        let missing = TestRequest::default().to_http_request();
        assert!(tokio_test::block_on(CurrentUser::extract(&missing)).is_err());

        let malformed = TestRequest::default()
            .insert_header(("x-user-id", "not-a-uuid"))
            .to_http_request();
        assert!(tokio_test::block_on(CurrentUser::extract(&malformed)).is_err());
    }
}
