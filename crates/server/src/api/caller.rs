use std::str::FromStr;

use algoarena_core::domain::UserId;
use axum::{extract::FromRequestParts, http::request::Parts};

use super::error::ApiError;

/// Header the upstream auth layer sets to the signed-in user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub UserId);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(ApiError::unauthenticated)?;

        UserId::from_str(raw)
            .map(Caller)
            .map_err(|_| ApiError::unauthenticated())
    }
}
