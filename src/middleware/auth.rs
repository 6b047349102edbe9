use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

/// Header carrying the owner key, set by the authenticating proxy in front
/// of this service.
pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Clone, Debug, PartialEq)]
pub struct AuthUser {
    pub id: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty());

        match user_id {
            Some(id) => Ok(AuthUser { id: id.to_string() }),
            None => {
                tracing::warn!("Missing {} header", USER_ID_HEADER);
                Err(AppError::Unauthorized)
            }
        }
    }
}
