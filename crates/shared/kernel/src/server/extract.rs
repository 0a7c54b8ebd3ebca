use super::error::ApiError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use std::convert::Infallible;

/// Header carrying the acting user's identifier.
///
/// Authentication itself happens upstream; this layer only attributes
/// mutations for the audit trail.
pub const USER_HEADER: &str = "x-user";

/// Fallback actor when the header is absent or unreadable.
const ANONYMOUS: &str = "anonymous";

/// The identity performing the current request, taken from [`USER_HEADER`].
#[derive(Debug, Clone)]
pub struct ActingUser(pub String);

impl ActingUser {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ActingUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(ANONYMOUS);

        Ok(Self(user.to_owned()))
    }
}

/// JSON body extractor whose rejection is a structured [`ApiError`],
/// so malformed bodies surface exactly like every other failure.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + 'static,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(map_rejection(&rejection)),
        }
    }
}

fn map_rejection(rejection: &JsonRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}
