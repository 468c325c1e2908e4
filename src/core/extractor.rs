use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;

/// JSON body extractor for the pet and loss-report endpoints. A body that
/// cannot be read lands in the same `ApiResponse` error envelope the services
/// produce, instead of axum's plain-text rejection.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(reject)?;
        Ok(Self(value))
    }
}

fn reject(rejection: JsonRejection) -> AppError {
    let message = match rejection {
        JsonRejection::JsonDataError(e) => {
            format!("Request body does not match the expected shape: {e}")
        }
        JsonRejection::JsonSyntaxError(e) => format!("Request body is not valid JSON: {e}"),
        JsonRejection::MissingJsonContentType(_) => {
            "Request must be sent as application/json".to_string()
        }
        other => format!("Could not read request body: {other}"),
    };
    AppError::BadRequest(message)
}

/// Pulls the caller the auth middleware stored in request extensions. Only
/// routes behind the JWT gate have one; anywhere else this rejects.
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("No authenticated user on this request".to_string()))
    }
}
