use axum::{
    async_trait,
    extract::{
        rejection::JsonRejection,
        FromRequest, FromRequestParts, Path, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::AppError;

/// JSON body extractor whose rejection renders the standard error envelope
/// instead of axum's plain-text reply. The decode detail is logged, not
/// returned to the client.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => {
                warn!(error = %rejection, "request body rejected");
                Err(AppError::bad_request("invalid request body"))
            }
        }
    }
}

/// Path extractor with the same envelope-aware rejection.
pub struct AppPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for AppPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(AppPath(value)),
            Err(rejection) => {
                warn!(error = %rejection, "path parameter rejected");
                Err(AppError::bad_request("invalid path parameter"))
            }
        }
    }
}
