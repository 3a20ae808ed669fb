use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::ApiError;

/// JSON body where an empty body reads as `T::default()`.
///
/// Unlike `axum::Json` it doesn't require a JSON content type, and every
/// rejection renders as a JSON `ApiError` so the handler's presence checks
/// decide what's missing.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Body {
                status: e.status(),
                message: e.body_text(),
            })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(T::default()));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes).map_err(|e| {
            warn!(error = %e.body_text(), "rejected request body");
            ApiError::Body {
                status: e.status(),
                message: e.body_text(),
            }
        })?;
        Ok(JsonBody(value))
    }
}
